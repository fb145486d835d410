//! terramod CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Module or reference not found
//! - 3: Template validation failure
//! - 4: Missing required variables

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terramod_registry::{seed_builtin_modules, TerraformRegistry};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const NOT_FOUND: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const MISSING_VARIABLES: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::from_default_env()
            .add_directive("terramod_core=info".parse().unwrap())
            .add_directive("terramod_registry=info".parse().unwrap())
            .add_directive("warn".parse().unwrap())
    };
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    match run(cli).await {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = cli.db.clone().unwrap_or_else(commands::default_db_path);
    let registry = TerraformRegistry::open(&db_path).await?;
    seed_builtin_modules(&registry).await?;

    match cli.command {
        Commands::List(args) => commands::list::execute(&registry, args).await,
        Commands::Register(args) => commands::register::execute(&registry, args).await,
        Commands::Generate(args) => commands::generate::execute(&registry, args).await,
        Commands::Validate(args) => commands::validate::execute(&registry, args).await,
        Commands::Plan(args) => commands::plan::execute(&registry, args).await,
        Commands::Search(args) => commands::search::execute(&registry, args).await,
        Commands::Docs(args) => commands::docs::execute(&registry, args).await,
        Commands::Stats(args) => commands::stats::execute(&registry, args).await,
        Commands::Delete(args) => commands::delete::execute(&registry, args).await,
        Commands::Bump(args) => commands::bump::execute(&registry, args).await,
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let msg = e.to_string().to_lowercase();

    if msg.contains("missing required variables") {
        ExitCodes::MISSING_VARIABLES
    } else if msg.contains("invalid hcl") || msg.contains("validation") {
        ExitCodes::VALIDATION_FAILURE
    } else if msg.contains("not found") {
        ExitCodes::NOT_FOUND
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
