//! CLI command definitions.
//!
//! Each subcommand maps to one registry operation; the heavy lifting lives
//! in terramod_registry and terramod_core.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use terramod_core::VarValue;

pub mod bump;
pub mod delete;
pub mod docs;
pub mod generate;
pub mod list;
pub mod plan;
pub mod register;
pub mod search;
pub mod stats;
pub mod validate;

/// terramod - Terraform module registry and renderer
#[derive(Parser)]
#[command(name = "terramod")]
#[command(version, about = "terramod - Terraform module registry and renderer")]
#[command(long_about = r#"
terramod manages a local catalog of parameterized Terraform modules:
register templates with a typed variable schema, render them with
concrete values, validate their structure, and preview what would change.

COMMANDS:
  list      List registered modules
  register  Register a module from an HCL template file
  generate  Render a module's HCL with variable values
  validate  Structurally validate an HCL template file
  plan      Export a plan-style preview for a module
  search    Search modules by name, description, or tags
  docs      Generate markdown documentation for a module
  stats     Show registry statistics
  delete    Delete a module by name or id
  bump      Bump a module's version

EXIT CODES:
  0 - Success
  1 - General error
  2 - Module or reference not found
  3 - Template validation failure
  4 - Missing required variables
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the registry database (default: ~/.terramod/modules.db)
    #[arg(long, global = true, env = "TERRAMOD_DB")]
    pub db: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered modules
    List(list::ListArgs),

    /// Register a new module from an HCL template file
    Register(register::RegisterArgs),

    /// Render a module's HCL with variable values
    Generate(generate::GenerateArgs),

    /// Structurally validate an HCL template file
    Validate(validate::ValidateArgs),

    /// Export a plan-style preview for a module
    Plan(plan::PlanArgs),

    /// Search modules by name, description, provider, or tags
    Search(search::SearchArgs),

    /// Generate markdown documentation for a module
    Docs(docs::DocsArgs),

    /// Show registry statistics
    Stats(stats::StatsArgs),

    /// Delete a module by name or id
    Delete(delete::DeleteArgs),

    /// Bump a module's version (major, minor, or patch)
    Bump(bump::BumpArgs),
}

/// Default database location under the user's home directory.
pub fn default_db_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".terramod")
        .join("modules.db")
}

/// Parse repeated `key=value` assignments into a value table.
pub(crate) fn parse_var_assignments(pairs: &[String]) -> Result<HashMap<String, VarValue>> {
    let mut values = HashMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid variable '{}', expected key=value", pair))?;
        values.insert(key.to_string(), VarValue::from(value));
    }
    Ok(values)
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
