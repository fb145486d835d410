//! Docs command - Generate markdown documentation for a module.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use terramod_registry::TerraformRegistry;

#[derive(Args)]
pub struct DocsArgs {
    /// Module name or id
    module: String,

    /// Write documentation to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub async fn execute(registry: &TerraformRegistry, args: DocsArgs) -> Result<()> {
    let docs = registry.generate_docs(&args.module).await?;

    match &args.out {
        Some(path) => {
            fs::write(path, &docs).with_context(|| format!("Failed to write {:?}", path))?;
            println!("✅ Written to {}", path.display());
        }
        None => println!("{}", docs),
    }
    Ok(())
}
