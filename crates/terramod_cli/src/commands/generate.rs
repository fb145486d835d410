//! Generate command - Render a module's HCL with variable values.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use terramod_registry::TerraformRegistry;

use super::parse_var_assignments;

#[derive(Args)]
pub struct GenerateArgs {
    /// Module name or id
    module: String,

    /// Variable value, key=value (repeatable)
    #[arg(long = "var")]
    var: Vec<String>,

    /// Write rendered HCL to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub async fn execute(registry: &TerraformRegistry, args: GenerateArgs) -> Result<()> {
    let values = parse_var_assignments(&args.var)?;
    let hcl = registry.generate_tf(&args.module, &values).await?;

    match &args.out {
        Some(path) => {
            fs::write(path, &hcl).with_context(|| format!("Failed to write {:?}", path))?;
            println!("✅ Written to {}", path.display());
        }
        None => println!("{}", hcl),
    }
    Ok(())
}
