//! Validate command - Structurally validate an HCL template file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use terramod_registry::TerraformRegistry;

#[derive(Args)]
pub struct ValidateArgs {
    /// HCL file to validate
    template_file: PathBuf,
}

pub async fn execute(registry: &TerraformRegistry, args: ValidateArgs) -> Result<()> {
    let hcl = fs::read_to_string(&args.template_file)
        .with_context(|| format!("Failed to read template {:?}", args.template_file))?;

    let result = registry.validate_hcl(&hcl);

    if result.valid {
        println!("✅ HCL is valid");
    } else {
        println!("❌ HCL validation failed");
    }
    for error in &result.errors {
        println!("   ERROR: {}", error);
    }
    for warning in &result.warnings {
        println!("   ⚠️  {}", warning);
    }

    if !result.valid {
        anyhow::bail!("validation failed with {} error(s)", result.errors.len());
    }
    Ok(())
}
