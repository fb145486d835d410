//! Search command - Search modules by name, description, or tags.

use anyhow::Result;
use clap::Args;

use terramod_registry::TerraformRegistry;

use super::truncate;

#[derive(Args)]
pub struct SearchArgs {
    /// Search query (case-insensitive substring)
    query: String,
}

pub async fn execute(registry: &TerraformRegistry, args: SearchArgs) -> Result<()> {
    let modules = registry.search(&args.query).await?;

    if modules.is_empty() {
        println!("No modules found for '{}'", args.query);
        return Ok(());
    }

    println!("{:<26} {:<12} {}", "NAME", "PROVIDER", "DESCRIPTION");
    for module in &modules {
        println!(
            "{:<26} {:<12} {}",
            module.name,
            module.provider.as_str(),
            truncate(&module.description, 80)
        );
    }
    Ok(())
}
