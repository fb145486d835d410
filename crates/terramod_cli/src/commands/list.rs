//! List command - List registered modules.

use anyhow::Result;
use clap::Args;

use terramod_core::Provider;
use terramod_registry::TerraformRegistry;

use super::truncate;

#[derive(Args)]
pub struct ListArgs {
    /// Filter by provider
    #[arg(short, long)]
    provider: Option<String>,

    /// Filter by resource type
    #[arg(short, long)]
    resource: Option<String>,
}

pub async fn execute(registry: &TerraformRegistry, args: ListArgs) -> Result<()> {
    let provider = args.provider.as_deref().map(Provider::parse).transpose()?;
    let modules = registry
        .list_modules(provider, args.resource.as_deref())
        .await?;

    if modules.is_empty() {
        println!("No modules registered.");
        return Ok(());
    }

    println!(
        "{:<26} {:<12} {:<32} {:<9} {:>9}  {}",
        "NAME", "PROVIDER", "RESOURCE TYPE", "VERSION", "DOWNLOADS", "DESCRIPTION"
    );
    for module in &modules {
        println!(
            "{:<26} {:<12} {:<32} {:<9} {:>9}  {}",
            module.name,
            module.provider.as_str(),
            module.resource_type,
            module.version,
            module.download_count,
            truncate(&module.description, 60)
        );
    }
    println!();
    println!("{} module(s)", modules.len());

    Ok(())
}
