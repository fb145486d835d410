//! Stats command - Show registry statistics.

use anyhow::Result;
use clap::Args;

use terramod_registry::TerraformRegistry;

#[derive(Args)]
pub struct StatsArgs {}

pub async fn execute(registry: &TerraformRegistry, _args: StatsArgs) -> Result<()> {
    let stats = registry.stats().await?;

    println!("📦 Registry Statistics");
    println!();
    println!("Total modules: {}", stats.total_modules);
    println!();
    println!("By provider:");
    for entry in &stats.by_provider {
        println!("  {:<12} {}", entry.provider, entry.count);
    }
    println!();
    println!("Most downloaded:");
    for entry in &stats.most_downloaded {
        println!(
            "  {:<26} ({}) - {} download(s)",
            entry.name, entry.provider, entry.downloads
        );
    }
    Ok(())
}
