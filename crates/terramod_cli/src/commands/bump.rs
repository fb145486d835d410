//! Bump command - Bump a module's version.

use anyhow::Result;
use clap::Args;

use terramod_core::VersionPart;
use terramod_registry::TerraformRegistry;

#[derive(Args)]
pub struct BumpArgs {
    /// Module name or id
    module: String,

    /// Version part to bump: major, minor, or patch
    #[arg(long, default_value = "patch")]
    part: VersionPart,
}

pub async fn execute(registry: &TerraformRegistry, args: BumpArgs) -> Result<()> {
    let new_version = registry.bump_version(&args.module, args.part).await?;
    println!("✅ {} is now v{}", args.module, new_version);
    Ok(())
}
