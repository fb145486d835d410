//! Delete command - Delete a module by name or id.

use anyhow::Result;
use clap::Args;

use terramod_registry::TerraformRegistry;

#[derive(Args)]
pub struct DeleteArgs {
    /// Module name or id
    module: String,
}

pub async fn execute(registry: &TerraformRegistry, args: DeleteArgs) -> Result<()> {
    if registry.delete_module(&args.module).await? {
        println!("✅ Deleted {}", args.module);
    } else {
        println!("No module matched '{}'", args.module);
    }
    Ok(())
}
