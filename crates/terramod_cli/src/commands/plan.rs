//! Plan command - Export a plan-style preview for a module.

use anyhow::Result;
use clap::Args;

use terramod_registry::TerraformRegistry;

use super::parse_var_assignments;

#[derive(Args)]
pub struct PlanArgs {
    /// Module name or id
    module: String,

    /// Variable value, key=value (repeatable)
    #[arg(long = "var")]
    var: Vec<String>,
}

pub async fn execute(registry: &TerraformRegistry, args: PlanArgs) -> Result<()> {
    let values = parse_var_assignments(&args.var)?;
    let plan = registry.export_plan(&args.module, &values).await?;
    println!("{}", plan);
    Ok(())
}
