//! Register command - Register a new module from a template file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terramod_core::{Provider, TerraformOutput, TerraformVariable};
use terramod_registry::{NewModule, TerraformRegistry};

#[derive(Args)]
pub struct RegisterArgs {
    /// Module name (unique across the registry)
    name: String,

    /// Provider (aws, gcp, azure, kubernetes, helm, null)
    provider: String,

    /// Resource type classification
    resource_type: String,

    /// Path to the HCL template file
    template_file: PathBuf,

    /// Module description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Initial version
    #[arg(long, default_value = "1.0.0")]
    version: String,

    /// Path to a JSON file declaring the variable schema
    #[arg(long)]
    variables: Option<PathBuf>,

    /// Path to a JSON file declaring the outputs
    #[arg(long)]
    outputs: Option<PathBuf>,

    /// Tag to attach (repeatable)
    #[arg(short, long)]
    tag: Vec<String>,
}

pub async fn execute(registry: &TerraformRegistry, args: RegisterArgs) -> Result<()> {
    let provider = Provider::parse(&args.provider)?;
    let hcl = fs::read_to_string(&args.template_file)
        .with_context(|| format!("Failed to read template {:?}", args.template_file))?;

    let variables: Vec<TerraformVariable> = match &args.variables {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read variables {:?}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid variable schema in {:?}", path))?
        }
        None => Vec::new(),
    };
    let outputs: Vec<TerraformOutput> = match &args.outputs {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read outputs {:?}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid output schema in {:?}", path))?
        }
        None => Vec::new(),
    };

    info!("Registering module: {}", args.name);

    let module = registry
        .register_module(
            NewModule::new(args.name, provider, args.resource_type, hcl)
                .with_description(args.description)
                .with_version(args.version)
                .with_variables(variables)
                .with_outputs(outputs)
                .with_tags(args.tag),
        )
        .await?;

    println!("✅ Registered {} v{} ({})", module.name, module.version, module.id);
    Ok(())
}
