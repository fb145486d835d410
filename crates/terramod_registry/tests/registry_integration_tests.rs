//! Integration tests for the module registry over a real SQLite store.

use std::collections::HashMap;

use tempfile::TempDir;

use terramod_core::{
    CoreError, Provider, TerraformOutput, TerraformVariable, VarValue, VariableType, VersionPart,
};
use terramod_registry::{seed_builtin_modules, NewModule, RegistryError, TerraformRegistry};

const SIMPLE_HCL: &str = concat!(
    "resource \"aws_instance\" \"${var.name}\" {\n",
    "  ami           = \"${var.ami_id}\"\n",
    "  instance_type = \"${var.instance_type}\"\n",
    "}",
);

async fn temp_registry() -> (TerraformRegistry, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let registry = TerraformRegistry::open(dir.path().join("registry.db"))
        .await
        .unwrap();
    (registry, dir)
}

fn sample_spec(name: &str) -> NewModule {
    NewModule::new(name, Provider::Aws, "aws_instance", SIMPLE_HCL)
        .with_description("Test EC2")
        .with_variables(vec![
            TerraformVariable::new("name", VariableType::String, "Instance name"),
            TerraformVariable::new("ami_id", VariableType::String, "AMI ID"),
            TerraformVariable::new("instance_type", VariableType::String, "Type")
                .with_default("t3.micro")
                .optional(),
        ])
        .with_outputs(vec![TerraformOutput::new(
            "instance_id",
            "EC2 Instance ID",
            "aws_instance.main.id",
        )])
        .with_tags(vec!["aws".to_string(), "compute".to_string()])
}

fn values(pairs: &[(&str, &str)]) -> HashMap<String, VarValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), VarValue::from(*v)))
        .collect()
}

// Registration

#[tokio::test]
async fn test_register_returns_module() {
    let (registry, _dir) = temp_registry().await;
    let module = registry.register_module(sample_spec("test_ec2")).await.unwrap();

    assert_eq!(module.name, "test_ec2");
    assert_eq!(module.provider, Provider::Aws);
    assert_eq!(module.version, "1.0.0");
    assert_eq!(module.download_count, 0);
}

#[tokio::test]
async fn test_register_custom_version() {
    let (registry, _dir) = temp_registry().await;
    let module = registry
        .register_module(sample_spec("test_ec2_v2").with_version("2.5.1"))
        .await
        .unwrap();
    assert_eq!(module.version, "2.5.1");
}

#[tokio::test]
async fn test_register_get_round_trip() {
    let (registry, _dir) = temp_registry().await;
    let module = registry.register_module(sample_spec("persist_test")).await.unwrap();

    let retrieved = registry.get_module(&module.id.to_string()).await.unwrap();
    assert_eq!(retrieved, module);

    let by_name = registry.get_module("persist_test").await.unwrap();
    assert_eq!(by_name.variables, module.variables);
    assert_eq!(by_name.outputs, module.outputs);
    assert_eq!(by_name.hcl_template, SIMPLE_HCL);
}

#[tokio::test]
async fn test_register_duplicate_name_rejected() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("dup")).await.unwrap();

    let err = registry.register_module(sample_spec("dup")).await.unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(name) if name == "dup"));

    let listed = registry.list_modules(None, None).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_register_invalid_template_persists_nothing() {
    let (registry, _dir) = temp_registry().await;
    let spec = NewModule::new(
        "broken",
        Provider::Aws,
        "aws_instance",
        "resource \"aws_instance\" \"x\" { ami = \"y\"",
    );

    let err = registry.register_module(spec).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Core(CoreError::InvalidTemplate { .. })
    ));
    assert!(registry.get_module("broken").await.is_err());
}

#[tokio::test]
async fn test_register_duplicate_variable_rejected() {
    let (registry, _dir) = temp_registry().await;
    let spec = NewModule::new("dupvar", Provider::Aws, "aws_instance", SIMPLE_HCL)
        .with_variables(vec![
            TerraformVariable::new("name", VariableType::String, ""),
            TerraformVariable::new("name", VariableType::String, ""),
        ]);

    let err = registry.register_module(spec).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Core(CoreError::DuplicateVariable(name)) if name == "name"
    ));
}

// Rendering

#[tokio::test]
async fn test_generate_tf_substitutes_and_uses_defaults() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("gen_test")).await.unwrap();

    let rendered = registry
        .generate_tf("gen_test", &values(&[("name", "my-server"), ("ami_id", "ami-123")]))
        .await
        .unwrap();

    assert!(rendered.contains("my-server"));
    assert!(rendered.contains("ami-123"));
    assert!(rendered.contains("t3.micro"));
    assert!(!rendered.contains("${var."));
}

#[tokio::test]
async fn test_generate_tf_missing_required_lists_all() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("req_test")).await.unwrap();

    let err = registry
        .generate_tf("req_test", &HashMap::new())
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("name"));
    assert!(message.contains("ami_id"));
}

#[tokio::test]
async fn test_generate_tf_unknown_module_not_found() {
    let (registry, _dir) = temp_registry().await;
    let err = registry
        .generate_tf("ghost", &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn test_generate_tf_increments_download_count() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("dl_test")).await.unwrap();

    let supplied = values(&[("name", "x"), ("ami_id", "ami-999")]);
    for _ in 0..3 {
        registry.generate_tf("dl_test", &supplied).await.unwrap();
    }

    let module = registry.get_module("dl_test").await.unwrap();
    assert_eq!(module.download_count, 3);
}

#[tokio::test]
async fn test_failed_render_does_not_increment() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("noinc")).await.unwrap();

    let _ = registry.generate_tf("noinc", &HashMap::new()).await;
    let module = registry.get_module("noinc").await.unwrap();
    assert_eq!(module.download_count, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renders_lose_no_updates() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("concurrent")).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let registry = registry.clone();
        tasks.spawn(async move {
            let supplied = values(&[("name", "x"), ("ami_id", "ami-1")]);
            registry.generate_tf("concurrent", &supplied).await.unwrap();
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    let module = registry.get_module("concurrent").await.unwrap();
    assert_eq!(module.download_count, 8);
}

// Validation passthrough

#[tokio::test]
async fn test_validate_hcl_standalone() {
    let (registry, _dir) = temp_registry().await;
    assert!(registry.validate_hcl(SIMPLE_HCL).valid);
    assert!(!registry.validate_hcl("").valid);
}

// Plan export

#[tokio::test]
async fn test_export_plan_single_resource() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("plan_test")).await.unwrap();

    let plan = registry
        .export_plan("plan_test", &values(&[("name", "web"), ("ami_id", "ami-1")]))
        .await
        .unwrap();

    assert!(plan.contains("# Terraform Plan Export"));
    assert!(plan.contains("plan_test"));
    assert!(plan.contains("1 to add, 0 to change, 0 to destroy."));
    assert!(plan.contains("# Rendered HCL"));
    assert!(plan.contains("ami-1"));
}

#[tokio::test]
async fn test_export_plan_no_resource_blocks() {
    let (registry, _dir) = temp_registry().await;
    let spec = NewModule::new(
        "fragment",
        Provider::Null,
        "locals",
        "locals {\n  greeting = \"${var.name}\"\n}",
    )
    .with_variables(vec![TerraformVariable::new(
        "name",
        VariableType::String,
        "",
    )]);
    registry.register_module(spec).await.unwrap();

    let plan = registry
        .export_plan("fragment", &values(&[("name", "hi")]))
        .await
        .unwrap();
    assert!(plan.contains("no resource blocks detected"));
    assert!(plan.contains("hi"));
}

#[tokio::test]
async fn test_export_plan_counts_download() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("plan_dl")).await.unwrap();

    registry
        .export_plan("plan_dl", &values(&[("name", "w"), ("ami_id", "a")]))
        .await
        .unwrap();
    let module = registry.get_module("plan_dl").await.unwrap();
    assert_eq!(module.download_count, 1);
}

// Listing, search, stats

#[tokio::test]
async fn test_list_orders_by_downloads_then_name() {
    let (registry, _dir) = temp_registry().await;
    for name in ["zeta", "alpha", "beta"] {
        registry.register_module(sample_spec(name)).await.unwrap();
    }
    let supplied = values(&[("name", "x"), ("ami_id", "a")]);
    registry.generate_tf("beta", &supplied).await.unwrap();
    registry.generate_tf("beta", &supplied).await.unwrap();
    registry.generate_tf("zeta", &supplied).await.unwrap();

    let names: Vec<String> = registry
        .list_modules(None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["beta", "zeta", "alpha"]);
}

#[tokio::test]
async fn test_list_filters() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("ec2")).await.unwrap();
    registry
        .register_module(
            NewModule::new(
                "noop",
                Provider::Null,
                "null_resource",
                "resource \"null_resource\" \"x\" {}",
            ),
        )
        .await
        .unwrap();

    let aws_only = registry.list_modules(Some(Provider::Aws), None).await.unwrap();
    assert!(aws_only.iter().all(|m| m.provider == Provider::Aws));
    assert_eq!(aws_only.len(), 1);

    let by_type = registry
        .list_modules(None, Some("null_resource"))
        .await
        .unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].name, "noop");
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_covers_tags() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("searchable")).await.unwrap();

    let by_tag = registry.search("COMPUTE").await.unwrap();
    assert_eq!(by_tag.len(), 1);

    let by_description = registry.search("test ec2").await.unwrap();
    assert_eq!(by_description.len(), 1);

    assert!(registry.search("zzznomatchzzz").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_shape() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("s1")).await.unwrap();
    registry
        .register_module(
            NewModule::new(
                "s2",
                Provider::Null,
                "null_resource",
                "resource \"null_resource\" \"x\" {}",
            ),
        )
        .await
        .unwrap();

    let stats = registry.stats().await.unwrap();
    assert_eq!(stats.total_modules, 2);
    assert!(stats
        .by_provider
        .iter()
        .any(|p| p.provider == "aws" && p.count == 1));
    assert!(stats.most_downloaded.len() <= 5);
}

// Docs

#[tokio::test]
async fn test_generate_docs_sections() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("doc_test")).await.unwrap();

    let docs = registry.generate_docs("doc_test").await.unwrap();
    assert!(docs.contains("# doc_test"));
    assert!(docs.contains("## Variables"));
    assert!(docs.contains("ami_id"));
    assert!(docs.contains("## Outputs"));
    assert!(docs.contains("```hcl"));
}

// Delete

#[tokio::test]
async fn test_delete_existing_then_get_fails() {
    let (registry, _dir) = temp_registry().await;
    let module = registry.register_module(sample_spec("to_delete")).await.unwrap();

    assert!(registry.delete_module(&module.id.to_string()).await.unwrap());
    let err = registry.get_module("to_delete").await.unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_unknown_returns_false() {
    let (registry, _dir) = temp_registry().await;
    assert!(!registry.delete_module("nonexistent").await.unwrap());
}

// Version bump

#[tokio::test]
async fn test_bump_version_persists() {
    let (registry, _dir) = temp_registry().await;
    registry.register_module(sample_spec("bump_me")).await.unwrap();

    let new_version = registry
        .bump_version("bump_me", VersionPart::Minor)
        .await
        .unwrap();
    assert_eq!(new_version, "1.1.0");

    let module = registry.get_module("bump_me").await.unwrap();
    assert_eq!(module.version, "1.1.0");
}

// Seeding

#[tokio::test]
async fn test_seed_builtin_modules_idempotent() {
    let (registry, _dir) = temp_registry().await;

    let first = seed_builtin_modules(&registry).await.unwrap();
    assert_eq!(first, 8);

    let second = seed_builtin_modules(&registry).await.unwrap();
    assert_eq!(second, 0);

    let listed = registry.list_modules(None, None).await.unwrap();
    assert_eq!(listed.len(), 8);

    let stats = registry.stats().await.unwrap();
    assert!(stats
        .by_provider
        .iter()
        .any(|p| p.provider == "aws" && p.count == 4));
}

#[tokio::test]
async fn test_seeded_module_renders() {
    let (registry, _dir) = temp_registry().await;
    seed_builtin_modules(&registry).await.unwrap();

    let rendered = registry
        .generate_tf("aws_s3_bucket", &values(&[("bucket_name", "my-bucket")]))
        .await
        .unwrap();
    assert!(rendered.contains("my-bucket"));
    assert!(rendered.contains("Enabled"));
}

// End to end

#[tokio::test]
async fn test_register_then_render_demo() {
    let (registry, _dir) = temp_registry().await;
    let spec = NewModule::new(
        "demo",
        Provider::Aws,
        "aws_instance",
        "resource \"aws_instance\" \"${var.name}\" { ami = \"${var.ami}\" }",
    )
    .with_variables(vec![
        TerraformVariable::new("name", VariableType::String, ""),
        TerraformVariable::new("ami", VariableType::String, ""),
    ]);
    registry.register_module(spec).await.unwrap();

    let rendered = registry
        .generate_tf("demo", &values(&[("name", "box"), ("ami", "ami-1")]))
        .await
        .unwrap();
    assert!(rendered.contains("box"));
    assert!(rendered.contains("ami-1"));
    assert!(!rendered.contains("${var.name}"));
    assert!(!rendered.contains("${var.ami}"));
}
