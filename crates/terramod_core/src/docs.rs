//! Markdown documentation generation for modules.

use crate::module::{TerraformModule, VarValue};

/// Render a module's full markdown documentation: metadata header, variable
/// and output tables, the raw template, examples, and tags.
pub fn generate_docs(module: &TerraformModule) -> String {
    let mut lines = vec![
        format!("# {}", module.name),
        String::new(),
        format!(
            "> **Provider:** `{}` | **Resource:** `{}` | **Version:** `{}`",
            module.provider, module.resource_type, module.version
        ),
        String::new(),
        module.description.clone(),
        String::new(),
        "## Variables".to_string(),
        String::new(),
        "| Name | Type | Required | Sensitive | Default | Description |".to_string(),
        "| ---- | ---- | :------: | :-------: | ------- | ----------- |".to_string(),
    ];

    for v in &module.variables {
        let default = match &v.default {
            Some(value) => format!("`{}`", display_default(value)),
            None => "-".to_string(),
        };
        lines.push(format!(
            "| `{}` | `{}` | {} | {} | {} | {} |",
            v.name,
            v.var_type,
            if v.required { "yes" } else { "no" },
            if v.sensitive { "🔒" } else { "-" },
            default,
            v.description
        ));
    }

    lines.push(String::new());
    lines.push("## Outputs".to_string());
    lines.push(String::new());
    lines.push("| Name | Sensitive | Description |".to_string());
    lines.push("| ---- | :-------: | ----------- |".to_string());
    for o in &module.outputs {
        lines.push(format!(
            "| `{}` | {} | {} |",
            o.name,
            if o.sensitive { "🔒" } else { "-" },
            o.description
        ));
    }

    lines.push(String::new());
    lines.push("## HCL Template".to_string());
    lines.push(String::new());
    lines.push("```hcl".to_string());
    lines.push(module.hcl_template.clone());
    lines.push("```".to_string());
    lines.push(String::new());

    if !module.examples.is_empty() {
        lines.push("## Examples".to_string());
        lines.push(String::new());
        for ex in &module.examples {
            lines.push(format!("### {}", ex.title));
            lines.push(String::new());
            lines.push(ex.description.clone());
            lines.push(String::new());
            lines.push("```hcl".to_string());
            lines.push(ex.hcl_code.clone());
            lines.push("```".to_string());
            lines.push(String::new());
        }
    }

    if !module.tags.is_empty() {
        lines.push("## Tags".to_string());
        lines.push(String::new());
        lines.push(
            module
                .tags
                .iter()
                .map(|t| format!("`{}`", t))
                .collect::<Vec<_>>()
                .join(", "),
        );
        lines.push(String::new());
    }

    lines.push("## Metadata".to_string());
    lines.push(String::new());
    lines.push(format!("- **ID:** `{}`", module.id));
    lines.push(format!("- **Created:** {}", module.created_at.to_rfc3339()));
    lines.push(format!("- **Downloads:** {}", module.download_count));

    lines.join("\n")
}

fn display_default(value: &VarValue) -> String {
    match value {
        // Keep empty-string defaults visible in the table.
        VarValue::String(s) if s.is_empty() => "\"\"".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{
        Provider, TerraformExample, TerraformOutput, TerraformVariable, VariableType,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_module() -> TerraformModule {
        TerraformModule {
            id: Uuid::new_v4(),
            name: "aws_ec2_instance".to_string(),
            provider: Provider::Aws,
            resource_type: "aws_instance".to_string(),
            version: "2.1.0".to_string(),
            description: "Provision an EC2 instance.".to_string(),
            hcl_template: "resource \"aws_instance\" \"${var.name}\" {}".to_string(),
            variables: vec![
                TerraformVariable::new("name", VariableType::String, "Instance name tag"),
                TerraformVariable::new("instance_type", VariableType::String, "EC2 instance type")
                    .with_default("t3.micro")
                    .optional(),
                TerraformVariable::new("password", VariableType::String, "Secret")
                    .sensitive(),
            ],
            outputs: vec![TerraformOutput::new(
                "instance_id",
                "EC2 instance ID",
                "aws_instance.${var.name}.id",
            )],
            examples: vec![TerraformExample::new(
                "Basic web server",
                "A minimal web server.",
                "module \"web\" {}",
            )],
            tags: vec!["aws".to_string(), "ec2".to_string()],
            created_at: Utc::now(),
            download_count: 7,
        }
    }

    #[test]
    fn test_docs_contain_sections() {
        let docs = generate_docs(&sample_module());
        assert!(docs.contains("# aws_ec2_instance"));
        assert!(docs.contains("## Variables"));
        assert!(docs.contains("## Outputs"));
        assert!(docs.contains("## Examples"));
        assert!(docs.contains("## Tags"));
        assert!(docs.contains("## Metadata"));
        assert!(docs.contains("```hcl"));
    }

    #[test]
    fn test_docs_variable_rows() {
        let docs = generate_docs(&sample_module());
        assert!(docs.contains("| `instance_type` | `string` | no | - | `t3.micro` |"));
        assert!(docs.contains("| `password` | `string` | yes | 🔒 | - |"));
    }

    #[test]
    fn test_docs_skip_examples_when_absent() {
        let mut module = sample_module();
        module.examples.clear();
        let docs = generate_docs(&module);
        assert!(!docs.contains("## Examples"));
    }

    #[test]
    fn test_docs_metadata() {
        let module = sample_module();
        let docs = generate_docs(&module);
        assert!(docs.contains(&format!("- **ID:** `{}`", module.id)));
        assert!(docs.contains("- **Downloads:** 7"));
    }
}
