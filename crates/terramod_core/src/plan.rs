//! Plan-style preview rendering of resource blocks.
//!
//! Extraction is a best-effort, non-nested first-match scan: a body that
//! contains nested braces is cut short at the first `}`. That limitation is
//! part of the contract; the output is a human-readable preview, not a
//! machine-parseable plan.

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::module::TerraformModule;

/// Formats rendered template text as a "what would change" preview.
#[derive(Debug, Clone)]
pub struct PlanFormatter {
    resource_pattern: Regex,
}

impl Default for PlanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanFormatter {
    pub fn new() -> Self {
        Self {
            resource_pattern: Regex::new(r#"(?s)resource\s+"(\w+)"\s+"([\w-]+)"\s*\{([^}]*)\}"#)
                .unwrap(),
        }
    }

    /// Build the plan preview for already-rendered template text.
    pub fn format(
        &self,
        module: &TerraformModule,
        rendered: &str,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut lines = vec![
            "# Terraform Plan Export".to_string(),
            format!("# Module   : {} v{}", module.name, module.version),
            format!("# Provider : {}", module.provider),
            format!(
                "# Generated: {}",
                generated_at.format("%Y-%m-%dT%H:%M:%SZ")
            ),
            "#".to_string(),
            "# This plan shows what Terraform would create or modify.".to_string(),
            "# Review carefully before applying.".to_string(),
            String::new(),
            format!("# Resource: {}", module.resource_type),
            String::new(),
        ];

        let matches: Vec<_> = self.resource_pattern.captures_iter(rendered).collect();
        debug!(module = %module.name, blocks = matches.len(), "Formatting plan preview");

        if matches.is_empty() {
            lines.push("# (no resource blocks detected in rendered template)".to_string());
            lines.push(String::new());
            lines.push(rendered.to_string());
        } else {
            lines.push("Changes to be applied:".to_string());
            lines.push(String::new());
            for caps in &matches {
                let rtype = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let rname = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
                let body = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

                lines.push(format!("  + resource \"{}\" \"{}\" {{", rtype, rname));
                for attr_line in body.trim().lines() {
                    lines.push(format!("      {}", attr_line.trim()));
                }
                lines.push("  }".to_string());
                lines.push(String::new());
            }
            lines.push(format!(
                "Plan: {} to add, 0 to change, 0 to destroy.",
                matches.len()
            ));
        }

        lines.push(String::new());
        lines.push("# Rendered HCL".to_string());
        lines.push(String::new());
        lines.push(rendered.to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Provider;
    use uuid::Uuid;

    fn sample_module() -> TerraformModule {
        TerraformModule {
            id: Uuid::new_v4(),
            name: "ec2".to_string(),
            provider: Provider::Aws,
            resource_type: "aws_instance".to_string(),
            version: "2.1.0".to_string(),
            description: String::new(),
            hcl_template: String::new(),
            variables: Vec::new(),
            outputs: Vec::new(),
            examples: Vec::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            download_count: 0,
        }
    }

    #[test]
    fn test_single_resource_block_summary() {
        let rendered = "resource \"aws_instance\" \"web\" {\n  ami = \"ami-1\"\n}";
        let plan = PlanFormatter::new().format(&sample_module(), rendered, Utc::now());

        assert!(plan.contains("# Terraform Plan Export"));
        assert!(plan.contains("# Module   : ec2 v2.1.0"));
        assert!(plan.contains("# Provider : aws"));
        assert!(plan.contains("+ resource \"aws_instance\" \"web\" {"));
        assert!(plan.contains("ami = \"ami-1\""));
        assert!(plan.contains("Plan: 1 to add, 0 to change, 0 to destroy."));
    }

    #[test]
    fn test_multiple_blocks_counted() {
        let rendered = concat!(
            "resource \"aws_s3_bucket\" \"a\" {\n  bucket = \"a\"\n}\n",
            "resource \"aws_s3_bucket\" \"b\" {\n  bucket = \"b\"\n}\n",
        );
        let plan = PlanFormatter::new().format(&sample_module(), rendered, Utc::now());
        assert!(plan.contains("Plan: 2 to add, 0 to change, 0 to destroy."));
    }

    #[test]
    fn test_no_blocks_emits_notice_and_raw_text() {
        let rendered = "locals {\n  a = 1\n}";
        let plan = PlanFormatter::new().format(&sample_module(), rendered, Utc::now());
        assert!(plan.contains("(no resource blocks detected in rendered template)"));
        assert!(plan.contains("a = 1"));
    }

    #[test]
    fn test_rendered_hcl_section_always_present() {
        let plan = PlanFormatter::new().format(&sample_module(), "x = 1", Utc::now());
        assert!(plan.contains("# Rendered HCL"));
        assert!(plan.contains("x = 1"));
    }

    #[test]
    fn test_body_lines_are_trimmed() {
        let rendered = "resource \"aws_instance\" \"web\" {\n      ami   =   \"ami-1\"\n}";
        let plan = PlanFormatter::new().format(&sample_module(), rendered, Utc::now());
        assert!(plan.contains("      ami   =   \"ami-1\""));
    }

    #[test]
    fn test_nested_braces_cut_short_by_design() {
        // The first `}` closes the scan; the tags sub-block truncates the body.
        let rendered = concat!(
            "resource \"aws_instance\" \"web\" {\n",
            "  tags = {\n",
            "    Name = \"web\"\n",
            "  }\n",
            "}",
        );
        let plan = PlanFormatter::new().format(&sample_module(), rendered, Utc::now());
        assert!(plan.contains("Plan: 1 to add, 0 to change, 0 to destroy."));
        assert!(plan.contains("tags = {"));
    }
}
