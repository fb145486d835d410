//! # terramod_core
//!
//! Module data model and the template rendering/validation pipeline for the
//! terramod registry.
//!
//! This crate is pure computation over in-memory text and values: it knows
//! nothing about storage or the CLI. The registry layer composes it with a
//! backing store.
//!
//! ## Features
//!
//! - Typed module/variable/output model with HCL rendering helpers
//! - Default/override variable merging and `${var.<name>}` substitution
//! - Heuristic structural validation of HCL template text
//! - Plan-style preview of resource blocks in rendered output
//! - Markdown documentation generation
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use terramod_core::{render_template, HclValidator, VarValue};
//!
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), VarValue::from("web"));
//!
//! let rendered = render_template("resource \"aws_instance\" \"${var.name}\" {}", &values);
//! assert!(rendered.contains("\"web\""));
//!
//! let report = HclValidator::new().validate(&rendered);
//! assert!(report.valid);
//! ```

pub mod docs;
pub mod error;
pub mod module;
pub mod plan;
pub mod render;
pub mod validate;

pub use docs::generate_docs;
pub use error::{CoreError, CoreResult};
pub use module::{
    Provider, TerraformExample, TerraformModule, TerraformOutput, TerraformVariable, VarValue,
    VariableType, VersionPart,
};
pub use plan::PlanFormatter;
pub use render::{merge_values, missing_required, render_module, render_template};
pub use validate::{HclValidator, ValidationResult};
