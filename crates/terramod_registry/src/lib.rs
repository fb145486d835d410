//! # terramod_registry
//!
//! SQLite-backed module catalog for terramod.
//!
//! The registry composes the pure rendering/validation pipeline from
//! `terramod_core` with a persistent store. Every operation is a short,
//! independently transactional unit of work; the store enforces name
//! uniqueness and performs the atomic download-count increment.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use terramod_core::{Provider, VarValue};
//! use terramod_registry::{NewModule, TerraformRegistry};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TerraformRegistry::open("modules.db").await?;
//!
//! registry
//!     .register_module(NewModule::new(
//!         "demo",
//!         Provider::Null,
//!         "null_resource",
//!         "resource \"null_resource\" \"${var.name}\" {}",
//!     ))
//!     .await?;
//!
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), VarValue::from("box"));
//! let rendered = registry.generate_tf("demo", &values).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod registry;
mod schema;
pub mod seed;

pub use error::{RegistryError, RegistryResult};
pub use registry::{
    ModuleDownloads, NewModule, ProviderCount, RegistryStats, TerraformRegistry,
};
pub use seed::{builtin_modules, seed_builtin_modules};
