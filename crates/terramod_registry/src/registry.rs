//! SQLite-backed module registry.
//!
//! Each public operation is a short-lived, independently transactional unit
//! of work against the pool; there are no in-process locks. The one
//! cross-call guarantee, the download counter, is a single atomic UPDATE at
//! the storage layer.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use terramod_core::{
    docs, render, CoreError, HclValidator, PlanFormatter, Provider, TerraformExample,
    TerraformModule, TerraformOutput, TerraformVariable, ValidationResult, VarValue, VersionPart,
};

use crate::error::{RegistryError, RegistryResult};
use crate::schema;

/// A module registration request. Required fields go through [`NewModule::new`];
/// the rest default to empty and are filled via the builder methods.
#[derive(Debug, Clone)]
pub struct NewModule {
    pub name: String,
    pub provider: Provider,
    pub resource_type: String,
    pub hcl_template: String,
    pub variables: Vec<TerraformVariable>,
    pub outputs: Vec<TerraformOutput>,
    pub description: String,
    pub examples: Vec<TerraformExample>,
    pub tags: Vec<String>,
    pub version: String,
}

impl NewModule {
    pub fn new(
        name: impl Into<String>,
        provider: Provider,
        resource_type: impl Into<String>,
        hcl_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            resource_type: resource_type.into(),
            hcl_template: hcl_template.into(),
            variables: Vec::new(),
            outputs: Vec::new(),
            description: String::new(),
            examples: Vec::new(),
            tags: Vec::new(),
            version: "1.0.0".to_string(),
        }
    }

    pub fn with_variables(mut self, variables: Vec<TerraformVariable>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<TerraformOutput>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_examples(mut self, examples: Vec<TerraformExample>) -> Self {
        self.examples = examples;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// Per-provider module count.
#[derive(Debug, Clone)]
pub struct ProviderCount {
    pub provider: String,
    pub count: i64,
}

/// A top-downloads entry.
#[derive(Debug, Clone)]
pub struct ModuleDownloads {
    pub name: String,
    pub provider: String,
    pub downloads: i64,
}

/// Registry-wide statistics.
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_modules: i64,
    pub by_provider: Vec<ProviderCount>,
    pub most_downloaded: Vec<ModuleDownloads>,
}

/// The module catalog: registration, rendering, validation, and lookup over
/// a SQLite store. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct TerraformRegistry {
    pool: SqlitePool,
    validator: HclValidator,
    plan: PlanFormatter,
}

impl TerraformRegistry {
    /// Open (or create) a registry database at the given path.
    pub async fn open(db_path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = db_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Opened module registry at {:?}", path);
        Self::with_pool(pool).await
    }

    /// Build a registry over an existing pool, initializing the schema.
    pub async fn with_pool(pool: SqlitePool) -> RegistryResult<Self> {
        schema::init_schema(&pool).await?;
        Ok(Self {
            pool,
            validator: HclValidator::new(),
            plan: PlanFormatter::new(),
        })
    }

    /// An in-memory registry, useful for tests and scratch work.
    pub async fn in_memory() -> RegistryResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    /// Register a new module.
    ///
    /// The template must pass structural validation and variable names must
    /// be unique within the module. Name uniqueness across the registry is
    /// enforced by the storage-level unique index; a violation surfaces as
    /// [`RegistryError::DuplicateName`] and nothing is persisted.
    pub async fn register_module(&self, spec: NewModule) -> RegistryResult<TerraformModule> {
        let mut seen = HashSet::new();
        for variable in &spec.variables {
            if !seen.insert(variable.name.as_str()) {
                return Err(CoreError::DuplicateVariable(variable.name.clone()).into());
            }
        }

        let report = self.validator.validate(&spec.hcl_template);
        if !report.valid {
            return Err(CoreError::InvalidTemplate {
                errors: report.errors,
            }
            .into());
        }

        let module = TerraformModule {
            id: Uuid::new_v4(),
            name: spec.name,
            provider: spec.provider,
            resource_type: spec.resource_type,
            version: spec.version,
            description: spec.description,
            hcl_template: spec.hcl_template,
            variables: spec.variables,
            outputs: spec.outputs,
            examples: spec.examples,
            tags: spec.tags,
            created_at: Utc::now(),
            download_count: 0,
        };

        self.insert(&module).await?;
        info!(module = %module.name, id = %module.id, "Registered module");
        Ok(module)
    }

    /// Render a module's template with the supplied values.
    ///
    /// On success the module's download counter is incremented by one with a
    /// single atomic UPDATE, so concurrent renders never lose updates.
    pub async fn generate_tf(
        &self,
        module_ref: &str,
        values: &HashMap<String, VarValue>,
    ) -> RegistryResult<String> {
        let module = self.get_module(module_ref).await?;
        let rendered = render::render_module(&module, values)?;
        self.record_download(&module.id).await?;
        Ok(rendered)
    }

    /// Validate HCL template text without touching the catalog.
    pub fn validate_hcl(&self, hcl: &str) -> ValidationResult {
        self.validator.validate(hcl)
    }

    /// Render a module and format the result as a plan-style preview.
    /// Shares `generate_tf`'s failure modes and download-count side effect.
    pub async fn export_plan(
        &self,
        module_ref: &str,
        values: &HashMap<String, VarValue>,
    ) -> RegistryResult<String> {
        let module = self.get_module(module_ref).await?;
        let rendered = render::render_module(&module, values)?;
        self.record_download(&module.id).await?;
        Ok(self.plan.format(&module, &rendered, Utc::now()))
    }

    /// List modules, optionally filtered, ordered by download count
    /// descending then name ascending.
    pub async fn list_modules(
        &self,
        provider_filter: Option<Provider>,
        resource_type_filter: Option<&str>,
    ) -> RegistryResult<Vec<TerraformModule>> {
        let mut sql = String::from("SELECT * FROM modules WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();
        if let Some(provider) = provider_filter {
            sql.push_str(" AND provider = ?");
            binds.push(provider.as_str().to_string());
        }
        if let Some(resource_type) = resource_type_filter {
            sql.push_str(" AND resource_type = ?");
            binds.push(resource_type.to_string());
        }
        sql.push_str(" ORDER BY download_count DESC, name ASC");

        let mut query = sqlx::query(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_module).collect()
    }

    /// Resolve a module by id or unique name.
    pub async fn get_module(&self, module_ref: &str) -> RegistryResult<TerraformModule> {
        let row = sqlx::query("SELECT * FROM modules WHERE id = ? OR name = ?")
            .bind(module_ref)
            .bind(module_ref)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => row_to_module(&row),
            None => Err(RegistryError::NotFound(module_ref.to_string())),
        }
    }

    /// Case-insensitive substring search over name, description, provider,
    /// resource type, and tags.
    pub async fn search(&self, query: &str) -> RegistryResult<Vec<TerraformModule>> {
        let pattern = format!("%{}%", query.to_lowercase());
        let rows = sqlx::query(
            r#"
            SELECT * FROM modules
            WHERE lower(name) LIKE ?
               OR lower(description) LIKE ?
               OR lower(provider) LIKE ?
               OR lower(resource_type) LIKE ?
               OR lower(tags) LIKE ?
            ORDER BY download_count DESC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_module).collect()
    }

    /// Delete a module by id or name. Returns false when nothing matched;
    /// an unknown reference is not an error here.
    pub async fn delete_module(&self, module_ref: &str) -> RegistryResult<bool> {
        let result = sqlx::query("DELETE FROM modules WHERE id = ? OR name = ?")
            .bind(module_ref)
            .bind(module_ref)
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(module = module_ref, "Deleted module");
        }
        Ok(deleted)
    }

    /// Registry-wide statistics: total count, per-provider counts, and the
    /// top five modules by downloads.
    pub async fn stats(&self) -> RegistryResult<RegistryStats> {
        let total_modules: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(&self.pool)
            .await?;

        let by_provider = sqlx::query(
            "SELECT provider, COUNT(*) AS cnt FROM modules GROUP BY provider ORDER BY cnt DESC",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| {
            Ok(ProviderCount {
                provider: row.try_get("provider")?,
                count: row.try_get("cnt")?,
            })
        })
        .collect::<RegistryResult<Vec<_>>>()?;

        let most_downloaded = sqlx::query(
            "SELECT name, provider, download_count FROM modules ORDER BY download_count DESC LIMIT 5",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| {
            Ok(ModuleDownloads {
                name: row.try_get("name")?,
                provider: row.try_get("provider")?,
                downloads: row.try_get("download_count")?,
            })
        })
        .collect::<RegistryResult<Vec<_>>>()?;

        Ok(RegistryStats {
            total_modules,
            by_provider,
            most_downloaded,
        })
    }

    /// Generate markdown documentation for a module.
    pub async fn generate_docs(&self, module_ref: &str) -> RegistryResult<String> {
        let module = self.get_module(module_ref).await?;
        Ok(docs::generate_docs(&module))
    }

    /// Bump one component of a module's version and persist the result.
    /// Returns the new version string.
    pub async fn bump_version(
        &self,
        module_ref: &str,
        part: VersionPart,
    ) -> RegistryResult<String> {
        let mut module = self.get_module(module_ref).await?;
        let new_version = module.bump_version(part)?;
        sqlx::query("UPDATE modules SET version = ? WHERE id = ?")
            .bind(&new_version)
            .bind(module.id.to_string())
            .execute(&self.pool)
            .await?;
        info!(module = %module.name, version = %new_version, "Bumped module version");
        Ok(new_version)
    }

    /// Atomic storage-side increment; never read-modify-write in
    /// application code.
    async fn record_download(&self, id: &Uuid) -> RegistryResult<()> {
        sqlx::query("UPDATE modules SET download_count = download_count + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        debug!(module_id = %id, "Recorded download");
        Ok(())
    }

    async fn insert(&self, module: &TerraformModule) -> RegistryResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO modules
                (id, name, provider, resource_type, version, description,
                 hcl_template, variables, outputs, examples, tags, created_at, download_count)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(module.id.to_string())
        .bind(&module.name)
        .bind(module.provider.as_str())
        .bind(&module.resource_type)
        .bind(&module.version)
        .bind(&module.description)
        .bind(&module.hcl_template)
        .bind(serde_json::to_string(&module.variables)?)
        .bind(serde_json::to_string(&module.outputs)?)
        .bind(serde_json::to_string(&module.examples)?)
        .bind(serde_json::to_string(&module.tags)?)
        .bind(module.created_at.to_rfc3339())
        .bind(module.download_count)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(RegistryError::DuplicateName(module.name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn row_to_module(row: &SqliteRow) -> RegistryResult<TerraformModule> {
    let id: String = row.try_get("id")?;
    let provider: String = row.try_get("provider")?;
    let created_at: String = row.try_get("created_at")?;
    let variables: String = row.try_get("variables")?;
    let outputs: String = row.try_get("outputs")?;
    let examples: String = row.try_get("examples")?;
    let tags: String = row.try_get("tags")?;

    Ok(TerraformModule {
        id: Uuid::parse_str(&id)
            .map_err(|e| RegistryError::InvalidRecord(format!("id '{}': {}", id, e)))?,
        name: row.try_get("name")?,
        provider: Provider::parse(&provider)
            .map_err(|_| RegistryError::InvalidRecord(format!("provider '{}'", provider)))?,
        resource_type: row.try_get("resource_type")?,
        version: row.try_get("version")?,
        description: row.try_get("description")?,
        hcl_template: row.try_get("hcl_template")?,
        variables: serde_json::from_str(&variables)?,
        outputs: serde_json::from_str(&outputs)?,
        examples: serde_json::from_str(&examples)?,
        tags: serde_json::from_str(&tags)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| {
                RegistryError::InvalidRecord(format!("created_at '{}': {}", created_at, e))
            })?
            .with_timezone(&Utc),
        download_count: row.try_get("download_count")?,
    })
}
