//! Module, variable, and output definitions.
//!
//! These types form the persisted shape of a registry entry: a block of HCL
//! template text plus the typed variable and output schema that documents and
//! drives its rendering.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// Supported infrastructure providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Gcp,
    Azure,
    Kubernetes,
    Helm,
    Null,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
            Provider::Azure => "azure",
            Provider::Kubernetes => "kubernetes",
            Provider::Helm => "helm",
            Provider::Null => "null",
        }
    }

    /// Parse a provider name, rejecting anything outside the fixed set.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(Provider::Aws),
            "gcp" => Ok(Provider::Gcp),
            "azure" => Ok(Provider::Azure),
            "kubernetes" => Ok(Provider::Kubernetes),
            "helm" => Ok(Provider::Helm),
            "null" => Ok(Provider::Null),
            other => Err(CoreError::InvalidProvider(other.to_string())),
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Provider::Aws,
            Provider::Gcp,
            Provider::Azure,
            Provider::Kubernetes,
            Provider::Helm,
            Provider::Null,
        ]
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::parse(s)
    }
}

/// HCL variable type declarations, including the parameterized spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "map")]
    Map,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "list(string)")]
    ListString,
    #[serde(rename = "list(number)")]
    ListNumber,
    #[serde(rename = "map(string)")]
    MapString,
    #[serde(rename = "map(any)")]
    MapAny,
    #[serde(rename = "any")]
    Any,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Number => "number",
            VariableType::Bool => "bool",
            VariableType::List => "list",
            VariableType::Map => "map",
            VariableType::Object => "object",
            VariableType::ListString => "list(string)",
            VariableType::ListNumber => "list(number)",
            VariableType::MapString => "map(string)",
            VariableType::MapAny => "map(any)",
            VariableType::Any => "any",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(VariableType::String),
            "number" => Some(VariableType::Number),
            "bool" => Some(VariableType::Bool),
            "list" => Some(VariableType::List),
            "map" => Some(VariableType::Map),
            "object" => Some(VariableType::Object),
            "list(string)" => Some(VariableType::ListString),
            "list(number)" => Some(VariableType::ListNumber),
            "map(string)" => Some(VariableType::MapString),
            "map(any)" => Some(VariableType::MapAny),
            "any" => Some(VariableType::Any),
            _ => None,
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A variable value: default or caller-supplied.
///
/// Defaults are stored as JSON alongside the variable schema, so the variants
/// mirror the JSON data model. `Display` gives the textual form used during
/// placeholder substitution: strings render raw (the template author controls
/// quoting), booleans lowercase, numbers without a trailing `.0`, and
/// lists/maps as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<VarValue>),
    Map(BTreeMap<String, VarValue>),
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarValue::String(s) => f.write_str(s),
            VarValue::Bool(b) => write!(f, "{}", b),
            VarValue::Number(n) => write!(f, "{}", n),
            other => f.write_str(&serde_json::to_string(other).map_err(|_| fmt::Error)?),
        }
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        VarValue::String(s.to_string())
    }
}

impl From<String> for VarValue {
    fn from(s: String) -> Self {
        VarValue::String(s)
    }
}

impl From<i64> for VarValue {
    fn from(n: i64) -> Self {
        VarValue::Number(serde_json::Number::from(n))
    }
}

impl From<bool> for VarValue {
    fn from(b: bool) -> Self {
        VarValue::Bool(b)
    }
}

fn default_true() -> bool {
    true
}

/// A typed input variable declared by a module template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default)]
    pub description: String,
    /// A present default makes the variable effectively optional unless the
    /// caller forces `required`.
    #[serde(default)]
    pub default: Option<VarValue>,
    #[serde(default = "default_true")]
    pub required: bool,
    /// Affects only documentation rendering, never substitution.
    #[serde(default)]
    pub sensitive: bool,
}

impl TerraformVariable {
    pub fn new(
        name: impl Into<String>,
        var_type: VariableType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            var_type,
            description: description.into(),
            default: None,
            required: true,
            sensitive: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<VarValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Render the variable as an HCL `variable` block.
    pub fn to_hcl(&self) -> String {
        let mut lines = vec![format!("variable \"{}\" {{", self.name)];
        lines.push(format!("  type        = {}", self.var_type));
        if !self.description.is_empty() {
            lines.push(format!("  description = \"{}\"", self.description));
        }
        if let Some(default) = &self.default {
            let rendered = match default {
                VarValue::String(s) => format!("\"{}\"", s),
                other => other.to_string(),
            };
            lines.push(format!("  default     = {}", rendered));
        }
        if self.sensitive {
            lines.push("  sensitive   = true".to_string());
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// An output declared by a module template. The value expression is opaque
/// template-language text and is never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformOutput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value_expression: String,
    #[serde(default)]
    pub sensitive: bool,
}

impl TerraformOutput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value_expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_expression: value_expression.into(),
            sensitive: false,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Render the output as an HCL `output` block.
    pub fn to_hcl(&self) -> String {
        let mut lines = vec![format!("output \"{}\" {{", self.name)];
        if !self.description.is_empty() {
            lines.push(format!("  description = \"{}\"", self.description));
        }
        lines.push(format!("  value       = {}", self.value_expression));
        if self.sensitive {
            lines.push("  sensitive   = true".to_string());
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// A documentary usage example attached to a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformExample {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hcl_code: String,
}

impl TerraformExample {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        hcl_code: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            hcl_code: hcl_code.into(),
        }
    }
}

/// Which component of a semantic version to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPart {
    Major,
    Minor,
    #[default]
    Patch,
}

impl VersionPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPart::Major => "major",
            VersionPart::Minor => "minor",
            VersionPart::Patch => "patch",
        }
    }
}

impl std::str::FromStr for VersionPart {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(VersionPart::Major),
            "minor" => Ok(VersionPart::Minor),
            "patch" => Ok(VersionPart::Patch),
            other => Err(CoreError::InvalidVersionPart(other.to_string())),
        }
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered module: template text plus its variable/output schema and
/// registry metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformModule {
    pub id: Uuid,
    pub name: String,
    pub provider: Provider,
    pub resource_type: String,
    /// Semantic version triple, `major.minor.patch`.
    pub version: String,
    pub description: String,
    /// Raw template text containing `${var.<name>}` placeholders.
    pub hcl_template: String,
    pub variables: Vec<TerraformVariable>,
    pub outputs: Vec<TerraformOutput>,
    pub examples: Vec<TerraformExample>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub download_count: i64,
}

impl TerraformModule {
    /// Increment one component of the version and zero the less significant
    /// ones. Returns the new version string.
    pub fn bump_version(&mut self, part: VersionPart) -> CoreResult<String> {
        let parts: Vec<u64> = self
            .version
            .split('.')
            .map(|p| p.parse::<u64>())
            .collect::<Result<_, _>>()
            .map_err(|_| CoreError::InvalidVersion(self.version.clone()))?;
        let [mut major, mut minor, mut patch] = <[u64; 3]>::try_from(parts)
            .map_err(|_| CoreError::InvalidVersion(self.version.clone()))?;

        match part {
            VersionPart::Major => {
                major += 1;
                minor = 0;
                patch = 0;
            }
            VersionPart::Minor => {
                minor += 1;
                patch = 0;
            }
            VersionPart::Patch => patch += 1,
        }

        self.version = format!("{}.{}.{}", major, minor, patch);
        Ok(self.version.clone())
    }
}
