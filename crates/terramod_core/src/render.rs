//! Variable merging and placeholder substitution.
//!
//! Rendering resolves a module's variable set against caller-supplied values
//! and performs literal replacement of `${var.<name>}` placeholders in the
//! template text.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::module::{TerraformModule, TerraformVariable, VarValue};

/// Names of variables that are required, have no default, and were not
/// supplied, in declaration order.
pub fn missing_required(
    variables: &[TerraformVariable],
    supplied: &HashMap<String, VarValue>,
) -> Vec<String> {
    variables
        .iter()
        .filter(|v| v.required && v.default.is_none() && !supplied.contains_key(&v.name))
        .map(|v| v.name.clone())
        .collect()
}

/// Merge declared defaults with caller-supplied values.
///
/// Defaults go in first, then the caller's entries overwrite them. Supplied
/// values always win and are not checked against the declared variable type;
/// quoting is the template author's responsibility.
pub fn merge_values(
    variables: &[TerraformVariable],
    supplied: &HashMap<String, VarValue>,
) -> HashMap<String, VarValue> {
    let mut merged = HashMap::new();
    for var in variables {
        if let Some(default) = &var.default {
            merged.insert(var.name.clone(), default.clone());
        }
    }
    for (name, value) in supplied {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

/// Replace every `${var.<name>}` occurrence with the value's string form.
///
/// Placeholders for names absent from the value table pass through verbatim;
/// leaving them in place is intentional, not an error.
pub fn render_template(template: &str, values: &HashMap<String, VarValue>) -> String {
    let mut result = template.to_string();
    for (name, value) in values {
        let placeholder = format!("${{var.{}}}", name);
        result = result.replace(&placeholder, &value.to_string());
    }
    result
}

/// Render a module's template with the supplied values.
///
/// Fails with [`CoreError::MissingVariables`] listing every missing required
/// name. Does not touch storage; the download counter is the registry
/// layer's concern.
pub fn render_module(
    module: &TerraformModule,
    supplied: &HashMap<String, VarValue>,
) -> CoreResult<String> {
    let missing = missing_required(&module.variables, supplied);
    if !missing.is_empty() {
        return Err(CoreError::MissingVariables { names: missing });
    }

    let merged = merge_values(&module.variables, supplied);
    debug!(
        module = %module.name,
        values = merged.len(),
        "Rendering module template"
    );
    Ok(render_template(&module.hcl_template, &merged))
}
