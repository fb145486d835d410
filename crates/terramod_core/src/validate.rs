//! Heuristic structural validation of HCL template text.
//!
//! This is pattern matching, not a grammar: balance counts, block-shape
//! checks, and interpolation sniffing. It accepts any syntactically
//! reasonable template and only rejects clearly malformed structure.

use std::fmt;

use regex::Regex;
use tracing::debug;

/// Namespaces a `${...}` interpolation may legitimately start with.
const KNOWN_NAMESPACES: [&str; 7] = [
    "var.",
    "local.",
    "module.",
    "data.",
    "each.",
    "path.",
    "terraform.",
];

/// Outcome of structural validation. Valid iff the error list is empty;
/// warnings are informational and never affect validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Valid: {}", self.valid)?;
        for e in &self.errors {
            writeln!(f, "  ERROR: {}", e)?;
        }
        for w in &self.warnings {
            writeln!(f, "  WARN:  {}", w)?;
        }
        Ok(())
    }
}

/// Structural HCL validator.
#[derive(Debug, Clone)]
pub struct HclValidator {
    block_pattern: Regex,
    interpolation_pattern: Regex,
}

impl Default for HclValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl HclValidator {
    pub fn new() -> Self {
        Self {
            // A declaration keyword followed by a quoted label.
            block_pattern: Regex::new(
                r#"\b(resource|data|module|locals|provider|terraform)\s+"[\w-]+""#,
            )
            .unwrap(),
            interpolation_pattern: Regex::new(r"\$\{([^}]+)\}").unwrap(),
        }
    }

    /// Run all checks over the template text. Every check appends
    /// independently, so one text can collect several errors and warnings.
    pub fn validate(&self, hcl: &str) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if hcl.matches('{').count() != hcl.matches('}').count() {
            errors.push("Unbalanced curly braces { }".to_string());
        }
        if hcl.matches('[').count() != hcl.matches(']').count() {
            errors.push("Unbalanced square brackets [ ]".to_string());
        }
        if hcl.matches('(').count() != hcl.matches(')').count() {
            errors.push("Unbalanced parentheses ( )".to_string());
        }

        if !self.block_pattern.is_match(hcl) {
            warnings.push(
                "No resource/data/module block found; is this intentional?".to_string(),
            );
        }

        // Resource lines need the keyword plus two quoted labels.
        for line in hcl.lines() {
            let trimmed = line.trim();
            if trimmed.split_whitespace().next() == Some("resource")
                && trimmed.split_whitespace().count() < 3
            {
                errors.push(format!("resource block missing labels: '{}'", trimmed));
            }
        }

        for caps in self.interpolation_pattern.captures_iter(hcl) {
            let expression = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            if !KNOWN_NAMESPACES.iter().any(|ns| expression.starts_with(ns)) {
                warnings.push(format!(
                    "Suspicious interpolation (not var/local/module/data): ${{{}}}",
                    expression
                ));
            }
        }

        if hcl.contains("$${") {
            warnings.push(
                "Found $${ sequence; use $${ only for a literal dollar sign escape".to_string(),
            );
        }

        if hcl.trim().is_empty() {
            errors.push("HCL template is empty".to_string());
        }

        debug!(
            errors = errors.len(),
            warnings = warnings.len(),
            "Validated HCL template"
        );

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
