// src/scenario.rs
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use serde_yaml_ng::{Mapping, Value};

use crate::models::Edit;

/// Parses a scenario: a YAML mapping of form field names to the values
/// typed into them, e.g.
///
/// ```yaml
/// headcount: 50
/// company-revenue: 2000000
/// indirect-spend: "10"
/// ```
///
/// Edits come back in file order.
///
/// # Errors
///
/// This function may return an error if:
/// * The text is not YAML or not a mapping
/// * A key is not a string
/// * A value is not a number, string, boolean or null
pub fn parse_scenario(content: &str) -> Result<Vec<Edit>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping: Mapping =
        serde_yaml_ng::from_str(content).map_err(|e| anyhow!("Failed to parse scenario: {e}"))?;

    mapping
        .into_iter()
        .map(|(key, value)| {
            let Value::String(field) = key else {
                bail!("Scenario field names must be strings, got {key:?}");
            };
            let value = match value {
                Value::Number(number) => number.to_string(),
                Value::String(text) => text,
                Value::Bool(flag) => flag.to_string(),
                Value::Null => String::new(),
                other => bail!("Unsupported value for `{field}`: {other:?}"),
            };
            Ok(Edit::new(field, value))
        })
        .collect()
}

/// Reads and parses a scenario file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_scenario(path: &Path) -> Result<Vec<Edit>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
    parse_scenario(&content).with_context(|| format!("Invalid scenario file: {}", path.display()))
}
