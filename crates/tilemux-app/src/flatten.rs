//! The configuration-file parser: YAML documents flattened into the
//! dotted-path mapping the core loader consumes.
//!
//! Mappings recurse into `___`-separated path segments, sequences
//! enumerate 1-based, and scalar leaves are stringified. Every parse
//! gets a fresh random prefix so repeated loads of the same document
//! never collide in the flat namespace.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use uuid::Uuid;

use tilemux_core::error::{CoreError, Result};
use tilemux_core::loader::{FlatDoc, PATH_SEPARATOR};

/// Parse and flatten one YAML configuration file.
pub fn flatten_file(path: &Path) -> Result<FlatDoc> {
    let source = path.display().to_string();
    let text = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&text)
        .map_err(|e| CoreError::Config(format!("{source}: {e}")))?;

    let prefix = format!("{}{PATH_SEPARATOR}", Uuid::new_v4().simple());
    let mut pairs = Vec::new();
    flatten_value(&prefix, &value, &mut pairs, &source)?;
    Ok(FlatDoc::new(prefix, source, pairs))
}

/// Flatten a parsed YAML value under the given key prefix.
fn flatten_value(
    key: &str,
    value: &Value,
    pairs: &mut Vec<(String, String)>,
    source: &str,
) -> Result<()> {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Value::String(segment) = k else {
                    return Err(CoreError::Config(format!(
                        "{source}: mapping keys must be strings"
                    )));
                };
                let child_key = if key.ends_with(PATH_SEPARATOR) {
                    format!("{key}{segment}")
                } else {
                    format!("{key}{PATH_SEPARATOR}{segment}")
                };
                flatten_value(&child_key, v, pairs, source)?;
            }
        }
        Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let child_key = format!("{key}{PATH_SEPARATOR}{}", i + 1);
                flatten_value(&child_key, v, pairs, source)?;
            }
        }
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Number(n) => pairs.push((key.to_string(), n.to_string())),
        Value::Bool(b) => pairs.push((key.to_string(), b.to_string())),
        Value::Null => {}
        Value::Tagged(_) => {
            return Err(CoreError::Config(format!(
                "{source}: unsupported tagged value at '{key}'"
            )));
        }
    }
    Ok(())
}
