//! Value tree flattener: computed records from the parsed YAML document.
//!
//! Mapping keys are joined with `.`, sequence indices become `[i]`.
//! Sequences holding only strings are documented as a single parameter
//! named after the array itself; any other sequence is expanded index by
//! index so structured entries get one record per field.

use super::path;
use crate::model::{Parameter, ValueType, NIL_PLACEHOLDER};
use serde_yaml::Value;
use std::collections::HashSet;

/// A leaf reached by the walk, with the sequence directly containing it.
struct Leaf<'a> {
    path: String,
    value: &'a Value,
    enclosing: Option<&'a [Value]>,
}

/// Parse YAML text and flatten it.
pub fn parse(input: &str) -> serde_yaml::Result<Vec<Parameter>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let root: Value = serde_yaml::from_str(input)?;
    Ok(flatten(&root))
}

/// Flatten a parsed document into one record per leaf path.
pub fn flatten(root: &Value) -> Vec<Parameter> {
    let mut leaves = Vec::new();
    match root {
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => {
            collect(String::new(), root, None, &mut leaves)
        }
        // A bare scalar or empty document has no addressable paths
        _ => {}
    }

    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(leaves.len());

    for leaf in leaves {
        let (name, value) = match leaf.enclosing {
            Some(items) if is_plain(items) => (
                path::array_prefix(&leaf.path).to_string(),
                Value::Sequence(items.to_vec()),
            ),
            _ => (leaf.path, leaf.value.clone()),
        };

        // A root-level plain array collapses onto the empty path
        if name.is_empty() {
            continue;
        }
        // Every index of a plain array collapses onto the same name
        if !seen.insert(name.clone()) {
            continue;
        }

        let value_type = ValueType::of(&value);
        let mut param = Parameter::new(name);
        param.value = Some(match value {
            Value::Null => Value::String(NIL_PLACEHOLDER.to_string()),
            other => other,
        });
        param.value_type = Some(value_type);
        params.push(param);
    }

    params
}

fn collect<'a>(
    prefix: String,
    value: &'a Value,
    enclosing: Option<&'a [Value]>,
    out: &mut Vec<Leaf<'a>>,
) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                collect(path::child(&prefix, &key_text(key)), child, None, out);
            }
        }
        Value::Sequence(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                collect(path::index(&prefix, i), child, Some(items.as_slice()), out);
            }
        }
        Value::Tagged(tagged) => collect(prefix, &tagged.value, enclosing, out),
        _ => out.push(Leaf {
            path: prefix,
            value,
            enclosing,
        }),
    }
}

/// Only strings? Vacuously true for an empty sequence.
fn is_plain(items: &[Value]) -> bool {
    items.iter().all(|item| match item {
        Value::String(_) => true,
        Value::Tagged(tagged) => matches!(tagged.value, Value::String(_)),
        _ => false,
    })
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_text(&tagged.value),
        complex => serde_yaml::to_string(complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
