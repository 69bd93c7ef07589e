//! Join declared metadata with computed values by parameter name.
//!
//! Declared records drive the output: their order is the documentation
//! order, and each one picks up the value and type of the computed record
//! sharing its name. Modifiers are applied last and may replace the value.

use crate::config::ModifiersConfig;
use crate::model::{Parameter, ValueType};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use tracing::warn;

/// Fill declared records with computed values, then apply modifiers.
///
/// Computed records without metadata are not part of the result; the
/// consistency check reports them.
pub fn merge(
    declared: Vec<Parameter>,
    computed: &[Parameter],
    modifiers: &ModifiersConfig,
) -> Vec<Parameter> {
    let by_name: HashMap<&str, &Parameter> =
        computed.iter().map(|p| (p.name.as_str(), p)).collect();

    declared
        .into_iter()
        .map(|mut param| {
            if !param.extra && !param.skip {
                if let Some(found) = by_name.get(param.name.as_str()) {
                    param.value = found.value.clone();
                    param.value_type = found.value_type;
                }
            }
            if !param.modifier.is_empty() {
                apply_modifier(&mut param, modifiers);
            }
            param
        })
        .collect()
}

/// Rewrite the documented value according to the `[modifier]` on its tag.
fn apply_modifier(param: &mut Parameter, modifiers: &ModifiersConfig) {
    let modifier = param.modifier.trim();

    if modifier == modifiers.array {
        param.value = Some(Value::Sequence(Vec::new()));
        param.value_type = Some(ValueType::Array);
    } else if modifier == modifiers.object {
        param.value = Some(Value::Mapping(Mapping::new()));
        param.value_type = Some(ValueType::Object);
    } else if modifier == modifiers.string {
        param.value = Some(Value::String(String::new()));
        param.value_type = Some(ValueType::String);
    } else if modifier == modifiers.nullable {
        // Documents that the value may be unset; the value itself stands
    } else if let Some(default) = modifier
        .strip_prefix(modifiers.default.as_str())
        .and_then(|rest| rest.trim_start().strip_prefix(':'))
    {
        param.value = Some(Value::String(default.trim().to_string()));
        param.value_type = Some(ValueType::String);
    } else {
        warn!(parameter = %param.name, modifier, "unknown modifier");
    }
}
