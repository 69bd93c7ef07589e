//! Data model for extracted parameter documentation, independent of output format.

use serde::Serialize;
use serde_yaml::Value;

/// Placeholder written in place of a YAML `null` leaf. Rendered tables show
/// the Go template spelling rather than YAML's.
pub const NIL_PLACEHOLDER: &str = "nil";

/// A single documented (or documentable) configuration parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Dotted/bracketed path, e.g. `service.port` or `args[0]`
    pub name: String,
    /// Resolved value; `None` for entries that only carry metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    pub description: String,
    /// Inner text of the `[...]` qualifier on the tag line
    pub modifier: String,
    pub section: String,
    pub skip: bool,
    /// Documentation-only entry with no backing value
    pub extra: bool,
    pub validate: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_type: None,
            description: String::new(),
            modifier: String::new(),
            section: String::new(),
            skip: false,
            extra: false,
            validate: true,
        }
    }

    /// Everything before the first `.`, or `None` for single-segment names.
    pub fn top_level_name(&self) -> Option<&str> {
        crate::parser::path::top_level_name(&self.name)
    }
}

/// Coarse classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueType {
    /// Classify a YAML node. Nulls and mappings both land on `Object`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Sequence(_) => ValueType::Array,
            Value::Tagged(tagged) => ValueType::of(&tagged.value),
            Value::Null | Value::Mapping(_) => ValueType::Object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_parameter_validates_by_default() {
        let param = Parameter::new("image.tag");
        assert!(param.validate);
        assert!(!param.skip);
        assert!(!param.extra);
        assert_eq!(param.value, None);
    }

    #[test]
    fn classify_values() {
        assert_eq!(ValueType::of(&Value::from("x")), ValueType::String);
        assert_eq!(ValueType::of(&Value::from(3)), ValueType::Number);
        assert_eq!(ValueType::of(&Value::from(true)), ValueType::Boolean);
        assert_eq!(ValueType::of(&Value::Sequence(vec![])), ValueType::Array);
        assert_eq!(ValueType::of(&Value::Null), ValueType::Object);
    }

    #[test]
    fn serializes_type_field() {
        let mut param = Parameter::new("replicaCount");
        param.value = Some(Value::from(3));
        param.value_type = Some(ValueType::Number);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["value"], 3);
    }
}
