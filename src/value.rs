//! The decoded JSON value model shared by the formatter and the tree view.

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::parser::{Json, Spanned};

/// A decoded JSON document: one of the six JSON kinds. Object members keep
/// their insertion order. The tree renderer never mutates this.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    pub fn kind_desc(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Num(_) => "number",
            JsonValue::Str(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Arrays and objects can expand and collapse in the tree view; scalars
    /// cannot.
    pub fn is_composite(&self) -> bool {
        matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
    }
}

impl From<&Spanned<Json>> for JsonValue {
    fn from(node: &Spanned<Json>) -> Self {
        match &node.val {
            // Parse errors bail before lowering; recovery placeholders are
            // unreachable here in practice.
            Json::Invalid => JsonValue::Null,
            Json::Null => JsonValue::Null,
            Json::Bool(b) => JsonValue::Bool(*b),
            Json::Num(n) => JsonValue::Num(*n),
            Json::Str(s) => JsonValue::Str(s.clone()),
            Json::Array(elems) => JsonValue::Array(elems.iter().map(JsonValue::from).collect()),
            Json::Object(members) => {
                let mut map = IndexMap::new();
                for (name, val) in members {
                    // Later duplicates win, keeping the first occurrence's
                    // position, like JSON.parse.
                    map.insert(name.val.clone(), JsonValue::from(val));
                }
                JsonValue::Object(map)
            }
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => JsonValue::Num(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => JsonValue::Str(s),
            serde_json::Value::Array(elems) => {
                JsonValue::Array(elems.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(members) => JsonValue::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Num(n) => serializer.serialize_f64(*n),
            JsonValue::Str(s) => serializer.serialize_str(s),
            JsonValue::Array(elems) => elems.serialize(serializer),
            JsonValue::Object(members) => members.serialize(serializer),
        }
    }
}
