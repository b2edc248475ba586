//! The small set of instance/schema kinds the dispatcher switches on.
use std::fmt;

/// A JSON value kind, used for dispatch-table lookups and "wrong type" error
/// messages instead of matching on `serde_json::Value` variants directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl PrimitiveType {
    /// The kind of a JSON instance value.
    pub fn of_instance(value: &serde_json::Value) -> PrimitiveType {
        match value {
            serde_json::Value::Array(_) => PrimitiveType::Array,
            serde_json::Value::Bool(_) => PrimitiveType::Boolean,
            serde_json::Value::Null => PrimitiveType::Null,
            serde_json::Value::Number(num) => {
                if is_integer(num) {
                    PrimitiveType::Integer
                } else {
                    PrimitiveType::Number
                }
            }
            serde_json::Value::Object(_) => PrimitiveType::Object,
            serde_json::Value::String(_) => PrimitiveType::String,
        }
    }
}

fn is_integer(num: &serde_json::Number) -> bool {
    num.is_i64() || num.is_u64() || num.as_f64().map_or(false, |f| f.fract() == 0.0)
}
