use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::SchemaError;

/// 基础值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Int,
    Float,
    Bool,
    Null,
    Scalar,
    Array,
    List,
    Mixed,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Null => "null",
            Kind::Scalar => "scalar",
            Kind::Array => "array",
            Kind::List => "list",
            Kind::Mixed => "mixed",
        }
    }

    /// Whether `value` is acceptable for this kind as-is or after int→float widening.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Int => value.is_i64() || value.is_u64(),
            Kind::Float => value.is_number(),
            Kind::Bool => value.is_boolean(),
            Kind::Null => value.is_null(),
            Kind::Scalar => matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_)),
            Kind::Array => value.is_array() || value.is_object(),
            Kind::List => value.is_array(),
            Kind::Mixed => true,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Kind::Array | Kind::List)
    }

    /// 解析 `int|string` 形式的类型表达式
    pub fn parse_union(expression: &str) -> Result<Vec<Kind>, SchemaError> {
        let kinds = expression
            .split('|')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<Kind>().map_err(|_| SchemaError::UnknownType {
                    name: name.to_string(),
                    expression: expression.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if kinds.is_empty() {
            return Err(SchemaError::EmptyTypeExpression);
        }
        Ok(kinds)
    }
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(Kind::String),
            "int" | "integer" => Ok(Kind::Int),
            "float" | "double" => Ok(Kind::Float),
            "bool" | "boolean" => Ok(Kind::Bool),
            "null" => Ok(Kind::Null),
            "scalar" => Ok(Kind::Scalar),
            "array" => Ok(Kind::Array),
            "list" => Ok(Kind::List),
            "mixed" => Ok(Kind::Mixed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
