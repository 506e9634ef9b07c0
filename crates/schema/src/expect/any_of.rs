use serde_json::Value;

use crate::context::{describe, Context};
use crate::schema::Schema;

/// Enumeration of permitted literal values.
#[derive(Debug, Clone)]
pub struct AnyOf {
    values: Vec<Value>,
    default: Option<Value>,
    required: bool,
    nullable: bool,
}

impl AnyOf {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            default: None,
            required: false,
            nullable: false,
        }
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn expected(&self) -> String {
        self.values.iter().map(describe).collect::<Vec<_>>().join("|")
    }
}

impl Schema for AnyOf {
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
        match value {
            None if self.required => {
                ctx.missing();
                Value::Null
            }
            None => self.default.clone().unwrap_or(Value::Null),
            Some(Value::Null) if self.nullable => Value::Null,
            Some(value) if self.values.contains(value) => value.clone(),
            Some(value) => {
                ctx.type_mismatch(&self.expected(), value);
                Value::Null
            }
        }
    }
}
