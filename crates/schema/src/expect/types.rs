use std::fmt;
use std::sync::Arc;

use serde_json::{Number, Value};

use super::kind::Kind;
use crate::context::{describe, Context};
use crate::schema::{Schema, SchemaRef};

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// 自定义断言
#[derive(Clone)]
pub(crate) struct Assertion {
    check: Predicate,
    description: String,
}

impl Assertion {
    pub(crate) fn new<F>(check: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            description: description.into(),
        }
    }

    pub(crate) fn apply(&self, value: &Value, ctx: &mut Context) {
        if !(self.check)(value) {
            let message = format!(
                "Failed assertion '{}' for item '{}' with value {}.",
                self.description,
                ctx.path(),
                describe(value)
            );
            ctx.add_error(message);
        }
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("description", &self.description)
            .finish()
    }
}

/// Scalar / collection schema: one or more accepted kinds plus modifiers.
///
/// Built through [`Expect`](super::Expect); each modifier consumes and returns
/// the schema so they chain:
///
/// ```
/// use pathconf_schema::{Expect, Schema};
/// use serde_json::json;
///
/// let port = Expect::int().default(8080).min(1.0).max(65535.0);
/// assert_eq!(port.validate("port", None).unwrap().value, json!(8080));
/// assert!(port.validate("port", Some(&json!(0))).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TypeSchema {
    kinds: Vec<Kind>,
    items: Option<SchemaRef>,
    default: Option<Value>,
    required: bool,
    nullable: bool,
    deprecated: bool,
    deprecation: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    assertions: Vec<Assertion>,
}

impl TypeSchema {
    pub(crate) fn new(kinds: Vec<Kind>) -> Self {
        Self {
            kinds,
            items: None,
            default: None,
            required: false,
            nullable: false,
            deprecated: false,
            deprecation: None,
            min: None,
            max: None,
            assertions: Vec::new(),
        }
    }

    pub(crate) fn with_items(mut self, items: SchemaRef) -> Self {
        self.items = Some(items);
        self
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

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// `%path%` in the message is replaced with the item path.
    pub fn deprecated_with(mut self, message: impl Into<String>) -> Self {
        self.deprecated = true;
        self.deprecation = Some(message.into());
        self
    }

    /// 数值比较大小，字符串和数组比较长度
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn assert<F>(mut self, check: F, description: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.assertions.push(Assertion::new(check, description));
        self
    }

    fn expected(&self) -> String {
        let mut names: Vec<&str> = self.kinds.iter().map(Kind::as_str).collect();
        if self.nullable && !self.kinds.contains(&Kind::Null) {
            names.push(Kind::Null.as_str());
        }
        names.join("|")
    }

    fn matches(&self, value: &Value) -> bool {
        (self.nullable && value.is_null()) || self.kinds.iter().any(|kind| kind.accepts(value))
    }

    fn default_value(&self) -> Value {
        match &self.default {
            Some(value) => value.clone(),
            None if self.kinds.first().is_some_and(Kind::is_collection) => Value::Array(Vec::new()),
            None => Value::Null,
        }
    }

    /// float 类型接受整数，并统一转换为浮点数
    fn widen(&self, value: &Value) -> Value {
        let integer_allowed = self
            .kinds
            .iter()
            .any(|kind| matches!(kind, Kind::Int | Kind::Scalar | Kind::Mixed));
        if integer_allowed || !self.kinds.contains(&Kind::Float) {
            return value.clone();
        }
        match value {
            Value::Number(n) if !n.is_f64() => n
                .as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| value.clone()),
            _ => value.clone(),
        }
    }

    fn check_range(&self, value: &Value, ctx: &mut Context) -> bool {
        if self.min.is_none() && self.max.is_none() {
            return true;
        }

        let (measure, by_length) = match value {
            Value::Number(n) => (n.as_f64(), false),
            Value::String(s) => (Some(s.chars().count() as f64), true),
            Value::Array(items) => (Some(items.len() as f64), true),
            Value::Object(map) => (Some(map.len() as f64), true),
            _ => (None, false),
        };
        let Some(measure) = measure else {
            return true;
        };

        let below = self.min.is_some_and(|min| measure < min);
        let above = self.max.is_some_and(|max| measure > max);
        if !(below || above) {
            return true;
        }

        let range = format!(
            "{}..{}",
            self.min.map(|v| v.to_string()).unwrap_or_default(),
            self.max.map(|v| v.to_string()).unwrap_or_default()
        );
        let message = if by_length {
            format!(
                "The length of item '{}' expects to be in range {}, {} given.",
                ctx.path(),
                range,
                measure
            )
        } else {
            format!(
                "The item '{}' expects to be in range {}, {} given.",
                ctx.path(),
                range,
                describe(value)
            )
        };
        ctx.add_error(message);
        false
    }

    fn normalize_items(&self, items: &SchemaRef, value: Value, ctx: &mut Context) -> Value {
        match value {
            Value::Array(elements) => Value::Array(
                elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        ctx.enter(index.to_string());
                        let normalized = items.normalize(Some(element), ctx);
                        ctx.leave();
                        normalized
                    })
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, element)| {
                        ctx.enter(key.as_str());
                        let normalized = items.normalize(Some(element), ctx);
                        ctx.leave();
                        (key.clone(), normalized)
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

impl Schema for TypeSchema {
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
        let Some(value) = value else {
            if self.required {
                ctx.missing();
                return Value::Null;
            }
            return self.default_value();
        };

        if self.deprecated {
            ctx.deprecated(self.deprecation.as_deref());
        }

        if !self.matches(value) {
            ctx.type_mismatch(&self.expected(), value);
            return Value::Null;
        }

        let mut normalized = self.widen(value);
        if !self.check_range(&normalized, ctx) {
            return Value::Null;
        }

        if let Some(items) = &self.items {
            normalized = self.normalize_items(items, normalized, ctx);
        }

        for assertion in &self.assertions {
            assertion.apply(&normalized, ctx);
        }

        normalized
    }
}
