use serde_json::{Map, Value};

use crate::context::Context;
use crate::schema::{Schema, SchemaRef};

/// Fixed set of named fields, each with its own schema.
///
/// 字段按声明顺序输出；未声明的键视为错误，除非通过
/// [`Structure::other_items`] 指定了它们的 schema。
#[derive(Debug, Clone, Default)]
pub struct Structure {
    fields: Vec<(String, SchemaRef)>,
    other_items: Option<SchemaRef>,
    required: bool,
    deprecated: bool,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加字段，同名字段会被替换
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        let name = name.into();
        let schema = schema.into_ref();
        match self.fields.iter_mut().find(|slot| slot.0 == name) {
            Some(slot) => slot.1 = schema,
            None => self.fields.push((name, schema)),
        }
        self
    }

    pub fn other_items<S>(mut self, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        self.other_items = Some(schema.into_ref());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    fn normalize_map(&self, given: &Map<String, Value>, ctx: &mut Context) -> Value {
        if self.other_items.is_none() {
            for key in given.keys().filter(|key| !self.has_field(key)) {
                ctx.enter(key.as_str());
                ctx.unexpected();
                ctx.leave();
            }
        }

        let mut normalized = Map::new();
        for (name, schema) in &self.fields {
            ctx.enter(name.as_str());
            let value = schema.normalize(given.get(name), ctx);
            ctx.leave();
            normalized.insert(name.clone(), value);
        }

        if let Some(other) = &self.other_items {
            for (key, value) in given.iter().filter(|(key, _)| !self.has_field(key)) {
                ctx.enter(key.as_str());
                let value = other.normalize(Some(value), ctx);
                ctx.leave();
                normalized.insert(key.clone(), value);
            }
        }

        Value::Object(normalized)
    }
}

impl Schema for Structure {
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
        let Some(value) = value else {
            if self.required {
                ctx.missing();
                return Value::Null;
            }
            return self.normalize_map(&Map::new(), ctx);
        };

        if self.deprecated {
            ctx.deprecated(None);
        }

        match value {
            Value::Object(map) => self.normalize_map(map, ctx),
            // 列表按下标作为键处理，空列表等价于空映射
            Value::Array(items) => {
                let indexed: Map<String, Value> = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item.clone()))
                    .collect();
                self.normalize_map(&indexed, ctx)
            }
            other => {
                ctx.type_mismatch("array", other);
                Value::Null
            }
        }
    }
}
