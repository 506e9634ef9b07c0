use std::collections::HashMap;

use pathconf_schema::SchemaRef;

/// Schema registry, one schema per top-level key.
///
/// 后注册的 schema 完全取代同名键的旧 schema。键按首次注册的顺序保留。
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<String, SchemaRef>,
    order: Vec<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace; returns `true` when a previous schema was replaced.
    pub fn add(&mut self, key: impl Into<String>, schema: SchemaRef) -> bool {
        let key = key.into();
        if !self.schemas.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.schemas.insert(key, schema).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&SchemaRef> {
        self.schemas.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.schemas.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
