use pathconf_schema::{Expect, Schema, SchemaError, SchemaRef};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::errors::{ConfigError, ConfigResult};

/// Configuration builder - Fluent interface for seeding a container
///
/// 先按顺序注册 schema，再依次合并初始数据；初始数据的校验仍然推迟到读取时。
///
/// ```
/// use pathconf_core::Configuration;
/// use pathconf_schema::Expect;
/// use serde_json::json;
///
/// let config = Configuration::builder()
///     .schema("log_level", Expect::any_of(["debug", "info"]).default("info"))
///     .schema("workers", Expect::int().min(1.0))
///     .data(json!({"workers": 4}))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.get("workers").unwrap(), json!(4));
/// ```
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
    schemas: Vec<(String, SchemaRef)>,
    data: Vec<Value>,
    error: Option<SchemaError>,
}

impl ConfigurationBuilder {
    /// Create new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema for a top-level key
    pub fn schema<S>(mut self, key: impl Into<String>, schema: S) -> Self
    where
        S: Schema + 'static,
    {
        self.schemas.push((key.into(), schema.into_ref()));
        self
    }

    /// Add a schema from a type expression such as `int|string`
    ///
    /// 表达式无法解析时，第一个错误会保留下来并由 [`ConfigurationBuilder::build`] 返回。
    pub fn schema_type(mut self, key: impl Into<String>, expression: &str) -> Self {
        match Expect::of_type(expression) {
            Ok(schema) => self.schemas.push((key.into(), schema.into_ref())),
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    pub fn schemas<I, K>(mut self, schemas: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        self.schemas
            .extend(schemas.into_iter().map(|(key, schema)| (key.into(), schema)));
        self
    }

    /// Add initial data, merged in the order given
    pub fn data(mut self, data: Value) -> Self {
        self.data.push(data);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConfigResult<Configuration> {
        if let Some(err) = self.error {
            return Err(ConfigError::Schema(err));
        }
        let config = Configuration::with_schemas(self.schemas);
        for data in self.data {
            config.merge(data)?;
        }
        Ok(config)
    }
}
