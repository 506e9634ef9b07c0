//! 配置容器核心
//!
//! 协调 schema 注册表、原始数据存储和校验缓存，对外提供按路径的读写操作。
//!
//! # 缓存状态机
//!
//! 每个顶层键有一个缓存槽位，初始为 `Invalid`：
//!
//! - `set` / `merge` / `add_schema` 触及某个键时，该键的槽位立即变为 `Invalid`
//! - `get` / `exists` 遇到 `Invalid` 槽位时运行校验引擎；成功则存入结果变为
//!   `Valid`，失败则保持 `Invalid` 并把失败返回给调用方（失败结果从不缓存）
//!
//! # 使用示例
//!
//! ```
//! use pathconf_core::Configuration;
//! use pathconf_schema::Expect;
//! use serde_json::json;
//!
//! let config = Configuration::new();
//! config.add_schema(
//!     "server",
//!     Expect::structure()
//!         .field("host", Expect::string().default("localhost"))
//!         .field("port", Expect::int().default(8080)),
//! );
//!
//! config.set("server.port", 9090).unwrap();
//! assert_eq!(config.get("server/port").unwrap(), json!(9090));
//! assert_eq!(config.get("server.host").unwrap(), json!("localhost"));
//! ```

use parking_lot::RwLock;
use pathconf_schema::{Schema, SchemaRef};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::cache::ValidationCache;
use crate::errors::{ConfigError, ConfigResult};
use crate::path::{descend, OptionPath};
use crate::reader::ReadOnlyConfiguration;
use crate::registry::SchemaRegistry;
use crate::store::ValueStore;

#[derive(Debug, Default)]
struct State {
    registry: SchemaRegistry,
    store: ValueStore,
    cache: ValidationCache,
}

impl State {
    /// 返回 `key` 的校验结果；`Ok(None)` 表示该键没有注册 schema
    fn validated(&mut self, key: &str) -> ConfigResult<Option<&Value>> {
        let Some(schema) = self.registry.get(key) else {
            return Ok(None);
        };

        if self.cache.is_valid(key) {
            return Ok(self.cache.get(key));
        }

        debug!(option = key, "validating configuration option");
        let normalized = match schema.validate(key, self.store.raw_for(key)) {
            Ok(normalized) => normalized,
            Err(messages) => {
                debug!(
                    option = key,
                    failures = messages.len(),
                    "configuration option failed validation"
                );
                return Err(ConfigError::Validation(messages));
            }
        };

        for warning in &normalized.warnings {
            warn!(option = key, "{warning}");
        }

        self.cache.store(key, normalized.value);
        Ok(self.cache.get(key))
    }

    fn invalidate(&mut self, key: &str) {
        if self.cache.invalidate(key) {
            trace!(option = key, "evicted cached configuration value");
        }
    }
}

/// Path-addressable configuration container with lazy, per-key cached validation.
///
/// 所有操作都通过 `&self` 完成，状态由一把读写锁保护，因此可以在持有
/// [`ReadOnlyConfiguration`] 视图的同时继续写入。
#[derive(Debug, Default)]
pub struct Configuration {
    state: RwLock<State>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依次注册每个 schema，等价于按顺序调用 [`Configuration::add_schema`]
    pub fn with_schemas<I, K>(schemas: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaRef)>,
        K: Into<String>,
    {
        let config = Self::new();
        for (key, schema) in schemas {
            config.add_schema(key, schema);
        }
        config
    }

    pub fn builder() -> crate::builder::ConfigurationBuilder {
        crate::builder::ConfigurationBuilder::new()
    }

    /// Register or replace the schema for a top-level key.
    pub fn add_schema<S>(&self, key: impl Into<String>, schema: S)
    where
        S: Schema + 'static,
    {
        let key = key.into();
        let mut state = self.state.write();
        let replaced = state.registry.add(key.clone(), schema.into_ref());
        state.invalidate(&key);
        debug!(option = %key, replaced, "registered configuration schema");
    }

    /// 读取路径上的已校验值
    ///
    /// # 错误
    ///
    /// - `UnknownOption`: 顶层键未注册 schema，或路径中某一段无法解析
    /// - `Validation`: 校验引擎拒绝了该顶层键的当前数据
    pub fn get(&self, path: &str) -> ConfigResult<Value> {
        let option = OptionPath::parse(path).ok_or_else(|| ConfigError::unknown_option(path))?;
        self.with_validated(option.key(), |root| {
            descend(root, option.rest()).cloned()
        })?
        .flatten()
        .ok_or_else(|| ConfigError::unknown_option(path))
    }

    /// Like [`Configuration::get`], but a path that does not resolve yields
    /// `false`. Validation failures are still returned as errors.
    pub fn exists(&self, path: &str) -> ConfigResult<bool> {
        let Some(option) = OptionPath::parse(path) else {
            return Ok(false);
        };
        let found = self.with_validated(option.key(), |root| {
            descend(root, option.rest()).is_some()
        })?;
        Ok(found.unwrap_or(false))
    }

    /// 写入原始值；未注册 schema 的键同样可以写入
    pub fn set(&self, path: &str, value: impl Into<Value>) -> ConfigResult<()> {
        let option = OptionPath::parse(path).ok_or_else(|| ConfigError::unknown_option(path))?;
        let key = option.key();

        let mut state = self.state.write();
        state
            .store
            .set_path(key, option.rest(), value.into())
            .map_err(|err| ConfigError::CannotIndex {
                path: path.to_string(),
                at: std::iter::once(key)
                    .chain(option.rest()[..err.depth].iter().copied())
                    .collect::<Vec<_>>()
                    .join("."),
            })?;
        state.invalidate(key);
        Ok(())
    }

    /// Deep-merge a map keyed by top-level key into the raw data.
    pub fn merge(&self, tree: Value) -> ConfigResult<()> {
        let entries = match tree {
            Value::Object(entries) => entries,
            other => {
                return Err(ConfigError::InvalidMerge {
                    given: pathconf_schema::describe(&other),
                })
            }
        };

        let mut state = self.state.write();
        for (key, partial) in entries {
            state.store.merge_into(&key, partial);
            state.invalidate(&key);
        }
        Ok(())
    }

    /// 只读视图，与本实例共享状态
    pub fn reader(&self) -> ReadOnlyConfiguration<'_> {
        ReadOnlyConfiguration::new(self)
    }

    /// Read and deserialize a value.
    pub fn get_as<T>(&self, path: &str) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        let value = self.get(path)?;
        T::deserialize(&value)
            .map_err(|e| ConfigError::invalid_option(path, &value, Some(&e.to_string())))
    }

    /// Serialize a value and write it with [`Configuration::set`].
    pub fn set_value<T>(&self, path: &str, value: &T) -> ConfigResult<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value).map_err(|e| ConfigError::InvalidOption {
            option: path.to_string(),
            value: std::any::type_name::<T>().to_string(),
            description: Some(e.to_string()),
        })?;
        self.set(path, value)
    }

    /// 已注册的顶层键，按注册顺序
    pub fn keys(&self) -> Vec<String> {
        self.state.read().registry.keys().map(String::from).collect()
    }

    /// Validated values of every registered key as one map.
    pub fn snapshot(&self) -> ConfigResult<Value> {
        let mut state = self.state.write();
        let keys: Vec<String> = state.registry.keys().map(String::from).collect();

        let mut snapshot = Map::new();
        for key in keys {
            if let Some(value) = state.validated(&key)? {
                snapshot.insert(key, value.clone());
            }
        }
        Ok(Value::Object(snapshot))
    }

    /// 在已校验的顶层值上执行 `f`；顶层键未注册时返回 `Ok(None)`
    fn with_validated<R>(&self, key: &str, f: impl FnOnce(&Value) -> R) -> ConfigResult<Option<R>> {
        {
            let state = self.state.read();
            if !state.registry.has(key) {
                return Ok(None);
            }
            if let Some(value) = state.cache.get(key) {
                trace!(option = key, "configuration cache hit");
                return Ok(Some(f(value)));
            }
        }

        let mut state = self.state.write();
        let value = state.validated(key)?;
        Ok(value.map(f))
    }
}

#[cfg(test)]
mod tests {
    use pathconf_schema::Expect;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_option() {
        let config = Configuration::new();

        let err = config.get("foo").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { ref path } if path == "foo"));

        let err = config.get("").unwrap_err();
        assert!(err.is_unknown_option());
        assert_eq!(err.path(), Some(""));

        assert!(!config.exists("foo").unwrap());
        assert!(!config.exists("").unwrap());
    }

    #[test]
    fn test_add_schema_and_defaults() {
        let config = Configuration::new();
        config.add_schema("foo", Expect::string().default("bar"));
        assert_eq!(config.get("foo").unwrap(), json!("bar"));
    }

    #[test]
    fn test_cache_reused_until_write() {
        let config = Configuration::new();
        config.add_schema("foo", Expect::int().default(1));

        assert_eq!(config.get("foo").unwrap(), json!(1));
        assert!(config.state.read().cache.is_valid("foo"));

        // exists 复用同一个缓存
        assert!(config.exists("foo").unwrap());
        assert!(config.state.read().cache.is_valid("foo"));

        config.set("foo", 2).unwrap();
        assert!(!config.state.read().cache.is_valid("foo"));
        assert_eq!(config.get("foo").unwrap(), json!(2));
    }

    #[test]
    fn test_failed_validation_is_not_cached() {
        let config = Configuration::new();
        config.add_schema("foo", Expect::int());
        config.set("foo", "bar").unwrap();

        assert!(config.get("foo").unwrap_err().is_validation());
        assert!(!config.state.read().cache.is_valid("foo"));

        config.set("foo", 7).unwrap();
        assert_eq!(config.get("foo").unwrap(), json!(7));
    }

    #[test]
    fn test_writes_only_invalidate_their_key() {
        let config = Configuration::new();
        config.add_schema("a", Expect::int().default(1));
        config.add_schema("b", Expect::int().default(2));
        config.get("a").unwrap();
        config.get("b").unwrap();

        config.set("a", 10).unwrap();
        let state = config.state.read();
        assert!(!state.cache.is_valid("a"));
        assert!(state.cache.is_valid("b"));
    }

    #[test]
    fn test_cannot_index_names_offending_node() {
        let config = Configuration::new();
        config.add_schema("foo", Expect::int().default(42));
        config.set("foo", 3).unwrap();
        config.get("foo").unwrap();

        let err = config.set("foo.bar", 42).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CannotIndex { ref path, ref at } if path == "foo.bar" && at == "foo"
        ));

        // 失败的写入不影响原值，也不会使缓存失效
        assert!(config.state.read().cache.is_valid("foo"));
        assert_eq!(config.get("foo").unwrap(), json!(3));
    }

    #[test]
    fn test_set_empty_path() {
        let config = Configuration::new();
        assert!(config.set("", 1).unwrap_err().is_unknown_option());
    }

    #[test]
    fn test_merge_rejects_non_map() {
        let config = Configuration::new();
        let err = config.merge(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMerge { ref given } if given == "array"));
    }

    #[test]
    fn test_typed_access() {
        #[derive(Debug, serde::Deserialize, Serialize, PartialEq)]
        struct Server {
            host: String,
            port: u16,
        }

        let config = Configuration::new();
        config.add_schema(
            "server",
            Expect::structure()
                .field("host", Expect::string().default("localhost"))
                .field("port", Expect::int().default(8080)),
        );

        let server: Server = config.get_as("server").unwrap();
        assert_eq!(
            server,
            Server {
                host: "localhost".to_string(),
                port: 8080
            }
        );

        config
            .set_value(
                "server",
                &Server {
                    host: "example.org".to_string(),
                    port: 443,
                },
            )
            .unwrap();
        let port: u16 = config.get_as("server.port").unwrap();
        assert_eq!(port, 443);

        let err = config.get_as::<u16>("server.host").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { .. }));
        assert!(err
            .to_string()
            .starts_with(r#"Invalid config option for "server.host": example.org ("#));
    }

    #[test]
    fn test_keys_and_snapshot() {
        let config = Configuration::new();
        config.add_schema("b", Expect::int().default(2));
        config.add_schema("a", Expect::string().default("x"));
        config.set("unregistered", true).unwrap();

        assert_eq!(config.keys(), ["b", "a"]);
        assert_eq!(config.snapshot().unwrap(), json!({"b": 2, "a": "x"}));

        config.add_schema("c", Expect::int().required());
        assert!(config.snapshot().unwrap_err().is_validation());
    }

    #[derive(Debug, Default)]
    struct CountingSchema {
        calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Schema for CountingSchema {
        fn normalize(&self, value: Option<&Value>, _ctx: &mut pathconf_schema::Context) -> Value {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            value.cloned().unwrap_or(Value::Null)
        }
    }

    #[test]
    fn test_racing_readers_validate_once() {
        use std::sync::atomic::Ordering;

        let schema = CountingSchema::default();
        let calls = schema.calls.clone();
        let config = Configuration::new();
        config.add_schema("foo", schema);
        config.set("foo", 1).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| assert_eq!(config.get("foo").unwrap(), json!(1)));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        config.set("foo", 2).unwrap();
        assert_eq!(config.get("foo").unwrap(), json!(2));
        assert!(config.exists("foo").unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_configuration_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Configuration>();
    }
}
