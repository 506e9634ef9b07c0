use pathconf_schema::{describe, SchemaError, ValidationMessages};
use serde_json::Value;
use thiserror::Error;

/// 配置容器错误类型定义
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration option '{path}' does not exist")]
    UnknownOption { path: String },

    #[error("Key path '{at}' within '{path}' cannot be indexed into (is not a map or list)")]
    CannotIndex { path: String, at: String },

    #[error("{0}")]
    Validation(#[from] ValidationMessages),

    #[error(
        "Invalid config option for \"{option}\": {value}{}",
        .description.as_ref().map(|d| format!(" ({d})")).unwrap_or_default()
    )]
    InvalidOption {
        option: String,
        value: String,
        description: Option<String>,
    },

    #[error("Merge expects a map keyed by top-level option, {given} given")]
    InvalidMerge { given: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ConfigError {
    pub fn unknown_option(path: impl Into<String>) -> Self {
        ConfigError::UnknownOption { path: path.into() }
    }

    /// 某个配置值不满足调用方期望时使用
    pub fn invalid_option(option: impl Into<String>, given: &Value, description: Option<&str>) -> Self {
        let value = match given {
            Value::String(s) => s.clone(),
            Value::Number(_) | Value::Bool(_) => given.to_string(),
            other => describe(other),
        };
        ConfigError::InvalidOption {
            option: option.into(),
            value,
            description: description.map(str::to_string),
        }
    }

    /// `CannotIndex` 也属于“选项不存在”的一种
    pub fn is_unknown_option(&self) -> bool {
        matches!(
            self,
            ConfigError::UnknownOption { .. } | ConfigError::CannotIndex { .. }
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConfigError::Validation(_))
    }

    /// The requested path for path-shaped errors.
    pub fn path(&self) -> Option<&str> {
        match self {
            ConfigError::UnknownOption { path } | ConfigError::CannotIndex { path, .. } => Some(path),
            ConfigError::InvalidOption { option, .. } => Some(option),
            _ => None,
        }
    }

    /// Engine messages, verbatim and in order.
    pub fn messages(&self) -> &[String] {
        match self {
            ConfigError::Validation(messages) => messages.messages(),
            _ => &[],
        }
    }
}

/// 统一的Result类型
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
