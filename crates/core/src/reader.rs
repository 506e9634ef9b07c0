//! 只读视图
//!
//! 视图借用创建它的 [`Configuration`]，不复制任何状态：通过原实例完成的写入
//! 在视图上立即可见。视图的生命周期受借用约束，不能比原实例活得更久，
//! 也不会延长原实例的生命周期。

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::configuration::Configuration;
use crate::errors::ConfigResult;

/// Read operations shared by the container and its views.
///
/// 只需要读取配置的组件可以依赖这个特征，而不是具体的容器类型。
pub trait ConfigurationRead {
    fn get(&self, path: &str) -> ConfigResult<Value>;

    fn exists(&self, path: &str) -> ConfigResult<bool>;
}

/// Read-only façade over a [`Configuration`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyConfiguration<'a> {
    config: &'a Configuration,
}

impl<'a> ReadOnlyConfiguration<'a> {
    pub(crate) fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    pub fn get(&self, path: &str) -> ConfigResult<Value> {
        self.config.get(path)
    }

    pub fn exists(&self, path: &str) -> ConfigResult<bool> {
        self.config.exists(path)
    }

    pub fn get_as<T>(&self, path: &str) -> ConfigResult<T>
    where
        T: DeserializeOwned,
    {
        self.config.get_as(path)
    }
}

impl ConfigurationRead for Configuration {
    fn get(&self, path: &str) -> ConfigResult<Value> {
        Configuration::get(self, path)
    }

    fn exists(&self, path: &str) -> ConfigResult<bool> {
        Configuration::exists(self, path)
    }
}

impl ConfigurationRead for ReadOnlyConfiguration<'_> {
    fn get(&self, path: &str) -> ConfigResult<Value> {
        ReadOnlyConfiguration::get(self, path)
    }

    fn exists(&self, path: &str) -> ConfigResult<bool> {
        ReadOnlyConfiguration::exists(self, path)
    }
}
