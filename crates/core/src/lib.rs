//! 按路径寻址的配置容器
//!
//! 在校验引擎（[`pathconf_schema`]）之上提供：
//!
//! - **registry**: 按顶层键增量注册 schema
//! - **store**: 原始数据的按路径写入与深度合并
//! - **cache**: 每个顶层键一个显式的两态缓存槽位
//! - **configuration**: 协调以上组件的核心容器，读取时才进行校验
//! - **reader**: 共享状态的只读视图
//! - **builder**: 流式构建器
//!
//! 路径以 `/` 或 `.` 分隔，二者等价。

pub mod builder;
pub mod cache;
pub mod configuration;
pub mod errors;
pub mod path;
pub mod reader;
pub mod registry;
pub mod store;

pub use builder::ConfigurationBuilder;
pub use cache::{Slot, ValidationCache};
pub use configuration::Configuration;
pub use errors::*;
pub use reader::{ConfigurationRead, ReadOnlyConfiguration};
pub use registry::SchemaRegistry;
pub use store::{deep_merge, NotIndexable, ValueStore};
