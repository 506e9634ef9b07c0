//! 配置结构校验引擎
//!
//! 本 crate 定义配置容器与校验引擎之间的边界（[`Schema`] 特征），并提供一个
//! 声明式实现 [`Expect`]。引擎接收一份 schema 和原始数据，返回应用了默认值、
//! 完成类型检查的规范化数据，或者一组有序、非空的失败消息。
//!
//! - **schema**: 引擎边界特征
//! - **context**: 路径跟踪与消息收集
//! - **expect**: `Expect` 构建器家族
//! - **error**: 错误类型

pub mod context;
pub mod error;
pub mod expect;
pub mod schema;

pub use context::{describe, Context, Normalized};
pub use error::{SchemaError, SchemaResult, ValidationMessages};
pub use expect::{AnyOf, Expect, Kind, Structure, TypeSchema};
pub use schema::{Schema, SchemaRef};
