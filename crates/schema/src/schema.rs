use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::context::{Context, Normalized};
use crate::error::ValidationMessages;

/// 共享的 schema 句柄
pub type SchemaRef = Arc<dyn Schema>;

/// 校验引擎边界
///
/// 配置容器只通过这个特征与校验引擎交互，从不检查 schema 的内部结构。
/// 实现者只需提供 [`Schema::normalize`]：读取原始值（`None` 表示调用方
/// 从未写入任何数据），把失败写入上下文，并返回规范化后的值。
///
/// # 实现示例
///
/// ```
/// use pathconf_schema::{Context, Schema};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct NonEmpty;
///
/// impl Schema for NonEmpty {
///     fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
///         match value {
///             Some(Value::String(s)) if !s.is_empty() => Value::String(s.clone()),
///             Some(other) => {
///                 ctx.type_mismatch("non-empty string", other);
///                 Value::Null
///             }
///             None => {
///                 ctx.missing();
///                 Value::Null
///             }
///         }
///     }
/// }
///
/// assert!(NonEmpty.validate("name", None).is_err());
/// ```
pub trait Schema: Send + Sync + fmt::Debug {
    /// 规范化单个条目，失败信息写入 `ctx`
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value;

    /// 以 `key` 为根路径校验一个完整的顶层值
    fn validate(&self, key: &str, value: Option<&Value>) -> Result<Normalized, ValidationMessages> {
        let mut ctx = Context::new(key);
        let normalized = self.normalize(value, &mut ctx);
        ctx.finish(normalized)
    }

    fn into_ref(self) -> SchemaRef
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl Schema for SchemaRef {
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
        (**self).normalize(value, ctx)
    }

    fn into_ref(self) -> SchemaRef {
        self
    }
}

impl<S: Schema + ?Sized> Schema for Box<S> {
    fn normalize(&self, value: Option<&Value>, ctx: &mut Context) -> Value {
        (**self).normalize(value, ctx)
    }
}
