//! `Expect` 构建器
//!
//! 以链式调用声明配置条目的期望：类型、默认值、是否必填、取值范围等。
//!
//! ```
//! use pathconf_schema::{Expect, Schema};
//! use serde_json::json;
//!
//! let schema = Expect::structure()
//!     .field("host", Expect::string().default("localhost"))
//!     .field("port", Expect::int().default(8080));
//!
//! let normalized = schema.validate("server", Some(&json!({"port": 9090}))).unwrap();
//! assert_eq!(normalized.value, json!({"host": "localhost", "port": 9090}));
//! ```

mod any_of;
mod kind;
mod structure;
mod types;

pub use any_of::AnyOf;
pub use kind::Kind;
pub use structure::Structure;
pub use types::TypeSchema;

use serde_json::Value;

use crate::error::SchemaResult;
use crate::schema::Schema;

/// Entry point for building schemas.
pub struct Expect;

impl Expect {
    pub fn string() -> TypeSchema {
        TypeSchema::new(vec![Kind::String])
    }

    pub fn int() -> TypeSchema {
        TypeSchema::new(vec![Kind::Int])
    }

    pub fn float() -> TypeSchema {
        TypeSchema::new(vec![Kind::Float])
    }

    pub fn bool() -> TypeSchema {
        TypeSchema::new(vec![Kind::Bool])
    }

    pub fn null() -> TypeSchema {
        TypeSchema::new(vec![Kind::Null])
    }

    pub fn scalar() -> TypeSchema {
        TypeSchema::new(vec![Kind::Scalar])
    }

    pub fn mixed() -> TypeSchema {
        TypeSchema::new(vec![Kind::Mixed])
    }

    /// 映射或列表，默认值为空数组
    pub fn array() -> TypeSchema {
        TypeSchema::new(vec![Kind::Array])
    }

    pub fn list() -> TypeSchema {
        TypeSchema::new(vec![Kind::List])
    }

    /// 由类型表达式构建，例如 `int|string`
    pub fn of_type(expression: &str) -> SchemaResult<TypeSchema> {
        Ok(TypeSchema::new(Kind::parse_union(expression)?))
    }

    pub fn array_of<S>(items: S) -> TypeSchema
    where
        S: Schema + 'static,
    {
        Self::array().with_items(items.into_ref())
    }

    pub fn list_of<S>(items: S) -> TypeSchema
    where
        S: Schema + 'static,
    {
        Self::list().with_items(items.into_ref())
    }

    pub fn structure() -> Structure {
        Structure::new()
    }

    pub fn any_of<I, V>(values: I) -> AnyOf
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        AnyOf::new(values.into_iter().map(Into::into).collect())
    }
}
