use thiserror::Error;

/// 结构定义错误
///
/// 仅在构建 schema 时产生（例如无法识别的类型名），与数据校验失败无关。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Unknown type '{name}' in type expression '{expression}'")]
    UnknownType { name: String, expression: String },

    #[error("Empty type expression")]
    EmptyTypeExpression,
}

/// Ordered, non-empty list of human-readable validation failures.
///
/// 消息内容和顺序由校验引擎决定，调用方只做透传。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("\n"))]
pub struct ValidationMessages(Vec<String>);

impl ValidationMessages {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl IntoIterator for ValidationMessages {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationMessages {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Schema 构建结果类型
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;
