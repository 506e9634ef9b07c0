//! 校验上下文
//!
//! 记录当前正在校验的条目路径，并按文档顺序收集错误和警告。
//! 每条消息都以路径标识出问题的条目，路径各段之间以 ` › ` 连接。

use serde_json::Value;

use crate::error::ValidationMessages;

/// 路径段分隔符
pub const PATH_SEPARATOR: &str = " › ";

/// Successful output of a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// 应用默认值并完成类型检查后的值
    pub value: Value,
    /// 非致命提示（例如已废弃的条目）
    pub warnings: Vec<String>,
}

#[derive(Debug, Default)]
pub struct Context {
    path: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Context {
    /// 以顶层键作为根路径段创建上下文
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            path: vec![root.into()],
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn path(&self) -> String {
        self.path.join(PATH_SEPARATOR)
    }

    pub fn enter(&mut self, segment: impl Into<String>) {
        self.path.push(segment.into());
    }

    pub fn leave(&mut self) {
        self.path.pop();
    }

    pub fn add_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn missing(&mut self) {
        let message = format!("The mandatory item '{}' is missing.", self.path());
        self.add_error(message);
    }

    pub fn type_mismatch(&mut self, expected: &str, given: &Value) {
        let message = format!(
            "The item '{}' expects to be {}, {} given.",
            self.path(),
            expected,
            describe(given)
        );
        self.add_error(message);
    }

    pub fn unexpected(&mut self) {
        let message = format!("Unexpected item '{}'.", self.path());
        self.add_error(message);
    }

    pub fn deprecated(&mut self, message: Option<&str>) {
        let path = self.path();
        let message = match message {
            Some(custom) => custom.replace("%path%", &path),
            None => format!("The item '{path}' is deprecated."),
        };
        self.add_warning(message);
    }

    /// 结束本次校验：有错误则返回全部错误，否则返回规范化结果
    pub fn finish(self, value: Value) -> Result<Normalized, ValidationMessages> {
        if self.errors.is_empty() {
            Ok(Normalized {
                value,
                warnings: self.warnings,
            })
        } else {
            Err(ValidationMessages::new(self.errors))
        }
    }
}

/// Short human-readable description of a value for failure messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(_) | Value::Object(_) => "array".to_string(),
    }
}
