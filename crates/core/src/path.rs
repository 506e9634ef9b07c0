//! 路径拆分与节点下钻
//!
//! 路径以 `/` 或 `.` 分隔，两者可以在同一路径中混用且完全等价；不支持转义。
//! 空段会被忽略，因此空字符串没有任何段，不能解析到根节点。

use serde_json::{Map, Value};

/// Split a path string into its segments.
pub fn split(path: &str) -> Vec<&str> {
    path.split(['/', '.'])
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// A parsed, non-empty option path: top-level key plus remaining segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> OptionPath<'a> {
    /// 没有任何段时返回 `None`
    pub fn parse(path: &'a str) -> Option<Self> {
        let segments = split(path);
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    pub fn key(&self) -> &'a str {
        self.segments[0]
    }

    pub fn rest(&self) -> &[&'a str] {
        &self.segments[1..]
    }
}

/// 可下钻节点
///
/// 下钻之前先判断节点形态，只有映射和列表可以继续按段索引。
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Map(&'a Map<String, Value>),
    List(&'a [Value]),
    Leaf(&'a Value),
}

impl<'a> Node<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Map(map),
            Value::Array(items) => Node::List(items),
            other => Node::Leaf(other),
        }
    }

    pub fn is_indexable(&self) -> bool {
        !matches!(self, Node::Leaf(_))
    }

    /// 列表按十进制下标索引
    pub fn child(self, segment: &str) -> Option<&'a Value> {
        match self {
            Node::Map(map) => map.get(segment),
            Node::List(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
            Node::Leaf(_) => None,
        }
    }
}

/// Walk `segments` down from `root`; `None` when any segment does not resolve.
pub fn descend<'a>(root: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |current, segment| Node::of(current).child(segment))
}
