use serde_json::{Map, Value};
use thiserror::Error;

/// A write path ran into an existing value that is not map-shaped.
///
/// `depth` counts the segments below the top-level key that were walked
/// before the offending value was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value at depth {depth} cannot be indexed into")]
pub struct NotIndexable {
    pub depth: usize,
}

/// Raw, unvalidated data keyed by top-level key.
#[derive(Debug, Default, Clone)]
pub struct ValueStore {
    roots: Map<String, Value>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when nothing was ever written under `key`.
    pub fn raw_for(&self, key: &str) -> Option<&Value> {
        self.roots.get(key)
    }

    /// Path-directed write below `key`.
    ///
    /// An empty `rest` replaces the whole tree for `key`. Missing or `null`
    /// intermediate nodes become maps; lists are walked by in-range decimal
    /// index. Existing nodes are checked before anything is written, so a
    /// failed write leaves the key untouched.
    pub fn set_path(&mut self, key: &str, rest: &[&str], value: Value) -> Result<(), NotIndexable> {
        let Some((leaf, parents)) = rest.split_last() else {
            self.roots.insert(key.to_string(), value);
            return Ok(());
        };

        if let Some(depth) = self.blocked_at(key, rest) {
            return Err(NotIndexable { depth });
        }

        let mut current = self.roots.entry(key.to_string()).or_insert(Value::Null);
        for (depth, segment) in parents.iter().enumerate() {
            current = child_mut(current, segment).ok_or(NotIndexable { depth })?;
        }
        let slot = child_mut(current, leaf).ok_or(NotIndexable {
            depth: parents.len(),
        })?;
        *slot = value;
        Ok(())
    }

    /// 找到第一个无法下钻的已有节点，返回它在 `rest` 中的深度
    fn blocked_at(&self, key: &str, rest: &[&str]) -> Option<usize> {
        let mut current = self.roots.get(key)?;
        for (depth, segment) in rest.iter().enumerate() {
            let next = match current {
                Value::Null => return None,
                Value::Object(map) => map.get(*segment),
                Value::Array(items) => match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(item) => Some(item),
                    None => return Some(depth),
                },
                _ => return Some(depth),
            };
            current = next?;
        }
        None
    }

    pub fn merge_into(&mut self, key: &str, partial: Value) {
        match self.roots.get_mut(key) {
            Some(existing) => deep_merge(existing, partial),
            None => {
                self.roots.insert(key.to_string(), partial);
            }
        }
    }
}

/// 可写子节点；`null` 节点先替换为空映射，映射中缺失的键以 `null` 占位
fn child_mut<'v>(node: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    if node.is_null() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => Some(map.entry(segment.to_string()).or_insert(Value::Null)),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(move |index| items.get_mut(index)),
        _ => None,
    }
}

/// 递归深度合并
///
/// 两侧都是映射时逐键合并，其余情况（标量、列表、形态不同）直接以新值替换。
pub fn deep_merge(base: &mut Value, incoming: Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, incoming) => *base = incoming,
    }
}
