use crate::models::QuestionOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 选项在评分键中的标识
///
/// 已持久化的选项用ID，未保存的新选项用它在集合中的位置
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionKey {
    Id(String),
    Index(usize),
}

/// 计算选项的评分标识
///
/// 没有ID时退回到下标。下标会随重新排序而变化，
/// 但已存储的评分键依赖这一行为，所有调用点都必须经过这里。
pub fn option_key(option: &QuestionOption, index: usize) -> OptionKey {
    match option.id.as_deref() {
        Some(id) if !id.is_empty() => OptionKey::Id(id.to_string()),
        _ => OptionKey::Index(index),
    }
}

impl From<&str> for OptionKey {
    fn from(id: &str) -> Self {
        OptionKey::Id(id.to_string())
    }
}

impl From<usize> for OptionKey {
    fn from(index: usize) -> Self {
        OptionKey::Index(index)
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::Id(id) => write!(f, "\"{}\"", id),
            OptionKey::Index(index) => write!(f, "#{}", index),
        }
    }
}
