use serde::{Deserialize, Serialize};

/// 选择题选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    /// 已持久化的选项ID，新建选项为空
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// 选项内容（富文本）
    #[serde(default)]
    pub name: String,

    /// 是否为正确答案
    #[serde(default)]
    pub is_selected: bool,

    /// 选项解析
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuestionOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn selected(mut self, is_selected: bool) -> Self {
        self.is_selected = is_selected;
        self
    }
}

/// 单选：只保留 `selected_index` 处的选中状态，其余全部清除
///
/// 下标越界时返回全部未选中的集合
pub fn set_single_selection(options: &[QuestionOption], selected_index: usize) -> Vec<QuestionOption> {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| QuestionOption {
            is_selected: index == selected_index,
            ..option.clone()
        })
        .collect()
}

/// 多选：翻转 `index` 处的选中状态，其余保持不变
pub fn toggle_selection(options: &[QuestionOption], index: usize) -> Vec<QuestionOption> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| QuestionOption {
            is_selected: if i == index {
                !option.is_selected
            } else {
                option.is_selected
            },
            ..option.clone()
        })
        .collect()
}

/// 反序列化ID，兼容字符串或整数
pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer identifier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value.to_string()))
            }
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(IdVisitor)
        }
    }

    deserializer.deserialize_any(IdVisitor)
}
