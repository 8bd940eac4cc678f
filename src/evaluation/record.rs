use crate::evaluation::option_key::OptionKey;
use crate::models::{NumericType, QuestionType};
use serde::{Deserialize, Serialize};

/// 评分键中的单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOption {
    pub id: OptionKey,
    /// 去掉外层 `<p>` 的选项内容
    pub display_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_text: Option<String>,
}

/// 评分键的答案部分，由 `questionType` 决定具体形态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationAnswer {
    #[serde(rename_all = "camelCase")]
    Choice {
        options: Vec<EvaluationOption>,
        correct_options: Vec<OptionKey>,
    },
    #[serde(rename_all = "camelCase")]
    Numeric {
        valid_answers: Vec<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        numeric_type: Option<NumericType>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        decimals: Option<u32>,
    },
    #[serde(rename_all = "camelCase")]
    Subjective { subjective_answer_text: String },
}

/// 自动评分记录，交给评分引擎按 `questionType` 解释
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationKeyRecord {
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(flatten)]
    pub answer: EvaluationAnswer,
}

impl EvaluationKeyRecord {
    /// 选择题的正确选项集合
    pub fn correct_options(&self) -> Option<&[OptionKey]> {
        match &self.answer {
            EvaluationAnswer::Choice {
                correct_options, ..
            } => Some(correct_options),
            _ => None,
        }
    }

    /// 选择题的选项列表
    pub fn options(&self) -> Option<&[EvaluationOption]> {
        match &self.answer {
            EvaluationAnswer::Choice { options, .. } => Some(options),
            _ => None,
        }
    }
}
