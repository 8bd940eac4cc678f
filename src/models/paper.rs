use crate::error::{AppError, AppResult, EvaluationError};
use crate::models::question::{check_question_type, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 试卷上显示的标签覆盖项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayLabels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanations_type: Option<String>,
}

impl DisplayLabels {
    /// 题目标签，默认 "Question"
    pub fn question_label(&self) -> &str {
        self.questions_type.as_deref().unwrap_or("Question")
    }
}

/// 试卷
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaper {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(flatten)]
    pub labels: DisplayLabels,
    #[serde(default)]
    pub is_favourite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// 来源文件路径，不参与序列化
    #[serde(skip)]
    pub file_path: Option<String>,
}

impl QuestionPaper {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
            ..Default::default()
        }
    }

    /// 从原始 JSON 解析试卷
    ///
    /// 逐题检查 `questionType`，遇到未知题型时报告其位置
    pub fn from_value(value: serde_json::Value) -> AppResult<Self> {
        if let Some(questions) = value.get("questions").and_then(|q| q.as_array()) {
            for (index, question) in questions.iter().enumerate() {
                check_question_type(question).map_err(|source| AppError::Question {
                    index,
                    source,
                })?;
            }
        }
        serde_json::from_value(value).map_err(|e| {
            AppError::Evaluation(EvaluationError::MalformedQuestion {
                message: e.to_string(),
            })
        })
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }

    /// 报告文件名：优先使用来源文件名（含扩展名，避免 `w.toml` 与 `w.json` 冲突），否则使用标题
    pub fn report_stem(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(|p| Path::new(p).file_name())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.title.clone())
    }
}
