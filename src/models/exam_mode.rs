use serde::{Deserialize, Serialize};
use std::fmt;

/// 试卷使用场景
///
/// 只有 `SURVEY` 会暂停"必须有正确答案"类规则，其余模式一律按考试处理
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExamMode {
    #[default]
    Exam,
    Survey,
    /// 其他模式（如 MOCK、PRACTICE），行为与考试一致
    Other(String),
}

impl ExamMode {
    /// 是否要求每道题都有正确答案
    pub fn requires_correct_answers(&self) -> bool {
        !matches!(self, ExamMode::Survey)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExamMode::Exam => "EXAM",
            ExamMode::Survey => "SURVEY",
            ExamMode::Other(mode) => mode,
        }
    }
}

impl From<&str> for ExamMode {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "EXAM" => ExamMode::Exam,
            "SURVEY" => ExamMode::Survey,
            _ => ExamMode::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for ExamMode {
    fn from(value: String) -> Self {
        ExamMode::from(value.as_str())
    }
}

impl From<ExamMode> for String {
    fn from(mode: ExamMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ExamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
