use crate::evaluation::OptionKey;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 评分键或题目契约错误
    #[error("题目错误: {0}")]
    Evaluation(#[from] EvaluationError),
    /// 试卷中某道题的契约错误
    #[error("第 {} 题: {source}", .index + 1)]
    Question {
        index: usize,
        #[source]
        source: EvaluationError,
    },
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 题目与评分键的契约错误
///
/// 这些都是调用方的编程错误，用户数据问题以 `Issue` 形式返回
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// 未知题型
    #[error("unsupported question type: {question_type}")]
    UnsupportedQuestionType { question_type: String },
    /// 缺少 questionType 字段
    #[error("unsupported question type: missing questionType")]
    MissingQuestionType,
    /// 题目记录结构错误
    #[error("malformed question record: {message}")]
    MalformedQuestion { message: String },
    /// 正确答案引用了不存在的选项
    #[error("correct option {key} does not match any option")]
    UnknownOption { key: OptionKey },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
