use crate::error::{AppResult, ConfigError};
use crate::models::ExamMode;
use std::str::FromStr;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的试卷数量
    pub max_concurrent_papers: usize,
    /// 试卷文件（TOML/JSON）存放目录
    pub paper_folder: String,
    /// 检查报告输出目录
    pub report_folder: String,
    /// 考试模式，SURVEY 不要求正确答案
    pub exam_mode: ExamMode,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_papers: 16,
            paper_folder: "papers".to_string(),
            report_folder: "reports".to_string(),
            exam_mode: ExamMode::Exam,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

fn parse_env<T: FromStr>(var_name: &str, default: T, expected_type: &str) -> AppResult<T> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        let max_concurrent_papers: usize =
            parse_env("MAX_CONCURRENT_PAPERS", default.max_concurrent_papers, "usize")?;

        Ok(Self {
            max_concurrent_papers: max_concurrent_papers.max(1),
            paper_folder: std::env::var("PAPER_FOLDER").unwrap_or(default.paper_folder),
            report_folder: std::env::var("REPORT_FOLDER").unwrap_or(default.report_folder),
            exam_mode: std::env::var("EXAM_MODE")
                .map(ExamMode::from)
                .unwrap_or(default.exam_mode),
            verbose_logging: parse_env("VERBOSE_LOGGING", default.verbose_logging, "bool")?,
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: usize = parse_env("QPC_TEST_UNSET_VARIABLE", 7, "usize").unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_parse_env_reports_bad_value() {
        std::env::set_var("QPC_TEST_BAD_BOOL", "maybe");
        let err = parse_env("QPC_TEST_BAD_BOOL", false, "bool").unwrap_err();
        std::env::remove_var("QPC_TEST_BAD_BOOL");
        assert!(matches!(
            err,
            AppError::Config(ConfigError::EnvVarParseFailed { .. })
        ));
    }

    #[test]
    fn test_default_mode_is_exam() {
        assert_eq!(Config::default().exam_mode, ExamMode::Exam);
    }
}
