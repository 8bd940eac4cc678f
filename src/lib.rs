//! # Question Paper Check
//!
//! 试卷题目校验与自动评分键生成
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 题目、选项、试卷、考试模式
//! - `Question` - 按题型区分的变体，每个变体只携带自己的选项集合或答案
//! - `loaders` - 从 TOML / JSON 文件加载试卷
//!
//! ### ② 校验（Validation）
//! - `validate` - 单题校验，返回全部字段级问题，不报错
//! - `validate_paper` - 整卷校验
//!
//! ### ③ 评分键（Evaluation）
//! - `build_evaluation_key` - 构建评分引擎使用的记录
//! - `option_key` - 选项标识，没有ID时退回下标
//!
//! ### ④ 服务与编排（Services / App）
//! - `PaperService` - 检查整张试卷，生成报告
//! - `ReportWriter` - 写报告文件
//! - `App` - 批量扫描目录、分批并发检查
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod validation;

// 重新导出常用类型
pub use app::{App, ProcessingStats};
pub use config::Config;
pub use error::{AppError, AppResult, EvaluationError};
pub use evaluation::{
    build_evaluation_key, correct_option_keys, option_key, EvaluationKeyRecord, OptionKey,
};
pub use models::{
    set_single_selection, ExamMode, NumericType, Question, QuestionOption, QuestionPaper,
    QuestionType,
};
pub use services::{PaperReport, PaperService};
pub use validation::{validate, validate_paper, Issue};
