/// 试卷检查服务
///
/// 逐题校验试卷，并为校验通过的题目构建评分键
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::evaluation::{evaluation_key_for, EvaluationKeyRecord};
use crate::models::{ExamMode, Question, QuestionPaper, QuestionType};
use crate::utils::html::strip_markup;
use crate::utils::logging::truncate_text;
use crate::validation::{validate, Issue};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// 题目处理上下文，仅用于日志
#[derive(Debug, Clone, Copy)]
struct QuestionCtx {
    paper_index: usize,
    /// 题目在试卷中的序号（从1开始）
    question_index: usize,
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[试卷 {} 题目#{}]", self.paper_index, self.question_index)
    }
}

/// 单题检查结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReport {
    /// 题目序号（从1开始）
    pub position: usize,
    pub question_type: QuestionType,
    /// 题干预览
    pub preview: String,
    pub issues: Vec<Issue>,
    /// 只有校验通过的题目才有评分键
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_key: Option<EvaluationKeyRecord>,
}

impl QuestionReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// 整卷检查结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperReport {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub exam_mode: ExamMode,
    pub checked_at: DateTime<Local>,
    pub questions: Vec<QuestionReport>,
}

impl PaperReport {
    pub fn is_valid(&self) -> bool {
        self.questions.iter().all(QuestionReport::is_valid)
    }

    pub fn issue_count(&self) -> usize {
        self.questions.iter().map(|q| q.issues.len()).sum()
    }

    pub fn invalid_question_count(&self) -> usize {
        self.questions.iter().filter(|q| !q.is_valid()).count()
    }
}

/// 试卷检查服务
#[derive(Debug, Clone)]
pub struct PaperService {
    exam_mode: ExamMode,
}

impl PaperService {
    /// 创建新的试卷检查服务
    pub fn new(config: &Config) -> Self {
        Self::with_mode(config.exam_mode.clone())
    }

    pub fn with_mode(exam_mode: ExamMode) -> Self {
        Self { exam_mode }
    }

    pub fn exam_mode(&self) -> &ExamMode {
        &self.exam_mode
    }

    /// 检查单个试卷
    ///
    /// # 参数
    /// - `paper`: 试卷数据
    /// - `paper_index`: 试卷索引（用于日志）
    pub fn check_paper(&self, paper: &QuestionPaper, paper_index: usize) -> AppResult<PaperReport> {
        info!(
            "[试卷 {}] 📄 开始检查: {} ({} 个{}, 模式 {})",
            paper_index,
            paper.title,
            paper.questions.len(),
            paper.labels.question_label(),
            self.exam_mode
        );

        let questions = paper
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let ctx = QuestionCtx {
                    paper_index,
                    question_index: i + 1,
                };
                self.check_question(question, ctx)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let report = PaperReport {
            title: paper.title.clone(),
            source: paper.file_path.clone(),
            exam_mode: self.exam_mode.clone(),
            checked_at: Local::now(),
            questions,
        };

        if report.is_valid() {
            info!("[试卷 {}] ✅ 全部 {} 题校验通过", paper_index, report.questions.len());
        } else {
            warn!(
                "[试卷 {}] ⚠️ {} 道题存在问题，共 {} 条",
                paper_index,
                report.invalid_question_count(),
                report.issue_count()
            );
        }

        Ok(report)
    }

    fn check_question(&self, question: &Question, ctx: QuestionCtx) -> AppResult<QuestionReport> {
        let preview = truncate_text(&strip_markup(&question.base().question_name), 40);
        debug!("{} {} | {}", ctx, question.question_type(), preview);

        let issues = validate(question, &self.exam_mode);
        for issue in &issues {
            warn!("{} {}", ctx, issue);
        }

        let evaluation_key = if issues.is_empty() {
            let key = evaluation_key_for(question).map_err(|source| AppError::Question {
                index: ctx.question_index - 1,
                source,
            })?;
            Some(key)
        } else {
            None
        };

        Ok(QuestionReport {
            position: ctx.question_index,
            question_type: question.question_type(),
            preview,
            issues,
            evaluation_key,
        })
    }
}
