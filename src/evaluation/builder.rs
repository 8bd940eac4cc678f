//! 评分键构建
//!
//! 把校验通过的题目和正确答案转换成评分引擎使用的记录。

use crate::error::EvaluationError;
use crate::evaluation::option_key::{option_key, OptionKey};
use crate::evaluation::record::{EvaluationAnswer, EvaluationKeyRecord, EvaluationOption};
use crate::models::{AnswerSpec, Question};
use crate::utils::html::strip_paragraph_wrapper;
use std::collections::HashSet;
use tracing::debug;

/// 构建评分键
///
/// # 参数
/// - `question`: 题目
/// - `correct_option_ids`: 正确选项的标识，仅选择题使用
/// - `valid_answers`: 数值题答案，为 `None` 时取题目自身的答案
/// - `subjective_answer_text`: 主观题答案，为 `None` 时取题目自身的答案
///
/// # 错误
/// 正确选项标识不在题目选项中时返回 `UnknownOption`
pub fn build_evaluation_key(
    question: &Question,
    correct_option_ids: &[OptionKey],
    valid_answers: Option<&[f64]>,
    subjective_answer_text: Option<&str>,
) -> Result<EvaluationKeyRecord, EvaluationError> {
    let answer = match question.answer() {
        AnswerSpec::Choice(choice) => {
            let options: Vec<EvaluationOption> = choice
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| EvaluationOption {
                    id: option_key(option, index),
                    display_text: strip_paragraph_wrapper(&option.name),
                    explanation_text: option.explanation.clone(),
                })
                .collect();

            let known: HashSet<&OptionKey> = options.iter().map(|o| &o.id).collect();
            if let Some(unknown) = correct_option_ids.iter().find(|key| !known.contains(key)) {
                return Err(EvaluationError::UnknownOption {
                    key: unknown.clone(),
                });
            }

            // 按选项顺序输出，重复的ID只保留一次
            let correct: HashSet<&OptionKey> = correct_option_ids.iter().collect();
            let mut seen = HashSet::new();
            let correct_options = options
                .iter()
                .filter(|o| correct.contains(&o.id) && seen.insert(&o.id))
                .map(|o| o.id.clone())
                .collect();

            EvaluationAnswer::Choice {
                options,
                correct_options,
            }
        }
        AnswerSpec::Numeric(numeric) => EvaluationAnswer::Numeric {
            valid_answers: valid_answers
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| numeric.valid_answers.clone()),
            numeric_type: numeric.numeric_type,
            decimals: numeric.decimals,
        },
        AnswerSpec::Subjective(text) => EvaluationAnswer::Subjective {
            subjective_answer_text: subjective_answer_text.unwrap_or(text).to_string(),
        },
    };

    debug!(
        "构建评分键: 题型 {} | 题目ID {:?}",
        question.question_type(),
        question.base().id
    );

    Ok(EvaluationKeyRecord {
        question_type: question.question_type(),
        question_id: question.base().id.clone(),
        answer,
    })
}

/// 题目中被标记为正确的选项标识，非选择题返回空集合
pub fn correct_option_keys(question: &Question) -> Vec<OptionKey> {
    match question.answer() {
        AnswerSpec::Choice(choice) => choice
            .options
            .iter()
            .enumerate()
            .filter(|(_, option)| option.is_selected)
            .map(|(index, option)| option_key(option, index))
            .collect(),
        AnswerSpec::Numeric(_) | AnswerSpec::Subjective(_) => Vec::new(),
    }
}

/// 直接用题目自身的答案构建评分键
pub fn evaluation_key_for(question: &Question) -> Result<EvaluationKeyRecord, EvaluationError> {
    build_evaluation_key(question, &correct_option_keys(question), None, None)
}

/// 从原始记录构建评分键，未知题型在这里快速失败
pub fn build_evaluation_key_from_value(
    value: serde_json::Value,
    correct_option_ids: &[OptionKey],
    valid_answers: Option<&[f64]>,
    subjective_answer_text: Option<&str>,
) -> Result<EvaluationKeyRecord, EvaluationError> {
    let question = Question::from_value(value)?;
    build_evaluation_key(&question, correct_option_ids, valid_answers, subjective_answer_text)
}
