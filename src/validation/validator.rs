//! 题目校验
//!
//! 纯函数：不报错、不产生副作用，一次返回题目的全部问题。
//! 检查顺序：题干 → 结构规则 → 数值约束 → 正确答案规则（SURVEY 模式跳过）。

use crate::models::{
    AnswerSpec, ChoiceSpec, ExamMode, NumericAnswer, Question, QuestionPaper, SelectionRule,
};
use crate::utils::html::is_blank_rich_text;
use crate::validation::issue::{FieldPath, Issue};

pub const QUESTION_NAME_REQUIRED: &str = "question name is required";
pub const OPTIONS_REQUIRED: &str = "must have options";
pub const OPTION_TEXT_REQUIRED: &str = "option text is required";
pub const EXACTLY_ONE_SELECTED: &str = "must have exactly one option selected";
pub const AT_LEAST_ONE_SELECTED: &str = "must have at least one option selected";
pub const AT_LEAST_ONE_VALID_ANSWER: &str = "must have at least one valid answer";
pub const ANSWER_TEXT_REQUIRED: &str = "must have an answer";

/// 校验单道题
pub fn validate(question: &Question, exam_mode: &ExamMode) -> Vec<Issue> {
    let mut issues = Vec::new();

    if is_blank_rich_text(&question.base().question_name) {
        issues.push(Issue::new(
            FieldPath::field("questionName"),
            QUESTION_NAME_REQUIRED,
        ));
    }

    let check_correctness = exam_mode.requires_correct_answers();
    match question.answer() {
        AnswerSpec::Choice(choice) => validate_choice(&choice, check_correctness, &mut issues),
        AnswerSpec::Numeric(answer) => validate_numeric(answer, check_correctness, &mut issues),
        AnswerSpec::Subjective(text) => {
            if check_correctness && is_blank_rich_text(text) {
                issues.push(Issue::new(
                    FieldPath::field("subjectiveAnswerText"),
                    ANSWER_TEXT_REQUIRED,
                ));
            }
        }
    }

    issues
}

fn validate_choice(choice: &ChoiceSpec<'_>, check_correctness: bool, issues: &mut Vec<Issue>) {
    let field = FieldPath::field(choice.field);

    // 没有选项时只报一条，后续检查全部跳过
    if choice.options.is_empty() {
        issues.push(Issue::new(field, OPTIONS_REQUIRED));
        return;
    }

    if choice.options.len() != choice.expected_count {
        issues.push(Issue::new(
            field.clone(),
            format!("must have exactly {} options", choice.expected_count),
        ));
    }

    for (index, option) in choice.options.iter().enumerate() {
        if is_blank_rich_text(&option.name) {
            issues.push(Issue::new(
                field.clone().index(index).key("name"),
                OPTION_TEXT_REQUIRED,
            ));
        }
    }

    if !check_correctness {
        return;
    }

    let selected = choice.options.iter().filter(|o| o.is_selected).count();
    match choice.rule {
        SelectionRule::ExactlyOne if selected != 1 => {
            issues.push(Issue::new(field, EXACTLY_ONE_SELECTED));
        }
        SelectionRule::AtLeastOne if selected == 0 => {
            issues.push(Issue::new(field, AT_LEAST_ONE_SELECTED));
        }
        _ => {}
    }
}

fn validate_numeric(answer: &NumericAnswer, check_correctness: bool, issues: &mut Vec<Issue>) {
    if let Some(numeric_type) = answer.numeric_type {
        if answer.valid_answers.iter().any(|v| !numeric_type.accepts(*v)) {
            issues.push(Issue::new(
                FieldPath::field("validAnswers"),
                format!("every valid answer must be {}", numeric_type.as_str()),
            ));
        }
    }

    if check_correctness && answer.valid_answers.is_empty() {
        issues.push(Issue::new(
            FieldPath::field("validAnswers"),
            AT_LEAST_ONE_VALID_ANSWER,
        ));
    }
}

/// 校验整张试卷，路径加上 `questions.<序号>` 前缀
pub fn validate_paper(paper: &QuestionPaper, exam_mode: &ExamMode) -> Vec<Issue> {
    paper
        .questions
        .iter()
        .enumerate()
        .flat_map(|(index, question)| {
            let prefix = FieldPath::field("questions").index(index);
            validate(question, exam_mode)
                .into_iter()
                .map(move |issue| Issue::new(issue.path.prefixed(&prefix), issue.message))
        })
        .collect()
}
