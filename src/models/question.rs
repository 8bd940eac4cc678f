//! 题目数据模型
//!
//! 题目按 `questionType` 区分为不同的变体，每个变体只携带与自身题型相关的
//! 选项集合或答案字段，校验与评分键构建都对其做穷尽匹配。

use crate::error::EvaluationError;
use crate::models::option::{deserialize_optional_id, QuestionOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 题型枚举，字符串字面量与后端保持一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// 单选题
    Mcqs,
    /// 多选题
    Mcqm,
    /// 阅读理解单选题
    Cmcqs,
    /// 阅读理解多选题
    Cmcqm,
    /// 判断题
    TrueFalse,
    /// 数值题
    Numeric,
    /// 阅读理解数值题
    Cnumeric,
    /// 单词填空题
    OneWord,
    /// 简答题
    LongAnswer,
}

static QUESTION_TYPES: phf::Map<&'static str, QuestionType> = phf::phf_map! {
    "MCQS" => QuestionType::Mcqs,
    "MCQM" => QuestionType::Mcqm,
    "CMCQS" => QuestionType::Cmcqs,
    "CMCQM" => QuestionType::Cmcqm,
    "TRUE_FALSE" => QuestionType::TrueFalse,
    "NUMERIC" => QuestionType::Numeric,
    "CNUMERIC" => QuestionType::Cnumeric,
    "ONE_WORD" => QuestionType::OneWord,
    "LONG_ANSWER" => QuestionType::LongAnswer,
};

impl QuestionType {
    /// 全部题型，按后端定义的顺序
    pub const ALL: [QuestionType; 9] = [
        QuestionType::Mcqs,
        QuestionType::Mcqm,
        QuestionType::Cmcqs,
        QuestionType::Cmcqm,
        QuestionType::TrueFalse,
        QuestionType::Numeric,
        QuestionType::Cnumeric,
        QuestionType::OneWord,
        QuestionType::LongAnswer,
    ];

    /// 从线上字面量解析题型
    pub fn from_wire(value: &str) -> Result<Self, EvaluationError> {
        QUESTION_TYPES
            .get(value)
            .copied()
            .ok_or_else(|| EvaluationError::UnsupportedQuestionType {
                question_type: value.to_string(),
            })
    }

    /// 线上字面量
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Mcqs => "MCQS",
            QuestionType::Mcqm => "MCQM",
            QuestionType::Cmcqs => "CMCQS",
            QuestionType::Cmcqm => "CMCQM",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::Numeric => "NUMERIC",
            QuestionType::Cnumeric => "CNUMERIC",
            QuestionType::OneWord => "ONE_WORD",
            QuestionType::LongAnswer => "LONG_ANSWER",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 数值答案的取值约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumericType {
    SingleDigitNonNegativeInteger,
    Integer,
    PositiveInteger,
    Decimal,
}

impl NumericType {
    pub fn as_str(self) -> &'static str {
        match self {
            NumericType::SingleDigitNonNegativeInteger => "SINGLE_DIGIT_NON_NEGATIVE_INTEGER",
            NumericType::Integer => "INTEGER",
            NumericType::PositiveInteger => "POSITIVE_INTEGER",
            NumericType::Decimal => "DECIMAL",
        }
    }

    /// 判断单个数值是否满足该约束
    pub fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let is_integer = value.fract() == 0.0;
        match self {
            NumericType::SingleDigitNonNegativeInteger => is_integer && (0.0..=9.0).contains(&value),
            NumericType::Integer => is_integer,
            NumericType::PositiveInteger => is_integer && value > 0.0,
            NumericType::Decimal => true,
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 所有题型共有的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBase {
    /// 已持久化题目的ID，新建题目为空
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// 题干（富文本）
    #[serde(default)]
    pub question_name: String,

    /// 解析（富文本）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// 阅读理解材料，多道题共享
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_rich_text_content: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,

    /// 难度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reattempt_count: Option<u32>,
}

impl QuestionBase {
    pub fn named(question_name: impl Into<String>) -> Self {
        Self {
            question_name: question_name.into(),
            ..Default::default()
        }
    }
}

/// 数值题答案
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericAnswer {
    #[serde(default)]
    pub valid_answers: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_type: Option<NumericType>,

    /// 显示精度
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
}

/// 题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "questionType")]
pub enum Question {
    #[serde(rename = "MCQS", rename_all = "camelCase")]
    Mcqs {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        single_choice_options: Vec<QuestionOption>,
    },
    #[serde(rename = "MCQM", rename_all = "camelCase")]
    Mcqm {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        multiple_choice_options: Vec<QuestionOption>,
    },
    #[serde(rename = "CMCQS", rename_all = "camelCase")]
    Cmcqs {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        csingle_choice_options: Vec<QuestionOption>,
    },
    #[serde(rename = "CMCQM", rename_all = "camelCase")]
    Cmcqm {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        cmultiple_choice_options: Vec<QuestionOption>,
    },
    #[serde(rename = "TRUE_FALSE", rename_all = "camelCase")]
    TrueFalse {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        true_false_options: Vec<QuestionOption>,
    },
    #[serde(rename = "NUMERIC", rename_all = "camelCase")]
    Numeric {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(flatten)]
        answer: NumericAnswer,
    },
    #[serde(rename = "CNUMERIC", rename_all = "camelCase")]
    Cnumeric {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(flatten)]
        answer: NumericAnswer,
    },
    #[serde(rename = "ONE_WORD", rename_all = "camelCase")]
    OneWord {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        subjective_answer_text: String,
    },
    #[serde(rename = "LONG_ANSWER", rename_all = "camelCase")]
    LongAnswer {
        #[serde(flatten)]
        base: QuestionBase,
        #[serde(default)]
        subjective_answer_text: String,
    },
}

/// 选择题的选中规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRule {
    ExactlyOne,
    AtLeastOne,
}

/// 选择题的选项集合视图
#[derive(Debug, Clone, Copy)]
pub struct ChoiceSpec<'a> {
    /// 选项集合的字段名
    pub field: &'static str,
    pub options: &'a [QuestionOption],
    /// 要求的选项数量
    pub expected_count: usize,
    pub rule: SelectionRule,
}

/// 题目答案部分的统一视图
#[derive(Debug, Clone, Copy)]
pub enum AnswerSpec<'a> {
    Choice(ChoiceSpec<'a>),
    Numeric(&'a NumericAnswer),
    Subjective(&'a str),
}

const CHOICE_OPTION_COUNT: usize = 4;
const TRUE_FALSE_OPTION_COUNT: usize = 2;

fn empty_options(count: usize) -> Vec<QuestionOption> {
    vec![QuestionOption::default(); count]
}

impl Question {
    /// 创建空白题目，选项位按题型预先填充
    pub fn template(question_type: QuestionType) -> Self {
        let base = QuestionBase::default();
        match question_type {
            QuestionType::Mcqs => Question::Mcqs {
                base,
                single_choice_options: empty_options(CHOICE_OPTION_COUNT),
            },
            QuestionType::Mcqm => Question::Mcqm {
                base,
                multiple_choice_options: empty_options(CHOICE_OPTION_COUNT),
            },
            QuestionType::Cmcqs => Question::Cmcqs {
                base,
                csingle_choice_options: empty_options(CHOICE_OPTION_COUNT),
            },
            QuestionType::Cmcqm => Question::Cmcqm {
                base,
                cmultiple_choice_options: empty_options(CHOICE_OPTION_COUNT),
            },
            QuestionType::TrueFalse => Question::TrueFalse {
                base,
                true_false_options: empty_options(TRUE_FALSE_OPTION_COUNT),
            },
            QuestionType::Numeric => Question::Numeric {
                base,
                answer: NumericAnswer::default(),
            },
            QuestionType::Cnumeric => Question::Cnumeric {
                base,
                answer: NumericAnswer::default(),
            },
            QuestionType::OneWord => Question::OneWord {
                base,
                subjective_answer_text: String::new(),
            },
            QuestionType::LongAnswer => Question::LongAnswer {
                base,
                subjective_answer_text: String::new(),
            },
        }
    }

    /// 从原始 JSON 记录解析题目
    ///
    /// 先检查 `questionType`，未知题型直接返回 `UnsupportedQuestionType`
    pub fn from_value(value: serde_json::Value) -> Result<Self, EvaluationError> {
        check_question_type(&value)?;
        serde_json::from_value(value).map_err(|e| EvaluationError::MalformedQuestion {
            message: e.to_string(),
        })
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::Mcqs { .. } => QuestionType::Mcqs,
            Question::Mcqm { .. } => QuestionType::Mcqm,
            Question::Cmcqs { .. } => QuestionType::Cmcqs,
            Question::Cmcqm { .. } => QuestionType::Cmcqm,
            Question::TrueFalse { .. } => QuestionType::TrueFalse,
            Question::Numeric { .. } => QuestionType::Numeric,
            Question::Cnumeric { .. } => QuestionType::Cnumeric,
            Question::OneWord { .. } => QuestionType::OneWord,
            Question::LongAnswer { .. } => QuestionType::LongAnswer,
        }
    }

    pub fn base(&self) -> &QuestionBase {
        match self {
            Question::Mcqs { base, .. }
            | Question::Mcqm { base, .. }
            | Question::Cmcqs { base, .. }
            | Question::Cmcqm { base, .. }
            | Question::TrueFalse { base, .. }
            | Question::Numeric { base, .. }
            | Question::Cnumeric { base, .. }
            | Question::OneWord { base, .. }
            | Question::LongAnswer { base, .. } => base,
        }
    }

    pub fn base_mut(&mut self) -> &mut QuestionBase {
        match self {
            Question::Mcqs { base, .. }
            | Question::Mcqm { base, .. }
            | Question::Cmcqs { base, .. }
            | Question::Cmcqm { base, .. }
            | Question::TrueFalse { base, .. }
            | Question::Numeric { base, .. }
            | Question::Cnumeric { base, .. }
            | Question::OneWord { base, .. }
            | Question::LongAnswer { base, .. } => base,
        }
    }

    /// 答案部分的视图，决定走哪条校验分支
    pub fn answer(&self) -> AnswerSpec<'_> {
        match self {
            Question::Mcqs {
                single_choice_options,
                ..
            } => AnswerSpec::Choice(ChoiceSpec {
                field: "singleChoiceOptions",
                options: single_choice_options,
                expected_count: CHOICE_OPTION_COUNT,
                rule: SelectionRule::ExactlyOne,
            }),
            Question::Mcqm {
                multiple_choice_options,
                ..
            } => AnswerSpec::Choice(ChoiceSpec {
                field: "multipleChoiceOptions",
                options: multiple_choice_options,
                expected_count: CHOICE_OPTION_COUNT,
                rule: SelectionRule::AtLeastOne,
            }),
            Question::Cmcqs {
                csingle_choice_options,
                ..
            } => AnswerSpec::Choice(ChoiceSpec {
                field: "csingleChoiceOptions",
                options: csingle_choice_options,
                expected_count: CHOICE_OPTION_COUNT,
                rule: SelectionRule::ExactlyOne,
            }),
            Question::Cmcqm {
                cmultiple_choice_options,
                ..
            } => AnswerSpec::Choice(ChoiceSpec {
                field: "cmultipleChoiceOptions",
                options: cmultiple_choice_options,
                expected_count: CHOICE_OPTION_COUNT,
                rule: SelectionRule::AtLeastOne,
            }),
            Question::TrueFalse {
                true_false_options, ..
            } => AnswerSpec::Choice(ChoiceSpec {
                field: "trueFalseOptions",
                options: true_false_options,
                expected_count: TRUE_FALSE_OPTION_COUNT,
                rule: SelectionRule::ExactlyOne,
            }),
            Question::Numeric { answer, .. } | Question::Cnumeric { answer, .. } => {
                AnswerSpec::Numeric(answer)
            }
            Question::OneWord {
                subjective_answer_text,
                ..
            }
            | Question::LongAnswer {
                subjective_answer_text,
                ..
            } => AnswerSpec::Subjective(subjective_answer_text),
        }
    }

    /// 选择题的选项集合，非选择题返回 None
    pub fn options_mut(&mut self) -> Option<&mut Vec<QuestionOption>> {
        match self {
            Question::Mcqs {
                single_choice_options: options,
                ..
            }
            | Question::Mcqm {
                multiple_choice_options: options,
                ..
            }
            | Question::Cmcqs {
                csingle_choice_options: options,
                ..
            }
            | Question::Cmcqm {
                cmultiple_choice_options: options,
                ..
            }
            | Question::TrueFalse {
                true_false_options: options,
                ..
            } => Some(options),
            Question::Numeric { .. }
            | Question::Cnumeric { .. }
            | Question::OneWord { .. }
            | Question::LongAnswer { .. } => None,
        }
    }
}

/// 检查原始记录里的 `questionType` 是否为已知题型
pub(crate) fn check_question_type(value: &serde_json::Value) -> Result<QuestionType, EvaluationError> {
    match value.get("questionType") {
        Some(serde_json::Value::String(s)) => QuestionType::from_wire(s),
        Some(other) => Err(EvaluationError::UnsupportedQuestionType {
            question_type: other.to_string(),
        }),
        None => Err(EvaluationError::MissingQuestionType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_type_wire_literals() {
        for question_type in QuestionType::ALL {
            let encoded = serde_json::to_value(question_type).unwrap();
            assert_eq!(encoded, json!(question_type.as_str()));
            assert_eq!(QuestionType::from_wire(question_type.as_str()).unwrap(), question_type);
        }
    }

    #[test]
    fn test_unknown_question_type_is_rejected() {
        let err = QuestionType::from_wire("MATCHING").unwrap_err();
        assert!(err.to_string().contains("unsupported question type"));

        let err = Question::from_value(json!({ "questionType": "ESSAY", "questionName": "x" }))
            .unwrap_err();
        assert!(matches!(err, EvaluationError::UnsupportedQuestionType { .. }));

        let err = Question::from_value(json!({ "questionName": "x" })).unwrap_err();
        assert!(matches!(err, EvaluationError::MissingQuestionType));
    }

    #[test]
    fn test_parse_mcqs_ignores_foreign_collections() {
        let question = Question::from_value(json!({
            "questionType": "MCQS",
            "questionName": "<p>2+2=?</p>",
            "singleChoiceOptions": [
                { "id": 11, "name": "3", "isSelected": false },
                { "id": "o2", "name": "4", "isSelected": true }
            ],
            "multipleChoiceOptions": [{ "name": "ignored", "isSelected": true }],
            "tags": ["math", "easy"]
        }))
        .unwrap();

        assert_eq!(question.question_type(), QuestionType::Mcqs);
        assert_eq!(question.base().tags.len(), 2);
        match question.answer() {
            AnswerSpec::Choice(choice) => {
                assert_eq!(choice.field, "singleChoiceOptions");
                assert_eq!(choice.options.len(), 2);
                assert_eq!(choice.options[0].id.as_deref(), Some("11"));
                assert!(choice.options[1].is_selected);
            }
            other => panic!("期望选择题视图, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_parse_numeric_accepts_integer_literals() {
        let question = Question::from_value(json!({
            "questionType": "CNUMERIC",
            "questionName": "x",
            "validAnswers": [1, 2.5],
            "numericType": "DECIMAL",
            "decimals": 1
        }))
        .unwrap();

        match question.answer() {
            AnswerSpec::Numeric(answer) => {
                assert_eq!(answer.valid_answers, vec![1.0, 2.5]);
                assert_eq!(answer.numeric_type, Some(NumericType::Decimal));
                assert_eq!(answer.decimals, Some(1));
            }
            other => panic!("期望数值题视图, 实际: {:?}", other),
        }
    }

    #[test]
    fn test_template_prefills_option_slots() {
        for question_type in QuestionType::ALL {
            let question = Question::template(question_type);
            assert_eq!(question.question_type(), question_type);
            if let AnswerSpec::Choice(choice) = question.answer() {
                assert_eq!(choice.options.len(), choice.expected_count);
                assert!(choice.options.iter().all(|o| o.name.is_empty() && !o.is_selected));
            }
        }
        let mut tf = Question::template(QuestionType::TrueFalse);
        assert_eq!(tf.options_mut().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_serialize_keeps_tag_and_camel_case() {
        let mut question = Question::template(QuestionType::OneWord);
        question.base_mut().question_name = "Capital of France?".to_string();
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["questionType"], "ONE_WORD");
        assert_eq!(value["questionName"], "Capital of France?");
        assert_eq!(value["subjectiveAnswerText"], "");
    }

    #[test]
    fn test_numeric_type_predicates() {
        let single = NumericType::SingleDigitNonNegativeInteger;
        assert!([0.0, 5.0, 9.0].iter().all(|v| single.accepts(*v)));
        assert!(![-1.0, 10.0, 2.5].iter().any(|v| single.accepts(*v)));

        assert!(NumericType::Integer.accepts(-42.0));
        assert!(!NumericType::Integer.accepts(0.5));
        assert!(NumericType::PositiveInteger.accepts(1.0));
        assert!(!NumericType::PositiveInteger.accepts(0.0));
        assert!(NumericType::Decimal.accepts(-3.75));
        assert!(!NumericType::Decimal.accepts(f64::NAN));
        assert!(!NumericType::Decimal.accepts(f64::INFINITY));
    }
}
