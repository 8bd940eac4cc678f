pub mod exam_mode;
pub mod loaders;
pub mod option;
pub mod paper;
pub mod question;

pub use exam_mode::ExamMode;
pub use loaders::{load_all_papers, load_question_paper};
pub use option::{set_single_selection, toggle_selection, QuestionOption};
pub use paper::{DisplayLabels, QuestionPaper};
pub use question::{
    AnswerSpec, ChoiceSpec, NumericAnswer, NumericType, Question, QuestionBase, QuestionType,
    SelectionRule,
};
