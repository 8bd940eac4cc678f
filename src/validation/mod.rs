//! 题目校验层
//!
//! - `Issue` / `FieldPath` - 字段级校验问题
//! - `validate` - 单题校验，考试模式作为显式参数传入
//! - `validate_paper` - 整卷校验

pub mod issue;
pub mod validator;

pub use issue::{FieldPath, Issue, PathSegment};
pub use validator::{validate, validate_paper};
