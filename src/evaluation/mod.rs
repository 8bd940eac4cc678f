//! 评分键层
//!
//! - `option_key` - 选项标识（ID 优先，缺失时退回下标）
//! - `build_evaluation_key` - 构建评分引擎使用的记录

pub mod builder;
pub mod option_key;
pub mod record;

pub use builder::{
    build_evaluation_key, build_evaluation_key_from_value, correct_option_keys, evaluation_key_for,
};
pub use option_key::{option_key, OptionKey};
pub use record::{EvaluationAnswer, EvaluationKeyRecord, EvaluationOption};
