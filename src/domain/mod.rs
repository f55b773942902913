//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Generation Context: 书籍生成状态
//! - Mood Context: 写作心情与连续天数
//! - Project Context: 项目摘要
//!
//! 以及共享的表单草稿与校验

pub mod generation;
pub mod mood;
pub mod project;

mod form;

pub use form::{FormDraft, FormError};
