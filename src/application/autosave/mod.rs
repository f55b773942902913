//! Form Autosave - 表单草稿自动保存
//!
//! 输入停止一段时间后把表单快照写入注入的 KeyValueStorePort

mod form_autosave;

pub use form_autosave::{FormAutosave, DEFAULT_DEBOUNCE};
