//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod api;
pub mod notify;

pub use api::*;
pub use notify::*;
