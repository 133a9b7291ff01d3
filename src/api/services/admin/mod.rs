//! Admin API 模块
//!
//! 管理端表单处理与视图，以及公共的响应信封 / 错误码。

mod ai_settings;
mod business;
pub mod error_code;
pub mod helpers;
pub mod routes;
pub mod types;

pub use error_code::ErrorCode;
pub use helpers::{api_result, error_from_qrlinker, success_response};
pub use types::*;
