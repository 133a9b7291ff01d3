//! Service layer for business logic
//!
//! HTTP handlers stay thin: they parse input, call into these services and
//! map `QrLinkerError` to responses.

mod ai_config_service;
mod business_service;
pub mod draft;
mod platform;
pub mod qr;
mod redirect_engine;

pub use ai_config_service::*;
pub use business_service::*;
pub use platform::Platform;
pub use redirect_engine::*;
