//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::QrLinkerError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 商家 / 平台错误
/// - 4000-4099: 二维码错误
/// - 5000-5099: 存储错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    ValidationFailed = 1002,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 商家 / 平台错误 3000-3099
    BusinessNotFound = 3000,
    InvalidPlatform = 3001,

    // 二维码错误 4000-4099
    QrEncodingFailed = 4000,

    // 存储错误 5000-5099
    DatabaseError = 5000,
}

impl From<&QrLinkerError> for ErrorCode {
    fn from(err: &QrLinkerError) -> Self {
        match err {
            QrLinkerError::Validation(_) => ErrorCode::ValidationFailed,
            QrLinkerError::NotFound(_) => ErrorCode::BusinessNotFound,
            QrLinkerError::InvalidPlatform(_) => ErrorCode::InvalidPlatform,
            QrLinkerError::QrEncoding(_) => ErrorCode::QrEncodingFailed,
            QrLinkerError::DatabaseConfig(_)
            | QrLinkerError::DatabaseConnection(_)
            | QrLinkerError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            QrLinkerError::Serialization(_) | QrLinkerError::FileOperation(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::Success).unwrap(), "0");
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidPlatform).unwrap(),
            "3001"
        );
    }

    #[test]
    fn test_from_error() {
        assert_eq!(
            ErrorCode::from(&QrLinkerError::not_found("x")),
            ErrorCode::BusinessNotFound
        );
        assert_eq!(
            ErrorCode::from(&QrLinkerError::database_operation("x")),
            ErrorCode::DatabaseError
        );
    }
}
