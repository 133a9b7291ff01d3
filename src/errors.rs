use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum QrLinkerError {
    Validation(String),
    NotFound(String),
    InvalidPlatform(String),
    QrEncoding(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    FileOperation(String),
}

impl QrLinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            QrLinkerError::Validation(_) => "E001",
            QrLinkerError::NotFound(_) => "E002",
            QrLinkerError::InvalidPlatform(_) => "E003",
            QrLinkerError::QrEncoding(_) => "E004",
            QrLinkerError::DatabaseConfig(_) => "E005",
            QrLinkerError::DatabaseConnection(_) => "E006",
            QrLinkerError::DatabaseOperation(_) => "E007",
            QrLinkerError::Serialization(_) => "E008",
            QrLinkerError::FileOperation(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            QrLinkerError::Validation(_) => "Validation Error",
            QrLinkerError::NotFound(_) => "Resource Not Found",
            QrLinkerError::InvalidPlatform(_) => "Invalid Platform",
            QrLinkerError::QrEncoding(_) => "QR Encoding Error",
            QrLinkerError::DatabaseConfig(_) => "Database Configuration Error",
            QrLinkerError::DatabaseConnection(_) => "Database Connection Error",
            QrLinkerError::DatabaseOperation(_) => "Database Operation Error",
            QrLinkerError::Serialization(_) => "Serialization Error",
            QrLinkerError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            QrLinkerError::Validation(msg)
            | QrLinkerError::NotFound(msg)
            | QrLinkerError::InvalidPlatform(msg)
            | QrLinkerError::QrEncoding(msg)
            | QrLinkerError::DatabaseConfig(msg)
            | QrLinkerError::DatabaseConnection(msg)
            | QrLinkerError::DatabaseOperation(msg)
            | QrLinkerError::Serialization(msg)
            | QrLinkerError::FileOperation(msg) => msg,
        }
    }

    /// 映射为 HTTP 状态码
    ///
    /// 未分类的持久化错误一律 500，消息原样返回给调用方（仅管理端可见）。
    pub fn http_status(&self) -> StatusCode {
        match self {
            QrLinkerError::Validation(_) | QrLinkerError::InvalidPlatform(_) => {
                StatusCode::BAD_REQUEST
            }
            QrLinkerError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动日志）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for QrLinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for QrLinkerError {}

// 便捷的构造函数
impl QrLinkerError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::NotFound(msg.into())
    }

    pub fn invalid_platform<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::InvalidPlatform(msg.into())
    }

    pub fn qr_encoding<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::QrEncoding(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        QrLinkerError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for QrLinkerError {
    fn from(err: sea_orm::DbErr) -> Self {
        QrLinkerError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for QrLinkerError {
    fn from(err: std::io::Error) -> Self {
        QrLinkerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for QrLinkerError {
    fn from(err: serde_json::Error) -> Self {
        QrLinkerError::Serialization(err.to_string())
    }
}

impl From<qrcode::types::QrError> for QrLinkerError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrLinkerError::QrEncoding(err.to_string())
    }
}

impl From<image::ImageError> for QrLinkerError {
    fn from(err: image::ImageError) -> Self {
        QrLinkerError::QrEncoding(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QrLinkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            QrLinkerError::validation("name is required").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QrLinkerError::invalid_platform("myspace").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QrLinkerError::not_found("joes-cafe").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            QrLinkerError::qr_encoding("data too long").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            QrLinkerError::database_operation("disk I/O error").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = QrLinkerError::not_found("Business not found: joes-cafe");
        assert_eq!(
            err.to_string(),
            "Resource Not Found: Business not found: joes-cafe"
        );
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_db_err_conversion() {
        let err: QrLinkerError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, QrLinkerError::DatabaseOperation(_)));
        assert!(err.message().contains("boom"));
    }
}
