//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use serde::Serialize;
use tracing::error;

use crate::config::get_config;
use crate::errors::QrLinkerError;
use crate::services::{Platform, qr};
use crate::storage::Business;

use super::error_code::ErrorCode;
use super::types::{ApiResponse, PlatformLinkView};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 QrLinkerError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_qrlinker(err: &QrLinkerError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{}", err.format_simple());
    }
    error_response(status, ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 QrLinkerError。
pub fn api_result<T: Serialize>(result: Result<T, QrLinkerError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(err) => error_from_qrlinker(&err),
    }
}

/// 表单提交成功后的 302 跳转
pub fn redirect_to(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.as_ref()))
        .finish()
}

/// 表单提交：成功跳转，失败返回错误信封
pub fn form_result<T>(result: Result<T, QrLinkerError>, location: impl FnOnce(T) -> String) -> HttpResponse {
    match result {
        Ok(value) => redirect_to(location(value)),
        Err(err) => error_from_qrlinker(&err),
    }
}

/// 商家已配置平台的链接与二维码路径
pub fn platform_links(business: &Business, only_active: bool) -> Vec<PlatformLinkView> {
    let config = get_config();
    Platform::all()
        .filter(|p| !only_active || business.url_for(*p).is_some())
        .map(|p| PlatformLinkView {
            platform: p,
            target_url: business.url_for(p).map(str::to_string),
            redirect_url: qr::redirect_url(config.base_url(), &business.slug, p),
            qr_path: qr::qr_image_path(&business.slug, p),
        })
        .collect()
}
