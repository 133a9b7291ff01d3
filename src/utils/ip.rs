//! IP 地址处理工具
//!
//! 扫码事件只保存客户端 IP 的 SHA-256 摘要：
//! - 优先取 X-Forwarded-For 的第一个地址（原始客户端）
//! - 其次 X-Real-IP
//! - 最后使用 TCP 对端地址

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;
use sha2::{Digest, Sha256};

/// 从 HttpRequest 提取客户端 IP
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
}

/// 从 HeaderMap 提取转发的 IP（X-Forwarded-For 或 X-Real-IP）
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

/// SHA-256（小写 hex），不加盐
pub fn hash_ip(ip: &str) -> String {
    let digest = Sha256::digest(ip.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// 提取并哈希客户端 IP，无法确定 IP 时返回 None
pub fn client_ip_hash(req: &HttpRequest) -> Option<String> {
    extract_client_ip(req).map(|ip| hash_ip(&ip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_first_entry() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .peer_addr("127.0.0.1:50000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .peer_addr("127.0.0.1:50000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("198.51.100.1"));
    }

    #[test]
    fn test_peer_addr_fallback() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:41234".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req).as_deref(), Some("192.0.2.10"));
    }

    #[test]
    fn test_no_ip_available() {
        let req = TestRequest::default().to_http_request();
        assert!(client_ip_hash(&req).is_none());
    }

    #[test]
    fn test_hash_ip_is_sha256_hex() {
        // sha256("127.0.0.1")
        assert_eq!(
            hash_ip("127.0.0.1"),
            "12ca17b49af2289436f303e0166030a21e525d266e209267433801a8fd4071a0"
        );
        assert_eq!(hash_ip("127.0.0.1"), hash_ip("127.0.0.1"));
        assert_ne!(hash_ip("127.0.0.1"), hash_ip("127.0.0.2"));
    }
}
