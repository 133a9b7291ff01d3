//! QR issuance
//!
//! 二维码内容只由 (base_url, slug, platform) 决定，渲染参数固定：
//! 纠错等级 M、2 模块边距、800×800 灰度 PNG。相同输入得到逐字节相同的输出。

use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};
use tracing::trace;

use crate::errors::Result;
use crate::services::Platform;

pub const QR_SIZE: u32 = 800;
pub const QR_MARGIN: usize = 2;
pub const QR_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// 平台重定向地址 `{base}/r/{slug}/{platform}`
pub fn redirect_url(base_url: &str, slug: &str, platform: Platform) -> String {
    format!(
        "{}/r/{}/{}",
        base_url.trim_end_matches('/'),
        slug,
        platform.key()
    )
}

/// AI 评价表单地址 `{base}/ai-review/{slug}?platform={platform}`
pub fn ai_review_url(base_url: &str, slug: &str, platform: &str) -> String {
    format!(
        "{}/ai-review/{}?platform={}",
        base_url.trim_end_matches('/'),
        slug,
        urlencoding::encode(&platform.to_lowercase())
    )
}

/// 站内二维码图片路径
pub fn qr_image_path(slug: &str, platform: Platform) -> String {
    format!("/qr/{}/{}.png", slug, platform.key())
}

pub fn ai_qr_image_path(slug: &str, platform: &str) -> String {
    format!(
        "/qr/ai/{}/{}.png",
        slug,
        urlencoding::encode(&platform.to_lowercase())
    )
}

/// 平台二维码
pub fn render_platform_qr(base_url: &str, slug: &str, platform: Platform) -> Result<Vec<u8>> {
    render_qr_png(&redirect_url(base_url, slug, platform))
}

/// AI 海报二维码
pub fn render_ai_qr(base_url: &str, slug: &str, platform: &str) -> Result<Vec<u8>> {
    render_qr_png(&ai_review_url(base_url, slug, platform))
}

/// 将任意文本编码为固定尺寸的 PNG
///
/// 数据超出容量时返回 QrEncoding 错误。
pub fn render_qr_png(data: &str) -> Result<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
    let width = code.width();
    let colors = code.to_colors();
    let total = width + 2 * QR_MARGIN;

    // 每个像素映射到所在模块
    let module_at = |px: u32| px as usize * total / QR_SIZE as usize;
    let img = ImageBuffer::from_fn(QR_SIZE, QR_SIZE, |x, y| {
        let (mx, my) = (module_at(x), module_at(y));
        let inside = (QR_MARGIN..QR_MARGIN + width).contains(&mx)
            && (QR_MARGIN..QR_MARGIN + width).contains(&my);
        let dark = inside && colors[(my - QR_MARGIN) * width + (mx - QR_MARGIN)] == Color::Dark;
        Luma([if dark { 0u8 } else { 255u8 }])
    });

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img).write_to(&mut buf, ImageFormat::Png)?;
    let bytes = buf.into_inner();

    trace!("Rendered QR ({} modules, {} bytes) for {}", width, bytes.len(), data);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::QrLinkerError;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_redirect_url() {
        assert_eq!(
            redirect_url("https://qr.example.com/", "joes-cafe", Platform::Google),
            "https://qr.example.com/r/joes-cafe/google"
        );
        assert_eq!(
            redirect_url("http://localhost:3000", "joes-cafe", Platform::Tiktok),
            "http://localhost:3000/r/joes-cafe/tiktok"
        );
    }

    #[test]
    fn test_ai_review_url_encodes_platform() {
        assert_eq!(
            ai_review_url("http://localhost:3000", "joes-cafe", "Google"),
            "http://localhost:3000/ai-review/joes-cafe?platform=google"
        );
        assert_eq!(
            ai_review_url("http://localhost:3000", "joes-cafe", "trip advisor"),
            "http://localhost:3000/ai-review/joes-cafe?platform=trip%20advisor"
        );
    }

    #[test]
    fn test_render_is_deterministic_png() {
        let a = render_platform_qr("http://localhost:3000", "joes-cafe", Platform::Instagram)
            .unwrap();
        let b = render_platform_qr("http://localhost:3000", "joes-cafe", Platform::Instagram)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], &PNG_MAGIC);

        let other =
            render_platform_qr("http://localhost:3000", "joes-cafe", Platform::Youtube).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_render_dimensions() {
        let bytes = render_ai_qr("http://localhost:3000", "joes-cafe", "google").unwrap();
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(img.width(), QR_SIZE);
        assert_eq!(img.height(), QR_SIZE);

        // 边距为白色
        let gray = img.to_luma8();
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(QR_SIZE - 1, QR_SIZE - 1).0[0], 255);
    }

    #[test]
    fn test_oversized_payload_fails() {
        let data = "x".repeat(5000);
        let err = render_qr_png(&data).unwrap_err();
        assert!(matches!(err, QrLinkerError::QrEncoding(_)));
    }
}
