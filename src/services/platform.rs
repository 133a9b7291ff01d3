//! 平台注册表
//!
//! 固定的四个平台键，每个键对应商家记录中的一个 URL 字段。
//! 新增平台需要修改此枚举（以及迁移中的列），而不是数据。

use serde::Serialize;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::errors::{QrLinkerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
    Google,
}

impl Platform {
    /// 解析平台键（不区分大小写），不在注册表中返回 InvalidPlatform
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        Self::iter()
            .find(|p| p.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| QrLinkerError::invalid_platform(format!("Invalid platform: {}", key)))
    }

    /// 路由中使用的小写键
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Google => "google",
        }
    }

    /// 扫码事件 / 历史记录中使用的大写标签
    pub fn label(&self) -> String {
        self.key().to_ascii_uppercase()
    }

    /// 对应的商家 URL 列
    pub fn column(&self) -> migration::entities::business::Column {
        use migration::entities::business::Column;
        match self {
            Platform::Instagram => Column::InstagramUrl,
            Platform::Tiktok => Column::TiktokUrl,
            Platform::Youtube => Column::YoutubeUrl,
            Platform::Google => Column::GoogleReviewUrl,
        }
    }

    pub fn all() -> impl Iterator<Item = Platform> {
        Self::iter()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}
