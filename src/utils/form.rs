//! 表单字段规范化工具
//!
//! 管理端表单中的所有自由文本/URL 字段都经过 [`normalize`]：
//! 去除首尾空白，空串视为"未设置"。

use serde::Deserialize;

/// 去除首尾空白，空串返回 None
pub fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 复选框 / 开关字段解析
///
/// 接受 "1" / "on" / "true"（不区分大小写）为 true，其余一律 false。
pub fn is_on(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        v == "1" || v.eq_ignore_ascii_case("on") || v.eq_ignore_ascii_case("true")
    })
}

/// 原始表单键值对，允许同名字段重复出现
///
/// 文本字段取最后一次出现的值；开关字段任一值为真即为真，
/// 兼容 `showLogo=0&showLogo=on` 这种 hidden + checkbox 写法。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct FormValues(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormValues {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormValues {
    fn values<'a>(&'a self, key: &'a str) -> impl DoubleEndedIterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 最后一次出现的原始值
    pub fn last(&self, key: &str) -> Option<String> {
        self.values(key).next_back().map(str::to_string)
    }

    /// 字段未出现为 None，否则任一值通过 [`is_on`] 即为 true
    pub fn flag(&self, key: &str) -> Option<bool> {
        let mut values = self.values(key).peekable();
        values.peek()?;
        Some(values.any(|v| is_on(Some(v))))
    }
}

/// 由名称生成 slug：小写化，非 [a-z0-9] 连续段折叠为单个 `-`，去掉首尾 `-`
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// 步骤文本块：按行拆分，trim，丢弃空行
pub fn split_steps(block: Option<&str>) -> Vec<String> {
    block
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// CTA 对齐方式，只允许 left / center / right，默认 left
pub fn cta_align(value: Option<&str>) -> &'static str {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("center") => "center",
        Some("right") => "right",
        _ => "left",
    }
}

/// 二维码排版方向，只允许 horizontal / vertical，默认 vertical
pub fn qr_layout(value: Option<&str>) -> &'static str {
    match value.map(str::trim) {
        Some("horizontal") => "horizontal",
        _ => "vertical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical_slug(s: &str) -> bool {
        !s.is_empty()
            && !s.starts_with('-')
            && !s.ends_with('-')
            && !s.contains("--")
            && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   \t ")), None);
        assert_eq!(
            normalize(Some("  https://instagram.com/joe  ")).as_deref(),
            Some("https://instagram.com/joe")
        );
    }

    #[test]
    fn test_is_on() {
        for v in ["1", "on", "ON", "true", "True", " on "] {
            assert!(is_on(Some(v)), "{v} should be on");
        }
        for v in ["0", "off", "false", "yes", ""] {
            assert!(!is_on(Some(v)), "{v} should be off");
        }
        assert!(!is_on(None));
    }

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_form_values_last_wins() {
        let values = form(&[("name", "Joe"), ("color", "#000"), ("name", "Joe's Cafe")]);
        assert_eq!(values.last("name").as_deref(), Some("Joe's Cafe"));
        assert_eq!(values.last("color").as_deref(), Some("#000"));
        assert_eq!(values.last("missing"), None);
    }

    #[test]
    fn test_form_values_flag_any_true() {
        let values = form(&[("showLogo", "0"), ("showLogo", "on"), ("llmEnabled", "0")]);
        assert_eq!(values.flag("showLogo"), Some(true));
        assert_eq!(values.flag("llmEnabled"), Some(false));
        assert_eq!(values.flag("enabled"), None);

        let reversed = form(&[("showLogo", "on"), ("showLogo", "0")]);
        assert_eq!(reversed.flag("showLogo"), Some(true));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Joe's Cafe"), "joe-s-cafe");
        assert_eq!(slugify("  --Hello,   World!!  "), "hello-world");
        assert_eq!(slugify("ABC 123"), "abc-123");
        assert_eq!(slugify("Café Olé"), "caf-ol");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_always_canonical() {
        let names = [
            "Joe's Cafe",
            "a",
            "  The  Best -- Pizza ",
            "100% Organic!",
            "x_y_z",
            "Ünïcödé Bar 2",
            "---lead and trail---",
        ];
        for name in names {
            let slug = slugify(name);
            assert!(is_canonical_slug(&slug), "{name:?} -> {slug:?}");
        }
    }

    #[test]
    fn test_split_steps() {
        let steps = split_steps(Some("  Scan the code \n\n\r\nLeave a review\n   \nShow staff  "));
        assert_eq!(steps, vec!["Scan the code", "Leave a review", "Show staff"]);
        assert!(split_steps(None).is_empty());
        assert!(split_steps(Some("\n \n")).is_empty());
    }

    #[test]
    fn test_cta_align_and_layout() {
        assert_eq!(cta_align(Some("CENTER")), "center");
        assert_eq!(cta_align(Some("right")), "right");
        assert_eq!(cta_align(Some("justify")), "left");
        assert_eq!(cta_align(None), "left");
        assert_eq!(qr_layout(Some("horizontal")), "horizontal");
        assert_eq!(qr_layout(Some("diagonal")), "vertical");
        assert_eq!(qr_layout(None), "vertical");
    }
}
