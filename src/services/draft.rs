//! Draft text generator
//!
//! 基于模板的评价草稿：评分分档 → 句子拼接 → 语气调整 → 长度截断。
//! 不调用任何外部模型。

use serde::Deserialize;
use serde_json::Value;

use crate::utils::form::normalize;

const STAR: char = '★';
const ELLIPSIS: char = '…';
const ENTHUSIASTIC_SUFFIX: &str = " Highly recommend!";

/// 语气，未识别的值不做任何变换
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Professional,
    Enthusiastic,
}

impl Tone {
    pub fn from_input(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "professional" => Tone::Professional,
            "enthusiastic" => Tone::Enthusiastic,
            _ => Tone::Plain,
        }
    }
}

/// 长度档位对应的字符上限：short 40 / medium 80 / long 140，其他 80
pub fn length_cap(value: &str) -> usize {
    match value.trim().to_ascii_lowercase().as_str() {
        "short" => 40,
        "medium" => 80,
        "long" => 140,
        _ => 80,
    }
}

const DEFAULT_TONE: &str = "friendly";
const DEFAULT_LENGTH: &str = "short";

/// 生成接口的请求体
///
/// 所有字段都按任意 JSON 值接收，数字或布尔值按文本拼接。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftRequest {
    /// 数字或字符串，无法解析或为 0 时按 5 处理
    pub rating: Value,
    pub order: Value,
    pub highlights: Value,
    pub tone: Value,
    pub length: Value,
    pub extras: Value,
}

impl DraftRequest {
    pub fn tone(&self) -> Tone {
        Tone::from_input(&field_text(&self.tone).unwrap_or_else(|| DEFAULT_TONE.to_string()))
    }

    pub fn length_cap(&self) -> usize {
        length_cap(&field_text(&self.length).unwrap_or_else(|| DEFAULT_LENGTH.to_string()))
    }
}

/// 请求字段转文本；null、对象与空白串视为未填写，数组以 ", " 连接
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => normalize(Some(s)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(field_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// 解析评分并限制在 1..=5
///
/// 字符串取前导整数部分；缺失、0 或无法解析时为 5。
pub fn parse_rating(value: &Value) -> u8 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };
    match parsed {
        None | Some(0) => 5,
        Some(r) => r.clamp(1, 5) as u8,
    }
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// 生成草稿
pub fn generate_draft(business_name: &str, req: &DraftRequest) -> String {
    let rating = parse_rating(&req.rating);
    let tone = req.tone();

    let bucket = match (rating, tone) {
        (4.., Tone::Professional) => "excellent",
        (4.., _) => "fantastic",
        (3, Tone::Professional) => "good",
        (3, _) => "solid",
        (_, Tone::Professional) => "adequate",
        _ => "mixed",
    };

    let mut parts = vec![format!(
        "I had a {} experience at {}.",
        bucket, business_name
    )];
    if let Some(order) = field_text(&req.order) {
        parts.push(format!("I ordered {}.", order));
    }
    if let Some(highlights) = field_text(&req.highlights) {
        parts.push(format!("{}.", highlights));
    }
    if let Some(extras) = field_text(&req.extras) {
        parts.push(format!("{}.", extras));
    }
    let stars: String = std::iter::repeat_n(STAR, rating as usize).collect();
    parts.push(format!("Overall: {}/{}.", stars, "★★★★★"));

    let mut text = parts.join(" ");
    if tone == Tone::Enthusiastic {
        text.push_str(ENTHUSIASTIC_SUFFIX);
    }

    truncate_at_word(&text, req.length_cap())
}

/// 超出上限时截断到最后一个完整单词并追加省略号，结果不超过 cap 个字符
fn truncate_at_word(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }

    let head: String = text.chars().take(cap.saturating_sub(1)).collect();
    let mut out = drop_last_word(&head).to_string();
    out.push(ELLIPSIS);
    out
}

/// 去掉最后一段空白及其后的残词；没有空白时原样返回
fn drop_last_word(s: &str) -> &str {
    let without_tail = s.trim_end_matches(|c: char| !c.is_whitespace());
    if without_tail.ends_with(char::is_whitespace) {
        without_tail.trim_end()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(rating: Value, tone: &str, length: &str) -> DraftRequest {
        DraftRequest {
            rating,
            tone: json!(tone),
            length: json!(length),
            ..Default::default()
        }
    }

    #[test]
    fn test_short_friendly_is_truncated() {
        let req = DraftRequest {
            order: json!("coffee"),
            ..request(json!(5), "friendly", "short")
        };
        let draft = generate_draft("Joe's Cafe", &req);
        assert_eq!(draft, "I had a fantastic experience at Joe's…");
        assert!(draft.chars().count() <= 40);
        assert!(draft.ends_with('…'));
    }

    #[test]
    fn test_long_includes_all_clauses() {
        let req = DraftRequest {
            rating: json!("3"),
            order: json!("a latte"),
            highlights: json!("Friendly staff"),
            extras: json!("Parking was easy"),
            tone: json!("friendly"),
            length: json!("long"),
        };
        let draft = generate_draft("Joe's Cafe", &req);
        assert_eq!(
            draft,
            "I had a solid experience at Joe's Cafe. I ordered a latte. Friendly staff. \
             Parking was easy. Overall: ★★★/★★★★★."
        );
    }

    #[test]
    fn test_professional_substitutes_bucket_word() {
        let cases = [(5, "excellent"), (3, "good"), (1, "adequate")];
        for (rating, word) in cases {
            let draft = generate_draft("Cafe", &request(json!(rating), "Professional", "long"));
            assert!(draft.starts_with(&format!("I had a {} experience", word)), "{draft}");
        }
    }

    #[test]
    fn test_enthusiastic_suffix_only_when_it_fits() {
        let long = generate_draft("Cafe", &request(json!(4), "enthusiastic", "long"));
        assert!(long.ends_with("Highly recommend!"));

        let short = generate_draft("Joe's Cafe", &request(json!(5), "enthusiastic", "short"));
        assert!(short.chars().count() <= 40);
        assert!(short.ends_with('…'));
        assert!(!short.contains("Highly recommend!"));
    }

    #[test]
    fn test_unknown_tone_and_length() {
        let draft = generate_draft("Cafe", &request(json!(2), "sarcastic", "epic"));
        assert_eq!(draft, "I had a mixed experience at Cafe. Overall: ★★/★★★★★.");
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(&json!(4)), 4);
        assert_eq!(parse_rating(&json!("2")), 2);
        assert_eq!(parse_rating(&json!("3 stars")), 3);
        assert_eq!(parse_rating(&json!(4.9)), 4);
        assert_eq!(parse_rating(&json!(9)), 5);
        assert_eq!(parse_rating(&json!(-2)), 1);
        assert_eq!(parse_rating(&json!(0)), 5);
        assert_eq!(parse_rating(&json!("great")), 5);
        assert_eq!(parse_rating(&Value::Null), 5);
    }

    #[test]
    fn test_drop_last_word() {
        assert_eq!(drop_last_word("I had a fantastic experience at Joe's C"), "I had a fantastic experience at Joe's");
        assert_eq!(drop_last_word("trailing   "), "trailing");
        assert_eq!(drop_last_word("oneword"), "oneword");
    }

    #[test]
    fn test_defaults() {
        let req: DraftRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(parse_rating(&req.rating), 5);
        assert_eq!(req.length_cap(), 40);
        assert_eq!(req.tone(), Tone::Plain);

        let blank: DraftRequest = serde_json::from_str(r#"{"length": "  ", "tone": null}"#).unwrap();
        assert_eq!(blank.length_cap(), 40);
    }

    #[test]
    fn test_non_string_fields_are_interpolated() {
        let req: DraftRequest = serde_json::from_str(
            r#"{"rating": 4, "order": 2, "highlights": ["coffee", "cake"], "extras": {"a": 1}, "length": "long"}"#,
        )
        .unwrap();
        assert_eq!(
            generate_draft("Cafe", &req),
            "I had a fantastic experience at Cafe. I ordered 2. coffee, cake. Overall: ★★★★/★★★★★."
        );
    }
}
