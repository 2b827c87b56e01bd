// ==========================================
// 实验室库存管理 - 领域类型定义
// ==========================================
// 职责: 危险等级、排序方向、字段取值等基础类型
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 危险等级 (Danger Level)
// ==========================================
// 数据源中以中文标签存储: 高 / 中 / 低
// 无法识别的标签统一视为 Unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DangerLevel {
    High,    // 高
    Medium,  // 中
    Low,     // 低
    Unknown, // 未知
}

impl DangerLevel {
    /// 从标签解析危险等级（兼容中文与英文写法）
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "高" | "high" | "h" => DangerLevel::High,
            "中" | "medium" | "m" => DangerLevel::Medium,
            "低" | "low" | "l" => DangerLevel::Low,
            _ => DangerLevel::Unknown,
        }
    }

    /// 数据源标签
    pub fn label(&self) -> &'static str {
        match self {
            DangerLevel::High => "高",
            DangerLevel::Medium => "中",
            DangerLevel::Low => "低",
            DangerLevel::Unknown => "",
        }
    }

    /// 智能排序使用的优先级（越小越靠前）
    ///
    /// 高危材料优先复核: 高=1, 中=2, 低=3, 未知=999
    pub fn smart_rank(&self) -> u16 {
        match self {
            DangerLevel::High => 1,
            DangerLevel::Medium => 2,
            DangerLevel::Low => 3,
            DangerLevel::Unknown => 999,
        }
    }

    /// 单字段排序 (dangerLevel_asc / dangerLevel_desc) 使用的权重
    ///
    /// 注意: 与 smart_rank 方向相反（高=3, 中=2, 低=1, 未知=0）。
    /// 升序 = 低危在前，降序 = 高危在前。两套口径需保持各自的现有行为。
    pub fn field_weight(&self) -> u8 {
        match self {
            DangerLevel::High => 3,
            DangerLevel::Medium => 2,
            DangerLevel::Low => 1,
            DangerLevel::Unknown => 0,
        }
    }

    /// i18n 键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DangerLevel::High => "danger.high",
            DangerLevel::Medium => "danger.medium",
            DangerLevel::Low => "danger.low",
            DangerLevel::Unknown => "danger.unknown",
        }
    }
}

impl Default for DangerLevel {
    fn default() -> Self {
        DangerLevel::Unknown
    }
}

impl From<String> for DangerLevel {
    fn from(value: String) -> Self {
        DangerLevel::from_label(&value)
    }
}

impl From<DangerLevel> for String {
    fn from(value: DangerLevel) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DangerLevel::Unknown => write!(f, "UNKNOWN"),
            other => write!(f, "{}", other.label()),
        }
    }
}

// ==========================================
// 排序方向 (Sort Direction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// asc 保持自然顺序, desc 取反
    pub fn apply(&self, natural: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => natural,
            SortDirection::Desc => natural.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 字段取值 (Field Value)
// ==========================================
// 单字段排序与筛选通过字段 ID 读取记录值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl FieldValue {
    /// 按日期解释字段值；文本值尝试解析，失败返回 None
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => parse_date(s),
            FieldValue::Number(_) => None,
        }
    }

    /// 按数值解释字段值；非有限值视为缺失
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// 筛选比较使用的文本形式
    pub fn to_filter_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// 支持的日期格式
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d", "%Y.%m.%d"];

/// 解析日历日期
///
/// 支持 `YYYY-MM-DD` / `YYYY/MM/DD` / `YYYYMMDD` / `YYYY.MM.DD`，
/// 以及带时间部分的 ISO 字符串（只取日期部分）。空串或无法解析返回 None。
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_danger_level_from_label() {
        assert_eq!(DangerLevel::from_label("高"), DangerLevel::High);
        assert_eq!(DangerLevel::from_label(" 中 "), DangerLevel::Medium);
        assert_eq!(DangerLevel::from_label("LOW"), DangerLevel::Low);
        assert_eq!(DangerLevel::from_label("极高"), DangerLevel::Unknown);
        assert_eq!(DangerLevel::from_label(""), DangerLevel::Unknown);
    }

    #[test]
    fn test_danger_tables_are_inverted() {
        assert!(DangerLevel::High.smart_rank() < DangerLevel::Low.smart_rank());
        assert!(DangerLevel::High.field_weight() > DangerLevel::Low.field_weight());
        assert_eq!(DangerLevel::Unknown.smart_rank(), 999);
        assert_eq!(DangerLevel::Unknown.field_weight(), 0);
    }

    #[test]
    fn test_danger_level_serde_uses_labels() {
        let json = serde_json::to_string(&DangerLevel::High).unwrap();
        assert_eq!(json, "\"高\"");

        let parsed: DangerLevel = serde_json::from_str("\"低\"").unwrap();
        assert_eq!(parsed, DangerLevel::Low);

        let unknown: DangerLevel = serde_json::from_str("\"???\"").unwrap();
        assert_eq!(unknown, DangerLevel::Unknown);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(parse_date("2026-03-09"), Some(expected));
        assert_eq!(parse_date("2026/03/09"), Some(expected));
        assert_eq!(parse_date("20260309"), Some(expected));
        assert_eq!(parse_date("2026-03-09T08:30:00Z"), Some(expected));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn test_direction_apply() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn test_field_value_conversions() {
        assert_eq!(FieldValue::Text("12.5".into()).as_number(), Some(12.5));
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
        assert_eq!(
            FieldValue::Text("2026-01-02".into()).as_date(),
            NaiveDate::from_ymd_opt(2026, 1, 2)
        );
        assert_eq!(FieldValue::Number(3.0).as_date(), None);
    }
}
