// ==========================================
// 实验室库存管理 - 排序策略定义
// ==========================================
// 标识格式:
// - "smart"                综合排序
// - "<field>_<asc|desc>"   单字段排序，如 expiryDate_asc / name_desc
// ==========================================

use crate::domain::types::SortDirection;
use crate::engine::error::{RankingError, RankingResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SMART: &str = "smart";

/// 列表排序策略
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortStrategy {
    /// 综合排序（危险等级 → 有效期 → 库存 → 使用频率 → 名称）
    Smart,
    /// 单字段排序
    Field {
        field: String,
        direction: SortDirection,
    },
}

impl SortStrategy {
    pub fn field(field: impl Into<String>, direction: SortDirection) -> Self {
        SortStrategy::Field {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::field(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::field(field, SortDirection::Desc)
    }

    pub fn is_smart(&self) -> bool {
        matches!(self, SortStrategy::Smart)
    }

    /// i18n 显示名称
    pub fn title(&self) -> String {
        match self {
            SortStrategy::Smart => crate::i18n::t("sort.smart"),
            SortStrategy::Field { field, direction } => format!(
                "{} {}",
                crate::i18n::t(&format!("field.{}", field)),
                crate::i18n::t(&format!("sort.{}", direction.as_str()))
            ),
        }
    }
}

impl Default for SortStrategy {
    fn default() -> Self {
        SortStrategy::Smart
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortStrategy::Smart => write!(f, "{}", SMART),
            SortStrategy::Field { field, direction } => write!(f, "{}_{}", field, direction),
        }
    }
}

impl FromStr for SortStrategy {
    type Err = RankingError;

    fn from_str(s: &str) -> RankingResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(SMART) {
            return Ok(SortStrategy::Smart);
        }

        let (field, direction) = trimmed
            .rsplit_once('_')
            .ok_or_else(|| RankingError::UnknownStrategy(trimmed.to_string()))?;

        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(RankingError::InvalidDirection(other.to_string())),
        };

        if field.trim().is_empty() {
            return Err(RankingError::EmptyField(trimmed.to_string()));
        }

        Ok(SortStrategy::Field {
            field: field.trim().to_string(),
            direction,
        })
    }
}

impl TryFrom<String> for SortStrategy {
    type Error = RankingError;

    fn try_from(value: String) -> RankingResult<Self> {
        value.parse()
    }
}

impl From<SortStrategy> for String {
    fn from(value: SortStrategy) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!("smart".parse::<SortStrategy>().unwrap(), SortStrategy::Smart);
        assert_eq!(
            "expiryDate_asc".parse::<SortStrategy>().unwrap(),
            SortStrategy::asc("expiryDate")
        );
        assert_eq!(
            "dangerLevel_desc".parse::<SortStrategy>().unwrap(),
            SortStrategy::desc("dangerLevel")
        );
        // 字段名本身可包含下划线
        assert_eq!(
            "research_area_asc".parse::<SortStrategy>().unwrap(),
            SortStrategy::asc("research_area")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "name".parse::<SortStrategy>(),
            Err(RankingError::UnknownStrategy("name".to_string()))
        );
        assert_eq!(
            "name_up".parse::<SortStrategy>(),
            Err(RankingError::InvalidDirection("up".to_string()))
        );
        assert!(matches!(
            "_asc".parse::<SortStrategy>(),
            Err(RankingError::EmptyField(_))
        ));
    }

    #[test]
    fn test_display_round_trips_identifier() {
        for id in ["smart", "name_asc", "stockLevel_desc", "purchaseDate_asc"] {
            let strategy: SortStrategy = id.parse().unwrap();
            assert_eq!(strategy.to_string(), id);
        }
    }

    #[test]
    fn test_serde_as_identifier() {
        let json = serde_json::to_string(&SortStrategy::desc("usageFrequency")).unwrap();
        assert_eq!(json, "\"usageFrequency_desc\"");

        let parsed: SortStrategy = serde_json::from_str("\"smart\"").unwrap();
        assert!(parsed.is_smart());

        assert!(serde_json::from_str::<SortStrategy>("\"bogus\"").is_err());
    }
}
