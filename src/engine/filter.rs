// ==========================================
// 实验室库存管理 - 列表筛选
// ==========================================
// 职责: 多条件合取筛选（排序之前执行）
// 规则:
// - 每个条件独立可选；值缺失 / 空串视为不生效
// - "all" 只对分类筛选生效（全部），搜索词 "all" 按普通关键字处理
// - 关键字搜索: 忽略大小写的子串匹配，任一搜索字段命中即可
// - 分类筛选: 字段值与选中值完全相等
// - 日期区间: [from, to] 闭区间，任一端缺失则不生效
// 红线: 单条记录独立判定，不依赖其他记录
// ==========================================

use crate::domain::record::{fields, RankedRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// "全部" 选项
pub const ALL: &str = "all";

/// 关键字搜索条件的默认 ID
pub const SEARCH: &str = "search";

// ==========================================
// FilterValue / FilterValues - 当前选中的筛选值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// 搜索词或分类选中值
    Text(String),
    /// 日期区间
    DateRange {
        #[serde(default)]
        from: Option<NaiveDate>,
        #[serde(default)]
        to: Option<NaiveDate>,
    },
}

impl FilterValue {
    /// 搜索词是否生效（去空白后非空）
    fn search_term(&self) -> Option<&str> {
        match self {
            FilterValue::Text(v) => Some(v.trim()).filter(|t| !t.is_empty()),
            FilterValue::DateRange { .. } => None,
        }
    }

    /// 分类选中值是否生效（非空且不是 "all"）
    fn selected_option(&self) -> Option<&str> {
        self.search_term().filter(|t| !t.eq_ignore_ascii_case(ALL))
    }

    /// 日期区间是否生效（两端都存在）
    fn active_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            FilterValue::DateRange {
                from: Some(from),
                to: Some(to),
            } => Some((*from, *to)),
            _ => None,
        }
    }
}

/// 筛选 ID → 选中值；未出现的 ID 即为缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValues(BTreeMap<String, FilterValue>);

impl FilterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(id, FilterValue::Text(value.into()));
        self
    }

    pub fn with_date_range(
        mut self,
        id: impl Into<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        self.set(id, FilterValue::DateRange { from, to });
        self
    }

    pub fn set(&mut self, id: impl Into<String>, value: FilterValue) {
        self.0.insert(id.into(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<FilterValue> {
        self.0.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&FilterValue> {
        self.0.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

// ==========================================
// FilterSet - 某个列表页的筛选条件定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Search { fields: Vec<String> },
    Equals { field: String },
    DateRange { field: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDefinition {
    pub id: String,
    pub kind: FilterKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    definitions: Vec<FilterDefinition>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search<I, S>(mut self, id: impl Into<String>, search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.definitions.push(FilterDefinition {
            id: id.into(),
            kind: FilterKind::Search {
                fields: search_fields.into_iter().map(Into::into).collect(),
            },
        });
        self
    }

    pub fn with_equals(mut self, id: impl Into<String>, field: impl Into<String>) -> Self {
        self.definitions.push(FilterDefinition {
            id: id.into(),
            kind: FilterKind::Equals {
                field: field.into(),
            },
        });
        self
    }

    pub fn with_date_range(mut self, id: impl Into<String>, field: impl Into<String>) -> Self {
        self.definitions.push(FilterDefinition {
            id: id.into(),
            kind: FilterKind::DateRange {
                field: field.into(),
            },
        });
        self
    }

    /// 试剂列表默认筛选条件
    pub fn reagent_default() -> Self {
        Self::new()
            .with_search(
                SEARCH,
                [fields::NAME, fields::CAS_NUMBER, fields::DESCRIPTION],
            )
            .with_equals(fields::CATEGORY, fields::CATEGORY)
            .with_equals(fields::DANGER_LEVEL, fields::DANGER_LEVEL)
            .with_equals(fields::LOCATION, fields::LOCATION)
            .with_date_range(fields::EXPIRY_DATE, fields::EXPIRY_DATE)
            .with_date_range(fields::PURCHASE_DATE, fields::PURCHASE_DATE)
    }

    /// 成员列表默认筛选条件
    pub fn member_default() -> Self {
        Self::new()
            .with_search(SEARCH, [fields::NAME, fields::EMAIL, fields::RESEARCH_AREA])
            .with_equals(fields::DEPARTMENT, fields::DEPARTMENT)
            .with_equals(fields::ROLE, fields::ROLE)
            .with_equals(fields::STATUS, fields::STATUS)
            .with_date_range(fields::JOIN_DATE, fields::JOIN_DATE)
    }

    /// 替换所有搜索条件的搜索字段（空列表时保持不变）
    pub fn override_search_fields(mut self, search_fields: &[String]) -> Self {
        if search_fields.is_empty() {
            return self;
        }
        for def in &mut self.definitions {
            if let FilterKind::Search { fields } = &mut def.kind {
                *fields = search_fields.to_vec();
            }
        }
        self
    }

    pub fn definitions(&self) -> &[FilterDefinition] {
        &self.definitions
    }

    pub fn definition(&self, id: &str) -> Option<&FilterDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    // ==========================================
    // 判定
    // ==========================================

    /// 单条记录是否满足全部生效条件
    pub fn matches<R: RankedRecord>(&self, record: &R, values: &FilterValues) -> bool {
        self.definitions.iter().all(|def| match values.get(&def.id) {
            None => true,
            Some(value) => clause_matches(record, &def.kind, value),
        })
    }

    /// 筛选（保持原有顺序，返回新列表）
    #[instrument(skip(self, records, values), fields(count = records.len()))]
    pub fn filter_records<R: RankedRecord + Clone>(
        &self,
        records: &[R],
        values: &FilterValues,
    ) -> Vec<R> {
        for id in values.ids() {
            if self.definition(id).is_none() {
                warn!(filter_id = id, "未定义的筛选条件，已忽略");
            }
        }

        let kept: Vec<R> = records
            .iter()
            .filter(|r| self.matches(*r, values))
            .cloned()
            .collect();
        debug!(kept = kept.len(), "筛选完成");
        kept
    }
}

fn clause_matches<R: RankedRecord>(record: &R, kind: &FilterKind, value: &FilterValue) -> bool {
    match kind {
        FilterKind::Search { fields } => {
            let Some(term) = value.search_term() else {
                return true;
            };
            let term = term.to_lowercase();
            fields.iter().any(|f| {
                record
                    .field(f)
                    .map(|v| v.to_filter_text().to_lowercase().contains(&term))
                    .unwrap_or(false)
            })
        }
        FilterKind::Equals { field } => {
            let Some(selected) = value.selected_option() else {
                return true;
            };
            record
                .field(field)
                .map(|v| v.to_filter_text() == selected)
                .unwrap_or(false)
        }
        FilterKind::DateRange { field } => {
            let Some((from, to)) = value.active_range() else {
                return true;
            };
            record
                .field(field)
                .and_then(|v| v.as_date())
                .map(|d| from <= d && d <= to)
                .unwrap_or(false)
        }
    }
}
