// ==========================================
// 实验室库存管理 - 可排序记录接口
// ==========================================
// 职责: 定义排序/筛选引擎读取记录的统一接口
// 红线: 引擎只读记录，不修改
// ==========================================

use crate::domain::types::{DangerLevel, FieldValue};
use chrono::NaiveDate;

/// 字段 ID（与前端列表页使用的字段名一致）
pub mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const CATEGORY: &str = "category";
    pub const CAS_NUMBER: &str = "casNumber";
    pub const SPECIFICATION: &str = "specification";
    pub const MANUFACTURER: &str = "manufacturer";
    pub const LOCATION: &str = "location";
    pub const UNIT: &str = "unit";
    pub const DANGER_LEVEL: &str = "dangerLevel";
    pub const EXPIRY_DATE: &str = "expiryDate";
    pub const PURCHASE_DATE: &str = "purchaseDate";
    pub const CURRENT_AMOUNT: &str = "currentAmount";
    pub const INITIAL_AMOUNT: &str = "initialAmount";
    /// 伪字段: currentAmount / initialAmount
    pub const STOCK_LEVEL: &str = "stockLevel";
    pub const USAGE_FREQUENCY: &str = "usageFrequency";

    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const DEPARTMENT: &str = "department";
    pub const ROLE: &str = "role";
    pub const TITLE: &str = "title";
    pub const STATUS: &str = "status";
    pub const JOIN_DATE: &str = "joinDate";
    pub const RESEARCH_AREA: &str = "researchArea";
}

/// 计算库存比例
///
/// initial <= 0 时返回 0，不做除法；非有限结果同样视为 0。
pub fn stock_ratio(current: f64, initial: f64) -> f64 {
    if !(initial > 0.0) || !current.is_finite() {
        return 0.0;
    }
    let ratio = current / initial;
    if ratio.is_finite() {
        normalize_zero(ratio)
    } else {
        0.0
    }
}

/// 数值清洗: 缺失 / NaN / 无穷 统一为 0
pub(crate) fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => normalize_zero(v),
        _ => 0.0,
    }
}

/// -0.0 → 0.0（total_cmp 区分两者）
pub(crate) fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

// ==========================================
// RankedRecord - 可排序记录
// ==========================================
/// 排序引擎读取的记录接口
///
/// 试剂实现全部排序字段；人员等其他实体只需提供 `name` 与 `field`，
/// 其余字段取默认值（危险等级未知、无有效期、库存为 0、无使用频率）。
pub trait RankedRecord {
    /// 名称（最终 tie-break）
    fn name(&self) -> &str;

    /// 按字段 ID 读取值，字段不存在或为空时返回 None
    fn field(&self, field: &str) -> Option<FieldValue>;

    fn danger_level(&self) -> DangerLevel {
        DangerLevel::Unknown
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        None
    }

    fn current_amount(&self) -> f64 {
        0.0
    }

    fn initial_amount(&self) -> f64 {
        0.0
    }

    fn usage_frequency(&self) -> Option<f64> {
        None
    }

    fn stock_ratio(&self) -> f64 {
        stock_ratio(self.current_amount(), self.initial_amount())
    }

    /// 使用频率，缺失视为 0
    fn usage_or_zero(&self) -> f64 {
        finite_or_zero(self.usage_frequency())
    }
}

impl<T: RankedRecord + ?Sized> RankedRecord for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        (**self).field(field)
    }

    fn danger_level(&self) -> DangerLevel {
        (**self).danger_level()
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        (**self).expiry_date()
    }

    fn current_amount(&self) -> f64 {
        (**self).current_amount()
    }

    fn initial_amount(&self) -> f64 {
        (**self).initial_amount()
    }

    fn usage_frequency(&self) -> Option<f64> {
        (**self).usage_frequency()
    }
}

/// Option<String> 字段转 FieldValue（空串视为缺失）
pub(crate) fn text_field(value: Option<&str>) -> Option<FieldValue> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(FieldValue::Text(v.to_string())),
        _ => None,
    }
}
