// ==========================================
// 实验室库存管理 - 试剂领域模型
// ==========================================
// 用途: 导入层写入，引擎层只读
// 序列化: camelCase（与前端字段名一致）
// ==========================================

use crate::domain::record::{fields, finite_or_zero, text_field, RankedRecord};
use crate::domain::types::{DangerLevel, FieldValue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Reagent - 试剂
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reagent {
    // ===== 主键 =====
    pub id: String,

    // ===== 基础信息 =====
    pub name: String,
    #[serde(default)]
    pub cas_number: Option<String>,     // CAS 号
    #[serde(default)]
    pub category: Option<String>,       // 分类（有机/无机/生物…）
    #[serde(default)]
    pub specification: Option<String>,  // 规格
    #[serde(default)]
    pub manufacturer: Option<String>,   // 生产厂家
    #[serde(default)]
    pub location: Option<String>,       // 存放位置
    #[serde(default)]
    pub description: Option<String>,

    // ===== 安全 =====
    #[serde(default)]
    pub danger_level: DangerLevel,

    // ===== 库存 =====
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub initial_amount: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub usage_frequency: Option<f64>,   // 使用频率（次/月）

    // ===== 时间 =====
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl Reagent {
    /// 以最少字段构造试剂，其余字段留空
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cas_number: None,
            category: None,
            specification: None,
            manufacturer: None,
            location: None,
            description: None,
            danger_level: DangerLevel::Unknown,
            current_amount: 0.0,
            initial_amount: 0.0,
            unit: None,
            usage_frequency: None,
            purchase_date: None,
            expiry_date: None,
        }
    }
}

impl RankedRecord for Reagent {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        match field {
            fields::ID => text_field(Some(&self.id)),
            fields::NAME => text_field(Some(&self.name)),
            fields::CAS_NUMBER => text_field(self.cas_number.as_deref()),
            fields::CATEGORY => text_field(self.category.as_deref()),
            fields::SPECIFICATION => text_field(self.specification.as_deref()),
            fields::MANUFACTURER => text_field(self.manufacturer.as_deref()),
            fields::LOCATION => text_field(self.location.as_deref()),
            fields::DESCRIPTION => text_field(self.description.as_deref()),
            fields::UNIT => text_field(self.unit.as_deref()),
            fields::DANGER_LEVEL => text_field(Some(self.danger_level.label())),
            fields::CURRENT_AMOUNT => Some(FieldValue::Number(self.current_amount)),
            fields::INITIAL_AMOUNT => Some(FieldValue::Number(self.initial_amount)),
            fields::STOCK_LEVEL => Some(FieldValue::Number(self.stock_ratio())),
            fields::USAGE_FREQUENCY => {
                Some(FieldValue::Number(finite_or_zero(self.usage_frequency)))
            }
            fields::PURCHASE_DATE => self.purchase_date.map(FieldValue::Date),
            fields::EXPIRY_DATE => self.expiry_date.map(FieldValue::Date),
            _ => None,
        }
    }

    fn danger_level(&self) -> DangerLevel {
        self.danger_level
    }

    fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    fn current_amount(&self) -> f64 {
        self.current_amount
    }

    fn initial_amount(&self) -> f64 {
        self.initial_amount
    }

    fn usage_frequency(&self) -> Option<f64> {
        self.usage_frequency
    }
}
