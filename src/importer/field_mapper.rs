// ==========================================
// 实验室库存管理 - 字段映射器实现
// ==========================================
// 职责: 源列名（中文/英文别名）→ 标准字段 + 类型转换
// 规则:
// - 空单元格视为缺失
// - 数值无法解析 → 整行拒绝（TypeConversionError）
// - 日期无法解析 → 置为 None 并告警（排序时排在最后）
// - id 缺失 → 生成 UUID
// ==========================================

use crate::domain::member::Member;
use crate::domain::reagent::Reagent;
use crate::domain::record::{fields, normalize_zero};
use crate::domain::types::{parse_date, DangerLevel};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{Duration, NaiveDate};
use tracing::warn;
use uuid::Uuid;

pub struct FieldMapper;

impl FieldMapper {
    /// 原始行 → 试剂
    pub fn map_reagent(&self, row: &RawRow, row_number: usize) -> ImportResult<Reagent> {
        let name = self
            .get_string(row, fields::NAME)
            .ok_or(ImportError::PrimaryKeyMissing(row_number))?;

        Ok(Reagent {
            id: self.get_id(row),
            name,
            cas_number: self.get_string(row, fields::CAS_NUMBER),
            category: self.get_string(row, fields::CATEGORY),
            specification: self.get_string(row, fields::SPECIFICATION),
            manufacturer: self.get_string(row, fields::MANUFACTURER),
            location: self.get_string(row, fields::LOCATION),
            description: self.get_string(row, fields::DESCRIPTION),
            danger_level: self
                .get_string(row, fields::DANGER_LEVEL)
                .map(|v| DangerLevel::from_label(&v))
                .unwrap_or_default(),
            current_amount: self
                .parse_amount(row, fields::CURRENT_AMOUNT, row_number)?
                .unwrap_or(0.0),
            initial_amount: self
                .parse_amount(row, fields::INITIAL_AMOUNT, row_number)?
                .unwrap_or(0.0),
            unit: self.get_string(row, fields::UNIT),
            usage_frequency: self.parse_amount(row, fields::USAGE_FREQUENCY, row_number)?,
            purchase_date: self.parse_date(row, fields::PURCHASE_DATE, row_number),
            expiry_date: self.parse_date(row, fields::EXPIRY_DATE, row_number),
        })
    }

    /// 原始行 → 成员
    pub fn map_member(&self, row: &RawRow, row_number: usize) -> ImportResult<Member> {
        let name = self
            .get_string(row, fields::NAME)
            .ok_or(ImportError::PrimaryKeyMissing(row_number))?;

        Ok(Member {
            id: self.get_id(row),
            name,
            email: self.get_string(row, fields::EMAIL),
            phone: self.get_string(row, fields::PHONE),
            department: self.get_string(row, fields::DEPARTMENT),
            role: self.get_string(row, fields::ROLE),
            title: self.get_string(row, fields::TITLE),
            status: self.get_string(row, fields::STATUS),
            research_area: self.get_string(row, fields::RESEARCH_AREA),
            join_date: self.parse_date(row, fields::JOIN_DATE, row_number),
        })
    }

    /// 标准字段的列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            fields::ID => &["id", "编号", "试剂编号", "成员编号"],
            fields::NAME => &["name", "名称", "试剂名称", "姓名"],
            fields::CAS_NUMBER => &["casNumber", "cas", "CAS", "CAS号"],
            fields::CATEGORY => &["category", "分类", "类别"],
            fields::SPECIFICATION => &["specification", "规格"],
            fields::MANUFACTURER => &["manufacturer", "生产厂家", "厂家"],
            fields::LOCATION => &["location", "存放位置", "位置"],
            fields::DESCRIPTION => &["description", "描述", "备注"],
            fields::DANGER_LEVEL => &["dangerLevel", "危险等级"],
            fields::CURRENT_AMOUNT => &["currentAmount", "当前库存", "当前数量"],
            fields::INITIAL_AMOUNT => &["initialAmount", "初始库存", "初始数量"],
            fields::UNIT => &["unit", "单位"],
            fields::USAGE_FREQUENCY => &["usageFrequency", "使用频率"],
            fields::PURCHASE_DATE => &["purchaseDate", "购买日期", "采购日期"],
            fields::EXPIRY_DATE => &["expiryDate", "有效期", "过期日期"],
            fields::EMAIL => &["email", "邮箱"],
            fields::PHONE => &["phone", "电话"],
            fields::DEPARTMENT => &["department", "部门"],
            fields::ROLE => &["role", "角色"],
            fields::TITLE => &["title", "职称"],
            fields::STATUS => &["status", "状态"],
            fields::RESEARCH_AREA => &["researchArea", "研究方向"],
            fields::JOIN_DATE => &["joinDate", "加入日期", "入职日期"],
            _ => &[],
        }
    }

    /// 提取字符串字段（返回 Option），依次尝试所有别名
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn get_id(&self, row: &RawRow) -> String {
        self.get_string(row, fields::ID)
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// 解析非负数值
    fn parse_amount(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        let Some(value) = self.get_string(row, key) else {
            return Ok(None);
        };

        let parsed = value
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为数值: {}", value),
            })?;

        if parsed < 0.0 {
            return Err(ImportError::NegativeValue {
                row: row_number,
                field: key.to_string(),
                value: parsed,
            });
        }

        Ok(Some(normalize_zero(parsed)))
    }

    /// 解析日期；无法解析时告警并返回 None
    fn parse_date(&self, row: &RawRow, key: &str, row_number: usize) -> Option<NaiveDate> {
        let value = self.get_string(row, key)?;
        let parsed = parse_date(&value).or_else(|| excel_serial_date(&value));
        if parsed.is_none() {
            warn!(row = row_number, field = key, value = %value, "日期无法解析，按缺失处理");
        }
        parsed
    }
}

/// Excel 日期序列号（1900 日期系统）→ 日期
fn excel_serial_date(value: &str) -> Option<NaiveDate> {
    let serial = value.trim().parse::<f64>().ok()?;
    // 1 ≈ 1900-01-01，100000 ≈ 2173 年
    if !(1.0..100_000.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}
