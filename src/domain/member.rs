// ==========================================
// 实验室库存管理 - 成员领域模型
// ==========================================
// 成员列表与试剂列表共用同一套筛选/排序引擎
// 成员没有危险等级、有效期与库存，智能排序退化为按名称排序
// ==========================================

use crate::domain::record::{fields, text_field, RankedRecord};
use crate::domain::types::FieldValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,          // 管理员 / 普通成员 / 访客
    #[serde(default)]
    pub title: Option<String>,         // 职称
    #[serde(default)]
    pub status: Option<String>,        // 在职 / 离职 / 停用
    #[serde(default)]
    pub research_area: Option<String>,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
            department: None,
            role: None,
            title: None,
            status: None,
            research_area: None,
            join_date: None,
        }
    }
}

impl RankedRecord for Member {
    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, field: &str) -> Option<FieldValue> {
        match field {
            fields::ID => text_field(Some(&self.id)),
            fields::NAME => text_field(Some(&self.name)),
            fields::EMAIL => text_field(self.email.as_deref()),
            fields::PHONE => text_field(self.phone.as_deref()),
            fields::DEPARTMENT => text_field(self.department.as_deref()),
            fields::ROLE => text_field(self.role.as_deref()),
            fields::TITLE => text_field(self.title.as_deref()),
            fields::STATUS => text_field(self.status.as_deref()),
            fields::RESEARCH_AREA => text_field(self.research_area.as_deref()),
            fields::JOIN_DATE => self.join_date.map(FieldValue::Date),
            _ => None,
        }
    }
}
