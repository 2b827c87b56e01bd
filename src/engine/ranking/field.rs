// ==========================================
// 单字段排序
// ==========================================
// - 字段名包含 "date": 按日历日期比较
// - dangerLevel: 权重 高=3 / 中=2 / 低=1（与智能排序方向相反）
// - stockLevel: 库存比例
// - usageFrequency: 数值，缺失为 0
// - 其他: 文本按名称规则比较，数值直接比较
// 缺失值与无法解析的日期在两个方向上都排在最后
// ==========================================

use super::collation::NameCollator;
use crate::domain::record::{fields, normalize_zero, RankedRecord};
use crate::domain::types::{FieldValue, SortDirection};
use std::cmp::Ordering;

pub(super) fn compare<R: RankedRecord>(
    a: &R,
    b: &R,
    field: &str,
    direction: SortDirection,
    collator: NameCollator,
) -> Ordering {
    if is_date_field(field) {
        let date_a = a.field(field).and_then(|v| v.as_date());
        let date_b = b.field(field).and_then(|v| v.as_date());
        return compare_present(date_a, date_b, direction, |x, y| x.cmp(y));
    }

    match field {
        fields::DANGER_LEVEL => direction.apply(
            a.danger_level()
                .field_weight()
                .cmp(&b.danger_level().field_weight()),
        ),
        fields::STOCK_LEVEL => direction.apply(a.stock_ratio().total_cmp(&b.stock_ratio())),
        fields::USAGE_FREQUENCY => {
            direction.apply(a.usage_or_zero().total_cmp(&b.usage_or_zero()))
        }
        _ => compare_present(a.field(field), b.field(field), direction, |x, y| {
            compare_values(x, y, collator)
        }),
    }
}

/// 字段名是否为日期字段（expiryDate / purchaseDate / joinDate ...）
pub fn is_date_field(field: &str) -> bool {
    field.to_ascii_lowercase().contains("date")
}

/// 两侧都有值时按方向比较；缺失值固定排在最后
fn compare_present<T>(
    a: Option<T>,
    b: Option<T>,
    direction: SortDirection,
    cmp: impl FnOnce(&T, &T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => direction.apply(cmp(&x, &y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_values(a: &FieldValue, b: &FieldValue, collator: NameCollator) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => {
            normalize_zero(*x).total_cmp(&normalize_zero(*y))
        }
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => collator.compare(x, y),
        _ => collator.compare(&a.to_filter_text(), &b.to_filter_text()),
    }
}
