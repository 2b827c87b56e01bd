// ==========================================
// 智能排序 - 五级比较链
// ==========================================
// 1) 危险等级: 高=1, 中=2, 低=3, 未知=999，小者在前
// 2) 有效期: 已过期 → 30天内到期 → 其他；同组内剩余天数少者在前
// 3) 库存: 已耗尽 → 库存不足(比例<=0.2) → 充足
// 4) 使用频率: 降序
// 5) 名称: 升序
// 每一级只在前一级相等时生效
// ==========================================

use super::collation::NameCollator;
use crate::domain::record::RankedRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_EXPIRING_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_LOW_STOCK_RATIO: f64 = 0.2;

/// 智能排序阈值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmartThresholds {
    /// 即将过期窗口（天）
    pub expiring_window_days: i64,
    /// 库存不足比例上限（含）
    pub low_stock_ratio: f64,
}

impl Default for SmartThresholds {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            low_stock_ratio: DEFAULT_LOW_STOCK_RATIO,
        }
    }
}

// ==========================================
// 有效期分组
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryBucket {
    Expired,
    ExpiringSoon,
    Later,
    /// 有效期缺失或无法解析，按"无限远的将来"处理
    NoExpiry,
}

impl ExpiryBucket {
    fn tier(&self) -> u8 {
        match self {
            ExpiryBucket::Expired => 0,
            ExpiryBucket::ExpiringSoon => 1,
            ExpiryBucket::Later | ExpiryBucket::NoExpiry => 2,
        }
    }
}

// ==========================================
// 库存分组
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockBucket {
    OutOfStock,
    Low,
    Adequate,
}

/// 距过期天数（过期日 - 今天）
pub fn days_to_expiry(expiry: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    expiry.map(|date| (date - today).num_days())
}

pub fn expiry_bucket(days: Option<i64>, thresholds: &SmartThresholds) -> ExpiryBucket {
    match days {
        None => ExpiryBucket::NoExpiry,
        Some(d) if d <= 0 => ExpiryBucket::Expired,
        Some(d) if d <= thresholds.expiring_window_days => ExpiryBucket::ExpiringSoon,
        Some(_) => ExpiryBucket::Later,
    }
}

pub fn stock_bucket(ratio: f64, thresholds: &SmartThresholds) -> StockBucket {
    if ratio <= 0.0 {
        StockBucket::OutOfStock
    } else if ratio <= thresholds.low_stock_ratio {
        StockBucket::Low
    } else {
        StockBucket::Adequate
    }
}

pub(super) fn compare<R: RankedRecord>(
    a: &R,
    b: &R,
    today: NaiveDate,
    thresholds: &SmartThresholds,
    collator: NameCollator,
) -> Ordering {
    // 1. 危险等级
    match a.danger_level().smart_rank().cmp(&b.danger_level().smart_rank()) {
        Ordering::Equal => {}
        other => return other,
    }

    // 2. 有效期紧迫度
    match compare_expiry(a, b, today, thresholds) {
        Ordering::Equal => {}
        other => return other,
    }

    // 3. 库存充足度
    let stock_a = stock_bucket(a.stock_ratio(), thresholds);
    let stock_b = stock_bucket(b.stock_ratio(), thresholds);
    match stock_a.cmp(&stock_b) {
        Ordering::Equal => {}
        other => return other,
    }

    // 4. 使用频率（降序）
    match b.usage_or_zero().total_cmp(&a.usage_or_zero()) {
        Ordering::Equal => {}
        other => return other,
    }

    // 5. 名称
    collator.compare(a.name(), b.name())
}

fn compare_expiry<R: RankedRecord>(
    a: &R,
    b: &R,
    today: NaiveDate,
    thresholds: &SmartThresholds,
) -> Ordering {
    let days_a = days_to_expiry(a.expiry_date(), today);
    let days_b = days_to_expiry(b.expiry_date(), today);
    let bucket_a = expiry_bucket(days_a, thresholds);
    let bucket_b = expiry_bucket(days_b, thresholds);

    match bucket_a.tier().cmp(&bucket_b.tier()) {
        Ordering::Equal => {}
        other => return other,
    }

    match (bucket_a, days_a, days_b) {
        // 过期越久越靠前 / 剩余天数越少越靠前，两者都是天数升序
        (ExpiryBucket::Expired | ExpiryBucket::ExpiringSoon, Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// 排序依据说明（可解释性）
#[derive(Debug, Clone, Serialize)]
pub struct SmartSortKeys {
    pub danger_level: String,
    pub danger_rank: u16,
    pub expiry_bucket: ExpiryBucket,
    pub days_to_expiry: Option<i64>,
    pub stock_bucket: StockBucket,
    pub stock_ratio: f64,
    pub usage_frequency: f64,
}

impl SmartSortKeys {
    pub fn of<R: RankedRecord>(record: &R, today: NaiveDate, thresholds: &SmartThresholds) -> Self {
        let days = days_to_expiry(record.expiry_date(), today);
        let ratio = record.stock_ratio();
        let danger = record.danger_level();
        Self {
            danger_level: danger.label().to_string(),
            danger_rank: danger.smart_rank(),
            expiry_bucket: expiry_bucket(days, thresholds),
            days_to_expiry: days,
            stock_bucket: stock_bucket(ratio, thresholds),
            stock_ratio: ratio,
            usage_frequency: record.usage_or_zero(),
        }
    }

    /// 主导因素: 第一个把记录推到前排的排序级
    pub fn primary_factor(&self) -> &'static str {
        if self.danger_rank == 1 {
            "DANGER_LEVEL"
        } else if matches!(
            self.expiry_bucket,
            ExpiryBucket::Expired | ExpiryBucket::ExpiringSoon
        ) {
            "EXPIRY"
        } else if self.stock_bucket != StockBucket::Adequate {
            "STOCK"
        } else if self.usage_frequency > 0.0 {
            "USAGE_FREQUENCY"
        } else {
            "NAME"
        }
    }
}
