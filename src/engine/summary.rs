// ==========================================
// 实验室库存管理 - 库存概览
// ==========================================
// 职责: 统计列表页顶部的概览数字
// 口径与智能排序一致（同一参考日期与阈值）
// ==========================================

use crate::domain::record::RankedRecord;
use crate::domain::types::DangerLevel;
use crate::engine::ranking::{
    days_to_expiry, expiry_bucket, stock_bucket, ExpiryBucket, RankingEngine, StockBucket,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub high_danger: usize,
}

impl InventorySummary {
    pub fn from_records<R: RankedRecord>(records: &[R], engine: &RankingEngine) -> Self {
        let thresholds = engine.thresholds();
        let mut summary = InventorySummary {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            let days = days_to_expiry(record.expiry_date(), engine.today());
            match expiry_bucket(days, thresholds) {
                ExpiryBucket::Expired => summary.expired += 1,
                ExpiryBucket::ExpiringSoon => summary.expiring_soon += 1,
                ExpiryBucket::Later | ExpiryBucket::NoExpiry => {}
            }

            match stock_bucket(record.stock_ratio(), thresholds) {
                StockBucket::OutOfStock => summary.out_of_stock += 1,
                StockBucket::Low => summary.low_stock += 1,
                StockBucket::Adequate => {}
            }

            if record.danger_level() == DangerLevel::High {
                summary.high_danger += 1;
            }
        }

        summary
    }

    /// 按当前语言渲染概览文本
    pub fn lines(&self) -> Vec<String> {
        use crate::i18n::{t, t_with_args};

        let count = |key: &str, n: usize| {
            let n = n.to_string();
            t_with_args(key, &[("count", n.as_str())])
        };
        vec![
            t("summary.title"),
            count("summary.total", self.total),
            count("summary.expired", self.expired),
            count("summary.expiring_soon", self.expiring_soon),
            count("summary.out_of_stock", self.out_of_stock),
            count("summary.low_stock", self.low_stock),
            count("summary.high_danger", self.high_danger),
        ]
    }
}
