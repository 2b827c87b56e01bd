// ==========================================
// 实验室库存管理 - 列表排序引擎
// ==========================================
// 职责: 按排序策略给出记录间的全序
// 输入: 记录切片 + SortStrategy
// 输出: 排好序的新列表（输入不被修改）
// ==========================================

mod collation;
mod field;
mod smart;

#[cfg(test)]
mod tests;

pub use field::is_date_field;
pub use smart::{
    days_to_expiry, expiry_bucket, stock_bucket, ExpiryBucket, SmartSortKeys, SmartThresholds,
    StockBucket, DEFAULT_EXPIRING_WINDOW_DAYS, DEFAULT_LOW_STOCK_RATIO,
};

use crate::config::RankingConfig;
use crate::domain::record::RankedRecord;
use crate::engine::strategy::SortStrategy;
use chrono::{Local, NaiveDate};
use serde_json::json;
use std::cmp::Ordering;
use tracing::{debug, instrument};

pub use collation::NameCollator;

// ==========================================
// RankingEngine - 列表排序引擎
// ==========================================
/// 无状态排序引擎，只持有参考日期与阈值
#[derive(Debug, Clone)]
pub struct RankingEngine {
    today: NaiveDate,
    thresholds: SmartThresholds,
    collator: NameCollator,
}

impl RankingEngine {
    /// 使用默认阈值（30 天 / 0.2）与拼音名称规则创建引擎
    pub fn new(today: NaiveDate) -> Self {
        Self::with_thresholds(today, SmartThresholds::default())
    }

    pub fn with_thresholds(today: NaiveDate, thresholds: SmartThresholds) -> Self {
        Self {
            today,
            thresholds,
            collator: NameCollator::default(),
        }
    }

    /// 阈值与名称规则均取自配置
    pub fn from_config(config: &RankingConfig, today: NaiveDate) -> Self {
        Self::with_thresholds(today, config.smart_thresholds())
            .with_collator(NameCollator::for_locale(&config.locale))
    }

    pub fn with_collator(mut self, collator: NameCollator) -> Self {
        self.collator = collator;
        self
    }

    /// 以本地当天日期作为参考日期
    pub fn for_today(config: &RankingConfig) -> Self {
        Self::from_config(config, Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn thresholds(&self) -> &SmartThresholds {
        &self.thresholds
    }

    pub fn collator(&self) -> NameCollator {
        self.collator
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 比较两条记录
    ///
    /// # 返回
    /// Ordering::Less 表示 a 排在 b 之前
    pub fn compare_records<R: RankedRecord>(
        &self,
        a: &R,
        b: &R,
        strategy: &SortStrategy,
    ) -> Ordering {
        match strategy {
            SortStrategy::Smart => {
                smart::compare(a, b, self.today, &self.thresholds, self.collator)
            }
            SortStrategy::Field { field, direction } => {
                field::compare(a, b, field, *direction, self.collator)
                    .then_with(|| self.collator.compare(a.name(), b.name()))
            }
        }
    }

    /// 排序（稳定排序，返回新列表）
    #[instrument(skip(self, records, strategy), fields(count = records.len(), strategy = %strategy))]
    pub fn sort_records<R: RankedRecord + Clone>(
        &self,
        records: &[R],
        strategy: &SortStrategy,
    ) -> Vec<R> {
        let mut sorted = records.to_vec();
        sorted.sort_by(|a, b| self.compare_records(a, b, strategy));
        debug!(today = %self.today, "排序完成");
        sorted
    }

    /// 排序引用（不克隆记录）
    pub fn sort_refs<'a, R: RankedRecord>(
        &self,
        records: &'a [R],
        strategy: &SortStrategy,
    ) -> Vec<&'a R> {
        let mut sorted: Vec<&R> = records.iter().collect();
        sorted.sort_by(|a, b| self.compare_records(*a, *b, strategy));
        sorted
    }

    /// 智能排序依据（可解释性）
    ///
    /// # 返回
    /// JSON: {"name": ..., "sort_keys": {...}, "primary_factor": ...}
    pub fn explain<R: RankedRecord>(&self, record: &R) -> serde_json::Value {
        let keys = SmartSortKeys::of(record, self.today, &self.thresholds);
        let primary_factor = keys.primary_factor();
        json!({
            "name": record.name(),
            "sort_keys": keys,
            "primary_factor": primary_factor,
        })
    }
}
