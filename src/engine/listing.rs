// ==========================================
// 实验室库存管理 - 列表查询
// ==========================================
// 流程: 筛选 → 排序 → 分页
// 页码从 1 开始；超出范围的页返回空列表
// ==========================================

use crate::domain::record::RankedRecord;
use crate::engine::filter::{FilterSet, FilterValues};
use crate::engine::ranking::RankingEngine;
use crate::engine::strategy::SortStrategy;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub filters: FilterValues,
    #[serde(default)]
    pub strategy: SortStrategy,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: FilterValues::default(),
            strategy: SortStrategy::default(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// 筛选后的记录总数
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// 执行一次列表查询
#[instrument(skip_all, fields(count = records.len(), strategy = %query.strategy, page = query.page))]
pub fn list_records<R: RankedRecord + Clone>(
    engine: &RankingEngine,
    filter_set: &FilterSet,
    records: &[R],
    query: &ListQuery,
) -> ListPage<R> {
    let page = query.page.max(1);
    let page_size = query.page_size.max(1);

    let filtered = filter_set.filter_records(records, &query.filters);
    let total = filtered.len();
    let mut sorted = engine.sort_records(&filtered, &query.strategy);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<R> = if start >= total {
        Vec::new()
    } else {
        let end = (start + page_size).min(total);
        sorted.drain(start..end).collect()
    };

    debug!(total, returned = items.len(), "列表查询完成");

    ListPage {
        items,
        total,
        page,
        page_size,
        total_pages: total.div_ceil(page_size),
    }
}
