// ==========================================
// 实验室库存管理 - 引擎层
// ==========================================
// 职责: 列表筛选、排序、分页、概览统计
// 红线: 引擎为纯函数，不修改输入记录，不持有可变状态
// ==========================================

pub mod error;
pub mod filter;
pub mod listing;
pub mod ranking;
pub mod strategy;
pub mod summary;

// 重导出核心引擎
pub use error::{RankingError, RankingResult};
pub use filter::{FilterDefinition, FilterKind, FilterSet, FilterValue, FilterValues};
pub use listing::{list_records, ListPage, ListQuery};
pub use ranking::{NameCollator, RankingEngine, SmartThresholds};
pub use strategy::SortStrategy;
pub use summary::InventorySummary;
