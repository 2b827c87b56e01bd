// ==========================================
// 实验室试剂库存管理 - 核心库
// ==========================================
// 职责: 试剂/成员列表的筛选、综合排序、分页与概览
// 技术栈: Rust + serde + chrono
// 系统定位: 列表展示支持 (不修改任何记录)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 筛选与排序规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DangerLevel, FieldValue, SortDirection};

// 领域实体
pub use domain::{Member, RankedRecord, Reagent};

// 引擎
pub use engine::{
    list_records, FilterSet, FilterValue, FilterValues, InventorySummary, ListPage, ListQuery,
    NameCollator, RankingEngine, RankingError, SortStrategy,
};

// 配置
pub use config::{ConfigManager, RankingConfig};

// 导入
pub use importer::{ImportError, ImportReport, RecordImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "实验室试剂库存管理";
