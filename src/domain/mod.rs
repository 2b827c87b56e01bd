// ==========================================
// 实验室库存管理 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、记录读取接口
// 红线: 不含引擎逻辑,不含文件解析
// ==========================================

pub mod member;
pub mod reagent;
pub mod record;
pub mod types;

// 重导出核心类型
pub use member::Member;
pub use reagent::Reagent;
pub use record::{fields, stock_ratio, RankedRecord};
pub use types::{parse_date, DangerLevel, FieldValue, SortDirection};
