// ==========================================
// 实验室库存管理 - 配置层
// ==========================================
// 职责: 排序阈值、默认策略、分页与语言配置
// 存储: JSON 文件
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigError, ConfigManager, RankingConfig, CONFIG_PATH_ENV};
