// ==========================================
// 实验室库存管理 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、查询
// 存储: JSON 文件（缺省时使用内置默认值）
// 路径优先级: 显式路径 → LAB_INVENTORY_CONFIG → 用户配置目录
// ==========================================

use crate::engine::ranking::{
    SmartThresholds, DEFAULT_EXPIRING_WINDOW_DAYS, DEFAULT_LOW_STOCK_RATIO,
};
use crate::engine::strategy::SortStrategy;
use crate::engine::listing::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "LAB_INVENTORY_CONFIG";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    pub const EXPIRING_WINDOW_DAYS: &str = "expiring_window_days";
    pub const LOW_STOCK_RATIO: &str = "low_stock_ratio";
    pub const DEFAULT_STRATEGY: &str = "default_strategy";
    pub const PAGE_SIZE: &str = "page_size";
    pub const LOCALE: &str = "locale";
    pub const SEARCH_FIELDS: &str = "search_fields";
}

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// RankingConfig - 列表配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// 即将过期窗口（天）
    pub expiring_window_days: i64,
    /// 库存不足比例上限
    pub low_stock_ratio: f64,
    /// 未指定排序时使用的策略
    pub default_strategy: SortStrategy,
    pub page_size: usize,
    /// zh-CN / en
    pub locale: String,
    /// 覆盖默认搜索字段；为空则使用各实体的默认字段
    pub search_fields: Vec<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            expiring_window_days: DEFAULT_EXPIRING_WINDOW_DAYS,
            low_stock_ratio: DEFAULT_LOW_STOCK_RATIO,
            default_strategy: SortStrategy::Smart,
            page_size: DEFAULT_PAGE_SIZE,
            locale: "zh-CN".to_string(),
            search_fields: Vec::new(),
        }
    }
}

impl RankingConfig {
    pub fn smart_thresholds(&self) -> SmartThresholds {
        SmartThresholds {
            expiring_window_days: self.expiring_window_days,
            low_stock_ratio: self.low_stock_ratio,
        }
    }

    /// 校验配置值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expiring_window_days < 0 {
            return Err(invalid(
                config_keys::EXPIRING_WINDOW_DAYS,
                self.expiring_window_days,
                "不能为负数",
            ));
        }
        if !(0.0..=1.0).contains(&self.low_stock_ratio) {
            return Err(invalid(
                config_keys::LOW_STOCK_RATIO,
                self.low_stock_ratio,
                "必须在 [0, 1] 区间内",
            ));
        }
        if self.page_size == 0 {
            return Err(invalid(config_keys::PAGE_SIZE, self.page_size, "必须大于 0"));
        }
        if !matches!(self.locale.as_str(), "zh-CN" | "en") {
            return Err(invalid(
                config_keys::LOCALE,
                &self.locale,
                "仅支持 zh-CN / en",
            ));
        }
        if self.search_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(invalid(
                config_keys::SEARCH_FIELDS,
                self.search_fields.join(","),
                "搜索字段不能为空",
            ));
        }
        Ok(())
    }
}

fn invalid(key: &str, value: impl ToString, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: RankingConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn with_defaults() -> Self {
        Self {
            config: RankingConfig::default(),
            source: None,
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit: 显式指定的配置文件（必须存在）
    ///
    /// 未显式指定时依次尝试环境变量与用户配置目录，文件不存在则回退到默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.display().to_string()));
            }
            return Self::from_file(path);
        }

        match resolve_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                debug!(path = %path.display(), "配置文件不存在，使用默认配置");
                Ok(Self::with_defaults())
            }
            None => Ok(Self::with_defaults()),
        }
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut manager = Self::from_json_str(&raw)?;
        manager.source = Some(path.to_path_buf());
        info!(path = %path.display(), "已加载配置文件");
        Ok(manager)
    }

    /// 从 JSON 字符串加载（未出现的键取默认值）
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RankingConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(Self {
            config,
            source: None,
        })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 按键读取配置值（字符串形式）
    pub fn get_config_value(&self, key: &str) -> Option<String> {
        let c = &self.config;
        match key {
            config_keys::EXPIRING_WINDOW_DAYS => Some(c.expiring_window_days.to_string()),
            config_keys::LOW_STOCK_RATIO => Some(c.low_stock_ratio.to_string()),
            config_keys::DEFAULT_STRATEGY => Some(c.default_strategy.to_string()),
            config_keys::PAGE_SIZE => Some(c.page_size.to_string()),
            config_keys::LOCALE => Some(c.locale.clone()),
            config_keys::SEARCH_FIELDS => Some(c.search_fields.join(",")),
            _ => None,
        }
    }

    /// 配置快照（JSON）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

/// 解析默认配置路径
fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir().map(|dir| dir.join("lab-inventory").join("config.json"))
}
