// ==========================================
// 实验室库存管理 - 引擎层错误类型
// ==========================================
// 比较与筛选本身不返回错误，只有策略标识解析会失败
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankingError {
    #[error("未知排序策略: {0}")]
    UnknownStrategy(String),

    #[error("无效的排序方向: {0}（仅支持 asc/desc）")]
    InvalidDirection(String),

    #[error("排序字段为空: {0}")]
    EmptyField(String),
}

pub type RankingResult<T> = Result<T, RankingError>;
