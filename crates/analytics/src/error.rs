//! 风险引擎错误类型

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RiskError>;

/// 只有输入结构错误会导致整次计算失败，数值问题在单个代币上就地忽略
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    #[error("数据格式无效: {0}")]
    InvalidFormat(String),
}
