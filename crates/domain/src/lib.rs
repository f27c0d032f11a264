//! # Memecoin Risk Domain
//!
//! 领域模型层 - 纯粹的数据结构与业务规则，不依赖任何计算或基础设施
//!
//! ## 模块组织
//!
//! - `entities`: 业务实体，如 TokenAggregate, Basket, RiskProfile
//! - `value_objects`: 值对象，如 Period
//!
//! ## 使用示例
//!
//! ```rust
//! use memecoin_risk_domain::entities::{Basket, TokenAggregate};
//! use memecoin_risk_domain::value_objects::Period;
//!
//! let token = TokenAggregate {
//!     mint_address: "MINT-1".to_string(),
//!     volume: 1_000.0,
//!     high: 2.0,
//!     low: 1.0,
//!     ..Default::default()
//! };
//! let basket = Basket::new(vec![token]);
//! assert_eq!(basket.len(), 1);
//! assert_eq!(Period::OneMonth.as_str(), "1m");
//! ```

pub mod entities;
pub mod value_objects;

// 重新导出核心类型
pub use entities::{
    Basket, IndexConstruction, MaxDrawdown, PriceObservation, ProfileComparison, RiskProfile,
    RoiSource, RoiStatistics, RoiTokenRecord, TokenAggregate, TopTokenRecord, VolumeQuartiles,
    Winner,
};
pub use value_objects::{Period, PeriodError};
