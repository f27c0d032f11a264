//! 业务实体模块
//!
//! 篮子由代币聚合行组成，每次计算产出一份不可变的风险画像

pub mod comparison;
pub mod price_observation;
pub mod risk_profile;
pub mod token_aggregate;

pub use comparison::{ProfileComparison, Winner};
pub use price_observation::PriceObservation;
pub use risk_profile::{
    IndexConstruction, MaxDrawdown, RiskProfile, RoiSource, RoiStatistics, RoiTokenRecord,
    TopTokenRecord, VolumeQuartiles,
};
pub use token_aggregate::{Basket, TokenAggregate};
