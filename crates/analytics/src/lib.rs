//! # Memecoin Risk Analytics
//!
//! 风险引擎：篮子解析、风险指标、排名诊断、画像组装与对比
//!
//! 所有计算都是接收篮子的纯函数，内部使用 Decimal，输出为 f64

pub mod comparison;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ingestion;
pub mod metrics;
pub mod numeric;
pub mod profile;

pub use comparison::compare_profiles;
pub use config::{EngineConfig, IndexMethodology};
pub use error::{Result, RiskError};
pub use ingestion::parse_basket;
pub use profile::{generate_risk_profile, process_basket};
