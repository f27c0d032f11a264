//! # Memecoin Risk
//!
//! 代币篮子风险收益画像命令行程序

use anyhow::Result;
use dotenv::dotenv;
use tracing::info;

pub mod app;

// 重新导出核心类型
pub use memecoin_risk_analytics::{compare_profiles, process_basket, EngineConfig, RiskError};
pub use memecoin_risk_domain::{ProfileComparison, RiskProfile};

pub use app::bootstrap::{build_report, run, RiskReport};
pub use app::cli::Args;

/// 应用初始化
pub async fn app_init() -> Result<()> {
    // 加载环境变量
    dotenv().ok();

    // 设置日志
    memecoin_risk_core::logger::setup_logging()?;

    info!("应用初始化完成");
    Ok(())
}
