//! 风险指标计算
//!
//! 每个计算器都是接收篮子的纯函数，空篮子返回各自的默认值

pub mod concentration;
pub mod drawdown;
pub mod liquidity;
pub mod roi;
pub mod volatility;

pub use concentration::{constituent_stability, herfindahl_index, weight_concentration};
pub use drawdown::{aggregate_max_drawdown, series_max_drawdown};
pub use liquidity::liquidity_coverage;
pub use roi::{roi_per_token, roi_statistics, top_roi, worst_roi, RoiEntry};
pub use volatility::{
    base_volatility, period_volatilities, realized_volatility, return_risk_ratios,
    series_return_to_risk, BaseVolatility,
};
