//! 引擎参数与指数方法说明
//!
//! 默认值即文档化常量，可通过环境变量覆盖

use memecoin_risk_core::config::{env_f64, env_usize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::numeric::{to_decimal, to_f64};

/// 风险引擎参数
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// 没有任何有效价格区间时的基准波动率 (%)
    pub baseline_volatility: Decimal,
    /// 周期波动率上限 (%)
    pub volatility_cap: Decimal,
    /// 单个代币相对价格区间上限 (10.0 = 1000%)，只作用于波动率中位数
    pub max_token_range: Decimal,
    /// 计算收益风险比的最小波动率 (小数形式，0.001 = 0.1%)
    pub min_volatility_ratio: Decimal,
    /// 收益风险比的绝对值上限
    pub ratio_bound: Decimal,
    /// 流动性覆盖率上限 (%)
    pub liquidity_coverage_cap: Decimal,
    /// 排名输出的数量
    pub top_n: usize,
    pub methodology: IndexMethodology,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baseline_volatility: dec!(50),
            volatility_cap: dec!(500),
            max_token_range: dec!(10),
            min_volatility_ratio: dec!(0.001),
            ratio_bound: dec!(1000),
            liquidity_coverage_cap: dec!(1000),
            top_n: 10,
            methodology: IndexMethodology::default(),
        }
    }
}

impl EngineConfig {
    /// 从环境变量读取，缺失或非法时使用默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            baseline_volatility: decimal_env("RISK_BASELINE_VOLATILITY", defaults.baseline_volatility),
            volatility_cap: decimal_env("RISK_VOLATILITY_CAP", defaults.volatility_cap),
            max_token_range: decimal_env("RISK_MAX_TOKEN_RANGE", defaults.max_token_range),
            min_volatility_ratio: decimal_env("RISK_MIN_VOLATILITY_RATIO", defaults.min_volatility_ratio),
            ratio_bound: decimal_env("RISK_RATIO_BOUND", defaults.ratio_bound).abs(),
            liquidity_coverage_cap: decimal_env("RISK_LIQUIDITY_COVERAGE_CAP", defaults.liquidity_coverage_cap),
            top_n: env_usize("RISK_TOP_N", defaults.top_n),
            methodology: defaults.methodology,
        }
    }
}

fn decimal_env(key: &str, default: Decimal) -> Decimal {
    let raw = env_f64(key, to_f64(default));
    match to_decimal(raw) {
        Some(value) if value >= Decimal::ZERO => value,
        _ => {
            warn!("环境变量 {} 的值 {} 无效，使用默认值 {}", key, raw, default);
            default
        }
    }
}

/// 指数构建方法 (静态描述字段，不参与计算)
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMethodology {
    pub excluded_tokens: Vec<String>,
    pub selection_criteria: Vec<String>,
    pub weighting_method: String,
}

impl Default for IndexMethodology {
    fn default() -> Self {
        Self {
            excluded_tokens: vec![
                "USDC (EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v)".to_string(),
                "USDT (Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB)".to_string(),
                "SOL (So11111111111111111111111111111111111111111)".to_string(),
                "WSOL (So11111111111111111111111111111111111111112)".to_string(),
                "Other major stablecoins and native tokens".to_string(),
            ],
            selection_criteria: vec![
                "Volume-based ranking (top 100 by trading volume)".to_string(),
                "Price asymmetry < 0.1 (filters out extreme price manipulation)".to_string(),
                "Non-empty token names (filters out unnamed tokens)".to_string(),
                "Date filter: Since July 1, 2024".to_string(),
                "Excludes major stablecoins and native tokens".to_string(),
            ],
            weighting_method: "Volume-weighted (higher volume = higher weight in index)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.baseline_volatility, dec!(50));
        assert_eq!(config.volatility_cap, dec!(500));
        assert_eq!(config.min_volatility_ratio, dec!(0.001));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.methodology.excluded_tokens.len(), 5);
    }

    #[test]
    fn test_from_env_overrides_and_rejects_negative() {
        std::env::set_var("RISK_VOLATILITY_CAP", "250");
        std::env::set_var("RISK_BASELINE_VOLATILITY", "-5");
        std::env::set_var("RISK_TOP_N", "5");
        let config = EngineConfig::from_env();
        assert_eq!(config.volatility_cap, dec!(250));
        assert_eq!(config.baseline_volatility, dec!(50));
        assert_eq!(config.top_n, 5);
        std::env::remove_var("RISK_VOLATILITY_CAP");
        std::env::remove_var("RISK_BASELINE_VOLATILITY");
        std::env::remove_var("RISK_TOP_N");
    }
}
