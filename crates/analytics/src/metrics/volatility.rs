//! 波动率与收益风险比
//!
//! 两条路径:
//! - 聚合路径: 只有区间最高/最低价，用相对价格区间 (high - low) / low 的分布估计各周期波动率
//! - 序列路径: 有价格时间序列时，用对数收益率并做一阶自相关修正后年化
//!
//! 聚合路径对所有周期复用同一个区间分布，只乘以固定的周期倍数。
//! 这不是真正的期限结构，在没有多周期价格序列之前保持这种做法。

use std::collections::BTreeMap;

use memecoin_risk_domain::{Basket, Period, TokenAggregate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::EngineConfig;
use crate::numeric::{mean, median, percent, relative_change, to_decimal, to_f64};

/// 由高低价推导的区间波动率 (%)，low <= 0 或超出 Decimal 范围时为 0
pub fn range_volatility_pct(high: f64, low: f64) -> f64 {
    if low <= 0.0 {
        return 0.0;
    }
    match relative_change(low, high).and_then(percent) {
        Some(pct) => to_f64(pct),
        None => {
            debug!("区间波动率无法表示: high={}, low={}", high, low);
            0.0
        }
    }
}

/// 单个代币的相对价格区间 (high - low) / low，low <= 0 或数值无效时为 None
pub fn relative_range(token: &TokenAggregate) -> Option<Decimal> {
    if token.low <= 0.0 {
        return None;
    }
    relative_change(token.low, token.high)
}

/// 篮子内所有有效的相对价格区间 (输入顺序，可能包含负值)
pub fn relative_ranges(basket: &Basket) -> Vec<Decimal> {
    basket.iter().filter_map(relative_range).collect()
}

/// 基础波动率来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseVolatility {
    /// 由价格区间中位数得到 (%)
    Observed(Decimal),
    /// 没有任何有效价格区间，使用基准常量 (%)
    Baseline(Decimal),
}

impl BaseVolatility {
    pub fn value(&self) -> Decimal {
        match self {
            BaseVolatility::Observed(v) | BaseVolatility::Baseline(v) => *v,
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, BaseVolatility::Baseline(_))
    }
}

/// 基础波动率 = median(v) x 100
///
/// 负区间被丢弃，单个区间先截断到 `max_token_range`，中位数抵抗流动性差的代币造成的极值
pub fn base_volatility(ranges: &[Decimal], config: &EngineConfig) -> BaseVolatility {
    let valid: Vec<Decimal> = ranges
        .iter()
        .filter(|v| **v >= Decimal::ZERO)
        .map(|v| (*v).min(config.max_token_range))
        .collect();

    match median(&valid) {
        // 溢出说明已远超上限，按上限处理
        Some(m) => BaseVolatility::Observed(percent(m).unwrap_or(Decimal::MAX)),
        None => BaseVolatility::Baseline(config.baseline_volatility),
    }
}

/// 各周期波动率 (%)：min(base x 周期倍数, 上限)，空篮子全部为 0
pub fn period_volatilities(basket: &Basket, config: &EngineConfig) -> BTreeMap<Period, Decimal> {
    if basket.is_empty() {
        return Period::ALL.iter().map(|p| (*p, Decimal::ZERO)).collect();
    }

    let base = base_volatility(&relative_ranges(basket), config);
    if base.is_baseline() {
        debug!("篮子内没有有效的价格区间，使用基准波动率 {}%", base.value());
    }

    Period::ALL
        .iter()
        .map(|period| {
            let multiplier = to_decimal(period.multiplier()).unwrap_or(Decimal::ONE);
            let vol = base
                .value()
                .checked_mul(multiplier)
                .unwrap_or(Decimal::MAX)
                .min(config.volatility_cap);
            (*period, vol)
        })
        .collect()
}

/// 各周期收益风险比
///
/// 平均收益取所有有效相对区间的均值 (不截断、与周期无关)，
/// 波动率 (小数形式) 不超过最小阈值时比值为 0，结果截断到 [-bound, bound]
pub fn return_risk_ratios(
    basket: &Basket,
    volatilities: &BTreeMap<Period, Decimal>,
    config: &EngineConfig,
) -> BTreeMap<Period, Decimal> {
    let avg_return = mean(&relative_ranges(basket)).unwrap_or(Decimal::ZERO);

    Period::ALL
        .iter()
        .map(|period| {
            let vol = volatilities.get(period).copied().unwrap_or(Decimal::ZERO) / dec!(100);
            let ratio = if vol > config.min_volatility_ratio {
                // 商溢出时按符号取边界值
                let saturated = if avg_return.is_sign_negative() {
                    -config.ratio_bound
                } else {
                    config.ratio_bound
                };
                avg_return
                    .checked_div(vol)
                    .unwrap_or(saturated)
                    .clamp(-config.ratio_bound, config.ratio_bound)
            } else {
                Decimal::ZERO
            };
            (*period, ratio)
        })
        .collect()
}

/// 序列路径：自相关修正后的年化已实现波动率 (%)
///
/// 少于 2 个正价格、少于 2 个收益率或方差非正时返回 0
pub fn realized_volatility(prices: &[f64], period: Period) -> f64 {
    let valid: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();
    if valid.len() < 2 {
        return 0.0;
    }

    let log_returns: Vec<f64> = valid.windows(2).map(|w| w[1].ln() - w[0].ln()).collect();
    let n = log_returns.len();
    if n < 2 {
        return 0.0;
    }

    let avg = log_returns.iter().sum::<f64>() / n as f64;
    let sample_var = log_returns.iter().map(|r| (r - avg).powi(2)).sum::<f64>() / (n - 1) as f64;
    if sample_var.is_nan() || sample_var <= 0.0 {
        return 0.0;
    }

    let rho = lag1_autocorrelation(&log_returns);
    let adjusted_var = sample_var * (1.0 + 2.0 * rho);
    if adjusted_var.is_nan() || adjusted_var <= 0.0 {
        return 0.0;
    }

    let annualized = (adjusted_var * period.periods_per_year() as f64).sqrt() * 100.0;
    if annualized.is_finite() {
        annualized
    } else {
        0.0
    }
}

/// 一阶自相关系数 (Pearson)，无法定义时为 0
fn lag1_autocorrelation(returns: &[f64]) -> f64 {
    if returns.len() < 3 {
        return 0.0;
    }
    let x = &returns[..returns.len() - 1];
    let y = &returns[1..];
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
        var_y += (b - mean_y).powi(2);
    }

    let rho = cov / (var_x * var_y).sqrt();
    if rho.is_finite() {
        rho
    } else {
        0.0
    }
}

/// 序列路径：收益风险比 = 总收益 / (波动率 / 100)
pub fn series_return_to_risk(prices: &[f64], period: Period) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }
    let gross_return = relative_change(prices[0], prices[prices.len() - 1]).unwrap_or(Decimal::ZERO);
    let vol = realized_volatility(prices, period);
    if vol <= 0.0 {
        return 0.0;
    }
    to_decimal(vol / 100.0)
        .and_then(|v| gross_return.checked_div(v))
        .map(to_f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn token(mint: &str, high: f64, low: f64) -> TokenAggregate {
        TokenAggregate {
            mint_address: mint.to_string(),
            volume: 1.0,
            high,
            low,
            ..Default::default()
        }
    }

    #[test]
    fn test_range_volatility_pct() {
        assert_abs_diff_eq!(range_volatility_pct(150.0, 100.0), 50.0);
        assert_eq!(range_volatility_pct(150.0, 0.0), 0.0);
        assert_eq!(range_volatility_pct(150.0, -1.0), 0.0);
    }

    #[test]
    fn test_extreme_range_is_capped() {
        // low = 1, high = 1000 -> 99900% 的原始区间，必须被截断
        let basket = Basket::new(vec![token("A", 1000.0, 1.0)]);
        let vols = period_volatilities(&basket, &EngineConfig::default());
        for period in Period::ALL {
            assert!(vols[&period] <= dec!(500));
        }
        assert_eq!(vols[&Period::OneMonth], dec!(500));
    }

    #[test]
    fn test_period_multipliers_applied_to_median() {
        let basket = Basket::new(vec![
            token("A", 1.1, 1.0),
            token("B", 1.2, 1.0),
            token("C", 1.3, 1.0),
        ]);
        let vols = period_volatilities(&basket, &EngineConfig::default());
        assert_eq!(vols[&Period::TwoWeeks], dec!(16));
        assert_eq!(vols[&Period::OneMonth], dec!(20));
        assert_eq!(vols[&Period::SixMonths], dec!(24));
        assert_eq!(vols[&Period::OneYear], dec!(30));
    }

    #[test]
    fn test_baseline_fallback_is_explicit() {
        let config = EngineConfig::default();
        let base = base_volatility(&[], &config);
        assert_eq!(base, BaseVolatility::Baseline(dec!(50)));

        // 只有负区间也退回基准值
        let base = base_volatility(&[dec!(-0.5)], &config);
        assert!(base.is_baseline());

        // 非空篮子但全部 low = 0
        let basket = Basket::new(vec![token("A", 2.0, 0.0)]);
        let vols = period_volatilities(&basket, &config);
        assert_eq!(vols[&Period::OneMonth], dec!(50));
        assert_eq!(vols[&Period::OneYear], dec!(75));
    }

    #[test]
    fn test_empty_basket_defaults() {
        let basket = Basket::empty();
        let config = EngineConfig::default();
        let vols = period_volatilities(&basket, &config);
        let ratios = return_risk_ratios(&basket, &vols, &config);
        for period in Period::ALL {
            assert_eq!(vols[&period], Decimal::ZERO);
            assert_eq!(ratios[&period], Decimal::ZERO);
        }
    }

    #[test]
    fn test_ratio_threshold_short_circuit() {
        // 区间很小 -> 波动率 0.08% (2w)，低于 0.1% 阈值，比值为 0
        let basket = Basket::new(vec![token("A", 1.001, 1.0)]);
        let config = EngineConfig::default();
        let vols = period_volatilities(&basket, &config);
        assert_eq!(vols[&Period::TwoWeeks], dec!(0.08));
        let ratios = return_risk_ratios(&basket, &vols, &config);
        assert_eq!(ratios[&Period::TwoWeeks], Decimal::ZERO);
        assert_eq!(ratios[&Period::OneMonth], Decimal::ZERO);
        // 1y: 0.15% > 0.1%，比值 = 0.001 / 0.0015
        assert!(ratios[&Period::OneYear] > Decimal::ZERO);
    }

    #[test]
    fn test_ratio_uses_uncapped_mean() {
        let basket = Basket::new(vec![token("A", 1.5, 1.0), token("B", 2.0, 1.0)]);
        let config = EngineConfig::default();
        let vols = period_volatilities(&basket, &config);
        // median = 0.75 -> 75%, mean = 0.75
        assert_eq!(vols[&Period::OneMonth], dec!(75));
        let ratios = return_risk_ratios(&basket, &vols, &config);
        assert_eq!(ratios[&Period::OneMonth], dec!(1));
    }

    #[test]
    fn test_ratio_is_clamped() {
        let basket = Basket::new(vec![token("A", 1_000_000.0, 1.0)]);
        let mut config = EngineConfig::default();
        config.ratio_bound = dec!(10);
        let vols = period_volatilities(&basket, &config);
        let ratios = return_risk_ratios(&basket, &vols, &config);
        assert_eq!(ratios[&Period::OneMonth], dec!(10));
    }

    #[test]
    fn test_extreme_prices_do_not_panic() {
        // (1e10 - 1e-18) / 1e-18 可以表示，但 x 100 超出 Decimal 范围
        assert_eq!(range_volatility_pct(1e10, 1e-18), 0.0);

        let mut config = EngineConfig::default();
        config.max_token_range = Decimal::MAX;
        let basket = Basket::new(vec![token("A", 1e10, 1e-18), token("B", 1e10, 1e-18)]);
        let vols = period_volatilities(&basket, &config);
        let ratios = return_risk_ratios(&basket, &vols, &config);
        for period in Period::ALL {
            assert_eq!(vols[&period], dec!(500));
            assert_eq!(ratios[&period], dec!(1000));
        }
    }

    #[test]
    fn test_realized_volatility_requires_two_positive_prices() {
        assert_eq!(realized_volatility(&[], Period::OneMonth), 0.0);
        assert_eq!(realized_volatility(&[1.0, 0.0, -2.0], Period::OneMonth), 0.0);
        // 两个价格只有一个收益率，无法计算样本方差
        assert_eq!(realized_volatility(&[1.0, 2.0], Period::OneMonth), 0.0);
    }

    #[test]
    fn test_realized_volatility_constant_prices() {
        assert_eq!(realized_volatility(&[5.0, 5.0, 5.0, 5.0], Period::OneYear), 0.0);
    }

    #[test]
    fn test_realized_volatility_alternating_series() {
        // 收益率交替 +r / -r，一阶自相关为 -1，修正后的方差为负 -> 0
        let prices = [100.0, 110.0, 100.0, 110.0, 100.0];
        assert_eq!(realized_volatility(&prices, Period::OneMonth), 0.0);
    }

    #[test]
    fn test_realized_volatility_annualization() {
        // 收益率逐步放大，正自相关
        let prices = [100.0, 101.0, 103.0, 106.0, 110.0, 115.0];
        let monthly = realized_volatility(&prices, Period::OneMonth);
        let yearly = realized_volatility(&prices, Period::OneYear);
        assert!(monthly > 0.0);
        assert_abs_diff_eq!(monthly / yearly, 12f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_series_return_to_risk() {
        let prices = [100.0, 101.0, 103.0, 106.0, 110.0, 115.0];
        let vol = realized_volatility(&prices, Period::OneMonth);
        assert!(vol > 0.0);
        let ratio = series_return_to_risk(&prices, Period::OneMonth);
        assert_abs_diff_eq!(ratio, 0.15 / (vol / 100.0), epsilon = 1e-6);
        assert_eq!(series_return_to_risk(&[1.0], Period::OneMonth), 0.0);
        assert_eq!(series_return_to_risk(&[5.0, 5.0, 5.0], Period::OneMonth), 0.0);
    }

    #[test]
    fn test_lag1_autocorrelation_undefined() {
        assert_eq!(lag1_autocorrelation(&[0.1, 0.2]), 0.0);
        assert_eq!(lag1_autocorrelation(&[0.1, 0.1, 0.1, 0.1]), 0.0);
    }
}
