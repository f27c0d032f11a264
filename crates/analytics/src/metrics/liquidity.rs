//! 流动性覆盖率：成交额占市值的比例

use memecoin_risk_domain::Basket;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EngineConfig;
use crate::numeric::{percent, to_decimal};

/// 覆盖率 (%) = Σ(volume x close) / Σmarket_cap x 100，上限见配置
///
/// 只统计收盘价为正的代币；市值合计为 0 (全部未知) 时返回 0。
/// 成交额或累加溢出的代币同时从分子和分母中剔除，最终比率溢出时取上限
pub fn liquidity_coverage(basket: &Basket, config: &EngineConfig) -> Decimal {
    let mut traded_value = Decimal::ZERO;
    let mut market_cap = Decimal::ZERO;

    for token in basket.iter().filter(|t| t.close > 0.0) {
        let (Some(volume), Some(close)) = (to_decimal(token.volume), to_decimal(token.close)) else {
            continue;
        };
        let cap = if token.market_cap > 0.0 {
            to_decimal(token.market_cap).unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };
        let next = volume.checked_mul(close).and_then(|value| {
            Some((traded_value.checked_add(value)?, market_cap.checked_add(cap)?))
        });
        match next {
            Some((value, cap)) => {
                traded_value = value;
                market_cap = cap;
            }
            None => warn!("代币 {} 的成交额超出范围，未计入流动性覆盖率", token.mint_address),
        }
    }

    if market_cap <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    traded_value
        .checked_div(market_cap)
        .and_then(percent)
        .unwrap_or(config.liquidity_coverage_cap)
        .min(config.liquidity_coverage_cap)
}
