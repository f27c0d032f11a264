//! 权重集中度与成分稳定性
//!
//! 稳定性并不是真正的跨期成分对比，只是同一个 HHI 的变换: 100 x (1 - HHI)

use memecoin_risk_domain::Basket;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::numeric::{round2, sum, to_decimal};

/// 成交量权重 w_i = volume_i / Σvolume，空篮子、总成交量为 0 或溢出时返回空
pub fn volume_weights(basket: &Basket) -> Vec<Decimal> {
    let volumes: Vec<Decimal> = basket
        .iter()
        .map(|t| to_decimal(t.volume).unwrap_or(Decimal::ZERO))
        .collect();
    let Some(total) = sum(&volumes) else {
        warn!("篮子总成交量超出 Decimal 范围，无法计算权重");
        return Vec::new();
    };
    if total <= Decimal::ZERO {
        return Vec::new();
    }
    volumes
        .iter()
        .map(|v| v.checked_div(total).unwrap_or(Decimal::ZERO))
        .collect()
}

/// Herfindahl 指数 Σ(w_i²) ∈ [0, 1]
pub fn herfindahl_index(basket: &Basket) -> Decimal {
    volume_weights(basket)
        .iter()
        .fold(Decimal::ZERO, |acc, w| acc + w * w)
        .clamp(Decimal::ZERO, Decimal::ONE)
}

/// 权重集中度 (%) = HHI x 100，保留两位小数
pub fn weight_concentration(basket: &Basket) -> Decimal {
    round2(herfindahl_index(basket) * dec!(100))
}

/// 成分稳定性 (%) = clamp(100 - 集中度, 0, 100)
pub fn stability_from_concentration(concentration: Decimal) -> Decimal {
    (dec!(100) - concentration).clamp(Decimal::ZERO, dec!(100))
}

pub fn constituent_stability(basket: &Basket) -> Decimal {
    stability_from_concentration(weight_concentration(basket))
}
