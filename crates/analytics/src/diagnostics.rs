//! 成交量排名与指数构建说明

use memecoin_risk_domain::{Basket, IndexConstruction, TokenAggregate, TopTokenRecord, VolumeQuartiles};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::config::EngineConfig;
use crate::numeric::{difference, percent, quantile, round2_f64, sum, to_decimal, to_f64};

fn volume_of(token: &TokenAggregate) -> Decimal {
    to_decimal(token.volume).unwrap_or(Decimal::ZERO)
}

/// 按成交量降序的前 N 个代币，相同成交量保持篮子顺序
fn ranked_by_volume(basket: &Basket, n: usize) -> Vec<&TokenAggregate> {
    let mut ranked: Vec<&TokenAggregate> = basket.iter().collect();
    ranked.sort_by(|a, b| volume_of(b).cmp(&volume_of(a)));
    ranked.truncate(n);
    ranked
}

/// 成交量前 N 的代币及其派生指标
///
/// volume_weight 是相对前 N 名成交量合计的占比，而不是整个篮子
pub fn top_tokens_by_volume(basket: &Basket, n: usize) -> Vec<TopTokenRecord> {
    let ranked = ranked_by_volume(basket, n);
    let top_volume = sum(&ranked.iter().map(|t| volume_of(t)).collect::<Vec<_>>());
    if top_volume.is_none() {
        warn!("前 {} 名成交量合计超出范围，成交量权重记为 0", n);
    }

    ranked
        .into_iter()
        .map(|token| {
            let price_range = difference(token.high, token.low);
            let price_volatility = match to_decimal(token.close) {
                Some(close) if close > Decimal::ZERO => price_range
                    .checked_div(close)
                    .and_then(percent)
                    .unwrap_or(Decimal::ZERO),
                _ => Decimal::ZERO,
            };
            let volume_weight = top_volume
                .and_then(|total| volume_of(token).checked_div(total))
                .and_then(percent)
                .unwrap_or(Decimal::ZERO);

            TopTokenRecord {
                symbol: token.symbol.clone(),
                name: token.name.clone(),
                mint_address: token.mint_address.clone(),
                volume: token.volume,
                price_range: to_f64(price_range),
                price_volatility: to_f64(price_volatility),
                high: token.high,
                low: token.low,
                close: token.close,
                count: token.count,
                volume_weight: to_f64(volume_weight),
            }
        })
        .collect()
}

/// 成交量 25/50/75/100 分位 (线性插值)
pub fn volume_quartiles(basket: &Basket) -> VolumeQuartiles {
    let volumes: Vec<Decimal> = basket.iter().map(volume_of).collect();
    VolumeQuartiles {
        q25: to_f64(quantile(&volumes, dec!(0.25))),
        q50: to_f64(quantile(&volumes, dec!(0.5))),
        q75: to_f64(quantile(&volumes, dec!(0.75))),
        q100: to_f64(quantile(&volumes, Decimal::ONE)),
    }
}

/// 指数构建说明：篮子统计 + 静态的方法描述
pub fn index_construction(basket: &Basket, config: &EngineConfig) -> IndexConstruction {
    let total_volume = sum(&basket.iter().map(volume_of).collect::<Vec<_>>());
    let top_volume = sum(
        &ranked_by_volume(basket, 10)
            .into_iter()
            .map(volume_of)
            .collect::<Vec<_>>(),
    );
    let top_10_contribution = match (top_volume, total_volume) {
        (Some(top), Some(total)) => top
            .checked_div(total)
            .and_then(percent)
            .unwrap_or(Decimal::ZERO),
        _ => {
            warn!("篮子成交量合计超出 Decimal 范围，前十贡献度记为 0");
            Decimal::ZERO
        }
    };

    IndexConstruction {
        total_tokens: basket.len(),
        total_volume: basket.total_volume(),
        volume_quartiles: volume_quartiles(basket),
        top_10_contribution: round2_f64(top_10_contribution),
        excluded_tokens: config.methodology.excluded_tokens.clone(),
        selection_criteria: config.methodology.selection_criteria.clone(),
        weighting_method: config.methodology.weighting_method.clone(),
    }
}
