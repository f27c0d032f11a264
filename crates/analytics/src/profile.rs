//! 风险收益画像组装

use std::collections::{BTreeMap, HashMap};

use memecoin_risk_domain::{Basket, Period, PriceObservation, RiskProfile};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use crate::config::EngineConfig;
use crate::diagnostics::{index_construction, top_tokens_by_volume};
use crate::error::Result;
use crate::ingestion::parse_basket;
use crate::metrics::{
    aggregate_max_drawdown, liquidity_coverage, period_volatilities, return_risk_ratios,
    roi_per_token, roi_statistics, top_roi, weight_concentration, worst_roi,
};
use crate::metrics::concentration::stability_from_concentration;
use crate::numeric::{round2_f64, to_decimal};

fn rounded(values: BTreeMap<Period, Decimal>) -> BTreeMap<Period, f64> {
    values.into_iter().map(|(p, v)| (p, round2_f64(v))).collect()
}

/// 基于一份篮子快照生成风险画像
///
/// 纯函数，不保留任何状态；核心数值在输出边界保留两位小数
pub fn generate_risk_profile(
    index_name: &str,
    basket: &Basket,
    price_observations: Option<&HashMap<String, PriceObservation>>,
    config: &EngineConfig,
) -> RiskProfile {
    let concentration = weight_concentration(basket);
    let stability = stability_from_concentration(concentration);

    let volatilities = period_volatilities(basket, config);
    let ratios = return_risk_ratios(basket, &volatilities, config);

    let mut max_drawdown = aggregate_max_drawdown(basket);
    max_drawdown.percentage = to_decimal(max_drawdown.percentage)
        .map(round2_f64)
        .unwrap_or(0.0);

    let (roi_source, roi_entries) = roi_per_token(basket, price_observations);

    info!(
        "生成风险画像: index={}, tokens={}, roi_source={:?}",
        index_name,
        basket.len(),
        roi_source
    );

    RiskProfile {
        index: index_name.to_string(),
        constituent_stability: round2_f64(stability),
        weight_concentration: round2_f64(concentration),
        liquidity_coverage: round2_f64(liquidity_coverage(basket, config)),
        volatilities: rounded(volatilities),
        return_risk_ratios: rounded(ratios),
        max_drawdown,
        roi_source,
        roi_statistics: roi_statistics(&roi_entries),
        top_roi_tokens: top_roi(&roi_entries, config.top_n),
        worst_roi_tokens: worst_roi(&roi_entries, config.top_n),
        top_tokens: top_tokens_by_volume(basket, config.top_n),
        index_construction: index_construction(basket, config),
    }
}

/// 解析 + 组装，输入结构无效时整体失败，不产生部分结果
pub fn process_basket(
    raw: &Value,
    index_name: &str,
    market_caps: Option<&HashMap<String, f64>>,
    price_observations: Option<&HashMap<String, PriceObservation>>,
    config: &EngineConfig,
) -> Result<RiskProfile> {
    let basket = parse_basket(raw, market_caps)?;
    Ok(generate_risk_profile(index_name, &basket, price_observations, config))
}
