//! 代币收益率 (ROI) 与篮子级统计
//!
//! 两种价格来源互斥：提供了外部价格观测就使用观测价，否则使用开盘/收盘价

use std::collections::HashMap;

use memecoin_risk_domain::{
    Basket, PriceObservation, RoiSource, RoiStatistics, RoiTokenRecord, TokenAggregate,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::numeric::{
    difference, mean, median, percent, relative_change, round2_f64, sample_std, to_decimal, to_f64,
};

/// 单个代币的收益率，保留 Decimal 精度供统计使用
#[derive(Debug, Clone, PartialEq)]
pub struct RoiEntry {
    pub record: RoiTokenRecord,
    /// 收益率 (%)，超出 Decimal 范围时为 None，不参与篮子统计和排名
    pub roi: Option<Decimal>,
    pub volume: Decimal,
}

fn roi_entry(token: &TokenAggregate, prices: &PriceObservation) -> RoiEntry {
    let (start, end) = (prices.oldest_price, prices.latest_price);
    let roi = if prices.is_usable() {
        relative_change(start, end).and_then(percent)
    } else {
        Some(Decimal::ZERO)
    };
    if roi.is_none() {
        debug!("收益率超出范围，代币 {} 不参与统计: {} -> {}", token.mint_address, start, end);
    }
    let roi_value = roi.unwrap_or(Decimal::ZERO);

    RoiEntry {
        record: RoiTokenRecord {
            symbol: token.symbol.clone(),
            name: token.name.clone(),
            mint_address: token.mint_address.clone(),
            start_price: start,
            end_price: end,
            roi_percentage: to_f64(roi_value),
            roi_absolute: to_f64(difference(end, start)),
            roi_positive: roi_value > Decimal::ZERO,
            volume: token.volume,
            volatility: token.volatility,
        },
        roi,
        volume: to_decimal(token.volume).unwrap_or(Decimal::ZERO),
    }
}

/// 开盘价 -> 收盘价
pub fn open_close_roi(token: &TokenAggregate) -> RoiEntry {
    roi_entry(token, &PriceObservation::new(token.open, token.close))
}

/// 最早观测价 -> 最新观测价，缺少观测时两个价格都记为 0
pub fn observed_roi(token: &TokenAggregate, observation: Option<&PriceObservation>) -> RoiEntry {
    match observation {
        Some(obs) => roi_entry(token, obs),
        None => roi_entry(token, &PriceObservation::default()),
    }
}

/// 按数据可用性选择价格来源，计算每个代币的收益率 (篮子顺序)
pub fn roi_per_token(
    basket: &Basket,
    observations: Option<&HashMap<String, PriceObservation>>,
) -> (RoiSource, Vec<RoiEntry>) {
    match observations.filter(|obs| !obs.is_empty()) {
        Some(obs) => {
            let entries = basket
                .iter()
                .map(|t| observed_roi(t, obs.get(&t.mint_address)))
                .collect();
            (RoiSource::PriceObservation, entries)
        }
        None => (
            RoiSource::OpenClose,
            basket.iter().map(open_close_roi).collect(),
        ),
    }
}

/// 成交量加权收益率 Σ(roi_i x w_i)，w_i = volume_i / Σvolume
///
/// 乘积或累加溢出的代币同时从分子和分母中剔除
fn volume_weighted_roi(entries: &[(&RoiEntry, Decimal)]) -> Decimal {
    let mut weighted = Decimal::ZERO;
    let mut total_volume = Decimal::ZERO;

    for (entry, roi) in entries {
        let next = roi.checked_mul(entry.volume).and_then(|product| {
            Some((weighted.checked_add(product)?, total_volume.checked_add(entry.volume)?))
        });
        match next {
            Some((w, v)) => {
                weighted = w;
                total_volume = v;
            }
            None => warn!(
                "代币 {} 的成交量加权收益超出范围，已从加权统计中剔除",
                entry.record.mint_address
            ),
        }
    }

    if total_volume <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    weighted.checked_div(total_volume).unwrap_or(Decimal::ZERO)
}

/// 篮子级 ROI 统计，所有数值保留两位小数；空输入返回全 0
///
/// 收益率无法表示的代币不计入任何统计项
pub fn roi_statistics(entries: &[RoiEntry]) -> RoiStatistics {
    let valid: Vec<(&RoiEntry, Decimal)> = entries
        .iter()
        .filter_map(|e| e.roi.map(|roi| (e, roi)))
        .collect();
    if valid.len() < entries.len() {
        warn!("{} 个代币的收益率超出范围，未计入统计", entries.len() - valid.len());
    }
    if valid.is_empty() {
        return RoiStatistics::default();
    }

    let total = valid.len();
    let rois: Vec<Decimal> = valid.iter().map(|(_, roi)| *roi).collect();
    let positive = rois.iter().filter(|roi| **roi > Decimal::ZERO).count();

    let positive_pct = Decimal::from(positive)
        .checked_div(Decimal::from(total))
        .and_then(percent)
        .unwrap_or(Decimal::ZERO);

    RoiStatistics {
        total_tokens: total,
        positive_roi_count: positive,
        negative_roi_count: total - positive,
        average_roi: round2_f64(mean(&rois).unwrap_or(Decimal::ZERO)),
        median_roi: round2_f64(median(&rois).unwrap_or(Decimal::ZERO)),
        max_roi: round2_f64(rois.iter().max().copied().unwrap_or(Decimal::ZERO)),
        min_roi: round2_f64(rois.iter().min().copied().unwrap_or(Decimal::ZERO)),
        roi_std: round2_f64(sample_std(&rois)),
        positive_roi_percentage: round2_f64(positive_pct),
        volume_weighted_roi: round2_f64(volume_weighted_roi(&valid)),
    }
}

fn ranked(entries: &[RoiEntry]) -> Vec<(&RoiEntry, Decimal)> {
    entries
        .iter()
        .filter_map(|e| e.roi.map(|roi| (e, roi)))
        .collect()
}

/// 收益率最高的 N 个代币，相同收益率保持篮子顺序
pub fn top_roi(entries: &[RoiEntry], n: usize) -> Vec<RoiTokenRecord> {
    let mut ranked = ranked(entries);
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(e, _)| e.record.clone()).collect()
}

/// 收益率最低的 N 个代币
pub fn worst_roi(entries: &[RoiEntry], n: usize) -> Vec<RoiTokenRecord> {
    let mut ranked = ranked(entries);
    ranked.sort_by(|a, b| a.1.cmp(&b.1));
    ranked.into_iter().take(n).map(|(e, _)| e.record.clone()).collect()
}
