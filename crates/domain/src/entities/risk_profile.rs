//! 风险收益画像 (引擎输出)
//!
//! 所有价格、比率在输出边界均为 f64，内部计算精度不在此体现

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value_objects::Period;

/// 最大回撤
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaxDrawdown {
    /// 回撤百分比 (<= 0)
    pub percentage: f64,
    /// 回撤最深处对应的日期，聚合数据没有日期
    pub date: Option<String>,
}

/// ROI 价格来源
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiSource {
    /// 开盘价 -> 收盘价
    #[default]
    OpenClose,
    /// 外部观测的最早价 -> 最新价
    PriceObservation,
}

/// 篮子级 ROI 统计 (保留两位小数)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiStatistics {
    pub total_tokens: usize,
    pub positive_roi_count: usize,
    /// 非正收益的代币数 (total - positive)
    pub negative_roi_count: usize,
    pub average_roi: f64,
    pub median_roi: f64,
    pub max_roi: f64,
    pub min_roi: f64,
    pub roi_std: f64,
    pub positive_roi_percentage: f64,
    pub volume_weighted_roi: f64,
}

/// 单个代币的 ROI 明细
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiTokenRecord {
    pub symbol: String,
    pub name: String,
    pub mint_address: String,
    /// 开盘价或最早观测价
    pub start_price: f64,
    /// 收盘价或最新观测价
    pub end_price: f64,
    pub roi_percentage: f64,
    pub roi_absolute: f64,
    pub roi_positive: bool,
    pub volume: f64,
    pub volatility: f64,
}

/// 成交量排名靠前的代币
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopTokenRecord {
    pub symbol: String,
    pub name: String,
    pub mint_address: String,
    pub volume: f64,
    pub price_range: f64,
    /// 价格区间 / 收盘价 (%)
    pub price_volatility: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub count: u64,
    /// 在 Top-N 成交量中的占比 (%)
    pub volume_weight: f64,
}

/// 成交量分位数
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeQuartiles {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub q100: f64,
}

/// 指数构建说明
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexConstruction {
    pub total_tokens: usize,
    pub total_volume: f64,
    pub volume_quartiles: VolumeQuartiles,
    /// 前 10 名成交量贡献 (%)
    pub top_10_contribution: f64,
    pub excluded_tokens: Vec<String>,
    pub selection_criteria: Vec<String>,
    pub weighting_method: String,
}

/// 风险收益画像
///
/// 每次调用基于一份篮子快照重新生成，生成后不再修改
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// 指数名称
    pub index: String,
    /// 成分稳定性 (%)，= clamp(100 - weight_concentration, 0, 100)
    pub constituent_stability: f64,
    /// 权重集中度 (HHI x 100)
    pub weight_concentration: f64,
    /// 流动性覆盖率 (%)
    pub liquidity_coverage: f64,
    pub volatilities: BTreeMap<Period, f64>,
    pub return_risk_ratios: BTreeMap<Period, f64>,
    pub max_drawdown: MaxDrawdown,
    pub roi_source: RoiSource,
    pub roi_statistics: RoiStatistics,
    pub top_roi_tokens: Vec<RoiTokenRecord>,
    pub worst_roi_tokens: Vec<RoiTokenRecord>,
    pub top_tokens: Vec<TopTokenRecord>,
    pub index_construction: IndexConstruction,
}

impl RiskProfile {
    pub fn volatility(&self, period: Period) -> f64 {
        self.volatilities.get(&period).copied().unwrap_or(0.0)
    }

    pub fn return_risk_ratio(&self, period: Period) -> f64 {
        self.return_risk_ratios.get(&period).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_period_defaults_to_zero() {
        let mut profile = RiskProfile::default();
        profile.volatilities.insert(Period::OneMonth, 42.0);
        assert_eq!(profile.volatility(Period::OneMonth), 42.0);
        assert_eq!(profile.volatility(Period::OneYear), 0.0);
        assert_eq!(profile.return_risk_ratio(Period::TwoWeeks), 0.0);
    }

    #[test]
    fn test_serialized_shape() {
        let mut profile = RiskProfile {
            index: "Memecoin 50 Volume".to_string(),
            ..Default::default()
        };
        profile.volatilities.insert(Period::TwoWeeks, 40.0);
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["index"], "Memecoin 50 Volume");
        assert_eq!(value["volatilities"]["2w"], 40.0);
        assert_eq!(value["roi_source"], "open_close");
        assert!(value["max_drawdown"]["date"].is_null());
    }
}
