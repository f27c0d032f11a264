//! 外部价格观测 (最早价 / 最新价)

use serde::{Deserialize, Serialize};

/// 按代币地址索引的外部价格观测，仅用于外部价格来源的 ROI 计算
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceObservation {
    pub oldest_price: f64,
    pub latest_price: f64,
    pub symbol: String,
    pub name: String,
}

impl PriceObservation {
    pub fn new(oldest_price: f64, latest_price: f64) -> Self {
        Self {
            oldest_price,
            latest_price,
            ..Default::default()
        }
    }

    /// 两个价格都为正才可用于计算收益率
    pub fn is_usable(&self) -> bool {
        self.oldest_price > 0.0 && self.latest_price > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_fields() {
        let obs: PriceObservation = serde_json::from_str(r#"{"oldest_price": 2.5}"#).unwrap();
        assert_eq!(obs.oldest_price, 2.5);
        assert_eq!(obs.latest_price, 0.0);
        assert!(!obs.is_usable());
    }

    #[test]
    fn test_usable() {
        assert!(PriceObservation::new(1.0, 2.0).is_usable());
        assert!(!PriceObservation::new(0.0, 2.0).is_usable());
    }
}
