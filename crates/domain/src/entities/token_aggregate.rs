//! 代币聚合实体

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 代币交易聚合 (篮子中的一行)
///
/// 由上游聚合接口的一条记录归一化而来，价格字段为区间内的最高/最低/开盘/收盘价
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenAggregate {
    /// 代币地址 (篮子内唯一)
    pub mint_address: String,
    pub name: String,
    pub symbol: String,
    /// 交易对另一侧的代币
    pub side_symbol: String,
    pub side_mint_address: String,
    /// 成交量 (>= 0)
    pub volume: f64,
    /// 上游提供的波动率 (可能缺失)
    pub provider_volatility: Option<f64>,
    /// 实际使用的波动率 (%)：上游值，缺失时由高低价推导
    pub volatility: f64,
    pub high: f64,
    pub low: f64,
    pub open: f64,
    pub close: f64,
    /// 成交笔数
    pub count: u64,
    /// 市值 (USD)，未知为 0
    pub market_cap: f64,
}

/// 代币篮子
///
/// 保持输入顺序 (排名输出中相同值按输入顺序排列)，代币地址唯一
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    tokens: Vec<TokenAggregate>,
}

impl Basket {
    /// 创建篮子，重复的代币地址只保留第一次出现的记录
    pub fn new(tokens: Vec<TokenAggregate>) -> Self {
        let mut seen = HashSet::with_capacity(tokens.len());
        let tokens = tokens
            .into_iter()
            .filter(|t| seen.insert(t.mint_address.clone()))
            .collect();
        Self { tokens }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[TokenAggregate] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenAggregate> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, mint_address: &str) -> Option<&TokenAggregate> {
        self.tokens.iter().find(|t| t.mint_address == mint_address)
    }

    /// 篮子中所有代币地址 (输入顺序)
    pub fn mint_addresses(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.mint_address.clone()).collect()
    }

    /// 篮子总成交量，非有限值不计入
    pub fn total_volume(&self) -> f64 {
        self.tokens
            .iter()
            .map(|t| t.volume)
            .filter(|v| v.is_finite())
            .sum()
    }

    /// 按波动率降序排列的视图，相同波动率保持输入顺序
    pub fn ordered_by_volatility(&self) -> Vec<&TokenAggregate> {
        let mut ordered: Vec<&TokenAggregate> = self.tokens.iter().collect();
        ordered.sort_by(|a, b| b.volatility.total_cmp(&a.volatility));
        ordered
    }
}

impl<'a> IntoIterator for &'a Basket {
    type Item = &'a TokenAggregate;
    type IntoIter = std::slice::Iter<'a, TokenAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(mint: &str, volume: f64, volatility: f64) -> TokenAggregate {
        TokenAggregate {
            mint_address: mint.to_string(),
            symbol: mint.to_string(),
            volume,
            volatility,
            ..Default::default()
        }
    }

    #[test]
    fn test_basket_keeps_first_duplicate() {
        let basket = Basket::new(vec![
            token("A", 10.0, 1.0),
            token("B", 20.0, 2.0),
            token("A", 99.0, 3.0),
        ]);
        assert_eq!(basket.len(), 2);
        assert_eq!(basket.get("A").map(|t| t.volume), Some(10.0));
        assert_eq!(basket.mint_addresses(), vec!["A", "B"]);
        assert_eq!(basket.total_volume(), 30.0);
    }

    #[test]
    fn test_ordered_by_volatility_is_stable() {
        let basket = Basket::new(vec![
            token("A", 1.0, 5.0),
            token("B", 1.0, 9.0),
            token("C", 1.0, 5.0),
        ]);
        let mints: Vec<&str> = basket
            .ordered_by_volatility()
            .iter()
            .map(|t| t.mint_address.as_str())
            .collect();
        assert_eq!(mints, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_total_volume_skips_non_finite() {
        let basket = Basket::new(vec![token("A", 10.0, 1.0), token("B", f64::INFINITY, 1.0)]);
        assert_eq!(basket.total_volume(), 10.0);
    }

    #[test]
    fn test_empty_basket() {
        let basket = Basket::empty();
        assert!(basket.is_empty());
        assert_eq!(basket.total_volume(), 0.0);
        assert!(basket.ordered_by_volatility().is_empty());
    }
}
