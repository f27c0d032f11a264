//! 篮子数据归一化
//!
//! 输入为聚合接口返回的 `{"Solana": {"DEXTradeByTokens": [...]}}` 结构，
//! 数值字段既可能是 JSON 数字也可能是数字字符串

use std::collections::HashMap;

use memecoin_risk_domain::{Basket, TokenAggregate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, RiskError};
use crate::metrics::volatility::range_volatility_pct;

/// 宽松读取数值：数字或数字字符串，缺失或无法解析为 None
fn parse_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

fn number_or_zero(value: Option<&Value>) -> f64 {
    parse_number(value).unwrap_or(0.0)
}

fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

/// 解析单条聚合记录
fn parse_record(
    index: usize,
    record: &Value,
    market_caps: Option<&HashMap<String, f64>>,
) -> Result<TokenAggregate> {
    let trade = record.get("Trade").unwrap_or(&Value::Null);
    let currency = trade.get("Currency").unwrap_or(&Value::Null);
    let mint_address = currency
        .get("MintAddress")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            RiskError::InvalidFormat(format!("第 {} 条记录缺少 Trade.Currency.MintAddress", index))
        })?
        .to_string();

    let side = trade
        .get("Side")
        .and_then(|s| s.get("Currency"))
        .unwrap_or(&Value::Null);

    let high = number_or_zero(trade.get("high"));
    let low = number_or_zero(trade.get("low"));
    let provider_volatility = parse_number(record.get("volatility_token"));
    let volatility = provider_volatility.unwrap_or_else(|| range_volatility_pct(high, low));
    let market_cap = market_caps
        .and_then(|caps| caps.get(&mint_address))
        .copied()
        .filter(|cap| cap.is_finite())
        .unwrap_or(0.0);

    Ok(TokenAggregate {
        name: text(currency.get("Name")),
        symbol: text(currency.get("Symbol")),
        side_symbol: text(side.get("Symbol")),
        side_mint_address: text(side.get("MintAddress")),
        volume: number_or_zero(record.get("volume")).max(0.0),
        provider_volatility,
        volatility,
        high,
        low,
        open: number_or_zero(trade.get("open")),
        close: number_or_zero(trade.get("close")),
        count: parse_count(record.get("count")),
        market_cap,
        mint_address,
    })
}

/// 把原始聚合数据解析为篮子
///
/// 缺少 `Solana.DEXTradeByTokens` 或某条记录缺少代币地址时整体失败；
/// 重复的代币地址只保留第一次出现的记录
pub fn parse_basket(raw: &Value, market_caps: Option<&HashMap<String, f64>>) -> Result<Basket> {
    let records = raw
        .get("Solana")
        .and_then(|s| s.get("DEXTradeByTokens"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            RiskError::InvalidFormat("缺少 Solana.DEXTradeByTokens 结构".to_string())
        })?;

    let mut tokens = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        tokens.push(parse_record(index, record, market_caps)?);
    }

    let parsed = tokens.len();
    let basket = Basket::new(tokens);
    if basket.len() < parsed {
        warn!("篮子中存在重复代币地址，已丢弃 {} 条重复记录", parsed - basket.len());
    }
    debug!("解析篮子完成: {} 个代币", basket.len());
    Ok(basket)
}
