//! 最大回撤

use memecoin_risk_domain::{Basket, MaxDrawdown};
use rust_decimal::Decimal;
use tracing::debug;

use crate::numeric::{percent, relative_change, to_decimal, to_f64};

/// 聚合路径：篮子内最坏的单币区间回撤 min((low - high) / high) x 100
///
/// high <= 0 或数值超出范围的代币被忽略；聚合数据没有日期
pub fn aggregate_max_drawdown(basket: &Basket) -> MaxDrawdown {
    let worst = basket
        .iter()
        .filter(|t| t.high > 0.0)
        .filter_map(|t| {
            let pct = relative_change(t.high, t.low).and_then(percent);
            if pct.is_none() {
                debug!("跳过无法计算回撤的代币: {}", t.mint_address);
            }
            pct
        })
        .min();

    let percentage = worst
        .map(|d| d.min(Decimal::ZERO))
        .unwrap_or(Decimal::ZERO);

    MaxDrawdown {
        percentage: to_f64(percentage),
        date: None,
    }
}

/// 序列路径：相对历史最高点的最大回撤
///
/// 少于 2 个价格时为 0；若提供了对应的日期序列，返回回撤最深处的日期
pub fn series_max_drawdown(prices: &[f64], dates: Option<&[String]>) -> MaxDrawdown {
    if prices.len() < 2 {
        return MaxDrawdown::default();
    }

    let mut running_max: Option<Decimal> = None;
    let mut worst = Decimal::ZERO;
    let mut worst_idx: Option<usize> = None;

    for (idx, price) in prices.iter().enumerate() {
        let Some(price) = to_decimal(*price) else {
            continue;
        };
        let peak = match running_max {
            Some(peak) if peak >= price => peak,
            _ => price,
        };
        running_max = Some(peak);
        if peak <= Decimal::ZERO {
            continue;
        }
        let Some(drawdown) = price
            .checked_sub(peak)
            .and_then(|diff| diff.checked_div(peak))
            .and_then(percent)
        else {
            continue;
        };
        if worst_idx.is_none() || drawdown < worst {
            worst = drawdown;
            worst_idx = Some(idx);
        }
    }

    let date = match (worst_idx, dates) {
        (Some(idx), Some(dates)) => dates.get(idx).cloned(),
        _ => None,
    };

    MaxDrawdown {
        percentage: to_f64(worst),
        date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memecoin_risk_domain::TokenAggregate;

    fn token(mint: &str, high: f64, low: f64) -> TokenAggregate {
        TokenAggregate {
            mint_address: mint.to_string(),
            high,
            low,
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregate_drawdown_single_token() {
        let basket = Basket::new(vec![token("A", 200.0, 100.0)]);
        let dd = aggregate_max_drawdown(&basket);
        assert_eq!(dd.percentage, -50.0);
        assert_eq!(dd.date, None);
    }

    #[test]
    fn test_aggregate_drawdown_takes_worst_token() {
        let basket = Basket::new(vec![
            token("A", 10.0, 9.0),
            token("B", 4.0, 1.0),
            token("C", 0.0, 0.0),
        ]);
        assert_eq!(aggregate_max_drawdown(&basket).percentage, -75.0);
    }

    #[test]
    fn test_aggregate_drawdown_never_positive() {
        // low > high 的异常数据不会产生正回撤
        let basket = Basket::new(vec![token("A", 1.0, 2.0)]);
        assert_eq!(aggregate_max_drawdown(&basket).percentage, 0.0);
    }

    #[test]
    fn test_aggregate_drawdown_empty() {
        assert_eq!(aggregate_max_drawdown(&Basket::empty()), MaxDrawdown::default());
    }

    #[test]
    fn test_aggregate_drawdown_skips_unrepresentable_token() {
        // 负的最低价使 (low - high) / high 超出 Decimal 范围
        let basket = Basket::new(vec![token("A", 1e-18, -1e10), token("B", 4.0, 3.0)]);
        assert_eq!(aggregate_max_drawdown(&basket).percentage, -25.0);
    }

    #[test]
    fn test_series_drawdown_with_dates() {
        let prices = [100.0, 120.0, 90.0, 110.0, 60.0, 130.0];
        let dates: Vec<String> = (1..=6).map(|d| format!("2024-07-0{}", d)).collect();
        let dd = series_max_drawdown(&prices, Some(&dates));
        assert_eq!(dd.percentage, -50.0);
        assert_eq!(dd.date.as_deref(), Some("2024-07-05"));
    }

    #[test]
    fn test_series_drawdown_monotonic_rise() {
        let dd = series_max_drawdown(&[1.0, 2.0, 3.0], None);
        assert_eq!(dd.percentage, 0.0);
        assert_eq!(dd.date, None);
    }

    #[test]
    fn test_series_drawdown_short_series() {
        assert_eq!(series_max_drawdown(&[5.0], None), MaxDrawdown::default());
    }

    #[test]
    fn test_series_drawdown_dates_too_short() {
        let dates = vec!["d1".to_string()];
        let dd = series_max_drawdown(&[10.0, 5.0], Some(&dates));
        assert_eq!(dd.percentage, -50.0);
        assert_eq!(dd.date, None);
    }
}
