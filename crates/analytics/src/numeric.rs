//! 定点小数工具
//!
//! 价格相减、相除等直接影响金融比率的运算统一在 Decimal 中完成，
//! 只在输出边界转换回 f64。所有除法使用 checked 运算，失败即返回 None。

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

/// f64 -> Decimal，非有限数或超出范围返回 None
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// Decimal -> f64 (输出边界)
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// 保留两位小数 (银行家舍入)
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}

pub fn round2_f64(value: Decimal) -> f64 {
    to_f64(round2(value))
}

/// 相对变化 (to - from) / from
pub fn relative_change(from: f64, to: f64) -> Option<Decimal> {
    let from = to_decimal(from)?;
    let to = to_decimal(to)?;
    to.checked_sub(from)?.checked_div(from)
}

/// 差值 a - b，转换失败为 0
pub fn difference(a: f64, b: f64) -> Decimal {
    match (to_decimal(a), to_decimal(b)) {
        (Some(a), Some(b)) => a.checked_sub(b).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// 求和，任一步溢出返回 None
pub fn sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
}

/// 均值，总和溢出时改为逐项先除以 n 再累加
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let n = Decimal::from(values.len());
    match sum(values) {
        Some(total) => total.checked_div(n),
        None => values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v.checked_div(n)?)),
    }
}

/// 百分比 r x 100，溢出返回 None
pub fn percent(ratio: Decimal) -> Option<Decimal> {
    ratio.checked_mul(dec!(100))
}

/// 中位数：偶数个取中间两个的平均
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        return Some(sorted[mid]);
    }
    let (a, b) = (sorted[mid - 1], sorted[mid]);
    match a.checked_add(b) {
        Some(total) => total.checked_div(dec!(2)),
        // 两个值都接近上限时先各自减半
        None => (a / dec!(2)).checked_add(b / dec!(2)),
    }
}

/// 样本标准差 (ddof = 1)，少于 2 个样本或计算溢出时返回 0
pub fn sample_std(values: &[Decimal]) -> Decimal {
    if values.len() < 2 {
        return Decimal::ZERO;
    }
    let Some(avg) = mean(values) else {
        return Decimal::ZERO;
    };
    let squares: Option<Vec<Decimal>> = values
        .iter()
        .map(|v| {
            let diff = v.checked_sub(avg)?;
            diff.checked_mul(diff)
        })
        .collect();
    squares
        .and_then(|sq| sum(&sq))
        .and_then(|total| total.checked_div(Decimal::from(values.len() - 1)))
        .and_then(|var| var.sqrt())
        .unwrap_or(Decimal::ZERO)
}

/// 分位数 (线性插值)，q ∈ [0, 1]
pub fn quantile(values: &[Decimal], q: Decimal) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let q = q.clamp(Decimal::ZERO, Decimal::ONE);
    let position = Decimal::from(sorted.len() - 1) * q;
    let lower = position.floor();
    let fraction = position - lower;
    let lower_idx = lower.to_usize().unwrap_or(0).min(sorted.len() - 1);
    let upper_idx = (lower_idx + 1).min(sorted.len() - 1);
    sorted[upper_idx]
        .checked_sub(sorted[lower_idx])
        .and_then(|gap| gap.checked_mul(fraction))
        .and_then(|step| sorted[lower_idx].checked_add(step))
        .unwrap_or(sorted[lower_idx])
}
