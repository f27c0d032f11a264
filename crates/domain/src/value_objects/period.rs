//! 统计周期值对象

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("未知统计周期: {0} (允许: 2w, 1m, 6m, 1y)")]
    Unknown(String),
}

/// 风险画像的统计周期
///
/// 业务规则:
/// - 固定的有序集合: 2w < 1m < 6m < 1y
/// - 聚合路径下每个周期只对同一个价格区间分布乘以固定倍数
/// - 序列路径下用于年化 (每年包含的周期数)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Period {
    /// 两周
    #[serde(rename = "2w")]
    TwoWeeks,
    /// 一个月
    #[serde(rename = "1m")]
    #[default]
    OneMonth,
    /// 六个月
    #[serde(rename = "6m")]
    SixMonths,
    /// 一年
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    /// 全部周期，按输出顺序排列
    pub const ALL: [Period; 4] = [
        Period::TwoWeeks,
        Period::OneMonth,
        Period::SixMonths,
        Period::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::TwoWeeks => "2w",
            Period::OneMonth => "1m",
            Period::SixMonths => "6m",
            Period::OneYear => "1y",
        }
    }

    /// 聚合路径的周期倍数
    pub fn multiplier(&self) -> f64 {
        match self {
            Period::TwoWeeks => 0.8,
            Period::OneMonth => 1.0,
            Period::SixMonths => 1.2,
            Period::OneYear => 1.5,
        }
    }

    /// 每年包含的周期数 (序列路径年化使用)
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Period::TwoWeeks => 26,
            Period::OneMonth => 12,
            Period::SixMonths => 2,
            Period::OneYear => 1,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2w" | "2W" => Ok(Period::TwoWeeks),
            "1m" | "1M" => Ok(Period::OneMonth),
            "6m" | "6M" => Ok(Period::SixMonths),
            "1y" | "1Y" => Ok(Period::OneYear),
            other => Err(PeriodError::Unknown(other.to_string())),
        }
    }
}
