//! 两份风险画像的对比结果

use serde::{Deserialize, Serialize};

/// 对比胜出方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    First,
    Second,
    Tie,
}

/// 画像对比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileComparison {
    pub first_index: String,
    pub second_index: String,
    /// 波动率更低者胜
    pub volatility_winner: Winner,
    /// 收益风险比更高者胜
    pub return_risk_winner: Winner,
    /// 最大回撤更浅者胜
    pub risk_winner: Winner,
    pub overall_winner: Winner,
    /// 第一份画像波动率更低的周期数
    pub volatility_wins: usize,
    /// 第一份画像收益风险比更高的周期数
    pub return_risk_wins: usize,
    /// 第一份画像胜出的类别数
    pub total_wins: usize,
}
