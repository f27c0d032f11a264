//! 两份风险画像的对比 (例如成交量指数 vs 波动率指数)

use memecoin_risk_domain::{Period, ProfileComparison, RiskProfile, Winner};

/// 四个周期中胜出超过一半为 First，少于一半为 Second，恰好一半为 Tie
fn category_winner(wins: usize) -> Winner {
    let half = Period::ALL.len() / 2;
    match wins.cmp(&half) {
        std::cmp::Ordering::Greater => Winner::First,
        std::cmp::Ordering::Less => Winner::Second,
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}

/// 对比两份画像
///
/// - 波动率：周期内更低者胜
/// - 收益风险比：周期内更高者胜
/// - 风险：最大回撤更浅 (数值更大) 者胜，与旧版分析脚本奖励更深回撤的方向相反
/// - 总体：First 赢下至少两个类别则 First 胜，否则 Second
pub fn compare_profiles(first: &RiskProfile, second: &RiskProfile) -> ProfileComparison {
    let volatility_wins = Period::ALL
        .iter()
        .filter(|p| first.volatility(**p) < second.volatility(**p))
        .count();
    let return_risk_wins = Period::ALL
        .iter()
        .filter(|p| first.return_risk_ratio(**p) > second.return_risk_ratio(**p))
        .count();

    let first_dd = first.max_drawdown.percentage;
    let second_dd = second.max_drawdown.percentage;
    let risk_winner = if first_dd > second_dd {
        Winner::First
    } else if first_dd < second_dd {
        Winner::Second
    } else {
        Winner::Tie
    };

    let volatility_winner = category_winner(volatility_wins);
    let return_risk_winner = category_winner(return_risk_wins);
    let total_wins = [volatility_winner, return_risk_winner, risk_winner]
        .iter()
        .filter(|w| **w == Winner::First)
        .count();
    let overall_winner = if total_wins >= 2 {
        Winner::First
    } else {
        Winner::Second
    };

    ProfileComparison {
        first_index: first.index.clone(),
        second_index: second.index.clone(),
        volatility_winner,
        return_risk_winner,
        risk_winner,
        overall_winner,
        volatility_wins,
        return_risk_wins,
        total_wins,
    }
}
