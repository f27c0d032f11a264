use std::path::PathBuf;

use clap::Parser;

/// 代币篮子风险收益画像
#[derive(Debug, Clone, Parser)]
#[command(name = "memecoin_risk", version, about)]
pub struct Args {
    /// 按成交量排序的篮子 (JSON)
    #[arg(long)]
    pub volume_basket: PathBuf,

    /// 按波动率排序的篮子 (JSON)，提供时输出两份画像的对比
    #[arg(long)]
    pub volatility_basket: Option<PathBuf>,

    /// 代币地址 -> 市值 (USD)
    #[arg(long)]
    pub market_caps: Option<PathBuf>,

    /// 代币地址 -> {oldest_price, latest_price}
    #[arg(long)]
    pub prices: Option<PathBuf>,

    #[arg(long, default_value = "Memecoin 50 Volume")]
    pub volume_index_name: String,

    #[arg(long, default_value = "Memecoin 50 Volatility")]
    pub volatility_index_name: String,

    /// 输出文件，缺省写到标准输出
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// 格式化 JSON 输出
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::parse_from(["memecoin_risk", "--volume-basket", "volume.json"]);
        assert_eq!(args.volume_basket, PathBuf::from("volume.json"));
        assert!(args.volatility_basket.is_none());
        assert_eq!(args.volume_index_name, "Memecoin 50 Volume");
        assert!(!args.pretty);
    }

    #[test]
    fn test_parse_full_args() {
        let args = Args::parse_from([
            "memecoin_risk",
            "--volume-basket",
            "v.json",
            "--volatility-basket",
            "vol.json",
            "--market-caps",
            "caps.json",
            "--prices",
            "prices.json",
            "--volume-index-name",
            "Vol Index",
            "--output",
            "out.json",
            "--pretty",
        ]);
        assert_eq!(args.volatility_basket, Some(PathBuf::from("vol.json")));
        assert_eq!(args.market_caps, Some(PathBuf::from("caps.json")));
        assert_eq!(args.volume_index_name, "Vol Index");
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.pretty);
    }

    #[test]
    fn test_volume_basket_is_required() {
        assert!(Args::try_parse_from(["memecoin_risk"]).is_err());
    }
}
