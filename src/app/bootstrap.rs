use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use memecoin_risk_analytics::{compare_profiles, process_basket, EngineConfig};
use memecoin_risk_core::error::{AppError, AppResult};
use memecoin_risk_domain::{PriceObservation, ProfileComparison, RiskProfile};
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::cli::Args;

/// 一次运行的输出
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    pub volume_index: RiskProfile,
    pub volatility_index: Option<RiskProfile>,
    pub comparison: Option<ProfileComparison>,
}

pub async fn load_json(path: &Path) -> AppResult<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// 接口响应可能带一层 `{"data": ...}`，data 为 null 视为无效输入
pub fn unwrap_envelope(value: Value) -> AppResult<Value> {
    match value {
        Value::Object(mut map) if map.contains_key("data") => match map.remove("data") {
            Some(Value::Null) | None => Err(AppError::InputError("响应中 data 为空".to_string())),
            Some(data) => Ok(data),
        },
        other => Ok(other),
    }
}

/// 代币地址 -> 市值，无法解析的条目被忽略
pub fn parse_market_caps(value: &Value) -> AppResult<HashMap<String, f64>> {
    let map = value
        .as_object()
        .ok_or_else(|| AppError::InputError("市值数据必须是 JSON 对象".to_string()))?;

    let mut caps = HashMap::with_capacity(map.len());
    for (mint, cap) in map {
        let parsed = match cap {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => {
                caps.insert(mint.clone(), v);
            }
            _ => warn!("忽略无法解析的市值: {} = {}", mint, cap),
        }
    }
    Ok(caps)
}

pub fn parse_price_observations(value: Value) -> AppResult<HashMap<String, PriceObservation>> {
    Ok(serde_json::from_value(value)?)
}

async fn load_optional<T>(
    path: Option<&Path>,
    parse: impl FnOnce(Value) -> AppResult<T>,
) -> AppResult<Option<T>> {
    match path {
        Some(path) => {
            let value = unwrap_envelope(load_json(path).await?)?;
            Ok(Some(parse(value)?))
        }
        None => Ok(None),
    }
}

type SharedInputs = Arc<(
    Option<HashMap<String, f64>>,
    Option<HashMap<String, PriceObservation>>,
    EngineConfig,
)>;

// 每个篮子在独立的阻塞线程上计算，只共享只读输入
fn spawn_profile(
    raw: Value,
    index_name: String,
    inputs: SharedInputs,
) -> JoinHandle<AppResult<RiskProfile>> {
    tokio::task::spawn_blocking(move || {
        let (caps, prices, config) = inputs.as_ref();
        process_basket(&raw, &index_name, caps.as_ref(), prices.as_ref(), config)
            .map_err(|e| AppError::InputError(format!("{}: {}", index_name, e)))
    })
}

async fn join_profile(handle: JoinHandle<AppResult<RiskProfile>>) -> AppResult<RiskProfile> {
    handle
        .await
        .map_err(|e| AppError::Other(format!("风险画像计算任务失败: {}", e)))?
}

/// 读取输入并生成报告，两个篮子并发计算
pub async fn build_report(args: &Args, config: &EngineConfig) -> AppResult<RiskReport> {
    let volume_raw = unwrap_envelope(load_json(&args.volume_basket).await?)?;
    let volatility_raw = match &args.volatility_basket {
        Some(path) => Some(unwrap_envelope(load_json(path).await?)?),
        None => None,
    };
    let caps = load_optional(args.market_caps.as_deref(), |v| parse_market_caps(&v)).await?;
    let prices = load_optional(args.prices.as_deref(), parse_price_observations).await?;
    debug!(
        "输入加载完成: market_caps={}, prices={}",
        caps.as_ref().map_or(0, HashMap::len),
        prices.as_ref().map_or(0, HashMap::len)
    );

    let inputs: SharedInputs = Arc::new((caps, prices, config.clone()));

    let volume_task = spawn_profile(volume_raw, args.volume_index_name.clone(), Arc::clone(&inputs));
    let volatility_task = volatility_raw
        .map(|raw| spawn_profile(raw, args.volatility_index_name.clone(), Arc::clone(&inputs)));

    let volume_index = join_profile(volume_task).await?;
    let volatility_index = match volatility_task {
        Some(task) => Some(join_profile(task).await?),
        None => None,
    };

    let comparison = volatility_index
        .as_ref()
        .map(|second| compare_profiles(&volume_index, second));

    Ok(RiskReport {
        generated_at: Utc::now(),
        volume_index,
        volatility_index,
        comparison,
    })
}

pub fn render_report(report: &RiskReport, pretty: bool) -> AppResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(rendered)
}

/// 生成报告并写到输出文件或标准输出
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = EngineConfig::from_env();
    let report = build_report(&args, &config).await?;

    info!(
        "风险画像生成完成: {} tokens={}",
        report.volume_index.index, report.volume_index.index_construction.total_tokens
    );
    if let Some(comparison) = &report.comparison {
        info!(
            "对比结果: {} vs {} -> {:?}",
            comparison.first_index, comparison.second_index, comparison.overall_winner
        );
    }

    let rendered = render_report(&report, args.pretty)?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            info!("报告已写入 {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
