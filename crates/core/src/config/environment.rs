use std::env;

/// 读取布尔型环境变量：支持 true/false/1/0（大小写不敏感）
pub fn env_is_true(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        }
        Err(_) => default,
    }
}

/// 读取字符串环境变量，若不存在则返回默认值
pub fn env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) => v,
        Err(_) => default.to_string(),
    }
}

/// 读取 f64 环境变量，不存在、解析失败或非有限数时返回默认值
pub fn env_f64(key: &str, default: f64) -> f64 {
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .unwrap_or(default),
        Err(_) => default,
    }
}

/// 读取 usize 环境变量（数量类配置，如 Top-N）
pub fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(v) => v.trim().parse::<usize>().ok().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_is_true() {
        env::set_var("MEMECOIN_RISK_TEST_BOOL", "TRUE");
        assert!(env_is_true("MEMECOIN_RISK_TEST_BOOL", false));
        env::set_var("MEMECOIN_RISK_TEST_BOOL", "0");
        assert!(!env_is_true("MEMECOIN_RISK_TEST_BOOL", true));
        assert!(env_is_true("MEMECOIN_RISK_TEST_BOOL_MISSING", true));
    }

    #[test]
    fn test_env_f64_fallback() {
        env::set_var("MEMECOIN_RISK_TEST_F64", " 12.5 ");
        approx::assert_abs_diff_eq!(env_f64("MEMECOIN_RISK_TEST_F64", 1.0), 12.5);

        env::set_var("MEMECOIN_RISK_TEST_F64_BAD", "abc");
        assert_eq!(env_f64("MEMECOIN_RISK_TEST_F64_BAD", 1.0), 1.0);

        env::set_var("MEMECOIN_RISK_TEST_F64_NAN", "NaN");
        assert_eq!(env_f64("MEMECOIN_RISK_TEST_F64_NAN", 2.0), 2.0);
    }

    #[test]
    fn test_env_usize_and_string() {
        env::set_var("MEMECOIN_RISK_TEST_USIZE", "7");
        assert_eq!(env_usize("MEMECOIN_RISK_TEST_USIZE", 10), 7);
        assert_eq!(env_usize("MEMECOIN_RISK_TEST_USIZE_MISSING", 10), 10);
        assert_eq!(env_or_default("MEMECOIN_RISK_TEST_STR_MISSING", "local"), "local");
    }
}
