use std::path::PathBuf;

use resto_client::{ClientConfig, EmailConfig};

/// 终端配置 - POS 终端的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | WORK_DIR | ./work_dir | 工作目录 (本地购物车, 日志) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志格式 |
/// | SUPABASE_URL | http://localhost:54321 | 数据服务地址 |
/// | SUPABASE_ANON_KEY | (空) | 数据服务公钥 |
/// | BREVO_API_KEY | (未设置) | 邮件服务密钥, 未设置时不发送邮件 |
/// | BREVO_BASE_URL | https://api.brevo.com/v3 | 邮件服务地址 |
/// | SENDER_NAME | Admin | 发件人名称 |
/// | SENDER_EMAIL | admin@domainanda.com | 发件人地址 |
/// | BRANCH_ID | (未设置) | 门店 ID |
/// | TAX_RATE_PERCENT | 10 | 税率 (%) |
/// | PACKAGING_FEE_PRICE | 2000 | 外带打包费 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 工作目录
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    /// 数据服务地址
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// 邮件服务密钥
    pub brevo_api_key: Option<String>,
    pub brevo_base_url: String,
    pub sender_name: String,
    pub sender_email: String,
    /// 门店 ID
    pub branch_id: Option<String>,
    /// 税率 (%)
    pub tax_rate_percent: u32,
    /// 外带打包费 (最小货币单位)
    pub packaging_fee_price: i64,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 先加载 `.env` (如果存在), 未设置的变量使用默认值
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 常用于测试场景
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            environment: non_empty("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            supabase_url: non_empty("SUPABASE_URL")
                .unwrap_or_else(|| "http://localhost:54321".into()),
            supabase_anon_key: lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
            brevo_api_key: non_empty("BREVO_API_KEY"),
            brevo_base_url: non_empty("BREVO_BASE_URL")
                .unwrap_or_else(|| resto_client::config::DEFAULT_EMAIL_BASE_URL.into()),
            sender_name: non_empty("SENDER_NAME").unwrap_or_else(|| "Admin".into()),
            sender_email: non_empty("SENDER_EMAIL")
                .unwrap_or_else(|| "admin@domainanda.com".into()),
            branch_id: non_empty("BRANCH_ID"),
            tax_rate_percent: lookup("TAX_RATE_PERCENT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            packaging_fee_price: lookup("PACKAGING_FEE_PRICE")
                .and_then(|p| p.parse().ok())
                .filter(|p: &i64| *p >= 0)
                .unwrap_or(2000),
            request_timeout_ms: lookup("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 本地购物车存储目录
    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("storage")
    }

    /// 日志目录
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 数据服务客户端配置
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.supabase_url, &self.supabase_anon_key)
            .with_timeout_ms(self.request_timeout_ms)
    }

    /// 邮件服务配置, 未配置密钥时为 None
    pub fn email_config(&self) -> Option<EmailConfig> {
        self.brevo_api_key.as_ref().map(|key| {
            EmailConfig::new(key)
                .with_base_url(&self.brevo_base_url)
                .with_sender(&self.sender_name, &self.sender_email)
                .with_timeout_ms(self.request_timeout_ms)
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_development());
        assert_eq!(config.tax_rate_percent, 10);
        assert_eq!(config.packaging_fee_price, 2000);
        assert_eq!(config.request_timeout_ms, 30000);
        assert!(config.brevo_api_key.is_none());
        assert!(config.email_config().is_none());
        assert_eq!(config.storage_dir(), PathBuf::from("./work_dir/storage"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ENVIRONMENT", "production"),
            ("WORK_DIR", "/data/resto"),
            ("TAX_RATE_PERCENT", "11"),
            ("PACKAGING_FEE_PRICE", "3000"),
            ("BREVO_API_KEY", "xkeysib-1"),
            ("SENDER_NAME", "Resto"),
            ("BRANCH_ID", "branch-9"),
            ("LOG_JSON", "true"),
        ]);
        assert!(config.is_production());
        assert!(config.log_json);
        assert_eq!(config.tax_rate_percent, 11);
        assert_eq!(config.packaging_fee_price, 3000);
        assert_eq!(config.branch_id.as_deref(), Some("branch-9"));
        assert_eq!(config.log_dir(), PathBuf::from("/data/resto/logs"));

        let email = config.email_config().unwrap();
        assert_eq!(email.api_key, "xkeysib-1");
        assert_eq!(email.sender_name, "Resto");
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("TAX_RATE_PERCENT", "ten"),
            ("PACKAGING_FEE_PRICE", "-5"),
            ("BREVO_API_KEY", "   "),
        ]);
        assert_eq!(config.tax_rate_percent, 10);
        assert_eq!(config.packaging_fee_price, 2000);
        assert!(config.brevo_api_key.is_none());
    }
}
