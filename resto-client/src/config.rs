//! Client configuration

use std::time::Duration;

use crate::{ClientError, ClientResult, DataClient, EmailClient};

/// Default transactional email API base URL
pub const DEFAULT_EMAIL_BASE_URL: &str = "https://api.brevo.com/v3";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the hosted database REST API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co")
    pub base_url: String,

    /// Public (anon) API key, sent as `apikey`
    pub api_key: String,

    /// User access token; the API key is used as bearer when absent
    pub access_token: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Create a new configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the user access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Create a data client from this configuration
    pub fn build_data_client(&self) -> ClientResult<DataClient> {
        DataClient::new(self)
    }
}

/// Configuration for the transactional email API
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// API base URL
    pub base_url: String,

    /// API key, sent as `api-key`
    pub api_key: String,

    /// Sender display name
    pub sender_name: String,

    /// Sender address
    pub sender_email: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl EmailConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_EMAIL_BASE_URL.to_string(),
            api_key: api_key.into(),
            sender_name: "Admin".to_string(),
            sender_email: "admin@domainanda.com".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sender identity
    pub fn with_sender(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.sender_name = name.into();
        self.sender_email = email.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Create an email client from this configuration
    pub fn build_email_client(&self) -> ClientResult<EmailClient> {
        EmailClient::new(self)
    }
}

/// Build a reqwest client with the given timeout
pub(crate) fn build_http(timeout: Duration) -> ClientResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Reject an empty or non-http base URL up front
pub(crate) fn validate_base_url(base_url: &str) -> ClientResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ClientError::Config("base URL is empty".to_string()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(ClientError::Config(format!(
            "base URL must start with http:// or https://: {}",
            trimmed
        )));
    }
    Ok(trimmed.to_string())
}
