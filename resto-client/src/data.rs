//! Hosted database REST client
//!
//! Speaks the PostgREST dialect: `GET /rest/v1/<table>?select=...&col=eq.v`
//! for reads and `POST /rest/v1/<table>` for inserts.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    EmailLogEntry, ModifierGroupRow, ModifierItemRow, NewTransaction, NewTransactionDetail,
    ProductModifierRow, ProductRow, TransactionRow,
};

use crate::config::{build_http, validate_base_url};
use crate::{ClientConfig, ClientError, ClientResult};

/// Accept header asking for a single object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Error body returned by the REST layer
#[derive(Debug, serde::Deserialize)]
struct RestErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Client for the hosted database REST API
#[derive(Debug, Clone)]
pub struct DataClient {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl DataClient {
    /// Create a new data client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            client: build_http(config.timeout())?,
            base_url: validate_base_url(&config.base_url)?,
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Set the user access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach `apikey` and bearer headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    // ========== Generic table access ==========

    /// Select rows from a table
    ///
    /// `query` holds PostgREST parameters, e.g. `[("select", "*"), ("is_active", "eq.true")]`.
    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<Vec<T>> {
        let request = self.authorize(self.client.get(self.table_url(table)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Insert one row and return the stored representation
    pub async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorize(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=representation")
                .header(reqwest::header::ACCEPT, SINGLE_OBJECT)
                .json(body),
        );
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Insert rows without reading them back
    pub async fn insert<B: Serialize + ?Sized>(&self, table: &str, body: &B) -> ClientResult<()> {
        let request = self.authorize(
            self.client
                .post(self.table_url(table))
                .header("Prefer", "return=minimal")
                .json(body),
        );
        let response = request.send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// Map non-success statuses to [`ClientError`]
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await?;
        let reason = Self::error_reason(&text);
        tracing::debug!(status = %status, reason = %reason, "REST request rejected");
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(reason),
            StatusCode::NOT_FOUND => ClientError::NotFound(reason),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(reason)
            }
            _ => ClientError::Internal(reason),
        })
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("unexpected response body: {}", e))
        })
    }

    /// Human-readable reason from a REST error body, falling back to the raw text
    fn error_reason(text: &str) -> String {
        match serde_json::from_str::<RestErrorBody>(text) {
            Ok(body) => {
                let mut reason = body.message.unwrap_or_else(|| text.to_string());
                if let Some(details) = body.details.filter(|d| !d.is_empty()) {
                    reason = format!("{} ({})", reason, details);
                }
                if let Some(hint) = body.hint.filter(|h| !h.is_empty()) {
                    reason = format!("{}; hint: {}", reason, hint);
                }
                reason
            }
            Err(_) => text.to_string(),
        }
    }

    // ========== Catalog API ==========

    /// Active products with their category name
    pub async fn fetch_products(&self) -> ClientResult<Vec<ProductRow>> {
        self.get_rows(
            "products",
            &[("select", "*,categories(name)"), ("is_active", "eq.true")],
        )
        .await
    }

    pub async fn fetch_modifier_groups(&self) -> ClientResult<Vec<ModifierGroupRow>> {
        self.get_rows("modifier_groups", &[("select", "*")]).await
    }

    /// Available modifier items only
    pub async fn fetch_modifier_items(&self) -> ClientResult<Vec<ModifierItemRow>> {
        self.get_rows(
            "modifier_items",
            &[("select", "*"), ("available", "eq.true")],
        )
        .await
    }

    pub async fn fetch_product_modifiers(&self) -> ClientResult<Vec<ProductModifierRow>> {
        self.get_rows("product_modifiers", &[("select", "product_id,group_id")])
            .await
    }

    // ========== Order API ==========

    /// Insert a transaction header and return its generated id row
    pub async fn insert_transaction(&self, tx: &NewTransaction) -> ClientResult<TransactionRow> {
        self.insert_returning("transactions", tx).await
    }

    /// Insert the line items of a transaction in one batch
    pub async fn insert_transaction_details(
        &self,
        details: &[NewTransactionDetail],
    ) -> ClientResult<()> {
        self.insert("transaction_details", details).await
    }

    /// Record an email send attempt
    pub async fn insert_email_log(&self, entry: &EmailLogEntry) -> ClientResult<()> {
        self.insert("email_logs", entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        let client = ClientConfig::new("https://xyz.supabase.co/", "anon")
            .build_data_client()
            .unwrap();
        assert_eq!(
            client.table_url("products"),
            "https://xyz.supabase.co/rest/v1/products"
        );
    }

    #[test]
    fn test_error_reason_from_rest_body() {
        let body = r#"{"code":"23503","message":"insert violates foreign key","details":"Key (product_id) is not present","hint":null}"#;
        assert_eq!(
            DataClient::error_reason(body),
            "insert violates foreign key (Key (product_id) is not present)"
        );
        assert_eq!(DataClient::error_reason("gateway down"), "gateway down");
    }
}
