//! Transactional email client

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::{build_http, validate_base_url};
use crate::{ClientError, ClientResult, EmailConfig};

/// One outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    /// HTML fragment; wrapped in `<html><body>` on send
    pub html: String,
}

/// Accepted send
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailReceipt {
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
}

#[derive(Serialize)]
struct Address<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    html_content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Client for the transactional email API
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: String,
    sender_name: String,
    sender_email: String,
}

impl EmailClient {
    pub fn new(config: &EmailConfig) -> ClientResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::Config("email API key is empty".to_string()));
        }
        Ok(Self {
            client: build_http(config.timeout())?,
            base_url: validate_base_url(&config.base_url)?,
            api_key: config.api_key.clone(),
            sender_name: config.sender_name.clone(),
            sender_email: config.sender_email.clone(),
        })
    }

    /// Send one email
    pub async fn send(&self, message: &EmailMessage) -> ClientResult<EmailReceipt> {
        let body = SendRequest {
            sender: Address {
                name: Some(&self.sender_name),
                email: &self.sender_email,
            },
            to: vec![Address {
                name: None,
                email: &message.to,
            }],
            subject: &message.subject,
            html_content: format!("<html><body>{}</body></html>", message.html),
        };

        let url = format!("{}/smtp/email", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let reason = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(ApiErrorBody {
                    code: Some(code),
                    message: Some(msg),
                }) => format!("{}: {}", code, msg),
                Ok(ApiErrorBody {
                    message: Some(msg), ..
                }) => msg,
                _ => text,
            };
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(reason),
                StatusCode::BAD_REQUEST => ClientError::Validation(reason),
                _ => ClientError::Internal(reason),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(EmailReceipt::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("unexpected email API response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_wire_shape() {
        let body = SendRequest {
            sender: Address {
                name: Some("Resto"),
                email: "orders@resto.test",
            },
            to: vec![Address {
                name: None,
                email: "guest@example.com",
            }],
            subject: "Order",
            html_content: "<html><body>x</body></html>".to_string(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["sender"]["name"], "Resto");
        assert_eq!(value["to"][0]["email"], "guest@example.com");
        assert!(value["to"][0].get("name").is_none());
        assert_eq!(value["htmlContent"], "<html><body>x</body></html>");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = EmailClient::new(&EmailConfig::new(""));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
