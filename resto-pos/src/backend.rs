//! Collaborator implementations over the hosted backend clients

use async_trait::async_trait;
use resto_client::{ClientError, DataClient, EmailClient, EmailMessage};
use shared::models::{EmailLogEntry, NewTransaction, NewTransactionDetail};

use crate::catalog::{CatalogRows, CatalogSource};
use crate::checkout::{Notifier, NotifyError, OrderStore, StoreError};

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        StoreError::new(err.code(), err.to_string())
    }
}

#[async_trait]
impl CatalogSource for DataClient {
    async fn fetch_catalog(&self) -> Result<CatalogRows, StoreError> {
        let (products, groups, items, links) = tokio::try_join!(
            self.fetch_products(),
            self.fetch_modifier_groups(),
            self.fetch_modifier_items(),
            self.fetch_product_modifiers(),
        )?;
        Ok(CatalogRows {
            products,
            groups,
            items,
            links,
        })
    }
}

#[async_trait]
impl OrderStore for DataClient {
    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<String, StoreError> {
        let row = DataClient::insert_transaction(self, tx).await?;
        Ok(row.id)
    }

    async fn insert_details(&self, details: &[NewTransactionDetail]) -> Result<(), StoreError> {
        self.insert_transaction_details(details).await?;
        Ok(())
    }
}

/// Sends through the email API and records every attempt in `email_logs`
///
/// The log write is best-effort: its failure is traced and never changes
/// the send outcome.
#[derive(Debug, Clone)]
pub struct LoggedNotifier {
    email: EmailClient,
    log: DataClient,
}

impl LoggedNotifier {
    pub fn new(email: EmailClient, log: DataClient) -> Self {
        Self { email, log }
    }

    async fn record(&self, entry: EmailLogEntry) {
        if let Err(e) = self.log.insert_email_log(&entry).await {
            tracing::warn!(recipient = %entry.recipient, error = %e, "Failed to write email log");
        }
    }
}

#[async_trait]
impl Notifier for LoggedNotifier {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError> {
        let message = EmailMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        };
        match self.email.send(&message).await {
            Ok(receipt) => {
                tracing::info!(
                    recipient = %to,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "Email sent"
                );
                self.record(EmailLogEntry::success(to, subject)).await;
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                self.record(EmailLogEntry::failed(to, subject, reason.clone()))
                    .await;
                Err(NotifyError(reason))
            }
        }
    }
}
