//! Checkout submitter
//!
//! Turns the session cart into a transaction plus line items, persists them
//! through [`OrderStore`] (transaction first, then line items) and sends a
//! best-effort confirmation through [`Notifier`].

mod error;
pub mod receipt;

pub use error::{CheckoutError, CheckoutStage, NotifyError, StoreError};

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{NewTransaction, NewTransactionDetail};
use shared::order::PaymentMethod;

use crate::cart::{Cart, CartSession};
use crate::pricing::{OrderTotals, TaxRate};

/// Customer id recorded as anonymous
pub const LEGACY_CUSTOMER_ID: &str = "legacy";

/// Order persistence collaborator
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store the transaction header, returning its generated id
    async fn insert_transaction(&self, tx: &NewTransaction) -> Result<String, StoreError>;

    /// Store all line items of a transaction in one batch
    async fn insert_details(&self, details: &[NewTransactionDetail]) -> Result<(), StoreError>;
}

/// Transactional email collaborator
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), NotifyError>;
}

/// Who is ordering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub id: Option<String>,
    pub email: Option<String>,
}

impl Customer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: Some(id.into()),
            email,
        }
    }

    /// Customer reference as stored; the legacy id maps to none
    pub fn reference(&self) -> Option<String> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty() && *id != LEGACY_CUSTOMER_ID)
            .map(str::to_string)
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub customer: Customer,
    pub payment_method: PaymentMethod,
}

/// Outcome of the confirmation email
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    /// No email address or no notifier configured
    Skipped,
    Failed(String),
}

/// Successful checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub transaction_id: String,
    pub totals: OrderTotals,
    pub notification: NotificationOutcome,
}

pub struct CheckoutSubmitter {
    store: Arc<dyn OrderStore>,
    notifier: Option<Arc<dyn Notifier>>,
    tax_rate: TaxRate,
    branch_id: Option<String>,
}

impl CheckoutSubmitter {
    pub fn new(store: Arc<dyn OrderStore>, tax_rate: TaxRate) -> Self {
        Self {
            store,
            notifier: None,
            tax_rate,
            branch_id: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_branch(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }

    /// Transaction header for `cart`
    pub fn build_transaction(&self, cart: &Cart, request: &CheckoutRequest) -> NewTransaction {
        let totals = OrderTotals::compute(cart.total_price(), self.tax_rate);
        NewTransaction {
            customer_id: request.customer.reference(),
            branch_id: self.branch_id.clone(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            payment_method: request.payment_method,
            order_type: cart.order_type(),
        }
    }

    /// Line items of `cart` under `transaction_id`; synthetic lines carry no product ref
    pub fn build_details(cart: &Cart, transaction_id: &str) -> Vec<NewTransactionDetail> {
        cart.lines()
            .iter()
            .map(|line| NewTransactionDetail {
                transaction_id: transaction_id.to_string(),
                product_id: (!cart.is_packaging_line(line)).then(|| line.product_id.clone()),
                product_name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price(),
                modifiers: line.selected_modifiers.clone(),
            })
            .collect()
    }

    /// Persist the session cart, notify, then clear the cart
    ///
    /// Any persistence failure leaves the cart intact and is returned as
    /// [`CheckoutError::Persistence`]. Notification failures never fail the
    /// checkout.
    pub async fn submit(
        &self,
        session: &mut CartSession,
        request: CheckoutRequest,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let cart = session.cart();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let tx = self.build_transaction(cart, &request);
        let totals = OrderTotals {
            subtotal: tx.subtotal,
            tax: tx.tax,
            total: tx.total,
        };
        tracing::info!(
            subtotal = totals.subtotal,
            tax = totals.tax,
            total = totals.total,
            order_type = %tx.order_type,
            "Submitting order"
        );

        let transaction_id = match self.store.insert_transaction(&tx).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(error = %e, "Failed to store transaction");
                return Err(CheckoutError::Persistence {
                    stage: CheckoutStage::Transaction,
                    transaction_id: None,
                    message: e.message,
                });
            }
        };

        let details = Self::build_details(cart, &transaction_id);
        if let Err(e) = self.store.insert_details(&details).await {
            // Header exists without line items; no compensation is attempted
            tracing::error!(
                transaction_id = %transaction_id,
                error = %e,
                "Transaction stored without line items"
            );
            return Err(CheckoutError::Persistence {
                stage: CheckoutStage::LineItems,
                transaction_id: Some(transaction_id),
                message: e.message,
            });
        }
        tracing::info!(transaction_id = %transaction_id, lines = details.len(), "Order stored");

        let notification = self
            .notify(&request.customer, &transaction_id, cart, totals.total)
            .await;

        session.clear();
        Ok(CheckoutReceipt {
            transaction_id,
            totals,
            notification,
        })
    }

    async fn notify(
        &self,
        customer: &Customer,
        transaction_id: &str,
        cart: &Cart,
        total: i64,
    ) -> NotificationOutcome {
        let (Some(notifier), Some(email)) = (self.notifier.as_ref(), customer.email()) else {
            return NotificationOutcome::Skipped;
        };

        let subject = receipt::confirmation_subject(transaction_id);
        let html = receipt::confirmation_html(transaction_id, cart.lines(), total);
        match notifier.send(email, &subject, &html).await {
            Ok(()) => NotificationOutcome::Sent,
            Err(e) => {
                tracing::warn!(transaction_id = %transaction_id, error = %e, "Order confirmation not sent");
                NotificationOutcome::Failed(e.0)
            }
        }
    }
}
