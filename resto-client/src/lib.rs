//! Resto Client - HTTP clients for the hosted backend
//!
//! - [`DataClient`]: PostgREST-style table API (`/rest/v1/<table>`) of the
//!   hosted database service. Catalog reads and order writes.
//! - [`EmailClient`]: transactional email API (`/smtp/email`).

pub mod config;
pub mod data;
pub mod email;
pub mod error;

pub use config::{ClientConfig, EmailConfig};
pub use data::DataClient;
pub use email::{EmailClient, EmailMessage, EmailReceipt};
pub use error::{ClientError, ClientResult};
