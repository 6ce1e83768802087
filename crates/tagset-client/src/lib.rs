//! `tagset-client` - click-to-write client for PLC tag web endpoints.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Client configuration loading.
pub mod config;
/// Widget click dispatch.
pub mod dispatch;
/// Client errors.
pub mod error;
/// HTTP transport.
pub mod transport;

pub use config::ClientConfig;
pub use dispatch::{ClickOutcome, Dispatcher, TagUi};
pub use error::ClientError;
pub use transport::{HttpTransport, SetOutcome, TagSnapshot, Transport};
