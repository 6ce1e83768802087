//! Client errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use tagset_core::{CodecError, TagSetError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Validation or encoding failed before any request was made.
    #[error(transparent)]
    Core(#[from] TagSetError),

    /// Network or HTTP error while talking to the tag endpoint.
    #[error("transport failure: {0}")]
    TransportFailure(SmolStr),

    /// Configuration file or endpoint could not be used.
    #[error("invalid config: {0}")]
    InvalidConfig(SmolStr),

    /// The server read-back cannot be mapped onto the widget.
    #[error("read-back failed: {0}")]
    Readback(SmolStr),
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        Self::Core(TagSetError::Codec(err))
    }
}

impl ClientError {
    /// True for errors raised before the transport was touched.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Core(_))
    }
}
