//! Codec and tag-set errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while encoding or decoding a tag value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value text could not be parsed for the requested kind.
    #[error("invalid input '{0}'")]
    InvalidInput(SmolStr),

    /// The byte width is not valid for the value kind.
    #[error("unsupported byte width {0}")]
    UnsupportedWidth(usize),
}

/// Errors raised by widget, path and body handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagSetError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Tag name does not follow the tag path grammar.
    #[error("invalid tag name '{0}'")]
    InvalidTagName(SmolStr),

    /// Widget attributes are missing or malformed.
    #[error("invalid widget '{id}': {reason}")]
    InvalidWidget { id: SmolStr, reason: SmolStr },

    /// No widget is registered under the id.
    #[error("unknown widget '{0}'")]
    UnknownWidget(SmolStr),

    /// A tag-set body could not be parsed.
    #[error("invalid tag-set body: {0}")]
    InvalidBody(SmolStr),
}

impl TagSetError {
    pub(crate) fn invalid_widget(id: impl Into<SmolStr>, reason: impl Into<SmolStr>) -> Self {
        Self::InvalidWidget {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
