//! `tagset-core` - value codec and widget state for PLC tag writes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Integer and IEEE-754 byte encoding.
#[allow(missing_docs)]
pub mod codec;
/// Codec and tag-set errors.
pub mod error;
/// Tag path grammar.
#[allow(missing_docs)]
pub mod path;
/// Widget state records and store.
#[allow(missing_docs)]
pub mod widget;
/// Tag-set request body.
#[allow(missing_docs)]
pub mod wire;

pub use codec::{decode_integer, decode_real, encode_integer, encode_real, RealBits, RealWidth};
pub use error::{CodecError, TagSetError};
pub use path::{PathSegment, TagPath};
pub use widget::{WidgetId, WidgetState, WidgetStore};
pub use wire::{SetRequest, TagValue, ValueKind, TAG_SET_PATH};
