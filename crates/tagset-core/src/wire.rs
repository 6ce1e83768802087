//! Tag-set request body.
//!
//! A write is sent as the plain-text body `"<tag> = <value>"`. Booleans use
//! the literal `0`/`1`; integers and reals are sent as their encoded bytes
//! joined with commas, e.g. `Counter = 4,3,2,1`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{encode_integer, encode_real};
use crate::error::{CodecError, TagSetError};
use crate::path::TagPath;

/// Endpoint path for tag writes.
pub const TAG_SET_PATH: &str = "/.tagSet";

/// Kind of value a widget edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    #[serde(alias = "integer")]
    Int,
    Real,
}

impl ValueKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Real => "real",
        }
    }

    #[must_use]
    pub fn needs_width(self) -> bool {
        !matches!(self, Self::Bool)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = TagSetError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().as_str() {
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" => Ok(Self::Int),
            "real" | "float" => Ok(Self::Real),
            _ => Err(TagSetError::InvalidBody(
                format!("unknown value kind '{text}'").into(),
            )),
        }
    }
}

/// Encoded value carried by a tag-set body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Bool(bool),
    Bytes(Vec<u8>),
}

impl TagValue {
    /// Encode user text for the given kind and width.
    ///
    /// Booleans accept only `0` or `1`; the width is ignored for them.
    pub fn encode(kind: ValueKind, text: &str, byte_width: usize) -> Result<Self, CodecError> {
        match kind {
            ValueKind::Bool => match text.trim() {
                "0" => Ok(Self::Bool(false)),
                "1" => Ok(Self::Bool(true)),
                other => Err(CodecError::InvalidInput(other.into())),
            },
            ValueKind::Int => encode_integer(text, byte_width).map(Self::Bytes),
            ValueKind::Real => encode_real(text, byte_width).map(Self::Bytes),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => f.write_str(if *value { "1" } else { "0" }),
            Self::Bytes(bytes) => {
                for (idx, byte) in bytes.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{byte}")?;
                }
                Ok(())
            }
        }
    }
}

/// One tag write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRequest {
    pub tag: TagPath,
    pub value: TagValue,
}

impl SetRequest {
    #[must_use]
    pub fn new(tag: TagPath, value: TagValue) -> Self {
        Self { tag, value }
    }

    /// Plain-text body for `POST /.tagSet`.
    #[must_use]
    pub fn body(&self) -> String {
        self.to_string()
    }

    /// Read a body the way the tag server does.
    ///
    /// The name ends at the first `=`. A lone `0`/`1` is read back as a
    /// boolean; anything else must be a comma-separated byte list.
    pub fn parse(body: &str) -> Result<Self, TagSetError> {
        let (name, value) = body
            .split_once('=')
            .ok_or_else(|| TagSetError::InvalidBody("missing '='".into()))?;
        let tag = TagPath::parse(name)?;
        let value = value.trim();
        let value = match value {
            "0" => TagValue::Bool(false),
            "1" => TagValue::Bool(true),
            _ => TagValue::Bytes(parse_byte_list(value)?),
        };
        Ok(Self { tag, value })
    }
}

impl fmt::Display for SetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.tag, self.value)
    }
}

fn parse_byte_list(text: &str) -> Result<Vec<u8>, TagSetError> {
    let bytes = text
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u8>()
                .map_err(|_| TagSetError::InvalidBody(format!("invalid byte '{part}'").into()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if bytes.is_empty() {
        return Err(TagSetError::InvalidBody("empty value".into()));
    }
    Ok(bytes)
}
