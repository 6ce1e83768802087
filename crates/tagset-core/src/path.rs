//! Tag path grammar.
//!
//! A tag path is a dotted list of member names with optional array
//! subscripts and an optional trailing bit index, e.g.
//! `Line1.Motors[2,0].Status.3`.

use std::fmt;

use smol_str::SmolStr;

use crate::error::TagSetError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Member or symbol name.
    Member(SmolStr),
    /// One array subscript (`[i,j]` yields two).
    Index(u32),
    /// Bit of an integer member.
    Bit(u8),
}

/// Parsed, validated tag path. Keeps the original text for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPath {
    text: SmolStr,
    segments: Vec<PathSegment>,
}

impl TagPath {
    pub fn parse(text: &str) -> Result<Self, TagSetError> {
        let trimmed = text.trim();
        let segments = parse_segments(trimmed)
            .ok_or_else(|| TagSetError::InvalidTagName(trimmed.into()))?;
        Ok(Self {
            text: trimmed.into(),
            segments,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Root symbol name.
    #[must_use]
    pub fn root(&self) -> &str {
        match self.segments.first() {
            Some(PathSegment::Member(name)) => name.as_str(),
            _ => "",
        }
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == ':'
}

fn is_name_char(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit()
}

fn parse_segments(text: &str) -> Option<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut expect_member = true;

    while !rest.is_empty() {
        if expect_member {
            let first = rest.chars().next()?;
            if first.is_ascii_digit() {
                // Bit index: only valid as the final segment after a dot.
                if segments.is_empty() || !rest.chars().all(|ch| ch.is_ascii_digit()) {
                    return None;
                }
                let bit = rest.parse::<u8>().ok()?;
                segments.push(PathSegment::Bit(bit));
                return Some(segments);
            }
            if !is_name_start(first) {
                return None;
            }
            let end = rest.find(|ch: char| !is_name_char(ch)).unwrap_or(rest.len());
            segments.push(PathSegment::Member(rest[..end].into()));
            rest = &rest[end..];
            expect_member = false;
            continue;
        }

        if let Some(after) = rest.strip_prefix('.') {
            if after.is_empty() {
                return None;
            }
            rest = after;
            expect_member = true;
        } else if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']')?;
            for part in after[..close].split(',') {
                let index = part.trim().parse::<u32>().ok()?;
                segments.push(PathSegment::Index(index));
            }
            rest = &after[close + 1..];
        } else {
            return None;
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}
