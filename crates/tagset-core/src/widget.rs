//! Widget state.
//!
//! Each on-screen widget is backed by a [`WidgetState`] record instead of its
//! displayed text. The store keeps registration order so front ends can list
//! widgets the way they were declared.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::codec::{RealWidth, MAX_INTEGER_WIDTH};
use crate::error::TagSetError;
use crate::path::TagPath;
use crate::wire::{SetRequest, TagValue, ValueKind};

/// Attribute holding the tag name.
pub const TAG_ATTRIBUTE: &str = "tag";
/// Attribute holding the byte width as decimal text.
pub const SIZE_ATTRIBUTE: &str = "size";

pub type WidgetId = SmolStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub id: WidgetId,
    pub tag: TagPath,
    pub kind: ValueKind,
    /// Zero for boolean widgets.
    pub byte_width: usize,
    pub current_value: SmolStr,
}

impl WidgetState {
    /// Build a widget, checking the width against the kind.
    pub fn new(
        id: impl Into<WidgetId>,
        tag: &str,
        kind: ValueKind,
        byte_width: usize,
    ) -> Result<Self, TagSetError> {
        let id = id.into();
        let tag = TagPath::parse(tag)?;
        let byte_width = match kind {
            ValueKind::Bool => 0,
            ValueKind::Int => {
                if byte_width == 0 || byte_width > MAX_INTEGER_WIDTH {
                    return Err(TagSetError::invalid_widget(
                        id,
                        format!("integer size must be 1..={MAX_INTEGER_WIDTH}, got {byte_width}"),
                    ));
                }
                byte_width
            }
            ValueKind::Real => RealWidth::from_byte_width(byte_width)
                .map_err(|err| TagSetError::invalid_widget(id.clone(), err.to_string()))?
                .byte_width(),
        };
        let current_value = SmolStr::new_inline("0");
        Ok(Self {
            id,
            tag,
            kind,
            byte_width,
            current_value,
        })
    }

    /// Build a widget from named attributes (`tag`, and `size` for numbers).
    pub fn from_attributes<'a>(
        id: impl Into<WidgetId>,
        kind: ValueKind,
        attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, TagSetError> {
        let id = id.into();
        let mut tag = None;
        let mut size = None;
        for (name, value) in attributes {
            if name.eq_ignore_ascii_case(TAG_ATTRIBUTE) {
                tag = Some(value);
            } else if name.eq_ignore_ascii_case(SIZE_ATTRIBUTE) {
                size = Some(value);
            }
        }
        let tag = tag.ok_or_else(|| TagSetError::invalid_widget(id.clone(), "missing 'tag'"))?;
        let byte_width = match (kind.needs_width(), size) {
            (false, _) => 0,
            (true, None) => return Err(TagSetError::invalid_widget(id, "missing 'size'")),
            (true, Some(text)) => text.trim().parse::<usize>().map_err(|_| {
                TagSetError::invalid_widget(id.clone(), format!("invalid size '{text}'"))
            })?,
        };
        Self::new(id, tag, kind, byte_width)
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<SmolStr>) -> Self {
        self.current_value = value.into();
        self
    }

    /// Encode `text` as this widget's next value.
    pub fn request_for(&self, text: &str) -> Result<SetRequest, TagSetError> {
        let value = TagValue::encode(self.kind, text, self.byte_width)?;
        Ok(SetRequest::new(self.tag.clone(), value))
    }

    /// Value a boolean click switches to.
    #[must_use]
    pub fn toggled(&self) -> &'static str {
        if self.current_value == "1" {
            "0"
        } else {
            "1"
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct WidgetStore {
    widgets: IndexMap<WidgetId, WidgetState>,
}

impl WidgetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget, replacing any previous one with the same id.
    pub fn insert(&mut self, widget: WidgetState) -> Option<WidgetState> {
        self.widgets.insert(widget.id.clone(), widget)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetState> {
        self.widgets.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut WidgetState> {
        self.widgets.get_mut(id)
    }

    pub fn require(&self, id: &str) -> Result<&WidgetState, TagSetError> {
        self.get(id)
            .ok_or_else(|| TagSetError::UnknownWidget(id.into()))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut WidgetState, TagSetError> {
        self.get_mut(id)
            .ok_or_else(|| TagSetError::UnknownWidget(id.into()))
    }

    pub fn remove(&mut self, id: &str) -> Option<WidgetState> {
        self.widgets.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetState> {
        self.widgets.values()
    }

    /// Widgets bound to `tag`.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a WidgetState> + 'a {
        self.widgets
            .values()
            .filter(move |widget| widget.tag.as_str() == tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

impl FromIterator<WidgetState> for WidgetStore {
    fn from_iter<I: IntoIterator<Item = WidgetState>>(iter: I) -> Self {
        let mut store = Self::new();
        for widget in iter {
            store.insert(widget);
        }
        store
    }
}
