//! Browser/WASM adapter for tag widgets.
//!
//! The page owns the DOM and the `fetch` call; this crate owns widget state
//! and encoding. A click returns the text to display and, unless cancelled,
//! the body to `POST` to `/.tagSet`.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagset_core::{ValueKind, WidgetState, WidgetStore, TAG_SET_PATH};

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::wasm_bindgen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelError {
    message: String,
}

impl PanelError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PanelError {}

impl From<tagset_core::TagSetError> for PanelError {
    fn from(err: tagset_core::TagSetError) -> Self {
        Self::new(err.to_string())
    }
}

type PanelResult<T> = Result<T, PanelError>;

/// Widget declaration as read from the page: named element attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetInput {
    pub id: String,
    pub kind: ValueKind,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Text currently shown by the element.
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WidgetItem {
    pub id: String,
    pub tag: String,
    pub kind: ValueKind,
    pub size: usize,
    pub value: String,
}

impl From<&WidgetState> for WidgetItem {
    fn from(widget: &WidgetState) -> Self {
        Self {
            id: widget.id.to_string(),
            tag: widget.tag.to_string(),
            kind: widget.kind,
            size: widget.byte_width,
            value: widget.current_value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostRequest {
    pub path: String,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickResult {
    pub id: String,
    /// Text the element should show after the click.
    pub display: String,
    /// `None` when the prompt was cancelled.
    pub request: Option<PostRequest>,
}

/// Widget panel state, independent of wasm-bindgen.
#[derive(Debug, Default)]
pub struct TagPanel {
    widgets: WidgetStore,
}

impl TagPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, input: WidgetInput) -> PanelResult<WidgetItem> {
        let attributes = input
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        let mut widget = WidgetState::from_attributes(input.id.as_str(), input.kind, attributes)?;
        if let Some(value) = input.value {
            widget = widget.with_value(value.trim());
        }
        let item = WidgetItem::from(&widget);
        self.widgets.insert(widget);
        Ok(item)
    }

    #[must_use]
    pub fn widgets(&self) -> Vec<WidgetItem> {
        self.widgets.iter().map(WidgetItem::from).collect()
    }

    /// Handle a click. `answer` is the prompt result for numeric widgets
    /// (`None` = cancelled) and is ignored for booleans.
    pub fn click(&mut self, id: &str, answer: Option<&str>) -> PanelResult<ClickResult> {
        let widget = self.widgets.require_mut(id)?;
        let text = match widget.kind {
            ValueKind::Bool => widget.toggled().to_string(),
            ValueKind::Int | ValueKind::Real => match answer {
                Some(text) => text.trim().to_string(),
                None => {
                    return Ok(ClickResult {
                        id: id.to_string(),
                        display: widget.current_value.to_string(),
                        request: None,
                    })
                }
            },
        };
        let request = widget.request_for(&text)?;
        widget.current_value = text.as_str().into();
        Ok(ClickResult {
            id: id.to_string(),
            display: text,
            request: Some(PostRequest {
                path: TAG_SET_PATH.to_string(),
                content_type: "text/plain".to_string(),
                body: request.body(),
            }),
        })
    }
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
pub struct WasmTagPanel {
    inner: TagPanel,
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
impl WasmTagPanel {
    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(constructor)
    )]
    pub fn new() -> Self {
        Self {
            inner: TagPanel::new(),
        }
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = registerWidgetJson)
    )]
    pub fn register_widget_json(&mut self, widget_json: &str) -> Result<String, String> {
        let input: WidgetInput = serde_json::from_str(widget_json)
            .map_err(|err| format!("invalid widget json: {err}"))?;
        let item = self.inner.register(input)?;
        json_string(&item)
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = clickJson)
    )]
    pub fn click_json(&mut self, id: &str, answer: Option<String>) -> Result<String, String> {
        let result = self.inner.click(id, answer.as_deref())?;
        json_string(&result)
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = widgetsJson)
    )]
    pub fn widgets_json(&self) -> Result<String, String> {
        json_string(&self.inner.widgets())
    }
}

impl Default for WasmTagPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(
    all(target_arch = "wasm32", feature = "wasm"),
    wasm_bindgen(js_name = encodeInteger)
)]
pub fn encode_integer(text: &str, byte_width: usize) -> Result<Vec<u8>, String> {
    tagset_core::encode_integer(text, byte_width).map_err(|err| err.to_string())
}

#[cfg_attr(
    all(target_arch = "wasm32", feature = "wasm"),
    wasm_bindgen(js_name = encodeReal)
)]
pub fn encode_real(text: &str, byte_width: usize) -> Result<Vec<u8>, String> {
    tagset_core::encode_real(text, byte_width).map_err(|err| err.to_string())
}

impl From<PanelError> for String {
    fn from(value: PanelError) -> Self {
        value.to_string()
    }
}

fn json_string<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("json serialization failed: {err}"))
}
