//! Click dispatch for tag widgets.
//!
//! A click on a boolean widget toggles it; a click on an integer or real
//! widget asks the front end for replacement text. The text is encoded
//! before anything is sent, so invalid input never reaches the server and
//! leaves the widget unchanged.

#![allow(missing_docs)]

use smol_str::SmolStr;
use tagset_core::{PathSegment, SetRequest, ValueKind, WidgetState, WidgetStore};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::transport::{SetOutcome, TagSnapshot, Transport};

/// Front end that drives the dispatcher.
pub trait TagUi {
    /// Ask for a new value; `None` means the user cancelled.
    fn prompt(&mut self, widget: &WidgetState) -> Option<String>;

    /// Show a message the user has to see (failed or rejected writes).
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Write sent and accepted.
    Sent(SetRequest),
    /// Write sent; the server answered `fail`.
    Rejected(SetRequest),
    /// Prompt was cancelled; nothing sent.
    Cancelled,
}

#[derive(Debug)]
pub struct Dispatcher<T> {
    transport: T,
    widgets: WidgetStore,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, widgets: WidgetStore) -> Self {
        Self { transport, widgets }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn widgets(&self) -> &WidgetStore {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut WidgetStore {
        &mut self.widgets
    }

    /// Run the click handler of widget `id`.
    pub fn click(&mut self, id: &str, ui: &mut dyn TagUi) -> Result<ClickOutcome, ClientError> {
        let widget = self.widgets.require(id)?;
        let text = match widget.kind {
            ValueKind::Bool => widget.toggled().to_string(),
            ValueKind::Int | ValueKind::Real => {
                let Some(text) = ui.prompt(widget) else {
                    debug!("prompt for widget '{id}' cancelled");
                    return Ok(ClickOutcome::Cancelled);
                };
                text
            }
        };
        self.set(id, &text, ui)
    }

    /// Write `text` to widget `id` without prompting.
    pub fn set(
        &mut self,
        id: &str,
        text: &str,
        ui: &mut dyn TagUi,
    ) -> Result<ClickOutcome, ClientError> {
        let widget = self.widgets.require_mut(id)?;
        let request = widget.request_for(text)?;
        widget.current_value = SmolStr::new(text.trim());

        match self.transport.set_tag(&request) {
            Ok(SetOutcome::Accepted) => Ok(ClickOutcome::Sent(request)),
            Ok(SetOutcome::Rejected) => {
                warn!("server rejected write to {}", request.tag);
                ui.notify(&format!("server rejected write to {}", request.tag));
                Ok(ClickOutcome::Rejected(request))
            }
            Err(err) => {
                ui.notify(&format!("could not write {}: {err}", request.tag));
                Err(err)
            }
        }
    }

    /// Re-seed widget `id` from the server read-back.
    pub fn refresh(&mut self, id: &str) -> Result<&WidgetState, ClientError> {
        let tag = self.widgets.require(id)?.tag.clone();
        let snapshot = self.transport.fetch_tag(&tag)?;
        let widget = self.widgets.require_mut(id)?;
        widget.current_value = snapshot_value(widget, &snapshot)?;
        Ok(widget)
    }
}

/// Pick the element of `snapshot` the widget shows and format it.
fn snapshot_value(widget: &WidgetState, snapshot: &TagSnapshot) -> Result<SmolStr, ClientError> {
    let index = match widget.tag.segments() {
        [PathSegment::Member(_)] => 0,
        [PathSegment::Member(_), PathSegment::Index(index)] => *index as usize,
        _ => {
            return Err(ClientError::Readback(
                format!("'{}' is not a top-level tag or array element", widget.tag).into(),
            ))
        }
    };
    let value = snapshot.data.get(index).copied().ok_or_else(|| {
        ClientError::Readback(
            format!("'{}' has no element {index} ({} served)", widget.tag, snapshot.data.len())
                .into(),
        )
    })?;
    let text = match widget.kind {
        ValueKind::Bool => {
            if value == 0.0 {
                "0".to_string()
            } else {
                "1".to_string()
            }
        }
        ValueKind::Int | ValueKind::Real => value.to_string(),
    };
    Ok(text.into())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tagset_core::{TagPath, TagValue};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<String>>,
        answer: Option<SetOutcome>,
        snapshot: Option<TagSnapshot>,
    }

    impl Transport for Recorder {
        fn set_tag(&self, request: &SetRequest) -> Result<SetOutcome, ClientError> {
            self.sent.borrow_mut().push(request.body());
            self.answer
                .ok_or_else(|| ClientError::TransportFailure("connection refused".into()))
        }

        fn fetch_tag(&self, _tag: &TagPath) -> Result<TagSnapshot, ClientError> {
            self.snapshot
                .clone()
                .ok_or_else(|| ClientError::TransportFailure("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct ScriptedUi {
        answers: Vec<Option<String>>,
        notices: Vec<String>,
    }

    impl TagUi for ScriptedUi {
        fn prompt(&mut self, _widget: &WidgetState) -> Option<String> {
            self.answers.remove(0)
        }

        fn notify(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn store() -> WidgetStore {
        [
            WidgetState::new("run", "Pump.Run", ValueKind::Bool, 0).unwrap(),
            WidgetState::new("count", "Counter", ValueKind::Int, 4).unwrap(),
            WidgetState::new("temp", "Temps[1]", ValueKind::Real, 4)
                .unwrap()
                .with_value("20.5"),
        ]
        .into_iter()
        .collect()
    }

    fn accepting() -> Recorder {
        Recorder {
            answer: Some(SetOutcome::Accepted),
            ..Recorder::default()
        }
    }

    #[test]
    fn bool_click_toggles_and_sends_new_text() {
        let mut dispatcher = Dispatcher::new(accepting(), store());
        let mut ui = ScriptedUi::default();

        let outcome = dispatcher.click("run", &mut ui).unwrap();
        assert!(matches!(
            outcome,
            ClickOutcome::Sent(SetRequest { value: TagValue::Bool(true), .. })
        ));
        assert_eq!(dispatcher.widgets().get("run").unwrap().current_value, "1");

        dispatcher.click("run", &mut ui).unwrap();
        assert_eq!(dispatcher.widgets().get("run").unwrap().current_value, "0");
        assert_eq!(
            *dispatcher.transport().sent.borrow(),
            vec!["Pump.Run = 1".to_string(), "Pump.Run = 0".to_string()]
        );
    }

    #[test]
    fn numeric_click_encodes_prompted_text() {
        let mut dispatcher = Dispatcher::new(accepting(), store());
        let mut ui = ScriptedUi {
            answers: vec![Some("16909060".into()), Some("1.5".into())],
            ..ScriptedUi::default()
        };
        dispatcher.click("count", &mut ui).unwrap();
        dispatcher.click("temp", &mut ui).unwrap();
        assert_eq!(
            *dispatcher.transport().sent.borrow(),
            vec![
                "Counter = 4,3,2,1".to_string(),
                "Temps[1] = 0,0,192,63".to_string()
            ]
        );
        assert_eq!(dispatcher.widgets().get("temp").unwrap().current_value, "1.5");
    }

    #[test]
    fn cancelled_prompt_sends_nothing() {
        let mut dispatcher = Dispatcher::new(accepting(), store());
        let mut ui = ScriptedUi {
            answers: vec![None],
            ..ScriptedUi::default()
        };
        let outcome = dispatcher.click("temp", &mut ui).unwrap();
        assert_eq!(outcome, ClickOutcome::Cancelled);
        assert!(dispatcher.transport().sent.borrow().is_empty());
        assert_eq!(dispatcher.widgets().get("temp").unwrap().current_value, "20.5");
    }

    #[test]
    fn invalid_text_fails_before_transport() {
        let mut dispatcher = Dispatcher::new(accepting(), store());
        let mut ui = ScriptedUi {
            answers: vec![Some("abc".into())],
            ..ScriptedUi::default()
        };
        let err = dispatcher.click("temp", &mut ui).unwrap_err();
        assert!(err.is_validation());
        assert!(dispatcher.transport().sent.borrow().is_empty());
        assert_eq!(dispatcher.widgets().get("temp").unwrap().current_value, "20.5");
    }

    #[test]
    fn transport_failure_is_notified() {
        let mut dispatcher = Dispatcher::new(Recorder::default(), store());
        let mut ui = ScriptedUi::default();
        let err = dispatcher.click("run", &mut ui).unwrap_err();
        assert!(matches!(err, ClientError::TransportFailure(_)));
        assert_eq!(ui.notices.len(), 1);
        assert!(ui.notices[0].starts_with("could not write Pump.Run"));
        assert_eq!(dispatcher.widgets().get("run").unwrap().current_value, "1");
    }

    #[test]
    fn rejected_write_is_notified() {
        let transport = Recorder {
            answer: Some(SetOutcome::Rejected),
            ..Recorder::default()
        };
        let mut dispatcher = Dispatcher::new(transport, store());
        let mut ui = ScriptedUi::default();
        let outcome = dispatcher.set("count", "7", &mut ui).unwrap();
        assert!(matches!(outcome, ClickOutcome::Rejected(_)));
        assert_eq!(ui.notices, vec!["server rejected write to Counter".to_string()]);
    }

    #[test]
    fn unknown_widget_is_an_error() {
        let mut dispatcher = Dispatcher::new(accepting(), store());
        let err = dispatcher
            .click("missing", &mut ScriptedUi::default())
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn refresh_reads_array_element() {
        let transport = Recorder {
            snapshot: Some(TagSnapshot {
                type_name: "REAL".into(),
                count: 2,
                data: vec![1.0, 42.25],
                ascii: Vec::new(),
            }),
            ..Recorder::default()
        };
        let mut dispatcher = Dispatcher::new(transport, store());
        let widget = dispatcher.refresh("temp").unwrap();
        assert_eq!(widget.current_value, "42.25");

        let err = dispatcher.refresh("run").unwrap_err();
        assert!(matches!(err, ClientError::Readback(_)));
    }
}
