use std::fmt;

use crate::{Document, NodeId};

/// Event types understood by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Element gained focus (does not bubble)
    Focus,
    /// Element lost focus (does not bubble)
    Blur,
    /// Value edited by the user
    Input,
    /// Value committed (checkbox/radio toggles, select changes)
    Change,
    /// Form submission request
    Submit,
}

impl EventType {
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Focus | Self::Blur)
    }

    pub fn cancelable(self) -> bool {
        matches!(self, Self::Submit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch phase an event is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// A single event travelling through the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    pub phase: Phase,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            phase: Phase::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Cancel the default action. Ignored for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.event_type.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Stop the event from reaching further nodes. Remaining listeners on
    /// the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Result of a completed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    /// True when the default action should run.
    pub fn proceeds(&self) -> bool {
        !self.default_prevented
    }
}

/// Something that reacts to events.
///
/// Listeners receive the document mutably so they can read and rewrite the
/// tree while the event is in flight.
pub trait EventListener {
    fn handle_event(&self, doc: &mut Document, event: &mut Event);
}

impl<F> EventListener for F
where
    F: Fn(&mut Document, &mut Event),
{
    fn handle_event(&self, doc: &mut Document, event: &mut Event) {
        self(doc, event)
    }
}

/// Handle returned by `add_event_listener`, used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);
