use std::rc::Rc;

use log::trace;

use super::{Document, ListenerEntry, NodeId};
use crate::event::{DispatchOutcome, Event, EventListener, EventType, ListenerId, Phase};
use crate::validity::InputType;

impl Document {
    // =========================================================================
    // Listener registration
    // =========================================================================

    /// Attach a listener to `target`. Capture listeners see events aimed at
    /// descendants before the target does, including non-bubbling ones.
    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: EventType,
        capture: bool,
        listener: Rc<dyn EventListener>,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(ListenerEntry {
            id,
            target,
            event_type,
            capture,
            listener,
        });
        trace!("[events] added {event_type} listener {id:?} on {target:?} (capture={capture})");
        id
    }

    /// Detach a listener. Returns false if it was not attached.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        before != self.listeners.len()
    }

    /// Number of listeners attached to `target`.
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners
            .iter()
            .filter(|entry| entry.target == target)
            .count()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run an event through capture, target and bubble phases.
    pub fn dispatch_event(&mut self, mut event: Event) -> DispatchOutcome {
        let target = event.target;
        let mut path = self.ancestors(target);
        path.reverse();

        trace!(
            "[events] dispatch {} to {:?} through {} ancestors",
            event.event_type,
            target,
            path.len()
        );

        'dispatch: {
            event.phase = Phase::Capturing;
            for &node in &path {
                self.invoke(node, Some(true), &mut event);
                if event.propagation_stopped() {
                    break 'dispatch;
                }
            }

            event.phase = Phase::AtTarget;
            self.invoke(target, None, &mut event);
            if event.propagation_stopped() || !event.event_type.bubbles() {
                break 'dispatch;
            }

            event.phase = Phase::Bubbling;
            for &node in path.iter().rev() {
                self.invoke(node, Some(false), &mut event);
                if event.propagation_stopped() {
                    break 'dispatch;
                }
            }
        }

        event.phase = Phase::None;
        event.current_target = None;
        DispatchOutcome {
            default_prevented: event.default_prevented(),
            propagation_stopped: event.propagation_stopped(),
        }
    }

    /// Call the listeners on `node` in registration order. `capture` filters
    /// by listener phase; `None` runs capture listeners first, then the rest.
    fn invoke(&mut self, node: NodeId, capture: Option<bool>, event: &mut Event) {
        let event_type = event.event_type;
        let select = |want: bool| -> Vec<Rc<dyn EventListener>> {
            self.listeners
                .iter()
                .filter(|e| e.target == node && e.event_type == event_type)
                .filter(|e| e.capture == want)
                .map(|e| Rc::clone(&e.listener))
                .collect()
        };
        let snapshot = match capture {
            Some(want) => select(want),
            None => {
                let mut all = select(true);
                all.extend(select(false));
                all
            }
        };

        event.current_target = Some(node);
        for listener in snapshot {
            listener.handle_event(self, event);
        }
    }

    // =========================================================================
    // User interaction
    // =========================================================================

    /// Move focus to `node`, blurring the previously focused element.
    pub fn focus(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            return;
        }
        if let Some(previous) = self.focused {
            self.blur(previous);
        }
        self.focused = Some(node);
        self.dispatch_event(Event::new(EventType::Focus, node));
    }

    /// Take focus away from `node` and fire `blur` on it.
    pub fn blur(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            self.focused = None;
        }
        self.dispatch_event(Event::new(EventType::Blur, node));
    }

    /// Replace a control's value as if the user typed it, then fire `input`.
    pub fn type_text(&mut self, node: NodeId, text: &str) -> DispatchOutcome {
        if let Some(data) = self.element_data_mut(node) {
            data.value = text.to_string();
            data.user_edited = true;
        }
        self.dispatch_event(Event::new(EventType::Input, node))
    }

    /// Activate a checkbox or radio: toggle (or select) it, then fire `input`
    /// and `change`.
    pub fn click(&mut self, node: NodeId) {
        match self.input_type(node) {
            Some(InputType::Checkbox) => {
                let checked = self.is_checked(node);
                self.set_checked(node, !checked);
            }
            Some(InputType::Radio) => {
                if self.is_checked(node) {
                    return;
                }
                self.set_checked(node, true);
            }
            _ => return,
        }
        self.dispatch_event(Event::new(EventType::Input, node));
        self.dispatch_event(Event::new(EventType::Change, node));
    }

    /// Request submission of `form`. The outcome reports whether any listener
    /// cancelled it.
    pub fn submit(&mut self, form: NodeId) -> DispatchOutcome {
        self.dispatch_event(Event::new(EventType::Submit, form))
    }
}
