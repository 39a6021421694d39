//! [`DocumentHost`] implementation for [`formdom::Document`].

use std::rc::Rc;

use formdom::{Document, Event, EventListener, EventType, ListenerId, NodeId};
use log::warn;

use super::{DocumentHost, FormEvent, FormEventKind, FormListener, ListenPhase, NativeValidity};
use crate::validation::ValidationRule;

/// Rule type for validators running on a [`formdom::Document`].
pub type Rule = ValidationRule<NodeId>;

/// Adapts a validator listener to the document's listener interface.
struct Bridge {
    kind: FormEventKind,
    listener: Rc<dyn FormListener<Document>>,
}

impl EventListener for Bridge {
    fn handle_event(&self, doc: &mut Document, event: &mut Event) {
        let mut form_event = FormEvent::new(self.kind, event.target);
        self.listener.on_event(doc, &mut form_event);
        if form_event.default_prevented() {
            event.prevent_default();
        }
        if form_event.propagation_stopped() {
            event.stop_propagation();
        }
    }
}

fn event_type(kind: FormEventKind) -> EventType {
    match kind {
        FormEventKind::Submit => EventType::Submit,
        FormEventKind::Commit => EventType::Blur,
        FormEventKind::Change => EventType::Input,
    }
}

impl DocumentHost for Document {
    type Node = NodeId;
    type ListenerHandle = ListenerId;

    fn root(&self) -> NodeId {
        Document::root(self)
    }

    fn tag_name(&self, node: &NodeId) -> Option<String> {
        Document::tag_name(self, *node).map(str::to_string)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Document::parent(self, *node)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        Document::children(self, *node)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        Document::attribute(self, *node, name).map(str::to_string)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        Document::has_class(self, *node, class)
    }

    fn labels(&self, node: &NodeId) -> Vec<NodeId> {
        Document::labels(self, *node)
    }

    fn descendants(&self, node: &NodeId) -> Vec<NodeId> {
        Document::descendants(self, *node)
    }

    fn controls(&self, node: &NodeId) -> Vec<NodeId> {
        Document::controls(self, *node)
    }

    fn first_with_class(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        self.query_class(*node, class)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id(id)
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        Document::next_element_sibling(self, *node)
    }

    fn value(&self, node: &NodeId) -> String {
        Document::value(self, *node).to_string()
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        Document::is_checked(self, *node)
    }

    fn validity(&self, node: &NodeId) -> NativeValidity {
        let state = Document::validity(self, *node);
        NativeValidity {
            value_missing: state.value_missing,
            type_mismatch: state.type_mismatch,
            pattern_mismatch: state.pattern_mismatch,
            too_short: state.too_short,
            too_long: state.too_long,
            range_underflow: state.range_underflow,
            range_overflow: state.range_overflow,
            step_mismatch: state.step_mismatch,
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        Document::create_element(self, tag)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        Document::set_attribute(self, *node, name, value);
    }

    fn set_class_name(&mut self, node: &NodeId, class_name: &str) {
        Document::set_class_name(self, *node, class_name);
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        Document::add_class(self, *node, class);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        Document::remove_class(self, *node, class);
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        Document::set_text(self, *node, text);
    }

    fn insert_before(&mut self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) {
        if let Err(err) = Document::insert_before(self, *parent, *node, reference.copied()) {
            warn!("[verdict] insert_before failed ({err}), appending instead");
            if let Err(err) = Document::append_child(self, *parent, *node) {
                warn!("[verdict] append_child failed: {err}");
            }
        }
    }

    fn listen(
        &mut self,
        target: &NodeId,
        kind: FormEventKind,
        phase: ListenPhase,
        listener: Rc<dyn FormListener<Self>>,
    ) -> ListenerId {
        self.add_event_listener(
            *target,
            event_type(kind),
            phase == ListenPhase::Capture,
            Rc::new(Bridge { kind, listener }),
        )
    }

    fn unlisten(&mut self, handle: ListenerId) {
        self.remove_event_listener(handle);
    }
}
