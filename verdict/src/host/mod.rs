//! Host adapter.
//!
//! The validator never touches a concrete document. Everything it needs from
//! the host (reading values and constraint flags, locating nodes, mutating
//! them and listening for events) goes through [`DocumentHost`]. The
//! [`formdom`] document implements it in [`dom`].

pub mod dom;
mod scope;

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

pub use scope::FormScope;

/// Coarse classification of a form control, as far as validation cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Email,
    Password,
    Number,
    Range,
    Checkbox,
    Radio,
    Textarea,
    Select,
    /// Any other input type, or a named element that is not a control.
    Other(String),
}

impl FieldType {
    /// Classify from a tag name and an optional `type` attribute.
    pub fn classify(tag: &str, input_type: Option<&str>) -> Self {
        match tag {
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "input" => match input_type.map(str::to_ascii_lowercase).as_deref() {
                None | Some("" | "text") => Self::Text,
                Some("email") => Self::Email,
                Some("password") => Self::Password,
                Some("number") => Self::Number,
                Some("range") => Self::Range,
                Some("checkbox") => Self::Checkbox,
                Some("radio") => Self::Radio,
                Some(other) => Self::Other(other.to_string()),
            },
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }

    /// Fields whose errors are cleared optimistically while the user types.
    pub fn is_free_text(&self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Textarea)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }
}

/// Platform-derived validity flags of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NativeValidity {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_short: bool,
    pub too_long: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
}

impl NativeValidity {
    pub fn valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_short
            || self.too_long
            || self.range_underflow
            || self.range_overflow
            || self.step_mismatch)
    }
}

/// Events the validator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEventKind {
    /// The form is about to be submitted.
    Submit,
    /// A field's value was committed (focus left the field).
    Commit,
    /// A field's value changed while the user is editing it.
    Change,
}

/// Listener phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenPhase {
    Capture,
    Bubble,
}

/// An event as seen by validator listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent<N> {
    pub kind: FormEventKind,
    pub target: N,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<N> FormEvent<N> {
    pub fn new(kind: FormEventKind, target: N) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

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

/// Handler object registered with a host.
pub trait FormListener<H: DocumentHost> {
    fn on_event(&self, host: &mut H, event: &mut FormEvent<H::Node>);
}

/// Capabilities the validator needs from a document.
///
/// Methods with default bodies are derived from the required ones; hosts
/// with faster native lookups can override them.
pub trait DocumentHost: Sized + 'static {
    /// Node handle. Handles must stay valid while nodes are moved around.
    type Node: Clone + Eq + Hash + Debug + 'static;

    /// Token returned by [`listen`](Self::listen).
    type ListenerHandle: Debug;

    // -------------------------------------------------------------------------
    // Locate
    // -------------------------------------------------------------------------

    /// Document root, for document-wide lookups.
    fn root(&self) -> Self::Node;

    /// Lowercase tag name; `None` for non-element nodes.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    /// Labels associated with a control, in document order.
    fn labels(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn is_form(&self, node: &Self::Node) -> bool {
        self.tag_name(node).as_deref() == Some("form")
    }

    /// Element descendants in document order, excluding `node`.
    fn descendants(&self, node: &Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            stack.extend(self.children(&next).into_iter().rev());
            out.push(next);
        }
        out
    }

    /// Controls under `node`, in document order.
    fn controls(&self, node: &Self::Node) -> Vec<Self::Node> {
        self.descendants(node)
            .into_iter()
            .filter(|n| self.is_control(n))
            .collect()
    }

    /// First descendant of `node` carrying `class`.
    fn first_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node> {
        self.descendants(node)
            .into_iter()
            .find(|n| self.has_class(n, class))
    }

    fn element_by_id(&self, id: &str) -> Option<Self::Node> {
        self.descendants(&self.root())
            .into_iter()
            .find(|n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node> {
        let siblings = self.children(&self.parent(node)?);
        let pos = siblings.iter().position(|s| s == node)?;
        siblings.get(pos + 1).cloned()
    }

    /// True for input, select and textarea elements.
    fn is_control(&self, node: &Self::Node) -> bool {
        matches!(
            self.tag_name(node).as_deref(),
            Some("input" | "select" | "textarea")
        )
    }

    // -------------------------------------------------------------------------
    // Read values
    // -------------------------------------------------------------------------

    fn field_type(&self, node: &Self::Node) -> FieldType {
        let tag = self.tag_name(node).unwrap_or_default();
        FieldType::classify(&tag, self.attribute(node, "type").as_deref())
    }

    /// Current value exactly as stored, whitespace included.
    fn value(&self, node: &Self::Node) -> String;

    fn is_checked(&self, node: &Self::Node) -> bool;

    fn validity(&self, node: &Self::Node) -> NativeValidity;

    // -------------------------------------------------------------------------
    // Mutate
    // -------------------------------------------------------------------------

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Replace the whole class list.
    fn set_class_name(&mut self, node: &Self::Node, class_name: &str);

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Replace the node's content with plain text.
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Insert `node` under `parent` before `reference` (at the end when
    /// `None`). Must not fail; hosts fall back to appending.
    fn insert_before(
        &mut self,
        parent: &Self::Node,
        node: &Self::Node,
        reference: Option<&Self::Node>,
    );

    fn append_child(&mut self, parent: &Self::Node, node: &Self::Node) {
        self.insert_before(parent, node, None);
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    fn listen(
        &mut self,
        target: &Self::Node,
        kind: FormEventKind,
        phase: ListenPhase,
        listener: Rc<dyn FormListener<Self>>,
    ) -> Self::ListenerHandle;

    fn unlisten(&mut self, handle: Self::ListenerHandle);
}
