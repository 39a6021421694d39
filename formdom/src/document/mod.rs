//! Arena-backed document tree.
//!
//! [`Document`] owns every node. Nodes are addressed by [`NodeId`] and keep
//! parent links, so queries can walk both down and up the tree. Detached
//! nodes stay in the arena but are unreachable from the root.

mod events;
mod mutate;

use std::rc::Rc;

use crate::element::{Content, Element};
use crate::event::{EventListener, EventType, ListenerId};
use crate::validity::InputType;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,
    /// Current value of a form control.
    pub value: String,
    /// True when the current value came from a user edit.
    pub user_edited: bool,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

pub(crate) struct ListenerEntry {
    pub id: ListenerId,
    pub target: NodeId,
    pub event_type: EventType,
    pub capture: bool,
    pub listener: Rc<dyn EventListener>,
}

/// A mutable document with form controls and event dispatch.
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
    pub(crate) listeners: Vec<ListenerEntry>,
    pub(crate) next_listener: u64,
    pub(crate) focused: Option<NodeId>,
    /// Text nodes dropped by `set_text`, reused by later calls.
    pub(crate) spare_text: Vec<NodeId>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .field("listeners", &self.listeners.len())
            .field("focused", &self.focused)
            .field("spare_text", &self.spare_text.len())
            .finish()
    }
}

impl Document {
    /// Flatten a builder tree into a new document rooted at `root`.
    pub fn new(root: Element) -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            listeners: Vec::new(),
            next_listener: 0,
            focused: None,
            spare_text: Vec::new(),
        };
        doc.root = doc.build(root, None);
        doc
    }

    fn build(&mut self, element: Element, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());

        if element.is_text() {
            let text = match element.content {
                Content::Text(text) => text,
                _ => String::new(),
            };
            self.nodes.push(NodeData {
                kind: NodeKind::Text(text),
                parent,
                children: Vec::new(),
            });
            return id;
        }

        let mut attributes = element.attributes;
        if let Some(element_id) = element.id {
            attributes.insert(0, ("id".to_string(), element_id));
        }
        let initial_value = element.value;

        self.nodes.push(NodeData {
            kind: NodeKind::Element(ElementData {
                tag: element.tag,
                attributes,
                classes: element.classes,
                value: String::new(),
                user_edited: false,
                checked: element.checked,
            }),
            parent,
            children: Vec::new(),
        });

        let children = match element.content {
            Content::None => Vec::new(),
            Content::Text(text) => vec![Element::text(text)],
            Content::Children(children) => children,
        };
        for child in children {
            let child_id = self.build(child, Some(id));
            self.nodes[id.0].children.push(child_id);
        }

        let value = initial_value.unwrap_or_else(|| self.default_value(id));
        if let Some(data) = self.element_data_mut(id) {
            data.value = value;
        }
        id
    }

    /// Value a control reports before anyone edits it.
    pub(crate) fn default_value(&self, node: NodeId) -> String {
        match self.tag_name(node) {
            Some("input") => match self.attribute(node, "value") {
                Some(value) => value.to_string(),
                None if matches!(
                    self.input_type(node),
                    Some(InputType::Checkbox | InputType::Radio)
                ) =>
                {
                    "on".to_string()
                }
                None => String::new(),
            },
            Some("textarea") => self.text_content(node),
            Some("select") => {
                let options = self.descendants_by_tag(node, "option");
                options
                    .iter()
                    .find(|&&o| self.has_attribute(o, "selected"))
                    .or_else(|| options.first())
                    .map(|&o| self.option_value(o))
                    .unwrap_or_default()
            }
            _ => String::new(),
        }
    }

    fn option_value(&self, option: NodeId) -> String {
        self.attribute(option, "value")
            .map(str::to_string)
            .unwrap_or_else(|| self.text_content(option))
    }

    // =========================================================================
    // Node access
    // =========================================================================

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    pub(crate) fn element_data(&self, node: NodeId) -> Option<&ElementData> {
        match &self.node(node)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub(crate) fn element_data_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn exists(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    /// Nodes allocated so far, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element_data(node).is_some()
    }

    /// True when the node is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        node == self.root || self.ancestors(node).last() == Some(&self.root)
    }

    /// Lowercase tag name, or `None` for text nodes.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element_data(node).map(|d| d.tag.as_str())
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element_data(node)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element_data(node)
            .is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    /// Space-separated class list, like the `className` property.
    pub fn class_name(&self, node: NodeId) -> String {
        self.element_data(node)
            .map(|d| d.classes.join(" "))
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    /// All child nodes, text included.
    pub fn child_nodes(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children only.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.child_nodes(node)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
            .collect()
    }

    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let pos = siblings.iter().position(|&s| s == node)?;
        siblings.get(pos + 1).copied()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(n) = current {
            out.push(n);
            current = self.parent(n);
        }
        out
    }

    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// Element descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node, &mut out);
        out
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.child_nodes(node) {
            if self.is_element(child) {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }

    /// Concatenated text of every text node under `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        match self.node(node).map(|n| &n.kind) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Element(_)) => self
                .child_nodes(node)
                .iter()
                .map(|&c| self.text_content(c))
                .collect(),
            None => String::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.attribute(n, "id") == Some(id))
    }

    /// Descendants of `scope` whose `name` attribute equals `name`.
    pub fn query_name(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.attribute(n, "name") == Some(name))
            .collect()
    }

    /// First descendant of `scope` carrying `class`.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| self.has_class(n, class))
    }

    pub fn descendants_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.tag_name(n) == Some(tag))
            .collect()
    }

    /// Input, select and textarea descendants of `scope`.
    pub fn controls(&self, scope: NodeId) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.is_control(n))
            .collect()
    }

    pub fn is_control(&self, node: NodeId) -> bool {
        matches!(self.tag_name(node), Some("input" | "select" | "textarea"))
    }

    // =========================================================================
    // Form controls
    // =========================================================================

    /// Parsed `type` of an `<input>`; `None` for other elements.
    pub fn input_type(&self, node: NodeId) -> Option<InputType> {
        if self.tag_name(node) != Some("input") {
            return None;
        }
        Some(InputType::parse(self.attribute(node, "type").unwrap_or("text")))
    }

    /// Current value of a control. Empty for anything else.
    pub fn value(&self, node: NodeId) -> &str {
        self.element_data(node)
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.element_data(node).is_some_and(|d| d.checked)
    }

    pub fn is_user_edited(&self, node: NodeId) -> bool {
        self.element_data(node).is_some_and(|d| d.user_edited)
    }

    /// Nearest `<form>` ancestor.
    pub fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|&n| self.tag_name(n) == Some("form"))
    }

    /// Radio buttons sharing `node`'s name and form owner, `node` included.
    pub fn radio_group(&self, node: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attribute(node, "name") else {
            return vec![node];
        };
        let scope = self.form_owner(node).unwrap_or(self.root);
        self.query_name(scope, name)
            .into_iter()
            .filter(|&n| self.input_type(n) == Some(InputType::Radio))
            .collect()
    }

    /// Labels associated with a control, in document order.
    ///
    /// A label is associated when its `for` attribute names the control's id,
    /// or when it wraps the control and has no `for` attribute.
    pub fn labels(&self, node: NodeId) -> Vec<NodeId> {
        if !self.is_control(node) || self.input_type(node) == Some(InputType::Hidden) {
            return Vec::new();
        }
        let id = self.attribute(node, "id");
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&n| self.tag_name(n) == Some("label"))
            .filter(|&label| match self.attribute(label, "for") {
                Some(target) => Some(target) == id,
                None => self.contains(label, node),
            })
            .collect()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_assigns_preorder_ids() {
        let doc = Document::new(
            Element::form()
                .child(Element::div().child(Element::input("text")))
                .child(Element::span()),
        );
        let root = doc.root();
        assert_eq!(doc.descendants(root).len(), 3);
        assert_eq!(doc.tag_name(NodeId(1)), Some("div"));
        assert_eq!(doc.tag_name(NodeId(2)), Some("input"));
        assert_eq!(doc.tag_name(NodeId(3)), Some("span"));
    }

    #[test]
    fn test_default_values() {
        let doc = Document::new(
            Element::form()
                .child(Element::input("checkbox").id("cb"))
                .child(Element::textarea().id("ta").value("hello"))
                .child(
                    Element::select()
                        .id("sel")
                        .child(Element::option("a", "A"))
                        .child(Element::option("b", "B").flag("selected")),
                ),
        );
        let cb = doc.get_element_by_id("cb").unwrap();
        let ta = doc.get_element_by_id("ta").unwrap();
        let sel = doc.get_element_by_id("sel").unwrap();
        assert_eq!(doc.value(cb), "on");
        assert_eq!(doc.value(ta), "hello");
        assert_eq!(doc.value(sel), "b");
    }
}
