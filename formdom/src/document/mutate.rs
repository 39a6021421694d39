use super::{Document, ElementData, NodeData, NodeId, NodeKind};
use crate::error::DomError;
use crate::validity::InputType;

impl Document {
    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: NodeKind::Element(ElementData {
                tag: tag.to_ascii_lowercase(),
                ..Default::default()
            }),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: NodeKind::Text(text.into()),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // =========================================================================
    // Attributes and classes
    // =========================================================================

    /// Set an attribute. `class` rewrites the class list; `value` on an
    /// unedited control also resets its current value.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.set_class_name(node, value);
            return;
        }
        let resets_value = name == "value" && self.tag_name(node) == Some("input");
        let Some(data) = self.element_data_mut(node) else {
            return;
        };
        if let Some(slot) = data.attributes.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value.to_string();
        } else {
            data.attributes.push((name, value.to_string()));
        }
        if resets_value && !data.user_edited {
            data.value = value.to_string();
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.element_data_mut(node) {
            data.attributes.retain(|(n, _)| n != name);
        }
    }

    /// Replace the whole class list, like assigning `className`.
    pub fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(data) = self.element_data_mut(node) {
            data.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.element_data_mut(node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.element_data_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    /// Replace all children with a single text node, like assigning
    /// `textContent`. An empty string leaves the element without children.
    ///
    /// A lone text child is rewritten in place. Text nodes this call drops
    /// are recycled, so repeated calls do not grow the arena.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if !self.is_element(node) {
            if let Some(NodeData {
                kind: NodeKind::Text(existing),
                ..
            }) = self.nodes.get_mut(node.0)
            {
                *existing = text.to_string();
            }
            return;
        }

        if let &[only] = self.nodes[node.0].children.as_slice() {
            if !text.is_empty() {
                if let NodeKind::Text(existing) = &mut self.nodes[only.0].kind {
                    *existing = text.to_string();
                    return;
                }
            }
        }

        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
            if matches!(self.nodes[child.0].kind, NodeKind::Text(_)) {
                self.spare_text.push(child);
            }
        }
        if !text.is_empty() {
            let text_node = self.reuse_text(text);
            self.nodes[text_node.0].parent = Some(node);
            self.nodes[node.0].children.push(text_node);
        }
    }

    fn reuse_text(&mut self, text: &str) -> NodeId {
        while let Some(spare) = self.spare_text.pop() {
            // Skip spares that were attached again since they were dropped.
            if self.nodes[spare.0].parent.is_none() {
                self.nodes[spare.0].kind = NodeKind::Text(text.to_string());
                return spare;
            }
        }
        self.create_text(text)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `node` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A node that already has a parent is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        for id in [parent, node].into_iter().chain(reference) {
            if !self.exists(id) {
                return Err(DomError::UnknownNode(id));
            }
        }
        if !self.is_element(parent) || node == self.root || self.contains(node, parent) {
            return Err(DomError::InvalidPlacement { node, parent });
        }
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild { parent, reference });
            }
            if reference == node {
                return Ok(());
            }
        }

        self.detach(node);
        let siblings = &mut self.nodes[parent.0].children;
        let index = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
        Ok(())
    }

    /// Detach a node from its parent. The subtree stays intact.
    pub fn remove(&mut self, node: NodeId) {
        if self.exists(node) {
            self.detach(node);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    // =========================================================================
    // Control state
    // =========================================================================

    /// Set a control's value programmatically. Clears the user-edit mark.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.element_data_mut(node) {
            data.value = value.to_string();
            data.user_edited = false;
        }
    }

    /// Set a checkbox or radio state. Checking a radio unchecks the rest of
    /// its group.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if checked && self.input_type(node) == Some(InputType::Radio) {
            for other in self.radio_group(node) {
                if other != node {
                    if let Some(data) = self.element_data_mut(other) {
                        data.checked = false;
                    }
                }
            }
        }
        if let Some(data) = self.element_data_mut(node) {
            data.checked = checked;
        }
    }
}
