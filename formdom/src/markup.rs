//! HTML-like serialization of a document subtree, for debugging and demos.

use crate::document::NodeKind;
use crate::{Document, NodeId};

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

impl Document {
    /// Serialize `node` and its subtree.
    ///
    /// Control state that lives outside attributes (current value, checked)
    /// is written as `value`/`checked` attributes so the output reflects what
    /// a user would see.
    pub fn to_markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(node, &mut out);
        out
    }

    fn write_markup(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.node(node) else {
            return;
        };
        let element = match &data.kind {
            NodeKind::Text(text) => {
                out.push_str(&escape(text, false));
                return;
            }
            NodeKind::Element(element) => element,
        };

        out.push('<');
        out.push_str(&element.tag);
        for (name, value) in &element.attributes {
            if element.tag == "input" && (name == "value" || name == "checked") {
                continue;
            }
            push_attr(out, name, value);
        }
        if !element.classes.is_empty() {
            push_attr(out, "class", &element.classes.join(" "));
        }
        if element.tag == "input" {
            if !element.value.is_empty() {
                push_attr(out, "value", &element.value);
            }
            if element.checked {
                out.push_str(" checked");
            }
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            return;
        }
        if element.tag == "textarea" {
            out.push_str(&escape(&element.value, false));
        } else {
            for &child in &data.children {
                self.write_markup(child, out);
            }
        }
        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    if !value.is_empty() {
        out.push_str("=\"");
        out.push_str(&escape(value, true));
        out.push('"');
    }
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
