use super::Content;

/// Tag used for bare text nodes built with [`Element::text`].
pub const TEXT_TAG: &str = "#text";

/// Declarative description of a document subtree.
///
/// Elements are plain values assembled with builder methods and handed to
/// [`Document::new`](crate::Document::new), which flattens them into the
/// document arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub tag: String,
    pub id: Option<String>,

    // Markup
    pub attributes: Vec<(String, String)>,
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Form control state
    /// Initial current value. Defaults to the `value` attribute when unset.
    pub value: Option<String>,
    pub checked: bool,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            attributes: Vec::new(),
            classes: Vec::new(),
            content: Content::None,
            value: None,
            checked: false,
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn fieldset() -> Self {
        Self::new("fieldset")
    }

    pub fn legend(caption: impl Into<String>) -> Self {
        Self::new("legend").child(Self::text(caption))
    }

    pub fn label(caption: impl Into<String>) -> Self {
        Self::new("label").child(Self::text(caption))
    }

    /// Create an `<input>` of the given type.
    pub fn input(input_type: impl Into<String>) -> Self {
        Self::new("input").attr("type", input_type)
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    pub fn option(value: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new("option")
            .attr("value", value)
            .child(Self::text(caption))
    }

    pub fn button(caption: impl Into<String>) -> Self {
        Self::new("button")
            .attr("type", "submit")
            .child(Self::text(caption))
    }

    /// Create a bare text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            tag: TEXT_TAG.to_string(),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    // Markup
    /// Set an attribute, replacing any earlier value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "id" => self.id = Some(value),
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {
                if let Some(slot) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
                    slot.1 = value;
                } else {
                    self.attributes.push((name, value));
                }
            }
        }
        self
    }

    /// Set a boolean attribute such as `required`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attr(name, "")
    }

    pub fn required(self) -> Self {
        self.flag("required")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        for class in class.into().split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    /// Point a `<label>` at a control id.
    pub fn label_for(self, id: impl Into<String>) -> Self {
        self.attr("for", id)
    }

    // Form control state
    /// Set both the `value` attribute and the initial current value.
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.value = Some(value.clone());
        if self.tag == "textarea" {
            self.content = Content::Text(value);
            self
        } else {
            self.attr("value", value)
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    // Content
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            Content::Text(text) => {
                let text = std::mem::take(text);
                self.content = Content::Children(vec![Self::text(text), child]);
            }
            Content::None => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(self, children: impl IntoIterator<Item = Element>) -> Self {
        children.into_iter().fold(self, Self::child)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
