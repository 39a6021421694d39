//! Validator configuration.

use serde::Deserialize;

use crate::error::Result;

/// Where a synthesized feedback node goes relative to a singular field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Immediately after the field (default).
    #[default]
    After,
    /// Immediately before the field.
    Before,
    /// As the last child of the field's parent.
    Parent,
}

/// Options resolved once at construction.
///
/// Missing keys keep their defaults, so a partial JSON object or a few
/// builder calls are enough to override individual settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorOptions {
    /// Still compute advisory warnings, but do not send them to the sink.
    pub suppress_advisory_warnings: bool,

    /// Class applied to field nodes (and feedback nodes) in the error state.
    pub error_state_class: String,

    /// Class applied to field nodes that passed validation.
    pub success_state_class: String,

    /// Marker class identifying feedback nodes.
    pub feedback_node_class: String,

    /// Tag used when a feedback node has to be created.
    pub feedback_node_tag: String,

    /// Placement of created feedback nodes for singular fields.
    pub feedback_node_placement: Placement,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            suppress_advisory_warnings: false,
            error_state_class: "field-error".to_string(),
            success_state_class: "field-valid".to_string(),
            feedback_node_class: "field-feedback".to_string(),
            feedback_node_tag: "div".to_string(),
            feedback_node_placement: Placement::After,
        }
    }
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay a JSON object onto the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn suppress_advisory_warnings(mut self, suppress: bool) -> Self {
        self.suppress_advisory_warnings = suppress;
        self
    }

    pub fn error_state_class(mut self, class: impl Into<String>) -> Self {
        self.error_state_class = class.into();
        self
    }

    pub fn success_state_class(mut self, class: impl Into<String>) -> Self {
        self.success_state_class = class.into();
        self
    }

    pub fn feedback_node_class(mut self, class: impl Into<String>) -> Self {
        self.feedback_node_class = class.into();
        self
    }

    pub fn feedback_node_tag(mut self, tag: impl Into<String>) -> Self {
        self.feedback_node_tag = tag.into();
        self
    }

    pub fn feedback_node_placement(mut self, placement: Placement) -> Self {
        self.feedback_node_placement = placement;
        self
    }
}
