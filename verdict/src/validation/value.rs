//! Effective field values.

use crate::host::{DocumentHost, FieldType, FormScope};

/// The normalized value rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Value of a singular field, whitespace preserved.
    Text(String),
    /// Values of the checked members of a checkbox/radio group, in document
    /// order.
    Selected(Vec<String>),
}

impl FieldValue {
    /// Textual form. Selections are joined with `,`.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Selected(values) => values.join(","),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Selected(values) => values.is_empty(),
        }
    }

    /// Selected values; a non-empty text counts as one selection.
    pub fn selected(&self) -> Vec<&str> {
        match self {
            Self::Text(text) if text.is_empty() => Vec::new(),
            Self::Text(text) => vec![text.as_str()],
            Self::Selected(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Extract the effective value of `field`.
///
/// Checkbox and radio groups with more than one member yield the values of
/// their checked members; a lone checkbox yields its value when checked and
/// an empty string otherwise; everything else yields its raw value.
pub fn effective_value<H: DocumentHost>(scope: &FormScope<'_, H>, field: &H::Node) -> FieldValue {
    let host = scope.host;
    let field_type = host.field_type(field);

    if field_type.is_checkable() {
        let members = scope.members(&scope.name_of(field));
        if members.len() > 1 {
            return FieldValue::Selected(
                members
                    .iter()
                    .filter(|m| host.is_checked(m))
                    .map(|m| host.value(m))
                    .collect(),
            );
        }
        if field_type == FieldType::Checkbox {
            return FieldValue::Text(if host.is_checked(field) {
                host.value(field)
            } else {
                String::new()
            });
        }
    }

    FieldValue::Text(host.value(field))
}
