use super::{DocumentHost, FieldType};

/// A host paired with the form a validator is bound to.
///
/// Name lookups are scoped to the form, so same-named controls elsewhere in
/// the document are ignored.
pub struct FormScope<'a, H: DocumentHost> {
    pub host: &'a H,
    pub form: &'a H::Node,
}

impl<'a, H: DocumentHost> FormScope<'a, H> {
    pub fn new(host: &'a H, form: &'a H::Node) -> Self {
        Self { host, form }
    }

    /// First element in the form with the given `name` attribute.
    pub fn first_named(&self, name: &str) -> Option<H::Node> {
        self.host
            .descendants(self.form)
            .into_iter()
            .find(|n| self.host.attribute(n, "name").as_deref() == Some(name))
    }

    /// Controls in the form sharing `name`, in document order.
    pub fn members(&self, name: &str) -> Vec<H::Node> {
        self.host
            .controls(self.form)
            .into_iter()
            .filter(|n| self.host.attribute(n, "name").as_deref() == Some(name))
            .collect()
    }

    /// Number of checked controls sharing `name`.
    pub fn checked_count(&self, name: &str) -> usize {
        self.members(name)
            .iter()
            .filter(|n| self.host.is_checked(n))
            .count()
    }

    pub fn name_of(&self, field: &H::Node) -> String {
        self.host.attribute(field, "name").unwrap_or_default()
    }

    /// True when `field` is a checkbox or radio with same-named siblings.
    pub fn is_group(&self, field: &H::Node) -> bool {
        matches!(
            self.host.field_type(field),
            FieldType::Checkbox | FieldType::Radio
        ) && self.members(&self.name_of(field)).len() > 1
    }
}
