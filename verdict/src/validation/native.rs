//! Translation of platform validity flags into messages.

use std::collections::HashMap;

use super::RuleKind;
use crate::host::{DocumentHost, NativeValidity};

/// One active native flag, mapped onto the rule kind that shares its
/// override slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFailure {
    pub kind: RuleKind,
    pub message: String,
}

/// Messages for every active flag, in flag order.
///
/// Each message is the override registered for the mapped kind, or a
/// default naming the bound taken from the field's attributes.
pub fn native_failures<H: DocumentHost>(
    host: &H,
    field: &H::Node,
    validity: &NativeValidity,
    overrides: &HashMap<RuleKind, String>,
) -> Vec<NativeFailure> {
    let attr = |name: &str| host.attribute(field, name).unwrap_or_default();

    let flags = [
        (validity.value_missing, RuleKind::Required),
        (validity.type_mismatch, RuleKind::Email),
        (validity.pattern_mismatch, RuleKind::Pattern),
        (validity.too_short, RuleKind::MinLength),
        (validity.too_long, RuleKind::MaxLength),
        (validity.range_underflow, RuleKind::Min),
        (validity.range_overflow, RuleKind::Max),
        (validity.step_mismatch, RuleKind::Step),
    ];

    flags
        .into_iter()
        .filter(|(active, _)| *active)
        .map(|(_, kind)| {
            let message = match overrides.get(&kind) {
                Some(text) => text.clone(),
                None => match kind {
                    RuleKind::Required => "This field is required".to_string(),
                    RuleKind::Email => "Please enter a valid email address".to_string(),
                    RuleKind::Pattern => "Value does not match the required format".to_string(),
                    RuleKind::MinLength => format!("Minimum length: {}", attr("minlength")),
                    RuleKind::MaxLength => format!("Maximum length: {}", attr("maxlength")),
                    RuleKind::Min => format!("Minimum value: {}", attr("min")),
                    RuleKind::Max => format!("Maximum value: {}", attr("max")),
                    _ => format!("Value must be a multiple of {}", step_of(&attr("step"))),
                },
            };
            NativeFailure { kind, message }
        })
        .collect()
}

fn step_of(attr: &str) -> &str {
    if attr.trim().is_empty() { "1" } else { attr.trim() }
}
