//! Constraint evaluator.
//!
//! Pure functions from (rule, effective value, field, form scope) to a
//! [`RuleOutcome`]. Nothing here mutates the host.

use std::sync::LazyLock;

use regex::Regex;

use super::{Check, FieldValue, Outcome, ValidationRule};
use crate::host::{DocumentHost, FieldType, FormScope};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL: invalid regex pattern")
});

/// Result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub is_valid: bool,
    /// Failure message: the predicate's text, else the declared message,
    /// else the default. `None` when the rule passed.
    pub message: Option<String>,
    /// The rule's advisory text, reported whether or not it passed.
    pub warning: Option<String>,
}

/// Evaluate `rule` against `value` for `field`.
pub fn evaluate<H: DocumentHost>(
    rule: &ValidationRule<H::Node>,
    value: &FieldValue,
    field: &H::Node,
    scope: &FormScope<'_, H>,
) -> RuleOutcome {
    let verdict = check(&rule.check, value, field, scope);
    let message = match verdict {
        Outcome::Pass => None,
        Outcome::Fail => Some(
            rule.message
                .clone()
                .unwrap_or_else(|| default_message(&rule.check)),
        ),
        Outcome::FailWith(text) => Some(text),
    };

    RuleOutcome {
        is_valid: message.is_none(),
        message,
        warning: rule.warning.clone(),
    }
}

fn check<H: DocumentHost>(
    check: &Check<H::Node>,
    value: &FieldValue,
    field: &H::Node,
    scope: &FormScope<'_, H>,
) -> Outcome {
    let host = scope.host;
    match check {
        Check::Required => match host.field_type(field) {
            FieldType::Checkbox if !scope.is_group(field) => host.is_checked(field).into(),
            FieldType::Checkbox | FieldType::Radio => {
                (scope.checked_count(&scope.name_of(field)) > 0).into()
            }
            _ => (!value.is_empty()).into(),
        },
        Check::Email => EMAIL.is_match(&value.as_text()).into(),
        Check::MinLength(min) => (value.as_text().chars().count() >= *min).into(),
        Check::MaxLength(max) => (value.as_text().chars().count() <= *max).into(),
        Check::Min(min) => numeric(value, |n| n >= *min),
        Check::Max(max) => numeric(value, |n| n <= *max),
        Check::Pattern(re) => re.is_match(&value.as_text()).into(),
        Check::Equals(other) => match value {
            FieldValue::Selected(_) => Outcome::Fail,
            FieldValue::Text(text) => scope
                .first_named(other)
                .is_some_and(|node| host.value(&node) == *text)
                .into(),
        },
        Check::Custom(predicate) => predicate(value, field),
        Check::MinSelected(min) => selected_count(field, scope).is_none_or(|n| n >= *min).into(),
        Check::MaxSelected(max) => selected_count(field, scope).is_none_or(|n| n <= *max).into(),
        Check::Other(_) => Outcome::Pass,
    }
}

/// Empty values pass; non-numeric values fail.
fn numeric(value: &FieldValue, accept: impl Fn(f64) -> bool) -> Outcome {
    let text = value.as_text();
    if text.is_empty() {
        return Outcome::Pass;
    }
    to_number(&text).is_some_and(accept).into()
}

/// Blank text reads as zero; infinities and NaN are not numbers.
fn to_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Checked same-named checkboxes; `None` when the field is not a checkbox.
fn selected_count<H: DocumentHost>(field: &H::Node, scope: &FormScope<'_, H>) -> Option<usize> {
    (scope.host.field_type(field) == FieldType::Checkbox)
        .then(|| scope.checked_count(&scope.name_of(field)))
}

/// Templated message used when a failing rule declares none.
pub fn default_message<N>(check: &Check<N>) -> String {
    match check {
        Check::Required => "This field is required".to_string(),
        Check::Email => "Please enter a valid email address".to_string(),
        Check::MinLength(n) => format!("Minimum length: {n}"),
        Check::MaxLength(n) => format!("Maximum length: {n}"),
        Check::Min(n) => format!("Minimum value: {n}"),
        Check::Max(n) => format!("Maximum value: {n}"),
        Check::Pattern(_) => "Value does not match the required format".to_string(),
        Check::Equals(other) => format!("Value must match {other}"),
        Check::MinSelected(n) => format!("Select at least {n} options"),
        Check::MaxSelected(n) => format!("Select at most {n} options"),
        Check::Custom(_) | Check::Other(_) => {
            format!("Validation failed for rule: {}", check.kind())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_skips_empty_and_rejects_garbage() {
        assert_eq!(numeric(&"".into(), |_| false), Outcome::Pass);
        assert_eq!(numeric(&"abc".into(), |_| true), Outcome::Fail);
        assert_eq!(numeric(&" 5 ".into(), |n| n == 5.0), Outcome::Pass);
    }

    #[test]
    fn test_numeric_whitespace_reads_as_zero() {
        assert_eq!(numeric(&"   ".into(), |n| n == 0.0), Outcome::Pass);
        assert_eq!(numeric(&"   ".into(), |n| n >= 1.0), Outcome::Fail);
    }

    #[test]
    fn test_numeric_rejects_non_finite() {
        for text in ["inf", "-inf", "+Infinity", "INFINITY", "NaN", "1e400"] {
            assert_eq!(numeric(&text.into(), |_| true), Outcome::Fail, "{text}");
        }
    }

    #[test]
    fn test_default_messages_name_the_bound() {
        assert_eq!(default_message::<()>(&Check::MinLength(3)), "Minimum length: 3");
        assert_eq!(default_message::<()>(&Check::Min(0.0)), "Minimum value: 0");
        assert_eq!(default_message::<()>(&Check::Max(2.5)), "Maximum value: 2.5");
        assert_eq!(
            default_message::<()>(&Check::Other("zip".into())),
            "Validation failed for rule: zip"
        );
    }

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL.is_match("a@b.co"));
        assert!(!EMAIL.is_match(""));
        assert!(!EMAIL.is_match("a b@c.d"));
        assert!(!EMAIL.is_match("a@b"));
    }
}
