//! Native constraint validation for form controls.
//!
//! Mirrors the platform's validity flags: each flag is derived from the
//! control's attributes and current value whenever it is read, so there is
//! no cached state to go stale.

use regex::Regex;

use crate::{Document, NodeId};

/// Parsed `type` attribute of an `<input>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputType {
    Text,
    Search,
    Tel,
    Url,
    Email,
    Password,
    Date,
    Month,
    Week,
    Time,
    DatetimeLocal,
    Number,
    Range,
    Color,
    Checkbox,
    Radio,
    File,
    Hidden,
    Submit,
    Reset,
    Button,
    Image,
}

impl InputType {
    /// Unknown or missing types fall back to `Text`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Self::Search,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "email" => Self::Email,
            "password" => Self::Password,
            "date" => Self::Date,
            "month" => Self::Month,
            "week" => Self::Week,
            "time" => Self::Time,
            "datetime-local" => Self::DatetimeLocal,
            "number" => Self::Number,
            "range" => Self::Range,
            "color" => Self::Color,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "file" => Self::File,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "button" => Self::Button,
            "image" => Self::Image,
            _ => Self::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Email => "email",
            Self::Password => "password",
            Self::Date => "date",
            Self::Month => "month",
            Self::Week => "week",
            Self::Time => "time",
            Self::DatetimeLocal => "datetime-local",
            Self::Number => "number",
            Self::Range => "range",
            Self::Color => "color",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::File => "file",
            Self::Hidden => "hidden",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::Button => "button",
            Self::Image => "image",
        }
    }

    /// Types whose value is free text, subject to `pattern` and length limits.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Search | Self::Tel | Self::Url | Self::Email | Self::Password
        )
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }

    /// Types that never take part in constraint validation.
    fn is_barred(self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Submit | Self::Reset | Self::Button | Self::Image
        )
    }
}

/// Validity flags of a single control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    pub bad_input: bool,
}

impl ValidityState {
    pub fn valid(&self) -> bool {
        !(self.value_missing
            || self.type_mismatch
            || self.pattern_mismatch
            || self.too_long
            || self.too_short
            || self.range_underflow
            || self.range_overflow
            || self.step_mismatch
            || self.bad_input)
    }
}

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
const URL_PATTERN: &str = r"^[a-zA-Z][a-zA-Z0-9+.\-]*:\S+$";

impl Document {
    /// Compute the validity flags of a control.
    ///
    /// Elements that are not controls, disabled controls and barred input
    /// types always report a valid state.
    pub fn validity(&self, node: NodeId) -> ValidityState {
        let mut state = ValidityState::default();
        let tag = match self.tag_name(node) {
            Some(tag @ ("input" | "select" | "textarea")) => tag,
            _ => return state,
        };
        if self.has_attribute(node, "disabled") {
            return state;
        }
        let input_type = self.input_type(node);
        if input_type.is_some_and(InputType::is_barred) {
            return state;
        }

        let value = self.value(node);
        let required = self.has_attribute(node, "required");

        match input_type {
            Some(InputType::Checkbox) => {
                state.value_missing = required && !self.is_checked(node);
                return state;
            }
            Some(InputType::Radio) => {
                let group = self.radio_group(node);
                let group_required = group.iter().any(|&r| self.has_attribute(r, "required"));
                state.value_missing = group_required && !group.iter().any(|&r| self.is_checked(r));
                return state;
            }
            _ => {}
        }

        if value.is_empty() {
            state.value_missing = required && !matches!(input_type, Some(InputType::Range | InputType::Color));
            return state;
        }

        let textual = tag == "textarea" || input_type.is_some_and(InputType::is_textual);

        match input_type {
            Some(InputType::Email) => {
                let multiple = self.has_attribute(node, "multiple");
                state.type_mismatch = if multiple {
                    value.split(',').any(|part| !matches_full(EMAIL_PATTERN, part.trim()))
                } else {
                    !matches_full(EMAIL_PATTERN, value)
                };
            }
            Some(InputType::Url) => state.type_mismatch = !matches_full(URL_PATTERN, value),
            _ => {}
        }

        if tag == "input" && input_type.is_some_and(InputType::is_textual) {
            if let Some(pattern) = self.attribute(node, "pattern") {
                if let Ok(re) = Regex::new(&format!("^(?:{pattern})$")) {
                    state.pattern_mismatch = !re.is_match(value);
                }
            }
        }

        if textual && self.is_user_edited(node) {
            let len = value.chars().count();
            if let Some(min) = self.length_attr(node, "minlength") {
                state.too_short = len < min;
            }
            if let Some(max) = self.length_attr(node, "maxlength") {
                state.too_long = len > max;
            }
        }

        if input_type.is_some_and(InputType::is_numeric) {
            match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => self.check_range(node, n, &mut state),
                _ => state.bad_input = true,
            }
        }

        state
    }

    fn check_range(&self, node: NodeId, n: f64, state: &mut ValidityState) {
        let min = self.number_attr(node, "min");
        let max = self.number_attr(node, "max");
        if let Some(min) = min {
            state.range_underflow = n < min;
        }
        if let Some(max) = max {
            state.range_overflow = n > max;
        }

        let step = match self.attribute(node, "step") {
            Some(step) if step.trim().eq_ignore_ascii_case("any") => None,
            Some(step) => step.trim().parse::<f64>().ok().filter(|s| *s > 0.0).or(Some(1.0)),
            None => Some(1.0),
        };
        if let Some(step) = step {
            let base = min.unwrap_or(0.0);
            let steps = (n - base) / step;
            state.step_mismatch = (steps - steps.round()).abs() > 1e-9;
        }
    }

    fn number_attr(&self, node: NodeId, name: &str) -> Option<f64> {
        self.attribute(node, name)?.trim().parse().ok()
    }

    fn length_attr(&self, node: NodeId, name: &str) -> Option<usize> {
        self.attribute(node, name)?.trim().parse().ok()
    }
}

fn matches_full(pattern: &str, value: &str) -> bool {
    Regex::new(pattern).is_ok_and(|re| re.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_parse() {
        assert_eq!(InputType::parse("EMAIL"), InputType::Email);
        assert_eq!(InputType::parse("datetime-local"), InputType::DatetimeLocal);
        assert_eq!(InputType::parse("bogus"), InputType::Text);
        assert_eq!(InputType::Number.as_str(), "number");
    }

    #[test]
    fn test_default_state_is_valid() {
        assert!(ValidityState::default().valid());
        let state = ValidityState {
            step_mismatch: true,
            ..Default::default()
        };
        assert!(!state.valid());
    }
}
