//! Declarative validation rules.

use std::fmt;
use std::rc::Rc;

use regex::Regex;

use super::FieldValue;
use crate::error::{Result, VerdictError};

/// Tag identifying what a rule checks, without its parameter.
///
/// Used as the key for custom message overrides. Native constraint flags map
/// onto the same tags (`Step` exists only for the native step check).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
    Required,
    Email,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    Equals,
    Custom,
    MinSelected,
    MaxSelected,
    Step,
    Other(String),
}

impl RuleKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "required" => Self::Required,
            "email" => Self::Email,
            "minLength" => Self::MinLength,
            "maxLength" => Self::MaxLength,
            "min" => Self::Min,
            "max" => Self::Max,
            "pattern" => Self::Pattern,
            "equals" => Self::Equals,
            "custom" => Self::Custom,
            "minSelected" => Self::MinSelected,
            "maxSelected" => Self::MaxSelected,
            "step" => Self::Step,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Equals => "equals",
            Self::Custom => "custom",
            Self::MinSelected => "minSelected",
            Self::MaxSelected => "maxSelected",
            Self::Step => "step",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RuleKind {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for RuleKind {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

/// Verdict of a custom predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// Fail with the declared (or default) message.
    Fail,
    /// Fail with this message instead of the declared one.
    FailWith(String),
}

impl From<bool> for Outcome {
    fn from(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Self::Pass
    }
}

impl From<String> for Outcome {
    fn from(message: String) -> Self {
        Self::FailWith(message)
    }
}

impl From<&str> for Outcome {
    fn from(message: &str) -> Self {
        Self::FailWith(message.to_string())
    }
}

impl From<Option<String>> for Outcome {
    fn from(message: Option<String>) -> Self {
        message.map_or(Self::Pass, Self::FailWith)
    }
}

impl From<std::result::Result<(), String>> for Outcome {
    fn from(result: std::result::Result<(), String>) -> Self {
        result.err().into()
    }
}

/// Predicate behind a `custom` rule.
pub type Predicate<N> = Rc<dyn Fn(&FieldValue, &N) -> Outcome>;

/// What a rule checks, with its typed parameter.
pub enum Check<N> {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Pattern(Regex),
    /// Name of the field whose value must be identical.
    Equals(String),
    Custom(Predicate<N>),
    MinSelected(usize),
    MaxSelected(usize),
    /// Unrecognized kind; always passes.
    Other(String),
}

impl<N> Check<N> {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::Email => RuleKind::Email,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::Min(_) => RuleKind::Min,
            Self::Max(_) => RuleKind::Max,
            Self::Pattern(_) => RuleKind::Pattern,
            Self::Equals(_) => RuleKind::Equals,
            Self::Custom(_) => RuleKind::Custom,
            Self::MinSelected(_) => RuleKind::MinSelected,
            Self::MaxSelected(_) => RuleKind::MaxSelected,
            Self::Other(tag) => RuleKind::Other(tag.clone()),
        }
    }
}

impl<N> Clone for Check<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Required => Self::Required,
            Self::Email => Self::Email,
            Self::MinLength(n) => Self::MinLength(*n),
            Self::MaxLength(n) => Self::MaxLength(*n),
            Self::Min(n) => Self::Min(*n),
            Self::Max(n) => Self::Max(*n),
            Self::Pattern(re) => Self::Pattern(re.clone()),
            Self::Equals(other) => Self::Equals(other.clone()),
            Self::Custom(f) => Self::Custom(Rc::clone(f)),
            Self::MinSelected(n) => Self::MinSelected(*n),
            Self::MaxSelected(n) => Self::MaxSelected(*n),
            Self::Other(tag) => Self::Other(tag.clone()),
        }
    }
}

impl<N> fmt::Debug for Check<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Email => write!(f, "Email"),
            Self::MinLength(n) => write!(f, "MinLength({n})"),
            Self::MaxLength(n) => write!(f, "MaxLength({n})"),
            Self::Min(n) => write!(f, "Min({n})"),
            Self::Max(n) => write!(f, "Max({n})"),
            Self::Pattern(re) => write!(f, "Pattern({:?})", re.as_str()),
            Self::Equals(other) => write!(f, "Equals({other:?})"),
            Self::Custom(_) => write!(f, "Custom(...)"),
            Self::MinSelected(n) => write!(f, "MinSelected({n})"),
            Self::MaxSelected(n) => write!(f, "MaxSelected({n})"),
            Self::Other(tag) => write!(f, "Other({tag:?})"),
        }
    }
}

/// One declarative constraint attached to a field.
///
/// # Example
///
/// ```ignore
/// let rules = vec![
///     Rule::required().message("Username is required"),
///     Rule::min_length(3).message("At least 3 characters"),
///     Rule::custom(|value, _| !value.as_text().contains(' ')).message("No spaces"),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct ValidationRule<N> {
    pub check: Check<N>,
    /// Declared error message.
    pub message: Option<String>,
    /// Advisory text surfaced every time the rule is evaluated.
    pub warning: Option<String>,
    /// Report failures as warnings instead of errors.
    pub warning_only: bool,
}

impl<N> ValidationRule<N> {
    pub fn new(check: Check<N>) -> Self {
        Self {
            check,
            message: None,
            warning: None,
            warning_only: false,
        }
    }

    pub fn required() -> Self {
        Self::new(Check::Required)
    }

    pub fn email() -> Self {
        Self::new(Check::Email)
    }

    pub fn min_length(min: usize) -> Self {
        Self::new(Check::MinLength(min))
    }

    pub fn max_length(max: usize) -> Self {
        Self::new(Check::MaxLength(max))
    }

    pub fn min(min: f64) -> Self {
        Self::new(Check::Min(min))
    }

    pub fn max(max: f64) -> Self {
        Self::new(Check::Max(max))
    }

    /// Match against `pattern` exactly as written; no anchors are added.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|source| VerdictError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::new(Check::Pattern(re)))
    }

    /// Require the value to be identical to the field named `other`.
    pub fn equals(other: impl Into<String>) -> Self {
        Self::new(Check::Equals(other.into()))
    }

    /// Run a predicate over the value and the field node.
    pub fn custom<F, R>(predicate: F) -> Self
    where
        F: Fn(&FieldValue, &N) -> R + 'static,
        R: Into<Outcome>,
    {
        Self::new(Check::Custom(Rc::new(move |value, node| {
            predicate(value, node).into()
        })))
    }

    pub fn min_selected(min: usize) -> Self {
        Self::new(Check::MinSelected(min))
    }

    pub fn max_selected(max: usize) -> Self {
        Self::new(Check::MaxSelected(max))
    }

    /// A rule of an unrecognized kind. It never fails.
    pub fn other(tag: impl Into<String>) -> Self {
        Self::new(Check::Other(tag.into()))
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn warning_only(mut self) -> Self {
        self.warning_only = true;
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.check.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_round_trips_known_tags() {
        for tag in [
            "required",
            "email",
            "minLength",
            "maxLength",
            "min",
            "max",
            "pattern",
            "equals",
            "custom",
            "minSelected",
            "maxSelected",
            "step",
        ] {
            let kind = RuleKind::parse(tag);
            assert!(!matches!(kind, RuleKind::Other(_)), "{tag}");
            assert_eq!(kind.as_str(), tag);
        }
        assert_eq!(RuleKind::parse("zip"), RuleKind::Other("zip".into()));
    }

    #[test]
    fn test_outcome_conversions() {
        assert_eq!(Outcome::from(true), Outcome::Pass);
        assert_eq!(Outcome::from(false), Outcome::Fail);
        assert_eq!(Outcome::from(()), Outcome::Pass);
        assert_eq!(Outcome::from("bad"), Outcome::FailWith("bad".into()));
        assert_eq!(Outcome::from(None::<String>), Outcome::Pass);
        assert_eq!(
            Outcome::from(Err::<(), _>("nope".to_string())),
            Outcome::FailWith("nope".into())
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = ValidationRule::<()>::pattern("([").unwrap_err();
        assert!(matches!(err, VerdictError::InvalidPattern { .. }));
    }
}
