use crate::host::NativeValidity;

use super::RuleKind;

/// Combined native and rule-level constraint state of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintState {
    pub valid: bool,
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_short: bool,
    pub too_long: bool,
    pub range_underflow: bool,
    pub range_overflow: bool,
    pub step_mismatch: bool,
    /// Kinds of the declared rules that failed, in evaluation order.
    pub failed_rules: Vec<RuleKind>,
}

impl ConstraintState {
    pub(crate) fn from_native(native: &NativeValidity) -> Self {
        Self {
            valid: native.valid(),
            value_missing: native.value_missing,
            type_mismatch: native.type_mismatch,
            pattern_mismatch: native.pattern_mismatch,
            too_short: native.too_short,
            too_long: native.too_long,
            range_underflow: native.range_underflow,
            range_overflow: native.range_overflow,
            step_mismatch: native.step_mismatch,
            failed_rules: Vec::new(),
        }
    }

    pub(crate) fn record_rule_failure(&mut self, kind: RuleKind) {
        self.valid = false;
        if !self.failed_rules.contains(&kind) {
            self.failed_rules.push(kind);
        }
    }

    /// Read a flag by name.
    ///
    /// Accepts `valid`, the native flag names in camelCase or snake_case,
    /// and rule tags (`"minSelected"`, `"custom"`, ...), which report whether
    /// a declared rule of that kind failed.
    pub fn flag(&self, name: &str) -> bool {
        match name {
            "valid" => self.valid,
            "valueMissing" | "value_missing" => self.value_missing,
            "typeMismatch" | "type_mismatch" => self.type_mismatch,
            "patternMismatch" | "pattern_mismatch" => self.pattern_mismatch,
            "tooShort" | "too_short" => self.too_short,
            "tooLong" | "too_long" => self.too_long,
            "rangeUnderflow" | "range_underflow" => self.range_underflow,
            "rangeOverflow" | "range_overflow" => self.range_overflow,
            "stepMismatch" | "step_mismatch" => self.step_mismatch,
            tag => self.failed_rules.contains(&RuleKind::parse(tag)),
        }
    }
}

/// Outcome of validating one field. Produced fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationResult<N> {
    pub is_valid: bool,
    /// Native messages first, then rule messages, each in evaluation order.
    pub error_messages: Vec<String>,
    /// Rule warnings and demoted failures.
    pub warning_messages: Vec<String>,
    pub constraint_state: ConstraintState,
    /// The field's target node.
    pub target: N,
}
