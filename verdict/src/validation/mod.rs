//! Rules, effective values and their evaluation.

pub mod evaluator;
mod native;
mod result;
mod rule;
mod value;

pub use evaluator::{RuleOutcome, default_message, evaluate};
pub use native::{NativeFailure, native_failures};
pub use result::{ConstraintState, FieldValidationResult};
pub use rule::{Check, Outcome, Predicate, RuleKind, ValidationRule};
pub use value::{FieldValue, effective_value};
