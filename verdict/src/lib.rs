//! Declarative validation for document forms.
//!
//! Fields are registered by name with a list of [`ValidationRule`]s. The
//! validator combines them with the platform's native constraint flags,
//! renders messages into feedback nodes next to the fields and keeps that
//! state current as the user edits, leaves fields and submits.
//!
//! The core only talks to the document through [`host::DocumentHost`];
//! [`formdom::Document`] implements it.

pub mod error;
pub mod feedback;
pub mod host;
pub mod lifecycle;
pub mod live;
pub mod options;
pub mod registry;
pub mod sink;
pub mod validation;
pub mod validator;

pub use error::{Result, VerdictError};
pub use host::dom::Rule;
pub use options::{Placement, ValidatorOptions};
pub use validation::{
    ConstraintState, FieldValidationResult, FieldValue, Outcome, RuleKind, ValidationRule,
};
pub use validator::Validator;

pub mod prelude {
    pub use crate::error::{Result, VerdictError};
    pub use crate::host::dom::Rule;
    pub use crate::host::{DocumentHost, FieldType, FormEventKind};
    pub use crate::options::{Placement, ValidatorOptions};
    pub use crate::sink::{CollectingSink, LogSink, NoopSink, WarningSink};
    pub use crate::validation::{
        ConstraintState, FieldValidationResult, FieldValue, Outcome, RuleKind, ValidationRule,
    };
    pub use crate::validator::Validator;
}
