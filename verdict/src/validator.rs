//! Validation orchestrator.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use crate::error::{Result, VerdictError};
use crate::feedback::ensure_feedback_node;
use crate::host::{DocumentHost, FormScope};
use crate::lifecycle;
use crate::live;
use crate::options::ValidatorOptions;
use crate::registry::{FieldConfig, FieldRegistry};
use crate::sink::{NoopSink, WarningSink};
use crate::validation::{
    ConstraintState, FieldValidationResult, RuleKind, ValidationRule, effective_value, evaluate,
    native_failures,
};

/// State shared between a [`Validator`] and its event handlers.
pub struct ValidatorState<H: DocumentHost> {
    pub(crate) form: H::Node,
    pub(crate) options: ValidatorOptions,
    pub(crate) registry: FieldRegistry<H::Node>,
    sink: Box<dyn WarningSink>,
}

impl<H: DocumentHost> ValidatorState<H> {
    pub(crate) fn new(form: H::Node, options: ValidatorOptions, sink: Box<dyn WarningSink>) -> Self {
        Self {
            form,
            options,
            registry: FieldRegistry::new(),
            sink,
        }
    }

    /// Send one advisory line to the sink unless suppressed.
    pub(crate) fn advise(&self, message: &str) {
        if !self.options.suppress_advisory_warnings {
            self.sink.warn(message);
        }
    }

    pub(crate) fn add_field(
        &mut self,
        host: &mut H,
        name: &str,
        rules: Vec<ValidationRule<H::Node>>,
    ) -> Result<()> {
        let target = FormScope::new(&*host, &self.form)
            .first_named(name)
            .ok_or_else(|| VerdictError::UnknownField(name.to_string()))?;

        let warnings = attribute_warnings(&*host, &target, &rules);
        let label = host.labels(&target).into_iter().next();
        let feedback = ensure_feedback_node(host, &self.form, &self.options, &target);

        debug!(
            "[verdict] registered \"{name}\" ({} rules, {} advisories)",
            rules.len(),
            warnings.len()
        );
        for warning in &warnings {
            self.advise(&format!("{name}: {warning}"));
        }

        self.registry.insert(FieldConfig {
            name: name.to_string(),
            target,
            label,
            feedback,
            rules,
            custom_messages: HashMap::new(),
            warnings,
        });
        Ok(())
    }

    pub(crate) fn validate_field(
        &self,
        host: &mut H,
        name: &str,
    ) -> Result<FieldValidationResult<H::Node>> {
        let config = self
            .registry
            .get(name)
            .ok_or_else(|| VerdictError::UnregisteredField(name.to_string()))?;

        let scope = FormScope::new(&*host, &self.form);
        let value = effective_value(&scope, &config.target);
        let native = host.validity(&config.target);
        let mut constraint_state = ConstraintState::from_native(&native);

        let mut error_messages: Vec<String> =
            native_failures(&*host, &config.target, &native, &config.custom_messages)
                .into_iter()
                .map(|failure| failure.message)
                .collect();
        let mut warning_messages = Vec::new();

        for rule in &config.rules {
            let outcome = evaluate(rule, &value, &config.target, &scope);
            if let Some(message) = outcome.message {
                let kind = rule.kind();
                let message = config.custom_messages.get(&kind).cloned().unwrap_or(message);
                if rule.warning_only {
                    warning_messages.push(message);
                } else {
                    error_messages.push(message);
                    constraint_state.record_rule_failure(kind);
                }
            }
            if let Some(warning) = outcome.warning {
                warning_messages.push(warning);
            }
        }

        let members = field_nodes(&scope, config);
        let is_valid = error_messages.is_empty();
        constraint_state.valid = is_valid;

        self.clear_rendered(host, config, &members);
        self.render(host, config, &members, &error_messages);
        for warning in &warning_messages {
            self.advise(&format!("{name}: {warning}"));
        }

        debug!(
            "[verdict] \"{name}\" is {} ({} errors)",
            if is_valid { "valid" } else { "invalid" },
            error_messages.len()
        );

        Ok(FieldValidationResult {
            is_valid,
            error_messages,
            warning_messages,
            constraint_state,
            target: config.target.clone(),
        })
    }

    /// Validate every field in registration order.
    pub(crate) fn validate(&self, host: &mut H) -> bool {
        let mut all_valid = true;
        for name in self.registry.names() {
            match self.validate_field(host, name) {
                Ok(result) => all_valid &= result.is_valid,
                Err(err) => debug!("[verdict] skipped \"{name}\": {err}"),
            }
        }
        all_valid
    }

    pub(crate) fn errors(&self, host: &mut H) -> IndexMap<String, Vec<String>> {
        self.registry
            .names()
            .iter()
            .filter_map(|name| {
                let result = self.validate_field(host, name).ok()?;
                (!result.is_valid).then(|| (name.clone(), result.error_messages))
            })
            .collect()
    }

    pub(crate) fn warnings(&self) -> IndexMap<String, Vec<String>> {
        self.registry
            .iter()
            .filter(|config| !config.warnings.is_empty())
            .map(|config| (config.name.clone(), config.warnings.clone()))
            .collect()
    }

    pub(crate) fn set_custom_message(&mut self, name: &str, kind: RuleKind, message: String) {
        if let Some(config) = self.registry.get_mut(name) {
            config.custom_messages.insert(kind, message);
        }
    }

    /// Drop the rendered error state of a field without marking it valid.
    pub(crate) fn clear_field_error(&self, host: &mut H, name: &str) {
        let Some(config) = self.registry.get(name) else {
            return;
        };
        let members = field_nodes(&FormScope::new(&*host, &self.form), config);
        self.clear_rendered(host, config, &members);
    }

    pub(crate) fn clear_rendered(
        &self,
        host: &mut H,
        config: &FieldConfig<H::Node>,
        members: &[H::Node],
    ) {
        host.set_text(&config.feedback, "");
        host.set_class_name(&config.feedback, &self.options.feedback_node_class);
        for node in members {
            host.remove_class(node, &self.options.error_state_class);
        }
    }

    fn render(
        &self,
        host: &mut H,
        config: &FieldConfig<H::Node>,
        members: &[H::Node],
        errors: &[String],
    ) {
        let options = &self.options;
        if errors.is_empty() {
            for node in members {
                host.remove_class(node, &options.error_state_class);
                host.add_class(node, &options.success_state_class);
            }
            return;
        }

        host.set_text(&config.feedback, &errors.join(", "));
        host.set_class_name(
            &config.feedback,
            &format!("{} {}", options.feedback_node_class, options.error_state_class),
        );
        for node in members {
            host.remove_class(node, &options.success_state_class);
            host.add_class(node, &options.error_state_class);
        }
    }
}

/// Nodes that carry the state classes of a field: every same-named control,
/// or the target alone when the name is not on a control.
pub(crate) fn field_nodes<H: DocumentHost>(
    scope: &FormScope<'_, H>,
    config: &FieldConfig<H::Node>,
) -> Vec<H::Node> {
    let members = scope.members(&config.name);
    if members.is_empty() {
        vec![config.target.clone()]
    } else {
        members
    }
}

/// Native constraint attributes present on `field` with no rule of the
/// matching kind declared.
fn attribute_warnings<H: DocumentHost>(
    host: &H,
    field: &H::Node,
    rules: &[ValidationRule<H::Node>],
) -> Vec<String> {
    // Last declaration of each kind wins.
    let declared: HashMap<RuleKind, &ValidationRule<H::Node>> =
        rules.iter().map(|rule| (rule.kind(), rule)).collect();

    let present = |attr: &str| host.attribute(field, attr).is_some_and(|v| !v.is_empty());
    let positive = |attr: &str| {
        host.attribute(field, attr)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .is_some_and(|n| n > 0)
    };
    let numeric = host.field_type(field).is_numeric();

    let checks = [
        (host.attribute(field, "required").is_some(), "required", RuleKind::Required),
        (present("pattern"), "pattern", RuleKind::Pattern),
        (numeric && present("min"), "min", RuleKind::Min),
        (numeric && present("max"), "max", RuleKind::Max),
        (positive("minlength"), "minlength", RuleKind::MinLength),
        (positive("maxlength"), "maxlength", RuleKind::MaxLength),
    ];

    checks
        .into_iter()
        .filter(|(active, _, kind)| *active && !declared.contains_key(kind))
        .map(|(_, attr, kind)| format!("attribute \"{attr}\" is set but no {kind} rule is declared"))
        .collect()
}

/// Declarative validator bound to one form.
///
/// Construction audits the form, then attaches submit, commit and change
/// handlers. All operations take the host explicitly; the validator only
/// keeps node handles.
///
/// # Example
///
/// ```ignore
/// let mut validator = Validator::new(&mut doc, form, ValidatorOptions::default())?;
/// validator.add_field(&mut doc, "email", vec![Rule::required(), Rule::email()])?;
/// if !validator.validate(&mut doc) {
///     for (field, messages) in validator.errors(&mut doc) {
///         println!("{field}: {}", messages.join(", "));
///     }
/// }
/// validator.destroy(&mut doc);
/// ```
pub struct Validator<H: DocumentHost> {
    state: Rc<RefCell<ValidatorState<H>>>,
    listeners: Vec<H::ListenerHandle>,
}

impl<H: DocumentHost> Validator<H> {
    /// Bind a validator to `form`, discarding advisory output.
    pub fn new(host: &mut H, form: H::Node, options: ValidatorOptions) -> Result<Self> {
        Self::with_sink(host, form, options, NoopSink)
    }

    /// Bind a validator to `form`, sending advisory output to `sink`.
    pub fn with_sink(
        host: &mut H,
        form: H::Node,
        options: ValidatorOptions,
        sink: impl WarningSink + 'static,
    ) -> Result<Self> {
        if !host.is_form(&form) {
            return Err(VerdictError::NotAForm {
                tag: host.tag_name(&form).unwrap_or_else(|| "#text".to_string()),
            });
        }

        let state = ValidatorState::new(form, options, Box::new(sink));
        for line in lifecycle::audit_prerequisites(&*host, &state.form, &state.options) {
            state.advise(&line);
        }

        let state = Rc::new(RefCell::new(state));
        let listeners = live::attach(host, &state);
        debug!("[verdict] validator attached ({} handlers)", listeners.len());

        Ok(Self { state, listeners })
    }

    /// Register `name` with its rules, replacing any earlier registration.
    pub fn add_field(
        &mut self,
        host: &mut H,
        name: &str,
        rules: Vec<ValidationRule<H::Node>>,
    ) -> Result<()> {
        self.state.borrow_mut().add_field(host, name, rules)
    }

    /// Validate every registered field and render the outcome.
    pub fn validate(&self, host: &mut H) -> bool {
        self.state.borrow().validate(host)
    }

    /// Validate one field and render the outcome.
    pub fn validate_field(&self, host: &mut H, name: &str) -> Result<FieldValidationResult<H::Node>> {
        self.state.borrow().validate_field(host, name)
    }

    /// Override the message reported for `kind` on `name`. Unregistered
    /// names are ignored.
    pub fn set_custom_message(
        &mut self,
        name: &str,
        kind: impl Into<RuleKind>,
        message: impl Into<String>,
    ) {
        self.state
            .borrow_mut()
            .set_custom_message(name, kind.into(), message.into());
    }

    /// Re-validate and return the messages of invalid fields, in
    /// registration order.
    pub fn errors(&self, host: &mut H) -> IndexMap<String, Vec<String>> {
        self.state.borrow().errors(host)
    }

    /// Advisory warnings captured at registration, for fields that have any,
    /// in registration order.
    pub fn warnings(&self) -> IndexMap<String, Vec<String>> {
        self.state.borrow().warnings()
    }

    /// Registered names in registration order.
    pub fn field_names(&self) -> Vec<String> {
        self.state.borrow().registry.names().to_vec()
    }

    pub fn field(&self, name: &str) -> Option<Ref<'_, FieldConfig<H::Node>>> {
        Ref::filter_map(self.state.borrow(), |state| state.registry.get(name)).ok()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.state.borrow().registry.contains(name)
    }

    pub fn form(&self) -> H::Node {
        self.state.borrow().form.clone()
    }

    pub fn options(&self) -> Ref<'_, ValidatorOptions> {
        Ref::map(self.state.borrow(), |state| &state.options)
    }

    /// Detach the handlers, clear rendered state and forget every field.
    pub fn destroy(self, host: &mut H) {
        live::detach(host, self.listeners);
        lifecycle::teardown(host, &mut self.state.borrow_mut());
        debug!("[verdict] validator destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use formdom::{Document, Element};

    fn doc(field: Element) -> Document {
        Document::new(Element::form().child(field))
    }

    fn warnings_for(doc: &Document, rules: &[ValidationRule<formdom::NodeId>]) -> Vec<String> {
        let field = doc.query_name(doc.root(), "f")[0];
        attribute_warnings(doc, &field, rules)
    }

    #[test]
    fn test_attribute_warnings_for_missing_rules() {
        let doc = doc(Element::input("text")
            .name("f")
            .required()
            .attr("minlength", "3")
            .attr("maxlength", "0")
            .attr("pattern", "[a-z]+"));

        let warnings = warnings_for(&doc, &[ValidationRule::min_length(3)]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("required"));
        assert!(warnings[1].contains("pattern"));
    }

    #[test]
    fn test_min_max_only_audited_on_numeric_inputs() {
        let text = doc(Element::input("text").name("f").attr("min", "1"));
        assert!(warnings_for(&text, &[]).is_empty());

        let number = doc(Element::input("number")
            .name("f")
            .attr("min", "1")
            .attr("max", "9"));
        let warnings = warnings_for(&number, &[ValidationRule::max(9.0)]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("\"min\""));
    }
}
