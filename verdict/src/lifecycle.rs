//! Construction-time audit and teardown.

use log::debug;

use crate::feedback::locate_feedback_node;
use crate::host::{DocumentHost, FormScope};
use crate::options::ValidatorOptions;
use crate::validator::{ValidatorState, field_nodes};

/// Advisory lines for controls lacking a label or a feedback node.
///
/// One line per deficient control, followed by a summary line when there
/// was at least one.
pub fn audit_prerequisites<H: DocumentHost>(
    host: &H,
    form: &H::Node,
    options: &ValidatorOptions,
) -> Vec<String> {
    let scope = FormScope::new(host, form);
    let mut lines: Vec<String> = host
        .controls(form)
        .into_iter()
        .filter_map(|field| {
            let missing_label = host.labels(&field).is_empty();
            let missing_feedback = locate_feedback_node(&scope, options, &field).is_none();
            let problem = match (missing_label, missing_feedback) {
                (false, false) => return None,
                (true, false) => "no label",
                (false, true) => "no feedback node",
                (true, true) => "no label and no feedback node",
            };
            let name = host
                .attribute(&field, "name")
                .or_else(|| host.attribute(&field, "id"))
                .unwrap_or_else(|| "(unnamed)".to_string());
            Some(format!("field \"{name}\" has {problem}"))
        })
        .collect();

    if !lines.is_empty() {
        lines.push(format!(
            "{} form field(s) lack a label or a feedback node",
            lines.len()
        ));
    }
    lines
}

/// Clear every field's rendered state and empty the registry.
pub fn teardown<H: DocumentHost>(host: &mut H, state: &mut ValidatorState<H>) {
    let configs = state.registry.drain();
    for config in &configs {
        let members = field_nodes(&FormScope::new(&*host, &state.form), config);
        host.set_text(&config.feedback, "");
        host.set_class_name(&config.feedback, &state.options.feedback_node_class);
        for node in &members {
            host.remove_class(node, &state.options.error_state_class);
            host.remove_class(node, &state.options.success_state_class);
        }
    }
    debug!("[verdict] released {} fields", configs.len());
}
