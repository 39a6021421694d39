//! Structural resolver for feedback nodes.
//!
//! A feedback node is the element that receives a field's rendered error
//! text. Resolution prefers explicit markup wiring, then structural
//! conventions, and creates a node only when nothing is found.

use log::debug;

use crate::host::{DocumentHost, FormScope};
use crate::options::{Placement, ValidatorOptions};

/// Attribute on a field naming the id of its feedback node.
pub const ERROR_CONTAINER_ATTR: &str = "data-error-container";

/// Attribute on a group member naming the id of the group's feedback node.
pub const GROUP_ERROR_CONTAINER_ATTR: &str = "data-group-error-container";

/// Attribute on a feedback node naming the group it serves.
pub const GROUP_FOR_ATTR: &str = "data-group-for";

/// Find the existing feedback node for `field`, if any.
pub fn locate_feedback_node<H: DocumentHost>(
    scope: &FormScope<'_, H>,
    options: &ValidatorOptions,
    field: &H::Node,
) -> Option<H::Node> {
    if scope.is_group(field) {
        locate_group(scope, options, field)
    } else {
        locate_single(scope, options, field)
    }
}

fn locate_single<H: DocumentHost>(
    scope: &FormScope<'_, H>,
    options: &ValidatorOptions,
    field: &H::Node,
) -> Option<H::Node> {
    let host = scope.host;
    let class = options.feedback_node_class.as_str();

    if let Some(node) = host
        .attribute(field, ERROR_CONTAINER_ATTR)
        .and_then(|id| host.element_by_id(&id))
    {
        return Some(node);
    }

    if let Some(next) = host
        .next_element_sibling(field)
        .filter(|next| host.has_class(next, class))
    {
        return Some(next);
    }

    let parent = host.parent(field)?;
    host.first_with_class(&parent, class)
}

fn locate_group<H: DocumentHost>(
    scope: &FormScope<'_, H>,
    options: &ValidatorOptions,
    field: &H::Node,
) -> Option<H::Node> {
    let host = scope.host;
    let class = options.feedback_node_class.as_str();
    let name = scope.name_of(field);

    if let Some(node) = host
        .attribute(field, GROUP_ERROR_CONTAINER_ATTR)
        .and_then(|id| host.element_by_id(&id))
    {
        return Some(node);
    }

    if let Some(node) = host.descendants(&host.root()).into_iter().find(|n| {
        host.has_class(n, class) && host.attribute(n, GROUP_FOR_ATTR).as_deref() == Some(name.as_str())
    }) {
        return Some(node);
    }

    let container = find_group_container(scope, field);
    host.first_with_class(&container, class)
}

/// The element that visually holds a checkbox/radio group.
///
/// Walks up from the field's parent, stopping before the form, and returns
/// the first ancestor that contains every same-named member, is a
/// `fieldset`, or contains a `legend`. Falls back to the form.
pub fn find_group_container<H: DocumentHost>(scope: &FormScope<'_, H>, field: &H::Node) -> H::Node {
    let host = scope.host;
    let members = scope.members(&scope.name_of(field));

    let mut current = host.parent(field);
    while let Some(node) = current {
        if node == *scope.form {
            break;
        }
        let descendants = host.descendants(&node);
        let holds_all = members.iter().all(|m| descendants.contains(m));
        let is_fieldset = host.tag_name(&node).as_deref() == Some("fieldset");
        let has_legend = descendants
            .iter()
            .any(|d| host.tag_name(d).as_deref() == Some("legend"));
        if holds_all || is_fieldset || has_legend {
            return node;
        }
        current = host.parent(&node);
    }

    scope.form.clone()
}

/// Locate the feedback node for `field`, creating one if none exists.
///
/// Never fails. Calling it again for the same field returns the node created
/// the first time.
pub fn ensure_feedback_node<H: DocumentHost>(
    host: &mut H,
    form: &H::Node,
    options: &ValidatorOptions,
    field: &H::Node,
) -> H::Node {
    let scope = FormScope::new(&*host, form);
    if let Some(node) = locate_feedback_node(&scope, options, field) {
        return node;
    }

    if scope.is_group(field) {
        let name = scope.name_of(field);
        let container = find_group_container(&scope, field);
        let last_member = scope.members(&name).pop();
        // Loose group directly in the form: anchor after its last member.
        let anchor = match last_member {
            Some(last) if container == *form => host
                .parent(&last)
                .map(|parent| (parent, host.next_element_sibling(&last))),
            _ => None,
        };

        let node = create(host, options);
        host.set_attribute(&node, GROUP_FOR_ATTR, &name);
        match anchor {
            Some((parent, next)) => host.insert_before(&parent, &node, next.as_ref()),
            None => host.append_child(&container, &node),
        }
        debug!("[verdict] created group feedback node for \"{name}\"");
        return node;
    }

    let parent = host.parent(field).unwrap_or_else(|| form.clone());
    let next = host.next_element_sibling(field);
    let node = create(host, options);
    match options.feedback_node_placement {
        Placement::After => host.insert_before(&parent, &node, next.as_ref()),
        Placement::Before => host.insert_before(&parent, &node, Some(field)),
        Placement::Parent => host.append_child(&parent, &node),
    }
    debug!(
        "[verdict] created feedback node for {:?} ({:?})",
        field, options.feedback_node_placement
    );
    node
}

fn create<H: DocumentHost>(host: &mut H, options: &ValidatorOptions) -> H::Node {
    let node = host.create_element(&options.feedback_node_tag);
    host.set_class_name(&node, &options.feedback_node_class);
    node
}
