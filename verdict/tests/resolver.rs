use formdom::{Document, Element, NodeId};
use verdict::feedback::{ensure_feedback_node, find_group_container, locate_feedback_node};
use verdict::host::FormScope;
use verdict::{Placement, ValidatorOptions};

fn node(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

fn locate(doc: &Document, field: NodeId, options: &ValidatorOptions) -> Option<NodeId> {
    let form = doc.root();
    locate_feedback_node(&FormScope::new(doc, &form), options, &field)
}

fn ensure(doc: &mut Document, field: NodeId, options: &ValidatorOptions) -> NodeId {
    let form = doc.root();
    ensure_feedback_node(doc, &form, options, &field)
}

fn feedback() -> Element {
    Element::div().class("field-feedback")
}

// ============================================================================
// Singular fields
// ============================================================================

#[test]
fn test_explicit_container_attribute_wins() {
    let doc = Document::new(Element::form().children([
        Element::div().children([
            Element::input("text")
                .id("name")
                .name("name")
                .attr("data-error-container", "name-errors"),
            feedback().id("sibling"),
        ]),
        Element::div().id("name-errors"),
    ]));

    let found = locate(&doc, node(&doc, "name"), &ValidatorOptions::default());
    assert_eq!(found, Some(node(&doc, "name-errors")));
}

#[test]
fn test_next_sibling_with_feedback_class() {
    let doc = Document::new(Element::form().children([Element::div().children([
        feedback().id("first"),
        Element::input("text").id("name").name("name"),
        feedback().id("after"),
    ])]));

    let found = locate(&doc, node(&doc, "name"), &ValidatorOptions::default());
    assert_eq!(found, Some(node(&doc, "after")));
}

#[test]
fn test_falls_back_to_first_feedback_in_parent() {
    let doc = Document::new(Element::form().children([Element::div().children([
        Element::label("Name").label_for("name"),
        Element::input("text").id("name").name("name"),
        Element::span().child(Element::text("hint")),
        Element::div().child(feedback().id("nested")),
    ])]));

    let found = locate(&doc, node(&doc, "name"), &ValidatorOptions::default());
    assert_eq!(found, Some(node(&doc, "nested")));
}

#[test]
fn test_custom_feedback_class_is_honored() {
    let doc = Document::new(Element::form().children([Element::div().children([
        Element::input("text").id("name").name("name"),
        feedback().id("default"),
        Element::div().class("errors").id("custom"),
    ])]));

    let options = ValidatorOptions::default().feedback_node_class("errors");
    assert_eq!(locate(&doc, node(&doc, "name"), &options), Some(node(&doc, "custom")));
}

#[test]
fn test_nothing_found_without_markup() {
    let doc = Document::new(
        Element::form().child(Element::div().child(Element::input("text").id("name").name("name"))),
    );
    assert_eq!(locate(&doc, node(&doc, "name"), &ValidatorOptions::default()), None);
}

// ============================================================================
// Creation
// ============================================================================

fn wrapped_field() -> Document {
    Document::new(Element::form().child(Element::div().id("wrap").children([
        Element::label("Name").label_for("name"),
        Element::input("text").id("name").name("name"),
        Element::span().id("hint"),
    ])))
}

#[test]
fn test_create_after_field() {
    let mut doc = wrapped_field();
    let name = node(&doc, "name");

    let created = ensure(&mut doc, name, &ValidatorOptions::default());
    assert_eq!(doc.tag_name(created), Some("div"));
    assert_eq!(doc.class_name(created), "field-feedback");
    assert_eq!(doc.next_element_sibling(name), Some(created));
    assert_eq!(doc.next_element_sibling(created), Some(node(&doc, "hint")));
}

#[test]
fn test_create_before_field() {
    let mut doc = wrapped_field();
    let name = node(&doc, "name");
    let options = ValidatorOptions::default()
        .feedback_node_placement(Placement::Before)
        .feedback_node_tag("span");

    let created = ensure(&mut doc, name, &options);
    assert_eq!(doc.tag_name(created), Some("span"));
    assert_eq!(doc.next_element_sibling(created), Some(name));
}

#[test]
fn test_create_as_last_child_of_parent() {
    let mut doc = wrapped_field();
    let name = node(&doc, "name");
    let wrap = node(&doc, "wrap");
    let options = ValidatorOptions::default().feedback_node_placement(Placement::Parent);

    let created = ensure(&mut doc, name, &options);
    assert_eq!(doc.children(wrap).last(), Some(&created));
}

#[test]
fn test_ensure_is_idempotent_for_every_placement() {
    for placement in [Placement::After, Placement::Before, Placement::Parent] {
        let mut doc = wrapped_field();
        let name = node(&doc, "name");
        let options = ValidatorOptions::default().feedback_node_placement(placement);

        let first = ensure(&mut doc, name, &options);
        let second = ensure(&mut doc, name, &options);
        assert_eq!(first, second, "{placement:?}");

        let wrap = node(&doc, "wrap");
        let count = doc
            .descendants(wrap)
            .into_iter()
            .filter(|&n| doc.has_class(n, "field-feedback"))
            .count();
        assert_eq!(count, 1, "{placement:?}");
    }
}

// ============================================================================
// Groups
// ============================================================================

fn checkbox(name: &str, value: &str) -> Element {
    Element::label(value).child(Element::input("checkbox").name(name).value(value))
}

#[test]
fn test_group_container_attribute() {
    let doc = Document::new(Element::form().children([
        Element::div().children([
            Element::input("checkbox")
                .id("first")
                .name("tags")
                .attr("data-group-error-container", "tag-errors"),
            Element::input("checkbox").name("tags"),
        ]),
        Element::div().id("tag-errors"),
    ]));

    let found = locate(&doc, node(&doc, "first"), &ValidatorOptions::default());
    assert_eq!(found, Some(node(&doc, "tag-errors")));
}

#[test]
fn test_group_feedback_marked_with_group_name() {
    let doc = Document::new(Element::form().children([
        Element::fieldset().children([
            Element::legend("Delivery"),
            Element::input("radio").id("pickup").name("delivery"),
            Element::input("radio").name("delivery"),
            feedback().id("other").attr("data-group-for", "payment"),
        ]),
        feedback().id("mine").attr("data-group-for", "delivery"),
    ]));

    let found = locate(&doc, node(&doc, "pickup"), &ValidatorOptions::default());
    assert_eq!(found, Some(node(&doc, "mine")));
}

#[test]
fn test_group_container_holding_all_members() {
    let doc = Document::new(Element::form().child(
        Element::div().id("group").children([
            Element::div().id("options").children([
                checkbox("interests", "sports"),
                checkbox("interests", "music"),
            ]),
            Element::input("text").name("other"),
        ]),
    ));
    let members = doc.query_name(doc.root(), "interests");
    let form = doc.root();

    let container = find_group_container(&FormScope::new(&doc, &form), &members[0]);
    assert_eq!(container, node(&doc, "options"));
}

#[test]
fn test_group_container_stops_at_fieldset() {
    let doc = Document::new(Element::form().children([
        Element::fieldset().id("set").child(checkbox("tags", "a")),
        Element::div().child(checkbox("tags", "b")),
    ]));
    let members = doc.query_name(doc.root(), "tags");
    let form = doc.root();

    let container = find_group_container(&FormScope::new(&doc, &form), &members[0]);
    assert_eq!(container, node(&doc, "set"));
}

#[test]
fn test_group_container_falls_back_to_form() {
    let doc = Document::new(Element::form().children([
        Element::div().child(Element::input("radio").id("a").name("size")),
        Element::div().child(Element::input("radio").name("size")),
    ]));
    let form = doc.root();

    let container = find_group_container(&FormScope::new(&doc, &form), &node(&doc, "a"));
    assert_eq!(container, form);
}

#[test]
fn test_group_creation_appends_to_container() {
    let mut doc = Document::new(Element::form().children([
        Element::div().id("options").children([
            checkbox("interests", "sports"),
            checkbox("interests", "music"),
        ]),
        Element::button("Send"),
    ]));
    let members = doc.query_name(doc.root(), "interests");

    let created = ensure(&mut doc, members[0], &ValidatorOptions::default());
    assert_eq!(doc.attribute(created, "data-group-for"), Some("interests"));
    assert_eq!(doc.children(node(&doc, "options")).last(), Some(&created));

    assert_eq!(ensure(&mut doc, members[1], &ValidatorOptions::default()), created);
}

#[test]
fn test_group_creation_directly_in_form_goes_after_last_member() {
    let mut doc = Document::new(Element::form().children([
        Element::input("radio").id("a").name("size"),
        Element::input("radio").id("b").name("size"),
        Element::button("Send").id("send"),
    ]));
    let a = node(&doc, "a");
    let created = ensure(&mut doc, a, &ValidatorOptions::default());
    assert_eq!(doc.next_element_sibling(node(&doc, "b")), Some(created));
    assert_eq!(doc.next_element_sibling(created), Some(node(&doc, "send")));
}
