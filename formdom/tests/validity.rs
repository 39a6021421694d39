use formdom::{Document, Element, NodeId};

fn single(control: Element) -> (Document, NodeId) {
    let doc = Document::new(Element::form().child(control.id("c")));
    let node = doc.get_element_by_id("c").unwrap();
    (doc, node)
}

// ============================================================================
// valueMissing
// ============================================================================

#[test]
fn test_required_text_missing() {
    let (mut doc, c) = single(Element::input("text").name("c").required());
    assert!(doc.validity(c).value_missing);
    doc.set_value(c, "x");
    assert!(doc.validity(c).valid());
}

#[test]
fn test_required_checkbox_and_radio_group() {
    let mut doc = Document::new(
        Element::form()
            .child(Element::input("checkbox").id("cb").name("cb").required())
            .child(Element::input("radio").id("r1").name("r").value("a").required())
            .child(Element::input("radio").id("r2").name("r").value("b")),
    );
    let cb = doc.get_element_by_id("cb").unwrap();
    let r1 = doc.get_element_by_id("r1").unwrap();
    let r2 = doc.get_element_by_id("r2").unwrap();

    assert!(doc.validity(cb).value_missing);
    assert!(doc.validity(r1).value_missing);
    assert!(doc.validity(r2).value_missing);

    doc.set_checked(cb, true);
    doc.set_checked(r2, true);
    assert!(doc.validity(cb).valid());
    assert!(doc.validity(r1).valid());
}

// ============================================================================
// typeMismatch / patternMismatch
// ============================================================================

#[test]
fn test_email_type_mismatch() {
    let (mut doc, c) = single(Element::input("email").name("c"));
    assert!(doc.validity(c).valid(), "empty is not a mismatch");
    doc.set_value(c, "not-an-email");
    assert!(doc.validity(c).type_mismatch);
    doc.set_value(c, "ivan@example.com");
    assert!(doc.validity(c).valid());
}

#[test]
fn test_pattern_is_anchored() {
    let (mut doc, c) = single(Element::input("text").name("c").attr("pattern", "[0-9]{3}"));
    doc.set_value(c, "1234");
    assert!(doc.validity(c).pattern_mismatch);
    doc.set_value(c, "123");
    assert!(!doc.validity(c).pattern_mismatch);
}

#[test]
fn test_invalid_pattern_is_ignored() {
    let (mut doc, c) = single(Element::input("text").name("c").attr("pattern", "(["));
    doc.set_value(c, "anything");
    assert!(doc.validity(c).valid());
}

// ============================================================================
// tooShort / tooLong
// ============================================================================

#[test]
fn test_length_flags_need_user_edit() {
    let (mut doc, c) = single(
        Element::input("text")
            .name("c")
            .attr("minlength", "3")
            .attr("maxlength", "5"),
    );
    doc.set_value(c, "ab");
    assert!(doc.validity(c).valid(), "programmatic values are not checked");

    doc.type_text(c, "ab");
    assert!(doc.validity(c).too_short);
    doc.type_text(c, "abcdef");
    assert!(doc.validity(c).too_long);
    doc.type_text(c, "abcd");
    assert!(doc.validity(c).valid());
}

// ============================================================================
// Ranges and steps
// ============================================================================

#[test]
fn test_number_range_flags() {
    let (mut doc, c) = single(
        Element::input("number")
            .name("c")
            .attr("min", "18")
            .attr("max", "100"),
    );
    doc.set_value(c, "10");
    assert!(doc.validity(c).range_underflow);
    doc.set_value(c, "101");
    assert!(doc.validity(c).range_overflow);
    doc.set_value(c, "42");
    assert!(doc.validity(c).valid());
    doc.set_value(c, "");
    assert!(doc.validity(c).valid());
}

#[test]
fn test_number_step_mismatch() {
    let (mut doc, c) = single(Element::input("number").name("c").attr("step", "5"));
    doc.set_value(c, "12");
    assert!(doc.validity(c).step_mismatch);
    doc.set_value(c, "15");
    assert!(doc.validity(c).valid());

    doc.set_attribute(c, "step", "any");
    doc.set_value(c, "12.5");
    assert!(doc.validity(c).valid());
}

#[test]
fn test_number_bad_input() {
    let (mut doc, c) = single(Element::input("number").name("c"));
    doc.set_value(c, "abc");
    let state = doc.validity(c);
    assert!(state.bad_input);
    assert!(!state.range_underflow);
}

// ============================================================================
// Barred controls
// ============================================================================

#[test]
fn test_disabled_and_hidden_are_always_valid() {
    let (doc, c) = single(Element::input("text").name("c").required().flag("disabled"));
    assert!(doc.validity(c).valid());
    let (doc, c) = single(Element::input("hidden").name("c").required());
    assert!(doc.validity(c).valid());
    let (doc, c) = single(Element::div());
    assert!(doc.validity(c).valid());
}
