use std::cell::RefCell;
use std::rc::Rc;

use formdom::{Document, Element, Event, EventType, NodeId, Phase};

fn form_doc() -> (Document, NodeId, NodeId, NodeId) {
    let doc = Document::new(
        Element::form().id("f").child(
            Element::div()
                .id("wrap")
                .child(Element::input("text").id("name").name("name"))
                .child(Element::input("checkbox").id("agree").name("agree")),
        ),
    );
    let form = doc.get_element_by_id("f").unwrap();
    let wrap = doc.get_element_by_id("wrap").unwrap();
    let name = doc.get_element_by_id("name").unwrap();
    (doc, form, wrap, name)
}

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, label: &'static str) -> Rc<dyn formdom::EventListener> {
    let log = Rc::clone(log);
    Rc::new(move |_doc: &mut Document, event: &mut Event| {
        log.borrow_mut()
            .push(format!("{label}:{}:{:?}", event.event_type, event.phase));
    })
}

// ============================================================================
// Phases
// ============================================================================

#[test]
fn test_capture_target_bubble_order() {
    let (mut doc, form, wrap, name) = form_doc();
    let log: Log = Rc::default();
    doc.add_event_listener(form, EventType::Input, false, recorder(&log, "form-bubble"));
    doc.add_event_listener(form, EventType::Input, true, recorder(&log, "form-capture"));
    doc.add_event_listener(wrap, EventType::Input, true, recorder(&log, "wrap-capture"));
    doc.add_event_listener(name, EventType::Input, false, recorder(&log, "target"));

    doc.type_text(name, "x");

    assert_eq!(
        *log.borrow(),
        vec![
            "form-capture:input:Capturing",
            "wrap-capture:input:Capturing",
            "target:input:AtTarget",
            "form-bubble:input:Bubbling",
        ]
    );
}

#[test]
fn test_blur_reaches_capture_listener_but_does_not_bubble() {
    let (mut doc, form, _, name) = form_doc();
    let log: Log = Rc::default();
    doc.add_event_listener(form, EventType::Blur, true, recorder(&log, "capture"));
    doc.add_event_listener(form, EventType::Blur, false, recorder(&log, "bubble"));

    doc.focus(name);
    doc.blur(name);

    assert_eq!(*log.borrow(), vec!["capture:blur:Capturing"]);
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_focus_change_blurs_previous() {
    let (mut doc, form, _, name) = form_doc();
    let agree = doc.get_element_by_id("agree").unwrap();
    let log: Log = Rc::default();
    doc.add_event_listener(form, EventType::Blur, true, recorder(&log, "blur"));

    doc.focus(name);
    doc.focus(agree);

    assert_eq!(log.borrow().len(), 1);
    assert_eq!(doc.focused(), Some(agree));
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_submit_prevent_default_and_stop_propagation() {
    let (mut doc, form, _, _) = form_doc();
    let later: Log = Rc::default();
    doc.add_event_listener(
        form,
        EventType::Submit,
        false,
        Rc::new(|_doc: &mut Document, event: &mut Event| {
            event.prevent_default();
            event.stop_propagation();
        }),
    );
    doc.add_event_listener(form, EventType::Submit, false, recorder(&later, "same-node"));

    let outcome = doc.submit(form);
    assert!(outcome.default_prevented);
    assert!(outcome.propagation_stopped);
    assert!(!outcome.proceeds());
    // Listeners on the current node still run after stop_propagation.
    assert_eq!(later.borrow().len(), 1);
}

#[test]
fn test_prevent_default_ignored_for_non_cancelable() {
    let (mut doc, _, _, name) = form_doc();
    doc.add_event_listener(
        name,
        EventType::Input,
        false,
        Rc::new(|_doc: &mut Document, event: &mut Event| event.prevent_default()),
    );
    let outcome = doc.type_text(name, "abc");
    assert!(!outcome.default_prevented);
}

#[test]
fn test_remove_event_listener() {
    let (mut doc, form, _, _) = form_doc();
    let log: Log = Rc::default();
    let id = doc.add_event_listener(form, EventType::Submit, false, recorder(&log, "s"));
    assert_eq!(doc.listener_count(form), 1);
    assert!(doc.remove_event_listener(id));
    assert!(!doc.remove_event_listener(id));
    assert!(doc.submit(form).proceeds());
    assert!(log.borrow().is_empty());
    assert_eq!(doc.listener_count(form), 0);
}

// ============================================================================
// Listeners mutating the document
// ============================================================================

#[test]
fn test_listener_can_mutate_document() {
    let (mut doc, form, _, name) = form_doc();
    doc.add_event_listener(
        form,
        EventType::Input,
        true,
        Rc::new(|doc: &mut Document, event: &mut Event| {
            doc.add_class(event.target, "touched");
        }),
    );
    doc.type_text(name, "hello");
    assert!(doc.has_class(name, "touched"));
    assert_eq!(doc.value(name), "hello");
    assert!(doc.is_user_edited(name));
}

#[test]
fn test_click_toggles_checkbox_and_fires_change() {
    let (mut doc, form, _, _) = form_doc();
    let agree = doc.get_element_by_id("agree").unwrap();
    let log: Log = Rc::default();
    doc.add_event_listener(form, EventType::Change, false, recorder(&log, "change"));

    doc.click(agree);
    assert!(doc.is_checked(agree));
    doc.click(agree);
    assert!(!doc.is_checked(agree));
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(
        log.borrow()[0],
        format!("change:change:{:?}", Phase::Bubbling)
    );
}
