//! Live-validation router.
//!
//! Three handlers share the validator state and listen on the form:
//! submit guards submission, commit re-validates the field that lost focus,
//! change clears a free-text field's error while the user is still typing.

use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::host::{DocumentHost, FormEvent, FormEventKind, FormListener, ListenPhase};
use crate::validator::ValidatorState;

type Shared<H> = Rc<RefCell<ValidatorState<H>>>;

/// Cancels submission when any field is invalid.
pub struct SubmitGuard<H: DocumentHost> {
    state: Shared<H>,
}

impl<H: DocumentHost> FormListener<H> for SubmitGuard<H> {
    fn on_event(&self, host: &mut H, event: &mut FormEvent<H::Node>) {
        let Ok(state) = self.state.try_borrow() else {
            trace!("[verdict] submit ignored, validator busy");
            return;
        };
        if !state.validate(host) {
            trace!("[verdict] submit blocked");
            event.prevent_default();
            event.stop_propagation();
        }
    }
}

/// Re-validates a registered control once its value is committed.
pub struct CommitRevalidator<H: DocumentHost> {
    state: Shared<H>,
}

impl<H: DocumentHost> FormListener<H> for CommitRevalidator<H> {
    fn on_event(&self, host: &mut H, event: &mut FormEvent<H::Node>) {
        let Some(name) = registered_name(&self.state, host, &event.target) else {
            return;
        };
        if !host.is_control(&event.target) {
            return;
        }
        let Ok(state) = self.state.try_borrow() else {
            return;
        };
        trace!("[verdict] commit on \"{name}\"");
        if let Err(err) = state.validate_field(host, &name) {
            trace!("[verdict] commit skipped: {err}");
        }
    }
}

/// Clears the error state of a free-text field while it is being edited.
pub struct ChangeClearer<H: DocumentHost> {
    state: Shared<H>,
}

impl<H: DocumentHost> FormListener<H> for ChangeClearer<H> {
    fn on_event(&self, host: &mut H, event: &mut FormEvent<H::Node>) {
        if !host.field_type(&event.target).is_free_text() {
            return;
        }
        let Some(name) = registered_name(&self.state, host, &event.target) else {
            return;
        };
        let Ok(state) = self.state.try_borrow() else {
            return;
        };
        trace!("[verdict] change on \"{name}\"");
        state.clear_field_error(host, &name);
    }
}

/// Name of `target` if it is registered with the validator.
fn registered_name<H: DocumentHost>(
    state: &Shared<H>,
    host: &H,
    target: &H::Node,
) -> Option<String> {
    let name = host.attribute(target, "name")?;
    let state = state.try_borrow().ok()?;
    state.registry.contains(&name).then_some(name)
}

/// Attach the three handlers to the validator's form.
pub fn attach<H: DocumentHost>(host: &mut H, state: &Shared<H>) -> Vec<H::ListenerHandle> {
    let form = state.borrow().form.clone();

    let submit: Rc<dyn FormListener<H>> = Rc::new(SubmitGuard {
        state: Rc::clone(state),
    });
    let commit: Rc<dyn FormListener<H>> = Rc::new(CommitRevalidator {
        state: Rc::clone(state),
    });
    let change: Rc<dyn FormListener<H>> = Rc::new(ChangeClearer {
        state: Rc::clone(state),
    });

    vec![
        host.listen(&form, FormEventKind::Submit, ListenPhase::Bubble, submit),
        host.listen(&form, FormEventKind::Commit, ListenPhase::Capture, commit),
        host.listen(&form, FormEventKind::Change, ListenPhase::Capture, change),
    ]
}

/// Detach handlers returned by [`attach`].
pub fn detach<H: DocumentHost>(host: &mut H, handles: Vec<H::ListenerHandle>) {
    for handle in handles {
        host.unlisten(handle);
    }
}
