//! Advisory warning channel.
//!
//! Advisory output (markup/rule mismatches, missing labels, rule warnings)
//! goes through a [`WarningSink`] injected at construction. The default sink
//! discards everything.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives advisory warning lines.
pub trait WarningSink {
    fn warn(&self, message: &str);
}

/// Discards every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl WarningSink for NoopSink {
    fn warn(&self, _message: &str) {}
}

/// Forwards warnings to the `log` facade at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Keeps every warning in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }
}

impl<F> WarningSink for F
where
    F: Fn(&str),
{
    fn warn(&self, message: &str) {
        self(message)
    }
}
