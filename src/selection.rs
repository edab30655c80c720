//! The thread-safe slot holding the key of whatever element should be on
//! screen right now.

use std::sync::{Arc, Mutex};

/// A clonable handle to the shared "current element" slot. The listener
/// thread writes it, any number of query callers read it.
///
/// There is deliberately no history and no queue: a new selection replaces
/// the old one wholesale, and only the latest value matters. The slot holds
/// the record's symbol key, not the record itself; the directory stays the
/// sole owner of element data.
#[derive(Debug, Clone, Default)]
pub struct CurrentSelection {
    slot: Arc<Mutex<Option<String>>>,
}

impl CurrentSelection {
    /// A fresh, empty selection.
    pub fn new() -> Self {
        CurrentSelection {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the selection with `key`, unconditionally.
    pub fn select(&self, key: &str) {
        *self.slot.lock().unwrap() = Some(key.to_owned());
    }

    /// The most recently selected key, or `None` if nothing has ever been
    /// selected. Never blocks beyond the slot lock.
    pub fn current(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_empty() {
        let selection = CurrentSelection::new();
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn last_write_wins() {
        let selection = CurrentSelection::new();
        selection.select("H");
        selection.select("Au");
        assert_eq!(selection.current().as_deref(), Some("Au"));
    }

    #[test]
    fn clones_share_the_same_slot() {
        let selection = CurrentSelection::new();
        let writer = selection.clone();

        let handle = thread::spawn(move || {
            writer.select("Fe");
        });
        handle.join().unwrap();

        assert_eq!(selection.current().as_deref(), Some("Fe"));
    }
}
