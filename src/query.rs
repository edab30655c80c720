//! The read side of the system: what a display layer (web page, terminal
//! monitor) calls to find out what to show. This is the only outward-facing
//! API; the serial machinery never talks to a consumer directly.

use crate::elements::{ElementDirectory, ElementRecord};
use crate::selection::CurrentSelection;
use std::sync::Arc;

/// Resolves "what should be on screen" questions against the directory and
/// the shared selection. Cheap to construct, holds no mutable state of its
/// own, and safe to call from any thread.
pub struct ElementQuery {
    directory: Arc<ElementDirectory>,
    selection: CurrentSelection,
}

impl ElementQuery {
    /// A query surface over the given directory and selection handle.
    pub fn new(directory: Arc<ElementDirectory>, selection: CurrentSelection) -> Self {
        Self {
            directory,
            selection,
        }
    }

    /// The full record for the currently selected element, or `None` when
    /// nothing has been selected yet.
    pub fn current(&self) -> Option<&ElementRecord> {
        self.selection
            .current()
            .and_then(|key| self.directory.find(&key))
    }

    /// Direct lookup by symbol or name, bypassing the selection.
    pub fn lookup(&self, identifier: &str) -> Option<&ElementRecord> {
        self.directory.find(identifier)
    }
}
