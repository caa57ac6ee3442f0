//! Edit-history plugin glue over an editor host.
//!
//! The host contract is two traits:
//! - `EditorHost`: which document is active and mutable access to documents
//!   by handle.
//! - `HostDocument`: cursor query, scratch flag and keyed status text on top
//!   of the `EditView` capabilities (markers, caret placement, viewport).
//!
//! `EditHistoryPlugin` owns the `HistoryStore` and the capture policy. Each
//! host notification maps to one handler; `handle` routes a `HostEvent` to
//! the right one. Handlers run to completion on the caller's thread.
//!
//! `memory::MemoryHost` is a complete in-process host used by the replay
//! binary and the tests.

use core_config::Config;
use core_events::{CommandEvent, DocumentId, HostEvent};
use core_history::{CapturePolicy, EditView, HistoryStore};
use tracing::{debug, info, trace};

pub mod memory;

/// Status slot the plugin writes into.
pub const STATUS_KEY: &str = "edit_history";
pub const NO_PREVIOUS_EDIT: &str = "No previous edit history";
pub const NO_NEXT_EDIT: &str = "No next edit history";
pub const HISTORY_CLEARED: &str = "Edit history cleared";

/// Per-document host capabilities.
pub trait HostDocument: EditView {
    /// Offset of the primary cursor.
    fn primary_cursor(&self) -> usize;
    /// Scratch documents (consoles, output panels) are not user edits.
    fn is_scratch(&self) -> bool {
        false
    }
    fn set_status(&mut self, key: &str, text: &str);
    fn erase_status(&mut self, key: &str);
}

/// Editor-wide host capabilities.
pub trait EditorHost {
    type Document: HostDocument;

    /// Stable human-readable host identifier (for logs / diagnostics).
    fn name(&self) -> &'static str;
    /// Document user commands act on.
    fn active_document(&self) -> Option<DocumentId>;
    fn document_mut(&mut self, id: DocumentId) -> Option<&mut Self::Document>;
}

/// Result of handling one host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Modification recorded as a new history entry.
    Recorded,
    /// Modification too close to the current entry.
    Throttled,
    /// Event ignored (scratch document, unknown handle, no active document).
    Ignored,
    /// Transient status message erased.
    StatusCleared,
    /// Closed document's history dropped.
    Evicted,
    /// Navigation moved the caret.
    Navigated,
    /// Navigation had nowhere to go; a status message was shown.
    NoHistory,
    /// Both stacks emptied.
    HistoryCleared,
}

#[derive(Debug)]
pub struct EditHistoryPlugin {
    histories: HistoryStore<DocumentId>,
    policy: CapturePolicy,
    ignore_scratch: bool,
}

impl Default for EditHistoryPlugin {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EditHistoryPlugin {
    pub fn new(policy: CapturePolicy, ignore_scratch: bool) -> Self {
        Self {
            histories: HistoryStore::new(),
            policy,
            ignore_scratch,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CapturePolicy::new(config.line_threshold()),
            config.ignore_scratch(),
        )
    }

    pub fn histories(&self) -> &HistoryStore<DocumentId> {
        &self.histories
    }

    pub fn policy(&self) -> CapturePolicy {
        self.policy
    }

    /// Route a host event to its handler.
    pub fn handle<H: EditorHost + ?Sized>(&mut self, host: &mut H, event: HostEvent) -> Outcome {
        trace!(target: "plugin", host = host.name(), ?event, "host_event");
        match event {
            HostEvent::Modified(id) => match host.document_mut(id) {
                Some(doc) => self.on_modified(id, doc),
                None => Outcome::Ignored,
            },
            HostEvent::SelectionModified(id) => match host.document_mut(id) {
                Some(doc) => self.on_selection_modified(doc),
                None => Outcome::Ignored,
            },
            HostEvent::Closed(id) => self.on_closed(id),
            HostEvent::Command(cmd) => {
                let Some(id) = host.active_document() else {
                    debug!(
                        target: "plugin",
                        command = cmd.name(),
                        "command_without_active_document"
                    );
                    return Outcome::Ignored;
                };
                match host.document_mut(id) {
                    Some(doc) => self.run_command(cmd, id, doc),
                    None => Outcome::Ignored,
                }
            }
        }
    }

    /// Content changed: record the cursor location if it is far enough from
    /// the last recorded edit.
    pub fn on_modified<D: HostDocument + ?Sized>(
        &mut self,
        id: DocumentId,
        doc: &mut D,
    ) -> Outcome {
        if self.ignore_scratch && doc.is_scratch() {
            trace!(target: "plugin", %id, "scratch_edit_ignored");
            return Outcome::Ignored;
        }
        let point = doc.primary_cursor();
        let history = self.histories.get(id);
        if self.policy.capture(history, doc, point) {
            Outcome::Recorded
        } else {
            Outcome::Throttled
        }
    }

    /// Any caret movement dismisses the transient status message.
    pub fn on_selection_modified<D: HostDocument + ?Sized>(&mut self, doc: &mut D) -> Outcome {
        doc.erase_status(STATUS_KEY);
        Outcome::StatusCleared
    }

    pub fn on_closed(&mut self, id: DocumentId) -> Outcome {
        if self.histories.evict(id).is_some() {
            Outcome::Evicted
        } else {
            Outcome::Ignored
        }
    }

    pub fn run_command<D: HostDocument + ?Sized>(
        &mut self,
        command: CommandEvent,
        id: DocumentId,
        doc: &mut D,
    ) -> Outcome {
        let history = self.histories.get(id);
        let outcome = match command {
            CommandEvent::ClearHistory => {
                history.clear(doc, false);
                doc.set_status(STATUS_KEY, HISTORY_CLEARED);
                Outcome::HistoryCleared
            }
            CommandEvent::PreviousEdit => {
                if history.back(doc) {
                    Outcome::Navigated
                } else {
                    doc.set_status(STATUS_KEY, NO_PREVIOUS_EDIT);
                    Outcome::NoHistory
                }
            }
            CommandEvent::NextEdit => {
                if history.forward(doc) {
                    Outcome::Navigated
                } else {
                    doc.set_status(STATUS_KEY, NO_NEXT_EDIT);
                    Outcome::NoHistory
                }
            }
        };
        info!(
            target: "plugin",
            %id,
            command = command.name(),
            ?outcome,
            previous = history.previous_count(),
            next = history.next_count(),
            "command_handled"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plugin_uses_default_threshold() {
        let plugin = EditHistoryPlugin::default();
        assert_eq!(
            plugin.policy().line_threshold(),
            core_history::DEFAULT_LINE_THRESHOLD
        );
        assert!(plugin.histories().is_empty());
    }
}
