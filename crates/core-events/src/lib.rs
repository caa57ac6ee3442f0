//! Host event types delivered to the edit-history plugin.
//!
//! The host calls in one event at a time on its control thread. Events carry
//! only the document handle; handlers re-query cursor state themselves.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Stable handle for an open document, valid from open until close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

/// Top-level event enum consumed by the plugin dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Content of the document changed.
    Modified(DocumentId),
    /// Cursor or selection of the document changed.
    SelectionModified(DocumentId),
    /// Document closed; its handle is invalid afterwards.
    Closed(DocumentId),
    /// User command aimed at the active document.
    Command(CommandEvent),
}

impl HostEvent {
    /// Document the event targets, if it names one directly.
    pub fn document(&self) -> Option<DocumentId> {
        match self {
            HostEvent::Modified(id) | HostEvent::SelectionModified(id) | HostEvent::Closed(id) => {
                Some(*id)
            }
            HostEvent::Command(_) => None,
        }
    }
}

/// User-facing commands registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandEvent {
    ClearHistory,
    PreviousEdit,
    NextEdit,
}

impl CommandEvent {
    pub const ALL: [CommandEvent; 3] = [
        CommandEvent::ClearHistory,
        CommandEvent::PreviousEdit,
        CommandEvent::NextEdit,
    ];

    /// Name the host registers the command under.
    pub const fn name(&self) -> &'static str {
        match self {
            CommandEvent::ClearHistory => "clear-history",
            CommandEvent::PreviousEdit => "previous-edit",
            CommandEvent::NextEdit => "next-edit",
        }
    }
}

impl fmt::Display for CommandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for CommandEvent {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        CommandEvent::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| UnknownCommand(name.to_string()))
    }
}
