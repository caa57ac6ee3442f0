//! Drives the edit-history plugin against the in-memory host.
//!
//! Each step mutates the host the way a user would and then delivers the
//! notifications a real editor sends: `Modified` after content changes,
//! `SelectionModified` after the caret moves.

use std::fs;
use std::path::{Path, PathBuf};

use core_events::{CommandEvent, DocumentId, HostEvent};
use core_plugin::memory::{HostError, MemoryDocument, MemoryHost};
use core_plugin::{EditHistoryPlugin, EditorHost, Outcome, STATUS_KEY};
use core_text::Position;
use thiserror::Error;
use tracing::debug;

use crate::script::{ScriptLine, Step};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: {source}")]
    Host {
        line: usize,
        #[source]
        source: HostError,
    },
    #[error("line {line}: no document named `{name}`")]
    UnknownName { line: usize, name: String },
    #[error("line {line}: no active document")]
    NoActiveDocument { line: usize },
    #[error("line {line}: cannot read {}", .path.display())]
    Read {
        line: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct Replayer {
    host: MemoryHost,
    plugin: EditHistoryPlugin,
    base_dir: PathBuf,
}

impl Replayer {
    pub fn new(
        plugin: EditHistoryPlugin,
        viewport_rows: usize,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: MemoryHost::new(viewport_rows),
            plugin,
            base_dir: base_dir.into(),
        }
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn plugin(&self) -> &EditHistoryPlugin {
        &self.plugin
    }

    /// Run every step and return the report lines: one per command, then a
    /// summary line per document still open.
    pub fn run(&mut self, script: &[ScriptLine]) -> Result<Vec<String>, ReplayError> {
        let mut report = Vec::new();
        for line in script {
            if let Some(entry) = self.apply(line)? {
                report.push(entry);
            }
        }
        report.extend(self.summary());
        Ok(report)
    }

    fn apply(&mut self, script_line: &ScriptLine) -> Result<Option<String>, ReplayError> {
        let line = script_line.number;
        debug!(target: "replay", line, step = ?script_line.step, "step");
        match &script_line.step {
            Step::Open { name, file } => {
                let content = match file {
                    Some(rel) => read_relative(&self.base_dir, rel, line)?,
                    None => String::new(),
                };
                self.host
                    .open(name, &content, false)
                    .map_err(|source| ReplayError::Host { line, source })?;
            }
            Step::Scratch { name } => {
                self.host
                    .open(name, "", true)
                    .map_err(|source| ReplayError::Host { line, source })?;
            }
            Step::Focus { name } => {
                let id = self.lookup(line, name)?;
                self.host
                    .focus(id)
                    .map_err(|source| ReplayError::Host { line, source })?;
            }
            Step::Close { name } => {
                let id = match name {
                    Some(name) => self.lookup(line, name)?,
                    None => self.active(line)?,
                };
                self.host
                    .close(id)
                    .map_err(|source| ReplayError::Host { line, source })?;
                self.plugin.handle(&mut self.host, HostEvent::Closed(id));
            }
            Step::Goto { line: row, col } => {
                let id = self.active(line)?;
                self.edit(id, |doc| {
                    doc.move_cursor_to(Position::new(row - 1, col - 1));
                });
                self.plugin
                    .handle(&mut self.host, HostEvent::SelectionModified(id));
            }
            Step::Type(text) => {
                let id = self.active(line)?;
                self.edit(id, |doc| doc.insert_at_cursor(text));
                self.notify_modified(id);
            }
            Step::Newline(n) => {
                let id = self.active(line)?;
                let breaks = "\n".repeat(*n);
                self.edit(id, |doc| doc.insert_at_cursor(&breaks));
                self.notify_modified(id);
            }
            Step::Backspace(n) => {
                let id = self.active(line)?;
                self.edit(id, |doc| {
                    doc.backspace(*n);
                });
                self.notify_modified(id);
            }
            Step::Command(command) => {
                let id = self.active(line)?;
                return Ok(Some(self.run_command(*command, id)));
            }
        }
        Ok(None)
    }

    fn run_command(&mut self, command: CommandEvent, id: DocumentId) -> String {
        let event = HostEvent::Command(command);
        let outcome = self.plugin.handle(&mut self.host, event);
        // Read the status before a caret move would clear it.
        let status = self
            .host
            .document(id)
            .and_then(|doc| doc.status(STATUS_KEY))
            .map(str::to_string);
        if outcome == Outcome::Navigated {
            self.plugin
                .handle(&mut self.host, HostEvent::SelectionModified(id));
        }
        match (outcome, status) {
            (Outcome::Navigated, _) => {
                let at = self
                    .host
                    .document(id)
                    .map(MemoryDocument::cursor_position)
                    .unwrap_or_else(Position::origin);
                format!("{command}: {}:{}", at.line + 1, at.byte + 1)
            }
            (_, Some(status)) => format!("{command}: {status}"),
            (outcome, None) => format!("{command}: {outcome:?}"),
        }
    }

    fn notify_modified(&mut self, id: DocumentId) {
        self.plugin.handle(&mut self.host, HostEvent::Modified(id));
        self.plugin
            .handle(&mut self.host, HostEvent::SelectionModified(id));
    }

    fn edit(&mut self, id: DocumentId, f: impl FnOnce(&mut MemoryDocument)) {
        if let Some(doc) = self.host.document_mut(id) {
            f(doc);
        }
    }

    fn lookup(&self, line: usize, name: &str) -> Result<DocumentId, ReplayError> {
        self.host.find(name).ok_or_else(|| ReplayError::UnknownName {
            line,
            name: name.to_string(),
        })
    }

    fn active(&self, line: usize) -> Result<DocumentId, ReplayError> {
        self.host
            .active_document()
            .ok_or(ReplayError::NoActiveDocument { line })
    }

    fn summary(&self) -> Vec<String> {
        self.host
            .documents()
            .map(|(id, doc)| {
                let (previous, next) = self
                    .plugin
                    .histories()
                    .peek(id)
                    .map_or((0, 0), |h| (h.previous_count(), h.next_count()));
                format!("{}: previous={previous} next={next}", doc.name())
            })
            .collect()
    }
}

fn read_relative(base: &Path, rel: &Path, line: usize) -> Result<String, ReplayError> {
    let path = base.join(rel);
    fs::read_to_string(&path).map_err(|source| ReplayError::Read { line, path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;
    use pretty_assertions::assert_eq;

    fn replay(src: &str) -> Vec<String> {
        let mut replayer = Replayer::new(EditHistoryPlugin::default(), 10, ".");
        replayer.run(&parse(src).unwrap()).unwrap()
    }

    #[test]
    fn navigation_report() {
        let report = replay(
            "\
open a.rs
newline 60
goto 5
type alpha
goto 6 3
type close-by
goto 40
type beta
previous-edit
previous-edit
previous-edit
next-edit
next-edit
next-edit
",
        );
        // `newline 60` itself recorded the first entry, at the last line.
        assert_eq!(
            report,
            vec![
                "previous-edit: 5:6",
                "previous-edit: 61:1",
                "previous-edit: No previous edit history",
                "next-edit: 5:6",
                "next-edit: 40:5",
                "next-edit: No next edit history",
                "a.rs: previous=3 next=0",
            ]
        );
    }

    #[test]
    fn clear_history_and_scratch() {
        let report = replay(
            "\
scratch *log*
type ignored
open notes
type first
clear-history
previous-edit
focus *log*
previous-edit
",
        );
        assert_eq!(
            report,
            vec![
                "clear-history: Edit history cleared",
                "previous-edit: No previous edit history",
                "previous-edit: No previous edit history",
                "*log*: previous=0 next=0",
                "notes: previous=0 next=0",
            ]
        );
    }

    #[test]
    fn close_evicts_and_reports_remaining() {
        let plugin = EditHistoryPlugin::default();
        let mut replayer = Replayer::new(plugin, 10, ".");
        let report = replayer
            .run(&parse("open a\ntype x\nopen b\ntype y\nclose a\n").unwrap())
            .unwrap();
        assert_eq!(report, vec!["b: previous=1 next=0"]);
        assert_eq!(replayer.plugin().histories().len(), 1);
        assert_eq!(replayer.host().len(), 1);
    }

    #[test]
    fn errors_carry_script_line() {
        let mut replayer = Replayer::new(EditHistoryPlugin::default(), 10, ".");
        let err = replayer.run(&parse("type x\n").unwrap()).unwrap_err();
        assert!(matches!(err, ReplayError::NoActiveDocument { line: 1 }));

        let err = replayer
            .run(&parse("open a\n\nopen a\n").unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "line 3: document already open: a");

        let err = replayer.run(&parse("focus zzz\n").unwrap()).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownName { line: 1, .. }));
    }
}
