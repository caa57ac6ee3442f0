//! Replay script parsing.
//!
//! One step per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! open <name> [file]     open a document (file relative to the script)
//! scratch <name>         open an empty scratch document
//! focus <name>           make a document active
//! close [name]           close a document (default: the active one)
//! goto <line> [col]      move the caret (1-based)
//! type <text>            insert text at the caret (\n, \t, \\ escapes)
//! newline [n]            insert n line breaks
//! backspace [n]          delete n characters before the caret
//! clear-history | previous-edit | next-edit
//! ```

use std::path::PathBuf;

use core_events::CommandEvent;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Open { name: String, file: Option<PathBuf> },
    Scratch { name: String },
    Focus { name: String },
    Close { name: Option<String> },
    /// 1-based line and column.
    Goto { line: usize, col: usize },
    Type(String),
    Newline(usize),
    Backspace(usize),
    Command(CommandEvent),
}

/// A step with the script line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub number: usize,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown step `{word}`")]
    UnknownStep { line: usize, word: String },
    #[error("line {line}: `{step}` expects {expected}")]
    MissingArgument {
        line: usize,
        step: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: `{value}` is not a positive number")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unknown escape `\\{escape}`")]
    BadEscape { line: usize, escape: char },
}

pub fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let number = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = parse_step(number, trimmed)?;
        steps.push(ScriptLine { number, step });
    }
    Ok(steps)
}

fn parse_step(line: usize, text: &str) -> Result<Step, ScriptError> {
    let (word, rest) = match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (text, ""),
    };
    let mut args = rest.split_whitespace();
    let step = match word {
        "open" => Step::Open {
            name: required(line, "open", "a document name", args.next())?,
            file: args.next().map(PathBuf::from),
        },
        "scratch" => Step::Scratch {
            name: required(line, "scratch", "a document name", args.next())?,
        },
        "focus" => Step::Focus {
            name: required(line, "focus", "a document name", args.next())?,
        },
        "close" => Step::Close {
            name: args.next().map(str::to_string),
        },
        "goto" => {
            let line_arg = required(line, "goto", "a line number", args.next())?;
            Step::Goto {
                line: one_based(line, &line_arg)?,
                col: match args.next() {
                    Some(col) => one_based(line, col)?,
                    None => 1,
                },
            }
        }
        "type" => {
            if rest.is_empty() {
                return Err(ScriptError::MissingArgument {
                    line,
                    step: "type",
                    expected: "text",
                });
            }
            Step::Type(unescape(line, rest)?)
        }
        "newline" => Step::Newline(count(line, args.next())?),
        "backspace" => Step::Backspace(count(line, args.next())?),
        other => match other.parse::<CommandEvent>() {
            Ok(command) => Step::Command(command),
            Err(_) => {
                return Err(ScriptError::UnknownStep {
                    line,
                    word: other.to_string(),
                });
            }
        },
    };
    Ok(step)
}

fn required(
    line: usize,
    step: &'static str,
    expected: &'static str,
    arg: Option<&str>,
) -> Result<String, ScriptError> {
    arg.map(str::to_string)
        .ok_or(ScriptError::MissingArgument {
            line,
            step,
            expected,
        })
}

fn one_based(line: usize, value: &str) -> Result<usize, ScriptError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ScriptError::InvalidNumber {
            line,
            value: value.to_string(),
        }),
    }
}

fn count(line: usize, value: Option<&str>) -> Result<usize, ScriptError> {
    value.map_or(Ok(1), |v| one_based(line, v))
}

fn unescape(line: usize, text: &str) -> Result<String, ScriptError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(escape) => return Err(ScriptError::BadEscape { line, escape }),
            None => out.push('\\'),
        }
    }
    Ok(out)
}
