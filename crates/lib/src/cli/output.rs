use core::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::Report;

#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputKind {
    Json,
    Normal,
}

/// Where a solver prints what it has to say.
///
/// In JSON mode every line is an object tagged with its `type`, with the
/// payload under `data`. This is what the runner reads back.
pub(crate) struct Output<O> {
    out: O,
    kind: OutputKind,
}

#[derive(Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
enum Line<'a> {
    Answer { label: &'a str, value: &'a str },
    Message { kind: Level, output: &'a str },
    Report(&'a Report),
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Level {
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => f.write_str("info"),
            Level::Error => f.write_str("error"),
        }
    }
}

impl<O> Output<O>
where
    O: Write,
{
    pub(crate) fn new(out: O, kind: OutputKind) -> Self {
        Self { out, kind }
    }

    pub(crate) fn answer(&mut self, label: &str, value: impl fmt::Display) -> io::Result<()> {
        let value = value.to_string();
        self.line(&Line::Answer {
            label,
            value: &value,
        })
    }

    pub(crate) fn info(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(Level::Info, m)
    }

    pub(crate) fn error(&mut self, m: impl fmt::Display) -> io::Result<()> {
        self.message(Level::Error, m)
    }

    pub(crate) fn report(&mut self, report: &Report) -> io::Result<()> {
        self.line(&Line::Report(report))
    }

    fn message(&mut self, kind: Level, m: impl fmt::Display) -> io::Result<()> {
        let output = m.to_string();
        self.line(&Line::Message {
            kind,
            output: &output,
        })
    }

    fn line(&mut self, line: &Line<'_>) -> io::Result<()> {
        match self.kind {
            OutputKind::Json => serde_json::to_writer(&mut self.out, line)?,
            OutputKind::Normal => match line {
                Line::Answer { label, value } => write!(self.out, "{label}: {value}")?,
                Line::Message { kind, output } => write!(self.out, "{kind}: {output}")?,
                Line::Report(report) => write!(self.out, "{report}")?,
            },
        }

        writeln!(self.out)
    }
}
