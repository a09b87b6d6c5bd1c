//! Terminal reporting.
//!
//! Status lines go to stderr so that `paths` and `menu` can keep stdout for
//! their JSON payload.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use console::{Style, Term};
use serde::Serialize;

use crate::error::CliError;

#[derive(Clone, Copy)]
enum Tone {
    Plain,
    Done,
    Caution,
    Failure,
    Heading,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Done => Style::new().green(),
            Self::Caution => Style::new().yellow(),
            Self::Failure => Style::new().red(),
            Self::Heading => Style::new().cyan().bold(),
        }
    }
}

/// Status reporter writing styled lines to stderr.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, tone: Tone, msg: impl Display) {
        // Write errors on stderr are ignored.
        let _ = self.term.write_line(&tone.style().apply_to(msg).to_string());
    }

    pub(crate) fn info(&self, msg: impl Display) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: impl Display) {
        self.line(Tone::Done, msg);
    }

    pub(crate) fn warning(&self, msg: impl Display) {
        self.line(Tone::Caution, msg);
    }

    pub(crate) fn error(&self, msg: impl Display) {
        self.line(Tone::Failure, msg);
    }

    pub(crate) fn heading(&self, msg: impl Display) {
        self.line(Tone::Heading, msg);
    }

    /// Report which configuration file the inputs come from.
    pub(crate) fn config_source(&self, path: Option<&Path>) {
        match path {
            Some(path) => self.info(format_args!("Config: {}", path.display())),
            None => self.info("Config: built-in defaults (no refgen.toml found)"),
        }
    }
}

/// Write a value to stdout as pretty JSON.
pub(crate) fn write_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
