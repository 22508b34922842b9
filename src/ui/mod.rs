//! User interface module - where command output goes.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [Ui] sink the commands report through

use std::io::{self, Stderr, Stdout, Write};

pub mod formatter;

pub use formatter::{format_error, format_info};

/// Destination for user-facing command output
///
/// Commands never print directly; they report through a `Ui` handed to them
/// so that the streams can be swapped for buffers.
pub trait Ui {
    /// Report progress or success on the info stream
    fn info(&mut self, message: &str);

    /// Report a failure on the error stream
    fn error(&mut self, message: &str);
}

/// A [Ui] writing info to one sink and errors to another
///
/// Each sink carries its own color flag, since only one of the two may be a
/// terminal.
pub struct BasicUi<W: Write, E: Write> {
    writer: W,
    error_writer: E,
    colored_out: bool,
    colored_err: bool,
}

impl<W: Write, E: Write> BasicUi<W, E> {
    /// Create an uncolored Ui over two writers
    pub fn new(writer: W, error_writer: E) -> Self {
        BasicUi {
            writer,
            error_writer,
            colored_out: false,
            colored_err: false,
        }
    }

    /// Set styling for the info and error sinks independently
    pub fn with_color(mut self, colored_out: bool, colored_err: bool) -> Self {
        self.colored_out = colored_out;
        self.colored_err = colored_err;
        self
    }

    /// Take back the writers, e.g. to inspect captured output
    pub fn into_inner(self) -> (W, E) {
        (self.writer, self.error_writer)
    }
}

impl BasicUi<Stdout, Stderr> {
    /// Ui bound to the process streams
    ///
    /// Colors follow console's per-stream detection, which honors
    /// `CLICOLOR`, `CLICOLOR_FORCE` and `NO_COLOR`.
    pub fn stdio() -> Self {
        BasicUi::new(io::stdout(), io::stderr())
            .with_color(console::colors_enabled(), console::colors_enabled_stderr())
    }
}

impl<W: Write, E: Write> Ui for BasicUi<W, E> {
    fn info(&mut self, message: &str) {
        // A closed pipe is not a command failure.
        let _ = writeln!(self.writer, "{}", format_info(message, self.colored_out));
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(
            self.error_writer,
            "{}",
            format_error(message, self.colored_err)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ui_routes_streams() {
        let mut ui = BasicUi::new(Vec::new(), Vec::new());
        ui.info("all good");
        ui.error("went wrong");

        let (out, err) = ui.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "all good\n");
        assert_eq!(String::from_utf8(err).unwrap(), "wellcharted: went wrong\n");
    }

    #[test]
    fn test_color_is_per_stream() {
        let mut ui = BasicUi::new(Vec::new(), Vec::new()).with_color(false, true);
        ui.info("New version 1.2.4 for demo.");
        ui.error("went wrong");

        let (out, err) = ui.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "New version 1.2.4 for demo.\n"
        );
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("\x1b["));
        assert!(err.ends_with("went wrong\n"));
    }
}
