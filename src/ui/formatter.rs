//! Pure formatting functions for UI output.
//!
//! Styling is applied only when asked for, so output captured into buffers
//! stays plain regardless of the terminal the tests run in.

use console::style;

/// Prefix put in front of every error line
pub const ERROR_PREFIX: &str = "wellcharted:";

/// Format an informational message, green when `colored`.
pub fn format_info(message: &str, colored: bool) -> String {
    style(message).green().force_styling(colored).to_string()
}

/// Format an error message with the command prefix, red when `colored`.
pub fn format_error(message: &str, colored: bool) -> String {
    format!(
        "{} {}",
        style(ERROR_PREFIX).red().bold().force_styling(colored),
        message
    )
}
