//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` for output that only appears with `--verbose`
//! - timestamped status lines for watch mode refreshes
//!
//! # Example
//!
//! ```ignore
//! log!("serve"; "listening on {}", addr);
//! debug!("resolve"; "{} -> {:?}", path, outcome);
//! status_success("reloaded 42 documents");
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
    time::SystemTime,
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Send every log line to stderr (set when stdout carries command output)
static LOG_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// Route all log lines to stderr
pub fn set_stderr(v: bool) {
    LOG_TO_STDERR.store(v, Ordering::SeqCst);
}

/// Stream a line from `module` goes to
fn stream_for(module_lower: &str) -> Stream {
    if LOG_TO_STDERR.load(Ordering::SeqCst) || matches!(module_lower, "error" | "warning") {
        Stream::Stderr
    } else {
        Stream::Stdout
    }
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix.
///
/// Regular output goes to stdout; `error` and `warning` go to stderr, and
/// so does everything once `set_stderr(true)` is in effect.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let stream = stream_for(&module_lower);
    let prefix = colorize_prefix(module, &module_lower, stream);

    match stream {
        Stream::Stderr => {
            writeln!(stderr().lock(), "{prefix} {message}").ok();
        }
        _ => {
            let mut stdout = stdout().lock();
            writeln!(stdout, "{prefix} {message}").ok();
            stdout.flush().ok();
        }
    }
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str, stream: Stream) -> String {
    let style = match module_lower {
        "serve" => Style::new().bright_blue().bold(),
        "watch" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        "warning" => Style::new().yellow().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    format!("[{module}]")
        .if_supports_color(stream, |text| text.style(style))
        .to_string()
}

// ============================================================================
// Watch Status
// ============================================================================

/// Current UTC time as HH:MM:SS
fn now() -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_clock(secs)
}

fn format_clock(secs: u64) -> String {
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn status_line(symbol: String, message: &str) {
    let timestamp = format!("[{}]", now())
        .if_supports_color(Stream::Stdout, |text| text.dimmed())
        .to_string();
    let mut stdout = stdout().lock();
    writeln!(stdout, "{timestamp} {symbol} {message}").ok();
    stdout.flush().ok();
}

/// Watch status: success (✓ prefix, green)
pub fn status_success(message: &str) {
    status_line(
        "✓".if_supports_color(Stream::Stdout, |text| text.green()).to_string(),
        message,
    );
}

/// Watch status: error (✗ prefix, red) with optional detail
pub fn status_error(summary: &str, detail: &str) {
    let message = if detail.is_empty() {
        summary.to_string()
    } else {
        format!("{summary}\n{detail}")
    };
    status_line(
        "✗".if_supports_color(Stream::Stdout, |text| text.red()).to_string(),
        &message,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00:00");
        assert_eq!(format_clock(3600 + 61), "01:01:01");
        // wraps at midnight
        assert_eq!(format_clock(86_400 + 59), "00:00:59");
    }

    #[test]
    fn test_colorize_prefix_honors_override() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("Serve", "serve", Stream::Stdout), "[Serve]");
        assert_eq!(colorize_prefix("store", "store", Stream::Stderr), "[store]");
    }

    #[test]
    fn test_stderr_mode_routes_every_module() {
        assert!(matches!(stream_for("index"), Stream::Stdout));
        assert!(matches!(stream_for("warning"), Stream::Stderr));

        set_stderr(true);
        let routed = [stream_for("index"), stream_for("resolve"), stream_for("store")];
        set_stderr(false);
        assert!(routed.iter().all(|s| matches!(s, Stream::Stderr)));
    }
}
