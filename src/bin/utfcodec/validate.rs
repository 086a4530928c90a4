//! CLI handler for the `validate` command.

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use utfcodec::text::utf8::{self, Utf8Error};
use utfcodec::ErrorKind;

use crate::exit_codes;

/// Validate text files for UTF-8 compliance.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Input files to validate (reads from stdin if none provided)
    #[arg(trailing_var_arg = true)]
    pub files: Vec<PathBuf>,

    /// Quiet mode: exit code only, no output
    #[arg(short, long)]
    pub quiet: bool,

    /// Force color output even when not a TTY
    #[arg(short = 'C', long = "color")]
    pub color: bool,

    /// Disable color output
    #[arg(short = 'M', long = "no-color")]
    pub no_color: bool,
}

/// ANSI color codes for error output.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const LOCATION: &str = "\x1b[1;34m"; // Bold blue
    pub const LINE_NUM: &str = "\x1b[0;34m"; // Blue
    pub const CARET: &str = "\x1b[1;32m"; // Bold green
    pub const MESSAGE: &str = "\x1b[0;33m"; // Yellow
}

/// Color scheme that can be disabled.
struct ColorScheme {
    error: &'static str,
    location: &'static str,
    line_num: &'static str,
    caret: &'static str,
    message: &'static str,
    reset: &'static str,
}

impl ColorScheme {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                error: colors::ERROR,
                location: colors::LOCATION,
                line_num: colors::LINE_NUM,
                caret: colors::CARET,
                message: colors::MESSAGE,
                reset: colors::RESET,
            }
        } else {
            Self {
                error: "",
                location: "",
                line_num: "",
                caret: "",
                message: "",
                reset: "",
            }
        }
    }
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> Result<i32> {
    let use_color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        atty::is(atty::Stream::Stderr)
    };
    let scheme = ColorScheme::new(use_color);

    if args.files.is_empty() {
        let input = crate::read_input(None)?;
        return Ok(validate_input(&input, None, &args, &scheme));
    }

    let mut any_invalid = false;
    let mut any_io_error = false;

    for path in &args.files {
        match fs::read(path) {
            Ok(input) => {
                let filename = path.to_string_lossy();
                log::debug!("validating {} ({} bytes)", filename, input.len());
                if validate_input(&input, Some(&filename), &args, &scheme) == exit_codes::INVALID {
                    any_invalid = true;
                }
            }
            Err(e) => {
                any_io_error = true;
                if !args.quiet {
                    eprintln!(
                        "{}error{}: {}: {}",
                        scheme.error,
                        scheme.reset,
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    if any_io_error {
        Ok(exit_codes::IO_ERROR)
    } else if any_invalid {
        Ok(exit_codes::INVALID)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn validate_input(
    input: &[u8],
    filename: Option<&str>,
    args: &ValidateArgs,
    scheme: &ColorScheme,
) -> i32 {
    match utf8::validate_utf8(input) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            if !args.quiet {
                print_error(&err, input, filename, scheme);
            }
            exit_codes::INVALID
        }
    }
}

/// Print a formatted error message with context snippet.
fn print_error(err: &Utf8Error, input: &[u8], filename: Option<&str>, scheme: &ColorScheme) {
    eprintln!(
        "{}error{}: {}",
        scheme.error,
        scheme.reset,
        format_error_kind(err.kind, err.offset, input)
    );

    let location = format!(
        "{}:{}:{}",
        filename.unwrap_or("<stdin>"),
        err.line,
        err.column
    );
    eprintln!("  {}--> {}{}", scheme.location, location, scheme.reset);

    if let Some(snippet) = get_error_snippet(input, err.line, err.column) {
        // Minimum 3 chars keeps short files aligned
        let line_num_width = err.line.to_string().len().max(3);
        let blank_padding = " ".repeat(line_num_width + 2);

        eprintln!("{}{}|{}", blank_padding, scheme.line_num, scheme.reset);
        eprintln!(
            " {}{:>width$}{} {}|{} {}",
            scheme.line_num,
            err.line,
            scheme.reset,
            scheme.line_num,
            scheme.reset,
            snippet.line_content,
            width = line_num_width
        );

        let padding = " ".repeat(snippet.caret_offset);
        eprintln!(
            "{}{}|{} {}{}^{}{}",
            blank_padding,
            scheme.line_num,
            scheme.reset,
            padding,
            scheme.caret,
            scheme.reset,
            format_error_hint(err.kind, scheme)
        );
    }

    eprintln!();
}

fn format_error_kind(kind: ErrorKind, offset: usize, input: &[u8]) -> String {
    let byte_info = input
        .get(offset)
        .map(|byte| format!(" (byte 0x{:02X})", byte))
        .unwrap_or_default();

    match kind {
        ErrorKind::InvalidLead | ErrorKind::IncompleteSequence => {
            format!("{}{}", kind, byte_info)
        }
        ErrorKind::NotEnoughRoom => format!("{} at end of input", kind),
        ErrorKind::InvalidCodePoint => "surrogate or out-of-range code point in UTF-8".to_string(),
        _ => kind.to_string(),
    }
}

fn format_error_hint(kind: ErrorKind, scheme: &ColorScheme) -> String {
    let hint = match kind {
        ErrorKind::InvalidLead => Some("bytes 0x80-0xBF are continuation bytes"),
        ErrorKind::IncompleteSequence => Some("expected byte 0x80-0xBF"),
        ErrorKind::OverlongSequence => Some("use shortest possible encoding"),
        ErrorKind::InvalidCodePoint => {
            Some("U+D800-U+DFFF are reserved for UTF-16, maximum is U+10FFFF")
        }
        _ => None,
    };

    match hint {
        Some(h) => format!(" {}{}{}", scheme.message, h, scheme.reset),
        None => String::new(),
    }
}

struct ErrorSnippet {
    /// The content of the line containing the error.
    line_content: String,
    /// Number of spaces before the caret.
    caret_offset: usize,
}

/// Extract the line holding the error, truncated around the error column.
fn get_error_snippet(input: &[u8], line: usize, column: usize) -> Option<ErrorSnippet> {
    let line_bytes = input.split(|&b| b == b'\n').nth(line - 1)?;
    let error_col = column.saturating_sub(1);

    let max_width = 80;
    let (start, end, prefix) = if line_bytes.len() <= max_width {
        (0, line_bytes.len(), "")
    } else if error_col < max_width / 2 {
        (0, max_width, "")
    } else {
        let start = error_col.saturating_sub(max_width / 2);
        (start, (start + max_width).min(line_bytes.len()), "...")
    };
    let suffix = if end < line_bytes.len() { "..." } else { "" };

    // Lossy conversion turns each bad byte into one replacement char, so
    // the caret lines up when the bytes before it are ASCII
    let visible = String::from_utf8_lossy(&line_bytes[start..end]);
    let caret_offset = String::from_utf8_lossy(&line_bytes[start..error_col.min(end)])
        .chars()
        .count()
        + prefix.len();

    Some(ErrorSnippet {
        line_content: format!("{}{}{}", prefix, visible, suffix),
        caret_offset,
    })
}
