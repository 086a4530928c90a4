//! utfcodec CLI tool for validating, sanitizing and transcoding Unicode text.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

mod count;
mod sanitize;
mod transcode;
mod validate;

#[derive(Debug, Parser)]
#[command(name = "utfcodec")]
#[command(about = "Unicode validation and transcoding toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate files for UTF-8 compliance
    Validate(validate::ValidateArgs),
    /// Replace malformed UTF-8 sequences with a replacement character
    Sanitize(sanitize::SanitizeArgs),
    /// Convert between UTF-8, UTF-16LE and UTF-32LE
    Transcode(transcode::TranscodeArgs),
    /// Count code points and detect a byte order mark
    Count(count::CountArgs),
}

/// Exit codes shared by all commands.
pub mod exit_codes {
    /// Input is valid / command succeeded.
    pub const SUCCESS: i32 = 0;
    /// Input is invalid (validation error).
    pub const INVALID: i32 = 1;
    /// I/O error (file not found, permission denied, etc.).
    pub const IO_ERROR: i32 = 2;
}

/// Parse size string like "1mb", "512KB", "2GB", "1024" (case insensitive)
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_lowercase();

    // Try parsing as plain number first
    if let Ok(bytes) = s.parse::<usize>() {
        return Ok(bytes);
    }

    // Parse with unit suffix
    let (num_str, unit) = if s.ends_with("gb") {
        (s.trim_end_matches("gb"), 1024 * 1024 * 1024)
    } else if s.ends_with("mb") {
        (s.trim_end_matches("mb"), 1024 * 1024)
    } else if s.ends_with("kb") {
        (s.trim_end_matches("kb"), 1024)
    } else if s.ends_with('b') {
        (s.trim_end_matches('b'), 1)
    } else {
        return Err(format!(
            "Invalid size format: '{}'. Use format like '1mb', '512KB', or '1024'",
            s
        ));
    };

    num_str
        .trim()
        .parse::<usize>()
        .map(|n| n * unit)
        .map_err(|_| format!("Invalid number in size: '{}'", s))
}

/// Parse a code point written as "FFFD", "U+FFFD" or "0xFFFD".
pub fn parse_code_point(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(hex, 16).map_err(|_| format!("Invalid code point: '{}'", s))
}

/// Read a file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = Vec::new();
            io::stdin()
                .read_to_end(&mut input)
                .context("failed to read from stdin")?;
            Ok(input)
        }
    }
}

/// Write to a file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialize logging")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let code = match cli.command {
        Command::Validate(args) => validate::run(args)?,
        Command::Sanitize(args) => sanitize::run(args)?,
        Command::Transcode(args) => transcode::run(args)?,
        Command::Count(args) => count::run(args)?,
    };

    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        // Plain numbers
        assert_eq!(parse_size("2000").unwrap(), 2000);

        // Bytes (case insensitive)
        assert_eq!(parse_size("100b").unwrap(), 100);
        assert_eq!(parse_size("100B").unwrap(), 100);

        // Kilobytes
        assert_eq!(parse_size("1kb").unwrap(), 1024);
        assert_eq!(parse_size("1KB").unwrap(), 1024);

        // Megabytes
        assert_eq!(parse_size("10mb").unwrap(), 10 * 1024 * 1024);

        // Gigabytes
        assert_eq!(parse_size("2Gb").unwrap(), 2 * 1024 * 1024 * 1024);

        // With whitespace
        assert_eq!(parse_size(" 1mb ").unwrap(), 1024 * 1024);

        // Errors
        assert!(parse_size("abc").is_err());
        assert!(parse_size("1tb").is_err());
        assert!(parse_size("").is_err());
    }

    #[test]
    fn test_parse_code_point() {
        assert_eq!(parse_code_point("FFFD").unwrap(), 0xFFFD);
        assert_eq!(parse_code_point("U+FFFD").unwrap(), 0xFFFD);
        assert_eq!(parse_code_point("0x3f").unwrap(), 0x3F);
        assert_eq!(parse_code_point(" 1F389 ").unwrap(), 0x1F389);
        assert!(parse_code_point("zz").is_err());
        assert!(parse_code_point("").is_err());
    }
}
