//! CLI handler for the `sanitize` command.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use utfcodec::text::sanitize::{sanitize, SanitizeConfig};
use utfcodec::Error;

use crate::exit_codes;

/// Replace malformed UTF-8 sequences.
#[derive(Debug, Parser)]
pub struct SanitizeArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replacement code point in hex (FFFD, U+FFFD or 0xFFFD)
    #[arg(short, long, default_value = "U+FFFD", value_parser = crate::parse_code_point)]
    pub replacement: u32,

    /// Only process the first SIZE bytes (e.g. 4kb, 1mb)
    #[arg(long, value_parser = crate::parse_size)]
    pub head: Option<usize>,

    /// Drop a leading byte order mark
    #[arg(long)]
    pub strip_bom: bool,
}

/// Run the sanitize command.
pub fn run(args: SanitizeArgs) -> Result<i32> {
    let mut input = crate::read_input(args.input.as_deref())?;
    if let Some(head) = args.head {
        input.truncate(head);
    }

    let config = SanitizeConfig::new()
        .with_replacement(args.replacement)
        .with_strip_bom(args.strip_bom);

    let mut output = Vec::with_capacity(input.len());
    match sanitize(&input, &config, &mut output) {
        Ok(replaced) => {
            log::info!("replaced {} malformed sequences", replaced);
            crate::write_output(args.output.as_deref(), &output)?;
            Ok(exit_codes::SUCCESS)
        }
        Err(Error::NotEnoughRoom) => {
            eprintln!("error: input ends in the middle of a UTF-8 sequence");
            Ok(exit_codes::INVALID)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(exit_codes::INVALID)
        }
    }
}
