//! CLI handler for the `count` command.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use utfcodec::text::{unchecked, utf8};

use crate::exit_codes;

/// Count code points in UTF-8 input.
#[derive(Debug, Parser)]
pub struct CountArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Skip validation (input must already be well-formed)
    #[arg(long)]
    pub unchecked: bool,
}

/// Run the count command.
pub fn run(args: CountArgs) -> Result<i32> {
    let input = crate::read_input(args.input.as_deref())?;

    let code_points = if args.unchecked {
        unchecked::distance(&input)
    } else {
        match utf8::distance(&input) {
            Ok(n) => n,
            Err(err) => {
                eprintln!("error: {} at byte {}", err, utf8::find_invalid(&input));
                return Ok(exit_codes::INVALID);
            }
        }
    };

    println!("bytes: {}", input.len());
    println!("code points: {}", code_points);
    println!("bom: {}", if utf8::starts_with_bom(&input) { "yes" } else { "no" });
    Ok(exit_codes::SUCCESS)
}
