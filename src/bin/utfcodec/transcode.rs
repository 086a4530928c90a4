//! CLI handler for the `transcode` command.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use utfcodec::text::{transcode, unchecked, utf8};

use crate::exit_codes;

/// Text encoding on either side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// UTF-8
    Utf8,
    /// UTF-16, little endian
    Utf16le,
    /// UTF-32, little endian
    Utf32le,
}

/// Convert text between Unicode encodings.
#[derive(Debug, Parser)]
pub struct TranscodeArgs {
    /// Input file (reads from stdin if omitted)
    pub input: Option<PathBuf>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Encoding of the input
    #[arg(long, value_enum, default_value_t = Encoding::Utf8)]
    pub from: Encoding,

    /// Encoding of the output
    #[arg(long, value_enum, default_value_t = Encoding::Utf16le)]
    pub to: Encoding,

    /// Skip validation (input must already be well-formed)
    #[arg(long)]
    pub unchecked: bool,
}

/// Run the transcode command.
pub fn run(args: TranscodeArgs) -> Result<i32> {
    let input = crate::read_input(args.input.as_deref())?;

    let utf8 = match to_utf8(&input, args.from, args.unchecked) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("error: {}", err);
            return Ok(exit_codes::INVALID);
        }
    };

    let output = match from_utf8(&utf8, args.to, args.unchecked) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("error: {}", err);
            return Ok(exit_codes::INVALID);
        }
    };

    log::info!(
        "transcoded {} bytes of {:?} into {} bytes of {:?}",
        input.len(),
        args.from,
        output.len(),
        args.to
    );
    crate::write_output(args.output.as_deref(), &output)?;
    Ok(exit_codes::SUCCESS)
}

/// Decode the input into UTF-8 bytes.
fn to_utf8(input: &[u8], from: Encoding, unchecked: bool) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len());
    match from {
        Encoding::Utf8 => {
            if !unchecked {
                utf8::validate_utf8(input)?;
            }
            out.extend_from_slice(input);
        }
        Encoding::Utf16le => {
            if input.len() % 2 != 0 {
                bail!("UTF-16 input has odd length {}", input.len());
            }
            let units: Vec<u16> = input
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            if unchecked {
                unchecked::utf16_to_utf8(&units, &mut out);
            } else {
                transcode::utf16_to_utf8(&units, &mut out)?;
            }
        }
        Encoding::Utf32le => {
            if input.len() % 4 != 0 {
                bail!("UTF-32 input length {} is not a multiple of 4", input.len());
            }
            let cps: Vec<u32> = input
                .chunks_exact(4)
                .map(|quad| u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]))
                .collect();
            if unchecked {
                unchecked::utf32_to_utf8(&cps, &mut out);
            } else {
                transcode::utf32_to_utf8(&cps, &mut out)?;
            }
        }
    }
    Ok(out)
}

/// Encode UTF-8 bytes into the target encoding.
fn from_utf8(input: &[u8], to: Encoding, unchecked: bool) -> Result<Vec<u8>> {
    match to {
        Encoding::Utf8 => Ok(input.to_vec()),
        Encoding::Utf16le => {
            let mut units = Vec::with_capacity(input.len());
            if unchecked {
                unchecked::utf8_to_utf16(input, &mut units);
            } else {
                transcode::utf8_to_utf16(input, &mut units)?;
            }
            Ok(units.iter().flat_map(|unit| unit.to_le_bytes()).collect())
        }
        Encoding::Utf32le => {
            let mut cps = Vec::with_capacity(input.len());
            if unchecked {
                unchecked::utf8_to_utf32(input, &mut cps);
            } else {
                transcode::utf8_to_utf32(input, &mut cps)?;
            }
            Ok(cps.iter().flat_map(|cp| cp.to_le_bytes()).collect())
        }
    }
}
