//! Interactive location prompt

use std::io::{self, BufRead, Write};

/// Prompt shown when no location was given on the command line
pub const LOCATION_PROMPT: &str = "📍 Enter location (e.g., Ahmedabad, Surat): ";

/// Print the prompt and read one line
///
/// Only the line terminator is stripped; blank input is returned as-is and
/// rejected later by the pipeline.
pub fn read_location<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<String> {
    output.write_all(LOCATION_PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use the argument when present, otherwise prompt for it
pub fn resolve_location<R: BufRead, W: Write>(
    arg: Option<String>,
    input: &mut R,
    output: &mut W,
) -> io::Result<String> {
    match arg {
        Some(location) => Ok(location),
        None => read_location(input, output),
    }
}
