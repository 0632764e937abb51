//! Console confirmation prompt.

use std::io::{self, Write};

use anyhow::Result;

/// Ask a `[y/N]` question on the console. Only an explicit `y`/`Y` counts
/// as yes; everything else (including EOF) is no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
