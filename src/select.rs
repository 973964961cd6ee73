//! Interactive version selection
//!
//! When no configuration source is conclusive, the catalog is shown as a
//! numbered list (recently installed versions pinned to the top and tagged
//! `*recent`) and the user picks an entry. The menu is deliberately plain
//! stdin/stdout; all decision logic lives in the resolver.

use crate::catalog::Catalog;
use crate::domain::ReleaseVersion;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Prompts the user to pick a version from the catalog.
pub fn pick_version(
    catalog: &Catalog,
    recent: &[ReleaseVersion],
) -> Result<ReleaseVersion, io::Error> {
    let entries = catalog.merged_with(recent);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    pick_from(&entries, recent, &mut stdin.lock(), &mut stdout)
}

/// Menu loop over arbitrary reader/writer, separated for testing.
fn pick_from<R: BufRead, W: Write>(
    entries: &[ReleaseVersion],
    recent: &[ReleaseVersion],
    input: &mut R,
    output: &mut W,
) -> Result<ReleaseVersion, io::Error> {
    if entries.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "no versions available to select from",
        ));
    }

    writeln!(output, "Select terraform version")?;
    for (i, version) in entries.iter().enumerate() {
        let tag = if recent.contains(version) {
            format!(" {}", "*recent".cyan())
        } else {
            String::new()
        };
        writeln!(output, "{:3}) {}{}", i + 1, version, tag)?;
    }
    write!(output, "Enter selection [1-{}]: ", entries.len())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "selection prompt closed",
        ));
    }

    match parse_selection(&line, entries.len()) {
        Some(index) => Ok(entries[index].clone()),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid selection '{}'", line.trim()),
        )),
    }
}

/// Parses a 1-based menu selection into a 0-based index.
fn parse_selection(line: &str, len: usize) -> Option<usize> {
    let choice: usize = line.trim().parse().ok()?;
    if choice >= 1 && choice <= len {
        Some(choice - 1)
    } else {
        None
    }
}
