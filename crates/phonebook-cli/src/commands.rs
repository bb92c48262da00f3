//! Subcommand implementations.
//!
//! Each command writes its report to `out` and returns whether the input was
//! accepted. I/O failures are returned as errors.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use phonebook_core::{validate_name, validate_name_format, MobileDevice, Roster, RosterError};
use tracing::info;

/// Checks a model code, including its maximum length.
pub fn check_model(model: &str, out: &mut impl Write) -> anyhow::Result<bool> {
    report(model, MobileDevice::validate_model_code(model), out)
}

/// Checks a person name; `full` also requires at least two words.
pub fn check_name(name: &str, full: bool, out: &mut impl Write) -> anyhow::Result<bool> {
    let mut result = validate_name(name);
    if full {
        result = result.and_then(|()| validate_name_format(name));
    }
    report(name, result, out)
}

/// Loads a roster and prints it, or lists every invalid entry.
pub fn roster(path: &Path, json: bool, out: &mut impl Write) -> anyhow::Result<bool> {
    let roster = match Roster::load(path) {
        Ok(roster) => roster,
        Err(RosterError::InvalidEntries(errors)) => {
            writeln!(out, "{}: {} invalid entries", path.display(), errors.len())?;
            for error in &errors {
                writeln!(out, "  {error}")?;
            }
            return Ok(false);
        }
        Err(err @ RosterError::DuplicateId { .. }) => {
            writeln!(out, "{}: {err}", path.display())?;
            return Ok(false);
        }
        Err(err) => return Err(err).context("Failed to load roster"),
    };

    info!(count = roster.len(), "Roster is valid");
    if json {
        serde_json::to_writer_pretty(&mut *out, &roster)?;
        writeln!(out)?;
    } else {
        for person in roster.people() {
            writeln!(out, "{person}")?;
        }
    }
    Ok(true)
}

fn report(
    input: &str,
    result: phonebook_core::Result<()>,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match result {
        Ok(()) => {
            writeln!(out, "'{input}': valid")?;
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "'{input}': {} ({err})", err.error_code())?;
            Ok(false)
        }
    }
}
