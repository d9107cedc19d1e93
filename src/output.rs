use anyhow::Result;
use std::io::{self, Write};

use crate::interaction::SubmissionOutcome;
use crate::store::{Preference, PreferenceRecord};

pub fn print_outcome(outcome: &SubmissionOutcome) -> Result<()> {
    write_outcome(&mut io::stdout().lock(), &mut io::stderr().lock(), outcome)
}

pub fn print_preferences(records: &[PreferenceRecord]) -> Result<()> {
    write_preferences(&mut io::stdout().lock(), records)
}

pub fn preference_hint(name: &str, preference: &Preference) -> String {
    format!(
        "Welcome back {}! Last time you studied {} at level {}.",
        name, preference.topic, preference.level
    )
}

fn write_outcome(
    out: &mut impl Write,
    err: &mut impl Write,
    outcome: &SubmissionOutcome,
) -> Result<()> {
    if let Some(questions) = &outcome.questions {
        writeln!(out, "{}", questions.heading)?;
        writeln!(out)?;
        writeln!(out, "{}", questions.body)?;
        writeln!(out)?;
    }
    match &outcome.status {
        Ok(message) => writeln!(out, "{message}")?,
        Err(error) => writeln!(err, "error: {error}")?,
    }
    Ok(())
}

fn write_preferences(out: &mut impl Write, records: &[PreferenceRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No saved preferences.")?;
        return Ok(());
    }
    writeln!(out, "All Saved Preferences")?;
    for record in records {
        writeln!(out, "{}\t{}\t{}", record.name, record.topic, record.level)?;
    }
    Ok(())
}
