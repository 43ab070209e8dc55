//! Run the whole normalization pipeline over one term bank on disk.
//!
//! [`run`] wires the external collaborators around the deinflector: load
//! the bank, classify and rewrite each entry in order, write the surviving
//! sequence into the output directory, and package that directory as a zip
//! alongside it. The binary in this crate calls it with fixed paths; the
//! integration tests call it against temp dirs.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use termbank_deinflect::{Deinflector, Outcome};
use termbank_io::{LoadMode, archive_dir, load_term_bank, write_term_bank};

/// Per-outcome entry tallies for one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    pub total: usize,
    pub passthrough: usize,
    pub normalized: usize,
    pub duplicates: usize,
    pub unparsed: usize,
}

/// Normalize `input` into `output_dir` and archive the directory.
///
/// The output bank keeps the input's file name inside `output_dir`; the
/// archive mirrors `output_dir` without transforming its contents. Entries
/// are processed strictly in bank order (the duplicate-lemma rule depends
/// on it).
pub fn run(input: &Path, output_dir: &Path, archive: &Path, mode: LoadMode) -> Result<RunStats> {
    let entries = load_term_bank(input, mode)?;
    let mut stats = RunStats {
        total: entries.len(),
        ..RunStats::default()
    };
    info!("loaded {} entries from {}", stats.total, input.display());

    let mut deinflector = Deinflector::new();
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        match deinflector.process(entry) {
            Outcome::Passthrough(entry) => {
                stats.passthrough += 1;
                kept.push(entry);
            }
            Outcome::Normalized(entry) => {
                stats.normalized += 1;
                kept.push(entry);
            }
            Outcome::Duplicate => stats.duplicates += 1,
            Outcome::Unparsed(entry) => {
                stats.unparsed += 1;
                kept.push(entry);
            }
        }
    }

    let file_name = input
        .file_name()
        .with_context(|| format!("input path {} has no file name", input.display()))?;
    write_term_bank(output_dir.join(file_name), &kept)?;
    archive_dir(output_dir, archive)?;
    Ok(stats)
}
