//! Term-bank file I/O: loading, writing, and archive packaging.
//!
//! These are the pipeline's external collaborators. [`load_term_bank`]
//! produces the ordered entry sequence the normalizer consumes, choosing a
//! memory-mapped or owned backing buffer at runtime via [`LoadMode`];
//! [`write_term_bank`] emits the transformed sequence as one JSON document;
//! [`archive_dir`] packages the output directory into a zip that mirrors
//! its layout byte for byte. None of them make decisions about entry
//! content.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use termbank_types::DictionaryEntry;

/// Strategy for backing the input file's bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    match mode {
        LoadMode::Mmap => {
            // Safety: the bank is read once up front and not modified
            // concurrently by this process.
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("mmap {}", path.display()))?;
            Ok(Buffer::Mmap(mmap))
        }
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Load a term bank: one JSON array of positional entry arrays.
///
/// Failure here (unreadable file, malformed JSON) is the only fatal
/// condition in a run; everything downstream is per-entry and recoverable.
pub fn load_term_bank(path: impl AsRef<Path>, mode: LoadMode) -> Result<Vec<DictionaryEntry>> {
    let path = path.as_ref();
    let buffer = load_file(path, mode)?;
    serde_json::from_slice(buffer.as_slice())
        .with_context(|| format!("parse term bank {}", path.display()))
}

/// Write entries as a single JSON array, creating parent directories.
///
/// Output is UTF-8 with non-ASCII text preserved as-is, matching the banks
/// this tool consumes.
pub fn write_term_bank(path: impl AsRef<Path>, entries: &[DictionaryEntry]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, entries)
        .with_context(|| format!("serialize term bank {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}

/// Package a directory into a zip archive mirroring its layout.
///
/// File contents are stored untransformed; entry names are the paths
/// relative to `src_dir`, with `/` separators.
pub fn archive_dir(src_dir: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src_dir = src_dir.as_ref();
    let dest = dest.as_ref();
    let file = File::create(dest).with_context(|| format!("create archive {}", dest.display()))?;
    let mut writer = ZipWriter::new(file);
    add_dir(&mut writer, src_dir, "")?;
    writer
        .finish()
        .with_context(|| format!("finalize archive {}", dest.display()))?;
    Ok(())
}

fn add_dir(writer: &mut ZipWriter<File>, dir: &Path, prefix: &str) -> Result<()> {
    let options = SimpleFileOptions::default();
    let listing = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    for dir_entry in listing {
        let dir_entry = dir_entry.with_context(|| format!("list {}", dir.display()))?;
        let path = dir_entry.path();
        let name = dir_entry.file_name();
        let name = name.to_string_lossy();
        let archived = if prefix.is_empty() {
            name.into_owned()
        } else {
            format!("{prefix}/{name}")
        };
        if path.is_dir() {
            writer
                .add_directory(archived.clone(), options)
                .with_context(|| format!("archive directory {archived}"))?;
            add_dir(writer, &path, &archived)?;
        } else {
            let bytes =
                fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            writer
                .start_file(archived.clone(), options)
                .with_context(|| format!("archive file {archived}"))?;
            writer
                .write_all(&bytes)
                .with_context(|| format!("archive file {archived}"))?;
        }
    }
    Ok(())
}
