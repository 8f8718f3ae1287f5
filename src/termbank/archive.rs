//! Term bank archive loading.
//!
//! A term bank dictionary ships as a zip archive whose members named
//! `term*` each hold a JSON array of fixed-arity entry arrays. Loading is a
//! one-time, single-threaded, all-or-nothing startup step: any open, decode,
//! or parse failure aborts the whole load, with no per-entry recovery and no
//! retry. Nothing may query the index until loading completes.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, info, trace};
use zip::ZipArchive;

use crate::termbank::index::DictionaryIndex;
use crate::termbank::types::error::{Result, TermbankError};
use crate::termbank::types::models::RawEntry;

/// Archive members whose names start with this prefix are term bank files.
const TERM_MEMBER_PREFIX: &str = "term";

/// Receiver for load-progress signals.
///
/// The loader reports one `(processed, total)` pair per term bank member, in
/// archive enumeration order. Progress is observability only; it carries no
/// core semantics and any implementation, including a no-op, is valid.
pub trait ProgressSink {
    fn member_loaded(&mut self, processed: usize, total: usize);
}

/// A progress sink that ignores all signals.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn member_loaded(&mut self, _processed: usize, _total: usize) {}
}

/// A progress sink that forwards signals to the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn member_loaded(&mut self, processed: usize, total: usize) {
        info!("Term bank load progress: {}/{} members", processed, total);
    }
}

/// Loads a term bank archive from the given path into a fresh index.
///
/// # Arguments
/// * `path` - File path to the term bank zip archive
/// * `progress` - Sink for per-member load-progress signals
///
/// # Errors
/// Returns an error if:
/// - The archive cannot be opened
/// - The zip structure is invalid
/// - Any `term*` member is not valid UTF-8
/// - Any `term*` member is not a JSON array of seven-element entry arrays
pub fn load_index(
    path: impl AsRef<Path>,
    progress: &mut dyn ProgressSink,
) -> Result<DictionaryIndex> {
    let path = path.as_ref();
    info!("Opening term bank archive: {}", path.display());
    let file = File::open(path)?;
    load_index_from(file, progress)
}

/// Loads a term bank archive from any seekable byte source.
///
/// This is the reader-generic form backing [`load_index`]; identical bytes
/// produce an identical index regardless of the source.
pub fn load_index_from<R: Read + Seek>(
    reader: R,
    progress: &mut dyn ProgressSink,
) -> Result<DictionaryIndex> {
    let mut archive = ZipArchive::new(reader)?;

    // Term bank members, in archive enumeration order. The order is not
    // guaranteed to be stable across archive tools; it drives progress
    // reporting only, never correctness.
    let mut members = Vec::new();
    for position in 0..archive.len() {
        let member = archive.by_index(position)?;
        if member.name().starts_with(TERM_MEMBER_PREFIX) {
            members.push(position);
        }
    }
    let total = members.len();
    debug!(
        "Found {} term bank members among {} archive members",
        total,
        archive.len()
    );

    let mut index = DictionaryIndex::new();
    for (processed, &position) in members.iter().enumerate() {
        let mut member = archive.by_index(position)?;
        let name = member.name().to_owned();

        let mut bytes = Vec::with_capacity(member.size() as usize);
        member.read_to_end(&mut bytes)?;

        let text = std::str::from_utf8(&bytes).map_err(|source| TermbankError::MemberNotUtf8 {
            member: name.clone(),
            source,
        })?;
        let entries: Vec<RawEntry> =
            serde_json::from_str(text).map_err(|source| TermbankError::MalformedMember {
                member: name.clone(),
                source,
            })?;

        trace!("Member {}: {} entries", name, entries.len());
        for entry in entries {
            index.insert(entry);
        }
        progress.member_loaded(processed + 1, total);
    }

    info!(
        "Term bank loaded: {} entries under {} headwords",
        index.num_entries(),
        index.num_headwords()
    );
    Ok(index)
}
