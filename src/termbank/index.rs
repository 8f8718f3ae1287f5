//! The in-memory dictionary index: headword to its entries.

use indexmap::IndexMap;

use crate::termbank::types::models::RawEntry;

/// Mapping from headword to the ordered sequence of entries sharing it.
///
/// The index is populated once by the archive loader and is read-only for the
/// remainder of the process lifetime; nothing mutates it after construction
/// and concurrent readers need no locking. It exclusively owns all entries;
/// lookups hand out borrowed slices, never copies.
///
/// Iteration order is deterministic for identical archive contents: headwords
/// appear in first-occurrence order, and each headword's entries in the
/// concatenated per-member, per-array order in which they were appended.
/// Duplicate headwords across archive members are appended, never
/// overwritten.
#[derive(Debug, Default)]
pub struct DictionaryIndex {
    entries: IndexMap<String, Vec<RawEntry>>,
    num_entries: usize,
}

impl DictionaryIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends an entry under its headword, creating the sequence on first
    /// occurrence. No entry is ever discarded during indexing.
    pub(crate) fn insert(&mut self, entry: RawEntry) {
        self.num_entries += 1;
        self.entries
            .entry(entry.headword.clone())
            .or_default()
            .push(entry);
    }

    /// The entries indexed under `headword`, in insertion order.
    ///
    /// An unknown headword yields an empty slice, not an error.
    pub fn entries(&self, headword: &str) -> &[RawEntry] {
        self.entries
            .get(headword)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any entry is indexed under `headword`.
    pub fn contains(&self, headword: &str) -> bool {
        self.entries.contains_key(headword)
    }

    /// All headwords, in first-occurrence order.
    pub fn headwords(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates `(headword, entries)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawEntry])> {
        self.entries
            .iter()
            .map(|(headword, entries)| (headword.as_str(), entries.as_slice()))
    }

    /// Number of distinct headwords.
    pub fn num_headwords(&self) -> usize {
        self.entries.len()
    }

    /// Total number of indexed entries across all headwords.
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
