//! The lookup service: a loaded dictionary answering headword queries.

use std::path::Path;

use crate::termbank::archive::{self, LogProgress, ProgressSink};
use crate::termbank::glossary::{self, CodeTable, ExtractedGlossary};
use crate::termbank::index::DictionaryIndex;
use crate::termbank::types::error::Result;
use crate::termbank::types::models::RawEntry;

/// A loaded term bank dictionary.
///
/// Owns the frozen headword index and the grammatical-code allow-list.
/// Construction is the only fallible, mutating step; afterwards every
/// operation takes `&self` and the value may be shared across threads and
/// queried concurrently without locking.
#[derive(Debug)]
pub struct Dictionary {
    index: DictionaryIndex,
    codes: CodeTable,
}

/// One lookup hit: an entry borrowed from the index together with the
/// glossary data extracted from its content tree.
#[derive(Debug, Clone)]
pub struct LookupResult<'a> {
    pub entry: &'a RawEntry,
    pub glossary: ExtractedGlossary,
}

impl Dictionary {
    /// Loads a term bank archive with the default code table, reporting
    /// progress through the `log` facade.
    ///
    /// # Errors
    /// Fails under the same conditions as
    /// [`load_index`](crate::termbank::load_index); loading is
    /// all-or-nothing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, CodeTable::default(), &mut LogProgress)
    }

    /// Loads a term bank archive with an explicit code table and progress
    /// sink.
    pub fn load_with(
        path: impl AsRef<Path>,
        codes: CodeTable,
        progress: &mut dyn ProgressSink,
    ) -> Result<Self> {
        let index = archive::load_index(path, progress)?;
        Ok(Self { index, codes })
    }

    /// Wraps an already-built index, for callers that loaded through
    /// [`load_index_from`](crate::termbank::load_index_from).
    pub fn from_index(index: DictionaryIndex, codes: CodeTable) -> Self {
        Self { index, codes }
    }

    /// Looks up a headword, returning one result per indexed entry in
    /// insertion order, or an empty `Vec` for an unknown word.
    ///
    /// A pure function of the immutable index and the word: amortized O(1)
    /// key lookup plus extraction over the matched entries' content trees.
    /// Extraction is recomputed per query; nothing is precomputed or cached
    /// at load time.
    pub fn lookup(&self, word: &str) -> Vec<LookupResult<'_>> {
        self.index
            .entries(word)
            .iter()
            .map(|entry| LookupResult {
                entry,
                glossary: glossary::extract(entry, &self.codes),
            })
            .collect()
    }

    /// The underlying headword index.
    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    /// The grammatical-code allow-list in effect.
    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }
}
