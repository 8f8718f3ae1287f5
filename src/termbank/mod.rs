//! Core term bank reader module

pub mod types;

mod archive;
mod glossary;
mod index;
mod lookup;

pub use archive::{load_index, load_index_from, LogProgress, NoopProgress, ProgressSink};
pub use glossary::{extract, CodeTable, ExtractedGlossary};
pub use index::DictionaryIndex;
pub use lookup::{Dictionary, LookupResult};
pub use types::error::{Result, TermbankError};
