//! # termbank-reader
//!
//! A reader for zip-packed JSON term bank dictionaries.
//! Loads every `term*` member of an archive into an in-memory headword index,
//! then answers lookups by extracting grammatical codes, definitions, and
//! usage examples from each entry's structured-content glossary tree.
pub mod termbank;

// Re-export the main types for convenience
pub use termbank::{
    CodeTable,
    Dictionary,
    DictionaryIndex,
    ExtractedGlossary,
    LookupResult,
    TermbankError,
};
