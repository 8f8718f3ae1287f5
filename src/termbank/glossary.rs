//! Content-tree extraction: projecting an entry's structured glossary into
//! flat, human-readable data.
//!
//! Term bank glossaries encode formatted text as an HTML-list-like tree of
//! tagged containers. The extractor walks that tree and collects three
//! channels: grammatical codes (from `span` nodes carrying a `data.code`
//! attribute), definitions, and usage examples (both from nested `ol`
//! structures). The walk never fails; a branch whose shape does not match
//! any rule simply contributes nothing.

use std::collections::HashMap;

use crate::termbank::types::models::{
    ContainerNode, ContainerTag, ContentNode, GlossaryItem, RawEntry,
};

/// The allow-list of recognized grammatical codes, mapping each code to its
/// human-readable meaning.
///
/// The recognized vocabulary is an explicit configuration value passed into
/// the extractor, not a set of literal comparisons inside it. Codes outside
/// the table are silently ignored (an allow-list, not a deny-list).
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: HashMap<String, String>,
}

impl CodeTable {
    /// Builds a table from `(code, meaning)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let codes = pairs
            .into_iter()
            .map(|(code, meaning)| (code.into(), meaning.into()))
            .collect();
        Self { codes }
    }

    /// Whether `code` is in the recognized vocabulary.
    pub fn recognizes(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// The human-readable meaning of a recognized code.
    pub fn meaning(&self, code: &str) -> Option<&str> {
        self.codes.get(code).map(String::as_str)
    }

    /// Number of recognized codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for CodeTable {
    /// The stock vocabulary of usage markers.
    fn default() -> Self {
        Self::new([
            ("n", "noun"),
            ("uk", "usually written using kana alone"),
        ])
    }
}

/// Flat projection of one entry's glossary content tree.
///
/// Absence of any matching structure yields empty sequences, never a failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedGlossary {
    /// One group of recognized codes per list item found, in item order.
    /// An item without recognized codes still contributes an empty group.
    pub codes: Vec<Vec<String>>,
    /// Definition text found directly inside `ol > li` items.
    pub definitions: Vec<String>,
    /// Flattened text of example items nested under `ol > li > ul`.
    pub examples: Vec<String>,
}

impl ExtractedGlossary {
    /// Whether no channel holds any extracted data.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty() && self.definitions.is_empty() && self.examples.is_empty()
    }
}

/// Extracts the glossary data of one entry.
///
/// Walks every `structured-content` glossary item of the entry; plain-string
/// and unrecognized items are skipped. Structural anomalies inside a tree
/// degrade to an empty contribution for that branch; this function has no
/// error path.
pub fn extract(entry: &RawEntry, table: &CodeTable) -> ExtractedGlossary {
    let mut out = ExtractedGlossary::default();
    for item in entry.glossary.items() {
        if let GlossaryItem::Structured(structured) = item {
            collect_root(&structured.content, table, &mut out);
        }
    }
    out
}

/// Processes a structured-content root: a `ul` container whose `li` children
/// are the glossary's list items. Any other root shape contributes nothing.
fn collect_root(root: &ContentNode, table: &CodeTable, out: &mut ExtractedGlossary) {
    let ContentNode::Container(list) = root else {
        return;
    };
    if list.tag != ContainerTag::Ul {
        return;
    }
    for child in list.children() {
        let ContentNode::Container(item) = child else {
            continue;
        };
        if item.tag != ContainerTag::Li {
            continue;
        }
        let group = collect_list_item(item, table, out);
        out.codes.push(group);
    }
}

/// Collects one list item's code group; nested `ol` containers feed the
/// definition and example channels as a side effect.
///
/// Plain text children are informational and deliberately not collected into
/// any channel.
fn collect_list_item(
    item: &ContainerNode,
    table: &CodeTable,
    out: &mut ExtractedGlossary,
) -> Vec<String> {
    let mut group = Vec::new();
    for node in item.children() {
        let ContentNode::Container(inner) = node else {
            continue;
        };
        match inner.tag {
            ContainerTag::Span => {
                if let Some(code) = inner.attr("code") {
                    if table.recognizes(code) {
                        group.push(code.to_owned());
                    }
                }
            }
            ContainerTag::Ol => collect_sense_list(inner, out),
            _ => {}
        }
    }
    group
}

/// Processes an `ol` container: text directly inside its `li` children is
/// definition text; `li` items one level further down, under a `ul`, are
/// usage examples.
fn collect_sense_list(list: &ContainerNode, out: &mut ExtractedGlossary) {
    for sense in list.children() {
        let ContentNode::Container(sense_item) = sense else {
            continue;
        };
        if sense_item.tag != ContainerTag::Li {
            continue;
        }
        for node in sense_item.children() {
            match node {
                ContentNode::Text(text) => out.definitions.push(text.clone()),
                ContentNode::Container(nested) if nested.tag == ContainerTag::Ul => {
                    for example in nested.children() {
                        let ContentNode::Container(example_item) = example else {
                            continue;
                        };
                        if example_item.tag != ContainerTag::Li {
                            continue;
                        }
                        let text = flatten_text(example_item.children());
                        if !text.is_empty() {
                            out.examples.push(text);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

/// Concatenates every text leaf under the given nodes, in document order.
fn flatten_text(nodes: &[ContentNode]) -> String {
    let mut buf = String::new();
    for node in nodes {
        push_text(node, &mut buf);
    }
    buf
}

fn push_text(node: &ContentNode, buf: &mut String) {
    match node {
        ContentNode::Text(text) => buf.push_str(text),
        ContentNode::Container(container) => {
            for child in container.children() {
                push_text(child, buf);
            }
        }
        ContentNode::Opaque(_) => {}
    }
}
