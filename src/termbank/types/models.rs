//! Core data structures for term bank dictionary entries.
//!
//! This module defines the fundamental types used throughout the library:
//! - The fixed-arity entry envelope ([`RawEntry`])
//! - The glossary list and its item shapes ([`GlossaryItem`])
//! - The recursive structured-content tree ([`ContentNode`])

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One raw dictionary entry, decoded from a seven-element JSON array.
///
/// Term bank members store entries positionally:
///
/// `[headword, reading, tags, <reserved>, <reserved>, glossary, sequence_id]`
///
/// The arity is fixed; a member containing an entry of any other length fails
/// to decode. The two reserved slots carry dictionary-specific metadata this
/// crate does not interpret; they are preserved verbatim, never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// The canonical dictionary-form key under which the entry is indexed.
    pub headword: String,
    /// The phonetic reading of the headword.
    pub reading: String,
    /// Dictionary-assigned tags for the entry as a whole.
    pub tags: Vec<String>,
    /// Positional slots 3 and 4, kept opaquely for round-tripping.
    pub reserved: [Value; 2],
    /// The glossary list (positional slot 5).
    pub glossary: GlossarySlot,
    /// Stable identifier of the entry within the source dictionary.
    pub sequence_id: i64,
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = RawEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a term bank entry array of exactly 7 elements")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RawEntry, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let headword = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let reading = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let tags = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let reserved_a = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let reserved_b = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let glossary = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(5, &self))?;
                let sequence_id = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(6, &self))?;
                if seq.next_element::<IgnoredAny>()?.is_some() {
                    return Err(de::Error::custom(
                        "term bank entry array has more than 7 elements",
                    ));
                }

                Ok(RawEntry {
                    headword,
                    reading,
                    tags,
                    reserved: [reserved_a, reserved_b],
                    glossary,
                    sequence_id,
                })
            }
        }

        deserializer.deserialize_seq(EntryVisitor)
    }
}

/// The glossary slot of an entry.
///
/// Well-formed entries carry an array of glossary items here, but glossary
/// data quality varies across dictionary sources. A slot of any other shape
/// is an extractor-relevant malformation: the entry is still indexed, and the
/// slot simply reads as an empty item list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GlossarySlot {
    Items(Vec<GlossaryItem>),
    Opaque(Value),
}

impl GlossarySlot {
    /// The glossary items, or an empty slice when the slot is not a list.
    pub fn items(&self) -> &[GlossaryItem] {
        match self {
            GlossarySlot::Items(items) => items,
            GlossarySlot::Opaque(_) => &[],
        }
    }
}

/// One element of an entry's glossary list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GlossaryItem {
    /// A `{"type": "structured-content"}` object; the only variant the
    /// extractor walks.
    Structured(StructuredItem),
    /// Bare definition text.
    Plain(String),
    /// Any other shape (images, unknown future types); carried but ignored.
    Opaque(Value),
}

/// A structured-content glossary object wrapping a content tree root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredItem {
    #[serde(rename = "type")]
    pub kind: StructuredKind,
    pub content: ContentNode,
}

/// Discriminant for typed glossary objects the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StructuredKind {
    #[serde(rename = "structured-content")]
    StructuredContent,
}

/// A node of the structured-content tree.
///
/// The tree mixes plain strings and tagged container nodes whose shape varies
/// entry-by-entry. Decoding is total: a value matching neither the text nor
/// the container shape lands in [`ContentNode::Opaque`] instead of failing,
/// so a malformed branch degrades to "no contribution" at extraction time
/// rather than aborting the load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Text(String),
    Container(ContainerNode),
    Opaque(Value),
}

/// A tagged container node (`ul`, `ol`, `li`, `span`, …).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContainerNode {
    pub tag: ContainerTag,
    /// Optional data attributes (`data-*` in the HTML rendering).
    #[serde(default)]
    pub data: Option<HashMap<String, String>>,
    /// Child content; see [`ContainerNode::children`] for uniform access.
    #[serde(default)]
    pub content: NodeChildren,
}

impl ContainerNode {
    /// The container's children as a uniform slice.
    ///
    /// Shorthand for [`NodeChildren::nodes`] on the `content` field. Always
    /// iterate children through this accessor; never match on the raw
    /// `content` shape at a traversal site.
    pub fn children(&self) -> &[ContentNode] {
        self.content.nodes()
    }

    /// Looks up a data attribute by key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.data.as_ref()?.get(key).map(String::as_str)
    }
}

/// Tag of a container node.
///
/// The vocabulary is open-ended; tags this crate does not traverse specially
/// are preserved under [`ContainerTag::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ContainerTag {
    Ul,
    Ol,
    Li,
    Span,
    Other(String),
}

impl From<String> for ContainerTag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            "span" => Self::Span,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for ContainerTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerTag::Ul => write!(f, "ul"),
            ContainerTag::Ol => write!(f, "ol"),
            ContainerTag::Li => write!(f, "li"),
            ContainerTag::Span => write!(f, "span"),
            ContainerTag::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// The `content` field of a container node.
///
/// The field is heterogeneous across dictionary sources: it may be absent, a
/// single node, or a list of nodes. This enum captures all three shapes and
/// [`NodeChildren::nodes`] normalizes them once, centrally; traversal code
/// must never assume list form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NodeChildren {
    Many(Vec<ContentNode>),
    One(Box<ContentNode>),
    #[default]
    Empty,
}

impl NodeChildren {
    /// The children as a uniform slice, regardless of the stored shape.
    ///
    /// A single node yields a one-element slice; already-list-shaped content
    /// is returned as-is, so normalization is a no-op on it.
    pub fn nodes(&self) -> &[ContentNode] {
        match self {
            NodeChildren::Many(nodes) => nodes,
            NodeChildren::One(node) => std::slice::from_ref(node.as_ref()),
            NodeChildren::Empty => &[],
        }
    }
}
