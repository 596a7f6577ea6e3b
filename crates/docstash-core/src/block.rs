//! Detected text regions and the links between them.
//!
//! A document-analysis response is a flat list of [`Block`]s. Each block is
//! tagged with a [`BlockKind`] and may point at other blocks through
//! [`Relationship`] entries. Every field is optional on the wire: a missing
//! tag, text, id or relationship list deserializes to an empty default
//! instead of failing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Type tag of a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    /// A line of text, usually owning several words.
    Line,
    /// A single word.
    Word,
    /// Any other tag (`PAGE`, `TABLE`, ...), kept verbatim.
    Other(String),
}

impl BlockKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Line => "LINE",
            Self::Word => "WORD",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for BlockKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for BlockKind {
    fn from(tag: &str) -> Self {
        match tag {
            "LINE" => Self::Line,
            "WORD" => Self::Word,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "LINE" => Self::Line,
            "WORD" => Self::Word,
            _ => Self::Other(tag),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag of a [`Relationship`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipKind {
    /// The source block contains the referenced blocks.
    Child,
    /// Any other link (`VALUE`, `MERGED_CELL`, ...), kept verbatim.
    Other(String),
}

impl RelationshipKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Child => "CHILD",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for RelationshipKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for RelationshipKind {
    fn from(tag: &str) -> Self {
        match tag {
            "CHILD" => Self::Child,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for RelationshipKind {
    fn from(tag: String) -> Self {
        if tag == "CHILD" {
            Self::Child
        } else {
            Self::Other(tag)
        }
    }
}

impl From<RelationshipKind> for String {
    fn from(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::Child => "CHILD".to_owned(),
            RelationshipKind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed link from one block to others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Link type; only [`RelationshipKind::Child`] is acted upon.
    #[serde(rename = "Type", default, deserialize_with = "nullable")]
    pub kind: RelationshipKind,
    /// Ids of the referenced blocks, in payload order.
    #[serde(rename = "Ids", default, deserialize_with = "nullable")]
    pub ids: Vec<String>,
}

impl Relationship {
    /// Creates a relationship of the given kind.
    pub fn new<I, S>(kind: RelationshipKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a `CHILD` relationship.
    pub fn child<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RelationshipKind::Child, ids)
    }

    /// Returns true for `CHILD` relationships.
    #[inline]
    pub fn is_child(&self) -> bool {
        self.kind == RelationshipKind::Child
    }
}

/// One detected text region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Type tag.
    #[serde(rename = "BlockType", default, deserialize_with = "nullable")]
    pub kind: BlockKind,
    /// Detected text, if any.
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Identifier, unique within one response.
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Outgoing links, in payload order.
    #[serde(
        rename = "Relationships",
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Creates an empty block of the given kind.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Creates a `LINE` block with the given text.
    pub fn line(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Line).with_text(text)
    }

    /// Creates a `WORD` block with the given text.
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Word).with_text(text)
    }

    /// Sets the detected text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the block id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a relationship.
    #[must_use]
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Appends a `CHILD` relationship to the given ids.
    #[must_use]
    pub fn with_children<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_relationship(Relationship::child(ids))
    }

    /// Returns true for `LINE` blocks.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.kind == BlockKind::Line
    }

    /// Returns true for `WORD` blocks.
    #[inline]
    pub fn is_word(&self) -> bool {
        self.kind == BlockKind::Word
    }

    /// Returns the detected text, or `""` when absent.
    #[inline]
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Iterates over the ids referenced by `CHILD` relationships.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|relationship| relationship.is_child())
            .flat_map(|relationship| relationship.ids.iter().map(String::as_str))
    }
}

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
