//! The Javadoc documentation tree (§3 "Javadoc").

use crate::model::SymbolId;
use serde::{Deserialize, Serialize};

/// A documentation comment attached to an `Info`.
///
/// `blocks` is the top-level tree (paragraphs, admonitions, code
/// blocks, ...). The side-channel lists mirror fields the original
/// keeps denormalized for fast access during synthesis and merging
/// (§4.G steps 3, 8, 9) instead of re-walking `blocks` every time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Javadoc {
    pub blocks: Vec<Block>,
    pub brief: Option<Block>,
    pub params: Vec<Param>,
    pub tparams: Vec<TParam>,
    pub returns: Vec<Returns>,
    pub exceptions: Vec<Throws>,
    pub sees: Vec<Block>,
    pub preconditions: Vec<Block>,
    pub postconditions: Vec<Block>,
    /// Resolved targets of this function's own `@relates` directives
    /// (only meaningful when `self` belongs to a function); the forward
    /// half of the bidirectional edge pair (§9 "Cyclic data").
    pub relates: Vec<SymbolId>,
    /// The reverse edge: ids of functions that declared `@relates self`
    /// naming this (non-function) entity as their target.
    pub related: Vec<SymbolId>,
}

impl Javadoc {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
            && self.brief.is_none()
            && self.params.is_empty()
            && self.tparams.is_empty()
            && self.returns.is_empty()
            && self.exceptions.is_empty()
            && self.sees.is_empty()
            && self.preconditions.is_empty()
            && self.postconditions.is_empty()
            && self.relates.is_empty()
            && self.related.is_empty()
    }
}

/// A documented parameter (`@param name description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub description: Vec<Block>,
    /// `true` when synthesized by auto-function-metadata (§4.G step 8)
    /// rather than written by the user.
    pub synthesized: bool,
}

/// A documented template parameter (`@tparam name description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TParam {
    pub name: String,
    pub description: Vec<Block>,
}

/// A documented return value (`@returns description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Returns {
    pub description: Vec<Block>,
    pub synthesized: bool,
}

/// A documented exception (`@throws Type description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throws {
    pub exception_name: String,
    pub description: Vec<Block>,
}

/// A block-level documentation node (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Details(Vec<Inline>),
    Brief(Vec<Inline>),
    Returns(Vec<Inline>),
    Param {
        name: String,
        direction: Option<String>,
        content: Vec<Inline>,
    },
    TParam {
        name: String,
        content: Vec<Inline>,
    },
    Throws {
        exception: String,
        content: Vec<Inline>,
    },
    See(Vec<Inline>),
    Precondition(Vec<Inline>),
    Postcondition(Vec<Inline>),
    Admonition {
        kind: AdmonitionKind,
        content: Vec<Inline>,
    },
    /// Verbatim code. Unlike the other kinds, whitespace inside is
    /// never collapsed (§4.G step 4) — only unindented (§4.G step 6).
    Code(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    ListItem(Vec<Inline>),
    UnorderedList(Vec<Block>),
    /// An `@relates` command naming another entity this one should be
    /// cross-linked to (§9 "Cyclic data"). Consumed and removed during
    /// finalization; never present in a fully finalized corpus.
    Relates(String),
}

impl Block {
    /// `true` for [`Block::Code`], which is exempt from whitespace
    /// collapsing (§4.G step 4).
    pub fn is_code(&self) -> bool {
        matches!(self, Block::Code(_))
    }

    /// The inline children of this block, where that concept applies.
    /// `UnorderedList` has block children instead and returns `&[]`.
    pub fn inline_children(&self) -> &[Inline] {
        match self {
            Block::Paragraph(c)
            | Block::Details(c)
            | Block::Brief(c)
            | Block::Returns(c)
            | Block::See(c)
            | Block::Precondition(c)
            | Block::Postcondition(c)
            | Block::Code(c)
            | Block::ListItem(c) => c,
            Block::Param { content, .. }
            | Block::TParam { content, .. }
            | Block::Throws { content, .. }
            | Block::Admonition { content, .. }
            | Block::Heading { content, .. } => content,
            Block::UnorderedList(_) | Block::Relates(_) => &[],
        }
    }

    /// Mutable access to the inline children; see
    /// [`Block::inline_children`].
    pub fn inline_children_mut(&mut self) -> &mut Vec<Inline> {
        match self {
            Block::Paragraph(c)
            | Block::Details(c)
            | Block::Brief(c)
            | Block::Returns(c)
            | Block::See(c)
            | Block::Precondition(c)
            | Block::Postcondition(c)
            | Block::Code(c)
            | Block::ListItem(c) => c,
            Block::Param { content, .. }
            | Block::TParam { content, .. }
            | Block::Throws { content, .. }
            | Block::Admonition { content, .. }
            | Block::Heading { content, .. } => content,
            Block::UnorderedList(_) => {
                unreachable!("UnorderedList has block children, not inline children")
            }
            Block::Relates(_) => {
                unreachable!("Relates is consumed before trimming ever sees it")
            }
        }
    }

    /// `true` once every inline child has been trimmed to nothing
    /// (§4.G step 4 "Remove now-empty blocks").
    pub fn is_effectively_empty(&self) -> bool {
        match self {
            Block::UnorderedList(items) => items.is_empty(),
            _ => self.inline_children().is_empty(),
        }
    }
}

/// Informational / warning / note callouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdmonitionKind {
    Note,
    Tip,
    Important,
    Caution,
    Warning,
}

/// An inline documentation node (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    Styled { style: Style, text: String },
    Link { href: String, text: String },
    /// A `@ref`/autolink target; `id` starts `invalid` and is filled in
    /// by reference resolution (§4.G step 1).
    Reference { text: String, id: SymbolId },
    /// A `@copydoc`/`@copybrief`/`@copydetails` command. Consumed and
    /// removed during finalization (§4.G steps 3, 7); never present in
    /// a fully finalized corpus.
    Copied {
        target: String,
        parts: CopyParts,
        resolved: SymbolId,
    },
}

impl Inline {
    /// The text content, for whitespace trimming purposes (§4.G step 4).
    /// `Copied` and `Reference` nodes are opaque at this stage and are
    /// left alone.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Inline::Text(s) => Some(s),
            Inline::Styled { text, .. } => Some(text),
            Inline::Link { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, Inline::Text(s) if s.is_empty())
    }
}

/// Inline character styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    Bold,
    Italic,
    Mono,
}

/// Which part(s) of the target's javadoc a copy directive imports
/// (§3, §4.G step 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyParts {
    All,
    Brief,
    Description,
}
