//! Node classification: maps a node and its parent to a rendering role.

use crate::model::{DocumentNode, NodeKind};

/// Semantic role selecting how a node is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Plain text, emitted as-is
    Text,
    /// Paragraph block
    Paragraph,
    /// Heading block with its level
    Heading(u8),
    /// `**strong**`
    Strong,
    /// `*emphasis*`
    Emphasis,
    /// `` `code` ``
    InlineCode,
    /// Fenced code block
    CodeBlock,
    /// Ordered or bulleted list
    List {
        /// Numbered items
        ordered: bool,
    },
    /// Item of an enclosing list
    ListItem,
    /// `[text](href)`
    Link,
    /// `> quoted` block
    Blockquote,
    /// Hard line break
    LineBreak,
    /// `---`
    HorizontalRule,
    /// Pipe table
    Table,
    /// `[Uploaded ...]` placeholder block
    ImageContainer,
    /// Inline image placeholder
    Image,
    /// Anything else: children are concatenated
    Other,
}

impl Role {
    /// Check if this role renders as a block with blank-line spacing.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Role::Paragraph
                | Role::Heading(_)
                | Role::CodeBlock
                | Role::List { .. }
                | Role::Blockquote
                | Role::HorizontalRule
                | Role::Table
                | Role::ImageContainer
        )
    }
}

/// Classify a node given the kind of its parent (`None` at a section root).
pub fn classify(node: &DocumentNode, parent: Option<&NodeKind>) -> Role {
    match &node.kind {
        NodeKind::Text => Role::Text,
        NodeKind::Paragraph => Role::Paragraph,
        NodeKind::Heading(level) => Role::Heading(*level),
        NodeKind::Strong => Role::Strong,
        NodeKind::Emphasis => Role::Emphasis,
        NodeKind::InlineCode => Role::InlineCode,
        NodeKind::CodeBlock => Role::CodeBlock,
        NodeKind::OrderedList => Role::List { ordered: true },
        NodeKind::UnorderedList => Role::List { ordered: false },
        NodeKind::ListItem => match parent {
            Some(kind) if kind.is_list() => Role::ListItem,
            _ => Role::Other,
        },
        NodeKind::Link => Role::Link,
        NodeKind::Blockquote => Role::Blockquote,
        NodeKind::LineBreak => Role::LineBreak,
        NodeKind::HorizontalRule => Role::HorizontalRule,
        NodeKind::Table => Role::Table,
        NodeKind::ImageContainer if find_image(node).is_some() => Role::ImageContainer,
        NodeKind::Image => Role::Image,
        NodeKind::ImageContainer
        | NodeKind::TableRow
        | NodeKind::TableHeaderCell
        | NodeKind::TableCell
        | NodeKind::Other(_) => Role::Other,
    }
}

/// The code node nested in a code block, if present.
pub fn code_body(block: &DocumentNode) -> Option<&DocumentNode> {
    block.find_descendant(|n| n.kind == NodeKind::InlineCode)
}

/// The image embedded in an image container, if present.
pub fn find_image(container: &DocumentNode) -> Option<&DocumentNode> {
    container.find_descendant(|n| n.kind == NodeKind::Image)
}

/// Language hint from a code node's `class` attribute.
///
/// Only tokens with a `language-` or `lang-` prefix count, so highlighter
/// classes such as `hljs` are ignored.
pub fn code_language(code: &DocumentNode) -> Option<&str> {
    code.attr("class")?
        .split_whitespace()
        .find_map(|token| {
            token
                .strip_prefix("language-")
                .or_else(|| token.strip_prefix("lang-"))
        })
        .filter(|lang| !lang.is_empty())
}
