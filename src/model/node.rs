//! Document tree nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The structural kind of a document node.
///
/// Kinds serialize as a canonical lowercase name (`"paragraph"`, `"h2"`,
/// `"code-block"`) and parse from canonical names as well as the HTML tag
/// names scrapers usually produce (`"p"`, `"pre"`, `"li"`). Parsing never
/// fails: anything unrecognized becomes [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// A run of text; the only kind that carries a text value
    Text,
    /// A paragraph
    Paragraph,
    /// A heading, level 1-6
    Heading(u8),
    /// Strong emphasis (bold)
    Strong,
    /// Emphasis (italic)
    Emphasis,
    /// Inline code, or the code element nested in a code block
    InlineCode,
    /// A preformatted code block
    CodeBlock,
    /// A numbered list
    OrderedList,
    /// A bulleted list
    UnorderedList,
    /// An item of either list kind
    ListItem,
    /// A hyperlink
    Link,
    /// A block quotation
    Blockquote,
    /// A hard line break
    LineBreak,
    /// A thematic break
    HorizontalRule,
    /// A table
    Table,
    /// A table row
    TableRow,
    /// A header cell
    TableHeaderCell,
    /// A body cell
    TableCell,
    /// A wrapper around an uploaded image
    ImageContainer,
    /// An embedded image
    Image,
    /// Anything else, keeping the original name
    Other(String),
}

impl NodeKind {
    /// Canonical name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading(1) => "h1",
            NodeKind::Heading(2) => "h2",
            NodeKind::Heading(3) => "h3",
            NodeKind::Heading(4) => "h4",
            NodeKind::Heading(5) => "h5",
            NodeKind::Heading(_) => "h6",
            NodeKind::Strong => "strong",
            NodeKind::Emphasis => "emphasis",
            NodeKind::InlineCode => "inline-code",
            NodeKind::CodeBlock => "code-block",
            NodeKind::OrderedList => "ordered-list",
            NodeKind::UnorderedList => "unordered-list",
            NodeKind::ListItem => "list-item",
            NodeKind::Link => "link",
            NodeKind::Blockquote => "blockquote",
            NodeKind::LineBreak => "line-break",
            NodeKind::HorizontalRule => "horizontal-rule",
            NodeKind::Table => "table",
            NodeKind::TableRow => "table-row",
            NodeKind::TableHeaderCell => "table-header-cell",
            NodeKind::TableCell => "table-cell",
            NodeKind::ImageContainer => "image-container",
            NodeKind::Image => "image",
            NodeKind::Other(name) => name,
        }
    }

    /// Check if this is one of the two list kinds.
    pub fn is_list(&self) -> bool {
        matches!(self, NodeKind::OrderedList | NodeKind::UnorderedList)
    }

    /// Check if this is a header or body table cell.
    pub fn is_table_cell(&self) -> bool {
        matches!(self, NodeKind::TableHeaderCell | NodeKind::TableCell)
    }

    /// Check if this kind starts a new line in plain text output.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading(_)
                | NodeKind::CodeBlock
                | NodeKind::OrderedList
                | NodeKind::UnorderedList
                | NodeKind::ListItem
                | NodeKind::Blockquote
                | NodeKind::HorizontalRule
                | NodeKind::Table
                | NodeKind::TableRow
                | NodeKind::ImageContainer
        )
    }
}

impl FromStr for NodeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let kind = match name.as_str() {
            "text" | "#text" => NodeKind::Text,
            "paragraph" | "p" => NodeKind::Paragraph,
            "strong" | "bold" | "b" => NodeKind::Strong,
            "emphasis" | "italic" | "em" | "i" => NodeKind::Emphasis,
            "inline-code" | "code" => NodeKind::InlineCode,
            "code-block" | "pre" => NodeKind::CodeBlock,
            "ordered-list" | "ol" => NodeKind::OrderedList,
            "unordered-list" | "ul" => NodeKind::UnorderedList,
            "list-item" | "li" => NodeKind::ListItem,
            "link" | "a" => NodeKind::Link,
            "blockquote" => NodeKind::Blockquote,
            "line-break" | "br" => NodeKind::LineBreak,
            "horizontal-rule" | "hr" => NodeKind::HorizontalRule,
            "table" => NodeKind::Table,
            "table-row" | "tr" => NodeKind::TableRow,
            "table-header-cell" | "th" => NodeKind::TableHeaderCell,
            "table-cell" | "td" => NodeKind::TableCell,
            "image-container" => NodeKind::ImageContainer,
            "image" | "img" => NodeKind::Image,
            other => match heading_level(other) {
                Some(level) => NodeKind::Heading(level),
                None => NodeKind::Other(s.trim().to_string()),
            },
        };
        Ok(kind)
    }
}

/// Parse `h1`..`h6`, `heading1`..`heading6` and `heading-1`..`heading-6`.
fn heading_level(name: &str) -> Option<u8> {
    let digits = name
        .strip_prefix("heading-")
        .or_else(|| name.strip_prefix("heading"))
        .or_else(|| name.strip_prefix('h'))?;
    match digits.parse::<u8>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        match name.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        NodeKind::from(name.to_string())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a scraped document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Structural kind
    pub kind: NodeKind,

    /// Attributes such as `href`, `class` or `alt`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocumentNode>,

    /// Text value, present only on text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DocumentNode {
    /// Create an element node of the given kind with no children.
    pub fn element(kind: impl Into<NodeKind>) -> Self {
        Self {
            kind: kind.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::element(NodeKind::Text)
        }
    }

    /// Create a paragraph holding a single text node.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::element(NodeKind::Paragraph).with_child(Self::text(text))
    }

    /// Create a heading holding a single text node.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::element(NodeKind::Heading(level.clamp(1, 6))).with_child(Self::text(text))
    }

    /// Append a child and return self.
    pub fn with_child(mut self, child: DocumentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children and return self.
    pub fn with_children(mut self, children: impl IntoIterator<Item = DocumentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set an attribute and return self.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this is a text node holding only whitespace.
    pub fn is_blank(&self) -> bool {
        self.is_text() && self.text.as_deref().map_or(true, |t| t.trim().is_empty())
    }

    /// Concatenated text of all descendant text nodes, without any markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(ref text) = self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Text content with line breaks after block-level nodes.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain(&mut out);
        out
    }

    fn collect_plain(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text => out.push_str(self.text.as_deref().unwrap_or_default()),
            NodeKind::LineBreak => out.push('\n'),
            NodeKind::Image => out.push_str(self.attr("alt").unwrap_or_default()),
            NodeKind::TableHeaderCell | NodeKind::TableCell => {
                for child in &self.children {
                    child.collect_plain(out);
                }
                out.push('\t');
            }
            kind => {
                if kind.is_block() && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                for child in &self.children {
                    child.collect_plain(out);
                }
                if kind.is_block() {
                    if out.ends_with('\t') {
                        out.pop();
                    }
                    out.push('\n');
                }
            }
        }
    }

    /// Depth-first search for the first descendant matching `pred`.
    pub fn find_descendant<F>(&self, pred: F) -> Option<&DocumentNode>
    where
        F: Fn(&DocumentNode) -> bool + Copy,
    {
        for child in &self.children {
            if pred(child) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(pred) {
                return Some(found);
            }
        }
        None
    }
}
