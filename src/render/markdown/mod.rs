//! Markdown rendering for document trees.
//!
//! [`MarkdownRenderer`] walks a tree depth-first, classifies each node into
//! a [`Role`] and appends its Markdown to an output buffer. Block roles
//! always start on a fresh line and end with a blank line; inline roles add
//! no surrounding newlines. Redundant blank lines are left for the final
//! normalization pass.

mod block;
mod inline;
mod list;
mod table;

pub(crate) use block::quote_lines;

use crate::error::Result;
use crate::model::{validate_node, DocumentNode, NodeKind};

use super::classify::{classify, Role};
use super::{RenderContext, RenderOptions, RenderStats};

/// Render a single tree to Markdown with a fresh context.
///
/// The tree is validated first; the returned fragment is not normalized.
pub fn render_node(node: &DocumentNode, options: &RenderOptions) -> Result<String> {
    let mut renderer = MarkdownRenderer::new(options.clone());
    renderer.render_root(node)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Options this renderer was created with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Statistics gathered so far (empty unless `collect_stats` is set).
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Take the gathered statistics, resetting them.
    pub fn take_stats(&mut self) -> RenderStats {
        std::mem::take(&mut self.stats)
    }

    /// Validate a tree and render it with a fresh context.
    pub fn render_root(&mut self, node: &DocumentNode) -> Result<String> {
        validate_node(node, self.options.max_depth)?;
        Ok(self.render_with_context(node, RenderContext::new()))
    }

    /// Render a tree that has already been validated.
    pub fn render_with_context(&mut self, node: &DocumentNode, ctx: RenderContext) -> String {
        let mut output = String::new();
        self.render_node(&mut output, node, None, ctx);
        output
    }

    fn render_node(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        parent: Option<&NodeKind>,
        ctx: RenderContext,
    ) {
        match classify(node, parent) {
            Role::Text => self.render_text(output, node, ctx),
            Role::Paragraph => self.render_paragraph(output, node, ctx),
            Role::Heading(level) => self.render_heading(output, node, level, ctx),
            Role::Strong => self.render_delimited(output, node, "**", ctx),
            Role::Emphasis => self.render_delimited(output, node, "*", ctx),
            Role::InlineCode => self.render_inline_code(output, node, ctx),
            Role::CodeBlock => self.render_code_block(output, node, ctx),
            Role::List { ordered } => self.render_list(output, node, ordered, ctx),
            Role::ListItem => self.render_children(output, node, ctx),
            Role::Link => self.render_link(output, node, ctx),
            Role::Blockquote => self.render_blockquote(output, node, ctx),
            Role::LineBreak => output.push('\n'),
            Role::HorizontalRule => self.render_horizontal_rule(output),
            Role::Table => self.render_table(output, node, ctx),
            Role::ImageContainer => self.render_image_container(output, node),
            Role::Image => self.render_image(output, node),
            Role::Other => {
                if let NodeKind::Other(ref name) = node.kind {
                    log::debug!("no dedicated rendering for <{}>, concatenating children", name);
                    self.count(|s| s.fallback_count += 1);
                }
                self.render_children(output, node, ctx);
            }
        }
    }

    fn render_children(&mut self, output: &mut String, node: &DocumentNode, ctx: RenderContext) {
        for child in &node.children {
            self.render_node(output, child, Some(&node.kind), ctx);
        }
    }

    fn count(&mut self, update: impl FnOnce(&mut RenderStats)) {
        if self.options.collect_stats {
            update(&mut self.stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn render(node: &DocumentNode) -> String {
        render_node(node, &RenderOptions::default()).unwrap()
    }

    pub(super) fn el(kind: NodeKind, children: Vec<DocumentNode>) -> DocumentNode {
        DocumentNode::element(kind).with_children(children)
    }

    pub(super) fn txt(text: &str) -> DocumentNode {
        DocumentNode::text(text)
    }

    #[test]
    fn test_unknown_kind_concatenates_children() {
        let node = DocumentNode::element("section")
            .with_child(txt("Hello "))
            .with_child(DocumentNode::element("span").with_child(txt("world")));
        assert_eq!(render(&node), "Hello world");
    }

    #[test]
    fn test_render_is_deterministic() {
        let node = el(
            NodeKind::Paragraph,
            vec![txt("a "), el(NodeKind::Strong, vec![txt("b")])],
        );
        assert_eq!(render(&node), render(&node));
    }

    #[test]
    fn test_structural_violation_surfaces() {
        let node = el(NodeKind::Paragraph, vec![txt("x").with_child(txt("y"))]);
        let err = render_node(&node, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, crate::Error::StructuralViolation(_)));
    }

    #[test]
    fn test_fallback_counted() {
        let options = RenderOptions::default().with_stats(true);
        let mut renderer = MarkdownRenderer::new(options);
        let node = DocumentNode::element("div").with_child(DocumentNode::paragraph("x"));
        renderer.render_root(&node).unwrap();
        assert_eq!(renderer.stats().fallback_count, 1);
        assert_eq!(renderer.stats().paragraph_count, 1);
    }
}
