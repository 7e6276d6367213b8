//! Block roles: paragraphs, headings, code blocks, quotes, rules and images.

use super::inline::{image_placeholder, longest_backtick_run};
use super::MarkdownRenderer;
use crate::model::DocumentNode;
use crate::render::classify::{code_body, code_language, find_image};
use crate::render::RenderContext;

impl MarkdownRenderer {
    pub(super) fn render_paragraph(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        ctx: RenderContext,
    ) {
        self.count(|s| s.paragraph_count += 1);
        start_block(output);
        self.render_children(output, node, ctx);
        output.push_str("\n\n");
    }

    pub(super) fn render_heading(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        level: u8,
        ctx: RenderContext,
    ) {
        self.count(|s| s.heading_count += 1);
        let level = level.min(self.options.max_heading_level).max(1);

        let mut text = String::new();
        self.render_children(&mut text, node, ctx);

        start_block(output);
        output.push_str(&"#".repeat(level as usize));
        output.push(' ');
        output.push_str(text.trim());
        output.push_str("\n\n");
    }

    pub(super) fn render_code_block(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        ctx: RenderContext,
    ) {
        start_block(output);

        let code = match code_body(node) {
            Some(code) => code,
            None => {
                log::debug!("code block without a code element, rendering as plain text");
                let mut inner = String::new();
                self.render_children(&mut inner, node, ctx.preformatted());
                output.push_str(trim_block(&inner));
                output.push_str("\n\n");
                return;
            }
        };

        self.count(|s| s.code_block_count += 1);
        let text = self.source_text(code);
        let text = trim_block(&text);
        let language = code_language(code).unwrap_or_default();
        let fence = "`".repeat(longest_backtick_run(text).max(2) + 1);

        output.push_str(&fence);
        output.push_str(language);
        output.push('\n');
        if !text.is_empty() {
            output.push_str(text);
            output.push('\n');
        }
        output.push_str(&fence);
        output.push_str("\n\n");
    }

    pub(super) fn render_blockquote(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        ctx: RenderContext,
    ) {
        let mut inner = String::new();
        self.render_children(&mut inner, node, ctx);
        let inner = trim_block(&inner);
        if inner.is_empty() {
            return;
        }

        start_block(output);
        output.push_str(&quote_lines(inner));
        output.push_str("\n\n");
    }

    pub(super) fn render_horizontal_rule(&mut self, output: &mut String) {
        // Directly under a line of text `---` would read as a setext underline.
        if !output.is_empty() && !output.ends_with("\n\n") {
            output.push_str(if output.ends_with('\n') { "\n" } else { "\n\n" });
        }
        output.push_str("---\n\n");
    }

    pub(super) fn render_image_container(&mut self, output: &mut String, node: &DocumentNode) {
        if let Some(image) = find_image(node) {
            self.count(|s| s.image_count += 1);
            start_block(output);
            output.push_str(&image_placeholder(image));
            output.push_str("\n\n");
        }
    }
}

/// Begin a block on a fresh line.
pub(super) fn start_block(output: &mut String) {
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
}

/// Strip leading blank lines and trailing whitespace, keeping the
/// indentation of the first content line.
pub(crate) fn trim_block(text: &str) -> &str {
    let text = text.trim_end();
    let content_start = text.len() - text.trim_start().len();
    let line_start = text[..content_start].rfind('\n').map_or(0, |i| i + 1);
    &text[line_start..]
}

/// Prefix every line with `> `; blank lines become a bare `>`.
pub(crate) fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
