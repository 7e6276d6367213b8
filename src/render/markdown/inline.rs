//! Inline roles: text, emphasis, code spans, links and image placeholders.

use std::borrow::Cow;

use super::MarkdownRenderer;
use crate::model::DocumentNode;
use crate::render::cleanup::decode_entities;
use crate::render::RenderContext;

impl MarkdownRenderer {
    pub(super) fn render_text(&mut self, output: &mut String, node: &DocumentNode, ctx: RenderContext) {
        let text = node.text.as_deref().unwrap_or_default();

        // Source indentation between blocks carries no content.
        if !ctx.in_preformatted
            && text.contains('\n')
            && text.trim().is_empty()
            && (output.is_empty() || output.ends_with('\n'))
        {
            return;
        }

        let text = self.decoded(text);
        if self.options.escape_special_chars && !ctx.in_preformatted {
            output.push_str(&escape_markdown(&text));
        } else {
            output.push_str(&text);
        }
    }

    /// Wrap the rendered children in `delimiter`. Surrounding whitespace is
    /// moved outside the delimiters and empty content emits nothing.
    pub(super) fn render_delimited(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        delimiter: &str,
        ctx: RenderContext,
    ) {
        let mut inner = String::new();
        self.render_children(&mut inner, node, ctx);

        let trimmed = inner.trim();
        if trimmed.is_empty() {
            return;
        }

        let leading = &inner[..inner.len() - inner.trim_start().len()];
        let trailing = &inner[inner.trim_end().len()..];
        output.push_str(leading);
        output.push_str(delimiter);
        output.push_str(trimmed);
        output.push_str(delimiter);
        output.push_str(trailing);
    }

    pub(super) fn render_inline_code(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        ctx: RenderContext,
    ) {
        let code = self.source_text(node);
        // Inside a code block the fence comes from the block. Reached through
        // `render_with_context` since code blocks read their code node directly.
        if ctx.in_preformatted {
            output.push_str(&code);
            return;
        }
        if code.is_empty() {
            return;
        }

        let fence = "`".repeat(longest_backtick_run(&code) + 1);
        let pad = if code.starts_with('`') || code.ends_with('`') {
            " "
        } else {
            ""
        };
        output.push_str(&format!("{fence}{pad}{code}{pad}{fence}"));
    }

    pub(super) fn render_link(&mut self, output: &mut String, node: &DocumentNode, ctx: RenderContext) {
        let mut text = String::new();
        self.render_children(&mut text, node, ctx);

        match node.attr("href").map(str::trim).filter(|href| !href.is_empty()) {
            Some(href) => {
                self.count(|s| s.link_count += 1);
                output.push_str(&format!("[{}]({})", text, href));
            }
            None => output.push_str(&text),
        }
    }

    /// A bare image is an inline emoji: `:<alt>:`, or nothing without alt text.
    pub(super) fn render_image(&mut self, output: &mut String, node: &DocumentNode) {
        if let Some(name) = emoji_name(node) {
            self.count(|s| s.image_count += 1);
            output.push(':');
            output.push_str(name);
            output.push(':');
        }
    }

    /// Descendant text with entities decoded when enabled.
    pub(super) fn source_text(&self, node: &DocumentNode) -> String {
        let text = node.text_content();
        if self.options.decode_entities {
            decode_entities(&text)
        } else {
            text
        }
    }

    fn decoded<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.decode_entities {
            Cow::Owned(decode_entities(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// `[Uploaded <name>]` for an image, naming it by its alt text.
pub(super) fn image_placeholder(image: &DocumentNode) -> String {
    let alt = image.attr("alt").map(str::trim).unwrap_or_default();
    let name = alt.strip_prefix("Uploaded ").unwrap_or(alt).trim();
    let name = if name.is_empty() { "image" } else { name };
    format!("[Uploaded {}]", name)
}

fn emoji_name(image: &DocumentNode) -> Option<&str> {
    image
        .attr("alt")
        .map(|alt| alt.trim().trim_matches(':'))
        .filter(|name| !name.is_empty())
}

/// Length of the longest run of consecutive backticks.
pub(super) fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Escape special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '|') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
