//! Ordered and bulleted lists.

use super::block::{start_block, trim_block};
use super::MarkdownRenderer;
use crate::model::{DocumentNode, NodeKind};
use crate::render::RenderContext;

impl MarkdownRenderer {
    pub(super) fn render_list(
        &mut self,
        output: &mut String,
        node: &DocumentNode,
        ordered: bool,
        ctx: RenderContext,
    ) {
        let list_ctx = ctx.enter_list();
        let mut items = Vec::new();

        for (index, child) in node.children.iter().filter(|c| !c.is_blank()).enumerate() {
            let item_ctx = list_ctx.with_ordinal(ordered.then_some(index + 1));
            let marker = match item_ctx.ordinal {
                Some(n) => format!("{}. ", n),
                None => "* ".to_string(),
            };

            let mut content = String::new();
            if child.kind == NodeKind::ListItem {
                self.render_children(&mut content, child, item_ctx);
            } else {
                log::trace!("list child <{}> is not an item, rendering it as one", child.kind);
                self.render_node(&mut content, child, Some(&node.kind), item_ctx);
            }

            self.count(|s| s.list_item_count += 1);
            items.push(format_item(&marker, trim_block(&content)));
        }

        if items.is_empty() {
            return;
        }

        start_block(output);
        output.push_str(&items.join("\n"));
        output.push_str("\n\n");
    }
}

/// Prefix the first line with the marker and indent continuation lines by
/// the marker's width.
fn format_item(marker: &str, content: &str) -> String {
    let indent = " ".repeat(marker.len());
    let mut item = String::from(marker);
    for (i, line) in content.lines().enumerate() {
        if i > 0 {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(&indent);
            }
        }
        item.push_str(line);
    }
    item
}
