//! Pipe tables.

use super::block::start_block;
use super::MarkdownRenderer;
use crate::model::{DocumentNode, NodeKind};
use crate::render::RenderContext;

impl MarkdownRenderer {
    pub(super) fn render_table(&mut self, output: &mut String, node: &DocumentNode, ctx: RenderContext) {
        let rows = collect_rows(node);
        let mut lines = Vec::new();
        let mut body = rows.as_slice();

        if let Some(first) = rows.first() {
            let headers: Vec<&DocumentNode> = first
                .children
                .iter()
                .filter(|c| c.kind == NodeKind::TableHeaderCell)
                .collect();
            if !headers.is_empty() {
                lines.push(self.pipe_row(&headers, ctx));
                lines.push(format!("|{}", " --- |".repeat(headers.len())));
                body = &rows[1..];
            }
        }

        for row in body {
            let cells: Vec<&DocumentNode> = row
                .children
                .iter()
                .filter(|c| c.kind.is_table_cell())
                .collect();
            if cells.is_empty() {
                continue;
            }
            lines.push(self.pipe_row(&cells, ctx));
        }

        if lines.is_empty() {
            log::debug!("table without cells, nothing to render");
            return;
        }

        self.count(|s| s.table_count += 1);
        start_block(output);
        output.push_str(&lines.join("\n"));
        output.push_str("\n\n");
    }

    fn pipe_row(&mut self, cells: &[&DocumentNode], ctx: RenderContext) -> String {
        let mut line = String::from("|");
        for cell in cells {
            let mut content = String::new();
            self.render_children(&mut content, cell, ctx);
            let content = content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(&format!(" {} |", escape_pipes(&content)));
        }
        line
    }
}

/// Rows of this table, looking through section wrappers but not into
/// nested tables.
fn collect_rows(table: &DocumentNode) -> Vec<&DocumentNode> {
    let mut rows = Vec::new();
    for child in &table.children {
        match child.kind {
            NodeKind::TableRow => rows.push(child),
            NodeKind::Table | NodeKind::Text => {}
            _ => rows.extend(collect_rows(child)),
        }
    }
    rows
}

/// Escape `|` unless it is already escaped.
fn escape_pipes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if c == '|' && !escaped {
            result.push('\\');
        }
        escaped = c == '\\' && !escaped;
        result.push(c);
    }
    result
}
