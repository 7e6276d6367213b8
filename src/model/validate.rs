//! Structural validation of document trees.
//!
//! Trees are owned (`Vec` children), so cycles cannot occur. What can still
//! go wrong is a scraper emitting text nodes with children, heading levels
//! outside 1-6, or unbounded nesting. These are reported as
//! [`Error::StructuralViolation`] with the path of the offending node.

use super::{DocumentNode, NodeKind, Section};
use crate::error::{Error, Result};

/// Default maximum nesting depth accepted by the renderer.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Validate a single tree.
pub fn validate_node(node: &DocumentNode, max_depth: usize) -> Result<()> {
    let mut path = Vec::new();
    check(node, &mut path, max_depth).map_err(|reason| {
        Error::StructuralViolation(format!("{}: {}", format_path(&path), reason))
    })
}

/// Validate every section root, prefixing errors with the 1-based section number.
pub fn validate_sections(sections: &[Section], max_depth: usize) -> Result<()> {
    for (index, section) in sections.iter().enumerate() {
        if let Some(ref root) = section.root {
            validate_node(root, max_depth).map_err(|err| match err {
                Error::StructuralViolation(msg) => {
                    Error::StructuralViolation(format!("section {}: {}", index + 1, msg))
                }
                other => other,
            })?;
        }
    }
    Ok(())
}

fn check(node: &DocumentNode, path: &mut Vec<usize>, max_depth: usize) -> std::result::Result<(), String> {
    if path.len() > max_depth {
        return Err(format!("nesting exceeds {} levels", max_depth));
    }

    match node.kind {
        NodeKind::Text if !node.children.is_empty() => {
            let n = node.children.len();
            return Err(format!(
                "text node has {} {}",
                n,
                if n == 1 { "child" } else { "children" }
            ));
        }
        NodeKind::Heading(level) if !(1..=6).contains(&level) => {
            return Err(format!("heading level {} is outside 1-6", level));
        }
        _ => {}
    }

    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        check(child, path, max_depth)?;
        path.pop();
    }
    Ok(())
}

fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter().map(|i| format!("/{}", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tree() {
        let node = DocumentNode::element("div")
            .with_child(DocumentNode::paragraph("Hello"))
            .with_child(DocumentNode::heading(2, "Title"));
        assert!(validate_node(&node, DEFAULT_MAX_DEPTH).is_ok());
    }

    #[test]
    fn test_text_node_with_children() {
        let bad = DocumentNode::text("oops").with_child(DocumentNode::text("child"));
        let node = DocumentNode::element("div")
            .with_child(DocumentNode::paragraph("fine"))
            .with_child(DocumentNode::element(NodeKind::Paragraph).with_child(bad));

        let err = validate_node(&node, DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Structural violation: /1/0: text node has 1 child"
        );
    }

    #[test]
    fn test_heading_level_out_of_range() {
        let node = DocumentNode::element(NodeKind::Heading(9));
        let err = validate_node(&node, DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(err.to_string().contains("heading level 9"));
    }

    #[test]
    fn test_depth_limit() {
        let mut node = DocumentNode::text("deep");
        for _ in 0..10 {
            node = DocumentNode::element(NodeKind::Blockquote).with_child(node);
        }
        assert!(validate_node(&node, 10).is_ok());
        let err = validate_node(&node, 9).unwrap_err();
        assert!(err.to_string().contains("nesting exceeds 9 levels"));
    }

    #[test]
    fn test_sections_report_index() {
        let sections = vec![
            Section::new("user message", DocumentNode::paragraph("ok")),
            Section::empty("assistant message"),
            Section::new(
                "assistant message",
                DocumentNode::text("x").with_child(DocumentNode::text("y")),
            ),
        ];
        let err = validate_sections(&sections, DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, Error::StructuralViolation(_)));
        assert!(err.to_string().contains("section 3: /: text node"));
    }
}
