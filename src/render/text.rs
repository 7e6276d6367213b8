//! Plain text rendering for transcripts.

use crate::error::Result;
use crate::model::{validate_sections, Transcript};

use super::assemble::{section_labels, select_sections};
use super::cleanup::{decode_entities, normalize};
use super::{CleanupPipeline, RenderOptions};

/// Convert a transcript to plain text with `-- label` section markers.
///
/// Markup is dropped; block boundaries become line breaks and table cells
/// are separated by tabs.
pub fn to_text(transcript: &Transcript, options: &RenderOptions) -> Result<String> {
    validate_sections(&transcript.sections, options.max_depth)?;

    let sections = select_sections(&transcript.sections, options.max_sections);
    let labels = section_labels(sections, &options.default_label);
    let mut output = String::new();

    for (section, label) in sections.iter().zip(&labels) {
        let Some(root) = &section.root else {
            continue;
        };
        let mut body = root.plain_text();
        if options.decode_entities {
            body = decode_entities(&body);
        }
        let body = body.trim();
        if body.is_empty() {
            continue;
        }
        output.push_str(&format!("-- {}\n{}\n\n", label, body));
    }

    let text = match &options.cleanup {
        Some(cleanup) => CleanupPipeline::new(cleanup.clone()).process(&output),
        None => normalize(&output),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentNode, NodeKind, Section};

    #[test]
    fn test_to_text() {
        let root = DocumentNode::element("div")
            .with_child(DocumentNode::paragraph("Hello, world!"))
            .with_child(
                DocumentNode::element(NodeKind::Strong).with_child(DocumentNode::text("Bold")),
            );
        let transcript = Transcript::from_sections(vec![
            Section::new("User", root),
            Section::empty("Assistant"),
            Section::new("", DocumentNode::paragraph("Second")),
        ]);

        let result = to_text(&transcript, &RenderOptions::default()).unwrap();
        assert_eq!(result, "-- User\nHello, world!\nBold\n\n-- Assistant\nSecond");
    }

    #[test]
    fn test_to_text_empty() {
        let result = to_text(&Transcript::new(), &RenderOptions::default()).unwrap();
        assert_eq!(result, "");
    }
}
