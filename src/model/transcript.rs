//! Transcript-level types.

use super::DocumentNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One labelled part of a conversation: a system prompt, a message, a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Speaker or role label (e.g. "user message"); empty inherits the previous label
    #[serde(default)]
    pub label: String,

    /// Root of the section's content, if the scraper found any
    #[serde(default)]
    pub root: Option<DocumentNode>,

    /// Display timestamp as shown by the source site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Section {
    /// Create a section with content.
    pub fn new(label: impl Into<String>, root: DocumentNode) -> Self {
        Self {
            label: label.into(),
            root: Some(root),
            timestamp: None,
        }
    }

    /// Create a section whose content was not found.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            root: None,
            timestamp: None,
        }
    }

    /// Set the timestamp and return self.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// A scraped conversation: metadata plus ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Transcript metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Sections in conversation order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transcript from sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self {
            metadata: Metadata::default(),
            sections,
        }
    }

    /// Add a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if the transcript has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Transcript metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Conversation title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Source site or exporter name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Time of export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref source) = self.source {
            lines.push(format!("source: \"{}\"", escape_yaml(source)));
        }
        if let Some(ref exported_at) = self.exported_at {
            lines.push(format!("exported: {}", exported_at.to_rfc3339()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_transcript_new() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.section_count(), 0);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            title: Some("Rust \"lifetimes\"".to_string()),
            source: Some("claude".to_string()),
            exported_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()),
        };

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Rust \\\"lifetimes\\\"\""));
        assert!(yaml.contains("source: \"claude\""));
        assert!(yaml.contains("exported: 2024-05-01T12:00:00+00:00"));
        assert!(yaml.ends_with("---\n"));
    }

    #[test]
    fn test_section_deserialize_defaults() {
        let section: Section = serde_json::from_str(r#"{"label": "user message"}"#).unwrap();
        assert_eq!(section.label, "user message");
        assert!(section.root.is_none());
        assert!(section.timestamp.is_none());
    }
}
