//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a transcript, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Transcript metadata (copied from the source transcript)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,

    /// Filename the export profile suggests for saving the content
    pub suggested_filename: String,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(
        content: String,
        metadata: Metadata,
        stats: RenderStats,
        suggested_filename: String,
    ) -> Self {
        Self {
            content,
            metadata,
            stats,
            suggested_filename,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Sections that produced output
    pub section_count: u32,

    /// Sections skipped because they had no root or rendered empty
    pub skipped_section_count: u32,

    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of tables rendered
    pub table_count: u32,

    /// Number of fenced code blocks rendered
    pub code_block_count: u32,

    /// Number of image placeholders rendered
    pub image_count: u32,

    /// Number of links rendered
    pub link_count: u32,

    /// Nodes of unknown kind rendered through the fallback
    pub fallback_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.section_count += other.section_count;
        self.skipped_section_count += other.skipped_section_count;
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
        self.table_count += other.table_count;
        self.code_block_count += other.code_block_count;
        self.image_count += other.image_count;
        self.link_count += other.link_count;
        self.fallback_count += other.fallback_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_stats_merge() {
        let mut stats1 = RenderStats {
            paragraph_count: 5,
            table_count: 2,
            ..Default::default()
        };
        let stats2 = RenderStats {
            paragraph_count: 3,
            table_count: 1,
            code_block_count: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.paragraph_count, 8);
        assert_eq!(stats1.table_count, 3);
        assert_eq!(stats1.code_block_count, 4);
    }
}
