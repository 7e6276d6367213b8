//! # chatdown
//!
//! Render scraped chat transcripts as clean Markdown.
//!
//! A transcript is an ordered list of labelled sections (system prompt,
//! user message, assistant response), each holding a small document tree
//! captured from a chat web page. This library turns those trees into
//! Markdown, labels and joins the sections, and normalizes the whitespace.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chatdown::{parse_file, render};
//!
//! fn main() -> chatdown::Result<()> {
//!     let transcript = parse_file("conversation.json")?;
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&transcript, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Export profiles**: console, Claude, ChatGPT and Slack layouts
//! - **Structure preservation**: headings, lists, tables, code fences, quotes
//! - **Best-effort rendering**: unknown nodes fall back to their text
//! - **Cleanup pipeline**: Unicode normalization and whitespace fixes

pub mod error;
pub mod model;
pub mod render;

pub use error::{Error, Result};
pub use model::{DocumentNode, Metadata, NodeKind, Section, Transcript};
pub use render::{
    CleanupOptions, CleanupPreset, ExportProfile, JsonFormat, LabelStyle, RenderOptions,
    RenderResult, RenderStats,
};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use model::{validate_sections, DEFAULT_MAX_DEPTH};

/// Parse a transcript from a JSON string.
///
/// The trees are validated, so a text node carrying children or runaway
/// nesting is reported here rather than at render time.
///
/// # Example
///
/// ```
/// use chatdown::parse_str;
///
/// let json = r#"{"sections": [{"label": "user", "root": {"kind": "p",
///     "children": [{"kind": "text", "text": "Hi"}]}}]}"#;
/// let transcript = parse_str(json).unwrap();
/// assert_eq!(transcript.section_count(), 1);
/// ```
pub fn parse_str(json: &str) -> Result<Transcript> {
    let transcript: Transcript = serde_json::from_str(json)?;
    validate_sections(&transcript.sections, DEFAULT_MAX_DEPTH)?;
    Ok(transcript)
}

/// Parse a transcript from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Transcript> {
    let transcript: Transcript = serde_json::from_reader(reader)?;
    validate_sections(&transcript.sections, DEFAULT_MAX_DEPTH)?;
    Ok(transcript)
}

/// Parse a transcript from a JSON file.
///
/// # Example
///
/// ```no_run
/// use chatdown::parse_file;
///
/// let transcript = parse_file("conversation.json").unwrap();
/// println!("Sections: {}", transcript.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Transcript> {
    let path = path.as_ref();
    log::debug!("loading transcript from {}", path.display());
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Extract plain text from a transcript file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let transcript = parse_file(path)?;
    render::to_text(&transcript, &RenderOptions::default())
}

/// Convert a transcript file to Markdown.
///
/// # Example
///
/// ```no_run
/// use chatdown::to_markdown;
///
/// let markdown = to_markdown("conversation.json").unwrap();
/// std::fs::write("prompt_export.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let transcript = parse_file(path)?;
    render::to_markdown(&transcript, &RenderOptions::default())
}

/// Convert a transcript file to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use chatdown::{to_markdown_with_options, ExportProfile, RenderOptions};
///
/// let options = RenderOptions::from_profile(ExportProfile::ChatGpt)
///     .with_frontmatter(true);
/// let markdown = to_markdown_with_options("conversation.json", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let transcript = parse_file(path)?;
    render::to_markdown(&transcript, options)
}

/// Builder for loading and rendering transcripts.
///
/// # Example
///
/// ```no_run
/// use chatdown::{Chatdown, ExportProfile};
///
/// let markdown = Chatdown::new()
///     .with_profile(ExportProfile::Claude)
///     .with_frontmatter()
///     .load("conversation.json")?
///     .to_markdown()?;
/// # Ok::<(), chatdown::Error>(())
/// ```
pub struct Chatdown {
    render_options: RenderOptions,
}

impl Chatdown {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
        }
    }

    /// Apply an export profile.
    pub fn with_profile(mut self, profile: ExportProfile) -> Self {
        self.render_options = self.render_options.with_profile(profile);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Escape Markdown special characters in text.
    pub fn escape_markdown(mut self) -> Self {
        self.render_options = self.render_options.with_escaping(true);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Keep only the last `count` sections.
    pub fn last_sections(mut self, count: usize) -> Self {
        self.render_options = self.render_options.with_max_sections(count);
        self
    }

    /// Use fully custom render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Load a transcript file and return a result wrapper.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<ChatdownResult> {
        let transcript = parse_file(path)?;
        Ok(self.wrap(transcript))
    }

    /// Load a transcript from a JSON string.
    pub fn load_str(self, json: &str) -> Result<ChatdownResult> {
        let transcript = parse_str(json)?;
        Ok(self.wrap(transcript))
    }

    fn wrap(self, transcript: Transcript) -> ChatdownResult {
        ChatdownResult {
            transcript,
            render_options: self.render_options,
        }
    }
}

impl Default for Chatdown {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded transcript with the options to render it.
pub struct ChatdownResult {
    /// The loaded transcript
    pub transcript: Transcript,
    render_options: RenderOptions,
}

impl ChatdownResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.transcript, &self.render_options)
    }

    /// Convert to Markdown, collecting statistics.
    pub fn to_markdown_with_stats(&self) -> Result<RenderResult> {
        render::to_markdown_with_stats(&self.transcript, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.transcript, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.transcript, format)
    }

    /// Filename the configured profile suggests for the Markdown output.
    pub fn suggested_filename(&self) -> String {
        self.render_options
            .suggested_filename(self.transcript.metadata.exported_at)
    }

    /// Get the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
