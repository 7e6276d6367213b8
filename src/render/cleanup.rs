//! Whitespace normalization and the optional cleanup pipeline.
//!
//! [`normalize`] is the final pass over every assembled transcript. The
//! [`CleanupPipeline`] adds optional character-level fixes in front of it.
//! Every step is idempotent, so running the pipeline twice changes nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

/// Collapse runs of three or more newlines to a single blank line and trim.
pub fn normalize(text: &str) -> String {
    EXCESS_NEWLINES
        .replace_all(text, "\n\n")
        .trim()
        .to_string()
}

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization only
    Minimal,
    /// Standard cleanup: NFC + replacement characters + trailing whitespace
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Strip spaces and tabs at the end of every line
    pub strip_trailing_whitespace: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: false,
            strip_trailing_whitespace: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            strip_trailing_whitespace: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline ending in [`normalize`].
#[derive(Debug, Clone, Default)]
pub struct CleanupPipeline {
    options: CleanupOptions,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        // Must run before newline collapsing so whitespace-only lines count as blank
        if self.options.strip_trailing_whitespace {
            result = TRAILING_WHITESPACE.replace_all(&result, "").to_string();
        }

        normalize(&result)
    }
}

/// Decode the HTML entities scrapers commonly leave in text.
///
/// `&amp;` is decoded last so that `&amp;lt;` yields `&lt;`, not `<`.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_blank_lines() {
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("\n\n  hello \n\n\n"), "hello");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("\n\n\n"), "");
    }

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let result = pipeline.process("cafe\u{301}");
        assert_eq!(result, "caf\u{e9}");
    }

    #[test]
    fn test_remove_replacement_char() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("Hello\u{FFFD}World"), "HelloWorld");
    }

    #[test]
    fn test_whitespace_only_lines_collapse() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("a  \n \t\n\n  \nb"), "a\n\nb");
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let pipeline = CleanupPipeline::default();
        let once = pipeline.process("x \n\n\n\ny\u{FFFD}  \n");
        assert_eq!(pipeline.process(&once), once);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a&nbsp;&lt;b&gt;"), "a <b>");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("plain"), "plain");
    }
}
