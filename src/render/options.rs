//! Rendering options and configuration.

use super::CleanupOptions;
use crate::model::DEFAULT_MAX_DEPTH;
use chrono::{DateTime, Utc};

/// Options for rendering a transcript.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Exporter layout this configuration was derived from
    pub profile: ExportProfile,

    /// How section labels are written
    pub label_style: LabelStyle,

    /// Emit a `# Title (timestamp)` header before the first section
    pub include_header: bool,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Escape special Markdown characters in text nodes
    pub escape_special_chars: bool,

    /// Decode common HTML entities left in text nodes
    pub decode_entities: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Keep only the last N sections
    pub max_sections: Option<usize>,

    /// Label used when the first sections carry no label
    pub default_label: String,

    /// Maximum tree depth accepted before reporting a structural violation
    pub max_depth: usize,

    /// Text cleanup applied before whitespace normalization
    pub cleanup: Option<CleanupOptions>,

    /// Collect rendering statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from an export profile.
    pub fn from_profile(profile: ExportProfile) -> Self {
        Self::default().with_profile(profile)
    }

    /// Apply an export profile's label style, header and section limit.
    pub fn with_profile(mut self, profile: ExportProfile) -> Self {
        self.profile = profile;
        self.label_style = profile.label_style();
        self.include_header = profile == ExportProfile::ChatGpt;
        self.max_sections = profile.max_sections();
        self.default_label = profile.default_label().to_string();
        self
    }

    /// Set the label style.
    pub fn with_label_style(mut self, style: LabelStyle) -> Self {
        self.label_style = style;
        self
    }

    /// Enable or disable the export header.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable Markdown escaping of text.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable HTML entity decoding of text.
    pub fn with_entity_decoding(mut self, decode: bool) -> Self {
        self.decode_entities = decode;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Keep only the last `count` sections.
    pub fn with_max_sections(mut self, count: usize) -> Self {
        self.max_sections = Some(count);
        self
    }

    /// Set the label for leading unlabelled sections.
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Set the maximum accepted tree depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: super::CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Suggested output filename for the configured profile.
    pub fn suggested_filename(&self, exported_at: Option<DateTime<Utc>>) -> String {
        self.profile.suggested_filename(exported_at)
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            profile: ExportProfile::Console,
            label_style: LabelStyle::Dashed,
            include_header: false,
            include_frontmatter: false,
            escape_special_chars: false,
            decode_entities: false,
            max_heading_level: 6,
            max_sections: None,
            default_label: ExportProfile::Console.default_label().to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            cleanup: None,
            collect_stats: false,
        }
    }
}

/// How each section's speaker label is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelStyle {
    /// `-- label` on its own line above the body
    #[default]
    Dashed,
    /// `**label**: ` inline before the body
    Bold,
    /// `### label (Message N)` heading, sections separated by `---`
    Heading,
    /// `**label**:` line followed by the body as a blockquote
    Quoted,
}

/// Presets matching the layout of the common chat exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportProfile {
    /// Prompt console export: dashed labels
    #[default]
    Console,
    /// Claude chat export: bold speaker prefix
    Claude,
    /// ChatGPT export: numbered message headings under a dated header
    ChatGpt,
    /// Slack DM export: quoted messages, last 100 only
    Slack,
}

impl ExportProfile {
    /// Label style used by this profile.
    pub fn label_style(&self) -> LabelStyle {
        match self {
            ExportProfile::Console => LabelStyle::Dashed,
            ExportProfile::Claude => LabelStyle::Bold,
            ExportProfile::ChatGpt => LabelStyle::Heading,
            ExportProfile::Slack => LabelStyle::Quoted,
        }
    }

    /// Section limit used by this profile.
    pub fn max_sections(&self) -> Option<usize> {
        match self {
            ExportProfile::Slack => Some(100),
            _ => None,
        }
    }

    /// Label for leading sections that carry none.
    pub fn default_label(&self) -> &'static str {
        match self {
            ExportProfile::Slack => "Unknown User",
            _ => "Unknown",
        }
    }

    /// Suggested output filename.
    pub fn suggested_filename(&self, exported_at: Option<DateTime<Utc>>) -> String {
        match self {
            ExportProfile::Console => "prompt_export.md".to_string(),
            ExportProfile::Claude => "claude-chat.md".to_string(),
            ExportProfile::ChatGpt => match exported_at {
                Some(at) => format!("chat-export-{}.md", at.format("%Y-%m-%d")),
                None => "chat-export.md".to_string(),
            },
            ExportProfile::Slack => "Slack_DM_History.md".to_string(),
        }
    }

    /// Parse a profile name (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "console" | "anthropic-console" => Ok(ExportProfile::Console),
            "claude" => Ok(ExportProfile::Claude),
            "chatgpt" | "gpt" => Ok(ExportProfile::ChatGpt),
            "slack" => Ok(ExportProfile::Slack),
            other => Err(format!("Unknown export profile: {}", other)),
        }
    }
}
