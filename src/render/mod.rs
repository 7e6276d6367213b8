//! Rendering of transcripts to Markdown, plain text and JSON.

mod assemble;
mod classify;
mod cleanup;
mod context;
mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use assemble::{assemble, to_markdown, to_markdown_with_stats, Assembler};
pub use classify::{classify, Role};
pub use cleanup::{normalize, CleanupOptions, CleanupPipeline, CleanupPreset};
pub use context::RenderContext;
pub use json::{to_json, JsonFormat};
pub use markdown::{render_node, MarkdownRenderer};
pub use options::{ExportProfile, LabelStyle, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;
