//! JSON serialization of transcripts.

use crate::error::{Error, Result};
use crate::model::Transcript;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a transcript to JSON.
///
/// The output uses the same shape the loader accepts, so it can be fed
/// back through [`crate::parse_str`].
pub fn to_json(transcript: &Transcript, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(transcript),
        JsonFormat::Compact => serde_json::to_string(transcript),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
