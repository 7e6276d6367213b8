//! Loading transcripts from files and readers.

use std::fs;

use chatdown::{
    extract_text, parse_file, to_markdown, to_markdown_with_options, Chatdown, Error,
    ExportProfile, JsonFormat, RenderOptions,
};
use tempfile::TempDir;

const TRANSCRIPT: &str = r#"{
    "metadata": {"title": "Pairing session", "source": "console"},
    "sections": [
        {"label": "system prompt", "root": {"kind": "p", "children": [{"kind": "text", "text": "Be brief."}]}},
        {"label": "user message", "root": {"kind": "div", "children": [
            {"kind": "p", "children": [{"kind": "text", "text": "Show a loop"}]}
        ]}},
        {"label": "assistant response", "root": {"kind": "div", "children": [
            {"kind": "pre", "children": [
                {"kind": "code", "attributes": {"class": "language-rust"},
                 "children": [{"kind": "text", "text": "for i in 0..3 {}\n"}]}
            ]}
        ]}},
        {"label": "user message"}
    ]
}"#;

fn write_transcript(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("transcript.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_file() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, TRANSCRIPT);

    let transcript = parse_file(&path).unwrap();
    assert_eq!(transcript.section_count(), 4);
    assert!(transcript.sections[3].root.is_none());
}

#[test]
fn test_to_markdown_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, TRANSCRIPT);

    let markdown = to_markdown(&path).unwrap();
    assert_eq!(
        markdown,
        "-- system prompt\nBe brief.\n\n\
         -- user message\nShow a loop\n\n\
         -- assistant response\n```rust\nfor i in 0..3 {}\n```"
    );
}

#[test]
fn test_to_markdown_with_frontmatter() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, TRANSCRIPT);

    let options = RenderOptions::default().with_frontmatter(true);
    let markdown = to_markdown_with_options(&path, &options).unwrap();
    assert!(markdown.starts_with("---\ntitle: \"Pairing session\"\nsource: \"console\"\n---\n\n-- system prompt"));
}

#[test]
fn test_extract_text() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, TRANSCRIPT);

    let text = extract_text(&path).unwrap();
    assert!(text.contains("-- user message\nShow a loop"));
    assert!(text.contains("for i in 0..3 {}"));
    assert!(!text.contains("```"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = parse_file(dir.path().join("nope.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, "{\"sections\": 42}");
    assert!(matches!(parse_file(&path), Err(Error::InvalidInput(_))));
}

#[test]
fn test_builder_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_transcript(&dir, TRANSCRIPT);

    let result = Chatdown::new()
        .with_profile(ExportProfile::Slack)
        .last_sections(2)
        .load(&path)
        .unwrap();

    assert_eq!(result.suggested_filename(), "Slack_DM_History.md");

    let rendered = result.to_markdown_with_stats().unwrap();
    assert_eq!(rendered.stats.section_count, 1);
    assert_eq!(rendered.stats.skipped_section_count, 1);
    assert_eq!(rendered.stats.code_block_count, 1);
    assert!(rendered.content.starts_with("**assistant response**:\n> ```rust"));

    let json = result.to_json(JsonFormat::Pretty).unwrap();
    let reparsed = write_transcript(&dir, &json);
    assert_eq!(parse_file(reparsed).unwrap(), result.transcript);
}
