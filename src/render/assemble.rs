//! Transcript assembly: labelled sections joined into one document.
//!
//! Each section's tree is rendered independently, trimmed and written under
//! its speaker label in the configured [`LabelStyle`]. Sections without a
//! root or with an empty rendering are skipped. The joined document passes
//! through [`normalize`] (or the configured cleanup pipeline, which ends in
//! it) exactly once.

use std::fmt;

use chrono::SecondsFormat;

use super::cleanup::{normalize, CleanupPipeline};
use super::markdown::{quote_lines, MarkdownRenderer};
use super::{LabelStyle, RenderContext, RenderOptions, RenderResult, RenderStats};
use crate::error::Result;
use crate::model::{validate_sections, Metadata, Section, Transcript};

/// Assemble sections into a single normalized Markdown document.
///
/// All trees are validated before anything is rendered.
pub fn assemble(sections: &[Section], options: &RenderOptions) -> Result<String> {
    let mut assembler = Assembler::new(options.clone());
    assembler.assemble(&Metadata::default(), sections)
}

/// Render a transcript to Markdown.
pub fn to_markdown(transcript: &Transcript, options: &RenderOptions) -> Result<String> {
    let mut assembler = Assembler::new(options.clone());
    assembler.assemble(&transcript.metadata, &transcript.sections)
}

/// Render a transcript to Markdown, collecting statistics.
pub fn to_markdown_with_stats(
    transcript: &Transcript,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let options = options.clone().with_stats(true);
    let filename = options.suggested_filename(transcript.metadata.exported_at);

    let mut assembler = Assembler::new(options);
    let content = assembler.assemble(&transcript.metadata, &transcript.sections)?;

    let mut stats = assembler.take_stats();
    stats.count_text(&content);

    Ok(RenderResult::new(
        content,
        transcript.metadata.clone(),
        stats,
        filename,
    ))
}

/// Joins rendered sections under their labels.
pub struct Assembler {
    renderer: MarkdownRenderer,
    stats: RenderStats,
}

impl Assembler {
    /// Create an assembler with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            renderer: MarkdownRenderer::new(options),
            stats: RenderStats::new(),
        }
    }

    fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }

    /// Take the statistics gathered so far, including the renderer's.
    pub fn take_stats(&mut self) -> RenderStats {
        let mut stats = std::mem::take(&mut self.stats);
        stats.merge(&self.renderer.take_stats());
        stats
    }

    /// Validate, render and join `sections`.
    pub fn assemble(&mut self, metadata: &Metadata, sections: &[Section]) -> Result<String> {
        let options = self.options().clone();
        validate_sections(sections, options.max_depth)?;

        let mut output = String::new();

        if options.include_frontmatter {
            output.push_str(&metadata.to_yaml_frontmatter());
            output.push('\n');
        }

        if options.include_header {
            output.push_str(&export_header(metadata));
        }

        let sections = select_sections(sections, options.max_sections);
        let labels = section_labels(sections, &options.default_label);
        let mut emitted = 0;

        for (index, (section, label)) in sections.iter().zip(&labels).enumerate() {
            let root = match &section.root {
                Some(root) => root,
                None => {
                    log::debug!("section {} ({}) has no content, skipping", index + 1, label);
                    self.skip();
                    continue;
                }
            };

            let rendered = self.renderer.render_with_context(root, RenderContext::new());
            let body = rendered.trim();
            if body.is_empty() {
                log::debug!("section {} ({}) rendered empty, skipping", index + 1, label);
                self.skip();
                continue;
            }

            emitted += 1;
            log::trace!("section {}: {} bytes under {}", index + 1, body.len(), label);
            write_section(&mut output, options.label_style, label, body, emitted);
        }

        if options.collect_stats {
            self.stats.section_count += emitted as u32;
        }

        let document = match &options.cleanup {
            Some(cleanup) => CleanupPipeline::new(cleanup.clone()).process(&output),
            None => normalize(&output),
        };
        Ok(document)
    }

    fn skip(&mut self) {
        if self.options().collect_stats {
            self.stats.skipped_section_count += 1;
        }
    }
}

/// The trailing `max_sections` sections, or all of them.
pub(crate) fn select_sections(sections: &[Section], max_sections: Option<usize>) -> &[Section] {
    match max_sections {
        Some(max) if sections.len() > max => {
            log::warn!(
                "transcript has {} sections, keeping the last {}",
                sections.len(),
                max
            );
            &sections[sections.len() - max..]
        }
        _ => sections,
    }
}

/// A section's speaker name and optional timestamp.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SectionLabel {
    pub name: String,
    pub timestamp: Option<String>,
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.timestamp {
            Some(ts) => write!(f, "{} ({})", self.name, ts),
            None => f.write_str(&self.name),
        }
    }
}

/// Label for every section.
///
/// An empty label repeats the previous section's; leading unlabelled
/// sections get `default_label`.
pub(crate) fn section_labels(sections: &[Section], default_label: &str) -> Vec<SectionLabel> {
    let mut previous = default_label.to_string();
    sections
        .iter()
        .map(|section| {
            let label = section.label.trim();
            if !label.is_empty() {
                previous = label.to_string();
            }
            SectionLabel {
                name: previous.clone(),
                timestamp: section
                    .timestamp
                    .as_deref()
                    .map(str::trim)
                    .filter(|ts| !ts.is_empty())
                    .map(str::to_string),
            }
        })
        .collect()
}

fn write_section(
    output: &mut String,
    style: LabelStyle,
    label: &SectionLabel,
    body: &str,
    number: usize,
) {
    match style {
        LabelStyle::Dashed => {
            let separator = if underlines_label(body) { "\n\n" } else { "\n" };
            output.push_str(&format!("-- {}{}{}\n\n", label, separator, body));
        }
        LabelStyle::Bold => {
            let separator = if starts_with_block(body) { "\n\n" } else { " " };
            output.push_str(&format!("**{}**:{}{}\n\n", label, separator, body));
        }
        LabelStyle::Heading => {
            output.push_str(&format!(
                "### {} (Message {})\n\n{}\n\n---\n\n",
                label, number, body
            ));
        }
        LabelStyle::Quoted => {
            let stamp = label
                .timestamp
                .as_deref()
                .map(|ts| format!(" ({})", ts))
                .unwrap_or_default();
            output.push_str(&format!(
                "**{}**{}:\n{}\n\n",
                label.name,
                stamp,
                quote_lines(body)
            ));
        }
    }
}

/// Whether the body opens with a construct that must begin its own line.
fn starts_with_block(body: &str) -> bool {
    let first = body.lines().next().unwrap_or_default();
    ["```", "|", "#", ">", "* ", "---", "[Uploaded "]
        .iter()
        .any(|marker| first.starts_with(marker))
        || first
            .split_once(". ")
            .map_or(false, |(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

/// Whether the body's first line would turn the label line above it into a
/// setext heading.
fn underlines_label(body: &str) -> bool {
    let first = body.lines().next().unwrap_or_default().trim();
    !first.is_empty() && (first.chars().all(|c| c == '-') || first.chars().all(|c| c == '='))
}

fn export_header(metadata: &Metadata) -> String {
    let title = metadata.title.as_deref().unwrap_or("Chat Export");
    match metadata.exported_at {
        Some(at) => format!(
            "# {} ({})\n\n---\n\n",
            title,
            at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        None => format!("# {}\n\n---\n\n", title),
    }
}
