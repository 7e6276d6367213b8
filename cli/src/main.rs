//! chatdown CLI - chat transcript rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use chatdown::{parse_file, CleanupPreset, ExportProfile, JsonFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "chatdown")]
#[command(author = "chatdown contributors")]
#[command(version)]
#[command(about = "Render scraped chat transcripts to Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input transcript (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Export profile (console, claude, chatgpt, slack)
    #[arg(long, value_parser = ExportProfile::parse, default_value = "console")]
    profile: ExportProfile,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a transcript to all formats (Markdown, text, JSON)
    Convert {
        /// Input transcript (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Export profile (console, claude, chatgpt, slack)
        #[arg(long, value_parser = ExportProfile::parse, default_value = "console")]
        profile: ExportProfile,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Render a transcript to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input transcript (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Export profile (console, claude, chatgpt, slack)
        #[arg(long, value_parser = ExportProfile::parse, default_value = "console")]
        profile: ExportProfile,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Escape Markdown special characters in text
        #[arg(long)]
        escape: bool,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Keep only the last N sections
        #[arg(long, value_name = "N")]
        last: Option<usize>,

        /// Save under the profile's suggested filename in DIR
        #[arg(long, value_name = "DIR", conflicts_with = "output")]
        save: Option<PathBuf>,
    },

    /// Render a transcript to plain text
    Text {
        /// Input transcript (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Validate a transcript and re-serialize it as JSON
    Json {
        /// Input transcript (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show transcript information
    Info {
        /// Input transcript (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print rendering statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

/// Flags of the `markdown` command.
struct MarkdownArgs {
    profile: ExportProfile,
    frontmatter: bool,
    escape: bool,
    cleanup: Option<CleanupLevel>,
    max_heading: u8,
    last: Option<usize>,
}

impl MarkdownArgs {
    fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::from_profile(self.profile)
            .with_frontmatter(self.frontmatter)
            .with_escaping(self.escape)
            .with_max_heading(self.max_heading);

        if let Some(count) = self.last {
            options = options.with_max_sections(count);
        }
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            profile,
            cleanup,
        }) => cmd_convert(&input, output.as_deref(), profile, cleanup),
        Some(Commands::Markdown {
            input,
            output,
            profile,
            frontmatter,
            escape,
            cleanup,
            max_heading,
            last,
            save,
        }) => {
            let args = MarkdownArgs {
                profile,
                frontmatter,
                escape,
                cleanup,
                max_heading,
                last,
            };
            cmd_markdown(&input, output.as_deref(), save.as_deref(), &args)
        }
        Some(Commands::Text {
            input,
            output,
            cleanup,
        }) => cmd_text(&input, output.as_deref(), cleanup),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), cli.profile, cli.cleanup)
            } else {
                println!("{}", "Usage: chatdown <FILE> [OUTPUT]".yellow());
                println!("       chatdown --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    profile: ExportProfile,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading transcript...");
    let transcript = parse_file(input)?;
    pb.inc(1);

    let mut render_options = RenderOptions::from_profile(profile).with_frontmatter(true);
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    pb.set_message("Generating Markdown...");
    let result = chatdown::render::to_markdown_with_stats(&transcript, &render_options)?;
    write_output(output_dir.join(&result.suggested_filename), &result.content)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    let text = chatdown::render::to_text(&transcript, &render_options)?;
    write_output(output_dir.join("transcript.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Generating JSON...");
    let json = chatdown::render::to_json(&transcript, JsonFormat::Pretty)?;
    write_output(output_dir.join("transcript.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), result.suggested_filename);
    println!("  {} transcript.txt", "├─".dimmed());
    println!("  {} transcript.json", "└─".dimmed());
    println!(
        "\n{} sections rendered, {} skipped",
        result.stats.section_count, result.stats.skipped_section_count
    );

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    save: Option<&Path>,
    args: &MarkdownArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = parse_file(input)?;
    let render_options = args.render_options();
    let markdown = chatdown::render::to_markdown(&transcript, &render_options)?;

    let target = match (output, save) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(dir)) => {
            fs::create_dir_all(dir)?;
            Some(dir.join(render_options.suggested_filename(transcript.metadata.exported_at)))
        }
        (None, None) => None,
    };

    if let Some(path) = target {
        write_output(&path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", markdown);
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = parse_file(input)?;

    let mut render_options = RenderOptions::new();
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let text = chatdown::render::to_text(&transcript, &render_options)?;

    if let Some(path) = output {
        write_output(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = parse_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = chatdown::render::to_json(&transcript, format)?;

    if let Some(path) = output {
        write_output(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = parse_file(input)?;
    let result = chatdown::render::to_markdown_with_stats(&transcript, &RenderOptions::default())?;
    let stats = &result.stats;

    if as_json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("{}", "Transcript Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Sections".bold(), transcript.section_count());

    if let Some(ref title) = transcript.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref source) = transcript.metadata.source {
        println!("{}: {}", "Source".bold(), source);
    }
    if let Some(ref exported_at) = transcript.metadata.exported_at {
        println!("{}: {}", "Exported".bold(), exported_at);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Rendered sections".bold(), stats.section_count);
    println!("{}: {}", "Empty sections".bold(), stats.skipped_section_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Links".bold(), stats.link_count);

    Ok(())
}

fn write_output(path: impl AsRef<Path>, content: &str) -> std::io::Result<()> {
    let path = path.as_ref();
    log::debug!("writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content)
}

fn cmd_version() {
    println!("{} {}", "chatdown".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Chat transcript to Markdown renderer");
    println!();
    println!("Repository: {}", "https://github.com/chatdown/chatdown".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "metadata": {"exported_at": "2024-05-01T12:00:00Z"},
        "sections": [
            {"label": "user", "root": {"kind": "p", "children": [{"kind": "text", "text": "Hi"}]}},
            {"label": "assistant", "root": {"kind": "p", "children": [{"kind": "text", "text": "Hello"}]}}
        ]
    }"#;

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("chat.json");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_convert_writes_all_formats() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let out = dir.path().join("out");

        cmd_convert(&input, Some(&out), ExportProfile::ChatGpt, None).unwrap();

        let markdown = fs::read_to_string(out.join("chat-export-2024-05-01.md")).unwrap();
        assert!(markdown.contains("### user (Message 1)"));
        assert!(out.join("transcript.txt").exists());
        assert!(out.join("transcript.json").exists());
    }

    #[test]
    fn test_write_output_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        write_output(&path, "# Hi").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Hi");

        assert!(write_output(dir.path().join("missing/out.md"), "x").is_err());
    }

    #[test]
    fn test_markdown_save_uses_suggested_filename() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_sample(dir.path());
        let args = MarkdownArgs {
            profile: ExportProfile::Claude,
            frontmatter: false,
            escape: false,
            cleanup: None,
            max_heading: 6,
            last: Some(1),
        };

        cmd_markdown(&input, None, Some(dir.path()), &args).unwrap();

        let markdown = fs::read_to_string(dir.path().join("claude-chat.md")).unwrap();
        assert_eq!(markdown, "**assistant**: Hello");
    }

    #[test]
    fn test_missing_input_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_text(&dir.path().join("missing.json"), None, None).is_err());
    }
}
