use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use resume_kit::config::Config;
use resume_kit::document::{load_document, LoadOptions};
use resume_kit::export::{export_to_markdown_with_options, MarkdownOptions};
use resume_kit::patch::{ensure_patched, patch_file, PatchMode, BUILD_PROJECTS_PATCH};
use resume_kit::resume::{extract_resume, write_resume_json};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a .docx resume to markdown on stdout
    Preview {
        /// Document to convert (defaults to the configured path)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Backslash-escape markdown special characters (the default)
        #[arg(long, conflicts_with = "no_escape")]
        escape: bool,

        /// Keep markdown special characters unescaped
        #[arg(long)]
        no_escape: bool,

        /// Infer headings and lists from plain paragraphs
        #[arg(long, conflicts_with = "no_infer_structure")]
        infer_structure: bool,

        /// Only use Word styles and numbering for structure (the default)
        #[arg(long)]
        no_infer_structure: bool,

        /// Print word count, page estimate and size to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Rewrite the buildProjects signature in a source file
    Patch {
        /// Source file to patch (defaults to the configured path)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,

        /// Fail when the signature is not present
        #[arg(long)]
        check: bool,
    },

    /// Extract a normalized resume record as JSON
    Extract {
        /// Resume source (.json, .txt, .md or .docx); searched for when omitted
        #[arg(long, value_name = "PATH")]
        source: Option<PathBuf>,

        /// Write JSON here instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig,
}

#[derive(Parser, Debug)]
#[command(name = "resume-kit")]
#[command(version)]
#[command(about = "Resume document tools: markdown preview, source patching and extraction")]
#[command(long_about = "resume-kit converts a Word resume to markdown, patches the site's
buildProjects signature and extracts a normalized resume record.

EXAMPLES:
    resume-kit preview                          # Convert assets/docs/resume.docx
    resume-kit preview cv.docx --no-escape      # Convert without escaping
    resume-kit preview --escape                 # Escape even if the config turns it off
    resume-kit patch --write                    # Patch src/lib/formatters.ts in place
    resume-kit extract --output data/resume.normalized.json
    resume-kit --log-level info extract         # Show progress on stderr")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./resume-kit.toml, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set logging level (overrides RUST_LOG)
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

fn init_logging(level: Option<CliLogLevel>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.target(env_logger::Target::Stderr).init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview {
            path,
            escape,
            no_escape,
            infer_structure,
            no_infer_structure,
            stats,
        } => {
            let settings = config.preview.with_overrides(
                flag_pair(escape, no_escape),
                flag_pair(infer_structure, no_infer_structure),
            );
            let path = path.unwrap_or(settings.document_path);
            let load_options = LoadOptions {
                infer_structure: settings.infer_structure,
            };
            let markdown_options = MarkdownOptions {
                escape_special_chars: settings.escape_markdown,
            };
            preview(&path, load_options, &markdown_options, stats).await?;
        }
        Commands::Patch { path, write, check } => {
            let path = path.unwrap_or(config.patch.target_path);
            let mode = if write { PatchMode::Write } else { PatchMode::DryRun };
            let outcome = patch_file(&path, &BUILD_PROJECTS_PATCH, mode)?;

            if check {
                ensure_patched(&path, &outcome)?;
            }
            if mode == PatchMode::DryRun {
                eprintln!("{} replacement(s) in {} (dry run)", outcome.replacements, path.display());
                print!("{}", outcome.text);
            }
        }
        Commands::Extract { source, output } => {
            let output = output.or_else(|| config.extract.destination().map(Path::to_path_buf));
            let root = std::env::current_dir().context("Failed to resolve working directory")?;

            let resume = extract_resume(&root, source.as_deref()).await?;
            let json = write_resume_json(&resume, output.as_deref())?;
            if output.is_none() {
                println!("{json}");
            }
        }
        Commands::InitConfig => match Config::init_default()? {
            Some(path) => println!("Wrote default configuration to {}", path.display()),
            None => anyhow::bail!("No user configuration directory on this platform"),
        },
    }

    Ok(())
}

/// `--flag` / `--no-flag` to an override; clap rejects both at once
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

async fn preview(
    path: &Path,
    load_options: LoadOptions,
    markdown_options: &MarkdownOptions,
    stats: bool,
) -> Result<()> {
    let document = load_document(path, load_options).await?;

    if stats {
        eprintln!(
            "{}: {} words, ~{} page(s), {} bytes",
            document.title,
            document.metadata.word_count,
            document.metadata.page_count,
            document.metadata.file_size
        );
    }

    print!("{}", export_to_markdown_with_options(&document, markdown_options)?);
    Ok(())
}
