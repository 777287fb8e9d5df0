use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use spantag::{AppConfig, Document, DocumentMode, Segment, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Plain text, annotated as a whole
    Text,
    /// One JSON record per line
    Jsonl,
    /// A JSON array of records
    Json,
}

/// Tag literal text spans with labels and print the highlighted result.
#[derive(Debug, Parser)]
#[command(name = "spantag", version, about)]
struct Cli {
    /// File to annotate
    #[arg(required_unless_present_any = ["list_labels", "save_config"])]
    file: Option<PathBuf>,

    /// How to read the file (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Record to annotate and render, counting from 0
    #[arg(short, long, default_value_t = 0)]
    record: usize,

    /// Annotation to add, as TEXT=LABEL (repeatable)
    #[arg(short, long = "annotate", value_name = "TEXT=LABEL")]
    annotations: Vec<String>,

    /// Label configuration file (defaults to the user config file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print segments as JSON instead of markup
    #[arg(long)]
    json: bool,

    /// List the available labels and exit
    #[arg(long)]
    list_labels: bool,

    /// Write the effective configuration to the user config file and exit
    #[arg(long)]
    save_config: bool,
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => {
            AppConfig::load(path).with_context(|| format!("failed to load config {}", path.display()))
        }
        // Logging is not up yet, so a broken user config is reported directly.
        None => match AppConfig::load_from_default_path() {
            Ok(config) => Ok(config.unwrap_or_default()),
            Err(e) => {
                eprintln!("warning: ignoring user config file: {}", e);
                Ok(AppConfig::default())
            }
        },
    }
}

fn init_logging(config: &AppConfig) {
    // RUST_LOG takes precedence over the configured level.
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();
}

fn read_document(cli: &Cli, config: &AppConfig) -> Result<Document> {
    let Some(file) = &cli.file else {
        bail!("no input file given");
    };
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let format = cli.format.unwrap_or(match config.preferences.default_mode {
        DocumentMode::LineText => InputFormat::Text,
        DocumentMode::Record => InputFormat::Jsonl,
    });

    let document = match format {
        InputFormat::Text => Document::load(&raw, DocumentMode::LineText),
        InputFormat::Jsonl => Document::load(&raw, DocumentMode::Record),
        InputFormat::Json => Document::from_json_array(&raw),
    };
    document.with_context(|| format!("failed to parse {}", file.display()))
}

/// Split a `TEXT=LABEL` argument at its last `=`.
fn parse_annotation(pair: &str) -> Result<(&str, &str)> {
    match pair.rsplit_once('=') {
        Some((text, label)) if !label.is_empty() => Ok((text, label)),
        _ => bail!("annotation '{}' is not of the form TEXT=LABEL", pair),
    }
}

fn markup(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.label() {
            Some(label) => {
                out.push('[');
                out.push_str(&segment.text);
                out.push_str("](");
                out.push_str(label.as_str());
                out.push(')');
            }
            None => out.push_str(&segment.text),
        }
    }
    out
}

fn run(cli: &Cli, config: &AppConfig) -> Result<()> {
    let mut session = Session::from_config(config).context("invalid label configuration")?;

    if cli.list_labels {
        for label in session.registry().all() {
            println!(
                "{}\t{}\t{}",
                label.key,
                label.name,
                spantag::color_utils::to_hex(label.colors.accent)
            );
        }
        return Ok(());
    }

    if cli.save_config {
        let path = config.save_to_default_path()?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    let document = read_document(cli, config)?;
    session.open(document);
    session.jump_to(cli.record)?;

    for pair in &cli.annotations {
        let (text, label) = parse_annotation(pair)?;
        if let Err(e) = session.annotate(text, label) {
            log::warn!("Skipped annotation '{}': {}", pair, e);
            eprintln!("skipped '{}': {}", pair, e);
        }
    }

    let segments = session.render()?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
    } else {
        let record_document = session
            .document()
            .filter(|d| d.mode() == DocumentMode::Record);
        if let Some(document) = record_document {
            println!("Record {}", document.progress());
        }
        println!("{}", markup(&segments));
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config);
    run(&cli, &config)
}
