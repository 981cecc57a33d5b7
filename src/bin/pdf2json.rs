//! CLI binary for pdf2json.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2json::{
    convert_to_file, inspect, ConversionConfig, ConversionProgressCallback, ProgressCallback,
    Strategy,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner while the backend partitions the
/// document, then a bar that ticks once per processed element.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose progress-bar length is set dynamically by
    /// `on_partition_complete` (the element count is unknown until then).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_partition_complete

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    /// Switch to the full progress-bar style once the element count is known.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} elements  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Partitioning {total_pages} pages…"))
        ));
        self.bar.set_message(format!("{total_pages} pages"));
    }

    fn on_partition_complete(&self, element_count: usize) {
        self.activate_bar(element_count);
    }

    fn on_element_processed(&self, _index: usize, _element_count: usize) {
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, content_pages: usize, total_items: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} content items across {} pages",
            green("✔"),
            bold(&total_items.to_string()),
            bold(&content_pages.to_string()),
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes output.json)
  pdf2json document.pdf

  # Convert to a named file
  pdf2json document.pdf -o report.json

  # Fast strategy for born-digital PDFs
  pdf2json -s fast document.pdf

  # OCR with a fast fallback and extra language hints
  pdf2json -s ocr_only --languages eng,fra scan.pdf

  # Inspect PDF metadata only (no conversion)
  pdf2json --inspect-only document.pdf

  # Metadata as JSON
  pdf2json --inspect-only --json document.pdf

STRATEGIES:
  hi_res     Layout analysis with table-structure inference (default).
  fast       Plain text-order extraction; much quicker, less structure.
  ocr_only   Rasterise and OCR each page (needs an OCR-capable backend).

  If the chosen strategy fails, the conversion retries exactly once with
  the fallback strategy (default: fast) before failing.

OUTPUT SCHEMA:
  { "pages": [ { "page_number": 1,
                 "content": [ { "type": "paragraph|table|chart",
                                "section": "1.1",
                                "sub_section": "Introduction",
                                "description": null,
                                "text": "…",
                                "table_data": [["…"]] } ] } ] }

ENVIRONMENT VARIABLES:
  PDF2JSON_OUTPUT      Default output path
  PDF2JSON_STRATEGY    Default strategy
  PDF2JSON_FALLBACK    Default fallback strategy
  PDF2JSON_LANGUAGES   Default language hints (comma-separated)
"#;

/// Convert PDF files to structured JSON.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2json",
    version,
    about = "Convert PDF files to structured JSON (pages → paragraphs, tables, charts)",
    long_about = "Convert PDF documents to a structured JSON representation. Text, tables, and \
images are extracted by a partitioning backend, grouped by page, tagged with detected \
section/sub-section headers, and written as {pages:[{page_number, content:[…]}]}.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF file.
    input: PathBuf,

    /// Path to the output JSON file.
    #[arg(short, long, env = "PDF2JSON_OUTPUT", default_value = "output.json")]
    output: PathBuf,

    /// Partitioning strategy.
    #[arg(short, long, env = "PDF2JSON_STRATEGY", value_enum, default_value = "hi_res")]
    strategy: StrategyArg,

    /// Strategy to retry with when the primary strategy fails.
    #[arg(long, env = "PDF2JSON_FALLBACK", value_enum, default_value = "fast")]
    fallback_strategy: StrategyArg,

    /// Language hints for the backend, comma-separated ISO 639 codes.
    #[arg(long, env = "PDF2JSON_LANGUAGES", default_value = "eng")]
    languages: String,

    /// Disable table-structure inference.
    #[arg(long, env = "PDF2JSON_NO_TABLE_STRUCTURE")]
    no_table_structure: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2JSON_PASSWORD")]
    password: Option<String>,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// With --inspect-only, print metadata as JSON.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "PDF2JSON_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2JSON_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2JSON_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    #[value(name = "hi_res")]
    HiRes,
    #[value(name = "fast")]
    Fast,
    #[value(name = "ocr_only")]
    OcrOnly,
}

impl From<StrategyArg> for Strategy {
    fn from(v: StrategyArg) -> Self {
        match v {
            StrategyArg::HiRes => Strategy::HiRes,
            StrategyArg::Fast => Strategy::Fast,
            StrategyArg::OcrOnly => Strategy::OcrOnly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.inspect_only;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let meta = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&meta).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = meta.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = meta.author {
                println!("Author:       {}", a);
            }
            if let Some(ref s) = meta.subject {
                println!("Subject:      {}", s);
            }
            println!("Pages:        {}", meta.page_count);
            println!("PDF Version:  {}", meta.pdf_version);
            if let Some(ref p) = meta.producer {
                println!("Producer:     {}", p);
            }
            if let Some(ref c) = meta.creator {
                println!("Creator:      {}", c);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    match convert_to_file(&cli.input, &cli.output, &config).await {
        Ok(stats) => {
            if !cli.quiet {
                eprintln!(
                    "{}  {} items / {} pages  {}ms  →  {}",
                    if stats.strategy_used == config.strategy {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    stats.total_items,
                    stats.content_pages,
                    stats.total_duration_ms,
                    bold(&cli.output.display().to_string()),
                );
                if stats.strategy_used != config.strategy {
                    eprintln!(
                        "   {}",
                        dim(&format!(
                            "primary strategy '{}' failed; completed with fallback '{}'",
                            config.strategy, stats.strategy_used
                        ))
                    );
                }
            }
            Ok(())
        }
        Err(e) => {
            if !cli.quiet {
                eprintln!("{} {}", red("✘"), e);
            }
            Err(e).context("Conversion failed")
        }
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let languages: Vec<String> = cli
        .languages
        .split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let mut builder = ConversionConfig::builder()
        .strategy(cli.strategy.into())
        .fallback_strategy(cli.fallback_strategy.into())
        .languages(languages)
        .infer_table_structure(!cli.no_table_structure);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
