//! # pdf2json
//!
//! Convert PDF documents into a structured JSON representation:
//! pages → content items of type paragraph, table, or chart.
//!
//! ## Why this crate?
//!
//! Downstream consumers (search indexes, RAG pipelines, analytics) want
//! *structure*, not a wall of text: which page an item came from, whether it
//! is a table or a figure, and which section of the document it belongs to.
//! This crate delegates the genuinely hard work — layout analysis, text
//! extraction, table-structure inference — to a pluggable partitioning
//! backend, and owns only the thin transformation on top: strategy selection
//! with a single fallback retry, per-page grouping, regex section
//! heuristics, table reformatting into 2D arrays, and JSON assembly.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate path, read permission, %PDF magic
//!  ├─ 2. Count     page count for progress display and stats
//!  ├─ 3. Partition backend call (hi_res / fast / ocr_only), one fallback retry
//!  ├─ 4. Classify  category→type mapping, section heuristics, page grouping
//!  ├─ 5. Tables    markdown-style table text → 2D cell arrays
//!  └─ 6. Output    assembled {pages:[{page_number, content:[…]}]} JSON
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2json::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert("document.pdf", &config).await?;
//!     println!("{}", serde_json::to_string_pretty(&output.document)?);
//!     eprintln!(
//!         "{} items across {} pages",
//!         output.stats.total_items, output.stats.content_pages
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2json` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2json = { version = "0.1", default-features = false }
//! ```
//!
//! ## Choosing a Strategy
//!
//! | Strategy   | Speed | Best for |
//! |------------|-------|----------|
//! | `hi_res`   | slow  | Default — layout analysis, table structure, embedded images |
//! | `fast`     | fast  | Born-digital PDFs where text order is trustworthy |
//! | `ocr_only` | slow  | Scanned documents (requires an OCR-capable backend) |
//!
//! On failure of the primary strategy the conversion retries exactly once
//! with the configured fallback (default `fast`) before giving up.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, Strategy};
pub use convert::{convert, convert_sync, convert_to_file, inspect};
pub use error::ConvertError;
pub use output::{
    ContentItem, ContentType, ConversionOutput, ConversionStats, DocumentMetadata, Page,
    StructuredDocument,
};
pub use partition::{BBox, Element, ElementCategory, PartitionOptions, Partitioner};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
