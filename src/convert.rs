//! Top-level conversion entry points.
//!
//! The pipeline is strictly sequential: one PDF in, one JSON document out,
//! with no overlapping operations. The public API is async only because the
//! blocking backend call and file I/O are pushed off the executor's hot
//! path; [`convert_sync`] wraps it for callers without a runtime.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::{ConversionOutput, ConversionStats, DocumentMetadata};
use crate::partition::pdfium::{extract_metadata, PdfiumPartitioner};
use crate::partition::Partitioner;
use crate::pipeline::{assemble, classify, input, invoke};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Convert a PDF file to a structured JSON document.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `pdf_path` — Local path to a PDF file
/// * `config`   — Conversion configuration
///
/// # Errors
/// Returns `Err(ConvertError)` for fatal errors only:
/// - File not found / permission denied / not a valid PDF
/// - Both the primary and the fallback strategy failing
///
/// Malformed table text inside the document is recovered locally and never
/// fails the run.
pub async fn convert(
    pdf_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let total_start = Instant::now();
    let pdf_path = pdf_path.as_ref();
    info!("Starting conversion: {}", pdf_path.display());

    // ── Step 1: Validate input ───────────────────────────────────────────
    let pdf_path = input::resolve_input(pdf_path)?;

    // ── Step 2: Resolve the partitioning backend ─────────────────────────
    let partitioner = resolve_partitioner(config);

    // ── Step 3: Count pages (progress display and stats only) ────────────
    let total_pages = {
        let partitioner = Arc::clone(&partitioner);
        let path = pdf_path.clone();
        tokio::task::spawn_blocking(move || partitioner.page_count(&path))
            .await
            .map_err(|e| ConvertError::Internal(format!("Page-count task panicked: {e}")))??
    };
    info!("PDF has {} pages", total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    // ── Step 4: Partition (with single fallback retry) ───────────────────
    let partition_start = Instant::now();
    let (elements, strategy_used) =
        invoke::partition_with_fallback(&partitioner, &pdf_path, config).await?;
    let partition_duration_ms = partition_start.elapsed().as_millis() as u64;
    info!(
        "Partitioned into {} elements in {}ms (strategy '{}')",
        elements.len(),
        partition_duration_ms,
        strategy_used
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_partition_complete(elements.len());
    }

    // ── Step 5: Classify and group by page ───────────────────────────────
    let grouped = classify::classify_elements(&elements, config.progress_callback.as_ref());
    debug!("Grouped content across {} pages", grouped.len());

    // ── Step 6: Assemble the document ────────────────────────────────────
    let document = assemble::assemble(grouped);

    let stats = ConversionStats {
        total_pages,
        content_pages: document.pages.len(),
        total_items: document.item_count(),
        strategy_used,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        partition_duration_ms,
    };

    info!(
        "Processed {} pages with {} content items in {}ms",
        stats.content_pages, stats.total_items, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(stats.content_pages, stats.total_items);
    }

    Ok(ConversionOutput { document, stats })
}

/// Convert a PDF and write the JSON document directly to a file.
///
/// Uses atomic write (temp file + rename) so an existing output file is
/// overwritten in one step and a failed run never leaves a partial file.
pub async fn convert_to_file(
    pdf_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, ConvertError> {
    let output = convert(pdf_path, config).await?;
    let path = output_path.as_ref();

    let json = serde_json::to_string_pretty(&output.document)
        .map_err(|e| ConvertError::Internal(format!("JSON serialisation failed: {e}")))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConvertError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json.as_bytes())
        .await
        .map_err(|e| ConvertError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| ConvertError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("Wrote JSON output to {}", path.display());
    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    pdf_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(pdf_path, config))
}

/// Extract PDF metadata (including the page count) without converting.
///
/// Always uses the pdfium backend regardless of any injected partitioner.
pub async fn inspect(pdf_path: impl AsRef<Path>) -> Result<DocumentMetadata, ConvertError> {
    let pdf_path = input::resolve_input(pdf_path.as_ref())?;
    tokio::task::spawn_blocking(move || extract_metadata(&pdf_path, None))
        .await
        .map_err(|e| ConvertError::Internal(format!("Metadata task panicked: {e}")))?
}

/// Resolve the partitioning backend: an injected one wins, otherwise the
/// default pdfium backend.
fn resolve_partitioner(config: &ConversionConfig) -> Arc<dyn Partitioner> {
    match config.partitioner {
        Some(ref p) => Arc::clone(p),
        None => Arc::new(PdfiumPartitioner::new()),
    }
}
