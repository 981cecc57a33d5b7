//! Default partitioning backend built on pdfium.
//!
//! ## What this backend can and cannot do
//!
//! pdfium gives us reliable text-order extraction and page object access,
//! so `fast` and `hi_res` are implemented on top of per-page text blocks:
//! `hi_res` additionally scans page objects for embedded images and runs
//! table detection on pipe-delimited blocks. `ocr_only` needs an OCR engine
//! this backend does not carry, so it fails with `PartitionFailed` — the
//! invoker's fallback retry then picks up the document with `fast`.
//!
//! Callers must wrap every method in `tokio::task::spawn_blocking`: the
//! pdfium C++ library uses thread-local state internally and is not safe to
//! call from async contexts.

use crate::config::Strategy;
use crate::error::ConvertError;
use crate::output::DocumentMetadata;
use crate::partition::{Element, ElementCategory, PartitionOptions, Partitioner};
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Partitioner backed by the pdfium library.
///
/// Construct with [`PdfiumPartitioner::new`]; the pdfium binding itself is
/// created per call because `Pdfium` is not `Send`.
#[derive(Debug, Default)]
pub struct PdfiumPartitioner;

impl PdfiumPartitioner {
    pub fn new() -> Self {
        Self
    }
}

impl Partitioner for PdfiumPartitioner {
    fn partition(
        &self,
        path: &Path,
        options: &PartitionOptions,
    ) -> Result<Vec<Element>, ConvertError> {
        if options.strategy == Strategy::OcrOnly {
            return Err(ConvertError::PartitionFailed {
                strategy: options.strategy,
                detail: "ocr_only is not supported by the pdfium backend".into(),
            });
        }

        let pdfium = Pdfium::default();
        let document = load_document(&pdfium, path, options.password.as_deref())?;

        let mut elements = Vec::new();
        for (idx, page) in document.pages().iter().enumerate() {
            let page_number = idx + 1;
            let text = page
                .text()
                .map_err(|e| ConvertError::PartitionFailed {
                    strategy: options.strategy,
                    detail: format!("text extraction failed on page {page_number}: {e:?}"),
                })?
                .all();

            let block_count = partition_page_text(
                &text,
                page_number,
                options.strategy,
                options.infer_table_structure,
                &mut elements,
            );

            // Embedded images are only surfaced under hi_res; fast stays a
            // pure text pass.
            let mut image_count = 0;
            if options.strategy == Strategy::HiRes {
                for object in page.objects().iter() {
                    if let PdfPageObject::Image(_) = object {
                        elements.push(Element {
                            category: ElementCategory::Image,
                            text: String::new(),
                            page_number: Some(page_number),
                            bbox: None,
                        });
                        image_count += 1;
                    }
                }
            }

            debug!(
                "Page {}: {} text blocks, {} images",
                page_number, block_count, image_count
            );
        }

        Ok(elements)
    }

    fn page_count(&self, path: &Path) -> Result<usize, ConvertError> {
        let pdfium = Pdfium::default();
        let document = load_document(&pdfium, path, None)?;
        Ok(document.pages().len() as usize)
    }
}

/// Load a PDF, mapping pdfium's opaque errors onto the crate's error kinds.
fn load_document<'a>(
    pdfium: &'a Pdfium,
    path: &Path,
    password: Option<&'a str>,
) -> Result<PdfDocument<'a>, ConvertError> {
    pdfium.load_pdf_from_file(path, password).map_err(|e| {
        let err_str = format!("{e:?}");
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                ConvertError::WrongPassword {
                    path: path.to_path_buf(),
                }
            } else {
                ConvertError::PasswordRequired {
                    path: path.to_path_buf(),
                }
            }
        } else {
            ConvertError::CorruptPdf {
                path: path.to_path_buf(),
                detail: err_str,
            }
        }
    })
}

// ── Text-block partitioning ──────────────────────────────────────────────

static RE_NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d+)*\s+\S").unwrap());

/// Split a page's raw text into blank-line-separated blocks and classify
/// each one. Returns the number of blocks emitted.
fn partition_page_text(
    raw: &str,
    page_number: usize,
    strategy: Strategy,
    infer_table_structure: bool,
    out: &mut Vec<Element>,
) -> usize {
    let mut count = 0;
    for block in split_blocks(raw) {
        let category = classify_block(&block, strategy, infer_table_structure);
        out.push(Element::new(category, block, page_number));
        count += 1;
    }
    count
}

/// Split raw page text into trimmed blocks separated by blank lines.
fn split_blocks(raw: &str) -> Vec<String> {
    let normalised = raw.replace("\r\n", "\n").replace('\r', "\n");
    normalised
        .split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Heuristic block classification.
///
/// Tables are only recognised when table-structure inference is on and the
/// strategy does layout analysis; the fallback retry runs with inference
/// off, so pipe-delimited blocks come back as narrative text there.
fn classify_block(block: &str, strategy: Strategy, infer_table_structure: bool) -> ElementCategory {
    if strategy == Strategy::HiRes && infer_table_structure && looks_like_table(block) {
        return ElementCategory::Table;
    }
    if is_single_line(block) && looks_like_heading(block) {
        return ElementCategory::Title;
    }
    if block
        .lines()
        .all(|l| matches!(l.trim_start().chars().next(), Some('-' | '*' | '•')))
    {
        return ElementCategory::ListItem;
    }
    ElementCategory::NarrativeText
}

fn is_single_line(block: &str) -> bool {
    !block.trim().contains('\n')
}

fn looks_like_heading(line: &str) -> bool {
    let line = line.trim();
    if line.len() > 80 {
        return false;
    }
    if RE_NUMBERED_HEADING.is_match(line) {
        return true;
    }
    // Short line where every word starts with an uppercase letter.
    let words: Vec<&str> = line.split_whitespace().collect();
    !words.is_empty()
        && words.len() <= 8
        && words
            .iter()
            .all(|w| w.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
}

/// A block is table-like when at least two lines carry pipe delimiters.
fn looks_like_table(block: &str) -> bool {
    block.lines().filter(|l| l.contains('|')).count() >= 2
}

// ── Metadata extraction ──────────────────────────────────────────────────

/// Extract document metadata without partitioning any content.
pub fn extract_metadata(
    path: &Path,
    password: Option<&str>,
) -> Result<DocumentMetadata, ConvertError> {
    let pdfium = Pdfium::default();
    let document = load_document(&pdfium, path, password)?;

    let metadata = document.metadata();
    let pages = document.pages();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentMetadata {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        creation_date: get_meta(PdfDocumentMetadataTagType::CreationDate),
        modification_date: get_meta(PdfDocumentMetadataTagType::ModificationDate),
        page_count: pages.len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
