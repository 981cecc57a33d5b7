//! Error types for the pdf2json library.
//!
//! Fatal errors abort the whole conversion and are returned as
//! `Err(ConvertError)` from the top-level `convert*` functions. There is
//! deliberately no error type for malformed table text: the table formatter
//! recovers locally with a best-effort partial array and a `tracing::warn!`,
//! so one garbled table never loses the rest of the document.

use crate::config::Strategy;
use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2json library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    // ── Partition errors ──────────────────────────────────────────────────
    /// The partitioning backend failed under the given strategy.
    ///
    /// Recovered by the invoker when a fallback strategy is configured;
    /// surfaces here only when no fallback retry is possible.
    #[error("Partitioning with strategy '{strategy}' failed: {detail}")]
    PartitionFailed { strategy: Strategy, detail: String },

    /// Both the primary and the fallback strategy failed.
    #[error(
        "Partitioning failed with strategy '{primary}' and fallback '{fallback}': {detail}\n\
         The document may be corrupt, encrypted, or unsupported by the backend."
    )]
    BothStrategiesFailed {
        primary: Strategy,
        fallback: Strategy,
        detail: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = ConvertError::FileNotFound {
            path: PathBuf::from("/tmp/missing.pdf"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/missing.pdf"), "got: {msg}");
        assert!(msg.contains("not found"));
    }

    #[test]
    fn partition_failed_names_strategy() {
        let e = ConvertError::PartitionFailed {
            strategy: Strategy::HiRes,
            detail: "backend exploded".into(),
        };
        assert!(e.to_string().contains("hi_res"));
        assert!(e.to_string().contains("backend exploded"));
    }

    #[test]
    fn both_strategies_failed_names_both() {
        let e = ConvertError::BothStrategiesFailed {
            primary: Strategy::OcrOnly,
            fallback: Strategy::Fast,
            detail: "no dice".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("ocr_only"));
        assert!(msg.contains("fast"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = ConvertError::NotAPdf {
            path: PathBuf::from("doc.pdf"),
            magic: *b"PK\x03\x04",
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }
}
