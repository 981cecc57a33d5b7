//! Pipeline stages for PDF-to-JSON conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch partitioning backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ invoke ──▶ classify ──▶ table ──▶ assemble
//! (path)   (backend)   (grouping)  (2D arrays)  (JSON model)
//! ```
//!
//! 1. [`input`]    — validate the PDF path (exists, readable, `%PDF` magic)
//! 2. [`invoke`]   — call the partitioning backend; retry once on the
//!    fallback strategy; runs in `spawn_blocking` because pdfium is not
//!    async-safe
//! 3. [`classify`] — map categories to content types, run the section
//!    heuristics, group items by page
//! 4. [`table`]    — reformat markdown-style table text into 2D cell arrays
//! 5. [`assemble`] — order pages ascending and build the output document

pub mod assemble;
pub mod classify;
pub mod input;
pub mod invoke;
pub mod table;
