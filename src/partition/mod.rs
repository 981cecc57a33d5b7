//! The document-partitioning seam: trait, element model, and backends.
//!
//! Partitioning — layout analysis, text extraction, table-structure
//! inference — is the hard part of PDF understanding and is treated as a
//! black box behind the [`Partitioner`] trait. The crate ships one backend
//! ([`pdfium::PdfiumPartitioner`]); tests and embedders can inject their own
//! via [`crate::config::ConversionConfigBuilder::partitioner`].
//!
//! Backends are synchronous: the pdfium C++ library is not async-safe, so
//! the pipeline wraps every call in `tokio::task::spawn_blocking`.

pub mod pdfium;

use crate::config::Strategy;
use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Axis-aligned bounding box in page space, origin top-left.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Category assigned to an element by the partitioning backend.
///
/// The set mirrors the categories document-partitioning libraries commonly
/// emit. The classifier maps these onto the three output content types; any
/// category it doesn't special-case becomes a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementCategory {
    Title,
    NarrativeText,
    ListItem,
    Table,
    Image,
    FigureCaption,
    Header,
    Footer,
    Uncategorized,
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementCategory::Title => "Title",
            ElementCategory::NarrativeText => "NarrativeText",
            ElementCategory::ListItem => "ListItem",
            ElementCategory::Table => "Table",
            ElementCategory::Image => "Image",
            ElementCategory::FigureCaption => "FigureCaption",
            ElementCategory::Header => "Header",
            ElementCategory::Footer => "Footer",
            ElementCategory::Uncategorized => "Uncategorized",
        };
        f.write_str(name)
    }
}

/// One unit of content emitted by a partitioning backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Backend-assigned category.
    pub category: ElementCategory,
    /// Extracted text content (may be empty for images).
    pub text: String,
    /// 1-indexed page number. Backends that cannot attribute an element to
    /// a page leave this `None`; the grouper defaults it to page 1.
    pub page_number: Option<usize>,
    /// Bounding coordinates, when the backend provides them.
    pub bbox: Option<BBox>,
}

impl Element {
    /// Convenience constructor for text-bearing elements.
    pub fn new(category: ElementCategory, text: impl Into<String>, page_number: usize) -> Self {
        Self {
            category,
            text: text.into(),
            page_number: Some(page_number),
            bbox: None,
        }
    }
}

/// Options forwarded to [`Partitioner::partition`].
#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Processing strategy for this call.
    pub strategy: Strategy,
    /// Language hints (ISO 639 codes).
    pub languages: Vec<String>,
    /// Whether the backend should infer table structure.
    pub infer_table_structure: bool,
    /// User password for encrypted documents.
    pub password: Option<String>,
}

/// A document-partitioning backend.
///
/// Implementations own the hard work: deciding what is a title, a table, or
/// a figure, and in what order. The contract is intentionally small so a
/// scripted fake is a dozen lines.
pub trait Partitioner: Send + Sync {
    /// Partition the PDF at `path` into elements, in emission order.
    fn partition(
        &self,
        path: &Path,
        options: &PartitionOptions,
    ) -> Result<Vec<Element>, ConvertError>;

    /// Total page count of the PDF at `path`.
    ///
    /// Used for progress display and run statistics only; the conversion
    /// result is driven entirely by the partitioned elements.
    fn page_count(&self, path: &Path) -> Result<usize, ConvertError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_dimensions() {
        let b = BBox {
            x0: 10.0,
            y0: 20.0,
            x1: 110.0,
            y1: 50.0,
        };
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 30.0);
        assert_eq!(b.to_string(), "(10, 20, 110, 50)");
    }

    #[test]
    fn element_constructor_sets_page() {
        let el = Element::new(ElementCategory::NarrativeText, "hello", 3);
        assert_eq!(el.page_number, Some(3));
        assert!(el.bbox.is_none());
    }

    #[test]
    fn category_display_matches_backend_names() {
        assert_eq!(ElementCategory::FigureCaption.to_string(), "FigureCaption");
        assert_eq!(ElementCategory::NarrativeText.to_string(), "NarrativeText");
    }
}
