//! Output model: the documented JSON schema plus run statistics.
//!
//! The wire shape is fixed:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "page_number": 1,
//!       "content": [
//!         {
//!           "type": "paragraph",
//!           "section": "1.1",
//!           "sub_section": "Introduction",
//!           "description": "Section header",
//!           "text": "1.1 Introduction",
//!           "table_data": [["a", "b"]]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! `table_data` is omitted entirely for non-table items; every table item
//! carries a non-null (possibly empty) 2D array.

use serde::{Deserialize, Serialize};

/// The `type` field of a [`ContentItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Paragraph,
    Table,
    Chart,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ContentType::Paragraph => "paragraph",
            ContentType::Table => "table",
            ContentType::Chart => "chart",
        })
    }
}

/// One entry in a page's `content` array. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Output record type: paragraph, table, or chart.
    #[serde(rename = "type")]
    pub item_type: ContentType,
    /// Section context in effect when the item was emitted (e.g. "1.1").
    pub section: Option<String>,
    /// Sub-section context in effect when the item was emitted.
    pub sub_section: Option<String>,
    /// Descriptive text, e.g. "Table on page 3" or "Section header".
    pub description: Option<String>,
    /// Extracted text. `None` for tables and charts.
    pub text: Option<String>,
    /// 2D array of cell strings. Always `Some` for tables, omitted otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<Vec<Vec<String>>>,
}

/// Ordered collection of content items sharing a page number.
///
/// `page_number` is 1-indexed; content order follows the backend's emission
/// order within the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: usize,
    pub content: Vec<ContentItem>,
}

/// The full structured document: pages ordered by ascending page number.
///
/// Only pages that contain at least one content item are emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub pages: Vec<Page>,
}

impl StructuredDocument {
    /// Total content items across all pages.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.content.len()).sum()
    }
}

/// Statistics describing a completed conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Page count of the source document.
    pub total_pages: usize,
    /// Pages that produced at least one content item.
    pub content_pages: usize,
    /// Content items emitted across all pages.
    pub total_items: usize,
    /// Strategy that actually produced the elements (fallback if the
    /// primary failed).
    pub strategy_used: crate::config::Strategy,
    /// End-to-end wall-clock duration.
    pub total_duration_ms: u64,
    /// Time spent inside the partitioning backend.
    pub partition_duration_ms: u64,
}

/// Complete result of a conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// The structured document, ready to serialise.
    pub document: StructuredDocument,
    /// Run statistics.
    pub stats: ConversionStats,
}

/// PDF document metadata, extracted without converting content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub modification_date: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> ContentItem {
        ContentItem {
            item_type: ContentType::Paragraph,
            section: None,
            sub_section: None,
            description: None,
            text: Some(text.to_string()),
            table_data: None,
        }
    }

    #[test]
    fn type_field_serialises_lowercase() {
        let json = serde_json::to_string(&paragraph("x")).unwrap();
        assert!(json.contains(r#""type":"paragraph""#), "got: {json}");
    }

    #[test]
    fn table_data_key_omitted_when_none() {
        let json = serde_json::to_string(&paragraph("x")).unwrap();
        assert!(!json.contains("table_data"));
    }

    #[test]
    fn table_data_key_present_for_tables() {
        let item = ContentItem {
            item_type: ContentType::Table,
            section: None,
            sub_section: None,
            description: Some("Table on page 1".into()),
            text: None,
            table_data: Some(vec![vec!["a".into(), "b".into()]]),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""table_data":[["a","b"]]"#), "got: {json}");
    }

    #[test]
    fn item_count_sums_pages() {
        let doc = StructuredDocument {
            pages: vec![
                Page {
                    page_number: 1,
                    content: vec![paragraph("a"), paragraph("b")],
                },
                Page {
                    page_number: 2,
                    content: vec![paragraph("c")],
                },
            ],
        };
        assert_eq!(doc.item_count(), 3);
    }
}
