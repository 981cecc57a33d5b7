//! Element classification and per-page grouping.
//!
//! Two explicit tables drive this stage, per the schema contract:
//!
//! * [`TYPE_MAP`] — the fixed category→type mapping. Anything not listed
//!   is a paragraph.
//! * [`detect_section`] — an ordered set of section-detection rules,
//!   checked in priority order, first match wins. This is pattern
//!   matching, not a parser: false positives and negatives are expected
//!   and are not a contract.
//!
//! The "current section" context is an explicit [`SectionContext`]
//! accumulator threaded through the element loop — never module-level
//! state — so a run is a pure function of its input elements.

use crate::output::{ContentItem, ContentType};
use crate::partition::{Element, ElementCategory};
use crate::pipeline::table::format_table;
use crate::progress::ProgressCallback;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// ── Category → type mapping ──────────────────────────────────────────────

/// Fixed category→type mapping. Categories absent from this table map to
/// [`ContentType::Paragraph`].
const TYPE_MAP: &[(ElementCategory, ContentType)] = &[
    (ElementCategory::Table, ContentType::Table),
    (ElementCategory::Image, ContentType::Chart),
    (ElementCategory::FigureCaption, ContentType::Chart),
];

/// Map a backend category onto an output content type.
pub fn map_content_type(category: ElementCategory) -> ContentType {
    TYPE_MAP
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, t)| *t)
        .unwrap_or(ContentType::Paragraph)
}

// ── Section detection ────────────────────────────────────────────────────

static RE_NUMBERED_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)*)\s+(.+)$").unwrap());

static RE_TITLE_CASE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z ]+$").unwrap());

/// A detected section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Section identifier: the dotted numeric prefix (e.g. "1.1"), or the
    /// whole line for unnumbered headers.
    pub section: String,
    /// Header label following a numeric prefix (e.g. "Introduction").
    pub sub_section: Option<String>,
    /// True when the numbered-section rule matched.
    pub numbered: bool,
}

/// Run the section-detection rules against one element's text.
///
/// Rules, in priority order (first match wins):
/// 1. Numbered header: `1.1 Introduction` → section `1.1`,
///    sub_section `Introduction`.
/// 2. Standalone title-case line: `Related Work` → section is the whole
///    line, no sub_section.
pub fn detect_section(text: &str) -> Option<SectionMatch> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = RE_NUMBERED_SECTION.captures(text) {
        return Some(SectionMatch {
            section: caps[1].to_string(),
            sub_section: Some(caps[2].trim().to_string()),
            numbered: true,
        });
    }

    if RE_TITLE_CASE_LINE.is_match(text) {
        return Some(SectionMatch {
            section: text.to_string(),
            sub_section: None,
            numbered: false,
        });
    }

    None
}

// ── Grouping ─────────────────────────────────────────────────────────────

/// The "current section" context applied to elements until the next header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionContext {
    pub section: Option<String>,
    pub sub_section: Option<String>,
}

impl SectionContext {
    /// Update the context from a `Title` element.
    ///
    /// A detected match takes precedence; otherwise the title's full text
    /// becomes the section and the sub-section is cleared.
    fn observe_title(&mut self, text: &str, detected: Option<&SectionMatch>) {
        match detected {
            Some(m) => {
                self.section = Some(m.section.clone());
                self.sub_section = m.sub_section.clone();
            }
            None => {
                self.section = Some(text.to_string());
                self.sub_section = None;
            }
        }
    }
}

/// Classify every element and group the resulting content items by page.
///
/// Elements are processed in backend emission order; the returned map's
/// keys are 1-indexed page numbers (elements without a page default to
/// page 1), iterated in ascending order by the assembler.
pub fn classify_elements(
    elements: &[Element],
    progress: Option<&ProgressCallback>,
) -> BTreeMap<usize, Vec<ContentItem>> {
    let mut pages: BTreeMap<usize, Vec<ContentItem>> = BTreeMap::new();
    let mut context = SectionContext::default();

    for (index, element) in elements.iter().enumerate() {
        let page_number = element.page_number.unwrap_or(1);
        let item = classify_element(element, page_number, &mut context);
        pages.entry(page_number).or_default().push(item);

        if let Some(cb) = progress {
            cb.on_element_processed(index, elements.len());
        }
    }

    pages
}

/// Classify one element, updating the section context in place.
fn classify_element(
    element: &Element,
    page_number: usize,
    context: &mut SectionContext,
) -> ContentItem {
    let item_type = map_content_type(element.category);
    let detected = detect_section(&element.text);

    if element.category == ElementCategory::Title {
        context.observe_title(&element.text, detected.as_ref());
    }

    let mut description: Option<String> = None;
    let mut text: Option<String> = Some(element.text.clone());
    let mut table_data: Option<Vec<Vec<String>>> = None;

    match item_type {
        ContentType::Table => {
            table_data = Some(format_table(&element.text));
            description = Some(format!("Table on page {page_number}"));
            text = None;
        }
        ContentType::Chart => {
            description = Some(format!(
                "Chart/Image on page {page_number} (category: {})",
                element.category
            ));
            // Any text the backend attached is likely a caption, not content.
            text = None;
        }
        ContentType::Paragraph => {
            if detected.as_ref().is_some_and(|m| m.numbered) {
                description = Some("Section header".to_string());
            }
        }
    }

    if let Some(bbox) = element.bbox {
        let base = description.take().unwrap_or_default();
        description = Some(format!("{base} (bbox={bbox})"));
    }

    ContentItem {
        item_type,
        section: context.section.clone(),
        sub_section: context.sub_section.clone(),
        description,
        text,
        table_data,
    }
}
