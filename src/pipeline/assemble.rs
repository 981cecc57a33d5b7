//! Final assembly: grouped content items → [`StructuredDocument`].

use crate::output::{ContentItem, Page, StructuredDocument};
use std::collections::BTreeMap;

/// Assemble per-page item lists into the output document.
///
/// The map is keyed by page number, so iteration already yields pages in
/// ascending order; pages without content simply have no entry and are
/// absent from the output.
pub fn assemble(pages: BTreeMap<usize, Vec<ContentItem>>) -> StructuredDocument {
    StructuredDocument {
        pages: pages
            .into_iter()
            .map(|(page_number, content)| Page {
                page_number,
                content,
            })
            .collect(),
    }
}
