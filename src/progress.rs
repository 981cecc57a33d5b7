//! Progress-callback trait for conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the pipeline partitions the document and processes
//! each element.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a log record, or a terminal progress bar —
//! without the library knowing anything about how the host application
//! communicates. The events are informational only and never affect control
//! flow.

use std::sync::Arc;

/// Called by the conversion pipeline as it progresses through a document.
///
/// Implementations must be `Send + Sync`. All methods have default no-op
/// implementations so callers only override what they care about. The
/// pipeline processes elements sequentially, so events arrive in order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the page count is known, before partitioning.
    ///
    /// # Arguments
    /// * `total_pages` — page count of the source document
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when the partitioning backend has returned its elements.
    ///
    /// # Arguments
    /// * `element_count` — number of elements the backend emitted
    fn on_partition_complete(&self, element_count: usize) {
        let _ = element_count;
    }

    /// Called after each element has been classified and grouped.
    ///
    /// # Arguments
    /// * `index`         — 0-indexed position in emission order
    /// * `element_count` — total elements being processed
    fn on_element_processed(&self, index: usize, element_count: usize) {
        let _ = (index, element_count);
    }

    /// Called once after the document has been assembled.
    ///
    /// # Arguments
    /// * `content_pages` — pages that produced at least one content item
    /// * `total_items`   — content items emitted across all pages
    fn on_conversion_complete(&self, content_pages: usize, total_items: usize) {
        let _ = (content_pages, total_items);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        started_total: AtomicUsize,
        partitioned: AtomicUsize,
        processed: AtomicUsize,
        completed_items: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_conversion_start(&self, total_pages: usize) {
            self.started_total.store(total_pages, Ordering::SeqCst);
        }

        fn on_partition_complete(&self, element_count: usize) {
            self.partitioned.store(element_count, Ordering::SeqCst);
        }

        fn on_element_processed(&self, _index: usize, _element_count: usize) {
            self.processed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _content_pages: usize, total_items: usize) {
            self.completed_items.store(total_items, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(5);
        cb.on_partition_complete(12);
        cb.on_element_processed(0, 12);
        cb.on_conversion_complete(5, 12);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            started_total: AtomicUsize::new(0),
            partitioned: AtomicUsize::new(0),
            processed: AtomicUsize::new(0),
            completed_items: AtomicUsize::new(0),
        };

        tracker.on_conversion_start(3);
        tracker.on_partition_complete(4);
        for i in 0..4 {
            tracker.on_element_processed(i, 4);
        }
        tracker.on_conversion_complete(3, 4);

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.partitioned.load(Ordering::SeqCst), 4);
        assert_eq!(tracker.processed.load(Ordering::SeqCst), 4);
        assert_eq!(tracker.completed_items.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ConversionProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_conversion_start(10);
        cb.on_partition_complete(20);
    }
}
