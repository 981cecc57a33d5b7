//! Partition invocation with a single fallback retry.
//!
//! ## Retry policy
//!
//! On any backend error under the primary strategy we log a warning and
//! retry exactly once with the configured fallback strategy, with
//! table-structure inference off (the fallback is the cheap mode). If the
//! fallback also fails the whole run fails fatally. No backoff, no further
//! retries — this is a single best-effort fallback, not a resilience system.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::partition::{Element, PartitionOptions, Partitioner};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Partition the document, retrying once on the fallback strategy.
///
/// Returns the elements and the strategy that actually produced them.
pub async fn partition_with_fallback(
    partitioner: &Arc<dyn Partitioner>,
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<(Vec<Element>, crate::config::Strategy), ConvertError> {
    let primary = PartitionOptions {
        strategy: config.strategy,
        languages: config.languages.clone(),
        infer_table_structure: config.infer_table_structure,
        password: config.password.clone(),
    };

    info!(
        "Partitioning {} with strategy '{}'",
        pdf_path.display(),
        config.strategy
    );

    match run_partition(partitioner, pdf_path, primary).await {
        Ok(elements) => Ok((elements, config.strategy)),
        Err(e) if config.strategy != config.fallback_strategy => {
            warn!(
                "Strategy '{}' failed: {}. Falling back to '{}'.",
                config.strategy, e, config.fallback_strategy
            );

            let fallback = PartitionOptions {
                strategy: config.fallback_strategy,
                languages: config.languages.clone(),
                infer_table_structure: false,
                password: config.password.clone(),
            };

            run_partition(partitioner, pdf_path, fallback)
                .await
                .map(|elements| (elements, config.fallback_strategy))
                .map_err(|fe| ConvertError::BothStrategiesFailed {
                    primary: config.strategy,
                    fallback: config.fallback_strategy,
                    detail: fe.to_string(),
                })
        }
        Err(e) => Err(e),
    }
}

/// Run one partition call on the blocking thread pool.
///
/// Backends wrap pdfium, which is not async-safe; `spawn_blocking` keeps
/// the Tokio workers free while the backend does its CPU-bound work.
async fn run_partition(
    partitioner: &Arc<dyn Partitioner>,
    pdf_path: &Path,
    options: PartitionOptions,
) -> Result<Vec<Element>, ConvertError> {
    let partitioner = Arc::clone(partitioner);
    let path = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || partitioner.partition(&path, &options))
        .await
        .map_err(|e| ConvertError::Internal(format!("Partition task panicked: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;
    use crate::partition::{Element, ElementCategory};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Fails on the listed strategies, succeeds on everything else.
    struct FlakyPartitioner {
        fail_on: Vec<Strategy>,
        calls: AtomicUsize,
        seen: Mutex<Vec<Strategy>>,
    }

    impl FlakyPartitioner {
        fn new(fail_on: &[Strategy]) -> Arc<Self> {
            Arc::new(Self {
                fail_on: fail_on.to_vec(),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Partitioner for FlakyPartitioner {
        fn partition(
            &self,
            _path: &Path,
            options: &PartitionOptions,
        ) -> Result<Vec<Element>, ConvertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(options.strategy);
            if self.fail_on.contains(&options.strategy) {
                return Err(ConvertError::PartitionFailed {
                    strategy: options.strategy,
                    detail: "scripted failure".into(),
                });
            }
            Ok(vec![Element::new(
                ElementCategory::NarrativeText,
                "hello",
                1,
            )])
        }

        fn page_count(&self, _path: &Path) -> Result<usize, ConvertError> {
            Ok(1)
        }
    }

    fn config(primary: Strategy, fallback: Strategy) -> ConversionConfig {
        ConversionConfig::builder()
            .strategy(primary)
            .fallback_strategy(fallback)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn primary_success_does_not_retry() {
        let p = FlakyPartitioner::new(&[]);
        let cfg = config(Strategy::HiRes, Strategy::Fast);
        let (elements, used) =
            partition_with_fallback(&(p.clone() as Arc<dyn Partitioner>), Path::new("x"), &cfg)
                .await
                .unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(used, Strategy::HiRes);
        assert_eq!(p.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn primary_failure_retries_on_fallback() {
        let p = FlakyPartitioner::new(&[Strategy::HiRes]);
        let cfg = config(Strategy::HiRes, Strategy::Fast);
        let (_, used) =
            partition_with_fallback(&(p.clone() as Arc<dyn Partitioner>), Path::new("x"), &cfg)
                .await
                .unwrap();
        assert_eq!(used, Strategy::Fast);
        assert_eq!(
            *p.seen.lock().unwrap(),
            vec![Strategy::HiRes, Strategy::Fast]
        );
    }

    #[tokio::test]
    async fn fallback_retry_disables_table_inference() {
        struct InferenceProbe {
            seen_inference: Mutex<Vec<bool>>,
        }
        impl Partitioner for InferenceProbe {
            fn partition(
                &self,
                _path: &Path,
                options: &PartitionOptions,
            ) -> Result<Vec<Element>, ConvertError> {
                self.seen_inference
                    .lock()
                    .unwrap()
                    .push(options.infer_table_structure);
                if options.strategy == Strategy::HiRes {
                    return Err(ConvertError::PartitionFailed {
                        strategy: options.strategy,
                        detail: "scripted".into(),
                    });
                }
                Ok(vec![])
            }
            fn page_count(&self, _path: &Path) -> Result<usize, ConvertError> {
                Ok(1)
            }
        }

        let probe = Arc::new(InferenceProbe {
            seen_inference: Mutex::new(Vec::new()),
        });
        let cfg = config(Strategy::HiRes, Strategy::Fast);
        partition_with_fallback(&(probe.clone() as Arc<dyn Partitioner>), Path::new("x"), &cfg)
            .await
            .unwrap();
        assert_eq!(*probe.seen_inference.lock().unwrap(), vec![true, false]);
    }

    #[tokio::test]
    async fn both_failures_escalate() {
        let p = FlakyPartitioner::new(&[Strategy::HiRes, Strategy::Fast]);
        let cfg = config(Strategy::HiRes, Strategy::Fast);
        let err =
            partition_with_fallback(&(p.clone() as Arc<dyn Partitioner>), Path::new("x"), &cfg)
                .await
                .unwrap_err();
        assert!(matches!(err, ConvertError::BothStrategiesFailed { .. }));
        assert_eq!(p.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn no_retry_when_primary_equals_fallback() {
        let p = FlakyPartitioner::new(&[Strategy::Fast]);
        let cfg = config(Strategy::Fast, Strategy::Fast);
        let err =
            partition_with_fallback(&(p.clone() as Arc<dyn Partitioner>), Path::new("x"), &cfg)
                .await
                .unwrap_err();
        assert!(matches!(err, ConvertError::PartitionFailed { .. }));
        assert_eq!(p.calls.load(Ordering::SeqCst), 1);
    }
}
