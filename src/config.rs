//! Configuration types for PDF-to-JSON conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs, serialise them for logging, and diff two runs
//! to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::ConvertError;
use crate::partition::Partitioner;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A named PDF-processing mode, trading accuracy for speed and robustness.
///
/// The strategy is passed verbatim to the partitioning backend. The default
/// pdfium backend implements `hi_res` and `fast`; `ocr_only` fails there,
/// which exercises the fallback path rather than silently degrading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Layout-aware partitioning with table-structure inference. Slowest,
    /// most accurate. (default)
    HiRes,
    /// Plain text-order extraction without layout analysis.
    Fast,
    /// Rasterise and OCR every page, ignoring any embedded text.
    OcrOnly,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::HiRes => "hi_res",
            Strategy::Fast => "fast",
            Strategy::OcrOnly => "ocr_only",
        })
    }
}

impl FromStr for Strategy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hi_res" | "hi-res" | "hires" => Ok(Strategy::HiRes),
            "fast" => Ok(Strategy::Fast),
            "ocr_only" | "ocr-only" | "ocr" => Ok(Strategy::OcrOnly),
            other => Err(ConvertError::InvalidConfig(format!(
                "Unknown strategy '{other}' (expected hi_res, fast, or ocr_only)"
            ))),
        }
    }
}

/// Configuration for a PDF-to-JSON conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2json::{ConversionConfig, Strategy};
///
/// let config = ConversionConfig::builder()
///     .strategy(Strategy::Fast)
///     .languages(["eng"])
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Primary partitioning strategy. Default: [`Strategy::HiRes`].
    ///
    /// `hi_res` asks the backend for layout analysis and table-structure
    /// inference; `fast` trades that for raw text-order extraction, which is
    /// an order of magnitude quicker on born-digital PDFs.
    pub strategy: Strategy,

    /// Strategy to retry with when the primary strategy fails. Default: [`Strategy::Fast`].
    ///
    /// Exactly one retry, no backoff. This is a single best-effort fallback,
    /// not a resilience system: if the fallback also fails the run fails
    /// fatally. When `strategy == fallback_strategy` no retry is attempted.
    pub fallback_strategy: Strategy,

    /// Languages hint forwarded to the backend (ISO 639 codes). Default: `["eng"]`.
    pub languages: Vec<String>,

    /// Ask the backend to infer table structure. Default: true.
    ///
    /// Only honoured by strategies that do layout analysis. The fallback
    /// retry always runs with this off, matching the cheaper retry mode.
    pub infer_table_structure: bool,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Pre-constructed partitioning backend. Takes precedence over the
    /// default pdfium backend. Useful in tests or when wiring a different
    /// engine behind the same trait.
    pub partitioner: Option<Arc<dyn Partitioner>>,

    /// Progress callback fired around partitioning and per-element processing.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::HiRes,
            fallback_strategy: Strategy::Fast,
            languages: vec!["eng".to_string()],
            infer_table_structure: true,
            password: None,
            partitioner: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("strategy", &self.strategy)
            .field("fallback_strategy", &self.fallback_strategy)
            .field("languages", &self.languages)
            .field("infer_table_structure", &self.infer_table_structure)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field(
                "partitioner",
                &self.partitioner.as_ref().map(|_| "<dyn Partitioner>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn fallback_strategy(mut self, strategy: Strategy) -> Self {
        self.config.fallback_strategy = strategy;
        self
    }

    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn infer_table_structure(mut self, v: bool) -> Self {
        self.config.infer_table_structure = v;
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn partitioner(mut self, partitioner: Arc<dyn Partitioner>) -> Self {
        self.config.partitioner = Some(partitioner);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.languages.is_empty() {
            return Err(ConvertError::InvalidConfig(
                "At least one language hint is required".into(),
            ));
        }
        if c.languages.iter().any(|l| l.trim().is_empty()) {
            return Err(ConvertError::InvalidConfig(
                "Language hints must be non-empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trips_through_display_and_fromstr() {
        for s in [Strategy::HiRes, Strategy::Fast, Strategy::OcrOnly] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn strategy_accepts_common_spellings() {
        assert_eq!("hi-res".parse::<Strategy>().unwrap(), Strategy::HiRes);
        assert_eq!("OCR".parse::<Strategy>().unwrap(), Strategy::OcrOnly);
        assert!("turbo".parse::<Strategy>().is_err());
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = ConversionConfig::default();
        assert_eq!(c.strategy, Strategy::HiRes);
        assert_eq!(c.fallback_strategy, Strategy::Fast);
        assert_eq!(c.languages, vec!["eng"]);
        assert!(c.infer_table_structure);
    }

    #[test]
    fn builder_rejects_empty_languages() {
        let err = ConversionConfig::builder()
            .languages(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn builder_sets_fields() {
        let c = ConversionConfig::builder()
            .strategy(Strategy::Fast)
            .fallback_strategy(Strategy::OcrOnly)
            .infer_table_structure(false)
            .languages(["eng", "fra"])
            .build()
            .unwrap();
        assert_eq!(c.strategy, Strategy::Fast);
        assert_eq!(c.fallback_strategy, Strategy::OcrOnly);
        assert!(!c.infer_table_structure);
        assert_eq!(c.languages.len(), 2);
    }
}
