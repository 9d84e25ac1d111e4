//! Processor handle holding the most recently ingested workbook
//!
//! The handle owns a single cache slot. Every ingestion replaces the slot
//! wholesale (last writer wins), and operations that are not handed sheets
//! explicitly read from it. Overlapping ingestions are not serialized: the
//! slot ends up holding whichever finished last.
//!
//! One slot means one document at a time. Front ends juggling several
//! documents should create one handle per document.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::config::ProcessorConfig;
use crate::context;
use crate::error::ProcessorError;
use crate::model::{SearchResult, Sheet, Workbook};
use crate::parser;
use crate::prompts::{self, PromptTemplate};
use crate::search;
use crate::summary;

static SHARED: Lazy<SheetProcessor> = Lazy::new(SheetProcessor::default);

#[derive(Debug, Default)]
pub struct SheetProcessor {
    config: ProcessorConfig,
    cached: RwLock<Option<Arc<Workbook>>>,
}

impl SheetProcessor {
    #[must_use]
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            cached: RwLock::new(None),
        }
    }

    /// Process-wide instance with default configuration, built on first use.
    #[must_use]
    pub fn shared() -> &'static SheetProcessor {
        &SHARED
    }

    #[must_use]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Parse spreadsheet bytes and make the result the cached workbook.
    ///
    /// # Errors
    /// Returns an error when the bytes are empty, too large, or not a readable
    /// spreadsheet. The cache is left untouched on failure.
    pub fn ingest(&self, bytes: &[u8]) -> Result<Arc<Workbook>, ProcessorError> {
        let workbook = match parser::parse_workbook(bytes, &self.config) {
            Ok(workbook) => Arc::new(workbook),
            Err(e) => {
                tracing::warn!("Failed to ingest spreadsheet: {}", e);
                return Err(e);
            }
        };

        let replaced = self.cached.write().replace(Arc::clone(&workbook)).is_some();
        tracing::info!(
            "Ingested workbook with {} sheet(s) ({} bytes){}",
            workbook.sheets().len(),
            bytes.len(),
            if replaced { ", replacing cached workbook" } else { "" }
        );
        Ok(workbook)
    }

    /// Read a spreadsheet file and ingest it.
    ///
    /// # Errors
    /// Returns [`ProcessorError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`SheetProcessor::ingest`].
    pub async fn ingest_path(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Workbook>, ProcessorError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.ingest(&bytes)
    }

    #[must_use]
    pub fn cached(&self) -> Option<Arc<Workbook>> {
        self.cached.read().clone()
    }

    pub fn clear(&self) {
        self.cached.write().take();
    }

    /// Cached sheet with exactly this name.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<Sheet> {
        let workbook = self.cached()?;
        workbook.sheet(name).cloned()
    }

    /// All cached sheets, or none when nothing has been ingested.
    #[must_use]
    pub fn all_sheets(&self) -> Vec<Sheet> {
        self.cached().map(|workbook| workbook.sheets().to_vec()).unwrap_or_default()
    }

    /// Summarize `sheets`, or the cached workbook when `None`.
    #[must_use]
    pub fn summarize(&self, sheets: Option<&[Sheet]>) -> String {
        self.with_sheets(sheets, |sheets| {
            summary::summarize_with(sheets, self.config.summary_sample_rows)
        })
    }

    /// Search `sheets`, or the cached workbook when `None`.
    #[must_use]
    pub fn search(&self, query: &str, sheets: Option<&[Sheet]>) -> Vec<SearchResult> {
        self.with_sheets(sheets, |sheets| search::search(query, sheets))
    }

    /// Model context for `sheets`, or the cached workbook when `None`.
    #[must_use]
    pub fn format_for_model(&self, sheets: Option<&[Sheet]>) -> String {
        self.with_sheets(sheets, |sheets| {
            context::format_for_model_with(sheets, self.config.context_row_limit)
        })
    }

    /// Full prompt for `question` over the cached workbook. Without a cached
    /// workbook the question is returned unchanged.
    #[must_use]
    pub fn prompt_for(&self, template: PromptTemplate, question: &str) -> String {
        let Some(workbook) = self.cached() else {
            return question.to_string();
        };
        let context =
            context::format_for_model_with(workbook.sheets(), self.config.context_row_limit);
        tracing::debug!("Building {} prompt ({} context bytes)", template.as_str(), context.len());
        prompts::build_prompt(template, &context, question)
    }

    fn with_sheets<R>(&self, sheets: Option<&[Sheet]>, f: impl FnOnce(&[Sheet]) -> R) -> R {
        if let Some(sheets) = sheets {
            return f(sheets);
        }
        let cached = self.cached();
        let sheets: &[Sheet] = match cached.as_deref() {
            Some(workbook) => workbook.sheets(),
            None => &[],
        };
        f(sheets)
    }
}
