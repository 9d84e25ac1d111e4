//! sheet-context - spreadsheet ingestion and language-model context building
//!
//! Turns spreadsheet bytes into a [`Workbook`], then derives a display
//! summary, cell search results and a size-bounded prompt context from it.

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod parser;
pub mod processor;
pub mod prompts;
pub mod search;
pub mod summary;

pub use config::{ConfigError, ProcessorConfig};
pub use context::{format_for_model, format_for_model_with};
pub use error::ProcessorError;
pub use model::{
    CellValue, RowContext, SearchResult, Sheet, Workbook, HEADER_ROW_OFFSET, MISSING_CELL,
};
pub use parser::parse_workbook;
pub use processor::SheetProcessor;
pub use prompts::{build_prompt, PromptTemplate};
pub use search::search;
pub use summary::{summarize, summarize_with};
