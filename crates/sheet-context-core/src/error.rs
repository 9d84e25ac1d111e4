//! Error types for workbook ingestion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to process spreadsheet: {0}")]
    Parse(String),
    #[error("Input exceeds size limit: {size} bytes (max: {max} bytes)")]
    InputTooLarge { size: usize, max: usize },
    #[error("Empty input not allowed")]
    EmptyInput,
}

impl ProcessorError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessorError::parse("workbook contains no sheets");
        assert_eq!(err.to_string(), "Failed to process spreadsheet: workbook contains no sheets");

        let err = ProcessorError::InputTooLarge { size: 20, max: 10 };
        assert!(err.to_string().contains("20 bytes"));
    }
}
