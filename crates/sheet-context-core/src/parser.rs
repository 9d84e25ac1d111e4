//! Spreadsheet decoding (XLSX/XLSM/XLSB/XLS/ODS) into the workbook model

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::config::ProcessorConfig;
use crate::error::ProcessorError;
use crate::model::{CellValue, Sheet, Workbook};
use crate::summary;

/// Decode spreadsheet bytes and build a [`Workbook`].
///
/// The first row of every sheet becomes its header row; the remaining rows are
/// kept verbatim, in source order.
///
/// # Errors
/// Returns [`ProcessorError::EmptyInput`] or [`ProcessorError::InputTooLarge`]
/// when the input fails validation, and [`ProcessorError::Parse`] when the
/// container cannot be decoded or holds no sheets.
pub fn parse_workbook(bytes: &[u8], config: &ProcessorConfig) -> Result<Workbook, ProcessorError> {
    validate_input(bytes, config.max_input_bytes)?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|err| ProcessorError::parse(format!("unrecognized spreadsheet: {err}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ProcessorError::parse("workbook contains no sheets"));
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
            ProcessorError::parse(format!("failed to read sheet '{sheet_name}': {err}"))
        })?;

        let grid: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| trim_trailing_blanks(row.iter().map(cell_from_data).collect()))
            .collect();

        let sheet = build_sheet(sheet_name, grid);
        tracing::debug!(
            "Read sheet '{}': {} rows, {} columns",
            sheet.name(),
            sheet.row_count(),
            sheet.column_count()
        );
        sheets.push(sheet);
    }

    let summary = summary::summarize_with(&sheets, config.summary_sample_rows);
    Ok(Workbook::new(sheets, summary))
}

fn validate_input(bytes: &[u8], max: usize) -> Result<(), ProcessorError> {
    if bytes.is_empty() {
        return Err(ProcessorError::EmptyInput);
    }
    if bytes.len() > max {
        return Err(ProcessorError::InputTooLarge {
            size: bytes.len(),
            max,
        });
    }
    Ok(())
}

/// Split a raw grid into a header row and data rows.
pub(crate) fn build_sheet(name: String, grid: Vec<Vec<CellValue>>) -> Sheet {
    let mut rows = grid.into_iter();
    let headers = rows
        .next()
        .map(|first| {
            first
                .iter()
                .map(|cell| {
                    if cell.is_blank() {
                        String::new()
                    } else {
                        cell.to_string()
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    Sheet::new(name, headers, rows.collect())
}

/// Rows end at their last populated cell, so short rows stay short.
fn trim_trailing_blanks(mut row: Vec<CellValue>) -> Vec<CellValue> {
    while row.last().is_some_and(CellValue::is_blank) {
        row.pop();
    }
    row
}

#[allow(clippy::cast_precision_loss)]
fn cell_from_data(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        // Serial date value, as raw readers expose it.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_rejects_empty_input() {
        let result = parse_workbook(&[], &ProcessorConfig::default());
        assert!(matches!(result, Err(ProcessorError::EmptyInput)));
    }

    #[test]
    fn test_rejects_oversized_input() {
        let config = ProcessorConfig { max_input_bytes: 4, ..ProcessorConfig::default() };
        let result = parse_workbook(b"12345", &config);
        assert!(matches!(result, Err(ProcessorError::InputTooLarge { size: 5, max: 4 })));
    }

    #[test]
    fn test_rejects_non_spreadsheet_bytes() {
        let result = parse_workbook(b"name,age\nalice,30\n", &ProcessorConfig::default());
        match result {
            Err(ProcessorError::Parse(message)) => {
                assert!(message.starts_with("unrecognized spreadsheet"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_from_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(cell_from_data(&Data::Bool(false)), CellValue::Boolean(false));
        assert_eq!(cell_from_data(&Data::Empty), CellValue::Empty);
        assert_eq!(
            cell_from_data(&Data::Error(CellErrorType::Div0)),
            CellValue::Text("#DIV/0!".to_string())
        );
        assert_eq!(
            cell_from_data(&Data::DurationIso("PT1H".to_string())),
            CellValue::Text("PT1H".to_string())
        );
    }

    #[test]
    fn test_trailing_blanks_trimmed_inner_blanks_kept() {
        let row = vec![
            CellValue::from("a"),
            CellValue::Empty,
            CellValue::from("c"),
            CellValue::Empty,
            CellValue::Text(String::new()),
        ];
        let trimmed = trim_trailing_blanks(row);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[1], CellValue::Empty);
        assert!(trim_trailing_blanks(vec![CellValue::Empty]).is_empty());
    }

    #[test]
    fn test_build_sheet_splits_header_row() {
        let grid = vec![
            vec![CellValue::from("Name"), CellValue::Empty, CellValue::Number(2024.0)],
            vec![CellValue::from("Alice"), CellValue::Number(1.0)],
            vec![],
        ];
        let sheet = build_sheet("Data".to_string(), grid);
        assert_eq!(sheet.headers(), ["Name", "", "2024"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.column_count(), 3);
        assert!(sheet.rows()[1].is_empty());
    }

    #[test]
    fn test_build_sheet_from_empty_grid() {
        let sheet = build_sheet("Blank".to_string(), Vec::new());
        assert!(sheet.headers().is_empty());
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.column_count(), 0);
    }
}
