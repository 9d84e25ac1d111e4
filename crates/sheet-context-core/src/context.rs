//! Prompt-ready serialization of a workbook
//!
//! Each sheet is emitted with its headers and at most a fixed number of rows.
//! Anything beyond the cap is reduced to a single "... and N more rows" line,
//! so the result is a sample of the data and not a complete copy of it.

use std::fmt::Write as _;

use crate::model::Sheet;

/// Rows emitted per sheet when no configuration is supplied.
pub const DEFAULT_ROW_LIMIT: usize = 10;

/// Format sheets for a model prompt with the default row cap.
#[must_use]
pub fn format_for_model(sheets: &[Sheet]) -> String {
    format_for_model_with(sheets, DEFAULT_ROW_LIMIT)
}

/// Format sheets for a model prompt, emitting at most `row_limit` rows per sheet.
#[must_use]
pub fn format_for_model_with(sheets: &[Sheet], row_limit: usize) -> String {
    let mut formatted = String::from("Excel Dataset Information:\n\n");

    for sheet in sheets {
        let _ = writeln!(formatted, "=== Sheet: {} ===", sheet.name());
        let _ = writeln!(formatted, "Headers: {}\n", sheet.headers().join(" | "));

        for (index, row) in sheet.rows().iter().take(row_limit).enumerate() {
            let _ = writeln!(formatted, "Row {}: {}", index + 1, sheet.render_row(row, " | "));
        }

        let omitted = omitted_rows(sheet, row_limit);
        if omitted > 0 {
            let _ = writeln!(formatted, "... and {omitted} more rows");
        }

        formatted.push('\n');
    }

    formatted
}

/// Number of rows of `sheet` left out by a cap of `row_limit`.
#[must_use]
pub fn omitted_rows(sheet: &Sheet, row_limit: usize) -> usize {
    sheet.row_count().saturating_sub(row_limit)
}
