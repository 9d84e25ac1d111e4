//! Short display summary of a workbook

use std::fmt::Write as _;

use crate::model::Sheet;

/// Rows sampled per sheet when no configuration is supplied.
pub const DEFAULT_SAMPLE_ROWS: usize = 3;

/// Summarize sheets with the default sample size.
#[must_use]
pub fn summarize(sheets: &[Sheet]) -> String {
    summarize_with(sheets, DEFAULT_SAMPLE_ROWS)
}

/// Summarize sheets: shape, headers and the first `sample_rows` data rows of each.
///
/// Blank cells render as `N/A`. The output is lossy; use
/// [`crate::context::format_for_model`] when the rows themselves matter.
#[must_use]
pub fn summarize_with(sheets: &[Sheet], sample_rows: usize) -> String {
    let mut summary = format!("Excel file contains {} sheet(s):\n\n", sheets.len());

    for (index, sheet) in sheets.iter().enumerate() {
        let _ = writeln!(summary, "Sheet {}: \"{}\"", index + 1, sheet.name());
        let _ = writeln!(summary, "- Rows: {}", sheet.row_count());
        let _ = writeln!(summary, "- Columns: {}", sheet.column_count());
        let _ = writeln!(summary, "- Headers: {}", sheet.headers().join(", "));

        if sheet.row_count() > 0 && sample_rows > 0 {
            let _ = writeln!(summary, "- Sample data (first {sample_rows} rows):");
            for (row_index, row) in sheet.rows().iter().take(sample_rows).enumerate() {
                let _ = writeln!(
                    summary,
                    "  Row {}: {}",
                    row_index + 1,
                    sheet.render_row(row, ", ")
                );
            }
        }
        summary.push('\n');
    }

    summary
}
