//! Case-insensitive substring search over every cell

use crate::model::{SearchResult, Sheet, HEADER_ROW_OFFSET};

/// Spreadsheet row number for a data row index: skip the header row, then
/// convert to 1-based.
#[must_use]
pub fn spreadsheet_row(data_row_index: usize) -> usize {
    data_row_index + HEADER_ROW_OFFSET + 1
}

/// Find every non-blank cell whose text contains `query`, ignoring case.
///
/// Results are ordered by sheet, then row, then column. An empty query
/// matches every non-blank cell.
#[must_use]
pub fn search(query: &str, sheets: &[Sheet]) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for sheet in sheets {
        for (row_index, row) in sheet.rows().iter().enumerate() {
            for (column, cell) in row.iter().enumerate() {
                if cell.is_blank() || !cell.to_string().to_lowercase().contains(&needle) {
                    continue;
                }
                results.push(SearchResult {
                    sheet: sheet.name().to_string(),
                    row: spreadsheet_row(row_index),
                    column: sheet.column_label(column),
                    value: cell.clone(),
                    context: sheet.row_context(row),
                });
            }
        }
    }

    tracing::debug!("Search for {:?} matched {} cells", query, results.len());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn staff() -> Sheet {
        Sheet::new(
            "Sheet1",
            vec!["Name".to_string(), "City".to_string()],
            vec![
                vec![CellValue::from("Alice"), CellValue::from("Paris")],
                vec![CellValue::from("Bob"), CellValue::Empty],
                vec![CellValue::from("Carol"), CellValue::from("Lyon"), CellValue::Number(12.5)],
            ],
        )
    }

    #[test]
    fn test_first_data_row_reports_row_two() {
        let results = search("alice", &[staff()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sheet, "Sheet1");
        assert_eq!(results[0].row, 2);
        assert_eq!(results[0].column, "Name");
        assert_eq!(results[0].value, CellValue::from("Alice"));
    }

    #[test]
    fn test_case_insensitive() {
        let results = search("PAR", &[staff()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].column, "City");
    }

    #[test]
    fn test_numbers_match_on_display_form() {
        let results = search("12.5", &[staff()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].row, 4);
        assert_eq!(results[0].column, "Column 3");
        assert_eq!(results[0].value, CellValue::Number(12.5));
    }

    #[test]
    fn test_extreme_numbers_match_on_exponent_form() {
        let sheet = Sheet::new(
            "Physics",
            vec!["Quantity".to_string()],
            vec![
                vec![CellValue::Number(1e21)],
                vec![CellValue::Number(1e-7)],
                vec![CellValue::Number(42.0)],
            ],
        );
        let rows = search("e", &[sheet])
            .iter()
            .map(|result| result.row)
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![2, 3]);
    }

    #[test]
    fn test_empty_query_matches_every_non_blank_cell() {
        let results = search("", &[staff()]);
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_results_ordered_by_sheet_row_column() {
        let other = Sheet::new(
            "Sheet2",
            vec!["Note".to_string()],
            vec![vec![CellValue::from("also a match")]],
        );
        let results = search("a", &[staff(), other]);
        let locations = results
            .iter()
            .map(|result| (result.sheet.as_str(), result.row, result.column.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            locations,
            vec![
                ("Sheet1", 2, "Name"),
                ("Sheet1", 2, "City"),
                ("Sheet1", 4, "Name"),
                ("Sheet2", 2, "Note"),
            ]
        );
    }

    #[test]
    fn test_context_covers_full_row() {
        let results = search("bob", &[staff()]);
        assert_eq!(results.len(), 1);
        let context = &results[0].context;
        assert_eq!(context.get("Name"), Some(&CellValue::from("Bob")));
        assert!(context.contains_header("City"));
        assert_eq!(context.get("City"), None);
    }

    #[test]
    fn test_no_match_and_no_sheets() {
        assert!(search("zzz", &[staff()]).is_empty());
        assert!(search("", &[]).is_empty());
    }

    #[test]
    fn test_spreadsheet_row_offset() {
        assert_eq!(spreadsheet_row(0), 2);
        assert_eq!(spreadsheet_row(9), 11);
    }
}
