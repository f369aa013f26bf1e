//! Local checks run before any document is fetched or mutated.

use crate::error::DocsError;
use serde_json::Value;

pub const MAX_TABLE_ROWS: usize = 1000;
pub const MAX_TABLE_COLUMNS: usize = 20;

/// Parses a table grid: a non-empty list of equally long rows of strings.
pub fn table_data(value: &Value) -> Result<Vec<Vec<String>>, DocsError> {
    let rows = value
        .as_array()
        .ok_or_else(|| DocsError::invalid("table_data must be a list of rows"))?;

    let grid = rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let cells = row.as_array().ok_or_else(|| {
                DocsError::invalid(format!("table_data[{row_idx}] must be a list of cells"))
            })?;
            cells
                .iter()
                .enumerate()
                .map(|(col_idx, cell)| match cell {
                    Value::String(text) => Ok(text.clone()),
                    Value::Null => Err(DocsError::invalid(format!(
                        "table_data[{row_idx}][{col_idx}] is null; use \"\" for empty cells"
                    ))),
                    other => Err(DocsError::invalid(format!(
                        "table_data[{row_idx}][{col_idx}] must be a string, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    table_shape(&grid)?;
    Ok(grid)
}

/// Returns `(rows, columns)` of a validated grid.
pub fn table_shape(grid: &[Vec<String>]) -> Result<(usize, usize), DocsError> {
    let columns = match grid.first() {
        Some(first) if !first.is_empty() => first.len(),
        Some(_) => return Err(DocsError::invalid("table_data rows must not be empty")),
        None => return Err(DocsError::invalid("table_data must not be empty")),
    };

    if let Some((row_idx, row)) = grid.iter().enumerate().find(|(_, row)| row.len() != columns) {
        return Err(DocsError::invalid(format!(
            "all table rows must have the same column count: row 0 has {columns}, row {row_idx} has {}",
            row.len()
        )));
    }
    if grid.len() > MAX_TABLE_ROWS {
        return Err(DocsError::invalid(format!(
            "table has {} rows (max {MAX_TABLE_ROWS})",
            grid.len()
        )));
    }
    if columns > MAX_TABLE_COLUMNS {
        return Err(DocsError::invalid(format!(
            "table has {columns} columns (max {MAX_TABLE_COLUMNS})"
        )));
    }
    Ok((grid.len(), columns))
}

pub fn table_dimensions(rows: usize, columns: usize) -> Result<(), DocsError> {
    if !(1..=MAX_TABLE_ROWS).contains(&rows) {
        return Err(DocsError::invalid(format!(
            "rows must be between 1 and {MAX_TABLE_ROWS}, got {rows}"
        )));
    }
    if !(1..=MAX_TABLE_COLUMNS).contains(&columns) {
        return Err(DocsError::invalid(format!(
            "columns must be between 1 and {MAX_TABLE_COLUMNS}, got {columns}"
        )));
    }
    Ok(())
}

pub fn index(name: &str, value: i64) -> Result<i64, DocsError> {
    if value < 0 {
        return Err(DocsError::invalid(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

pub fn range(start_index: i64, end_index: i64) -> Result<(i64, i64), DocsError> {
    index("start_index", start_index)?;
    if end_index <= start_index {
        return Err(DocsError::invalid(format!(
            "end_index ({end_index}) must be greater than start_index ({start_index})"
        )));
    }
    Ok((start_index, end_index))
}

pub fn non_empty(name: &str, value: &str) -> Result<(), DocsError> {
    if value.trim().is_empty() {
        return Err(DocsError::invalid(format!("{name} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_rectangular_string_grid() {
        let grid = table_data(&json!([["Name", "Qty"], ["Apple", ""]])).expect("grid");
        assert_eq!(grid.len(), 2);
        assert_eq!(table_shape(&grid).expect("shape"), (2, 2));
    }

    #[test]
    fn rejects_bad_grids() {
        let cases = [
            (json!([]), "must not be empty"),
            (json!([[]]), "rows must not be empty"),
            (json!([["a", "b"], ["c"]]), "same column count"),
            (json!([["a", null]]), "is null"),
            (json!([["a", 3]]), "must be a string"),
            (json!({"a": 1}), "list of rows"),
            (json!([vec!["x"; 21]]), "max 20"),
        ];
        for (value, expected) in cases {
            let err = table_data(&value).expect_err("invalid grid");
            assert!(matches!(err, DocsError::InvalidParameter(_)));
            assert!(err.to_string().contains(expected), "{err}");
        }
    }

    #[test]
    fn ranges_must_be_forward() {
        assert_eq!(range(1, 5).expect("range"), (1, 5));
        assert!(range(5, 5).is_err());
        assert!(range(-1, 5).is_err());
        assert!(table_dimensions(0, 2).is_err());
        assert!(table_dimensions(2, 21).is_err());
        assert!(table_dimensions(3, 3).is_ok());
    }
}
