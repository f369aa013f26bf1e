//! Multi-round-trip table operations.
//!
//! Every mutation is addressed against a document fetched immediately before
//! it, because each applied batch shifts the offsets of everything after the
//! mutation point.

use crate::docs::client::DocsApi;
use crate::docs::model::Document;
use crate::docs::requests::{self, Request, TableCellStyleParams, TextStyleParams};
use crate::docs::structure::{self, TableDescriptor};
use crate::docs::validation;
use crate::error::DocsError;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCreation {
    pub table_index: usize,
    pub start_index: i64,
    pub rows: usize,
    pub columns: usize,
    pub populated_cells: usize,
    pub bolded_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableChange {
    pub table_index: usize,
    pub start_index: i64,
    pub rows: usize,
    pub columns: usize,
}

impl From<&TableDescriptor> for TableChange {
    fn from(table: &TableDescriptor) -> Self {
        Self {
            table_index: table.index,
            start_index: table.start_index,
            rows: table.rows,
            columns: table.columns,
        }
    }
}

/// Position of a new row or column relative to the reference one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

pub struct TableOperationManager<'a, A> {
    api: &'a A,
}

/// Picks the table nearest to where one was just inserted, or the last table
/// when appending. Two tables close to the insertion point can confuse this.
pub fn locate_new_table(
    tables: &[TableDescriptor],
    insert_index: Option<i64>,
) -> Option<&TableDescriptor> {
    match insert_index {
        Some(target) => tables
            .iter()
            .min_by_key(|table| (table.start_index - target).abs()),
        None => tables.last(),
    }
}

/// One `insertText` per non-empty cell, bottom-right first, so that each
/// pre-batch offset is still correct when its request is applied.
pub fn population_requests(
    document: &Document,
    table_index: usize,
    data: &[Vec<String>],
) -> Result<Vec<Request>, DocsError> {
    let mut batch = Vec::new();
    for (row, cells) in data.iter().enumerate().rev() {
        for (col, text) in cells.iter().enumerate().rev() {
            if text.is_empty() {
                continue;
            }
            let range = structure::get_table_cell_range(document, table_index, row, col)?;
            batch.push(requests::insert_text(text, Some(range.content_start), None));
        }
    }
    Ok(batch)
}

/// Bold `updateTextStyle` over each non-empty header cell's text.
pub fn header_bold_requests(
    document: &Document,
    table_index: usize,
    header: &[String],
) -> Result<Vec<Request>, DocsError> {
    let mut batch = Vec::new();
    for (col, text) in header.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let range = structure::get_table_cell_range(document, table_index, 0, col)?;
        let style = requests::build_text_style(&TextStyleParams::bold())?;
        let end = range.content_start + crate::docs::convert::utf16_len(text);
        if let Some(request) = requests::update_text_style(range.content_start, end, style, None) {
            batch.push(request);
        }
    }
    Ok(batch)
}

fn check_bound(what: &str, index: usize, count: usize) -> Result<(), DocsError> {
    if index >= count {
        return Err(DocsError::unresolved(format!(
            "{what} index {index} out of range (table has {count} {what}s)"
        )));
    }
    Ok(())
}

/// True when `span` cells starting at `start` stay within `count`.
fn span_fits(start: usize, span: usize, count: usize) -> bool {
    start.checked_add(span).is_some_and(|end| end <= count)
}

impl<'a, A: DocsApi> TableOperationManager<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fetches the document and resolves `table_index` in it.
    async fn resolve_table(
        &self,
        document_id: &str,
        table_index: usize,
    ) -> Result<(Document, TableDescriptor), DocsError> {
        let document = self.api.get_document(document_id).await?;
        let tables = structure::find_tables(&document);
        let table = tables.get(table_index).cloned().ok_or_else(|| {
            DocsError::unresolved(format!(
                "Table index {table_index} not found. Document {document_id} has {} tables",
                tables.len()
            ))
        })?;
        debug!(document_id, table_index, start_index = table.start_index, "resolved table");
        Ok((document, table))
    }

    /// Re-reads the table after an applied structural change. The change
    /// already landed, so a failure here is a partial completion.
    async fn refreshed(
        &self,
        document_id: &str,
        table_index: usize,
        applied: String,
    ) -> Result<TableChange, DocsError> {
        match self.resolve_table(document_id, table_index).await {
            Ok((_, table)) => Ok(TableChange::from(&table)),
            Err(err) => {
                warn!(document_id, table_index, error = %err, "table changed but could not be re-read");
                Err(DocsError::partial(vec![applied], "re-fetch table dimensions", err))
            }
        }
    }

    /// Creates an empty table, then fills it and optionally bolds row 0.
    pub async fn create_and_populate(
        &self,
        document_id: &str,
        data: &[Vec<String>],
        insert_index: Option<i64>,
        bold_headers: bool,
    ) -> Result<TableCreation, DocsError> {
        let (rows, columns) = validation::table_shape(data)?;

        self.api
            .batch_update(document_id, &[requests::insert_table(rows, columns, insert_index)])
            .await?;
        let mut completed = vec![format!("insert empty {rows}x{columns} table")];
        info!(document_id, rows, columns, "inserted empty table");

        let partial = |completed: &Vec<String>, step: &'static str, err: DocsError| {
            warn!(document_id, step, error = %err, "table creation stopped part way");
            DocsError::partial(completed.clone(), step, err)
        };

        let document = self
            .api
            .get_document(document_id)
            .await
            .map_err(|err| partial(&completed, "re-fetch the document after inserting the table", err))?;
        let tables = structure::find_tables(&document);
        let table = locate_new_table(&tables, insert_index).cloned().ok_or_else(|| {
            partial(
                &completed,
                "locate the new table",
                DocsError::unresolved("Table created but no tables found for population"),
            )
        })?;

        let batch = population_requests(&document, table.index, data)
            .map_err(|err| partial(&completed, "resolve cell offsets", err))?;
        let populated_cells = batch.len();
        if !batch.is_empty() {
            self.api
                .batch_update(document_id, &batch)
                .await
                .map_err(|err| partial(&completed, "populate table cells", err))?;
            completed.push(format!("populate {populated_cells} cells"));
        }

        let mut bolded_cells = 0;
        if bold_headers && data[0].iter().any(|text| !text.is_empty()) {
            let document = self
                .api
                .get_document(document_id)
                .await
                .map_err(|err| partial(&completed, "re-fetch the document before bolding headers", err))?;
            let batch = header_bold_requests(&document, table.index, &data[0])
                .map_err(|err| partial(&completed, "resolve header cell offsets", err))?;
            bolded_cells = batch.len();
            if !batch.is_empty() {
                self.api
                    .batch_update(document_id, &batch)
                    .await
                    .map_err(|err| partial(&completed, "bold header row", err))?;
            }
        }

        Ok(TableCreation {
            table_index: table.index,
            start_index: table.start_index,
            rows,
            columns,
            populated_cells,
            bolded_cells,
        })
    }

    /// Appends text to existing cells one round trip at a time. Returns the
    /// number of cells written.
    pub async fn populate_existing(
        &self,
        document_id: &str,
        table_index: usize,
        data: &[Vec<String>],
    ) -> Result<usize, DocsError> {
        let (data_rows, data_cols) = validation::table_shape(data)?;
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        if data_rows > table.rows || data_cols > table.columns {
            return Err(DocsError::invalid(format!(
                "Data ({data_rows}x{data_cols}) exceeds table dimensions ({}x{})",
                table.rows, table.columns
            )));
        }

        let mut written = 0;
        for (row, cells) in data.iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let step = async {
                    let document = self.api.get_document(document_id).await?;
                    let range = structure::get_table_cell_range(&document, table_index, row, col)?;
                    let request = requests::insert_text(text, Some(range.content_end - 1), None);
                    self.api.batch_update(document_id, &[request]).await
                };
                if let Err(err) = step.await {
                    if written == 0 {
                        return Err(err);
                    }
                    warn!(document_id, row, col, written, "table population stopped part way");
                    return Err(DocsError::partial(
                        vec![format!("populated {written} cells")],
                        "populate the next cell",
                        err,
                    ));
                }
                written += 1;
            }
        }
        Ok(written)
    }

    pub async fn insert_row(
        &self,
        document_id: &str,
        table_index: usize,
        row_index: usize,
        placement: Placement,
    ) -> Result<TableChange, DocsError> {
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        check_bound("row", row_index, table.rows)?;
        let after = placement == Placement::After;
        let request = requests::insert_table_row(table.start_index, row_index, after);
        self.api.batch_update(document_id, &[request]).await?;
        let side = if after { "below" } else { "above" };
        self.refreshed(document_id, table_index, format!("insert row {side} row {row_index}"))
            .await
    }

    pub async fn delete_row(
        &self,
        document_id: &str,
        table_index: usize,
        row_index: usize,
    ) -> Result<TableChange, DocsError> {
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        check_bound("row", row_index, table.rows)?;
        if table.rows == 1 {
            return Err(DocsError::invalid(
                "cannot delete the only row of a table; delete the table instead",
            ));
        }
        let request = requests::delete_table_row(table.start_index, row_index);
        self.api.batch_update(document_id, &[request]).await?;
        self.refreshed(document_id, table_index, format!("delete row {row_index}"))
            .await
    }

    pub async fn insert_column(
        &self,
        document_id: &str,
        table_index: usize,
        column_index: usize,
        placement: Placement,
    ) -> Result<TableChange, DocsError> {
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        check_bound("column", column_index, table.columns)?;
        if table.columns >= validation::MAX_TABLE_COLUMNS {
            return Err(DocsError::invalid(format!(
                "table already has {} columns (max {})",
                table.columns,
                validation::MAX_TABLE_COLUMNS
            )));
        }
        let after = placement == Placement::After;
        let request = requests::insert_table_column(table.start_index, column_index, after);
        self.api.batch_update(document_id, &[request]).await?;
        let side = if after { "right of" } else { "left of" };
        self.refreshed(
            document_id,
            table_index,
            format!("insert column {side} column {column_index}"),
        )
        .await
    }

    pub async fn delete_column(
        &self,
        document_id: &str,
        table_index: usize,
        column_index: usize,
    ) -> Result<TableChange, DocsError> {
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        check_bound("column", column_index, table.columns)?;
        if table.columns == 1 {
            return Err(DocsError::invalid(
                "cannot delete the only column of a table; delete the table instead",
            ));
        }
        let request = requests::delete_table_column(table.start_index, column_index);
        self.api.batch_update(document_id, &[request]).await?;
        self.refreshed(document_id, table_index, format!("delete column {column_index}"))
            .await
    }

    pub async fn update_cell_style(
        &self,
        document_id: &str,
        table_index: usize,
        row: usize,
        col: usize,
        params: &TableCellStyleParams,
    ) -> Result<Vec<&'static str>, DocsError> {
        let style = requests::build_table_cell_style(params)?;
        let fields = style.fields();
        if fields.is_empty() {
            return Err(DocsError::invalid(
                "at least one cell style parameter must be provided",
            ));
        }
        let (document, table) = self.resolve_table(document_id, table_index).await?;
        structure::get_table_cell_range(&document, table_index, row, col)?;
        if let Some(request) = requests::update_table_cell_style(table.start_index, row, col, style) {
            self.api.batch_update(document_id, &[request]).await?;
        }
        Ok(fields)
    }

    pub async fn merge_cells(
        &self,
        document_id: &str,
        table_index: usize,
        start_row: usize,
        start_col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Result<TableChange, DocsError> {
        if row_span < 1 || col_span < 1 {
            return Err(DocsError::invalid(format!(
                "row_span and col_span must be at least 1, got {row_span}x{col_span}"
            )));
        }
        if row_span == 1 && col_span == 1 {
            return Err(DocsError::invalid(
                "Merging a single cell has no effect. row_span or col_span must be greater than 1",
            ));
        }

        let (_, table) = self.resolve_table(document_id, table_index).await?;
        if !span_fits(start_row, row_span, table.rows) {
            return Err(DocsError::unresolved(format!(
                "Merge range exceeds table rows: start_row ({start_row}) + row_span ({row_span}) > {}",
                table.rows
            )));
        }
        if !span_fits(start_col, col_span, table.columns) {
            return Err(DocsError::unresolved(format!(
                "Merge range exceeds table columns: start_col ({start_col}) + col_span ({col_span}) > {}",
                table.columns
            )));
        }

        let request = requests::merge_table_cells(
            table.start_index,
            start_row,
            start_col,
            row_span,
            col_span,
        );
        self.api.batch_update(document_id, &[request]).await?;
        Ok(TableChange::from(&table))
    }

    pub async fn unmerge_cells(
        &self,
        document_id: &str,
        table_index: usize,
        row: usize,
        col: usize,
        row_span: usize,
        col_span: usize,
    ) -> Result<TableChange, DocsError> {
        if row_span < 1 || col_span < 1 {
            return Err(DocsError::invalid(format!(
                "row_span and col_span must be at least 1, got {row_span}x{col_span}"
            )));
        }

        let (_, table) = self.resolve_table(document_id, table_index).await?;
        if !span_fits(row, row_span, table.rows) || !span_fits(col, col_span, table.columns) {
            return Err(DocsError::unresolved(format!(
                "Unmerge range ({row},{col}) spanning {row_span}x{col_span} exceeds table dimensions ({}x{})",
                table.rows, table.columns
            )));
        }

        let request = requests::unmerge_table_cells(table.start_index, row, col, row_span, col_span);
        self.api.batch_update(document_id, &[request]).await?;
        Ok(TableChange::from(&table))
    }

    pub async fn update_row_style(
        &self,
        document_id: &str,
        table_index: usize,
        row_indices: &[usize],
        min_row_height: Option<f64>,
        prevent_overflow: Option<bool>,
    ) -> Result<TableChange, DocsError> {
        if row_indices.is_empty() {
            return Err(DocsError::invalid("row_indices must not be empty"));
        }
        if let Some(height) = min_row_height
            && height < 0.0
        {
            return Err(DocsError::invalid(format!(
                "min_row_height must not be negative, got {height}"
            )));
        }

        let (_, table) = self.resolve_table(document_id, table_index).await?;
        for &row in row_indices {
            check_bound("row", row, table.rows)?;
        }

        let request = requests::update_table_row_style(
            table.start_index,
            row_indices,
            min_row_height,
            prevent_overflow,
        )
        .ok_or_else(|| {
            DocsError::invalid("at least one of min_row_height or prevent_overflow must be provided")
        })?;
        self.api.batch_update(document_id, &[request]).await?;
        Ok(TableChange::from(&table))
    }

    pub async fn set_column_width(
        &self,
        document_id: &str,
        table_index: usize,
        column_indices: &[usize],
        width: Option<f64>,
        width_type: &str,
    ) -> Result<TableChange, DocsError> {
        if column_indices.is_empty() {
            return Err(DocsError::invalid("column_indices must not be empty"));
        }
        requests::column_properties(width, width_type)?;

        let (_, table) = self.resolve_table(document_id, table_index).await?;
        for &col in column_indices {
            check_bound("column", col, table.columns)?;
        }

        let request = requests::update_table_column_properties(
            table.start_index,
            column_indices,
            width,
            width_type,
        )?;
        self.api.batch_update(document_id, &[request]).await?;
        Ok(TableChange::from(&table))
    }

    pub async fn pin_header_rows(
        &self,
        document_id: &str,
        table_index: usize,
        pinned_header_rows_count: usize,
    ) -> Result<TableChange, DocsError> {
        let (_, table) = self.resolve_table(document_id, table_index).await?;
        if pinned_header_rows_count > table.rows {
            return Err(DocsError::invalid(format!(
                "pinned_header_rows_count ({pinned_header_rows_count}) exceeds table rows ({})",
                table.rows
            )));
        }
        let request = requests::pin_table_header_rows(table.start_index, pinned_header_rows_count);
        self.api.batch_update(document_id, &[request]).await?;
        Ok(TableChange::from(&table))
    }
}
