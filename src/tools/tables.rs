use crate::docs::client::DocsApi;
use crate::docs::requests::TableCellStyleParams;
use crate::docs::structure;
use crate::docs::tables::{Placement, TableChange, TableOperationManager};
use crate::docs::validation;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};

fn default_true() -> bool {
    true
}

fn default_width_type() -> String {
    "FIXED_WIDTH".to_string()
}

#[derive(Debug, Deserialize)]
struct CreateTableArgs {
    document_id: String,
    table_data: Value,
    index: Option<usize>,
    #[serde(default = "default_true")]
    bold_headers: bool,
}

#[derive(Debug, Deserialize)]
struct PopulateTableArgs {
    document_id: String,
    table_index: usize,
    table_data: Value,
}

#[derive(Debug, Deserialize)]
struct RowArgs {
    document_id: String,
    table_index: usize,
    row_index: usize,
    #[serde(default = "default_true")]
    insert_below: bool,
}

#[derive(Debug, Deserialize)]
struct ColumnArgs {
    document_id: String,
    table_index: usize,
    column_index: usize,
    #[serde(default = "default_true")]
    insert_right: bool,
}

#[derive(Debug, Deserialize)]
struct CellStyleArgs {
    document_id: String,
    table_index: usize,
    row_index: usize,
    column_index: usize,
    #[serde(flatten)]
    style: TableCellStyleParams,
}

#[derive(Debug, Deserialize)]
struct MergeArgs {
    document_id: String,
    table_index: usize,
    start_row: usize,
    start_col: usize,
    row_span: usize,
    col_span: usize,
}

#[derive(Debug, Deserialize)]
struct UnmergeArgs {
    document_id: String,
    table_index: usize,
    row_index: usize,
    col_index: usize,
    row_span: usize,
    col_span: usize,
}

#[derive(Debug, Deserialize)]
struct RowStyleArgs {
    document_id: String,
    table_index: usize,
    row_indices: Vec<usize>,
    min_row_height: Option<f64>,
    prevent_overflow: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ColumnWidthArgs {
    document_id: String,
    table_index: usize,
    column_indices: Vec<usize>,
    width: Option<f64>,
    #[serde(default = "default_width_type")]
    width_type: String,
}

#[derive(Debug, Deserialize)]
struct PinArgs {
    document_id: String,
    table_index: usize,
    pinned_header_rows_count: usize,
}

fn change_result(document_id: &str, message: String, change: &TableChange) -> Value {
    success_result(
        format!("{message}. Link: {}", doc_link(document_id)),
        json!({ "document_id": document_id, "table": change }),
    )
}

/// Creates a table from `table_data`. `index` addresses a body element: the
/// table is inserted at that element's start, or appended when `index` is past
/// the last element.
pub async fn create_table_with_data<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: CreateTableArgs = parse_args(args)?;
    let data = validation::table_data(&args.table_data)?;

    let insert_index = match args.index {
        Some(element_index) => {
            let document = api.get_document(&args.document_id).await?;
            structure::parse_body(&document)
                .get(element_index)
                .map(|element| element.start_index)
        }
        None => None,
    };

    let created = TableOperationManager::new(api)
        .create_and_populate(&args.document_id, &data, insert_index, args.bold_headers)
        .await?;

    Ok(success_result(
        format!(
            "Created {}x{} table (table index {}) at index {} and populated {} cells. Link: {}",
            created.rows,
            created.columns,
            created.table_index,
            created.start_index,
            created.populated_cells,
            doc_link(&args.document_id)
        ),
        json!({ "document_id": args.document_id, "table": created }),
    ))
}

pub async fn populate_existing_table<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: PopulateTableArgs = parse_args(args)?;
    let data = validation::table_data(&args.table_data)?;

    let written = TableOperationManager::new(api)
        .populate_existing(&args.document_id, args.table_index, &data)
        .await?;

    Ok(success_result(
        format!(
            "Populated {written} cells of table {} in document {}. Link: {}",
            args.table_index,
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "table_index": args.table_index,
            "populated_cells": written
        }),
    ))
}

pub async fn insert_table_row<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: RowArgs = parse_args(args)?;
    let placement = if args.insert_below { Placement::After } else { Placement::Before };
    let change = TableOperationManager::new(api)
        .insert_row(&args.document_id, args.table_index, args.row_index, placement)
        .await?;
    let side = if args.insert_below { "below" } else { "above" };
    Ok(change_result(
        &args.document_id,
        format!(
            "Inserted row {side} row {} in table {}; table is now {}x{}",
            args.row_index, args.table_index, change.rows, change.columns
        ),
        &change,
    ))
}

pub async fn delete_table_row<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: RowArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .delete_row(&args.document_id, args.table_index, args.row_index)
        .await?;
    Ok(change_result(
        &args.document_id,
        format!(
            "Deleted row {} from table {}; table is now {}x{}",
            args.row_index, args.table_index, change.rows, change.columns
        ),
        &change,
    ))
}

pub async fn insert_table_column<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: ColumnArgs = parse_args(args)?;
    let placement = if args.insert_right { Placement::After } else { Placement::Before };
    let change = TableOperationManager::new(api)
        .insert_column(&args.document_id, args.table_index, args.column_index, placement)
        .await?;
    let side = if args.insert_right { "right of" } else { "left of" };
    Ok(change_result(
        &args.document_id,
        format!(
            "Inserted column {side} column {} in table {}; table is now {}x{}",
            args.column_index, args.table_index, change.rows, change.columns
        ),
        &change,
    ))
}

pub async fn delete_table_column<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: ColumnArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .delete_column(&args.document_id, args.table_index, args.column_index)
        .await?;
    Ok(change_result(
        &args.document_id,
        format!(
            "Deleted column {} from table {}; table is now {}x{}",
            args.column_index, args.table_index, change.rows, change.columns
        ),
        &change,
    ))
}

pub async fn update_table_cell_style<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: CellStyleArgs = parse_args(args)?;
    let fields = TableOperationManager::new(api)
        .update_cell_style(
            &args.document_id,
            args.table_index,
            args.row_index,
            args.column_index,
            &args.style,
        )
        .await?;

    Ok(success_result(
        format!(
            "Updated cell ({},{}) of table {} ({}). Link: {}",
            args.row_index,
            args.column_index,
            args.table_index,
            fields.join(", "),
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "table_index": args.table_index,
            "row_index": args.row_index,
            "column_index": args.column_index,
            "fields": fields
        }),
    ))
}

pub async fn merge_table_cells<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: MergeArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .merge_cells(
            &args.document_id,
            args.table_index,
            args.start_row,
            args.start_col,
            args.row_span,
            args.col_span,
        )
        .await?;
    Ok(change_result(
        &args.document_id,
        format!(
            "Merged {}x{} cells starting at ({},{}) in table {}",
            args.row_span, args.col_span, args.start_row, args.start_col, args.table_index
        ),
        &change,
    ))
}

pub async fn unmerge_table_cells<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: UnmergeArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .unmerge_cells(
            &args.document_id,
            args.table_index,
            args.row_index,
            args.col_index,
            args.row_span,
            args.col_span,
        )
        .await?;
    Ok(change_result(
        &args.document_id,
        format!(
            "Unmerged {}x{} cells starting at ({},{}) in table {}",
            args.row_span, args.col_span, args.row_index, args.col_index, args.table_index
        ),
        &change,
    ))
}

pub async fn update_table_row_style<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: RowStyleArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .update_row_style(
            &args.document_id,
            args.table_index,
            &args.row_indices,
            args.min_row_height,
            args.prevent_overflow,
        )
        .await?;
    Ok(change_result(
        &args.document_id,
        format!(
            "Updated style of rows {:?} in table {}",
            args.row_indices, args.table_index
        ),
        &change,
    ))
}

pub async fn set_table_column_width<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: ColumnWidthArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .set_column_width(
            &args.document_id,
            args.table_index,
            &args.column_indices,
            args.width,
            &args.width_type,
        )
        .await?;
    let width = args
        .width
        .map(|width| format!(" to {width}pt"))
        .unwrap_or_default();
    Ok(change_result(
        &args.document_id,
        format!(
            "Set columns {:?} of table {} to {}{width}",
            args.column_indices,
            args.table_index,
            args.width_type.to_ascii_uppercase()
        ),
        &change,
    ))
}

pub async fn pin_table_header_rows<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: PinArgs = parse_args(args)?;
    let change = TableOperationManager::new(api)
        .pin_header_rows(&args.document_id, args.table_index, args.pinned_header_rows_count)
        .await?;
    let message = if args.pinned_header_rows_count == 0 {
        format!("Unpinned header rows of table {}", args.table_index)
    } else {
        format!(
            "Pinned {} header row(s) of table {}",
            args.pinned_header_rows_count, args.table_index
        )
    };
    Ok(change_result(&args.document_id, message, &change))
}
