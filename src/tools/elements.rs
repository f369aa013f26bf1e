use crate::docs::client::DocsApi;
use crate::docs::requests;
use crate::docs::tables::TableOperationManager;
use crate::docs::validation;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ElementType {
    Table,
    PageBreak,
    Image,
}

#[derive(Debug, Deserialize)]
struct InsertElementArgs {
    document_id: String,
    element_type: ElementType,
    /// Document offset; the element is appended to the body when absent.
    index: Option<i64>,
    rows: Option<usize>,
    columns: Option<usize>,
    table_data: Option<Value>,
    image_url: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct InsertImageArgs {
    document_id: String,
    image_url: String,
    index: Option<i64>,
    width: Option<f64>,
    height: Option<f64>,
}

fn image_url(url: &str) -> Result<&str, DocsError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(DocsError::invalid(format!(
            "image_url must be a URL (http:// or https://), got '{url}'"
        )))
    }
}

fn image_size(width: Option<f64>, height: Option<f64>) -> Result<String, DocsError> {
    for (name, value) in [("width", width), ("height", height)] {
        if let Some(value) = value
            && value <= 0.0
        {
            return Err(DocsError::invalid(format!("{name} must be positive, got {value}")));
        }
    }
    if width.is_none() && height.is_none() {
        return Ok(String::new());
    }
    let show = |value: Option<f64>| value.map_or("auto".to_string(), |v| v.to_string());
    Ok(format!(" (size: {}x{} points)", show(width), show(height)))
}

async fn insert_image<A: DocsApi>(
    api: &A,
    document_id: &str,
    url: &str,
    index: Option<i64>,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<Value, DocsError> {
    let url = image_url(url)?;
    let size = image_size(width, height)?;
    if let Some(index) = index {
        validation::index("index", index)?;
    }

    api.batch_update(
        document_id,
        &[requests::insert_inline_image(url, index, width, height)],
    )
    .await?;
    info!(document_id, url, "inserted image");

    Ok(success_result(
        format!(
            "Inserted image{size} in document {document_id}. Link: {}",
            doc_link(document_id)
        ),
        json!({ "document_id": document_id, "element_type": "image", "image_url": url }),
    ))
}

pub async fn insert_doc_elements<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: InsertElementArgs = parse_args(args)?;
    if let Some(index) = args.index {
        validation::index("index", index)?;
    }
    let link = doc_link(&args.document_id);

    match args.element_type {
        ElementType::Table => {
            if let Some(data) = &args.table_data {
                let data = validation::table_data(data)?;
                let created = TableOperationManager::new(api)
                    .create_and_populate(&args.document_id, &data, args.index, false)
                    .await?;
                return Ok(success_result(
                    format!(
                        "Inserted {}x{} table with data in document {}. Link: {link}",
                        created.rows, created.columns, args.document_id
                    ),
                    json!({ "document_id": args.document_id, "element_type": "table", "table": created }),
                ));
            }

            let (Some(rows), Some(columns)) = (args.rows, args.columns) else {
                return Err(DocsError::invalid(
                    "table_data or rows and columns are required for a table",
                ));
            };
            validation::table_dimensions(rows, columns)?;
            api.batch_update(
                &args.document_id,
                &[requests::insert_table(rows, columns, args.index)],
            )
            .await?;
            Ok(success_result(
                format!(
                    "Inserted empty {rows}x{columns} table in document {}. Link: {link}",
                    args.document_id
                ),
                json!({
                    "document_id": args.document_id,
                    "element_type": "table",
                    "rows": rows,
                    "columns": columns
                }),
            ))
        }
        ElementType::PageBreak => {
            api.batch_update(&args.document_id, &[requests::insert_page_break(args.index)])
                .await?;
            Ok(success_result(
                format!(
                    "Inserted page break in document {}. Link: {link}",
                    args.document_id
                ),
                json!({ "document_id": args.document_id, "element_type": "page_break" }),
            ))
        }
        ElementType::Image => {
            let url = args
                .image_url
                .as_deref()
                .ok_or_else(|| DocsError::invalid("image_url is required for an image"))?;
            insert_image(api, &args.document_id, url, args.index, args.width, args.height).await
        }
    }
}

pub async fn insert_doc_image<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: InsertImageArgs = parse_args(args)?;
    insert_image(
        api,
        &args.document_id,
        &args.image_url,
        args.index,
        args.width,
        args.height,
    )
    .await
}
