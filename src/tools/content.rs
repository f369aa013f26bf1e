use crate::docs::client::DocsApi;
use crate::docs::structure;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct DocumentArgs {
    document_id: String,
}

#[derive(Debug, Deserialize)]
struct InspectArgs {
    document_id: String,
    #[serde(default)]
    detailed: bool,
}

#[derive(Debug, Deserialize)]
struct DebugTableArgs {
    document_id: String,
    table_index: usize,
}

fn title_or_untitled(title: &str) -> &str {
    if title.is_empty() { "Untitled" } else { title }
}

pub async fn get_doc_content<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: DocumentArgs = parse_args(args)?;
    let document = api.get_document(&args.document_id).await?;
    let title = title_or_untitled(&document.title);
    let body = structure::extract_doc_text(&document);

    let text = format!(
        "File: \"{title}\" (ID: {id})\nLink: {link}\n\n--- CONTENT ---\n{body}",
        id = args.document_id,
        link = doc_link(&args.document_id),
    );
    Ok(success_result(
        text,
        json!({
            "document_id": args.document_id,
            "title": title,
            "link": doc_link(&args.document_id),
            "text": body
        }),
    ))
}

pub async fn inspect_doc_structure<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: InspectArgs = parse_args(args)?;
    let document = api.get_document(&args.document_id).await?;
    let elements = structure::parse_body(&document);
    let tables: Vec<Value> = structure::find_tables(&document)
        .iter()
        .map(|table| {
            json!({
                "index": table.index,
                "start_index": table.start_index,
                "end_index": table.end_index,
                "rows": table.rows,
                "columns": table.columns
            })
        })
        .collect();

    let mut report = json!({
        "title": title_or_untitled(&document.title),
        "revisionId": document.revision_id,
        "totalElements": elements.len(),
        "tables": tables,
    });
    if args.detailed
        && let Some(obj) = report.as_object_mut()
    {
        obj.insert("structure".to_string(), json!(elements));
        obj.insert(
            "paragraphs".to_string(),
            json!(structure::find_paragraphs(&document)),
        );
        obj.insert(
            "headersFooters".to_string(),
            json!(structure::find_header_footer_ids(&document)),
        );
    }

    let pretty = serde_json::to_string_pretty(&report)
        .map_err(|err| DocsError::invalid(format!("failed to render structure: {err}")))?;
    Ok(success_result(
        format!(
            "Document structure analysis for {}:\n\n{pretty}\n\nLink: {}",
            args.document_id,
            doc_link(&args.document_id)
        ),
        report,
    ))
}

pub async fn debug_table_structure<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: DebugTableArgs = parse_args(args)?;
    let document = api.get_document(&args.document_id).await?;
    let info = structure::get_table_debug_info(&document, args.table_index)?;

    let mut lines = vec![format!(
        "Table {} ({}x{}) spans [{}, {})",
        info.table_index, info.rows, info.columns, info.start_index, info.end_index
    )];
    for cell in info.cells.iter().flatten() {
        let span = if cell.row_span > 1 || cell.col_span > 1 {
            format!(" span {}x{}", cell.row_span, cell.col_span)
        } else {
            String::new()
        };
        lines.push(format!(
            "  ({},{}) [{}, {}){span}: {:?}",
            cell.row, cell.col, cell.start_index, cell.end_index, cell.content
        ));
    }

    Ok(success_result(lines.join("\n"), json!(info)))
}
