use crate::docs::client::DocsApi;
use crate::docs::convert::utf16_len;
use crate::docs::requests::{self, TextStyleParams};
use crate::docs::validation;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, Deserialize)]
struct CreateDocArgs {
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ModifyTextArgs {
    document_id: String,
    start_index: i64,
    end_index: Option<i64>,
    text: Option<String>,
    #[serde(flatten)]
    style: TextStyleParams,
}

#[derive(Debug, Deserialize)]
struct FindReplaceArgs {
    document_id: String,
    find_text: String,
    replace_text: String,
    #[serde(default)]
    match_case: bool,
}

#[derive(Debug, Deserialize)]
struct DeleteRangeArgs {
    document_id: String,
    start_index: i64,
    end_index: i64,
}

pub async fn create_doc<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: CreateDocArgs = parse_args(args)?;
    validation::non_empty("title", &args.title)?;

    let document = api.create_document(&args.title).await?;
    let document_id = document.document_id;
    info!(document_id, "created document");

    if !args.content.is_empty() {
        // A new document starts with one empty paragraph at offset 0.
        api.batch_update(&document_id, &[requests::insert_text(&args.content, Some(1), None)])
            .await
            .map_err(|err| {
                DocsError::partial(
                    vec![format!("create document {document_id}")],
                    "insert initial content",
                    err,
                )
            })?;
    }

    let link = doc_link(&document_id);
    Ok(success_result(
        format!(
            "Created Google Doc '{}' (ID: {document_id}). Link: {link}",
            args.title
        ),
        json!({ "document_id": document_id, "title": args.title, "link": link }),
    ))
}

/// Insert or replace text and optionally style it, all in one batch.
pub async fn modify_doc_text<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: ModifyTextArgs = parse_args(args)?;
    let start = validation::index("start_index", args.start_index)?;
    let style = requests::build_text_style(&args.style)?;
    let has_formatting = !style.is_empty();

    if args.text.is_none() && !has_formatting {
        return Err(DocsError::invalid(
            "provide either 'text' to insert or replace, or formatting parameters",
        ));
    }

    let mut batch = Vec::new();
    let mut format_end = args.end_index;
    let mut operations = Vec::new();
    if let Some(text) = &args.text {
        let replace_end = match args.end_index {
            Some(end) if end < start => {
                return Err(DocsError::invalid(format!(
                    "end_index ({end}) must not be less than start_index ({start})"
                )));
            }
            Some(end) if end > start => Some(end),
            _ => None,
        };
        if replace_end.is_none() && text.is_empty() {
            return Err(DocsError::invalid(
                "text must not be empty when inserting; give end_index to delete a range",
            ));
        }

        if let Some(end) = replace_end {
            batch.push(requests::delete_range(start, end, None));
        }
        // An empty replacement is a plain delete.
        if !text.is_empty() {
            batch.push(requests::insert_text(text, Some(start), None));
        }
        operations.push(match (replace_end, text.is_empty()) {
            (Some(_), true) => "deleted",
            (Some(_), false) => "replaced",
            (None, _) => "inserted",
        });
        format_end = Some(start + utf16_len(text));
    }

    if has_formatting {
        let end = format_end.ok_or_else(|| {
            DocsError::invalid("end_index is required when formatting existing text")
        })?;
        validation::range(start, end)?;
        let fields = style.fields().join(",");
        if let Some(request) = requests::update_text_style(start, end, style, None) {
            batch.push(request);
        }
        operations.push("formatted");
        info!(document_id = %args.document_id, fields, "formatting text");
    }

    api.batch_update(&args.document_id, &batch).await?;

    let summary = operations.join(" and ");
    Ok(success_result(
        format!(
            "Text {summary} in document {}. Link: {}",
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "operations": operations,
            "requests": batch.len()
        }),
    ))
}

pub async fn find_and_replace_doc<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: FindReplaceArgs = parse_args(args)?;
    if args.find_text.is_empty() {
        return Err(DocsError::invalid("find_text must not be empty"));
    }

    let request = requests::replace_all_text(&args.find_text, &args.replace_text, args.match_case);
    let response = api.batch_update(&args.document_id, &[request]).await?;
    let replaced = response.occurrences_changed();

    Ok(success_result(
        format!(
            "Replaced {replaced} occurrence(s) of '{}' with '{}' in document {}. Link: {}",
            args.find_text,
            args.replace_text,
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({ "document_id": args.document_id, "occurrences_changed": replaced }),
    ))
}

pub async fn delete_doc_content<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: DeleteRangeArgs = parse_args(args)?;
    let (start, end) = validation::range(args.start_index, args.end_index)?;

    api.batch_update(&args.document_id, &[requests::delete_range(start, end, None)])
        .await?;

    Ok(success_result(
        format!(
            "Deleted content from index {start} to {end} in document {}. Link: {}",
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({ "document_id": args.document_id, "start_index": start, "end_index": end }),
    ))
}
