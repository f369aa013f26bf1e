use crate::docs::client::DocsApi;
use crate::docs::requests::{self, Request, TextStyleParams};
use crate::docs::validation;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct BatchArgs {
    document_id: String,
    operations: Vec<Value>,
}

/// One entry of `operations`, tagged by its `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BatchOperation {
    InsertText {
        text: String,
        index: i64,
    },
    DeleteText {
        start_index: i64,
        end_index: i64,
    },
    ReplaceText {
        start_index: i64,
        end_index: i64,
        text: String,
    },
    FormatText {
        start_index: i64,
        end_index: i64,
        bold: Option<bool>,
        italic: Option<bool>,
        underline: Option<bool>,
        font_size: Option<f64>,
        font_family: Option<String>,
        text_color: Option<String>,
        background_color: Option<String>,
    },
    FindReplace {
        find_text: String,
        replace_text: String,
        #[serde(default)]
        match_case: bool,
    },
    InsertTable {
        rows: usize,
        columns: usize,
        index: Option<i64>,
    },
    InsertPageBreak {
        index: Option<i64>,
    },
}

impl BatchOperation {
    fn requests(self) -> Result<Vec<Request>, DocsError> {
        Ok(match self {
            Self::InsertText { text, index } => {
                validation::index("index", index)?;
                vec![requests::insert_text(&text, Some(index), None)]
            }
            Self::DeleteText {
                start_index,
                end_index,
            } => {
                let (start, end) = validation::range(start_index, end_index)?;
                vec![requests::delete_range(start, end, None)]
            }
            Self::ReplaceText {
                start_index,
                end_index,
                text,
            } => {
                let (start, end) = validation::range(start_index, end_index)?;
                vec![
                    requests::delete_range(start, end, None),
                    requests::insert_text(&text, Some(start), None),
                ]
            }
            Self::FormatText {
                start_index,
                end_index,
                bold,
                italic,
                underline,
                font_size,
                font_family,
                text_color,
                background_color,
            } => {
                let (start, end) = validation::range(start_index, end_index)?;
                let style = requests::build_text_style(&TextStyleParams {
                    bold,
                    italic,
                    underline,
                    font_size,
                    font_family,
                    text_color,
                    background_color,
                })?;
                let request = requests::update_text_style(start, end, style, None)
                    .ok_or_else(|| DocsError::invalid("format_text needs at least one style field"))?;
                vec![request]
            }
            Self::FindReplace {
                find_text,
                replace_text,
                match_case,
            } => {
                if find_text.is_empty() {
                    return Err(DocsError::invalid("find_text must not be empty"));
                }
                vec![requests::replace_all_text(&find_text, &replace_text, match_case)]
            }
            Self::InsertTable {
                rows,
                columns,
                index,
            } => {
                validation::table_dimensions(rows, columns)?;
                vec![requests::insert_table(rows, columns, index)]
            }
            Self::InsertPageBreak { index } => vec![requests::insert_page_break(index)],
        })
    }
}

/// Turns every descriptor into requests before anything is sent. Errors are
/// numbered from 1 to match the caller's list.
fn build_batch(operations: &[Value]) -> Result<Vec<Request>, DocsError> {
    if operations.is_empty() {
        return Err(DocsError::invalid("operations must not be empty"));
    }
    let mut batch = Vec::new();
    for (position, raw) in operations.iter().enumerate() {
        let number = position + 1;
        let operation: BatchOperation = serde_json::from_value(raw.clone())
            .map_err(|err| DocsError::invalid(format!("Operation {number}: {err}")))?;
        let built = operation.requests().map_err(|err| match err {
            DocsError::InvalidParameter(message) => {
                DocsError::invalid(format!("Operation {number}: {message}"))
            }
            other => other,
        })?;
        batch.extend(built);
    }
    Ok(batch)
}

pub async fn batch_update_doc<A: DocsApi>(api: &A, args: &Value) -> Result<Value, DocsError> {
    let args: BatchArgs = parse_args(args)?;
    let batch = build_batch(&args.operations)?;
    debug!(
        document_id = %args.document_id,
        operations = args.operations.len(),
        requests = batch.len(),
        "submitting batch"
    );

    let response = api.batch_update(&args.document_id, &batch).await?;
    let kinds: Vec<&str> = batch.iter().map(Request::kind).collect();

    Ok(success_result(
        format!(
            "Successfully executed {} operations (atomic) on document {}. Link: {}",
            args.operations.len(),
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "operations": args.operations.len(),
            "requests": kinds,
            "occurrences_changed": response.occurrences_changed()
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::fixtures::RecordingApi;

    #[tokio::test]
    async fn mixed_operations_go_out_as_one_batch() {
        let api = RecordingApi::new(vec![]);
        let result = batch_update_doc(
            &api,
            &json!({
                "document_id": "doc-1",
                "operations": [
                    { "type": "insert_text", "text": "Hi", "index": 1 },
                    { "type": "replace_text", "start_index": 5, "end_index": 9, "text": "new" },
                    { "type": "format_text", "start_index": 1, "end_index": 3, "italic": true },
                    { "type": "find_replace", "find_text": "a", "replace_text": "b" }
                ]
            }),
        )
        .await
        .expect("batch");

        let batches = api.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 5);
        assert_eq!(
            result["structuredContent"]["requests"],
            json!(["insertText", "deleteContentRange", "insertText", "updateTextStyle", "replaceAllText"])
        );
        assert_eq!(batches[0][4]["replaceAllText"]["containsText"]["matchCase"], false);
    }

    #[tokio::test]
    async fn a_late_bad_operation_sends_nothing() {
        let api = RecordingApi::new(vec![]);
        let err = batch_update_doc(
            &api,
            &json!({
                "document_id": "doc-1",
                "operations": [
                    { "type": "insert_text", "text": "ok", "index": 1 },
                    { "type": "delete_text", "start_index": 4 }
                ]
            }),
        )
        .await
        .expect_err("missing end_index");

        assert!(err.to_string().starts_with("Operation 2:"), "{err}");
        assert!(api.batches().is_empty());
    }

    #[test]
    fn unsupported_types_and_bad_ranges_are_numbered() {
        let err = build_batch(&[json!({ "type": "explode" })]).expect_err("unknown type");
        assert!(err.to_string().starts_with("Operation 1:"));

        let err = build_batch(&[
            json!({ "type": "insert_page_break" }),
            json!({ "type": "format_text", "start_index": 9, "end_index": 2, "bold": true }),
        ])
        .expect_err("backwards range");
        assert!(err.to_string().starts_with("Operation 2: end_index (2)"));

        let err = build_batch(&[json!({ "type": "format_text", "start_index": 1, "end_index": 2 })])
            .expect_err("no style");
        assert!(err.to_string().contains("at least one style field"));

        assert!(build_batch(&[]).is_err());
    }
}
