use crate::docs::client::DocsApi;
use crate::error::DocsError;
use crate::mcp::{contracts, errors};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{info, warn};

pub mod batch;
pub mod content;
pub mod elements;
pub mod headers_footers;
pub mod paragraphs;
pub mod tables;
pub mod text;

/// Everything a tool call needs: the API handle and the instance's mode.
pub struct ToolContext<A> {
    pub api: A,
    pub read_only: bool,
}

impl<A: DocsApi> ToolContext<A> {
    pub fn new(api: A, read_only: bool) -> Self {
        Self { api, read_only }
    }
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    source: Option<&str>,
) -> Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(source) = source
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("source".to_string(), json!(source));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

pub fn success_result(text: impl Into<String>, structured: Value) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}],
        "structuredContent": structured,
        "isError": false
    })
}

pub fn doc_link(document_id: &str) -> String {
    format!("https://docs.google.com/document/d/{document_id}/edit")
}

/// Decodes tool arguments into the tool's input struct.
pub(crate) fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T, DocsError> {
    if !args.is_object() {
        return Err(DocsError::invalid("arguments must be an object"));
    }
    serde_json::from_value(args.clone())
        .map_err(|err| DocsError::invalid(format!("invalid arguments: {err}")))
}

pub async fn call_tool<A: DocsApi>(ctx: &ToolContext<A>, name: &str, args: &Value) -> Value {
    if !contracts::ALL_TOOLS.contains(&name) {
        return error_result(
            errors::INVALID_INPUT,
            format!("tool not implemented: {name}"),
            Some(name),
        );
    }
    if ctx.read_only && !contracts::READ_ONLY_TOOLS.contains(&name) {
        return error_result(
            errors::READ_ONLY,
            format!("{name} modifies documents and is disabled in read-only mode"),
            Some(name),
        );
    }

    info!(tool = name, "calling tool");
    let api = &ctx.api;
    let outcome = match name {
        contracts::TOOL_GET_DOC_CONTENT => content::get_doc_content(api, args).await,
        contracts::TOOL_INSPECT_DOC_STRUCTURE => content::inspect_doc_structure(api, args).await,
        contracts::TOOL_DEBUG_TABLE_STRUCTURE => content::debug_table_structure(api, args).await,
        contracts::TOOL_CREATE_DOC => text::create_doc(api, args).await,
        contracts::TOOL_MODIFY_DOC_TEXT => text::modify_doc_text(api, args).await,
        contracts::TOOL_FIND_AND_REPLACE_DOC => text::find_and_replace_doc(api, args).await,
        contracts::TOOL_DELETE_DOC_CONTENT => text::delete_doc_content(api, args).await,
        contracts::TOOL_CREATE_TABLE_WITH_DATA => tables::create_table_with_data(api, args).await,
        contracts::TOOL_POPULATE_EXISTING_TABLE => {
            tables::populate_existing_table(api, args).await
        }
        contracts::TOOL_INSERT_TABLE_ROW => tables::insert_table_row(api, args).await,
        contracts::TOOL_DELETE_TABLE_ROW => tables::delete_table_row(api, args).await,
        contracts::TOOL_INSERT_TABLE_COLUMN => tables::insert_table_column(api, args).await,
        contracts::TOOL_DELETE_TABLE_COLUMN => tables::delete_table_column(api, args).await,
        contracts::TOOL_UPDATE_TABLE_CELL_STYLE => tables::update_table_cell_style(api, args).await,
        contracts::TOOL_MERGE_TABLE_CELLS => tables::merge_table_cells(api, args).await,
        contracts::TOOL_UNMERGE_TABLE_CELLS => tables::unmerge_table_cells(api, args).await,
        contracts::TOOL_UPDATE_TABLE_ROW_STYLE => tables::update_table_row_style(api, args).await,
        contracts::TOOL_SET_TABLE_COLUMN_WIDTH => tables::set_table_column_width(api, args).await,
        contracts::TOOL_PIN_TABLE_HEADER_ROWS => tables::pin_table_header_rows(api, args).await,
        contracts::TOOL_UPDATE_PARAGRAPH_STYLE => {
            paragraphs::update_paragraph_style(api, args).await
        }
        contracts::TOOL_CREATE_PARAGRAPH_BULLETS => {
            paragraphs::create_paragraph_bullets(api, args).await
        }
        contracts::TOOL_DELETE_PARAGRAPH_BULLETS => {
            paragraphs::delete_paragraph_bullets(api, args).await
        }
        contracts::TOOL_INSERT_DOC_ELEMENTS => elements::insert_doc_elements(api, args).await,
        contracts::TOOL_INSERT_DOC_IMAGE => elements::insert_doc_image(api, args).await,
        contracts::TOOL_UPDATE_DOC_HEADERS_FOOTERS => {
            headers_footers::update_doc_headers_footers(api, args).await
        }
        contracts::TOOL_DELETE_DOC_HEADER_FOOTER => {
            headers_footers::delete_doc_header_footer(api, args).await
        }
        contracts::TOOL_BATCH_UPDATE_DOC => batch::batch_update_doc(api, args).await,
        _ => Err(DocsError::invalid(format!("tool not implemented: {name}"))),
    };

    match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(tool = name, kind = err.kind(), error = %err, "tool failed");
            error_result(err.kind(), err.to_string(), Some(name))
        }
    }
}
