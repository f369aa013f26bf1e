use crate::docs::client::DocsApi;
use crate::tools::{self, ToolContext};
use serde_json::{Value, json};

pub mod contracts;
pub mod errors;

pub const PROTOCOL_VERSION: &str = "2025-11-25";

pub fn tool_definitions(read_only: bool) -> Vec<Value> {
    let definitions = vec![
        json!({
            "name": contracts::TOOL_GET_DOC_CONTENT,
            "description": "Get the plain text of a Google Doc, including table cell text.",
            "inputSchema": contracts::get_doc_content_schema()
        }),
        json!({
            "name": contracts::TOOL_INSPECT_DOC_STRUCTURE,
            "description": "Summarize a Google Doc's body elements and tables with their offsets. Use before any index-based edit.",
            "inputSchema": contracts::inspect_doc_structure_schema()
        }),
        json!({
            "name": contracts::TOOL_DEBUG_TABLE_STRUCTURE,
            "description": "Show every cell of one table with its offsets, text and merge spans.",
            "inputSchema": contracts::debug_table_structure_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_DOC,
            "description": "Create a new Google Doc with optional initial text.",
            "inputSchema": contracts::create_doc_schema()
        }),
        json!({
            "name": contracts::TOOL_MODIFY_DOC_TEXT,
            "description": "Insert or replace text at an offset and optionally format it, in one atomic batch.",
            "inputSchema": contracts::modify_doc_text_schema()
        }),
        json!({
            "name": contracts::TOOL_FIND_AND_REPLACE_DOC,
            "description": "Replace every occurrence of a string in a Google Doc.",
            "inputSchema": contracts::find_and_replace_doc_schema()
        }),
        json!({
            "name": contracts::TOOL_DELETE_DOC_CONTENT,
            "description": "Delete the content between two offsets.",
            "inputSchema": contracts::delete_doc_content_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_TABLE_WITH_DATA,
            "description": "Create a table filled with data. `index` is a body element index from inspect_doc_structure; omit it to append.",
            "inputSchema": contracts::create_table_with_data_schema()
        }),
        json!({
            "name": contracts::TOOL_POPULATE_EXISTING_TABLE,
            "description": "Append text to the cells of an existing table.",
            "inputSchema": contracts::populate_existing_table_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_TABLE_ROW,
            "description": "Insert a row above or below a row of a table.",
            "inputSchema": contracts::table_row_schema(true)
        }),
        json!({
            "name": contracts::TOOL_DELETE_TABLE_ROW,
            "description": "Delete a row from a table.",
            "inputSchema": contracts::table_row_schema(false)
        }),
        json!({
            "name": contracts::TOOL_INSERT_TABLE_COLUMN,
            "description": "Insert a column left or right of a column of a table.",
            "inputSchema": contracts::table_column_schema(true)
        }),
        json!({
            "name": contracts::TOOL_DELETE_TABLE_COLUMN,
            "description": "Delete a column from a table.",
            "inputSchema": contracts::table_column_schema(false)
        }),
        json!({
            "name": contracts::TOOL_UPDATE_TABLE_CELL_STYLE,
            "description": "Set background, padding, borders or vertical alignment of one table cell.",
            "inputSchema": contracts::update_table_cell_style_schema()
        }),
        json!({
            "name": contracts::TOOL_MERGE_TABLE_CELLS,
            "description": "Merge a rectangular range of table cells.",
            "inputSchema": contracts::merge_table_cells_schema()
        }),
        json!({
            "name": contracts::TOOL_UNMERGE_TABLE_CELLS,
            "description": "Split previously merged table cells.",
            "inputSchema": contracts::unmerge_table_cells_schema()
        }),
        json!({
            "name": contracts::TOOL_UPDATE_TABLE_ROW_STYLE,
            "description": "Set minimum height or overflow behaviour of table rows.",
            "inputSchema": contracts::update_table_row_style_schema()
        }),
        json!({
            "name": contracts::TOOL_SET_TABLE_COLUMN_WIDTH,
            "description": "Set table columns to a fixed width or distribute them evenly.",
            "inputSchema": contracts::set_table_column_width_schema()
        }),
        json!({
            "name": contracts::TOOL_PIN_TABLE_HEADER_ROWS,
            "description": "Pin the first rows of a table as headers repeated on each page; 0 unpins.",
            "inputSchema": contracts::pin_table_header_rows_schema()
        }),
        json!({
            "name": contracts::TOOL_UPDATE_PARAGRAPH_STYLE,
            "description": "Apply heading level, alignment, spacing or indentation to a paragraph.",
            "inputSchema": contracts::update_paragraph_style_schema()
        }),
        json!({
            "name": contracts::TOOL_CREATE_PARAGRAPH_BULLETS,
            "description": "Turn paragraphs into a bulleted or numbered list.",
            "inputSchema": contracts::paragraph_bullets_schema(true)
        }),
        json!({
            "name": contracts::TOOL_DELETE_PARAGRAPH_BULLETS,
            "description": "Remove list bullets from paragraphs.",
            "inputSchema": contracts::paragraph_bullets_schema(false)
        }),
        json!({
            "name": contracts::TOOL_INSERT_DOC_ELEMENTS,
            "description": "Insert a table, page break or image.",
            "inputSchema": contracts::insert_doc_elements_schema()
        }),
        json!({
            "name": contracts::TOOL_INSERT_DOC_IMAGE,
            "description": "Insert an image from a public http(s) URL.",
            "inputSchema": contracts::insert_doc_image_schema()
        }),
        json!({
            "name": contracts::TOOL_UPDATE_DOC_HEADERS_FOOTERS,
            "description": "Replace the text of a header or footer, creating it when missing.",
            "inputSchema": contracts::update_doc_headers_footers_schema()
        }),
        json!({
            "name": contracts::TOOL_DELETE_DOC_HEADER_FOOTER,
            "description": "Delete a header or footer.",
            "inputSchema": contracts::delete_doc_header_footer_schema()
        }),
        json!({
            "name": contracts::TOOL_BATCH_UPDATE_DOC,
            "description": "Run several text operations as one atomic batch. Every operation is validated before anything is sent.",
            "inputSchema": contracts::batch_update_doc_schema()
        }),
    ];

    definitions
        .into_iter()
        .filter(|definition| {
            !read_only
                || definition
                    .get("name")
                    .and_then(|value| value.as_str())
                    .is_some_and(|name| contracts::READ_ONLY_TOOLS.contains(&name))
        })
        .collect()
}

/// Answers one JSON-RPC message. Notifications and unknown methods get no
/// response.
pub async fn handle_message<A: DocsApi>(ctx: &ToolContext<A>, request: &Value) -> Option<Value> {
    let method = request.get("method").and_then(|value| value.as_str());
    let id = request.get("id").cloned()?;

    let result = match method {
        Some("initialize") => json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
        Some("tools/list") => json!({
            "tools": tool_definitions(ctx.read_only)
        }),
        Some("tools/call") => handle_tool_call(ctx, request).await,
        Some("ping") => json!({}),
        _ => return None,
    };

    Some(json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    }))
}

async fn handle_tool_call<A: DocsApi>(ctx: &ToolContext<A>, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(errors::INVALID_INPUT, "params.name must be a string", None);
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    tools::call_tool(ctx, name, &args).await
}
