use serde_json::{Value, json};

pub const TOOL_GET_DOC_CONTENT: &str = "gdocs.get_doc_content";
pub const TOOL_INSPECT_DOC_STRUCTURE: &str = "gdocs.inspect_doc_structure";
pub const TOOL_DEBUG_TABLE_STRUCTURE: &str = "gdocs.debug_table_structure";
pub const TOOL_CREATE_DOC: &str = "gdocs.create_doc";
pub const TOOL_MODIFY_DOC_TEXT: &str = "gdocs.modify_doc_text";
pub const TOOL_FIND_AND_REPLACE_DOC: &str = "gdocs.find_and_replace_doc";
pub const TOOL_DELETE_DOC_CONTENT: &str = "gdocs.delete_doc_content";
pub const TOOL_CREATE_TABLE_WITH_DATA: &str = "gdocs.create_table_with_data";
pub const TOOL_POPULATE_EXISTING_TABLE: &str = "gdocs.populate_existing_table";
pub const TOOL_INSERT_TABLE_ROW: &str = "gdocs.insert_table_row";
pub const TOOL_DELETE_TABLE_ROW: &str = "gdocs.delete_table_row";
pub const TOOL_INSERT_TABLE_COLUMN: &str = "gdocs.insert_table_column";
pub const TOOL_DELETE_TABLE_COLUMN: &str = "gdocs.delete_table_column";
pub const TOOL_UPDATE_TABLE_CELL_STYLE: &str = "gdocs.update_table_cell_style";
pub const TOOL_MERGE_TABLE_CELLS: &str = "gdocs.merge_table_cells";
pub const TOOL_UNMERGE_TABLE_CELLS: &str = "gdocs.unmerge_table_cells";
pub const TOOL_UPDATE_TABLE_ROW_STYLE: &str = "gdocs.update_table_row_style";
pub const TOOL_SET_TABLE_COLUMN_WIDTH: &str = "gdocs.set_table_column_width";
pub const TOOL_PIN_TABLE_HEADER_ROWS: &str = "gdocs.pin_table_header_rows";
pub const TOOL_UPDATE_PARAGRAPH_STYLE: &str = "gdocs.update_paragraph_style";
pub const TOOL_CREATE_PARAGRAPH_BULLETS: &str = "gdocs.create_paragraph_bullets";
pub const TOOL_DELETE_PARAGRAPH_BULLETS: &str = "gdocs.delete_paragraph_bullets";
pub const TOOL_INSERT_DOC_ELEMENTS: &str = "gdocs.insert_doc_elements";
pub const TOOL_INSERT_DOC_IMAGE: &str = "gdocs.insert_doc_image";
pub const TOOL_UPDATE_DOC_HEADERS_FOOTERS: &str = "gdocs.update_doc_headers_footers";
pub const TOOL_DELETE_DOC_HEADER_FOOTER: &str = "gdocs.delete_doc_header_footer";
pub const TOOL_BATCH_UPDATE_DOC: &str = "gdocs.batch_update_doc";

pub const READ_ONLY_TOOLS: &[&str] = &[
    TOOL_GET_DOC_CONTENT,
    TOOL_INSPECT_DOC_STRUCTURE,
    TOOL_DEBUG_TABLE_STRUCTURE,
];

pub const ALL_TOOLS: &[&str] = &[
    TOOL_GET_DOC_CONTENT,
    TOOL_INSPECT_DOC_STRUCTURE,
    TOOL_DEBUG_TABLE_STRUCTURE,
    TOOL_CREATE_DOC,
    TOOL_MODIFY_DOC_TEXT,
    TOOL_FIND_AND_REPLACE_DOC,
    TOOL_DELETE_DOC_CONTENT,
    TOOL_CREATE_TABLE_WITH_DATA,
    TOOL_POPULATE_EXISTING_TABLE,
    TOOL_INSERT_TABLE_ROW,
    TOOL_DELETE_TABLE_ROW,
    TOOL_INSERT_TABLE_COLUMN,
    TOOL_DELETE_TABLE_COLUMN,
    TOOL_UPDATE_TABLE_CELL_STYLE,
    TOOL_MERGE_TABLE_CELLS,
    TOOL_UNMERGE_TABLE_CELLS,
    TOOL_UPDATE_TABLE_ROW_STYLE,
    TOOL_SET_TABLE_COLUMN_WIDTH,
    TOOL_PIN_TABLE_HEADER_ROWS,
    TOOL_UPDATE_PARAGRAPH_STYLE,
    TOOL_CREATE_PARAGRAPH_BULLETS,
    TOOL_DELETE_PARAGRAPH_BULLETS,
    TOOL_INSERT_DOC_ELEMENTS,
    TOOL_INSERT_DOC_IMAGE,
    TOOL_UPDATE_DOC_HEADERS_FOOTERS,
    TOOL_DELETE_DOC_HEADER_FOOTER,
    TOOL_BATCH_UPDATE_DOC,
];

fn index() -> Value {
    json!({ "type": "integer", "minimum": 0 })
}

fn color() -> Value {
    json!({ "type": "string", "pattern": "^#[0-9A-Fa-f]{6}$" })
}

fn points() -> Value {
    json!({ "type": "number", "minimum": 0 })
}

fn table_data() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": { "type": "array", "items": { "type": "string" } }
    })
}

fn text_style_properties() -> Value {
    json!({
        "bold": { "type": "boolean" },
        "italic": { "type": "boolean" },
        "underline": { "type": "boolean" },
        "font_size": { "type": "number", "minimum": 1, "maximum": 400 },
        "font_family": { "type": "string" },
        "text_color": color(),
        "background_color": color()
    })
}

/// Object schema over `document_id` plus `properties`.
fn document_schema(properties: Value, required: &[&str]) -> Value {
    let mut merged = serde_json::Map::new();
    merged.insert("document_id".to_string(), json!({ "type": "string" }));
    if let Value::Object(extra) = properties {
        merged.extend(extra);
    }
    let mut all_required = vec!["document_id"];
    all_required.extend_from_slice(required);
    json!({
        "type": "object",
        "properties": merged,
        "required": all_required,
        "additionalProperties": false
    })
}

pub fn get_doc_content_schema() -> Value {
    document_schema(json!({}), &[])
}

pub fn inspect_doc_structure_schema() -> Value {
    document_schema(json!({ "detailed": { "type": "boolean" } }), &[])
}

pub fn debug_table_structure_schema() -> Value {
    document_schema(json!({ "table_index": index() }), &["table_index"])
}

pub fn create_doc_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "minLength": 1 },
            "content": { "type": "string" }
        },
        "required": ["title"],
        "additionalProperties": false
    })
}

pub fn modify_doc_text_schema() -> Value {
    let mut properties = text_style_properties();
    if let Some(obj) = properties.as_object_mut() {
        obj.insert("start_index".to_string(), index());
        obj.insert("end_index".to_string(), index());
        obj.insert("text".to_string(), json!({ "type": "string" }));
    }
    document_schema(properties, &["start_index"])
}

pub fn find_and_replace_doc_schema() -> Value {
    document_schema(
        json!({
            "find_text": { "type": "string", "minLength": 1 },
            "replace_text": { "type": "string" },
            "match_case": { "type": "boolean" }
        }),
        &["find_text", "replace_text"],
    )
}

pub fn delete_doc_content_schema() -> Value {
    document_schema(
        json!({ "start_index": index(), "end_index": index() }),
        &["start_index", "end_index"],
    )
}

pub fn create_table_with_data_schema() -> Value {
    document_schema(
        json!({
            "table_data": table_data(),
            "index": index(),
            "bold_headers": { "type": "boolean" }
        }),
        &["table_data"],
    )
}

pub fn populate_existing_table_schema() -> Value {
    document_schema(
        json!({ "table_index": index(), "table_data": table_data() }),
        &["table_index", "table_data"],
    )
}

pub fn table_row_schema(with_placement: bool) -> Value {
    let mut properties = json!({ "table_index": index(), "row_index": index() });
    if with_placement && let Some(obj) = properties.as_object_mut() {
        obj.insert("insert_below".to_string(), json!({ "type": "boolean" }));
    }
    document_schema(properties, &["table_index", "row_index"])
}

pub fn table_column_schema(with_placement: bool) -> Value {
    let mut properties = json!({ "table_index": index(), "column_index": index() });
    if with_placement && let Some(obj) = properties.as_object_mut() {
        obj.insert("insert_right".to_string(), json!({ "type": "boolean" }));
    }
    document_schema(properties, &["table_index", "column_index"])
}

pub fn update_table_cell_style_schema() -> Value {
    document_schema(
        json!({
            "table_index": index(),
            "row_index": index(),
            "column_index": index(),
            "background_color": color(),
            "padding_top": points(),
            "padding_bottom": points(),
            "padding_left": points(),
            "padding_right": points(),
            "border_width": points(),
            "border_color": color(),
            "content_alignment": { "type": "string", "enum": ["TOP", "MIDDLE", "BOTTOM"] }
        }),
        &["table_index", "row_index", "column_index"],
    )
}

pub fn merge_table_cells_schema() -> Value {
    document_schema(
        json!({
            "table_index": index(),
            "start_row": index(),
            "start_col": index(),
            "row_span": { "type": "integer", "minimum": 1 },
            "col_span": { "type": "integer", "minimum": 1 }
        }),
        &["table_index", "start_row", "start_col", "row_span", "col_span"],
    )
}

pub fn unmerge_table_cells_schema() -> Value {
    document_schema(
        json!({
            "table_index": index(),
            "row_index": index(),
            "col_index": index(),
            "row_span": { "type": "integer", "minimum": 1 },
            "col_span": { "type": "integer", "minimum": 1 }
        }),
        &["table_index", "row_index", "col_index", "row_span", "col_span"],
    )
}

pub fn update_table_row_style_schema() -> Value {
    document_schema(
        json!({
            "table_index": index(),
            "row_indices": { "type": "array", "items": index(), "minItems": 1 },
            "min_row_height": points(),
            "prevent_overflow": { "type": "boolean" }
        }),
        &["table_index", "row_indices"],
    )
}

pub fn set_table_column_width_schema() -> Value {
    document_schema(
        json!({
            "table_index": index(),
            "column_indices": { "type": "array", "items": index(), "minItems": 1 },
            "width": { "type": "number", "exclusiveMinimum": 0 },
            "width_type": { "type": "string", "enum": ["FIXED_WIDTH", "EVENLY_DISTRIBUTED"] }
        }),
        &["table_index", "column_indices"],
    )
}

pub fn pin_table_header_rows_schema() -> Value {
    document_schema(
        json!({ "table_index": index(), "pinned_header_rows_count": index() }),
        &["table_index", "pinned_header_rows_count"],
    )
}

pub fn update_paragraph_style_schema() -> Value {
    document_schema(
        json!({
            "paragraph_index": index(),
            "heading_level": { "type": "integer", "minimum": 0, "maximum": 6 },
            "alignment": { "type": "string", "enum": ["START", "CENTER", "END", "JUSTIFIED"] },
            "line_spacing": { "type": "number", "exclusiveMinimum": 0 },
            "indent_first_line": { "type": "number" },
            "indent_start": { "type": "number" },
            "indent_end": { "type": "number" },
            "space_above": points(),
            "space_below": points()
        }),
        &["paragraph_index"],
    )
}

pub fn paragraph_bullets_schema(with_list_type: bool) -> Value {
    let mut properties = json!({
        "paragraph_indices": { "type": "array", "items": index(), "minItems": 1 }
    });
    if with_list_type && let Some(obj) = properties.as_object_mut() {
        obj.insert(
            "list_type".to_string(),
            json!({ "type": "string", "enum": ["UNORDERED", "ORDERED"] }),
        );
    }
    document_schema(properties, &["paragraph_indices"])
}

pub fn insert_doc_elements_schema() -> Value {
    document_schema(
        json!({
            "element_type": { "type": "string", "enum": ["table", "page_break", "image"] },
            "index": index(),
            "rows": { "type": "integer", "minimum": 1, "maximum": 1000 },
            "columns": { "type": "integer", "minimum": 1, "maximum": 20 },
            "table_data": table_data(),
            "image_url": { "type": "string" },
            "width": points(),
            "height": points()
        }),
        &["element_type"],
    )
}

pub fn insert_doc_image_schema() -> Value {
    document_schema(
        json!({
            "image_url": { "type": "string", "pattern": "^https?://" },
            "index": index(),
            "width": points(),
            "height": points()
        }),
        &["image_url"],
    )
}

fn header_footer_properties() -> Value {
    json!({
        "section_type": { "type": "string", "enum": ["header", "footer"] },
        "header_footer_type": {
            "type": "string",
            "enum": ["DEFAULT", "FIRST_PAGE", "FIRST_PAGE_ONLY", "EVEN_PAGE"]
        }
    })
}

pub fn update_doc_headers_footers_schema() -> Value {
    let mut properties = header_footer_properties();
    if let Some(obj) = properties.as_object_mut() {
        obj.insert("content".to_string(), json!({ "type": "string" }));
    }
    document_schema(properties, &["section_type", "content"])
}

pub fn delete_doc_header_footer_schema() -> Value {
    document_schema(header_footer_properties(), &["section_type"])
}

pub fn batch_update_doc_schema() -> Value {
    let mut operation = text_style_properties();
    if let Some(obj) = operation.as_object_mut() {
        obj.insert(
            "type".to_string(),
            json!({
                "type": "string",
                "enum": [
                    "insert_text", "delete_text", "replace_text", "format_text",
                    "find_replace", "insert_table", "insert_page_break"
                ]
            }),
        );
        for key in ["index", "start_index", "end_index"] {
            obj.insert(key.to_string(), index());
        }
        for key in ["text", "find_text", "replace_text"] {
            obj.insert(key.to_string(), json!({ "type": "string" }));
        }
        obj.insert("match_case".to_string(), json!({ "type": "boolean" }));
        obj.insert("rows".to_string(), json!({ "type": "integer", "minimum": 1 }));
        obj.insert("columns".to_string(), json!({ "type": "integer", "minimum": 1 }));
    }
    document_schema(
        json!({
            "operations": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "properties": operation,
                    "required": ["type"]
                }
            }
        }),
        &["operations"],
    )
}
