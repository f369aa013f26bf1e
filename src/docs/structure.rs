//! Read-only views over a [`Document`] snapshot: the flattened body, tables,
//! cell ranges, header/footer ids and plain text.
//!
//! All offsets are only valid for the snapshot they were computed from.

use crate::docs::convert::{HeaderFooterSlot, SegmentKind};
use crate::docs::model::{Document, StructuralElement, Table, TableCell};
use crate::error::DocsError;
use serde::Serialize;

pub const INLINE_OBJECT_PLACEHOLDER: &str = "[image]";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyElement {
    pub element_index: usize,
    pub start_index: i64,
    pub end_index: i64,
    #[serde(flatten)]
    pub kind: ElementKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Paragraph {
        named_style: String,
        text: String,
    },
    ListItem {
        named_style: String,
        list_id: Option<String>,
        nesting_level: i64,
        text: String,
    },
    Table {
        table_index: usize,
        rows: usize,
        columns: usize,
    },
    SectionBreak,
    TableOfContents,
    Unknown,
}

impl ElementKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::ListItem { .. } => "list_item",
            Self::Table { .. } => "table",
            Self::SectionBreak => "section_break",
            Self::TableOfContents => "table_of_contents",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph { .. } | Self::ListItem { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub index: usize,
    pub start_index: i64,
    pub end_index: i64,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    pub content_start: i64,
    pub content_end: i64,
}

/// Flattens the top-level body content. Table and table-of-contents children
/// are not flattened; only the parent element is listed.
pub fn parse_body(document: &Document) -> Vec<BodyElement> {
    let mut table_index = 0;
    document
        .body
        .content
        .iter()
        .enumerate()
        .map(|(element_index, element)| {
            let kind = if let Some(paragraph) = &element.paragraph {
                let named_style = paragraph.named_style().to_string();
                let text = paragraph.text();
                match &paragraph.bullet {
                    Some(bullet) => ElementKind::ListItem {
                        named_style,
                        list_id: bullet.list_id.clone(),
                        nesting_level: bullet.nesting_level.unwrap_or(0),
                        text,
                    },
                    None => ElementKind::Paragraph { named_style, text },
                }
            } else if let Some(table) = &element.table {
                let kind = ElementKind::Table {
                    table_index,
                    rows: table.row_count(),
                    columns: table.column_count(),
                };
                table_index += 1;
                kind
            } else if element.section_break.is_some() {
                ElementKind::SectionBreak
            } else if element.table_of_contents.is_some() {
                ElementKind::TableOfContents
            } else {
                ElementKind::Unknown
            };

            BodyElement {
                element_index,
                start_index: element.start(),
                end_index: element.end(),
                kind,
            }
        })
        .collect()
}

/// Paragraphs and list items only.
pub fn find_paragraphs(document: &Document) -> Vec<BodyElement> {
    parse_body(document)
        .into_iter()
        .filter(|element| element.kind.is_paragraph())
        .collect()
}

fn tables(document: &Document) -> impl Iterator<Item = (&StructuralElement, &Table)> {
    document
        .body
        .content
        .iter()
        .filter_map(|element| element.table.as_ref().map(|table| (element, table)))
}

pub fn find_tables(document: &Document) -> Vec<TableDescriptor> {
    tables(document)
        .enumerate()
        .map(|(index, (element, table))| TableDescriptor {
            index,
            start_index: element.start(),
            end_index: element.end(),
            rows: table.row_count(),
            columns: table.column_count(),
        })
        .collect()
}

pub fn table_count(document: &Document) -> usize {
    tables(document).count()
}

fn table_at(document: &Document, table_index: usize) -> Result<&Table, DocsError> {
    tables(document)
        .nth(table_index)
        .map(|(_, table)| table)
        .ok_or_else(|| {
            DocsError::unresolved(format!(
                "Table {table_index} not found (document has {} tables)",
                table_count(document)
            ))
        })
}

fn cell_at(table: &Table, row: usize, col: usize) -> Result<&TableCell, DocsError> {
    let table_row = table.table_rows.get(row).ok_or_else(|| {
        DocsError::unresolved(format!(
            "Row {row} out of range (table has {} rows)",
            table.row_count()
        ))
    })?;
    // Merged rows can hold fewer cells than the first row.
    table_row.table_cells.get(col).ok_or_else(|| {
        DocsError::unresolved(format!(
            "Column {col} out of range (row {row} has {} columns)",
            table_row.table_cells.len()
        ))
    })
}

/// Content range of one cell: from its first paragraph to the cell end.
pub fn get_table_cell_range(
    document: &Document,
    table_index: usize,
    row: usize,
    col: usize,
) -> Result<CellRange, DocsError> {
    let cell = cell_at(table_at(document, table_index)?, row, col)?;
    let cell_start = cell.start_index.unwrap_or(0);
    let content_start = cell
        .content
        .first()
        .map(|first| first.start_index.unwrap_or(cell_start + 1))
        .unwrap_or(cell_start + 1);
    Ok(CellRange {
        content_start,
        content_end: cell.end_index.unwrap_or(0),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderFooterIds {
    pub default_header: Option<String>,
    pub default_footer: Option<String>,
    pub first_page_header: Option<String>,
    pub first_page_footer: Option<String>,
    pub even_page_header: Option<String>,
    pub even_page_footer: Option<String>,
}

impl HeaderFooterIds {
    pub fn get(&self, kind: SegmentKind, slot: HeaderFooterSlot) -> Option<&str> {
        let id = match (kind, slot) {
            (SegmentKind::Header, HeaderFooterSlot::Default) => &self.default_header,
            (SegmentKind::Footer, HeaderFooterSlot::Default) => &self.default_footer,
            (SegmentKind::Header, HeaderFooterSlot::FirstPage) => &self.first_page_header,
            (SegmentKind::Footer, HeaderFooterSlot::FirstPage) => &self.first_page_footer,
            (SegmentKind::Header, HeaderFooterSlot::EvenPage) => &self.even_page_header,
            (SegmentKind::Footer, HeaderFooterSlot::EvenPage) => &self.even_page_footer,
        };
        id.as_deref()
    }
}

pub fn find_header_footer_ids(document: &Document) -> HeaderFooterIds {
    let style = &document.document_style;
    HeaderFooterIds {
        default_header: style.default_header_id.clone(),
        default_footer: style.default_footer_id.clone(),
        first_page_header: style.first_page_header_id.clone(),
        first_page_footer: style.first_page_footer_id.clone(),
        even_page_header: style.even_page_header_id.clone(),
        even_page_footer: style.even_page_footer_id.clone(),
    }
}

/// Content of a header or footer segment, if the document has it.
pub fn segment_content<'a>(
    document: &'a Document,
    kind: SegmentKind,
    segment_id: &str,
) -> Option<&'a [StructuralElement]> {
    let segments = match kind {
        SegmentKind::Header => &document.headers,
        SegmentKind::Footer => &document.footers,
    };
    segments
        .get(segment_id)
        .map(|segment| segment.content.as_slice())
}

pub fn extract_doc_text(document: &Document) -> String {
    let mut text = String::new();
    push_elements_text(&document.body.content, &mut text);
    text
}

fn push_elements_text(elements: &[StructuralElement], out: &mut String) {
    for element in elements {
        if let Some(paragraph) = &element.paragraph {
            for part in &paragraph.elements {
                if let Some(run) = &part.text_run {
                    out.push_str(&run.content);
                } else if part.inline_object_element.is_some() {
                    out.push_str(INLINE_OBJECT_PLACEHOLDER);
                }
            }
        } else if let Some(table) = &element.table {
            for row in &table.table_rows {
                for cell in &row.table_cells {
                    push_elements_text(&cell.content, out);
                }
            }
        } else if let Some(toc) = &element.table_of_contents {
            push_elements_text(&toc.content, out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDebugInfo {
    pub table_index: usize,
    pub start_index: i64,
    pub end_index: i64,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<CellDebugInfo>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellDebugInfo {
    pub row: usize,
    pub col: usize,
    pub content: String,
    pub start_index: i64,
    pub end_index: i64,
    pub row_span: i64,
    pub col_span: i64,
}

pub fn get_table_debug_info(
    document: &Document,
    table_index: usize,
) -> Result<TableDebugInfo, DocsError> {
    let (element, table) = tables(document).nth(table_index).ok_or_else(|| {
        DocsError::unresolved(format!(
            "Table {table_index} not found (document has {} tables)",
            table_count(document)
        ))
    })?;

    let cells = table
        .table_rows
        .iter()
        .enumerate()
        .map(|(row, table_row)| {
            table_row
                .table_cells
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let mut content = String::new();
                    push_elements_text(&cell.content, &mut content);
                    let spans = cell.table_cell_style.as_ref();
                    CellDebugInfo {
                        row,
                        col,
                        content: content.trim_end_matches('\n').to_string(),
                        start_index: cell.start_index.unwrap_or(0),
                        end_index: cell.end_index.unwrap_or(0),
                        row_span: spans.and_then(|s| s.row_span).unwrap_or(1),
                        col_span: spans.and_then(|s| s.column_span).unwrap_or(1),
                    }
                })
                .collect()
        })
        .collect();

    Ok(TableDebugInfo {
        table_index,
        start_index: element.start(),
        end_index: element.end(),
        rows: table.row_count(),
        columns: table.column_count(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::fixtures::{document_with_table, table_element};
    use serde_json::json;

    fn sample() -> Document {
        serde_json::from_value(json!({
            "documentId": "doc-1",
            "title": "Sample",
            "body": {
                "content": [
                    { "endIndex": 1, "sectionBreak": {} },
                    {
                        "startIndex": 1,
                        "endIndex": 8,
                        "paragraph": {
                            "paragraphStyle": { "namedStyleType": "HEADING_1" },
                            "elements": [{ "textRun": { "content": "Title\n" } }]
                        }
                    },
                    {
                        "startIndex": 8,
                        "endIndex": 13,
                        "paragraph": {
                            "bullet": { "listId": "kix.list1" },
                            "elements": [
                                { "textRun": { "content": "One " } },
                                { "inlineObjectElement": { "inlineObjectId": "kix.img" } },
                                { "textRun": { "content": "\n" } }
                            ]
                        }
                    },
                    {
                        "startIndex": 13,
                        "endIndex": 30,
                        "tableOfContents": {
                            "content": [
                                { "paragraph": { "elements": [{ "textRun": { "content": "Contents\n" } }] } }
                            ]
                        }
                    },
                    { "startIndex": 30, "endIndex": 31, "equation": {} }
                ]
            },
            "documentStyle": {
                "defaultHeaderId": "kix.h0",
                "evenPageFooterId": "kix.f2"
            }
        }))
        .expect("sample document")
    }

    #[test]
    fn parse_body_tags_each_top_level_element() {
        let elements = parse_body(&sample());
        let types: Vec<_> = elements.iter().map(|e| e.kind.type_name()).collect();
        assert_eq!(
            types,
            vec!["section_break", "paragraph", "list_item", "table_of_contents", "unknown"]
        );

        assert_eq!(elements[0].start_index, 0);
        assert_eq!(elements[0].end_index, 1);
        assert_eq!(
            elements[1].kind,
            ElementKind::Paragraph {
                named_style: "HEADING_1".to_string(),
                text: "Title\n".to_string(),
            }
        );
        assert_eq!(
            elements[2].kind,
            ElementKind::ListItem {
                named_style: "NORMAL_TEXT".to_string(),
                list_id: Some("kix.list1".to_string()),
                nesting_level: 0,
                text: "One \n".to_string(),
            }
        );
        assert_eq!(find_paragraphs(&sample()).len(), 2);
    }

    #[test]
    fn body_element_serializes_with_type_tag() {
        let elements = parse_body(&sample());
        let value = serde_json::to_value(&elements[0]).expect("json");
        assert_eq!(
            value,
            json!({ "element_index": 0, "start_index": 0, "end_index": 1, "type": "section_break" })
        );
    }

    #[test]
    fn text_extraction_is_recursive() {
        let mut document = sample();
        document
            .body
            .content
            .push(table_element(31, &[&["a", "b"], &["c", ""]]));

        assert_eq!(
            extract_doc_text(&document),
            "Title\nOne [image]\nContents\na\nb\nc\n\n"
        );
    }

    #[test]
    fn tables_are_numbered_in_document_order() {
        let mut document = document_with_table(100, &[&["", ""], &["", ""]]);
        let end = document.body.content.last().map(|e| e.end()).unwrap_or(0);
        document
            .body
            .content
            .push(table_element(end, &[&["x"], &["y"], &["z"]]));

        let found = find_tables(&document);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].index, 0);
        assert_eq!(found[0].start_index, 100);
        assert_eq!((found[0].rows, found[0].columns), (2, 2));
        assert_eq!(found[1].index, 1);
        assert_eq!((found[1].rows, found[1].columns), (3, 1));
        assert!(found[1].start_index > found[0].start_index);

        let body_tables: Vec<_> = parse_body(&document)
            .into_iter()
            .filter_map(|e| match e.kind {
                ElementKind::Table { table_index, .. } => Some(table_index),
                _ => None,
            })
            .collect();
        assert_eq!(body_tables, vec![0, 1]);
    }

    #[test]
    fn fresh_cell_range_covers_only_the_sentinel_newline() {
        let document = document_with_table(100, &[&["", ""], &["", ""]]);
        for row in 0..2 {
            for col in 0..2 {
                let range = get_table_cell_range(&document, 0, row, col).expect("range");
                assert_eq!(range.content_end - range.content_start, 1, "({row},{col})");
            }
        }
        assert_eq!(
            get_table_cell_range(&document, 0, 0, 0).expect("range"),
            CellRange {
                content_start: 103,
                content_end: 104
            }
        );
    }

    #[test]
    fn cell_without_content_starts_after_cell_start() {
        let document: Document = serde_json::from_value(json!({
            "body": { "content": [{
                "startIndex": 5,
                "endIndex": 9,
                "table": { "tableRows": [{ "tableCells": [{ "startIndex": 6, "endIndex": 8 }] }] }
            }] }
        }))
        .expect("document");

        assert_eq!(
            get_table_cell_range(&document, 0, 0, 0).expect("range"),
            CellRange {
                content_start: 7,
                content_end: 8
            }
        );
    }

    #[test]
    fn column_bound_is_checked_per_row() {
        let document: Document = serde_json::from_value(json!({
            "body": { "content": [{
                "startIndex": 1,
                "endIndex": 20,
                "table": { "tableRows": [
                    { "tableCells": [
                        { "startIndex": 2, "endIndex": 4 },
                        { "startIndex": 4, "endIndex": 6 }
                    ] },
                    { "tableCells": [
                        { "startIndex": 7, "endIndex": 9 }
                    ] }
                ] }
            }] }
        }))
        .expect("document");

        assert_eq!(find_tables(&document)[0].columns, 2);
        assert!(get_table_cell_range(&document, 0, 0, 1).is_ok());

        let err = get_table_cell_range(&document, 0, 1, 1).expect_err("irregular row");
        assert!(matches!(err, DocsError::AddressResolution(_)));
        assert!(err.to_string().contains("row 1 has 1 columns"));

        let err = get_table_cell_range(&document, 0, 2, 0).expect_err("row");
        assert!(err.to_string().contains("Row 2 out of range"));

        let err = get_table_cell_range(&document, 3, 0, 0).expect_err("table");
        assert!(err.to_string().contains("document has 1 tables"));
    }

    #[test]
    fn header_footer_ids_are_stable() {
        let document = sample();
        let first = find_header_footer_ids(&document);
        let second = find_header_footer_ids(&document);
        assert_eq!(first, second);
        assert_eq!(
            first.get(SegmentKind::Header, HeaderFooterSlot::Default),
            Some("kix.h0")
        );
        assert_eq!(
            first.get(SegmentKind::Footer, HeaderFooterSlot::EvenPage),
            Some("kix.f2")
        );
        assert_eq!(first.get(SegmentKind::Footer, HeaderFooterSlot::Default), None);
    }

    #[test]
    fn debug_info_reports_spans_and_trimmed_content() {
        let mut document = document_with_table(100, &[&["Name", "Qty"], &["Apple", "3"]]);
        if let Some(table) = document.body.content[1].table.as_mut() {
            table.table_rows[0].table_cells[0].table_cell_style =
                Some(crate::docs::model::TableCellStyleInfo {
                    row_span: None,
                    column_span: Some(2),
                });
        }

        let info = get_table_debug_info(&document, 0).expect("debug info");
        assert_eq!((info.rows, info.columns), (2, 2));
        assert_eq!(info.start_index, 100);
        assert_eq!(info.cells[0][0].content, "Name");
        assert_eq!(info.cells[0][0].col_span, 2);
        assert_eq!(info.cells[0][0].row_span, 1);
        assert_eq!(info.cells[1][1].content, "3");
        assert_eq!(info.cells[1][1].col_span, 1);

        assert!(matches!(
            get_table_debug_info(&document, 1),
            Err(DocsError::AddressResolution(_))
        ));
    }
}
