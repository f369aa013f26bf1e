//! Snapshot types for a fetched Google Docs document.
//!
//! Every field is optional or defaulted: the API omits `startIndex` on the
//! first body element and leaves out empty collections entirely.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub revision_id: Option<String>,
    #[serde(default)]
    pub body: Body,
    #[serde(default)]
    pub headers: BTreeMap<String, Segment>,
    #[serde(default)]
    pub footers: BTreeMap<String, Segment>,
    #[serde(default)]
    pub document_style: DocumentStyle,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// A header or footer region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStyle {
    #[serde(default)]
    pub default_header_id: Option<String>,
    #[serde(default)]
    pub default_footer_id: Option<String>,
    #[serde(default)]
    pub first_page_header_id: Option<String>,
    #[serde(default)]
    pub first_page_footer_id: Option<String>,
    #[serde(default)]
    pub even_page_header_id: Option<String>,
    #[serde(default)]
    pub even_page_footer_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    #[serde(default)]
    pub start_index: Option<i64>,
    #[serde(default)]
    pub end_index: Option<i64>,
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
    #[serde(default)]
    pub table: Option<Table>,
    #[serde(default)]
    pub section_break: Option<Value>,
    #[serde(default)]
    pub table_of_contents: Option<TableOfContents>,
}

impl StructuralElement {
    pub fn start(&self) -> i64 {
        self.start_index.unwrap_or(0)
    }

    pub fn end(&self) -> i64 {
        self.end_index.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
    #[serde(default)]
    pub paragraph_style: Option<ParagraphStyleInfo>,
    #[serde(default)]
    pub bullet: Option<Bullet>,
}

impl Paragraph {
    /// Concatenated run text, including the trailing newline.
    pub fn text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|element| element.text_run.as_ref())
            .map(|run| run.content.as_str())
            .collect()
    }

    pub fn named_style(&self) -> &str {
        self.paragraph_style
            .as_ref()
            .and_then(|style| style.named_style_type.as_deref())
            .unwrap_or("NORMAL_TEXT")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyleInfo {
    #[serde(default)]
    pub named_style_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub nesting_level: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default)]
    pub text_run: Option<TextRun>,
    #[serde(default)]
    pub inline_object_element: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.table_rows.len()
    }

    /// Column count as reported by the first row.
    pub fn column_count(&self) -> usize {
        self.table_rows
            .first()
            .map(|row| row.table_cells.len())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub start_index: Option<i64>,
    #[serde(default)]
    pub end_index: Option<i64>,
    #[serde(default)]
    pub content: Vec<StructuralElement>,
    #[serde(default)]
    pub table_cell_style: Option<TableCellStyleInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyleInfo {
    #[serde(default)]
    pub row_span: Option<i64>,
    #[serde(default)]
    pub column_span: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableOfContents {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// Response body of `documents/{id}:batchUpdate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl BatchUpdateResponse {
    pub fn created_header_id(&self) -> Option<&str> {
        self.replies
            .iter()
            .find_map(|reply| reply.create_header.as_ref())
            .map(|created| created.header_id.as_str())
    }

    pub fn created_footer_id(&self) -> Option<&str> {
        self.replies
            .iter()
            .find_map(|reply| reply.create_footer.as_ref())
            .map(|created| created.footer_id.as_str())
    }

    /// Sum of `occurrencesChanged` over all `replaceAllText` replies.
    pub fn occurrences_changed(&self) -> i64 {
        self.replies
            .iter()
            .filter_map(|reply| reply.replace_all_text.as_ref())
            .map(|replaced| replaced.occurrences_changed)
            .sum()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(default)]
    pub create_header: Option<CreatedHeader>,
    #[serde(default)]
    pub create_footer: Option<CreatedFooter>,
    #[serde(default)]
    pub replace_all_text: Option<ReplaceAllTextReply>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedHeader {
    #[serde(default)]
    pub header_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFooter {
    #[serde(default)]
    pub footer_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllTextReply {
    #[serde(default)]
    pub occurrences_changed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default() {
        let doc: Document = serde_json::from_value(json!({
            "body": {
                "content": [
                    { "endIndex": 1, "sectionBreak": {} },
                    { "paragraph": {} }
                ]
            }
        }))
        .expect("document");

        assert_eq!(doc.document_id, "");
        assert_eq!(doc.body.content.len(), 2);
        assert_eq!(doc.body.content[0].start(), 0);
        assert_eq!(doc.body.content[0].end(), 1);
        assert!(doc.body.content[0].section_break.is_some());
        assert_eq!(
            doc.body.content[1]
                .paragraph
                .as_ref()
                .map(|p| p.named_style()),
            Some("NORMAL_TEXT")
        );
    }

    #[test]
    fn replies_expose_created_ids_and_counts() {
        let response: BatchUpdateResponse = serde_json::from_value(json!({
            "documentId": "doc-1",
            "replies": [
                {},
                { "createHeader": { "headerId": "kix.h1" } },
                { "replaceAllText": { "occurrencesChanged": 3 } },
                { "replaceAllText": {} }
            ]
        }))
        .expect("response");

        assert_eq!(response.created_header_id(), Some("kix.h1"));
        assert_eq!(response.created_footer_id(), None);
        assert_eq!(response.occurrences_changed(), 3);
    }
}
