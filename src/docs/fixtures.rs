//! Documents shaped like real API snapshots, and an in-memory [`DocsApi`].

use crate::docs::client::DocsApi;
use crate::docs::convert::utf16_len;
use crate::docs::model::{BatchUpdateResponse, Document, StructuralElement};
use crate::docs::requests::Request;
use crate::error::DocsError;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

fn paragraph_json(start: i64, text: &str) -> (Value, i64) {
    let content = format!("{text}\n");
    let end = start + utf16_len(&content);
    (
        json!({
            "startIndex": start,
            "endIndex": end,
            "paragraph": { "elements": [{
                "startIndex": start,
                "endIndex": end,
                "textRun": { "content": content }
            }] }
        }),
        end,
    )
}

fn table_json(start: i64, grid: &[&[&str]]) -> (Value, i64) {
    let mut index = start + 1;
    let rows: Vec<Value> = grid
        .iter()
        .map(|row| {
            let row_start = index;
            index += 1;
            let cells: Vec<Value> = row
                .iter()
                .map(|text| {
                    let cell_start = index;
                    let (paragraph, end) = paragraph_json(cell_start + 1, text);
                    index = end;
                    json!({ "startIndex": cell_start, "endIndex": end, "content": [paragraph] })
                })
                .collect();
            json!({ "startIndex": row_start, "endIndex": index, "tableCells": cells })
        })
        .collect();
    let end = index + 1;
    (
        json!({
            "startIndex": start,
            "endIndex": end,
            "table": {
                "rows": grid.len(),
                "columns": grid.first().map(|r| r.len()).unwrap_or(0),
                "tableRows": rows
            }
        }),
        end,
    )
}

/// A table element whose first cell paragraph starts at `start + 3`.
pub fn table_element(start: i64, grid: &[&[&str]]) -> StructuralElement {
    serde_json::from_value(table_json(start, grid).0).expect("table element")
}

/// Section break, an intro paragraph up to `table_start`, the table, and a
/// trailing empty paragraph.
pub fn document_with_table(table_start: i64, grid: &[&[&str]]) -> Document {
    let (table, table_end) = table_json(table_start, grid);
    let (trailing, _) = paragraph_json(table_end, "");
    serde_json::from_value(json!({
        "documentId": "doc-1",
        "title": "Fixture",
        "body": { "content": [
            {
                "startIndex": 1,
                "endIndex": table_start,
                "paragraph": { "elements": [{ "textRun": { "content": "Intro\n" } }] }
            },
            table,
            trailing
        ] }
    }))
    .expect("document")
}

pub fn document_with_paragraphs(texts: &[&str]) -> Document {
    let mut index = 1;
    let content: Vec<Value> = texts
        .iter()
        .map(|text| {
            let (paragraph, end) = paragraph_json(index, text);
            index = end;
            paragraph
        })
        .collect();
    serde_json::from_value(json!({
        "documentId": "doc-1",
        "title": "Paragraphs",
        "body": { "content": content }
    }))
    .expect("document")
}

/// Serves queued snapshots (repeating the last one) and records every batch.
#[derive(Default)]
pub struct RecordingApi {
    snapshots: Mutex<VecDeque<Document>>,
    replies: Mutex<VecDeque<Value>>,
    pub batches: Mutex<Vec<Vec<Request>>>,
    pub fetches: Mutex<usize>,
    fail_batch: Option<usize>,
}

impl RecordingApi {
    pub fn new(snapshots: Vec<Document>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into()),
            ..Self::default()
        }
    }

    /// Makes the batch with this zero-based ordinal fail remotely.
    pub fn failing_batch(mut self, ordinal: usize) -> Self {
        self.fail_batch = Some(ordinal);
        self
    }

    pub fn with_reply(self, reply: Value) -> Self {
        self.replies.lock().expect("replies").push_back(reply);
        self
    }

    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.batches
            .lock()
            .expect("batches")
            .iter()
            .map(|batch| {
                batch
                    .iter()
                    .map(|request| serde_json::to_value(request).expect("request json"))
                    .collect()
            })
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().expect("fetches")
    }
}

impl DocsApi for RecordingApi {
    async fn get_document(&self, _document_id: &str) -> Result<Document, DocsError> {
        *self.fetches.lock().expect("fetches") += 1;
        let mut snapshots = self.snapshots.lock().expect("snapshots");
        if snapshots.len() > 1 {
            Ok(snapshots.pop_front().expect("snapshot"))
        } else {
            Ok(snapshots.front().cloned().unwrap_or_default())
        }
    }

    async fn batch_update(
        &self,
        document_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse, DocsError> {
        let mut batches = self.batches.lock().expect("batches");
        if self.fail_batch == Some(batches.len()) {
            batches.push(requests.to_vec());
            return Err(DocsError::Remote {
                document_id: document_id.to_string(),
                operation: "batchUpdate",
                detail: "Google Docs API returned 500 Internal Server Error".to_string(),
            });
        }
        batches.push(requests.to_vec());
        let reply = self
            .replies
            .lock()
            .expect("replies")
            .pop_front()
            .unwrap_or_else(|| json!({ "documentId": document_id, "replies": [] }));
        Ok(serde_json::from_value(reply).expect("reply"))
    }

    async fn create_document(&self, title: &str) -> Result<Document, DocsError> {
        Ok(serde_json::from_value(json!({ "documentId": "created-doc", "title": title }))
            .expect("created document"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_offsets_match_a_fresh_2x2_table() {
        let document = document_with_table(100, &[&["", ""], &["", ""]]);
        let table = document.body.content[1].table.as_ref().expect("table");
        let cells: Vec<(Option<i64>, Option<i64>)> = table
            .table_rows
            .iter()
            .flat_map(|row| row.table_cells.iter())
            .map(|cell| (cell.start_index, cell.end_index))
            .collect();
        assert_eq!(
            cells,
            vec![
                (Some(102), Some(104)),
                (Some(104), Some(106)),
                (Some(107), Some(109)),
                (Some(109), Some(111))
            ]
        );
        assert_eq!(document.body.content[1].end(), 112);
    }
}
