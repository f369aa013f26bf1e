//! Header and footer segments. A segment has to exist before text can be
//! written into it, so updates discover the slot's segment or create it first.

use crate::docs::client::DocsApi;
use crate::docs::convert::{HeaderFooterSlot, SegmentKind};
use crate::docs::model::StructuralElement;
use crate::docs::requests;
use crate::docs::structure;
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

fn default_slot() -> String {
    "DEFAULT".to_string()
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    document_id: String,
    section_type: String,
    content: String,
    #[serde(default = "default_slot")]
    header_footer_type: String,
}

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    document_id: String,
    section_type: String,
    #[serde(default = "default_slot")]
    header_footer_type: String,
}

/// The range holding a segment's existing text, leaving its final newline in
/// place since a segment can never be empty.
fn clearable_range(content: &[StructuralElement]) -> Option<(i64, i64)> {
    let first_start = content.iter().filter_map(|e| e.start_index).min()?;
    let last_end = content.iter().filter_map(|e| e.end_index).max()?;
    (last_end > first_start + 1).then_some((first_start, last_end - 1))
}

pub async fn update_doc_headers_footers<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: UpdateArgs = parse_args(args)?;
    let kind = SegmentKind::parse(&args.section_type)?;
    let slot = HeaderFooterSlot::parse(&args.header_footer_type)?;
    let document_id = args.document_id.as_str();

    let document = api.get_document(document_id).await?;
    let existing = structure::find_header_footer_ids(&document)
        .get(kind, slot)
        .map(str::to_string);

    let (segment_id, created) = match existing {
        Some(id) => (id, false),
        None => {
            let mut batch = vec![match kind {
                SegmentKind::Header => requests::create_header(slot),
                SegmentKind::Footer => requests::create_footer(slot),
            }];
            batch.extend(requests::enable_header_footer_slot(slot));
            let response = api.batch_update(document_id, &batch).await?;
            let id = match kind {
                SegmentKind::Header => response.created_header_id(),
                SegmentKind::Footer => response.created_footer_id(),
            }
            .ok_or_else(|| {
                DocsError::unresolved(format!(
                    "could not create or find {} of type {}",
                    kind.as_str(),
                    slot.as_api()
                ))
            })?;
            info!(document_id, segment_id = id, kind = kind.as_str(), "created segment");
            (id.to_string(), true)
        }
    };

    let write = async {
        let document = api.get_document(document_id).await?;
        let mut batch = Vec::new();
        if let Some(content) = structure::segment_content(&document, kind, &segment_id)
            && let Some((start, end)) = clearable_range(content)
        {
            batch.push(requests::delete_range(start, end, Some(&segment_id)));
        }
        batch.push(requests::insert_text(&args.content, Some(0), Some(&segment_id)));
        api.batch_update(document_id, &batch).await
    };
    write.await.map_err(|err| {
        if created {
            DocsError::partial(
                vec![format!("create {} {segment_id}", kind.as_str())],
                "write the segment content",
                err,
            )
        } else {
            err
        }
    })?;

    Ok(success_result(
        format!(
            "Updated {} ({}) in document {document_id}. Link: {}",
            kind.as_str(),
            slot.as_api(),
            doc_link(document_id)
        ),
        json!({
            "document_id": document_id,
            "section_type": kind.as_str(),
            "header_footer_type": slot.as_api(),
            "segment_id": segment_id,
            "created": created
        }),
    ))
}

pub async fn delete_doc_header_footer<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: DeleteArgs = parse_args(args)?;
    let kind = SegmentKind::parse(&args.section_type)?;
    let slot = HeaderFooterSlot::parse(&args.header_footer_type)?;

    let document = api.get_document(&args.document_id).await?;
    let ids = structure::find_header_footer_ids(&document);
    let segment_id = ids.get(kind, slot).ok_or_else(|| {
        DocsError::unresolved(format!(
            "No {} of type {} found in document {}",
            kind.as_str(),
            slot.as_api(),
            args.document_id
        ))
    })?;

    let request = match kind {
        SegmentKind::Header => requests::delete_header(segment_id),
        SegmentKind::Footer => requests::delete_footer(segment_id),
    };
    api.batch_update(&args.document_id, &[request]).await?;

    Ok(success_result(
        format!(
            "Deleted {} ({}) from document {}. Link: {}",
            kind.as_str(),
            slot.as_api(),
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "section_type": kind.as_str(),
            "header_footer_type": slot.as_api(),
            "segment_id": segment_id
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::fixtures::{RecordingApi, document_with_paragraphs};
    use crate::docs::model::Document;

    fn with_header(header_text: &str) -> Document {
        let mut document = document_with_paragraphs(&["body"]);
        document.document_style.default_header_id = Some("kix.h1".to_string());
        let header: Document = serde_json::from_value(json!({
            "body": { "content": [{
                "startIndex": 0,
                "endIndex": header_text.len() as i64 + 1,
                "paragraph": { "elements": [{ "textRun": { "content": format!("{header_text}\n") } }] }
            }] }
        }))
        .expect("segment");
        document.headers.insert(
            "kix.h1".to_string(),
            crate::docs::model::Segment { content: header.body.content },
        );
        document
    }

    #[tokio::test]
    async fn existing_header_is_cleared_and_rewritten_in_one_batch() {
        let api = RecordingApi::new(vec![with_header("Old")]);
        let result = update_doc_headers_footers(
            &api,
            &json!({ "document_id": "doc-1", "section_type": "header", "content": "New" }),
        )
        .await
        .expect("updated");

        assert_eq!(result["structuredContent"]["created"], false);
        let batches = api.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(
            batches[0],
            vec![
                json!({ "deleteContentRange": { "range": { "startIndex": 0, "endIndex": 3, "segmentId": "kix.h1" } } }),
                json!({ "insertText": { "text": "New", "location": { "index": 0, "segmentId": "kix.h1" } } })
            ]
        );
    }

    #[tokio::test]
    async fn missing_first_page_footer_is_created_and_enabled() {
        let api = RecordingApi::new(vec![document_with_paragraphs(&["body"])]).with_reply(json!({
            "documentId": "doc-1",
            "replies": [{ "createFooter": { "footerId": "kix.f9" } }, {}]
        }));
        let result = update_doc_headers_footers(
            &api,
            &json!({
                "document_id": "doc-1",
                "section_type": "footer",
                "content": "Page",
                "header_footer_type": "first_page_only"
            }),
        )
        .await
        .expect("created");

        assert_eq!(result["structuredContent"]["segment_id"], "kix.f9");
        let batches = api.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0][0], json!({ "createFooter": { "type": "FIRST_PAGE" } }));
        assert_eq!(
            batches[0][1]["updateDocumentStyle"]["fields"],
            "useFirstPageHeaderFooter"
        );
        // The new segment is not in the snapshot, so there is nothing to clear.
        assert_eq!(batches[1].len(), 1);
        assert_eq!(batches[1][0]["insertText"]["location"]["segmentId"], "kix.f9");
    }

    #[tokio::test]
    async fn write_failure_after_creation_is_partial() {
        let api = RecordingApi::new(vec![document_with_paragraphs(&["body"])])
            .with_reply(json!({ "replies": [{ "createHeader": { "headerId": "kix.h2" } }] }))
            .failing_batch(1);
        let err = update_doc_headers_footers(
            &api,
            &json!({ "document_id": "doc-1", "section_type": "header", "content": "x" }),
        )
        .await
        .expect_err("second batch fails");
        assert_eq!(err.kind(), "partial_completion");
        assert!(err.to_string().contains("create header kix.h2"));
    }

    #[tokio::test]
    async fn unknown_slot_and_missing_segment_are_rejected() {
        let api = RecordingApi::new(vec![document_with_paragraphs(&["body"])]);
        let err = update_doc_headers_footers(
            &api,
            &json!({
                "document_id": "doc-1",
                "section_type": "header",
                "content": "x",
                "header_footer_type": "ODD_PAGE"
            }),
        )
        .await
        .expect_err("bad slot");
        assert!(matches!(err, DocsError::InvalidParameter(_)));

        let err = delete_doc_header_footer(
            &api,
            &json!({ "document_id": "doc-1", "section_type": "footer" }),
        )
        .await
        .expect_err("no footer");
        assert!(matches!(err, DocsError::AddressResolution(_)));
        assert!(api.batches().is_empty());
    }

    #[tokio::test]
    async fn delete_uses_the_discovered_id() {
        let api = RecordingApi::new(vec![with_header("Old")]);
        delete_doc_header_footer(
            &api,
            &json!({ "document_id": "doc-1", "section_type": "HEADER" }),
        )
        .await
        .expect("deleted");
        assert_eq!(api.batches()[0][0], json!({ "deleteHeader": { "headerId": "kix.h1" } }));
    }
}
