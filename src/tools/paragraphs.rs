use crate::docs::client::DocsApi;
use crate::docs::convert;
use crate::docs::model::Document;
use crate::docs::requests::{self, ParagraphStyleParams, Request};
use crate::docs::structure::{self, BodyElement};
use crate::error::DocsError;
use crate::tools::{doc_link, parse_args, success_result};
use serde::Deserialize;
use serde_json::{Value, json};

fn default_list_type() -> String {
    "UNORDERED".to_string()
}

#[derive(Debug, Deserialize)]
struct ParagraphStyleArgs {
    document_id: String,
    paragraph_index: usize,
    #[serde(flatten)]
    style: ParagraphStyleParams,
}

#[derive(Debug, Deserialize)]
struct BulletArgs {
    document_id: String,
    paragraph_indices: Vec<usize>,
    #[serde(default = "default_list_type")]
    list_type: String,
}

/// Looks up a body element by index and requires it to be a paragraph.
fn paragraph_at(document: &Document, element_index: usize) -> Result<BodyElement, DocsError> {
    let elements = structure::parse_body(document);
    let element = elements.get(element_index).ok_or_else(|| {
        DocsError::unresolved(format!(
            "Paragraph index {element_index} not found (document has {} elements)",
            elements.len()
        ))
    })?;
    if !element.kind.is_paragraph() {
        return Err(DocsError::unresolved(format!(
            "Element {element_index} is a {}, not a paragraph",
            element.kind.type_name()
        )));
    }
    Ok(element.clone())
}

pub async fn update_paragraph_style<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: ParagraphStyleArgs = parse_args(args)?;
    let style = requests::build_paragraph_style(&args.style)?;
    let fields = style.fields();
    if fields.is_empty() {
        return Err(DocsError::invalid(
            "at least one paragraph style parameter must be provided",
        ));
    }

    let document = api.get_document(&args.document_id).await?;
    let paragraph = paragraph_at(&document, args.paragraph_index)?;
    if let Some(request) =
        requests::update_paragraph_style(paragraph.start_index, paragraph.end_index, style)
    {
        api.batch_update(&args.document_id, &[request]).await?;
    }

    Ok(success_result(
        format!(
            "Updated paragraph {} ({}) in document {}. Link: {}",
            args.paragraph_index,
            fields.join(", "),
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "paragraph_index": args.paragraph_index,
            "start_index": paragraph.start_index,
            "end_index": paragraph.end_index,
            "fields": fields
        }),
    ))
}

/// Resolves every requested paragraph before building one bullet batch, so a
/// bad index leaves the document untouched.
async fn bullet_batch<A: DocsApi>(
    api: &A,
    args: &BulletArgs,
    build: impl Fn(&BodyElement) -> Result<Request, DocsError>,
) -> Result<Vec<Request>, DocsError> {
    if args.paragraph_indices.is_empty() {
        return Err(DocsError::invalid("paragraph_indices must not be empty"));
    }
    let document = api.get_document(&args.document_id).await?;
    let paragraphs = args
        .paragraph_indices
        .iter()
        .map(|&index| paragraph_at(&document, index))
        .collect::<Result<Vec<_>, _>>()?;
    paragraphs.iter().map(build).collect()
}

pub async fn create_paragraph_bullets<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: BulletArgs = parse_args(args)?;
    convert::bullet_preset(&args.list_type)?;

    let batch = bullet_batch(api, &args, |paragraph| {
        requests::create_paragraph_bullets(
            paragraph.start_index,
            paragraph.end_index,
            &args.list_type,
        )
    })
    .await?;
    api.batch_update(&args.document_id, &batch).await?;

    Ok(success_result(
        format!(
            "Applied {} list to {} paragraph(s) in document {}. Link: {}",
            args.list_type.to_ascii_lowercase(),
            batch.len(),
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "paragraph_indices": args.paragraph_indices,
            "list_type": args.list_type.to_ascii_uppercase()
        }),
    ))
}

pub async fn delete_paragraph_bullets<A: DocsApi>(
    api: &A,
    args: &Value,
) -> Result<Value, DocsError> {
    let args: BulletArgs = parse_args(args)?;
    let batch = bullet_batch(api, &args, |paragraph| {
        Ok(requests::delete_paragraph_bullets(
            paragraph.start_index,
            paragraph.end_index,
        ))
    })
    .await?;
    api.batch_update(&args.document_id, &batch).await?;

    Ok(success_result(
        format!(
            "Removed bullets from {} paragraph(s) in document {}. Link: {}",
            batch.len(),
            args.document_id,
            doc_link(&args.document_id)
        ),
        json!({
            "document_id": args.document_id,
            "paragraph_indices": args.paragraph_indices
        }),
    ))
}
