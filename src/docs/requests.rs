//! Wire-format `batchUpdate` requests.
//!
//! Each builder returns exactly one [`Request`], which serializes to a map
//! with a single key naming the mutation kind. Style builders return `None`
//! when nothing would change, so an empty-effect request is never sent.
//! Table-cell builders address cells through the table's start index plus
//! row and column, which stays valid while cell offsets shift.

use crate::docs::convert::{self, Dimension, OptionalColor, pt};
use crate::error::DocsError;
use serde::{Deserialize, Serialize};

/// Collects the wire keys of the populated `Option` fields, in order.
macro_rules! populated {
    ($style:expr, $($field:ident => $key:literal),+ $(,)?) => {{
        let mut keys: Vec<&'static str> = Vec::new();
        $(
            if $style.$field.is_some() {
                keys.push($key);
            }
        )+
        keys
    }};
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    InsertText(InsertText),
    DeleteContentRange(DeleteContentRange),
    ReplaceAllText(ReplaceAllText),
    UpdateTextStyle(UpdateTextStyle),
    UpdateParagraphStyle(UpdateParagraphStyle),
    CreateParagraphBullets(CreateParagraphBullets),
    DeleteParagraphBullets(DeleteParagraphBullets),
    InsertTable(InsertTable),
    InsertPageBreak(InsertPageBreak),
    InsertInlineImage(InsertInlineImage),
    InsertTableRow(InsertTableRow),
    DeleteTableRow(TableCellTarget),
    InsertTableColumn(InsertTableColumn),
    DeleteTableColumn(TableCellTarget),
    UpdateTableCellStyle(UpdateTableCellStyle),
    MergeTableCells(TableRangeTarget),
    UnmergeTableCells(TableRangeTarget),
    UpdateTableRowStyle(UpdateTableRowStyle),
    UpdateTableColumnProperties(UpdateTableColumnProperties),
    PinTableHeaderRows(PinTableHeaderRows),
    CreateHeader(CreateHeaderFooter),
    CreateFooter(CreateHeaderFooter),
    DeleteHeader(DeleteHeader),
    DeleteFooter(DeleteFooter),
    UpdateDocumentStyle(UpdateDocumentStyle),
}

impl Request {
    /// Wire key of the mutation kind, e.g. `insertText`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsertText(_) => "insertText",
            Self::DeleteContentRange(_) => "deleteContentRange",
            Self::ReplaceAllText(_) => "replaceAllText",
            Self::UpdateTextStyle(_) => "updateTextStyle",
            Self::UpdateParagraphStyle(_) => "updateParagraphStyle",
            Self::CreateParagraphBullets(_) => "createParagraphBullets",
            Self::DeleteParagraphBullets(_) => "deleteParagraphBullets",
            Self::InsertTable(_) => "insertTable",
            Self::InsertPageBreak(_) => "insertPageBreak",
            Self::InsertInlineImage(_) => "insertInlineImage",
            Self::InsertTableRow(_) => "insertTableRow",
            Self::DeleteTableRow(_) => "deleteTableRow",
            Self::InsertTableColumn(_) => "insertTableColumn",
            Self::DeleteTableColumn(_) => "deleteTableColumn",
            Self::UpdateTableCellStyle(_) => "updateTableCellStyle",
            Self::MergeTableCells(_) => "mergeTableCells",
            Self::UnmergeTableCells(_) => "unmergeTableCells",
            Self::UpdateTableRowStyle(_) => "updateTableRowStyle",
            Self::UpdateTableColumnProperties(_) => "updateTableColumnProperties",
            Self::PinTableHeaderRows(_) => "pinTableHeaderRows",
            Self::CreateHeader(_) => "createHeader",
            Self::CreateFooter(_) => "createFooter",
            Self::DeleteHeader(_) => "deleteHeader",
            Self::DeleteFooter(_) => "deleteFooter",
            Self::UpdateDocumentStyle(_) => "updateDocumentStyle",
        }
    }
}

// ===== Addressing =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub index: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl Location {
    pub fn at(index: i64) -> Self {
        Self {
            index,
            segment_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndOfSegmentLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

/// Either an explicit offset or the end of the segment. Flattened into the
/// owning request as `location` or `endOfSegmentLocation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertionPoint {
    Location(Location),
    EndOfSegmentLocation(EndOfSegmentLocation),
}

impl InsertionPoint {
    pub fn new(index: Option<i64>, segment_id: Option<&str>) -> Self {
        let segment_id = segment_id.map(str::to_string);
        match index {
            Some(index) => Self::Location(Location { index, segment_id }),
            None => Self::EndOfSegmentLocation(EndOfSegmentLocation { segment_id }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: i64,
    pub end_index: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,
}

impl Range {
    pub fn new(start_index: i64, end_index: i64, segment_id: Option<&str>) -> Self {
        Self {
            start_index,
            end_index,
            segment_id: segment_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub table_start_location: Location,
    pub row_index: usize,
    pub column_index: usize,
}

impl TableCellLocation {
    pub fn new(table_start_index: i64, row_index: usize, column_index: usize) -> Self {
        Self {
            table_start_location: Location::at(table_start_index),
            row_index,
            column_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRange {
    pub table_cell_location: TableCellLocation,
    pub row_span: usize,
    pub column_span: usize,
}

// ===== Text =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertText {
    pub text: String,
    #[serde(flatten)]
    pub at: InsertionPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteContentRange {
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstringMatchCriteria {
    pub text: String,
    pub match_case: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAllText {
    pub contains_text: SubstringMatchCriteria,
    pub replace_text: String,
}

pub fn insert_text(text: &str, index: Option<i64>, segment_id: Option<&str>) -> Request {
    Request::InsertText(InsertText {
        text: text.to_string(),
        at: InsertionPoint::new(index, segment_id),
    })
}

pub fn delete_range(start_index: i64, end_index: i64, segment_id: Option<&str>) -> Request {
    Request::DeleteContentRange(DeleteContentRange {
        range: Range::new(start_index, end_index, segment_id),
    })
}

pub fn replace_all_text(find_text: &str, replace_text: &str, match_case: bool) -> Request {
    Request::ReplaceAllText(ReplaceAllText {
        contains_text: SubstringMatchCriteria {
            text: find_text.to_string(),
            match_case,
        },
        replace_text: replace_text.to_string(),
    })
}

// ===== Text style =====

/// Caller-facing character formatting. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextStyleParams {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
}

impl TextStyleParams {
    pub fn bold() -> Self {
        Self {
            bold: Some(true),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    pub font_family: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
}

impl TextStyle {
    pub fn fields(&self) -> Vec<&'static str> {
        populated!(self,
            bold => "bold",
            italic => "italic",
            underline => "underline",
            font_size => "fontSize",
            weighted_font_family => "weightedFontFamily",
            foreground_color => "foregroundColor",
            background_color => "backgroundColor",
        )
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

pub fn build_text_style(params: &TextStyleParams) -> Result<TextStyle, DocsError> {
    Ok(TextStyle {
        bold: params.bold,
        italic: params.italic,
        underline: params.underline,
        font_size: params.font_size.map(convert::font_size).transpose()?,
        weighted_font_family: params.font_family.as_ref().map(|family| WeightedFontFamily {
            font_family: family.clone(),
        }),
        foreground_color: params
            .text_color
            .as_deref()
            .map(|value| convert::color_param("text_color", value))
            .transpose()?,
        background_color: params
            .background_color
            .as_deref()
            .map(|value| convert::color_param("background_color", value))
            .transpose()?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyle {
    pub range: Range,
    pub text_style: TextStyle,
    pub fields: String,
}

pub fn update_text_style(
    start_index: i64,
    end_index: i64,
    style: TextStyle,
    segment_id: Option<&str>,
) -> Option<Request> {
    if style.is_empty() {
        return None;
    }
    let fields = style.fields().join(",");
    Some(Request::UpdateTextStyle(UpdateTextStyle {
        range: Range::new(start_index, end_index, segment_id),
        text_style: style,
        fields,
    }))
}

// ===== Paragraph style and bullets =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParagraphStyleParams {
    pub heading_level: Option<i64>,
    pub alignment: Option<String>,
    pub line_spacing: Option<f64>,
    pub indent_first_line: Option<f64>,
    pub indent_start: Option<f64>,
    pub indent_end: Option<f64>,
    pub space_above: Option<f64>,
    pub space_below: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_first_line: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_end: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
}

impl ParagraphStyle {
    pub fn fields(&self) -> Vec<&'static str> {
        populated!(self,
            named_style_type => "namedStyleType",
            alignment => "alignment",
            line_spacing => "lineSpacing",
            indent_first_line => "indentFirstLine",
            indent_start => "indentStart",
            indent_end => "indentEnd",
            space_above => "spaceAbove",
            space_below => "spaceBelow",
        )
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

pub fn build_paragraph_style(params: &ParagraphStyleParams) -> Result<ParagraphStyle, DocsError> {
    Ok(ParagraphStyle {
        named_style_type: params
            .heading_level
            .map(convert::named_style_for_heading)
            .transpose()?,
        alignment: params
            .alignment
            .as_deref()
            .map(convert::paragraph_alignment)
            .transpose()?,
        line_spacing: params
            .line_spacing
            .map(convert::line_spacing_percent)
            .transpose()?,
        indent_first_line: params.indent_first_line.map(pt),
        indent_start: params.indent_start.map(pt),
        indent_end: params.indent_end.map(pt),
        space_above: params.space_above.map(pt),
        space_below: params.space_below.map(pt),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyle {
    pub range: Range,
    pub paragraph_style: ParagraphStyle,
    pub fields: String,
}

pub fn update_paragraph_style(
    start_index: i64,
    end_index: i64,
    style: ParagraphStyle,
) -> Option<Request> {
    if style.is_empty() {
        return None;
    }
    let fields = style.fields().join(",");
    Some(Request::UpdateParagraphStyle(UpdateParagraphStyle {
        range: Range::new(start_index, end_index, None),
        paragraph_style: style,
        fields,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBullets {
    pub range: Range,
    pub bullet_preset: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteParagraphBullets {
    pub range: Range,
}

pub fn create_paragraph_bullets(
    start_index: i64,
    end_index: i64,
    list_type: &str,
) -> Result<Request, DocsError> {
    Ok(Request::CreateParagraphBullets(CreateParagraphBullets {
        range: Range::new(start_index, end_index, None),
        bullet_preset: convert::bullet_preset(list_type)?,
    }))
}

pub fn delete_paragraph_bullets(start_index: i64, end_index: i64) -> Request {
    Request::DeleteParagraphBullets(DeleteParagraphBullets {
        range: Range::new(start_index, end_index, None),
    })
}

// ===== Inserted elements =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertTable {
    pub rows: usize,
    pub columns: usize,
    #[serde(flatten)]
    pub at: InsertionPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertPageBreak {
    #[serde(flatten)]
    pub at: InsertionPoint,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Size {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertInlineImage {
    pub uri: String,
    #[serde(flatten)]
    pub at: InsertionPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_size: Option<Size>,
}

pub fn insert_table(rows: usize, columns: usize, index: Option<i64>) -> Request {
    Request::InsertTable(InsertTable {
        rows,
        columns,
        at: InsertionPoint::new(index, None),
    })
}

pub fn insert_page_break(index: Option<i64>) -> Request {
    Request::InsertPageBreak(InsertPageBreak {
        at: InsertionPoint::new(index, None),
    })
}

pub fn insert_inline_image(
    uri: &str,
    index: Option<i64>,
    width: Option<f64>,
    height: Option<f64>,
) -> Request {
    let object_size = (width.is_some() || height.is_some()).then(|| Size {
        width: width.map(pt),
        height: height.map(pt),
    });
    Request::InsertInlineImage(InsertInlineImage {
        uri: uri.to_string(),
        at: InsertionPoint::new(index, None),
        object_size,
    })
}

// ===== Table structure =====

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellTarget {
    pub table_cell_location: TableCellLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTableRow {
    pub table_cell_location: TableCellLocation,
    pub insert_below: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTableColumn {
    pub table_cell_location: TableCellLocation,
    pub insert_right: bool,
}

pub fn insert_table_row(table_start_index: i64, row_index: usize, insert_below: bool) -> Request {
    Request::InsertTableRow(InsertTableRow {
        table_cell_location: TableCellLocation::new(table_start_index, row_index, 0),
        insert_below,
    })
}

pub fn delete_table_row(table_start_index: i64, row_index: usize) -> Request {
    Request::DeleteTableRow(TableCellTarget {
        table_cell_location: TableCellLocation::new(table_start_index, row_index, 0),
    })
}

pub fn insert_table_column(
    table_start_index: i64,
    column_index: usize,
    insert_right: bool,
) -> Request {
    Request::InsertTableColumn(InsertTableColumn {
        table_cell_location: TableCellLocation::new(table_start_index, 0, column_index),
        insert_right,
    })
}

pub fn delete_table_column(table_start_index: i64, column_index: usize) -> Request {
    Request::DeleteTableColumn(TableCellTarget {
        table_cell_location: TableCellLocation::new(table_start_index, 0, column_index),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRangeTarget {
    pub table_range: TableRange,
}

fn table_range(
    table_start_index: i64,
    row_index: usize,
    column_index: usize,
    row_span: usize,
    column_span: usize,
) -> TableRangeTarget {
    TableRangeTarget {
        table_range: TableRange {
            table_cell_location: TableCellLocation::new(table_start_index, row_index, column_index),
            row_span,
            column_span,
        },
    }
}

pub fn merge_table_cells(
    table_start_index: i64,
    start_row: usize,
    start_col: usize,
    row_span: usize,
    column_span: usize,
) -> Request {
    Request::MergeTableCells(table_range(
        table_start_index,
        start_row,
        start_col,
        row_span,
        column_span,
    ))
}

pub fn unmerge_table_cells(
    table_start_index: i64,
    row_index: usize,
    column_index: usize,
    row_span: usize,
    column_span: usize,
) -> Request {
    Request::UnmergeTableCells(table_range(
        table_start_index,
        row_index,
        column_index,
        row_span,
        column_span,
    ))
}

// ===== Table styling =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableCellStyleParams {
    pub background_color: Option<String>,
    pub padding_top: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub padding_right: Option<f64>,
    pub border_width: Option<f64>,
    pub border_color: Option<String>,
    pub content_alignment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellBorder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OptionalColor>,
    pub dash_style: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_alignment: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<TableCellBorder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<TableCellBorder>,
}

impl TableCellStyle {
    pub fn fields(&self) -> Vec<&'static str> {
        populated!(self,
            background_color => "backgroundColor",
            padding_top => "paddingTop",
            padding_bottom => "paddingBottom",
            padding_left => "paddingLeft",
            padding_right => "paddingRight",
            content_alignment => "contentAlignment",
            border_top => "borderTop",
            border_bottom => "borderBottom",
            border_left => "borderLeft",
            border_right => "borderRight",
        )
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

fn padding(name: &str, value: Option<f64>) -> Result<Option<Dimension>, DocsError> {
    match value {
        Some(points) if points < 0.0 => Err(DocsError::invalid(format!(
            "{name} must not be negative, got {points}"
        ))),
        other => Ok(other.map(pt)),
    }
}

/// One border style is applied to all four edges.
pub fn build_table_cell_style(params: &TableCellStyleParams) -> Result<TableCellStyle, DocsError> {
    let border = if params.border_width.is_some() || params.border_color.is_some() {
        Some(TableCellBorder {
            width: padding("border_width", params.border_width)?,
            color: params
                .border_color
                .as_deref()
                .map(|value| convert::color_param("border_color", value))
                .transpose()?,
            dash_style: "SOLID",
        })
    } else {
        None
    };

    Ok(TableCellStyle {
        background_color: params
            .background_color
            .as_deref()
            .map(|value| convert::color_param("background_color", value))
            .transpose()?,
        padding_top: padding("padding_top", params.padding_top)?,
        padding_bottom: padding("padding_bottom", params.padding_bottom)?,
        padding_left: padding("padding_left", params.padding_left)?,
        padding_right: padding("padding_right", params.padding_right)?,
        content_alignment: params
            .content_alignment
            .as_deref()
            .map(convert::content_alignment)
            .transpose()?,
        border_top: border.clone(),
        border_bottom: border.clone(),
        border_left: border.clone(),
        border_right: border,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableCellStyle {
    pub table_range: TableRange,
    pub table_cell_style: TableCellStyle,
    pub fields: String,
}

/// Styles the single cell at (`row_index`, `column_index`).
pub fn update_table_cell_style(
    table_start_index: i64,
    row_index: usize,
    column_index: usize,
    style: TableCellStyle,
) -> Option<Request> {
    if style.is_empty() {
        return None;
    }
    let fields = style.fields().join(",");
    Some(Request::UpdateTableCellStyle(UpdateTableCellStyle {
        table_range: TableRange {
            table_cell_location: TableCellLocation::new(table_start_index, row_index, column_index),
            row_span: 1,
            column_span: 1,
        },
        table_cell_style: style,
        fields,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_row_height: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_overflow: Option<bool>,
}

impl TableRowStyle {
    pub fn fields(&self) -> Vec<&'static str> {
        populated!(self,
            min_row_height => "minRowHeight",
            prevent_overflow => "preventOverflow",
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableRowStyle {
    pub table_start_location: Location,
    pub row_indices: Vec<usize>,
    pub table_row_style: TableRowStyle,
    pub fields: String,
}

pub fn update_table_row_style(
    table_start_index: i64,
    row_indices: &[usize],
    min_row_height: Option<f64>,
    prevent_overflow: Option<bool>,
) -> Option<Request> {
    let style = TableRowStyle {
        min_row_height: min_row_height.map(pt),
        prevent_overflow,
    };
    let fields = style.fields();
    if fields.is_empty() {
        return None;
    }
    Some(Request::UpdateTableRowStyle(UpdateTableRowStyle {
        table_start_location: Location::at(table_start_index),
        row_indices: row_indices.to_vec(),
        table_row_style: style,
        fields: fields.join(","),
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    pub width_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTableColumnProperties {
    pub table_start_location: Location,
    pub column_indices: Vec<usize>,
    pub table_column_properties: TableColumnProperties,
    pub fields: String,
}

/// `FIXED_WIDTH` needs a positive width; `EVENLY_DISTRIBUTED` takes none.
pub fn column_properties(
    width: Option<f64>,
    width_type: &str,
) -> Result<TableColumnProperties, DocsError> {
    let width_type = convert::width_type(width_type)?;
    match width {
        None if width_type == "FIXED_WIDTH" => Err(DocsError::invalid(
            "width is required when width_type is FIXED_WIDTH",
        )),
        Some(points) if points <= 0.0 => Err(DocsError::invalid(format!(
            "width must be positive, got {points}"
        ))),
        _ => Ok(TableColumnProperties {
            width_type,
            width: width.map(pt),
        }),
    }
}

pub fn update_table_column_properties(
    table_start_index: i64,
    column_indices: &[usize],
    width: Option<f64>,
    width_type: &str,
) -> Result<Request, DocsError> {
    let properties = column_properties(width, width_type)?;
    let fields = if properties.width.is_some() {
        "widthType,width"
    } else {
        "widthType"
    };
    Ok(Request::UpdateTableColumnProperties(
        UpdateTableColumnProperties {
            table_start_location: Location::at(table_start_index),
            column_indices: column_indices.to_vec(),
            table_column_properties: properties,
            fields: fields.to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinTableHeaderRows {
    pub table_start_location: Location,
    pub pinned_header_rows_count: usize,
}

/// A count of 0 unpins all header rows.
pub fn pin_table_header_rows(table_start_index: i64, pinned_header_rows_count: usize) -> Request {
    Request::PinTableHeaderRows(PinTableHeaderRows {
        table_start_location: Location::at(table_start_index),
        pinned_header_rows_count,
    })
}

// ===== Headers and footers =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateHeaderFooter {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteHeader {
    pub header_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFooter {
    pub footer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStyleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_first_page_header_footer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_even_page_header_footer: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentStyle {
    pub document_style: DocumentStyleUpdate,
    pub fields: String,
}

pub fn create_header(slot: convert::HeaderFooterSlot) -> Request {
    Request::CreateHeader(CreateHeaderFooter {
        kind: slot.as_api(),
    })
}

pub fn create_footer(slot: convert::HeaderFooterSlot) -> Request {
    Request::CreateFooter(CreateHeaderFooter {
        kind: slot.as_api(),
    })
}

pub fn delete_header(header_id: &str) -> Request {
    Request::DeleteHeader(DeleteHeader {
        header_id: header_id.to_string(),
    })
}

pub fn delete_footer(footer_id: &str) -> Request {
    Request::DeleteFooter(DeleteFooter {
        footer_id: footer_id.to_string(),
    })
}

/// Turns on the document flag a first-page or even-page slot depends on.
/// The default slot needs no flag.
pub fn enable_header_footer_slot(slot: convert::HeaderFooterSlot) -> Option<Request> {
    let (document_style, fields) = match slot {
        convert::HeaderFooterSlot::Default => return None,
        convert::HeaderFooterSlot::FirstPage => (
            DocumentStyleUpdate {
                use_first_page_header_footer: Some(true),
                ..DocumentStyleUpdate::default()
            },
            "useFirstPageHeaderFooter",
        ),
        convert::HeaderFooterSlot::EvenPage => (
            DocumentStyleUpdate {
                use_even_page_header_footer: Some(true),
                ..DocumentStyleUpdate::default()
            },
            "useEvenPageHeaderFooter",
        ),
    };
    Some(Request::UpdateDocumentStyle(UpdateDocumentStyle {
        document_style,
        fields: fields.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::convert::HeaderFooterSlot;
    use serde_json::{Value, json};

    fn wire(request: &Request) -> Value {
        serde_json::to_value(request).expect("serialize request")
    }

    #[test]
    fn pin_header_rows_is_bit_exact() {
        assert_eq!(
            wire(&pin_table_header_rows(500, 2)),
            json!({
                "pinTableHeaderRows": {
                    "tableStartLocation": { "index": 500 },
                    "pinnedHeaderRowsCount": 2
                }
            })
        );
    }

    #[test]
    fn insertion_point_switches_between_offset_and_append() {
        assert_eq!(
            wire(&insert_text("Hi", Some(12), None)),
            json!({ "insertText": { "text": "Hi", "location": { "index": 12 } } })
        );
        assert_eq!(
            wire(&insert_text("Hi", Some(0), Some("kix.hdr"))),
            json!({
                "insertText": {
                    "text": "Hi",
                    "location": { "index": 0, "segmentId": "kix.hdr" }
                }
            })
        );
        assert_eq!(
            wire(&insert_table(2, 3, None)),
            json!({ "insertTable": { "rows": 2, "columns": 3, "endOfSegmentLocation": {} } })
        );
        assert_eq!(
            wire(&insert_page_break(Some(40))),
            json!({ "insertPageBreak": { "location": { "index": 40 } } })
        );
    }

    #[test]
    fn every_request_has_one_top_level_key() {
        let requests = vec![
            insert_text("x", None, None),
            delete_range(1, 5, None),
            replace_all_text("a", "b", false),
            insert_table_row(10, 1, true),
            delete_table_column(10, 2),
            merge_table_cells(10, 0, 0, 2, 2),
            create_header(HeaderFooterSlot::Default),
            delete_footer("kix.f1"),
        ];
        for request in &requests {
            let value = wire(request);
            let object = value.as_object().expect("object");
            assert_eq!(object.len(), 1);
            assert!(object.contains_key(request.kind()));
        }
    }

    #[test]
    fn text_style_mask_lists_only_populated_keys() {
        let style = build_text_style(&TextStyleParams {
            bold: Some(true),
            font_size: Some(14.0),
            text_color: Some("#FF0000".to_string()),
            ..TextStyleParams::default()
        })
        .expect("style");

        let request = update_text_style(5, 10, style, None).expect("request");
        assert_eq!(
            wire(&request),
            json!({
                "updateTextStyle": {
                    "range": { "startIndex": 5, "endIndex": 10 },
                    "textStyle": {
                        "bold": true,
                        "fontSize": { "magnitude": 14.0, "unit": "PT" },
                        "foregroundColor": {
                            "color": { "rgbColor": { "red": 1.0, "green": 0.0, "blue": 0.0 } }
                        }
                    },
                    "fields": "bold,fontSize,foregroundColor"
                }
            })
        );
    }

    #[test]
    fn empty_styles_produce_no_request() {
        let text = build_text_style(&TextStyleParams::default()).expect("style");
        assert!(update_text_style(1, 2, text, None).is_none());

        let paragraph = build_paragraph_style(&ParagraphStyleParams::default()).expect("style");
        assert!(update_paragraph_style(1, 2, paragraph).is_none());

        let cell = build_table_cell_style(&TableCellStyleParams::default()).expect("style");
        assert!(update_table_cell_style(100, 0, 0, cell).is_none());

        assert!(update_table_row_style(100, &[0], None, None).is_none());
        assert!(enable_header_footer_slot(HeaderFooterSlot::Default).is_none());
    }

    #[test]
    fn paragraph_style_converts_units() {
        let style = build_paragraph_style(&ParagraphStyleParams {
            heading_level: Some(2),
            alignment: Some("center".to_string()),
            line_spacing: Some(1.5),
            space_below: Some(6.0),
            ..ParagraphStyleParams::default()
        })
        .expect("style");
        let request = update_paragraph_style(1, 20, style).expect("request");

        assert_eq!(
            wire(&request),
            json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": 1, "endIndex": 20 },
                    "paragraphStyle": {
                        "namedStyleType": "HEADING_2",
                        "alignment": "CENTER",
                        "lineSpacing": 150.0,
                        "spaceBelow": { "magnitude": 6.0, "unit": "PT" }
                    },
                    "fields": "namedStyleType,alignment,lineSpacing,spaceBelow"
                }
            })
        );
    }

    #[test]
    fn cell_border_applies_to_all_four_edges() {
        let style = build_table_cell_style(&TableCellStyleParams {
            border_width: Some(1.0),
            border_color: Some("#000000".to_string()),
            content_alignment: Some("bottom".to_string()),
            ..TableCellStyleParams::default()
        })
        .expect("style");
        let request = update_table_cell_style(100, 1, 2, style).expect("request");
        let value = wire(&request);
        let body = &value["updateTableCellStyle"];

        assert_eq!(
            body["fields"],
            "contentAlignment,borderTop,borderBottom,borderLeft,borderRight"
        );
        let top = &body["tableCellStyle"]["borderTop"];
        assert_eq!(top["dashStyle"], "SOLID");
        assert_eq!(top["width"], json!({ "magnitude": 1.0, "unit": "PT" }));
        for edge in ["borderBottom", "borderLeft", "borderRight"] {
            assert_eq!(&body["tableCellStyle"][edge], top);
        }
        assert_eq!(
            body["tableRange"],
            json!({
                "tableCellLocation": {
                    "tableStartLocation": { "index": 100 },
                    "rowIndex": 1,
                    "columnIndex": 2
                },
                "rowSpan": 1,
                "columnSpan": 1
            })
        );
    }

    #[test]
    fn invalid_content_alignment_is_rejected() {
        let err = build_table_cell_style(&TableCellStyleParams {
            content_alignment: Some("CENTER".to_string()),
            ..TableCellStyleParams::default()
        })
        .expect_err("invalid");
        assert!(matches!(err, DocsError::InvalidParameter(_)));
    }

    #[test]
    fn column_width_type_rules() {
        let err = update_table_column_properties(100, &[0], None, "FIXED_WIDTH")
            .expect_err("fixed width needs width");
        assert!(matches!(err, DocsError::InvalidParameter(_)));

        let even = update_table_column_properties(100, &[0, 1], None, "EVENLY_DISTRIBUTED")
            .expect("evenly distributed");
        assert_eq!(
            wire(&even),
            json!({
                "updateTableColumnProperties": {
                    "tableStartLocation": { "index": 100 },
                    "columnIndices": [0, 1],
                    "tableColumnProperties": { "widthType": "EVENLY_DISTRIBUTED" },
                    "fields": "widthType"
                }
            })
        );

        let fixed = update_table_column_properties(100, &[2], Some(120.0), "fixed_width")
            .expect("fixed");
        assert_eq!(wire(&fixed)["updateTableColumnProperties"]["fields"], "widthType,width");

        assert!(update_table_column_properties(100, &[0], None, "AUTO").is_err());
    }

    #[test]
    fn merge_uses_table_range() {
        assert_eq!(
            wire(&merge_table_cells(42, 1, 0, 2, 3)),
            json!({
                "mergeTableCells": {
                    "tableRange": {
                        "tableCellLocation": {
                            "tableStartLocation": { "index": 42 },
                            "rowIndex": 1,
                            "columnIndex": 0
                        },
                        "rowSpan": 2,
                        "columnSpan": 3
                    }
                }
            })
        );
    }

    #[test]
    fn header_footer_requests() {
        assert_eq!(
            wire(&create_footer(HeaderFooterSlot::FirstPage)),
            json!({ "createFooter": { "type": "FIRST_PAGE" } })
        );
        assert_eq!(
            wire(&enable_header_footer_slot(HeaderFooterSlot::EvenPage).expect("even page")),
            json!({
                "updateDocumentStyle": {
                    "documentStyle": { "useEvenPageHeaderFooter": true },
                    "fields": "useEvenPageHeaderFooter"
                }
            })
        );
        assert_eq!(
            wire(&delete_header("kix.h1")),
            json!({ "deleteHeader": { "headerId": "kix.h1" } })
        );
    }

    #[test]
    fn image_size_is_optional() {
        assert_eq!(
            wire(&insert_inline_image("https://example.com/a.png", Some(5), None, None)),
            json!({
                "insertInlineImage": {
                    "uri": "https://example.com/a.png",
                    "location": { "index": 5 }
                }
            })
        );
        let sized = insert_inline_image("https://example.com/a.png", None, Some(200.0), None);
        assert_eq!(
            wire(&sized)["insertInlineImage"]["objectSize"],
            json!({ "width": { "magnitude": 200.0, "unit": "PT" } })
        );
    }

    #[test]
    fn bullets_map_list_type_to_preset() {
        assert_eq!(
            wire(&create_paragraph_bullets(1, 30, "ORDERED").expect("bullets")),
            json!({
                "createParagraphBullets": {
                    "range": { "startIndex": 1, "endIndex": 30 },
                    "bulletPreset": "NUMBERED_DECIMAL_ALPHA_ROMAN"
                }
            })
        );
    }
}
