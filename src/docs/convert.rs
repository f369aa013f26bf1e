//! Mapping of user-facing values (hex colors, points, enum names) onto the
//! Docs API wire objects.

use crate::error::DocsError;
use serde::Serialize;

pub const MIN_FONT_SIZE: f64 = 1.0;
pub const MAX_FONT_SIZE: f64 = 400.0;

pub const PARAGRAPH_ALIGNMENTS: &[&str] = &["START", "CENTER", "END", "JUSTIFIED"];
pub const CONTENT_ALIGNMENTS: &[&str] = &["TOP", "MIDDLE", "BOTTOM"];
pub const WIDTH_TYPES: &[&str] = &["EVENLY_DISTRIBUTED", "FIXED_WIDTH"];
pub const LIST_TYPES: &[&str] = &["UNORDERED", "ORDERED"];
pub const HEADER_FOOTER_TYPES: &[&str] = &["DEFAULT", "FIRST_PAGE", "FIRST_PAGE_ONLY", "EVEN_PAGE"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RgbColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub rgb_color: RgbColor,
}

/// `{"color": {"rgbColor": {...}}}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionalColor {
    pub color: Color,
}

/// `{"magnitude": m, "unit": "PT"}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: &'static str,
}

pub fn pt(magnitude: f64) -> Dimension {
    Dimension {
        magnitude,
        unit: "PT",
    }
}

/// Parses `#RRGGBB` (case-insensitive) into channel fractions of 255.
pub fn hex_to_rgb(value: &str) -> Result<OptionalColor, DocsError> {
    let well_formed = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return Err(DocsError::invalid(format!(
            "invalid color '{value}': expected a hex string like '#RRGGBB'"
        )));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f64, DocsError> {
        u8::from_str_radix(&value[range], 16)
            .map(|byte| f64::from(byte) / 255.0)
            .map_err(|err| DocsError::invalid(format!("invalid color '{value}': {err}")))
    };

    Ok(OptionalColor {
        color: Color {
            rgb_color: RgbColor {
                red: channel(1..3)?,
                green: channel(3..5)?,
                blue: channel(5..7)?,
            },
        },
    })
}

/// Like [`hex_to_rgb`], with the parameter name leading the error message.
pub fn color_param(name: &str, value: &str) -> Result<OptionalColor, DocsError> {
    hex_to_rgb(value).map_err(|err| DocsError::invalid(format!("{name}: {err}")))
}

/// 0 is body text, 1-6 are headings. Anything else is rejected.
pub fn named_style_for_heading(level: i64) -> Result<&'static str, DocsError> {
    match level {
        0 => Ok("NORMAL_TEXT"),
        1 => Ok("HEADING_1"),
        2 => Ok("HEADING_2"),
        3 => Ok("HEADING_3"),
        4 => Ok("HEADING_4"),
        5 => Ok("HEADING_5"),
        6 => Ok("HEADING_6"),
        other => Err(DocsError::invalid(format!(
            "heading_level must be between 0 and 6, got {other}"
        ))),
    }
}

/// Multiplier (1.0 = single) to the percentage the API expects.
pub fn line_spacing_percent(multiplier: f64) -> Result<f64, DocsError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(DocsError::invalid(format!(
            "line_spacing must be a positive multiplier, got {multiplier}"
        )));
    }
    Ok(multiplier * 100.0)
}

pub fn font_size(size: f64) -> Result<Dimension, DocsError> {
    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
        return Err(DocsError::invalid(format!(
            "font_size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE} points, got {size}"
        )));
    }
    Ok(pt(size))
}

/// Case-insensitive match against a fixed set of API enum names.
pub fn one_of(
    param: &str,
    value: &str,
    allowed: &'static [&'static str],
) -> Result<&'static str, DocsError> {
    let upper = value.trim().to_ascii_uppercase();
    allowed
        .iter()
        .copied()
        .find(|candidate| *candidate == upper)
        .ok_or_else(|| {
            DocsError::invalid(format!(
                "{param} must be one of {}, got '{value}'",
                allowed.join(", ")
            ))
        })
}

pub fn paragraph_alignment(value: &str) -> Result<&'static str, DocsError> {
    one_of("alignment", value, PARAGRAPH_ALIGNMENTS)
}

pub fn content_alignment(value: &str) -> Result<&'static str, DocsError> {
    one_of("content_alignment", value, CONTENT_ALIGNMENTS)
}

pub fn width_type(value: &str) -> Result<&'static str, DocsError> {
    one_of("width_type", value, WIDTH_TYPES)
}

pub fn bullet_preset(list_type: &str) -> Result<&'static str, DocsError> {
    match one_of("list_type", list_type, LIST_TYPES)? {
        "ORDERED" => Ok("NUMBERED_DECIMAL_ALPHA_ROMAN"),
        _ => Ok("BULLET_DISC_CIRCLE_SQUARE"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Header,
    Footer,
}

impl SegmentKind {
    pub fn parse(value: &str) -> Result<Self, DocsError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "footer" => Ok(Self::Footer),
            _ => Err(DocsError::invalid(format!(
                "section_type must be 'header' or 'footer', got '{value}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

/// Which of the three header/footer slots of a document section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterSlot {
    Default,
    FirstPage,
    EvenPage,
}

impl HeaderFooterSlot {
    pub fn parse(value: &str) -> Result<Self, DocsError> {
        match one_of("header_footer_type", value, HEADER_FOOTER_TYPES)? {
            "FIRST_PAGE" | "FIRST_PAGE_ONLY" => Ok(Self::FirstPage),
            "EVEN_PAGE" => Ok(Self::EvenPage),
            _ => Ok(Self::Default),
        }
    }

    pub fn as_api(self) -> &'static str {
        match self {
            Self::Default => "DEFAULT",
            Self::FirstPage => "FIRST_PAGE",
            Self::EvenPage => "EVEN_PAGE",
        }
    }
}

pub fn utf16_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hex_colors_map_to_fractions() {
        let color = hex_to_rgb("#FF8000").expect("color");
        assert_eq!(color.color.rgb_color.red, 1.0);
        assert_eq!(color.color.rgb_color.green, 128.0 / 255.0);
        assert_eq!(color.color.rgb_color.blue, 0.0);

        let lower = hex_to_rgb("#ff8000").expect("lowercase");
        assert_eq!(lower, color);

        assert_eq!(
            serde_json::to_value(hex_to_rgb("#000000").expect("black")).expect("json"),
            json!({ "color": { "rgbColor": { "red": 0.0, "green": 0.0, "blue": 0.0 } } })
        );
    }

    #[test]
    fn hex_channels_stay_in_unit_range() {
        for value in ["#000000", "#FFFFFF", "#123abc", "#7f7F7f", "#00ff00"] {
            let rgb = hex_to_rgb(value).expect("color").color.rgb_color;
            for channel in [rgb.red, rgb.green, rgb.blue] {
                assert!((0.0..=1.0).contains(&channel), "{value}: {channel}");
            }
        }
    }

    #[test]
    fn malformed_hex_is_invalid_parameter() {
        for value in ["FF0000", "#FFF", "#GG0000", "#FF00000", "", "#ff00é", " #FF0000"] {
            let err = hex_to_rgb(value).expect_err("should fail");
            assert!(matches!(err, DocsError::InvalidParameter(_)), "{value}");
        }

        let named = color_param("text_color", "red").expect_err("named");
        assert!(named.to_string().starts_with("text_color: "));
    }

    #[test]
    fn heading_levels_outside_range_are_rejected() {
        assert_eq!(named_style_for_heading(0).expect("body"), "NORMAL_TEXT");
        assert_eq!(named_style_for_heading(6).expect("h6"), "HEADING_6");
        assert!(named_style_for_heading(7).is_err());
        assert!(named_style_for_heading(-1).is_err());
    }

    #[test]
    fn line_spacing_is_a_percentage() {
        assert_eq!(line_spacing_percent(1.0).expect("single"), 100.0);
        assert_eq!(line_spacing_percent(1.5).expect("one and a half"), 150.0);
        assert!(line_spacing_percent(0.0).is_err());
    }

    #[test]
    fn enums_are_case_insensitive_and_list_allowed_values() {
        assert_eq!(content_alignment("middle").expect("middle"), "MIDDLE");
        let err = content_alignment("CENTER").expect_err("not a cell alignment");
        let message = err.to_string();
        assert!(message.contains("CENTER"));
        assert!(message.contains("TOP, MIDDLE, BOTTOM"));

        assert_eq!(bullet_preset("ordered").expect("ordered"), "NUMBERED_DECIMAL_ALPHA_ROMAN");
        assert_eq!(bullet_preset("UNORDERED").expect("unordered"), "BULLET_DISC_CIRCLE_SQUARE");
        assert!(bullet_preset("CHECKBOX").is_err());
    }

    #[test]
    fn header_footer_slot_aliases() {
        assert_eq!(
            HeaderFooterSlot::parse("first_page_only").expect("alias"),
            HeaderFooterSlot::FirstPage
        );
        assert_eq!(HeaderFooterSlot::parse("DEFAULT").expect("default").as_api(), "DEFAULT");
        assert!(HeaderFooterSlot::parse("ODD_PAGE").is_err());
        assert_eq!(SegmentKind::parse("Footer").expect("footer"), SegmentKind::Footer);
    }

    #[test]
    fn utf16_length_counts_surrogate_pairs() {
        assert_eq!(utf16_len("abc"), 3);
        assert_eq!(utf16_len("한글"), 2);
        assert_eq!(utf16_len("😀"), 2);
    }

    #[test]
    fn font_size_bounds() {
        assert_eq!(font_size(12.0).expect("12pt"), pt(12.0));
        assert!(font_size(0.5).is_err());
        assert!(font_size(401.0).is_err());
    }
}
