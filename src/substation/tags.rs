//! Scanners for the override tags the CineCanvas format can represent.
//!
//! The tag language is not parsed into a full syntax tree. Each attribute
//! command has an independent scanner applied over the whole line with
//! last-occurrence-wins semantics, and a single walk splits the line into
//! styled segments at bold/italic toggles. New commands get new scanners
//! without touching the segmentation walk.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1, take_while_m_n},
    character::complete::{char, i64, space0},
    combinator::{map, map_res, verify},
    multi::separated_list1,
    sequence::{delimited, preceded},
    IResult, Parser,
};

use crate::{colour::Rgba, substation::data::AssStyle};

/// A maximal run of visible text within one line sharing bold/italic state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledSegment {
    /// Visible text of the segment, with tag blocks removed
    pub text: String,
    /// Whether the segment is bold
    pub bold: bool,
    /// Whether the segment is italic
    pub italic: bool,
}

/// Font properties in effect for a line: a base style overlaid with the
/// line's override tag edits.
///
/// Bold and italic stay at their base values here; they vary per segment and
/// are resolved during segmentation instead.
#[derive(Clone, Debug, PartialEq)]
pub struct FontProperties {
    /// Font face name
    pub fontname: String,
    /// Font size in points
    pub size: i64,
    /// Whether the base style is bold
    pub bold: bool,
    /// Whether the base style is italic
    pub italic: bool,
    /// Fill colour
    pub primary_colour: Rgba,
    /// Outline colour
    pub outline_colour: Rgba,
    /// Outline width
    pub outline: f64,
}

impl FontProperties {
    /// Merge a base style with the override tags found in the given line
    #[must_use]
    pub fn resolve(style: Option<&AssStyle>, text: &str) -> Self {
        let mut properties = style.map_or_else(FontProperties::default, FontProperties::from);

        if let Some(fontname) = extract_font_name(text) {
            properties.fontname = fontname;
        }
        if let Some(size) = extract_font_size(text) {
            properties.size = size;
        }
        if let Some(colour) = extract_primary_colour(text) {
            properties.primary_colour.red = colour.red;
            properties.primary_colour.green = colour.green;
            properties.primary_colour.blue = colour.blue;
        }
        if let Some(colour) = extract_outline_colour(text) {
            properties.outline_colour.red = colour.red;
            properties.outline_colour.green = colour.green;
            properties.outline_colour.blue = colour.blue;
        }
        if let Some(alpha) = extract_primary_alpha(text) {
            properties.primary_colour.alpha = alpha;
        }

        properties
    }
}

impl Default for FontProperties {
    fn default() -> Self {
        Self::from(&AssStyle::default())
    }
}

impl From<&AssStyle> for FontProperties {
    fn from(style: &AssStyle) -> Self {
        Self {
            fontname: style.fontname.clone(),
            size: style.fontsize,
            bold: style.bold,
            italic: style.italic,
            primary_colour: style.primary_colour,
            outline_colour: style.outline_colour,
            outline: style.outline,
        }
    }
}

/// Font name set by the last `\fn` tag in the text, if any
#[must_use]
pub fn extract_font_name(text: &str) -> Option<String> {
    last_match(text, parse_font_name).map(str::to_string)
}

/// Font size set by the last `\fs` tag in the text, if any
#[must_use]
pub fn extract_font_size(text: &str) -> Option<i64> {
    last_match(text, parse_font_size)
}

/// Fill colour set by the last `\1c` or `\c` tag in the text, if any
#[must_use]
pub fn extract_primary_colour(text: &str) -> Option<Rgba> {
    last_match(text, parse_primary_colour)
}

/// Outline colour set by the last `\3c` tag in the text, if any
#[must_use]
pub fn extract_outline_colour(text: &str) -> Option<Rgba> {
    last_match(text, parse_outline_colour)
}

/// Fill transparency set by the last `\1a` or `\a` tag in the text, if any
#[must_use]
pub fn extract_primary_alpha(text: &str) -> Option<u8> {
    last_match(text, parse_alpha)
}

/// Fade durations in milliseconds from the last `\fad` or `\fade` tag in the
/// text, if any. The single-argument form applies to both directions.
#[must_use]
pub fn extract_fade(text: &str) -> Option<(i64, i64)> {
    last_match(text, parse_fade)
}

/// Split a line into styled segments, starting from the given base
/// bold/italic state.
///
/// The walk only consumes characters inside `{…}` blocks; everything else is
/// kept verbatim, interior whitespace included. Within one block the last
/// `\b0`/`\b1` and `\i0`/`\i1` occurrences win. A `{` without a closing brace
/// is skipped and scanning continues with the next character. Empty segments
/// are dropped, so a line of nothing but tags produces no segments.
#[must_use]
pub fn styled_segments(text: &str, bold: bool, italic: bool) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut bold = bold;
    let mut italic = italic;

    let mut rest = text;
    while !rest.is_empty() {
        match rest.find('{') {
            Some(0) => {
                let Some(end) = rest.find('}') else {
                    rest = &rest[1..];
                    continue;
                };
                if !current.is_empty() {
                    segments.push(StyledSegment {
                        text: std::mem::take(&mut current),
                        bold,
                        italic,
                    });
                }
                scan_toggles(&rest[1..end], &mut bold, &mut italic);
                rest = &rest[end + 1..];
            }
            Some(position) => {
                current.push_str(&rest[..position]);
                rest = &rest[position..];
            }
            None => {
                current.push_str(rest);
                rest = "";
            }
        }
    }

    if !current.is_empty() {
        segments.push(StyledSegment {
            text: current,
            bold,
            italic,
        });
    }

    segments
}

fn scan_toggles(block: &str, bold: &mut bool, italic: &mut bool) {
    for (index, _) in block.match_indices('\\') {
        let command = &block[index + 1..];
        if let Some(argument) = command.strip_prefix('b') {
            if argument.starts_with('1') {
                *bold = true;
            } else if argument.starts_with('0') {
                *bold = false;
            }
        } else if let Some(argument) = command.strip_prefix('i') {
            if argument.starts_with('1') {
                *italic = true;
            } else if argument.starts_with('0') {
                *italic = false;
            }
        }
    }
}

/// Apply a command parser at every backslash in the text, keeping the value
/// of the last position where it succeeds
fn last_match<'a, T>(
    text: &'a str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Option<T> {
    let mut found = None;
    for (index, _) in text.match_indices('\\') {
        if let Ok((_, value)) = parser(&text[index..]) {
            found = Some(value);
        }
    }

    found
}

fn parse_font_name(input: &str) -> IResult<&str, &str> {
    preceded(
        tag("\\fn"),
        take_while1(|c: char| c != '\\' && c != '}'),
    )
    .parse(input)
}

fn parse_font_size(input: &str) -> IResult<&str, i64> {
    verify(preceded(tag("\\fs"), i64), |size| *size > 0).parse(input)
}

fn parse_primary_colour(input: &str) -> IResult<&str, Rgba> {
    preceded(alt((tag("\\1c"), tag("\\c"))), parse_ass_colour).parse(input)
}

fn parse_outline_colour(input: &str) -> IResult<&str, Rgba> {
    preceded(tag("\\3c"), parse_ass_colour).parse(input)
}

fn parse_alpha(input: &str) -> IResult<&str, u8> {
    preceded(
        alt((tag("\\1a"), tag("\\a"))),
        delimited(
            tag_no_case("&H"),
            map_res(
                take_while_m_n(1, 2, |c: char| c.is_ascii_hexdigit()),
                |hex| u8::from_str_radix(hex, 16),
            ),
            char('&'),
        ),
    )
    .parse(input)
}

fn parse_fade(input: &str) -> IResult<&str, (i64, i64)> {
    map(
        preceded(
            alt((tag("\\fade"), tag("\\fad"))),
            delimited(
                char('('),
                separated_list1(char(','), delimited(space0, i64, space0)),
                char(')'),
            ),
        ),
        |values| match values.as_slice() {
            [both] => (*both, *both),
            [fade_in, fade_out, ..] => (*fade_in, *fade_out),
            [] => (0, 0),
        },
    )
    .parse(input)
}

/// SubStation `&HBBGGRR&` colour payload, stored in blue-green-red order
fn parse_ass_colour(input: &str) -> IResult<&str, Rgba> {
    map(
        delimited(
            tag_no_case("&H"),
            map_res(
                take_while_m_n(1, 8, |c: char| c.is_ascii_hexdigit()),
                |hex| u32::from_str_radix(hex, 16),
            ),
            char('&'),
        ),
        |value| {
            Rgba::opaque(
                (value & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                ((value >> 16) & 0xFF) as u8,
            )
        },
    )
    .parse(input)
}
