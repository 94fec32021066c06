use std::{cmp::Ordering, io::BufRead};

use nom::{
    character::complete::{char, i64, one_of},
    combinator::map,
    sequence::{preceded, terminated, tuple},
    IResult, Parser,
};

use crate::{
    colour::Rgba,
    errors::Error,
    substation::data::{AssDocument, AssEvent, AssEventKind, AssStyle},
    timing::Moment,
    xml::{self, Element},
};

/// Root element every CineCanvas document starts with
pub(crate) const ROOT_ELEMENT: &str = "DCSubtitle";

/// Name of the single style synthesised for an imported document
pub(crate) const STYLE_NAME: &str = "CineCanvas";

const DEFAULT_TIME_IN: &str = "00:00:00:000";
const DEFAULT_TIME_OUT: &str = "00:00:05:000";

/// Parse a CineCanvas timestamp, `HH:MM:SS:mmm` or `HH:MM:SS.mmm`
pub(crate) fn parse_timestamp(input: &str) -> IResult<&str, Moment> {
    map(
        tuple((
            terminated(i64, char(':')),
            terminated(i64, char(':')),
            i64,
            preceded(one_of(":."), i64),
        )),
        |(hours, minutes, seconds, millis)| Moment::from_timestamp(hours, minutes, seconds, millis),
    )
    .parse(input)
}

/// Load a CineCanvas document into an ASS document with a single synthesised
/// "CineCanvas" style.
///
/// The parse is tolerant: unknown elements are ignored and malformed
/// attribute values fall back to their documented defaults. Only a failure to
/// load the XML itself, or a foreign root element, is an error.
pub(crate) fn parse_cinecanvas<R: BufRead>(reader: R) -> Result<AssDocument, Error> {
    let root = xml::read_document(reader)?;

    parse_document(&root)
}

fn parse_document(root: &Element) -> Result<AssDocument, Error> {
    if root.name() != ROOT_ELEMENT {
        return Err(Error::ParseError(format!(
            "expected {ROOT_ELEMENT} root element, found {}",
            root.name()
        )));
    }

    let mut document = AssDocument::load_default();

    for child in root.elements() {
        match child.name() {
            "MovieTitle" => document.script_info_mut().title = Some(child.text()),
            "Language" => document.script_info_mut().language = Some(child.text()),
            _ => {}
        }
    }

    let fonts: Vec<&Element> = root
        .elements()
        .filter(|element| element.name() == "Font")
        .collect();

    document.remove_style("Default");
    document.push_style(style_from_container(fonts.first().copied()));

    for font in &fonts {
        for subtitle in font.elements().filter(|e| e.name() == "Subtitle") {
            document.push_event(parse_subtitle(subtitle));
        }
    }

    // The editor model requires at least one event
    if document.events().is_empty() {
        document.push_event(AssEvent {
            kind: AssEventKind::Dialogue,
            start: Moment::from(0),
            end: Moment::from(5000),
            style: Some(STYLE_NAME.to_string()),
            text: String::new(),
        });
    }

    Ok(document)
}

/// Build the single imported style from the container font's typography
/// attributes, defaulting each one independently when missing or malformed
fn style_from_container(font: Option<&Element>) -> AssStyle {
    let mut style = AssStyle {
        name: STYLE_NAME.to_string(),
        alignment: 2,
        margin_l: 10,
        margin_r: 10,
        margin_v: 10,
        ..AssStyle::default()
    };

    let Some(font) = font else {
        return style;
    };

    if let Some(fontname) = font.attribute("Script").map(str::trim) {
        if !fontname.is_empty() {
            style.fontname = fontname.to_string();
        }
    }
    style.fontsize = integer_attribute(font, "Size", 42);
    style.bold = font
        .attribute("Weight")
        .is_some_and(|weight| weight.eq_ignore_ascii_case("bold"));
    style.italic = font
        .attribute("Italic")
        .is_some_and(|italic| italic.eq_ignore_ascii_case("yes"));
    if let Some(colour) = font.attribute("Color") {
        style.primary_colour = Rgba::from_cinecanvas(colour);
    }
    style.outline = match font.attribute("Effect") {
        Some(effect) if effect.eq_ignore_ascii_case("border") => 2.0,
        _ => 0.0,
    };
    if let Some(colour) = font.attribute("EffectColor") {
        style.outline_colour = Rgba::from_cinecanvas(colour);
    } else {
        style.outline_colour = Rgba::opaque(0, 0, 0);
    }

    style
}

fn parse_subtitle(subtitle: &Element) -> AssEvent {
    let start = moment_attribute(subtitle, "TimeIn", DEFAULT_TIME_IN);
    let end = moment_attribute(subtitle, "TimeOut", DEFAULT_TIME_OUT);
    let fade_up = integer_attribute(subtitle, "FadeUpTime", 0);
    let fade_down = integer_attribute(subtitle, "FadeDownTime", 0);

    // Typography may sit on a font between the subtitle and its text
    let inline_fonts: Vec<&Element> = subtitle
        .elements()
        .filter(|element| element.name() == "Font")
        .collect();
    let container: &Element = match inline_fonts.as_slice() {
        [font] => *font,
        _ => subtitle,
    };

    let mut lines: Vec<(f64, String)> = container
        .descendants("Text")
        .iter()
        .map(|text| (vertical_position(text), text.deep_text().trim().to_string()))
        .collect();
    if lines.is_empty() {
        lines = subtitle
            .elements()
            .filter(|element| element.name() == "Text")
            .map(|text| (vertical_position(text), text.deep_text().trim().to_string()))
            .collect();
    }

    // Larger VPosition means higher on screen, so descending order restores
    // top-to-bottom reading order
    lines.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let mut text = lines
        .into_iter()
        .map(|(_, content)| content)
        .collect::<Vec<String>>()
        .join("\\N");
    if fade_up != 0 || fade_down != 0 {
        text = format!("{{\\fad({fade_up},{fade_down})}}{text}");
    }

    AssEvent {
        kind: AssEventKind::Dialogue,
        start,
        end,
        style: Some(STYLE_NAME.to_string()),
        text,
    }
}

fn moment_attribute(element: &Element, name: &str, default: &str) -> Moment {
    let value = element.attribute(name).unwrap_or(default);
    match parse_timestamp(value.trim()) {
        Ok((_, moment)) => moment,
        Err(_) => Moment::from(0),
    }
}

fn integer_attribute(element: &Element, name: &str, default: i64) -> i64 {
    element
        .attribute(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn vertical_position(element: &Element) -> f64 {
    element
        .attribute("VPosition")
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0.0)
}
