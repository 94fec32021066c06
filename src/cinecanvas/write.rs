use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    cinecanvas::settings::{validate_font_size, ExportSettings},
    errors::Error,
    substation::{
        data::{AssDocument, AssEvent, AssEventKind, AssStyle},
        tags::{extract_fade, styled_segments, FontProperties, StyledSegment},
    },
    timing::FrameRate,
    xml::{self, Element},
};

/// Stable placeholder identifier; hosts wanting real RFC 4122 values rewrite
/// the element after composition
const SUBTITLE_ID: &str = "urn:uuid:00000000-0000-0000-0000-000000000000";

/// Vertical position of the bottom line, in percent from the bottom edge
const BASE_VPOSITION: f64 = 10.0;

/// Vertical distance between stacked lines, in percent
const LINE_SPACING: f64 = 6.5;

/// Serialise a document to the given path.
///
/// Failures to create or write the file surface as [`Error::WriteError`]; the
/// state of the output path is unspecified afterwards.
pub(crate) fn write_cinecanvas(
    document: &AssDocument,
    path: &Path,
    frame_rate: FrameRate,
    settings: &ExportSettings,
) -> Result<(), Error> {
    let root = compose_document(document, frame_rate, settings);
    let mut buffer = Vec::new();
    xml::write_document(&root, &mut buffer)?;

    fs::write(path, buffer).map_err(|error| Error::WriteError(error.to_string()))
}

/// Build the CineCanvas element tree for a document.
///
/// Works on a normalised copy of the event list; the source document is never
/// mutated.
pub(crate) fn compose_document(
    document: &AssDocument,
    frame_rate: FrameRate,
    settings: &ExportSettings,
) -> Element {
    let events = normalise_events(document.events());
    let default_style = document
        .style("Default")
        .or_else(|| document.styles().first());

    let mut root = Element::new(super::parse::ROOT_ELEMENT);
    root.set_attribute("Version", "1.0");
    root.push_element(text_child("SubtitleID", SUBTITLE_ID));
    root.push_element(text_child("MovieTitle", settings.movie_title.as_str()));
    root.push_element(text_child("ReelNumber", settings.reel_number.to_string()));
    root.push_element(text_child("Language", settings.language_code.as_str()));

    let mut load_font = Element::new("LoadFont");
    load_font.set_attribute("Id", "Font1");
    load_font.set_attribute("URI", font_file_name(settings));
    root.push_element(load_font);

    let container_properties =
        default_style.map_or_else(FontProperties::default, FontProperties::from);
    let mut container = Element::new("Font");
    container.set_attribute("Id", "Font1");
    set_font_attributes(
        &mut container,
        &container_properties,
        container_properties.bold,
        container_properties.italic,
    );

    for (index, event) in events.iter().enumerate() {
        let style = event
            .style
            .as_deref()
            .and_then(|name| document.style(name))
            .or(default_style);
        container.push_element(compose_subtitle(event, index + 1, style, frame_rate));
    }

    root.push_element(container);

    root
}

/// Copy and normalise the event list for emission: sorted by start time,
/// comments dropped, overlapping spans recombined and identical neighbours
/// merged. Override tags survive normalisation; fades are read from them
/// later.
fn normalise_events(events: &[AssEvent]) -> Vec<AssEvent> {
    let mut events: Vec<AssEvent> = events.to_vec();
    events.sort_by_key(|event| event.start);
    events.retain(|event| !event.is_comment());

    merge_identical(recombine_overlaps(events))
}

/// Split overlapping neighbours into disjoint spans whose overlap carries the
/// union of both texts
fn recombine_overlaps(events: Vec<AssEvent>) -> Vec<AssEvent> {
    let mut result: Vec<AssEvent> = Vec::with_capacity(events.len());

    for event in events {
        let overlaps = result
            .last()
            .is_some_and(|previous| event.start < previous.end);
        if !overlaps {
            result.push(event);
            continue;
        }
        let Some(previous) = result.pop() else {
            result.push(event);
            continue;
        };
        let overlap_end = previous.end.min(event.end);
        let tail_end = previous.end.max(event.end);

        if previous.start < event.start {
            result.push(AssEvent {
                end: event.start,
                ..previous.clone()
            });
        }

        let union_text = if previous.text == event.text {
            previous.text.clone()
        } else {
            format!("{}\\N{}", previous.text, event.text)
        };
        result.push(AssEvent {
            kind: AssEventKind::Dialogue,
            start: event.start,
            end: overlap_end,
            style: previous.style.clone(),
            text: union_text,
        });

        if overlap_end < tail_end {
            let tail = if previous.end > event.end {
                previous
            } else {
                event
            };
            result.push(AssEvent {
                start: overlap_end,
                end: tail_end,
                ..tail
            });
        }
    }

    result
}

/// Merge runs of adjacent or overlapping events that display the same text
fn merge_identical(events: Vec<AssEvent>) -> Vec<AssEvent> {
    let mut result: Vec<AssEvent> = Vec::with_capacity(events.len());

    for event in events {
        if let Some(previous) = result.last_mut() {
            if previous.text == event.text && event.start <= previous.end {
                previous.end = previous.end.max(event.end);
                continue;
            }
        }
        result.push(event);
    }

    result
}

fn compose_subtitle(
    event: &AssEvent,
    spot_number: usize,
    style: Option<&AssStyle>,
    frame_rate: FrameRate,
) -> Element {
    let properties = FontProperties::resolve(style, &event.text);
    let (fade_up, fade_down) = extract_fade(&event.text).unwrap_or((0, 0));

    let start = frame_rate.quantize(event.start);
    let end = frame_rate.quantize(event.end).max(start);

    let mut subtitle = Element::new("Subtitle");
    subtitle.set_attribute("SpotNumber", spot_number.to_string());
    subtitle.set_attribute("TimeIn", start.as_cinecanvas_timestamp());
    subtitle.set_attribute("TimeOut", end.as_cinecanvas_timestamp());
    subtitle.set_attribute("FadeUpTime", fade_up.to_string());
    subtitle.set_attribute("FadeDownTime", fade_down.to_string());

    let base_bold = style.is_some_and(|style| style.bold);
    let base_italic = style.is_some_and(|style| style.italic);

    let rendered: Vec<Vec<StyledSegment>> = split_lines(&event.text)
        .into_iter()
        .map(|line| styled_segments(line, base_bold, base_italic))
        .filter(|segments| !visible_text(segments).trim().is_empty())
        .collect();

    if rendered.is_empty() {
        // Entirely empty events still occupy their time span
        subtitle.push_element(compose_line(
            &properties,
            base_bold,
            base_italic,
            &[],
            BASE_VPOSITION,
        ));
        return subtitle;
    }

    let count = rendered.len();
    for (index, segments) in rendered.iter().enumerate() {
        // The bottom line sits at the base position; earlier lines stack
        // upwards
        let vposition = BASE_VPOSITION + ((count - 1 - index) as f64) * LINE_SPACING;
        subtitle.push_element(compose_line(
            &properties,
            base_bold,
            base_italic,
            segments,
            vposition,
        ));
    }

    subtitle
}

fn compose_line(
    properties: &FontProperties,
    base_bold: bool,
    base_italic: bool,
    segments: &[StyledSegment],
    vposition: f64,
) -> Element {
    let mut font = Element::new("Font");
    let mut text = text_element(vposition);

    let uniform = segments
        .windows(2)
        .all(|pair| pair[0].bold == pair[1].bold && pair[0].italic == pair[1].italic);

    if uniform {
        let (bold, italic) = segments
            .first()
            .map_or((base_bold, base_italic), |segment| {
                (segment.bold, segment.italic)
            });
        set_font_attributes(&mut font, properties, bold, italic);

        let content = visible_text(segments);
        let content = content.trim();
        if !content.is_empty() {
            text.push_text(content);
        }
    } else {
        // Mixed runs: a neutral outer font whose text interleaves plain runs
        // with inline styled fonts
        set_font_attributes(&mut font, properties, false, false);

        for segment in segments {
            if segment.bold || segment.italic {
                let mut inline = Element::new("Font");
                if segment.bold {
                    inline.set_attribute("Weight", "bold");
                }
                if segment.italic {
                    inline.set_attribute("Italic", "yes");
                }
                inline.push_text(segment.text.clone());
                text.push_element(inline);
            } else {
                text.push_text(segment.text.clone());
            }
        }
    }

    font.push_element(text);

    font
}

fn set_font_attributes(
    element: &mut Element,
    properties: &FontProperties,
    bold: bool,
    italic: bool,
) {
    element.set_attribute("Script", &properties.fontname);
    element.set_attribute("Size", validate_font_size(properties.size).to_string());
    element.set_attribute("Weight", if bold { "bold" } else { "normal" });
    element.set_attribute("Italic", if italic { "yes" } else { "no" });
    element.set_attribute("Color", properties.primary_colour.as_cinecanvas());
    if properties.outline > 0.0 {
        element.set_attribute("Effect", "border");
        element.set_attribute("EffectColor", properties.outline_colour.as_cinecanvas());
    } else {
        element.set_attribute("Effect", "none");
        element.set_attribute("EffectColor", "FF000000");
    }
}

fn text_element(vposition: f64) -> Element {
    let mut text = Element::new("Text");
    text.set_attribute("VAlign", "bottom");
    text.set_attribute("HAlign", "center");
    text.set_attribute("VPosition", format!("{vposition:.1}"));
    text.set_attribute("HPosition", "0.0");
    text.set_attribute("Direction", "horizontal");

    text
}

fn text_child(name: &str, content: impl Into<String>) -> Element {
    let mut element = Element::new(name);
    element.push_text(content);

    element
}

fn font_file_name(settings: &ExportSettings) -> String {
    if !settings.include_font_reference {
        return String::new();
    }

    PathBuf::from(&settings.font_uri)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Concatenated text of a line's segments, tags removed
fn visible_text(segments: &[StyledSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect()
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.contains("\\N") {
        text.split("\\N").collect()
    } else if text.contains("\\n") {
        text.split("\\n").collect()
    } else {
        vec![text]
    }
}
