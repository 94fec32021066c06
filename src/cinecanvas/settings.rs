use std::{cmp::Ordering, ffi::OsStr, path::Path};

use crate::substation::{data::AssDocument, tags::styled_segments};

/// Frame rates a DCP can be mastered at
pub const FRAME_RATES: [f64; 9] = [23.976, 24.0, 25.0, 29.97, 30.0, 48.0, 50.0, 59.94, 60.0];

/// DCP reel guidance: past this many subtitles a warning is raised
const SUBTITLE_COUNT_GUIDANCE: usize = 500;

/// Readability guidance for the visible length of a single line
const LINE_LENGTH_GUIDANCE: usize = 80;

/// Configuration for a CineCanvas export.
///
/// None of the fields bind to stored editor preferences; hosts that persist
/// settings construct this record themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSettings {
    /// Frame rate the DCP is mastered at, one of [`FRAME_RATES`]
    pub frame_rate: f64,
    /// Title written to the `<MovieTitle>` header element
    pub movie_title: String,
    /// Reel number written to the `<ReelNumber>` header element
    pub reel_number: i64,
    /// ISO 639 language code written to the `<Language>` header element
    pub language_code: String,
    /// Whether the `<LoadFont>` element should reference a font file
    pub include_font_reference: bool,
    /// Location of the referenced font file
    pub font_uri: String,
}

impl ExportSettings {
    /// Derive settings for the given output path: the movie title comes from
    /// the file stem and the frame rate snaps to the closest DCP rate within
    /// 0.1 fps of the video, when one is loaded.
    #[must_use]
    pub fn new(output_path: &Path, video_fps: Option<f64>) -> Self {
        let movie_title = output_path
            .file_stem()
            .and_then(OsStr::to_str)
            .map_or_else(|| "Untitled".to_string(), validate_movie_title);

        Self {
            frame_rate: video_fps.and_then(closest_frame_rate).unwrap_or(24.0),
            movie_title,
            ..Self::default()
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            frame_rate: 24.0,
            movie_title: "Untitled".to_string(),
            reel_number: 1,
            language_code: "en".to_string(),
            include_font_reference: false,
            font_uri: String::new(),
        }
    }
}

fn closest_frame_rate(fps: f64) -> Option<f64> {
    FRAME_RATES
        .iter()
        .copied()
        .map(|rate| (rate, (rate - fps).abs()))
        .filter(|(_, difference)| *difference <= 0.1)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(rate, _)| rate)
}

/// Clamp a frame rate choice to the DCP rates, falling back to 24
#[must_use]
pub fn validate_frame_rate(rate: f64) -> f64 {
    if FRAME_RATES
        .iter()
        .any(|allowed| (allowed - rate).abs() < 1e-9)
    {
        rate
    } else {
        24.0
    }
}

/// Trim a movie title, replacing empty titles with "Untitled"
#[must_use]
pub fn validate_movie_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        "Untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Clamp a reel number to at least 1
#[must_use]
pub fn validate_reel_number(reel_number: i64) -> i64 {
    reel_number.max(1)
}

/// Lowercase and check a language code.
///
/// Codes are accepted when they appear in a curated set of common ISO
/// 639-1/639-2 codes, or when they are purely alphabetic with a length of two
/// or three characters. Anything else falls back to "en".
#[must_use]
pub fn validate_language_code(code: &str) -> String {
    let code = code.trim().to_lowercase();
    let plausible =
        (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic());
    if LANGUAGE_CODES.contains(&code.as_str()) || plausible {
        code
    } else {
        "en".to_string()
    }
}

/// Clamp a font size to the 10–72 point range, falling back to 42
#[must_use]
pub fn validate_font_size(size: i64) -> i64 {
    if (10..=72).contains(&size) {
        size
    } else {
        42
    }
}

/// Clamp a fade duration to be non-negative, falling back to 20 ms
#[must_use]
pub fn validate_fade_duration(duration: i64) -> i64 {
    if duration >= 0 {
        duration
    } else {
        20
    }
}

/// Analyse a document before export and describe everything the CineCanvas
/// format will lose or that works against DCP guidance.
///
/// The report is a newline-joined list of human-readable warnings. Nothing in
/// it blocks the export.
#[must_use]
pub fn preflight_report(document: &AssDocument, settings: &ExportSettings) -> String {
    let mut warnings = Vec::new();

    let dialogue: Vec<&str> = document
        .events()
        .iter()
        .filter(|event| !event.is_comment())
        .map(|event| event.text.as_str())
        .collect();

    if dialogue.len() > SUBTITLE_COUNT_GUIDANCE {
        warnings.push(format!(
            "The script contains {} subtitles; DCP reels are usually kept to {SUBTITLE_COUNT_GUIDANCE} or fewer.",
            dialogue.len()
        ));
    }

    if dialogue
        .iter()
        .any(|text| text.contains("\\t(") || text.contains("\\move"))
    {
        warnings.push(
            "Animation tags (\\t, \\move) are not supported by CineCanvas and will be lost."
                .to_string(),
        );
    }

    if dialogue.iter().any(|text| {
        text.contains("\\blur")
            || text.contains("\\be")
            || text.contains("\\fscx")
            || text.contains("\\fscy")
    }) {
        warnings.push(
            "Effect tags (\\blur, \\be, \\fscx, \\fscy) are not supported by CineCanvas and will be lost."
                .to_string(),
        );
    }

    if dialogue.iter().any(|text| contains_drawing(text)) {
        warnings.push(
            "Vector drawings (\\p) are not supported by CineCanvas and will be lost.".to_string(),
        );
    }

    if dialogue.iter().any(|text| has_long_line(text)) {
        warnings.push(format!(
            "Some lines are longer than {LINE_LENGTH_GUIDANCE} characters and may not fit on screen."
        ));
    }

    if settings.include_font_reference && settings.font_uri.trim().is_empty() {
        warnings.push(
            "A font reference was requested but no font file was specified.".to_string(),
        );
    }

    warnings.push(
        "DCP projectors interpret colours in the XYZ colour space; colours are written unconverted."
            .to_string(),
    );

    warnings.join("\n")
}

fn contains_drawing(text: &str) -> bool {
    text.match_indices("\\p").any(|(index, _)| {
        text[index + 2..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}

fn has_long_line(text: &str) -> bool {
    text.split("\\N").any(|line| {
        styled_segments(line, false, false)
            .iter()
            .map(|segment| segment.text.chars().count())
            .sum::<usize>()
            > LINE_LENGTH_GUIDANCE
    })
}

/// Common ISO 639-1 and ISO 639-2 codes accepted without further shape checks
const LANGUAGE_CODES: [&str; 60] = [
    "ar", "bg", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "he", "hi", "hr", "hu",
    "id", "it", "ja", "ko", "lt", "lv", "nb", "nl", "no", "pl", "pt", "ro", "ru", "sk", "sl",
    "sr", "sv", "th", "tr", "uk", "vi", "zh", "ara", "bul", "ces", "dan", "deu", "ell", "eng",
    "est", "fin", "fra", "fre", "ger", "heb", "hin", "ita", "jpn", "kor", "nld", "pol", "por",
    "rus", "spa", "zho",
];
