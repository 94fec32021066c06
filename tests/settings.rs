use std::path::Path;

use cinecanvas::{
    preflight_report, validate_fade_duration, validate_font_size, validate_frame_rate,
    validate_language_code, validate_movie_title, validate_reel_number, AssDocument, AssEvent,
    AssEventKind, ExportSettings, Moment,
};

fn dialogue(text: &str) -> AssEvent {
    AssEvent {
        kind: AssEventKind::Dialogue,
        start: Moment::from(0),
        end: Moment::from(1000),
        style: None,
        text: text.to_string(),
    }
}

fn document_with(texts: &[&str]) -> AssDocument {
    let mut document = AssDocument::load_default();
    for text in texts {
        document.push_event(dialogue(text));
    }

    document
}

#[test]
fn defaults() {
    let settings = ExportSettings::default();
    assert!((settings.frame_rate - 24.0).abs() < f64::EPSILON);
    assert_eq!(settings.movie_title, "Untitled");
    assert_eq!(settings.reel_number, 1);
    assert_eq!(settings.language_code, "en");
    assert!(!settings.include_font_reference);
    assert!(settings.font_uri.is_empty());
}

#[test]
fn title_derives_from_the_path_stem() {
    let settings = ExportSettings::new(Path::new("/films/Sintel Reel 1.xml"), None);
    assert_eq!(settings.movie_title, "Sintel Reel 1");
    assert!((settings.frame_rate - 24.0).abs() < f64::EPSILON);
}

#[test]
fn frame_rate_snaps_to_the_closest_dcp_rate() {
    let settings = ExportSettings::new(Path::new("out.xml"), Some(23.98));
    assert!((settings.frame_rate - 23.976).abs() < f64::EPSILON);

    let settings = ExportSettings::new(Path::new("out.xml"), Some(25.04));
    assert!((settings.frame_rate - 25.0).abs() < f64::EPSILON);
}

#[test]
fn distant_video_rates_fall_back_to_24() {
    let settings = ExportSettings::new(Path::new("out.xml"), Some(15.0));
    assert!((settings.frame_rate - 24.0).abs() < f64::EPSILON);
}

#[test]
fn frame_rate_validation() {
    assert!((validate_frame_rate(25.0) - 25.0).abs() < f64::EPSILON);
    assert!((validate_frame_rate(23.976) - 23.976).abs() < f64::EPSILON);
    assert!((validate_frame_rate(22.0) - 24.0).abs() < f64::EPSILON);
}

#[test]
fn movie_title_validation() {
    assert_eq!(validate_movie_title("  Sintel  "), "Sintel");
    assert_eq!(validate_movie_title("   "), "Untitled");
    assert_eq!(validate_movie_title(""), "Untitled");
}

#[test]
fn reel_number_validation() {
    assert_eq!(validate_reel_number(3), 3);
    assert_eq!(validate_reel_number(1), 1);
    assert_eq!(validate_reel_number(0), 1);
    assert_eq!(validate_reel_number(-2), 1);
}

#[test]
fn language_code_validation() {
    assert_eq!(validate_language_code("EN"), "en");
    assert_eq!(validate_language_code("de"), "de");
    assert_eq!(validate_language_code("deu"), "deu");
    assert_eq!(validate_language_code("xyzzy"), "en");
    assert_eq!(validate_language_code("e1"), "en");
    assert_eq!(validate_language_code(""), "en");
    // unknown but plausible codes pass the shape check
    assert_eq!(validate_language_code("qq"), "qq");
}

#[test]
fn font_size_validation() {
    assert_eq!(validate_font_size(42), 42);
    assert_eq!(validate_font_size(10), 10);
    assert_eq!(validate_font_size(72), 72);
    assert_eq!(validate_font_size(9), 42);
    assert_eq!(validate_font_size(100), 42);
}

#[test]
fn fade_duration_validation() {
    assert_eq!(validate_fade_duration(0), 0);
    assert_eq!(validate_fade_duration(150), 150);
    assert_eq!(validate_fade_duration(-1), 20);
}

#[test]
fn preflight_always_mentions_the_colour_space() {
    let report = preflight_report(&document_with(&["Hello"]), &ExportSettings::default());
    assert_eq!(report.lines().count(), 1);
    assert!(report.contains("XYZ"));
}

#[test]
fn preflight_reports_animation_loss() {
    let report = preflight_report(
        &document_with(&["{\\move(0,0,10,10)}slide"]),
        &ExportSettings::default(),
    );
    assert!(report.contains("\\move"));

    let report = preflight_report(
        &document_with(&["{\\t(\\fs30)}grow"]),
        &ExportSettings::default(),
    );
    assert!(report.contains("\\t"));
}

#[test]
fn preflight_reports_effect_loss() {
    let report = preflight_report(
        &document_with(&["{\\blur2}soft", "{\\fscx120}wide"]),
        &ExportSettings::default(),
    );
    assert!(report.contains("\\blur"));
}

#[test]
fn preflight_reports_vector_drawings_without_flagging_pos() {
    let report = preflight_report(
        &document_with(&["{\\p1}m 0 0 l 10 10{\\p0}"]),
        &ExportSettings::default(),
    );
    assert!(report.contains("\\p"));

    let report = preflight_report(
        &document_with(&["{\\pos(10,10)}anchored"]),
        &ExportSettings::default(),
    );
    assert!(!report.contains("Vector"));
}

#[test]
fn preflight_reports_long_lines() {
    let long_line = "x".repeat(81);
    let report = preflight_report(&document_with(&[&long_line]), &ExportSettings::default());
    assert!(report.contains("80"));

    // tags do not count towards the visible length
    let tagged = format!("{{\\fnSome Very Long Font Name That Pads The Line}}{}", "y".repeat(60));
    let report = preflight_report(&document_with(&[&tagged]), &ExportSettings::default());
    assert!(!report.contains("80 characters"));
}

#[test]
fn preflight_reports_missing_font_reference() {
    let settings = ExportSettings {
        include_font_reference: true,
        ..ExportSettings::default()
    };
    let report = preflight_report(&document_with(&["Hello"]), &settings);
    assert!(report.contains("font"));
}

#[test]
fn preflight_reports_excessive_subtitle_counts() {
    let texts: Vec<String> = (0..501).map(|n| format!("line {n}")).collect();
    let mut document = AssDocument::load_default();
    for text in &texts {
        document.push_event(dialogue(text));
    }
    let report = preflight_report(&document, &ExportSettings::default());
    assert!(report.contains("501"));
}
