use cinecanvas::{
    AssDocument, AssEvent, AssEventKind, AssScriptInfo, AssStyle, CineCanvasCodec, FrameRate,
    Moment,
};

fn dialogue(start: i64, end: i64, text: &str) -> AssEvent {
    AssEvent {
        kind: AssEventKind::Dialogue,
        start: Moment::from(start),
        end: Moment::from(end),
        style: Some("Default".to_string()),
        text: text.to_string(),
    }
}

fn document_with(events: Vec<AssEvent>) -> AssDocument {
    AssDocument::builder()
        .script_info(AssScriptInfo::default())
        .styles(vec![AssStyle::default()])
        .events(events)
        .build()
}

fn round_trip(events: Vec<AssEvent>) -> AssDocument {
    let codec = CineCanvasCodec::new();
    let output = codec
        .write_to_string(&document_with(events), FrameRate::unloaded())
        .unwrap();

    codec.read_from_str(&output).unwrap()
}

#[test]
fn single_line_events_survive() {
    let restored = round_trip(vec![dialogue(1000, 3000, "Hello")]);

    assert_eq!(restored.events().len(), 1);
    let event = restored.event(0).unwrap();
    assert_eq!(event.start, Moment::from(1000));
    assert_eq!(event.end, Moment::from(3000));
    assert_eq!(event.text, "Hello");
    assert_eq!(event.style.as_deref(), Some("CineCanvas"));
}

#[test]
fn line_breaks_survive() {
    let restored = round_trip(vec![dialogue(0, 1000, "Top\\NBottom")]);

    assert_eq!(restored.event(0).unwrap().text, "Top\\NBottom");
}

#[test]
fn mixed_styling_keeps_the_visible_text() {
    let restored = round_trip(vec![dialogue(0, 1000, "a {\\b1}b{\\b0} c")]);

    assert_eq!(restored.event(0).unwrap().text, "a b c");
}

#[test]
fn fades_are_reconstructed() {
    let restored = round_trip(vec![dialogue(500, 1500, "{\\fad(100,250)}Hi")]);

    assert_eq!(restored.event(0).unwrap().text, "{\\fad(100,250)}Hi");
}

#[test]
fn timestamps_survive_an_unloaded_rate_exactly() {
    for ms in [0_i64, 1, 999, 1000, 1042, 59_999, 3_600_001] {
        let restored = round_trip(vec![dialogue(ms, ms + 500, "x")]);
        assert_eq!(restored.event(0).unwrap().start, Moment::from(ms));
        assert_eq!(restored.event(0).unwrap().end, Moment::from(ms + 500));
    }
}

#[test]
fn quantized_timestamps_are_stable_under_a_second_pass() {
    let rate = FrameRate::new(24.0);
    let codec = CineCanvasCodec::new();

    let first = codec
        .write_to_string(
            &document_with(vec![dialogue(1042, 3007, "x")]),
            rate,
        )
        .unwrap();
    let restored = codec.read_from_str(&first).unwrap();
    let second = codec.write_to_string(&restored, rate).unwrap();

    let extract = |output: &str| {
        let start = output.find("TimeIn=\"").unwrap() + 8;
        output[start..start + 12].to_string()
    };
    assert_eq!(extract(&first), extract(&second));
    assert!(first.contains("TimeIn=\"00:00:01:041\""));
}

#[test]
fn multiple_events_keep_their_order_and_count() {
    let restored = round_trip(vec![
        dialogue(1000, 2000, "one"),
        dialogue(3000, 4000, "two"),
        dialogue(5000, 6000, "three"),
    ]);

    let texts: Vec<&str> = restored
        .events()
        .iter()
        .map(|event| event.text.as_str())
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn escaped_characters_survive() {
    let restored = round_trip(vec![dialogue(0, 1000, "a < b & c > d")]);

    assert_eq!(restored.event(0).unwrap().text, "a < b & c > d");
}

#[test]
fn the_written_style_round_trips_onto_the_synthesised_one() {
    let style = AssStyle {
        fontname: "Georgia".to_string(),
        fontsize: 36,
        bold: true,
        ..AssStyle::default()
    };
    let document = AssDocument::builder()
        .script_info(AssScriptInfo::default())
        .styles(vec![style])
        .events(vec![dialogue(0, 1000, "x")])
        .build();

    let codec = CineCanvasCodec::new();
    let output = codec
        .write_to_string(&document, FrameRate::unloaded())
        .unwrap();
    let restored = codec.read_from_str(&output).unwrap();

    let synthesised = restored.style("CineCanvas").unwrap();
    assert_eq!(synthesised.fontname, "Georgia");
    assert_eq!(synthesised.fontsize, 36);
    assert!(synthesised.bold);
}
