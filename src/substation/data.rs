use std::fmt::Display;

use buildstructor::Builder;

use crate::{colour::Rgba, Moment};

/// In-memory Advanced SubStation Alpha document: script metadata, styles and
/// dialogue events. This is the model the CineCanvas codec reads into and
/// writes from; parsing and serialising `.ass` files themselves is the
/// responsibility of the host editor.
#[derive(Clone, Debug, Builder)]
pub struct AssDocument {
    /// Script info
    script_info: AssScriptInfo,
    /// Styles referenced by events
    styles: Vec<AssStyle>,
    /// Dialogue and comment events
    events: Vec<AssEvent>,
}

/// Advanced SubStation Alpha event
#[derive(Clone, Debug, PartialEq)]
pub struct AssEvent {
    /// Kind of event
    pub kind: AssEventKind,
    /// Start time of event
    pub start: Moment,
    /// End time of event
    pub end: Moment,
    /// Style name for event
    pub style: Option<String>,
    /// Associated text, which may contain override tag blocks and `\N` line
    /// separators
    pub text: String,
}

/// Kind of event line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssEventKind {
    /// Text shown on screen
    Dialogue,
    /// Event commented out in the editor; never rendered or exported
    Comment,
}

/// Information for the `[Script Info]` section of an Advanced SubStation
/// Alpha document, reduced to the fields the CineCanvas codec exchanges
#[derive(Clone, Debug, Builder, Default)]
pub struct AssScriptInfo {
    /// Title/description for the subtitle
    pub title: Option<String>,
    /// Language of the subtitle text
    pub language: Option<String>,
}

/// Style in an Advanced SubStation Alpha document
#[derive(Clone, Debug, PartialEq)]
pub struct AssStyle {
    /// Name of style
    pub name: String,
    /// Name of font used to display text
    pub fontname: String,
    /// Font size of text
    pub fontsize: i64,
    /// Whether text is bolded
    pub bold: bool,
    /// Whether text is italicised
    pub italic: bool,
    /// Colour that text will be rendered as
    pub primary_colour: Rgba,
    /// Colour of text outline
    pub outline_colour: Rgba,
    /// Width of text outline
    pub outline: f64,
    /// Alignment of text on screen, using numpad notation
    pub alignment: i64,
    /// Left margin in pixels
    pub margin_l: i64,
    /// Right margin in pixels
    pub margin_r: i64,
    /// Vertical margin in pixels
    pub margin_v: i64,
}

impl AssDocument {
    /// Create the document an editor starts from: one "Default" style and no
    /// events
    #[must_use]
    pub fn load_default() -> Self {
        Self {
            script_info: AssScriptInfo::default(),
            styles: vec![AssStyle::default()],
            events: Vec::new(),
        }
    }

    /// Get script info struct
    #[must_use]
    pub fn script_info(&self) -> &AssScriptInfo {
        &self.script_info
    }

    /// Get mutable script info struct
    pub fn script_info_mut(&mut self) -> &mut AssScriptInfo {
        &mut self.script_info
    }

    /// Get list of styles as a slice
    #[must_use]
    pub fn styles(&self) -> &[AssStyle] {
        self.styles.as_slice()
    }

    /// Get list of styles as a mutable slice
    pub fn styles_mut(&mut self) -> &mut [AssStyle] {
        self.styles.as_mut_slice()
    }

    /// Find a style by name
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&AssStyle> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// Append a style to the style collection
    pub fn push_style(&mut self, style: AssStyle) {
        self.styles.push(style);
    }

    /// Remove all styles with the given name.
    ///
    /// Event style names are plain strings, so callers reassigning events to
    /// a replacement style should do so after the removal.
    pub fn remove_style(&mut self, name: &str) {
        self.styles.retain(|style| style.name != name);
    }

    /// Get list of events as a slice
    #[must_use]
    pub fn events(&self) -> &[AssEvent] {
        self.events.as_slice()
    }

    /// Get list of events as a mutable slice
    pub fn events_mut(&mut self) -> &mut [AssEvent] {
        self.events.as_mut_slice()
    }

    /// Try to get event at given index
    #[must_use]
    pub fn event(&self, index: usize) -> Option<&AssEvent> {
        self.events.get(index)
    }

    /// Append an event to the event list
    pub fn push_event(&mut self, event: AssEvent) {
        self.events.push(event);
    }
}

impl Default for AssDocument {
    fn default() -> Self {
        Self::builder().script_info(AssScriptInfo::default()).build()
    }
}

impl AssEvent {
    /// Whether this event is commented out
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == AssEventKind::Comment
    }
}

impl Display for AssEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssEventKind::Dialogue => write!(f, "Dialogue"),
            AssEventKind::Comment => write!(f, "Comment"),
        }
    }
}

impl Default for AssStyle {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            fontname: "Arial".to_string(),
            fontsize: 42,
            bold: false,
            italic: false,
            primary_colour: Rgba::opaque(0xFF, 0xFF, 0xFF),
            outline_colour: Rgba::opaque(0, 0, 0),
            outline: 2.0,
            alignment: 2,
            margin_l: 10,
            margin_r: 10,
            margin_v: 10,
        }
    }
}
