//! cinecanvas converts subtitles between the Advanced SubStation Alpha
//! in-memory representation used by subtitle editors and the CineCanvas XML
//! format carried in Digital Cinema Packages

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    missing_docs,
    clippy::perf,
    anonymous_parameters,
    trivial_numeric_casts,
    trivial_casts,
    single_use_lifetimes,
    nonstandard_style,
    unreachable_pub
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::doc_markdown,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

/// CineCanvas (DCP) subtitle implementations
pub mod cinecanvas;
mod codec;
mod colour;
mod encoding;
mod errors;
/// SubStation document model and override tag handling
pub mod substation;
/// Types used for subtitle timing
pub mod timing;
mod xml;

pub use codec::{CineCanvasCodec, SubtitleCodec};
pub use colour::Rgba;
pub use errors::Error;
#[doc(inline)]
pub use cinecanvas::{
    preflight_report, validate_fade_duration, validate_font_size, validate_frame_rate,
    validate_language_code, validate_movie_title, validate_reel_number, ExportSettings,
    FRAME_RATES,
};
#[doc(inline)]
pub use substation::{
    AssDocument, AssEvent, AssEventKind, AssScriptInfo, AssStyle, FontProperties, StyledSegment,
};
pub use timing::{Frame, FrameRate, Moment, TimeDelta};
