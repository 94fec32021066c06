pub(crate) mod parse;
/// Export configuration, validation and the pre-flight analyzer
pub mod settings;
pub(crate) mod write;

pub use settings::{
    preflight_report, validate_fade_duration, validate_font_size, validate_frame_rate,
    validate_language_code, validate_movie_title, validate_reel_number, ExportSettings,
    FRAME_RATES,
};
