use std::{
    fs::File,
    io::BufReader,
    path::Path,
};

use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::{
    cinecanvas::{
        parse::{parse_cinecanvas, ROOT_ELEMENT},
        settings::ExportSettings,
        write::{compose_document, write_cinecanvas},
    },
    encoding::detect_file_encoding,
    errors::Error,
    substation::data::AssDocument,
    timing::FrameRate,
    xml,
};

/// A subtitle format the host editor can read and write documents through.
///
/// `can_read` is a selection-time check: a codec that declines simply is not
/// chosen, and no error is raised. Errors only surface once a selected codec
/// actually reads or writes.
pub trait SubtitleCodec {
    /// Short name of the format
    fn name(&self) -> &'static str;

    /// File extensions the codec can read
    fn read_wildcards(&self) -> &'static [&'static str];

    /// File extensions the codec can write
    fn write_wildcards(&self) -> &'static [&'static str];

    /// Whether the file at the given path looks like this format
    fn can_read(&self, path: &Path) -> bool;

    /// Whether the given document can be written in this format
    fn can_write(&self, _document: &AssDocument) -> bool {
        true
    }

    /// Load the file at the given path into an ASS document
    ///
    /// # Errors
    ///
    /// - Returns [`Error::FileIoError`] if the file cannot be opened
    /// - Returns [`Error::ParseError`] if the contents cannot be parsed
    fn read(&self, path: &Path, frame_rate: FrameRate) -> Result<AssDocument, Error>;

    /// Write the document to the given path
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteError`] if the file cannot be created or
    /// serialisation fails
    fn write(
        &self,
        document: &AssDocument,
        path: &Path,
        frame_rate: FrameRate,
    ) -> Result<(), Error>;
}

/// Codec for CineCanvas DCP subtitles, registered under the `xml` extension
/// and selected by sniffing for a `DCSubtitle` root element
#[derive(Clone, Debug, Default)]
pub struct CineCanvasCodec {
    settings: ExportSettings,
}

impl CineCanvasCodec {
    /// Create a codec with default export settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec using the given export settings
    #[must_use]
    pub fn with_settings(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Export settings used when writing
    #[must_use]
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Mutable export settings
    pub fn settings_mut(&mut self) -> &mut ExportSettings {
        &mut self.settings
    }

    /// Parse a CineCanvas document from a string
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] if the contents cannot be parsed
    pub fn read_from_str(&self, text: &str) -> Result<AssDocument, Error> {
        parse_cinecanvas(BufReader::new(text.as_bytes()))
    }

    /// Serialise a document to a CineCanvas XML string
    ///
    /// # Errors
    ///
    /// Returns [`Error::WriteError`] if serialisation fails
    pub fn write_to_string(
        &self,
        document: &AssDocument,
        frame_rate: FrameRate,
    ) -> Result<String, Error> {
        let root = compose_document(document, frame_rate, &self.settings);
        let mut buffer = Vec::new();
        xml::write_document(&root, &mut buffer)?;

        String::from_utf8(buffer).map_err(|error| Error::WriteError(error.to_string()))
    }

    fn open_transcoded(path: &Path) -> Result<BufReader<impl std::io::Read>, Error> {
        let encoding = detect_file_encoding(path, Some(4096)).ok();
        let file = File::open(path)?;
        let transcoded = DecodeReaderBytesBuilder::new()
            .encoding(encoding)
            .build(file);

        Ok(BufReader::new(transcoded))
    }
}

impl SubtitleCodec for CineCanvasCodec {
    fn name(&self) -> &'static str {
        "CineCanvas"
    }

    fn read_wildcards(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn write_wildcards(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn can_read(&self, path: &Path) -> bool {
        if !has_extension(path, "xml") {
            return false;
        }

        let Ok(reader) = Self::open_transcoded(path) else {
            return false;
        };

        xml::root_name(reader).is_some_and(|name| name == ROOT_ELEMENT)
    }

    fn read(&self, path: &Path, _frame_rate: FrameRate) -> Result<AssDocument, Error> {
        let reader = Self::open_transcoded(path)?;

        parse_cinecanvas(reader)
    }

    fn write(
        &self,
        document: &AssDocument,
        path: &Path,
        frame_rate: FrameRate,
    ) -> Result<(), Error> {
        write_cinecanvas(document, path, frame_rate, &self.settings)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .is_some_and(|ext| ext.to_str() == Some(extension))
}
