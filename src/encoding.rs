use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::errors::Error;

pub(crate) fn detect_file_encoding(
    path: &Path,
    byte_limit: Option<usize>,
) -> Result<&'static Encoding, Error> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut detector = EncodingDetector::new();

    let mut consumed = 0;
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        detector.feed(buffer, false);
        consumed += buffer.len();
        let length = buffer.len();
        reader.consume(length);

        if let Some(limit) = byte_limit {
            if consumed >= limit && detector.guess_assess(None, true).1 {
                break;
            }
        }
    }

    Ok(detector.guess(None, true))
}
