//! Reading transcripts from plain-text files or stdin

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::{MeetnotesError, Result};

/// Read a whole transcript into memory. `-` reads stdin.
///
/// Input larger than `max_bytes`, non-UTF-8 input and blank input are all
/// rejected as validation errors.
pub fn read_transcript(path: &Path, max_bytes: usize) -> Result<String> {
    let bytes = if path == Path::new("-") {
        read_limited(io::stdin().lock(), max_bytes, "stdin")?
    } else {
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                MeetnotesError::Validation(format!("Transcript file not found: {}", path.display()))
            } else {
                MeetnotesError::Io(e)
            }
        })?;
        read_limited(file, max_bytes, &path.display().to_string())?
    };

    let text = String::from_utf8(bytes).map_err(|_| {
        MeetnotesError::Validation(format!(
            "Transcript {} is not a plain-text (UTF-8) file",
            path.display()
        ))
    })?;

    if text.trim().is_empty() {
        return Err(MeetnotesError::Validation(
            "Transcript is required".to_string(),
        ));
    }

    Ok(text)
}

fn read_limited(reader: impl Read, max_bytes: usize, source: &str) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)?;

    if bytes.len() > max_bytes {
        return Err(MeetnotesError::Validation(format!(
            "Transcript {} exceeds the {} byte limit",
            source, max_bytes
        )));
    }
    Ok(bytes)
}
