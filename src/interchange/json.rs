//! JSON output for station records.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{ExtractError, StationRecord};

const INDENT: &[u8] = b"    ";

fn serialize_records<W: Write>(records: &[StationRecord], writer: W) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    records.serialize(&mut ser)
}

/// Serialize records as a pretty-printed JSON array (4-space indent).
///
/// Non-ASCII text is written as UTF-8, not as `\u` escapes.
pub fn to_json_string(records: &[StationRecord]) -> Result<String, ExtractError> {
    let mut out = Vec::new();
    serialize_records(records, &mut out)?;
    String::from_utf8(out).map_err(|e| ExtractError::Json(serde::ser::Error::custom(e)))
}

/// Write records to `path`, replacing any existing file.
pub fn write_json(records: &[StationRecord], path: impl AsRef<Path>) -> Result<(), ExtractError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ExtractError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serialize_records(records, &mut writer).map_err(|e| {
        if e.is_io() {
            ExtractError::io(path, e.into())
        } else {
            ExtractError::Json(e)
        }
    })?;
    writer.flush().map_err(|e| ExtractError::io(path, e))?;
    tracing::info!(path = %path.display(), count = records.len(), "wrote station records");
    Ok(())
}
