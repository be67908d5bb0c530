use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::process::StageError;

/// Find the JSON sidecar for a media file: a file in the same directory
/// whose name starts with the media file's full name (extension included)
/// and ends with `.json`. Takeout inserts suffixes between the two, e.g.
/// `photo.jpg.supplemental-metadata.json` or a duplicate marker, so this
/// is a prefix match rather than an exact one. When several candidates
/// share the prefix the first one the directory listing yields wins; the
/// export format does not specify which is correct.
pub fn find_sidecar(media: &Path) -> Result<PathBuf, StageError> {
    let (Some(dir), Some(name)) = (media.parent(), media.file_name().and_then(|s| s.to_str()))
    else {
        return Err(StageError::NoSidecar);
    };

    let entries = match dir.read_dir() {
        Ok(entries) => entries,
        Err(e) => {
            warn!("listing {} failed: {}", dir.display(), e);
            return Err(StageError::NoSidecar);
        }
    };

    for entry in entries.flatten() {
        let candidate = entry.path();
        if !candidate.is_file() {
            continue;
        }
        let Some(candidate_name) = candidate.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if candidate_name.starts_with(name) && candidate_name.ends_with(".json") {
            return Ok(candidate);
        }
    }

    Err(StageError::NoSidecar)
}

/// Read the capture instant from a sidecar file. The value lives at
/// `photoTakenTime.timestamp` as Unix epoch seconds, encoded either as a
/// number or as a string holding one.
pub fn capture_timestamp(sidecar: &Path) -> Result<DateTime<Utc>, StageError> {
    let content = std::fs::read_to_string(sidecar)
        .map_err(|e| StageError::Metadata(format!("reading {} failed: {e}", sidecar.display())))?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|e| StageError::Metadata(format!("malformed JSON: {e}")))?;

    let field = json
        .pointer("/photoTakenTime/timestamp")
        .ok_or_else(|| StageError::Metadata("photoTakenTime.timestamp missing".to_string()))?;

    let seconds = match field {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| StageError::Metadata(format!("timestamp is not epoch seconds: {field}")))?;

    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| StageError::Metadata(format!("timestamp out of range: {seconds}")))
}
