use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::report::RunReport;
use crate::{apply, discover, sidecar};

/// Per-file failure, tagged by the pipeline stage that produced it. Any
/// variant short-circuits the file straight to a Failure report row; the
/// batch itself keeps going.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("no metadata file found")]
    NoSidecar,
    #[error("could not extract capture date: {0}")]
    Metadata(String),
    #[error("applying timestamps failed: {0}")]
    Apply(String),
    #[error("copy failed: {0}")]
    Copy(String),
}

/// Run the whole batch: discover media files under `source`, push each
/// one through the per-file pipeline and write the CSV report into
/// `destination`. Files are processed strictly one at a time; one report
/// row per discovered file.
pub fn start(source: &Path, destination: &Path) -> Result<()> {
    println!("Scanning for media files...");
    let media_files = discover::media_files(source);
    println!("Found {} media files.", media_files.len());

    let mut report = RunReport::create(destination)?;

    for media in &media_files {
        let name = media
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| media.display().to_string());
        info!("Processing: {}", name);

        match process_file(media, source, destination) {
            Ok(_) => report.record_success(&name)?,
            Err(e) => report.record_failure(&name, &e.to_string())?,
        }
    }

    let summary = report.finish()?;
    println!(
        "Processing complete. {} files, {} succeeded, {} failed. Report: {}",
        media_files.len(),
        summary.success,
        summary.failure,
        summary.report_path.display()
    );

    Ok(())
}

/// One file through the state machine: sidecar search, timestamp parse,
/// apply, copy. No retry and no rollback of already-applied metadata.
fn process_file(
    media: &Path,
    source_root: &Path,
    destination_root: &Path,
) -> Result<DateTime<Utc>, StageError> {
    let sidecar_path = sidecar::find_sidecar(media)?;
    info!("metadata file: {}", sidecar_path.display());

    let taken = sidecar::capture_timestamp(&sidecar_path)?;
    info!("applying capture date: {}", taken);

    apply::set_capture_time(media, taken)?;

    let target = apply::copy_to_destination(media, source_root, destination_root, taken)?;
    info!("copied to {}", target.display());

    Ok(taken)
}
