use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use filetime::FileTime;

use crate::process::StageError;

/// Set a file's timestamps to the capture instant. `set_file_times`
/// rewrites access and modification time in place; file content is never
/// touched.
pub fn set_capture_time(path: &Path, taken: DateTime<Utc>) -> Result<(), StageError> {
    let ft = FileTime::from_unix_time(taken.timestamp(), 0);
    filetime::set_file_times(path, ft, ft)
        .map_err(|e| StageError::Apply(format!("{}: {e}", path.display())))
}

/// Copy an already-corrected media file into the destination tree,
/// mirroring its path relative to the source root and overwriting any
/// existing file. `fs::copy` does not guarantee that timestamps survive
/// the copy, so the capture instant is re-applied to the target.
pub fn copy_to_destination(
    media: &Path,
    source_root: &Path,
    destination_root: &Path,
    taken: DateTime<Utc>,
) -> Result<PathBuf, StageError> {
    let relative = media.strip_prefix(source_root).map_err(|_| {
        StageError::Copy(format!("{} is outside the source tree", media.display()))
    })?;
    let target = destination_root.join(relative);

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StageError::Copy(format!("creating {} failed: {e}", parent.display())))?;
    }
    std::fs::copy(media, &target)
        .map_err(|e| StageError::Copy(format!("copy to {} failed: {e}", target.display())))?;

    set_capture_time(&target, taken).map_err(|e| StageError::Copy(e.to_string()))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn mtime_epoch(path: &Path) -> i64 {
        let meta = std::fs::metadata(path).unwrap();
        FileTime::from_last_modification_time(&meta).unix_seconds()
    }

    #[test]
    fn sets_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.jpg");
        std::fs::write(&file, b"x").unwrap();

        let taken = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        set_capture_time(&file, taken).unwrap();

        assert_eq!(mtime_epoch(&file), 1609459200);
    }

    #[test]
    fn apply_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.jpg");

        let taken = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            set_capture_time(&missing, taken),
            Err(StageError::Apply(_))
        ));
    }

    #[test]
    fn copy_mirrors_relative_path_and_keeps_time() {
        let source = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(source.path().join("album/2021")).unwrap();
        let media = source.path().join("album/2021/clip.mp4");
        std::fs::write(&media, b"frames").unwrap();

        let taken = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        let target = copy_to_destination(&media, source.path(), destination.path(), taken).unwrap();

        assert_eq!(target, destination.path().join("album/2021/clip.mp4"));
        assert_eq!(std::fs::read(&target).unwrap(), b"frames");
        assert_eq!(mtime_epoch(&target), taken.timestamp());
    }

    #[test]
    fn copy_overwrites_existing_target() {
        let source = tempfile::tempdir().unwrap();
        let destination = tempfile::tempdir().unwrap();
        let media = source.path().join("photo.jpg");
        std::fs::write(&media, b"new").unwrap();
        std::fs::write(destination.path().join("photo.jpg"), b"old").unwrap();

        let taken = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let target = copy_to_destination(&media, source.path(), destination.path(), taken).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }
}
