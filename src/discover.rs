use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions (lower-cased) of the media formats Takeout exports.
pub fn is_media_file(path: &Path) -> bool {
    let ext = path.extension().and_then(|s| s.to_str());
    let Some(ext) = ext else { return false };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        // images
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "tif" | "webp" | "heic" | "heif"
        // audio
        | "mp3" | "wav" | "aac" | "m4a" | "flac" | "ogg" | "opus" | "amr" | "aiff" | "mid"
        | "midi"
        // video
        | "mp4" | "mov" | "avi" | "mkv" | "wmv" | "flv" | "webm" | "m4v" | "3gp" | "3g2"
    )
}

/// All media files anywhere under `root`, in traversal order.
pub fn media_files(root: &Path) -> Vec<PathBuf> {
    let mut files = vec![];
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_media_file(path) {
            debug!("skipping file: {}", path.display());
            continue;
        }
        files.push(path.to_path_buf());
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter() {
        assert!(is_media_file(Path::new("a/b/photo.jpg")));
        assert!(is_media_file(Path::new("photo.JPG")));
        assert!(is_media_file(Path::new("clip.3gp")));
        assert!(!is_media_file(Path::new("photo.jpg.json")));
        assert!(!is_media_file(Path::new("notes.txt")));
        assert!(!is_media_file(Path::new("no_extension")));
    }

    #[test]
    fn recursive_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("album/2021")).unwrap();
        std::fs::write(root.join("photo.jpg"), b"x").unwrap();
        std::fs::write(root.join("photo.jpg.json"), b"{}").unwrap();
        std::fs::write(root.join("album/song.MP3"), b"x").unwrap();
        std::fs::write(root.join("album/2021/clip.mp4"), b"x").unwrap();
        std::fs::write(root.join("album/readme.txt"), b"x").unwrap();

        let mut names: Vec<_> = media_files(root)
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["clip.mp4", "photo.jpg", "song.MP3"]);
    }
}
