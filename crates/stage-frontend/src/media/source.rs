//! Locating and reading media bytes

use std::path::{Path, PathBuf};

use stage_core::{MediaDescriptor, NodeId};
use stage_editor::LoadError;

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "stl" => "model/stl",
        "obj" => "model/obj",
        "gltf" => "model/gltf+json",
        "glb" => "model/gltf-binary",
        _ => "",
    }
}

/// Descriptor for a local file dropped onto the stage.
pub fn descriptor_from_path(path: &Path) -> MediaDescriptor {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    MediaDescriptor::new(NodeId::generate("media").to_string(), name, path.display().to_string())
        .with_type(mime_for_extension(&extension))
}

/// Local file behind a descriptor's url (or thumbnail).
///
/// Plain paths and `file://` urls are accepted. Remote and inline sources
/// are reported as unsupported.
pub fn resolve_path(media: &MediaDescriptor) -> Result<PathBuf, LoadError> {
    let source = media
        .source()
        .ok_or_else(|| LoadError::MissingSource(media.id.clone()))?;
    if let Some(path) = source.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if source.contains("://") || source.starts_with("data:") {
        return Err(LoadError::Unsupported(source.to_string()));
    }
    Ok(PathBuf::from(source))
}

/// Reads the whole source file.
pub fn read_source(media: &MediaDescriptor) -> Result<(PathBuf, Vec<u8>), LoadError> {
    let path = resolve_path(media)?;
    let bytes = std::fs::read(&path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok((path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_and_plain_path() {
        let media = MediaDescriptor::new("a", "a.png", "file:///tmp/a.png");
        assert_eq!(resolve_path(&media).unwrap(), PathBuf::from("/tmp/a.png"));
        let media = MediaDescriptor::new("b", "b.png", "assets/b.png");
        assert_eq!(resolve_path(&media).unwrap(), PathBuf::from("assets/b.png"));
    }

    #[test]
    fn test_thumbnail_fallback_and_missing_source() {
        let media = MediaDescriptor::new("c", "c.png", "").with_thumbnail("thumbs/c.png");
        assert_eq!(resolve_path(&media).unwrap(), PathBuf::from("thumbs/c.png"));
        let media = MediaDescriptor::new("d", "d.png", "");
        assert!(matches!(resolve_path(&media), Err(LoadError::MissingSource(_))));
    }

    #[test]
    fn test_remote_sources_are_unsupported() {
        let media = MediaDescriptor::new("e", "e.png", "https://example.com/e.png");
        assert!(matches!(resolve_path(&media), Err(LoadError::Unsupported(_))));
    }

    #[test]
    fn test_descriptor_from_path() {
        let media = descriptor_from_path(Path::new("/data/Clip.GIF"));
        assert_eq!(media.name, "Clip.GIF");
        assert_eq!(media.media_type, "image/gif");
        assert_eq!(media.kind(), stage_core::MediaKind::Video);
        assert!(media.id.starts_with("media-"));

        let media = descriptor_from_path(Path::new("notes.txt"));
        assert_eq!(media.kind(), stage_core::MediaKind::Other);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let media = MediaDescriptor::new("f", "f.png", "/nonexistent/media-stage/f.png");
        assert!(matches!(read_source(&media), Err(LoadError::Io { .. })));
    }
}
