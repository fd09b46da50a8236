//! Media descriptors consumed from the media library

use serde::{Deserialize, Serialize};

const MODEL_EXTENSIONS: &[&str] = &["gltf", "glb", "obj", "fbx", "stl", "ply", "3ds", "dae"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "gif"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

/// A media item handed to the stage by the library: `{id, url|thumbnail, type, name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// MIME type, may be empty when only the file name is known
    #[serde(rename = "type", default)]
    pub media_type: String,
}

impl MediaDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            thumbnail: None,
            media_type: String::new(),
        }
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Source to load pixels from: the url, or the thumbnail if no url.
    pub fn source(&self) -> Option<&str> {
        if !self.url.is_empty() {
            Some(&self.url)
        } else {
            self.thumbnail.as_deref()
        }
    }

    /// Lowercased file extension of the name, falling back to the url.
    pub fn extension(&self) -> Option<String> {
        let from = |s: &str| {
            let file = s.rsplit(['/', '\\']).next()?;
            let (_, ext) = file.rsplit_once('.')?;
            (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
        };
        from(&self.name).or_else(|| from(&self.url))
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::classify(&self.media_type, self.extension().as_deref())
    }
}

/// How a media item is represented in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    /// Decoded frame stream (videos and animated GIFs)
    Video,
    Audio,
    Model,
    Other,
}

impl MediaKind {
    pub fn classify(mime: &str, extension: Option<&str>) -> MediaKind {
        let mime = mime.to_ascii_lowercase();
        let ext = extension.unwrap_or("");

        if mime.starts_with("model/") || MODEL_EXTENSIONS.contains(&ext) {
            MediaKind::Model
        } else if mime.starts_with("video/") || mime == "image/gif" || VIDEO_EXTENSIONS.contains(&ext) {
            MediaKind::Video
        } else if mime.starts_with("image/") || IMAGE_EXTENSIONS.contains(&ext) {
            MediaKind::Image
        } else if mime.starts_with("audio/") || AUDIO_EXTENSIONS.contains(&ext) {
            MediaKind::Audio
        } else {
            MediaKind::Other
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Model => "model",
            MediaKind::Other => "other",
        }
    }
}
