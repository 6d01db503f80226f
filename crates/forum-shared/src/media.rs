use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_MIME;

/// Display class of an attachment, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Unrecognized,
}

impl MediaKind {
    /// Classify by MIME prefix. Anything outside image/video/audio is
    /// accepted but has no preview.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime.starts_with("audio/") {
            Self::Audio
        } else {
            Self::Unrecognized
        }
    }

    pub fn has_preview(self) -> bool {
        self != Self::Unrecognized
    }
}

/// Guess a MIME type from a file extension.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => FALLBACK_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_prefix() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/webm"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("audio/ogg"), MediaKind::Audio);
        assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Unrecognized);
        // prefix match only, no sniffing of the subtype
        assert_eq!(MediaKind::from_mime("imagex/png"), MediaKind::Unrecognized);
        assert!(!MediaKind::Unrecognized.has_preview());
    }

    #[test]
    fn guesses_from_extension() {
        assert_eq!(guess_mime(Path::new("cat.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("clip.webm")), "video/webm");
        assert_eq!(guess_mime(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(guess_mime(Path::new("notes")), FALLBACK_MIME);
    }
}
