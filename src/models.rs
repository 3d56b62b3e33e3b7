//! Data models for the flixdir engine

use serde::{Deserialize, Serialize};

/// Extensions treated as video files, both for entry classification and
/// for search result filtering.
pub const VIDEO_EXTS: &[&str] = &["mkv", "mp4", "avi", "flv", "m4v"];

/// Extensions treated as subtitle files when associating directory assets.
pub const SUBTITLE_EXTS: &[&str] = &["srt", "ass", "sub", "smi", "vtt"];

/// Extensions treated as images for posters and folder art.
pub const IMAGE_EXTS: &[&str] = &["jpg", "png", "jpeg"];

/// Case-insensitive check for a trailing `.ext` suffix. A trailing path
/// separator is ignored, since some directory generators emit one even
/// for plain files.
pub fn has_ext(name: &str, exts: &[&str]) -> bool {
    let name = name.trim_end_matches('/');
    let bytes = name.as_bytes();
    exts.iter().any(|ext| {
        bytes.len() > ext.len() && {
            let tail = &bytes[bytes.len() - ext.len() - 1..];
            tail[0] == b'.' && tail[1..].eq_ignore_ascii_case(ext.as_bytes())
        }
    })
}

/// One child of a directory listing. Built per scrape call, never
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Decoded display name (final path segment)
    pub label: String,
    /// Absolute URL, resolved against the listing page
    pub url: String,
    pub is_folder: bool,
}

impl Entry {
    /// A non-folder entry with a recognized video extension
    pub fn is_video(&self) -> bool {
        !self.is_folder && has_ext(&self.url, VIDEO_EXTS)
    }
}

/// Static configuration for one searchable file server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchServer {
    pub base_url: String,
    pub share_name: String,
}

/// One hit from a server-side index search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Server-relative href as returned by the index API
    pub href: String,
    /// `base_url` + `href`; result identity is keyed by this field
    pub full_url: String,
    /// Decoded basename
    pub label: String,
    pub size: Option<u64>,
}

/// Metadata derived from a filename. Computed on demand, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMeta {
    /// Punctuation-normalized title
    pub title: String,
    /// First standalone 19xx/20xx token, if any
    pub year: Option<i32>,
    /// Resolution label plus source label, e.g. "1080p BluRay"
    pub quality: String,
}

impl MediaMeta {
    /// "{title} ({year})", year omitted when absent
    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// Persisted play-journal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub url: String,
    pub icon: String,
    /// Unix seconds at the time of the play
    pub time: i64,
}

/// Browse output row: a folder or video entry plus its derived decoration
#[derive(Debug, Clone)]
pub struct EnrichedEntry {
    pub entry: Entry,
    /// Derived title/year/quality (videos only)
    pub meta: Option<MediaMeta>,
    /// Shared directory poster (videos only)
    pub poster: Option<String>,
    /// Associated subtitle URLs (videos only)
    pub subtitles: Vec<String>,
    /// Embedded preview image (folders only)
    pub folder_art: Option<String>,
}

/// Search output row: one deduplicated hit plus its derived metadata
#[derive(Debug, Clone)]
pub struct EnrichedSearchResult {
    pub result: SearchResult,
    pub meta: MediaMeta,
}
