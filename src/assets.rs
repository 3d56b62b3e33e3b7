//! Sibling asset association
//!
//! Pure computation over one directory's entry list: the first image
//! file (by scrape order) becomes the shared poster for every video in
//! the directory, and subtitle-format files become candidates matched to
//! videos by filename stem.

use crate::models::{has_ext, Entry, IMAGE_EXTS, SUBTITLE_EXTS};

/// Shared assets found in one directory listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryAssets {
    /// First image file by scrape order, shared by every video
    pub poster: Option<String>,
    /// Subtitle candidate URLs
    pub subtitles: Vec<String>,
}

/// Scan a directory's entries for shared assets. Entries must be in
/// scrape order; the poster pick depends on it.
pub fn collect_assets(entries: &[Entry]) -> DirectoryAssets {
    let mut assets = DirectoryAssets::default();
    for entry in entries.iter().filter(|entry| !entry.is_folder) {
        if assets.poster.is_none() && has_ext(&entry.label, IMAGE_EXTS) {
            assets.poster = Some(entry.url.clone());
        }
        if has_ext(&entry.url, SUBTITLE_EXTS) {
            assets.subtitles.push(entry.url.clone());
        }
    }
    assets
}

/// Subtitles for one video: every candidate whose decoded URL contains
/// the video's filename stem, or the lone candidate when the directory
/// has exactly one. The single-candidate fallback is a deliberate
/// heuristic; in a multi-video directory a loosely named subtitle file
/// attaches to every video.
pub fn subtitles_for(video: &Entry, assets: &DirectoryAssets) -> Vec<String> {
    let stem = file_stem(&video.label).to_lowercase();
    assets
        .subtitles
        .iter()
        .filter(|sub| {
            if assets.subtitles.len() == 1 {
                return true;
            }
            let decoded = match urlencoding::decode(sub) {
                Ok(s) => s.into_owned(),
                Err(_) => sub.to_string(),
            };
            decoded.to_lowercase().contains(&stem)
        })
        .cloned()
        .collect()
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}
