//! Filename metadata extraction
//!
//! Pure functions turning raw release-style filenames into a display
//! title, an optional year, and a quality tag. None of them can fail:
//! a filename that defeats the heuristics passes through unchanged.

use crate::models::{MediaMeta, VIDEO_EXTS};

/// URL-decode and normalize a filename: strip a trailing video extension
/// (case-insensitive), replace dot and underscore separators with spaces,
/// trim. On a decode error the input is used as-is.
pub fn clean_title(filename: &str) -> String {
    let decoded = match urlencoding::decode(filename) {
        Ok(s) => s.into_owned(),
        Err(_) => filename.to_string(),
    };
    strip_video_ext(&decoded)
        .replace('.', " ")
        .replace('_', " ")
        .trim()
        .to_string()
}

fn strip_video_ext(name: &str) -> &str {
    let bytes = name.as_bytes();
    for ext in VIDEO_EXTS {
        if bytes.len() > ext.len() {
            let tail = &bytes[bytes.len() - ext.len() - 1..];
            if tail[0] == b'.' && tail[1..].eq_ignore_ascii_case(ext.as_bytes()) {
                return &name[..name.len() - ext.len() - 1];
            }
        }
    }
    name
}

/// Cleaned title plus the first standalone 19xx/20xx token. When a year
/// is found, the title is everything before its first occurrence with
/// surrounding punctuation trimmed; a second year-like token stays out of
/// both fields.
pub fn extract_meta(filename: &str) -> (String, Option<i32>) {
    let name = clean_title(filename);
    match find_year(&name) {
        Some((idx, year)) => {
            let title = name[..idx]
                .trim_matches(|c: char| " ()[]-".contains(c))
                .to_string();
            (title, Some(year))
        }
        None => (name, None),
    }
}

/// First standalone 4-digit 19xx/20xx token as (byte offset, value).
/// Standalone means no word character (alphanumeric or underscore) on
/// either side.
fn find_year(name: &str) -> Option<(usize, i32)> {
    let bytes = name.as_bytes();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';

    let mut i = 0;
    while i + 4 <= bytes.len() {
        let window = &bytes[i..i + 4];
        if (window.starts_with(b"19") || window.starts_with(b"20"))
            && window.iter().all(|b| b.is_ascii_digit())
            && (i == 0 || !is_word(bytes[i - 1]))
            && (i + 4 == bytes.len() || !is_word(bytes[i + 4]))
        {
            let year = std::str::from_utf8(window).ok()?.parse().ok()?;
            return Some((i, year));
        }
        i += 1;
    }
    None
}

/// Quality tag: resolution label (first hit wins, "HD" default) plus an
/// optional source label, joined with a space.
pub fn extract_quality(filename: &str) -> String {
    let name = filename.to_lowercase();

    let resolution = if name.contains("2160p") || name.contains("4k") {
        "4K"
    } else if name.contains("1080p") {
        "1080p"
    } else if name.contains("720p") {
        "720p"
    } else if name.contains("480p") {
        "480p"
    } else {
        "HD"
    };

    let source = if name.contains("imax") {
        "IMAX"
    } else if name.contains("hmax") {
        "HMAX"
    } else if name.contains("bluray") || name.contains("blu-ray") {
        "BluRay"
    } else if name.contains("web-dl") || name.contains("webdl") {
        "WEB-DL"
    } else if name.contains("webrip") {
        "WEBRip"
    } else if name.contains("hdrip") {
        "HDRip"
    } else if name.contains("dvdrip") {
        "DVDRip"
    } else {
        ""
    };

    format!("{} {}", resolution, source).trim().to_string()
}

/// Full derived metadata for one filename
pub fn media_meta(filename: &str) -> MediaMeta {
    let (title, year) = extract_meta(filename);
    MediaMeta {
        title,
        year,
        quality: extract_quality(filename),
    }
}
