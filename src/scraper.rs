//! Directory listing scraper
//!
//! Turns one autoindex-style HTML page into a normalized entry list.
//! The pages are flat generator output, so hrefs are pulled with a
//! lightweight scan instead of a markup parser.

use url::Url;

use crate::http::{Fetcher, LISTING_TIMEOUT};
use crate::models::{has_ext, Entry, VIDEO_EXTS};

/// Link names emitted by index generators themselves, never real content
const INDEXER_ARTIFACTS: &[&str] = &["_h5ai", "h5ai", "h51i", "parent directory"];

/// Fetch one listing page and return its child entries in scrape order.
/// A network error or non-200 response yields an empty list.
pub fn fetch_listing(fetcher: &dyn Fetcher, url: &str) -> Vec<Entry> {
    match fetcher.get_text(url, LISTING_TIMEOUT) {
        Ok(body) => parse_listing(url, &body),
        Err(e) => {
            log::debug!("listing fetch failed for {}: {}", url, e);
            Vec::new()
        }
    }
}

/// Scan an already-fetched listing page for child entries. Pure; output
/// order follows the page. Callers needing a stable order sort with
/// [`sort_entries`].
pub fn parse_listing(base_url: &str, body: &str) -> Vec<Entry> {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("bad listing base url {}: {}", base_url, e);
            return Vec::new();
        }
    };

    scan_hrefs(body)
        .into_iter()
        .filter_map(|href| entry_from_href(&base, href))
        .collect()
}

fn entry_from_href(base: &Url, href: &str) -> Option<Entry> {
    // Navigation and sort links, not children
    if href.starts_with('?') || href.starts_with('#') {
        return None;
    }
    if matches!(href, "/" | "../" | "./" | "Parent Directory") {
        return None;
    }
    if href.contains("sort_by") || href.contains("_h5ai") {
        return None;
    }

    let decoded = match urlencoding::decode(href) {
        Ok(s) => s.into_owned(),
        Err(_) => href.to_string(),
    };
    let trimmed = decoded.trim_end_matches('/');
    let label = trimmed.rsplit('/').next().unwrap_or(trimmed);
    if label.is_empty() {
        return None;
    }
    if INDEXER_ARTIFACTS.contains(&label.to_lowercase().as_str()) {
        return None;
    }

    let full_url = base.join(href).ok()?;

    // Trailing separator marks a folder, but some generators emit one on
    // file names too; a video extension overrides the classification.
    let mut is_folder = href.ends_with('/');
    if is_folder && has_ext(full_url.as_str(), VIDEO_EXTS) {
        is_folder = false;
    }

    Some(Entry {
        label: label.to_string(),
        url: full_url.into(),
        is_folder,
    })
}

/// Stable browse order: folders first, then case-insensitive label
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.is_folder
            .cmp(&a.is_folder)
            .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
    });
}

/// Every href attribute value on the page, double- or single-quoted
pub(crate) fn scan_hrefs(body: &str) -> Vec<&str> {
    let mut hrefs = Vec::new();
    let mut rest = body;

    while let Some(at) = find_ignore_case(rest, "href=") {
        rest = &rest[at + 5..];
        let quote = match rest.as_bytes().first() {
            Some(b'"') => '"',
            Some(b'\'') => '\'',
            _ => continue,
        };
        match rest[1..].find(quote) {
            Some(end) => {
                hrefs.push(&rest[1..1 + end]);
                rest = &rest[1 + end + 1..];
            }
            None => break,
        }
    }

    hrefs
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.len() > h.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}
