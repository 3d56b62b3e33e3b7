//! Folder art discovery
//!
//! Probes each folder of a listing for an embedded preview image: the
//! first image href on the folder's own listing page. Probes fan out
//! over the bounded pool so one slow server cannot stall the scan.

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use url::Url;

use crate::http::{Fetcher, LISTING_TIMEOUT};
use crate::models::{has_ext, Entry, IMAGE_EXTS};
use crate::pool;
use crate::scraper::scan_hrefs;

/// Default concurrency cap for art probes, bounding load on the remote
/// file servers
pub const MAX_ART_WORKERS: usize = 20;

/// Fetch one folder's listing and return its first image link, resolved
/// against the folder URL. Any failure reads as "no art".
pub fn probe_folder_art(fetcher: &dyn Fetcher, folder_url: &str) -> Option<String> {
    let body = fetcher.get_text(folder_url, LISTING_TIMEOUT).ok()?;
    first_image_href(folder_url, &body)
}

/// First href on the page ending in a known image extension
pub(crate) fn first_image_href(folder_url: &str, body: &str) -> Option<String> {
    let base = Url::parse(folder_url).ok()?;
    scan_hrefs(body)
        .into_iter()
        .find(|href| has_ext(href, IMAGE_EXTS))
        .and_then(|href| base.join(href).ok())
        .map(String::from)
}

/// Fan art probes out over the pool, yielding (folder url, art url)
/// pairs as they complete. Dropping the receiver between completions
/// stops the remaining work; results of probes already in flight are
/// discarded.
pub fn resolve_streaming(
    fetcher: Arc<dyn Fetcher>,
    folders: &[Entry],
    workers: usize,
) -> Receiver<(String, Option<String>)> {
    let urls: Vec<String> = folders.iter().map(|folder| folder.url.clone()).collect();
    pool::map_bounded(urls, workers, move |url| {
        let art = probe_folder_art(fetcher.as_ref(), &url);
        (url, art)
    })
}

/// Collecting form: folder url → art url for every folder with a hit.
/// Folders without art are simply absent from the map.
pub fn resolve_folder_art(fetcher: Arc<dyn Fetcher>, folders: &[Entry]) -> HashMap<String, String> {
    let mut art = HashMap::new();
    for (url, image) in resolve_streaming(fetcher, folders, MAX_ART_WORKERS) {
        if let Some(image) = image {
            art.insert(url, image);
        }
    }
    art
}
