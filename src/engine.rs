//! Engine facade
//!
//! Ties the components together behind the three operations the
//! presentation layer consumes: browse a directory, search a category,
//! and manage the play history. Construction injects the fetch primitive
//! and configuration, so tests run against fakes.

use std::sync::Arc;

use crate::assets;
use crate::config::EngineConfig;
use crate::folder_art;
use crate::history::HistoryStore;
use crate::http::{Fetcher, UreqFetcher};
use crate::meta;
use crate::models::{EnrichedEntry, EnrichedSearchResult, Entry, HistoryEntry};
use crate::scraper;
use crate::search;

pub struct Engine {
    config: EngineConfig,
    fetcher: Arc<dyn Fetcher>,
    history: HistoryStore,
}

impl Engine {
    pub fn new(config: EngineConfig, fetcher: Arc<dyn Fetcher>, history: HistoryStore) -> Self {
        Self {
            config,
            fetcher,
            history,
        }
    }

    /// Production wiring: ureq transport, config and history under the
    /// per-install directories
    pub fn with_defaults() -> Self {
        Self::new(
            EngineConfig::load(),
            Arc::new(UreqFetcher),
            HistoryStore::default_location(),
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scrape one directory and decorate its entries: resolved art for
    /// folders; title/year/quality, the shared poster, and matched
    /// subtitles for videos. Asset files (images, subtitles) feed the
    /// decoration and are not returned as rows. Output is sorted
    /// folders-first, then case-insensitive label.
    pub fn browse_directory(&self, url: &str) -> Vec<EnrichedEntry> {
        let mut entries = scraper::fetch_listing(self.fetcher.as_ref(), url);

        // Poster pick depends on scrape order, so assets come before the
        // sort.
        let dir_assets = assets::collect_assets(&entries);
        scraper::sort_entries(&mut entries);

        let folders: Vec<Entry> = entries.iter().filter(|e| e.is_folder).cloned().collect();
        let art = folder_art::resolve_folder_art(Arc::clone(&self.fetcher), &folders);

        entries
            .into_iter()
            .filter_map(|entry| {
                if entry.is_folder {
                    Some(EnrichedEntry {
                        meta: None,
                        poster: None,
                        subtitles: Vec::new(),
                        folder_art: art.get(&entry.url).cloned(),
                        entry,
                    })
                } else if entry.is_video() {
                    Some(EnrichedEntry {
                        meta: Some(meta::media_meta(&entry.label)),
                        poster: dir_assets.poster.clone(),
                        subtitles: assets::subtitles_for(&entry, &dir_assets),
                        folder_art: None,
                        entry,
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Search a category across its configured servers, deduplicate by
    /// full URL preserving first-seen order, and decorate each hit. An
    /// unknown category resolves to an empty result.
    pub fn search_media(&self, category: &str, query: &str) -> Vec<EnrichedSearchResult> {
        let servers = self.config.servers_for(category);
        if servers.is_empty() {
            log::debug!("no servers configured for category '{}'", category);
            return Vec::new();
        }

        let results = search::search(&self.fetcher, servers, query);
        search::dedup_by_url(results)
            .into_iter()
            .map(|result| EnrichedSearchResult {
                meta: meta::media_meta(&result.label),
                result,
            })
            .collect()
    }

    pub fn record_play(&self, title: &str, url: &str, icon: &str) {
        self.history.record(title, url, icon);
    }

    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }
}
