//! flixdir - media discovery and search engine for autoindex-style HTTP
//! file servers.
//!
//! Scrapes plain directory listings into normalized entries, enriches raw
//! filenames with title/year/quality metadata, associates sibling posters
//! and subtitles with video files, aggregates free-text search across
//! several independent servers with a term-narrowing fallback, and keeps a
//! capped journal of recently played items.
//!
//! Every public operation degrades to an empty result on network, parse,
//! or storage failure; a single unreachable server never blocks the rest
//! of a multi-server aggregate.

pub mod assets;
pub mod config;
pub mod engine;
pub mod folder_art;
pub mod history;
pub mod http;
pub mod meta;
pub mod models;
pub mod pool;
pub mod scraper;
pub mod search;

#[cfg(test)]
mod engine_tests;
#[cfg(test)]
mod history_tests;

pub use engine::Engine;
pub use models::{
    EnrichedEntry, EnrichedSearchResult, Entry, HistoryEntry, MediaMeta, SearchResult,
    SearchServer,
};
