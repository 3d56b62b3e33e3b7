//! Engine configuration
//!
//! A single immutable value constructed once at startup: the category →
//! server tables for search and the named starting URLs for browsing.
//! An optional JSON file under the per-install config directory overrides
//! the built-in defaults; a missing or unreadable file falls back to them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::models::SearchServer;

/// A named starting directory for the browse mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseRoot {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Category (e.g. "movies", "series") → ordered server set
    #[serde(default)]
    pub search_servers: HashMap<String, Vec<SearchServer>>,
    /// Category → named starting URLs for the top-level menu
    #[serde(default)]
    pub browse_roots: HashMap<String, Vec<BrowseRoot>>,
}

impl EngineConfig {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("flixdir");
        fs::create_dir_all(&path).ok();
        path.push("servers.json");
        path
    }

    /// Load from the per-install config file, falling back to the
    /// built-in server tables.
    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(config) = serde_json::from_str(&content) {
                    return config;
                }
                log::warn!("ignoring malformed config at {}", path.display());
            }
        }

        Self::default()
    }

    pub fn save(&self) {
        let path = Self::config_path();
        if let Ok(content) = serde_json::to_string_pretty(self) {
            let _ = fs::write(path, content);
        }
    }

    /// Ordered server set for a category; unknown categories resolve to
    /// an empty set, never an error.
    pub fn servers_for(&self, category: &str) -> &[SearchServer] {
        self.search_servers
            .get(category)
            .map(|servers| servers.as_slice())
            .unwrap_or(&[])
    }

    pub fn browse_roots_for(&self, category: &str) -> &[BrowseRoot] {
        self.browse_roots
            .get(category)
            .map(|roots| roots.as_slice())
            .unwrap_or(&[])
    }
}

fn server(base_url: &str, share_name: &str) -> SearchServer {
    SearchServer {
        base_url: base_url.to_string(),
        share_name: share_name.to_string(),
    }
}

fn root(name: &str, url: &str) -> BrowseRoot {
    BrowseRoot {
        name: name.to_string(),
        url: url.to_string(),
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut search_servers = HashMap::new();
        search_servers.insert(
            "movies".to_string(),
            vec![
                server("http://172.16.50.14", "DHAKA-FLIX-14"),
                server("http://172.16.50.7", "DHAKA-FLIX-7"),
            ],
        );
        search_servers.insert(
            "series".to_string(),
            vec![
                server("http://172.16.50.12", "DHAKA-FLIX-12"),
                server("http://172.16.50.14", "DHAKA-FLIX-14"),
                server("http://172.16.50.9", "DHAKA-FLIX-9"),
            ],
        );

        let mut browse_roots = HashMap::new();
        browse_roots.insert(
            "movies".to_string(),
            vec![
                root("English Movies - 720p", "http://172.16.50.7/DHAKA-FLIX-7/English%20Movies/"),
                root("English Movies - 1080p", "http://172.16.50.14/DHAKA-FLIX-14/English%20Movies%20%281080p%29/"),
                root("Hindi Movies", "http://172.16.50.14/DHAKA-FLIX-14/Hindi%20Movies/"),
                root("South Indian Movies", "http://172.16.50.14/DHAKA-FLIX-14/SOUTH%20INDIAN%20MOVIES/South%20Movies/"),
                root("South Indian Hindi Dubbed", "http://172.16.50.14/DHAKA-FLIX-14/SOUTH%20INDIAN%20MOVIES/Hindi%20Dubbed/"),
                root("West Bengal Bangla Movies", "http://172.16.50.7/DHAKA-FLIX-7/Kolkata%20Bangla%20Movies/"),
                root("Animation Movies", "http://172.16.50.14/DHAKA-FLIX-14/Animation%20Movies/"),
                root("Animation Movies - 1080p", "http://172.16.50.14/DHAKA-FLIX-14/Animation%20Movies%20%281080p%29/"),
                root("Foreign Language Movies", "http://172.16.50.7/DHAKA-FLIX-7/Foreign%20Language%20Movies/"),
                root("IMDB Top-250 Movies", "http://172.16.50.14/DHAKA-FLIX-14/IMDb%20Top-250%20Movies/"),
            ],
        );
        browse_roots.insert(
            "series".to_string(),
            vec![
                root("TV & Web Series", "http://172.16.50.12/DHAKA-FLIX-12/TV-WEB-Series/"),
                root("Korean TV & Web Series", "http://172.16.50.14/DHAKA-FLIX-14/KOREAN%20TV%20%26%20WEB%20Series/"),
                root("Anime & Cartoon Series", "http://172.16.50.9/DHAKA-FLIX-9/Anime%20%26%20Cartoon%20TV%20Series/"),
                root("Documentary", "http://172.16.50.9/DHAKA-FLIX-9/Documentary/"),
                root("WWE & AEW Wrestling", "http://172.16.50.9/DHAKA-FLIX-9/WWE%20%26%20AEW%20Wrestling/"),
                root("Award & TV Shows", "http://172.16.50.9/DHAKA-FLIX-9/Awards%20%26%20TV%20Shows/"),
            ],
        );

        Self {
            search_servers,
            browse_roots,
        }
    }
}
