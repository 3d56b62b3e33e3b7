//! End-to-end tests for the engine facade over fake transports

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};

    use crate::config::EngineConfig;
    use crate::engine::Engine;
    use crate::history::HistoryStore;
    use crate::http::Fetcher;
    use crate::models::SearchServer;

    /// Serves canned listing pages for GETs and canned search bodies for
    /// POSTs, keyed by URL (POST keys carry the pattern).
    struct FakeServer {
        pages: HashMap<String, String>,
        searches: HashMap<(String, String), Value>,
    }

    impl Fetcher for FakeServer {
        fn get_text(&self, url: &str, _timeout: Duration) -> Result<String, String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| "HTTP error: 404".to_string())
        }

        fn post_json(&self, url: &str, payload: &Value, _timeout: Duration) -> Result<Value, String> {
            let pattern = payload["search"]["pattern"].as_str().unwrap_or("").to_string();
            Ok(self
                .searches
                .get(&(url.to_string(), pattern))
                .cloned()
                .unwrap_or_else(|| json!({ "search": [] })))
        }
    }

    fn engine(dir: &tempfile::TempDir, fetcher: FakeServer) -> Engine {
        let mut config = EngineConfig {
            search_servers: HashMap::new(),
            browse_roots: HashMap::new(),
        };
        config.search_servers.insert(
            "movies".to_string(),
            vec![
                SearchServer {
                    base_url: "http://a".to_string(),
                    share_name: "SHARE-A".to_string(),
                },
                SearchServer {
                    base_url: "http://b".to_string(),
                    share_name: "SHARE-B".to_string(),
                },
            ],
        );
        Engine::new(
            config,
            Arc::new(fetcher),
            HistoryStore::new(dir.path().join("history.json")),
        )
    }

    fn browse_fixture() -> FakeServer {
        let mut pages = HashMap::new();
        pages.insert(
            "http://srv/media/".to_string(),
            r#"
<a href="../">Parent Directory</a>
<a href="Season%201/">Season 1</a>
<a href="cover.jpg">cover.jpg</a>
<a href="The.Matrix.1999.1080p.BluRay.mkv">The.Matrix.1999.1080p.BluRay.mkv</a>
<a href="The.Matrix.1999.1080p.BluRay.srt">The.Matrix.1999.1080p.BluRay.srt</a>
<a href="notes.txt">notes.txt</a>
"#
            .to_string(),
        );
        pages.insert(
            "http://srv/media/Season%201/".to_string(),
            r#"<a href="episode1.mkv">e</a><a href="folder.jpg">f</a>"#.to_string(),
        );
        FakeServer {
            pages,
            searches: HashMap::new(),
        }
    }

    #[test]
    fn test_browse_returns_folders_then_videos() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(&dir, browse_fixture());

        let rows = engine.browse_directory("http://srv/media/");
        let labels: Vec<&str> = rows.iter().map(|r| r.entry.label.as_str()).collect();
        // Asset files feed the decoration and are not rows themselves
        assert_eq!(labels, vec!["Season 1", "The.Matrix.1999.1080p.BluRay.mkv"]);
    }

    #[test]
    fn test_browse_decorates_folders_with_art() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(&dir, browse_fixture());

        let rows = engine.browse_directory("http://srv/media/");
        let season = &rows[0];
        assert!(season.entry.is_folder);
        assert_eq!(
            season.folder_art.as_deref(),
            Some("http://srv/media/Season%201/folder.jpg")
        );
        assert!(season.meta.is_none());
    }

    #[test]
    fn test_browse_decorates_videos_with_meta_and_assets() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(&dir, browse_fixture());

        let rows = engine.browse_directory("http://srv/media/");
        let video = &rows[1];
        assert!(video.entry.is_video());

        let meta = video.meta.as_ref().unwrap();
        assert_eq!(meta.title, "The Matrix");
        assert_eq!(meta.year, Some(1999));
        assert_eq!(meta.quality, "1080p BluRay");

        assert_eq!(video.poster.as_deref(), Some("http://srv/media/cover.jpg"));
        assert_eq!(
            video.subtitles,
            vec!["http://srv/media/The.Matrix.1999.1080p.BluRay.srt".to_string()]
        );
        assert!(video.folder_art.is_none());
    }

    #[test]
    fn test_browse_unreachable_server_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(
            &dir,
            FakeServer {
                pages: HashMap::new(),
                searches: HashMap::new(),
            },
        );
        assert!(engine.browse_directory("http://down/media/").is_empty());
    }

    #[test]
    fn test_search_media_unions_dedups_and_enriches() {
        let dir = tempfile::tempdir().unwrap();
        let mut fetcher = browse_fixture();
        // Server A knows nothing; server B returns the same file twice
        fetcher.searches.insert(
            ("http://b/SHARE-B/".to_string(), "Dune".to_string()),
            json!({ "search": [
                { "href": "/SHARE-B/Dune.2021.2160p.WEB-DL.mkv", "size": 42 },
                { "href": "/SHARE-B/Dune.2021.2160p.WEB-DL.mkv", "size": 42 }
            ] }),
        );
        let engine = engine(&dir, fetcher);

        let results = engine.search_media("movies", "Dune");
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].result.full_url,
            "http://b/SHARE-B/Dune.2021.2160p.WEB-DL.mkv"
        );
        assert_eq!(results[0].meta.title, "Dune");
        assert_eq!(results[0].meta.year, Some(2021));
        assert_eq!(results[0].meta.quality, "4K WEB-DL");
    }

    #[test]
    fn test_search_media_unknown_category_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(&dir, browse_fixture());
        assert!(engine.search_media("documentaries", "Dune").is_empty());
    }

    #[test]
    fn test_history_roundtrip_through_facade() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(&dir, browse_fixture());

        engine.record_play("The Matrix", "http://srv/media/The.Matrix.mkv", "cover.jpg");
        engine.record_play("Dune", "http://b/SHARE-B/Dune.mkv", "");

        let history = engine.list_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].title, "Dune");

        engine.clear_history();
        assert!(engine.list_history().is_empty());
    }
}
