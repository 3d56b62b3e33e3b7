//! Tests for the playback history store

#[cfg(test)]
mod tests {
    use crate::history::{HistoryStore, HISTORY_CAP};

    fn store(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[test]
    fn test_list_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).list().is_empty());
    }

    #[test]
    fn test_record_and_list_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);

        history.record("First", "http://srv/a.mkv", "a.jpg");
        history.record("Second", "http://srv/b.mkv", "b.jpg");

        let entries = history.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Second");
        assert_eq!(entries[1].title, "First");
        assert_eq!(entries[0].icon, "b.jpg");
        assert!(entries[0].time > 0);
    }

    #[test]
    fn test_replay_moves_entry_to_front_with_latest_title() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);

        history.record("Old Title", "http://srv/a.mkv", "a.jpg");
        history.record("Other", "http://srv/b.mkv", "b.jpg");
        history.record("New Title", "http://srv/a.mkv", "a.jpg");

        let entries = history.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "New Title");
        assert_eq!(entries[0].url, "http://srv/a.mkv");
        assert_eq!(entries[1].title, "Other");
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);

        for i in 0..=HISTORY_CAP {
            history.record(&format!("Title {}", i), &format!("http://srv/{}.mkv", i), "");
        }

        let entries = history.list();
        assert_eq!(entries.len(), HISTORY_CAP);
        // The very first recorded url fell off the end
        assert!(!entries.iter().any(|e| e.url == "http://srv/0.mkv"));
        assert_eq!(entries[0].url, format!("http://srv/{}.mkv", HISTORY_CAP));
    }

    #[test]
    fn test_clear_removes_store() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);

        history.record("Title", "http://srv/a.mkv", "");
        assert_eq!(history.list().len(), 1);

        history.clear();
        assert!(history.list().is_empty());
        assert!(!history.path().exists());

        // Clearing an already-empty store is fine
        history.clear();
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_and_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);

        std::fs::write(history.path(), "{ not json").unwrap();
        assert!(history.list().is_empty());

        // Recording on top of corruption starts a fresh journal
        history.record("Title", "http://srv/a.mkv", "");
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn test_persisted_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let history = store(&dir);
        history.record("Title", "http://srv/a.mkv", "icon.png");

        let raw = std::fs::read_to_string(history.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &parsed.as_array().unwrap()[0];
        assert_eq!(record["title"], "Title");
        assert_eq!(record["url"], "http://srv/a.mkv");
        assert_eq!(record["icon"], "icon.png");
        assert!(record["time"].is_i64());
    }
}
