//! HTTP fetch primitives
//!
//! The engine runs on two blocking primitives: GET a page as text and
//! POST a JSON payload. Production wiring goes through ureq with one
//! agent per request; tests substitute canned responses.

use std::time::Duration;

use serde_json::Value;

/// Short timeout for listing fetches and folder-art probes
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(5);

/// Longer timeout for search POSTs, which may scan larger remote indexes
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0";

/// Blocking fetch primitives. Errors are strings; callers absorb them
/// into empty results rather than propagating.
pub trait Fetcher: Send + Sync {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, String>;

    fn post_json(&self, url: &str, payload: &Value, timeout: Duration) -> Result<Value, String>;
}

/// Production fetcher over ureq
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqFetcher;

impl Fetcher for UreqFetcher {
    fn get_text(&self, url: &str, timeout: Duration) -> Result<String, String> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        let mut response = agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| format!("Request failed: {}", e))?;

        if response.status() != 200 {
            return Err(format!("HTTP error: {}", response.status()));
        }

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("Read failed: {}", e))
    }

    fn post_json(&self, url: &str, payload: &Value, timeout: Duration) -> Result<Value, String> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        let body = payload.to_string();
        let mut response = agent
            .post(url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .send(body.as_str())
            .map_err(|e| format!("Request failed: {}", e))?;

        if response.status() != 200 {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("Read failed: {}", e))?;

        serde_json::from_str(&text).map_err(|e| format!("Bad JSON: {}", e))
    }
}
