//! Multi-server search aggregation
//!
//! Free-text search fans out to every configured server for a category,
//! one thread per server, and unions the per-server hits. Terms narrow
//! from most to least specific; the first term with any hits wins and no
//! further terms are attempted.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::http::{Fetcher, SEARCH_TIMEOUT};
use crate::models::{has_ext, SearchResult, SearchServer, VIDEO_EXTS};

/// Wire payload the index servers expect:
/// `{"action":"get","search":{"href":"/{share}/","pattern":...,"ignorecase":true}}`
#[derive(Debug, Serialize)]
struct SearchRequest {
    action: &'static str,
    search: SearchScope,
}

#[derive(Debug, Serialize)]
struct SearchScope {
    href: String,
    pattern: String,
    ignorecase: bool,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    href: String,
    #[serde(default)]
    size: Option<u64>,
}

/// Narrowing candidates from most to least specific: the full normalized
/// query, the first two words, the first word alone. Order-preserving,
/// deduplicated. Dash-family characters and colons normalize to spaces;
/// words of one or two characters don't count.
pub fn search_terms(query: &str) -> Vec<String> {
    let cleaned: String = query
        .chars()
        .map(|c| match c {
            '-' | '–' | '—' | ':' => ' ',
            c => c,
        })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let words: Vec<&str> = cleaned
        .split(' ')
        .filter(|word| word.chars().count() > 2)
        .collect();

    let mut terms = Vec::new();
    push_unique(&mut terms, cleaned.clone());
    if words.len() > 1 {
        push_unique(&mut terms, words[..2].join(" "));
    }
    if words.len() > 2 {
        push_unique(&mut terms, words[0].to_string());
    }
    terms
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !term.is_empty() && !terms.contains(&term) {
        terms.push(term);
    }
}

/// Query one server's index API for a term. Kept hits have both a size
/// and a recognized video extension; any transport, HTTP, or shape
/// failure yields an empty list.
pub fn search_one_server(fetcher: &dyn Fetcher, server: &SearchServer, term: &str) -> Vec<SearchResult> {
    let search_url = format!("{}/{}/", server.base_url, server.share_name);
    let request = SearchRequest {
        action: "get",
        search: SearchScope {
            href: format!("/{}/", server.share_name),
            pattern: term.to_string(),
            ignorecase: true,
        },
    };
    let payload = match serde_json::to_value(&request) {
        Ok(payload) => payload,
        Err(_) => return Vec::new(),
    };

    let body = match fetcher.post_json(&search_url, &payload, SEARCH_TIMEOUT) {
        Ok(body) => body,
        Err(e) => {
            log::debug!("search on {} failed: {}", server.base_url, e);
            return Vec::new();
        }
    };
    let response: SearchResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            log::debug!("unexpected search response from {}: {}", server.base_url, e);
            return Vec::new();
        }
    };

    response
        .search
        .into_iter()
        .filter(|hit| hit.size.is_some() && has_ext(&hit.href, VIDEO_EXTS))
        .map(|hit| {
            let basename = hit.href.rsplit('/').next().unwrap_or("").to_string();
            let label = match urlencoding::decode(&basename) {
                Ok(s) => s.into_owned(),
                Err(_) => basename,
            };
            SearchResult {
                full_url: format!("{}{}", server.base_url, hit.href),
                href: hit.href,
                label,
                size: hit.size,
            }
        })
        .collect()
}

/// Cross-server search with term narrowing and early exit. Each term is
/// sent to every server concurrently (one thread per server; the set is
/// small and fixed) and the per-server hits are unioned. The first term
/// whose union is non-empty ends the search.
pub fn search(fetcher: &Arc<dyn Fetcher>, servers: &[SearchServer], query: &str) -> Vec<SearchResult> {
    if servers.is_empty() {
        return Vec::new();
    }

    for term in search_terms(query) {
        let mut handles = Vec::new();
        for server in servers {
            let fetcher = Arc::clone(fetcher);
            let server = server.clone();
            let term = term.clone();
            handles.push(thread::spawn(move || {
                search_one_server(fetcher.as_ref(), &server, &term)
            }));
        }

        let mut term_results = Vec::new();
        for handle in handles {
            match handle.join() {
                Ok(results) => term_results.extend(results),
                Err(_) => log::warn!("search worker panicked"),
            }
        }

        if !term_results.is_empty() {
            log::debug!("term '{}' matched {} results", term, term_results.len());
            return term_results;
        }
    }

    Vec::new()
}

/// Drop later duplicates keyed by full URL, preserving first-seen order.
/// Two results with the same full URL are the same media item.
pub fn dedup_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .filter(|result| seen.insert(result.full_url.clone()))
        .collect()
}
