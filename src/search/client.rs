use log::info;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use super::{PendingSearch, SearchRequest};
use crate::config::AppConfig;
use crate::error::SearchError;
use crate::http;
use crate::task::TaskHandle;

/// One search result, reduced to what the grid and the editor need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub preview_url: String,
    pub alt_text: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    src: PhotoSources,
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Deserialize)]
struct PhotoSources {
    medium: String,
}

/// Map a raw search API body to hits, in the order the API returned them
pub fn parse_search_response(body: &str) -> Result<Vec<SearchHit>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|err| SearchError::RequestFailed(format!("malformed response: {err}")))?;

    Ok(response
        .photos
        .into_iter()
        .map(|photo| SearchHit {
            preview_url: photo.src.medium,
            alt_text: photo.alt.unwrap_or_default(),
        })
        .collect())
}

/// Client for the stock-photo search endpoint
#[derive(Clone)]
pub struct ImageSearchClient {
    endpoint: String,
    per_page: u32,
    api_key: Option<String>,
}

impl ImageSearchClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.search_endpoint.clone(),
            per_page: config.per_page,
            api_key: config.api_key.clone(),
        }
    }

    /// Run `request` on a worker thread. `on_done` runs on that thread once
    /// the response is in.
    pub fn spawn(
        &self,
        request: SearchRequest,
        on_done: impl FnOnce() + Send + 'static,
    ) -> PendingSearch {
        let client = self.clone();
        let SearchRequest { generation, query } = request;
        let handle = TaskHandle::spawn("image-search", move || client.search(&query), on_done);
        PendingSearch::new(generation, handle)
    }

    /// Run one search. Blocks; call from a worker thread.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;
        let failed = |err: reqwest::Error| SearchError::RequestFailed(err.to_string());

        let per_page = self.per_page.to_string();
        let response = http::client()
            .map_err(failed)?
            .get(&self.endpoint)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .header(AUTHORIZATION, api_key)
            .send()
            .map_err(failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response.text().map_err(failed)?;
        let hits = parse_search_response(&body)?;
        info!("Search {query:?} returned {} photos", hits.len());
        Ok(hits)
    }
}

impl std::fmt::Debug for ImageSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSearchClient")
            .field("endpoint", &self.endpoint)
            .field("per_page", &self.per_page)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .finish()
    }
}
