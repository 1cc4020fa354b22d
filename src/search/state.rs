use log::{debug, error, warn};

use super::SearchHit;
use crate::error::SearchError;
use crate::task::{Poll, TaskHandle};

pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch images. Please check your API key and try again.";

/// A search that has been started and is waiting for its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// A search running on a worker thread, with the generation it answers
#[derive(Debug)]
pub struct PendingSearch {
    generation: u64,
    handle: TaskHandle<Result<Vec<SearchHit>, SearchError>>,
}

impl PendingSearch {
    pub fn new(generation: u64, handle: TaskHandle<Result<Vec<SearchHit>, SearchError>>) -> Self {
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The response, once the worker has finished. A worker that went away
    /// without reporting counts as a failed request.
    pub fn poll(&mut self) -> Option<Result<Vec<SearchHit>, SearchError>> {
        match self.handle.try_take() {
            Poll::Pending => None,
            Poll::Done(result) => Some(result),
            Poll::Lost => {
                error!("Search worker #{} exited without a result", self.generation);
                Some(Err(SearchError::RequestFailed(
                    "search worker exited without a result".to_owned(),
                )))
            }
        }
    }
}

/// What the search view shows.
///
/// Overlapping searches are allowed; only the response of the most recently
/// started one is displayed.
#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    hits: Vec<SearchHit>,
    error: Option<String>,
    loading: bool,
    generation: u64,
    highlighted: Option<usize>,
}

impl SearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.query.trim().is_empty()
    }

    /// Start a search for the current query. Blank queries start nothing.
    pub fn begin(&mut self) -> Option<SearchRequest> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_owned();

        self.generation += 1;
        self.loading = true;
        self.error = None;
        Some(SearchRequest {
            generation: self.generation,
            query,
        })
    }

    /// Apply a response. Returns `false` if a newer search has since started.
    pub fn resolve(&mut self, generation: u64, result: Result<Vec<SearchHit>, SearchError>) -> bool {
        if generation != self.generation {
            debug!("Dropping stale search response #{generation} (current #{})", self.generation);
            return false;
        }

        self.loading = false;
        match result {
            Ok(hits) => {
                self.hits = hits;
                self.highlighted = None;
            }
            Err(err) => {
                warn!("Error fetching images: {err}");
                self.error = Some(SEARCH_FAILED_MESSAGE.to_owned());
            }
        }
        true
    }

    pub fn highlight(&mut self, index: usize) {
        if index < self.hits.len() {
            self.highlighted = Some(index);
        }
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// URL handed to the editor for the highlighted hit
    pub fn chosen_url(&self) -> Option<&str> {
        self.highlighted
            .and_then(|index| self.hits.get(index))
            .map(|hit| hit.preview_url.as_str())
    }
}
