mod client;
mod state;

pub use client::{ImageSearchClient, SearchHit, parse_search_response};
pub use state::{PendingSearch, SEARCH_FAILED_MESSAGE, SearchRequest, SearchState};
