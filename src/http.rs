use std::time::Duration;

use reqwest::blocking::Client;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for worker threads. Never call from the UI thread.
pub(crate) fn client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
