use std::path::PathBuf;

pub const API_KEY_VAR: &str = "PEXELS_API_KEY";
pub const EXPORT_DIR_VAR: &str = "CAPTION_EXPORT_DIR";

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.pexels.com/v1/search";
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Settings read from the environment at startup
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub search_endpoint: String,
    pub per_page: u32,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_owned(),
            per_page: DEFAULT_PER_PAGE,
            export_dir: PathBuf::from("."),
        }
    }
}

// Never print the key itself
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("search_endpoint", &self.search_endpoint)
            .field("per_page", &self.per_page)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        config.api_key = non_blank(API_KEY_VAR);
        if let Some(dir) = non_blank(EXPORT_DIR_VAR) {
            config.export_dir = PathBuf::from(dir);
        }
        if config.api_key.is_none() {
            log::warn!("{API_KEY_VAR} is not set; searches will fail");
        }
        config
    }
}
