use dotenv::dotenv;
use std::env;

/// Environment variable holding the recipe provider key. Read at call time, never cached.
pub const API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "RECIPE_API_BASE_URL";
pub const RESULTS_PER_QUERY_ENV_VAR: &str = "RECIPE_RESULTS_PER_QUERY";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_RESULTS_PER_QUERY: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub api_key_env_var: String,
    pub base_url: String,
    pub results_per_query: u32,
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            results_per_query: DEFAULT_RESULTS_PER_QUERY,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Loads `.env` (if present) and reads overrides from the process environment.
    /// Unparseable or zero result caps fall back to the default.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup(BASE_URL_ENV_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.base_url);
        let results_per_query = lookup(RESULTS_PER_QUERY_ENV_VAR)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.results_per_query);
        let log_level = lookup(LOG_LEVEL_ENV_VAR)
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(defaults.log_level);

        Self {
            api_key_env_var: defaults.api_key_env_var,
            base_url,
            results_per_query,
            log_level,
        }
    }
}
