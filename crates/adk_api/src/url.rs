use crate::config::AdkApiConfig;

/// Default base URL of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Normalize a base URL: blank input falls back to the default, and trailing
/// slashes are removed so paths can be joined with a single `/`.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", normalize_base_url(base), path.trim_start_matches('/'))
}

/// Endpoint that creates the session keyed by `session_id`.
///
/// Substituted values are percent-encoded so each stays within its segment.
pub fn session_url(config: &AdkApiConfig, session_id: &str) -> String {
    let path = config
        .endpoints
        .session
        .replace("{app}", &urlencoding::encode(&config.app_name))
        .replace("{user}", &urlencoding::encode(&config.user_id))
        .replace("{session}", &urlencoding::encode(session_id));
    join(&config.base_url, &path)
}

/// Endpoint that streams a run for one new message.
pub fn run_url(config: &AdkApiConfig) -> String {
    join(&config.base_url, &config.endpoints.run)
}

/// Lightweight liveness endpoint.
pub fn health_url(config: &AdkApiConfig) -> String {
    join(&config.base_url, &config.endpoints.health)
}
