//! Environment configuration.

use std::env;
use std::time::Duration;

use adk_api::{AdkApiClient, AdkApiConfig, AdkApiError, RetryPolicy};

use crate::readiness::BackendReadinessPoller;

pub const ENV_BASE_URL: &str = "ADK_CHAT_BASE_URL";
pub const ENV_USER_ID: &str = "ADK_CHAT_USER_ID";
pub const ENV_APP_NAME: &str = "ADK_CHAT_APP_NAME";
pub const ENV_TIMEOUT_SEC: &str = "ADK_CHAT_TIMEOUT_SEC";
pub const ENV_LOG: &str = "ADK_CHAT_LOG";

#[derive(Debug, Clone, Default)]
pub struct ChatConfig {
    pub api: AdkApiConfig,
    /// Policy shared by session creation and message dispatch.
    pub retry: RetryPolicy,
    pub readiness: BackendReadinessPoller,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

impl ChatConfig {
    pub fn from_env() -> Self {
        let mut api = AdkApiConfig::default();
        if let Some(base_url) = env_string_opt(ENV_BASE_URL) {
            api = api.with_base_url(base_url);
        }
        if let Some(user_id) = env_string_opt(ENV_USER_ID) {
            api = api.with_user_id(user_id);
        }
        if let Some(app_name) = env_string_opt(ENV_APP_NAME) {
            api = api.with_app_name(app_name);
        }
        if let Some(timeout) = env_duration_secs(ENV_TIMEOUT_SEC) {
            api = api.with_timeout(timeout);
        }

        Self {
            api,
            retry: RetryPolicy::default(),
            readiness: BackendReadinessPoller::default(),
            log_level: env_string_opt(ENV_LOG),
        }
    }

    pub fn client(&self) -> Result<AdkApiClient, AdkApiError> {
        AdkApiClient::new(self.api.clone())
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_duration_secs(key: &str) -> Option<Duration> {
    let raw = env_string_opt(key)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid timeout");
            None
        }
    }
}
