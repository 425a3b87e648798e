use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_BASE_URL;

/// Fixed caller identity used when creating sessions.
pub const DEFAULT_USER_ID: &str = "u_999";
/// Agent application served by the backend.
pub const DEFAULT_APP_NAME: &str = "app";

/// Path templates for the three backend endpoints.
///
/// `{app}`, `{user}` and `{session}` are substituted in the session template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdkEndpoints {
    pub session: String,
    pub run: String,
    pub health: String,
}

impl Default for AdkEndpoints {
    fn default() -> Self {
        Self {
            session: "apps/{app}/users/{user}/sessions/{session}".to_string(),
            run: "run_sse".to_string(),
            health: "docs".to_string(),
        }
    }
}

/// Transport configuration for backend requests.
#[derive(Debug, Clone)]
pub struct AdkApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Caller identity sent with session creation.
    pub user_id: String,
    /// Agent application name used in the session path.
    pub app_name: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional per-request timeout. Not applied to the body of a streaming run.
    pub timeout: Option<Duration>,
    pub endpoints: AdkEndpoints,
}

impl Default for AdkApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
            endpoints: AdkEndpoints::default(),
        }
    }
}

impl AdkApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_endpoints(mut self, endpoints: AdkEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}
