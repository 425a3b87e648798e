use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::Content;

const RESOURCE_RESPONSE_KEYS: [&str; 2] =
    ["generate_resource_url_response", "generate_looker_url_response"];
const RESOURCE_URL_KEYS: [&str; 2] = ["resource_url", "looker_url"];

/// Outer JSON envelope carried by one stream frame.
///
/// Fields beyond `author` and `content` are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
}

impl Event {
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Ordered concatenation of the text parts, or `None` when the envelope
    /// carries no content at all.
    pub fn text_content(&self) -> Option<String> {
        self.content.as_ref().map(Content::joined_text)
    }
}

/// Inner payload announcing a generated resource URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedResource {
    pub url: String,
}

impl GeneratedResource {
    /// Match `{"generate_resource_url_response": {"resource_url": "..."}}`.
    ///
    /// The older `generate_looker_url_response.looker_url` spelling is accepted
    /// too. An empty URL does not match.
    pub fn from_value(value: &Value) -> Option<Self> {
        let response = RESOURCE_RESPONSE_KEYS
            .iter()
            .find_map(|key| value.get(key))?;
        let url = RESOURCE_URL_KEYS
            .iter()
            .find_map(|key| response.get(key))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())?;

        Some(Self {
            url: url.to_owned(),
        })
    }

    /// Markdown reference shown in place of the raw inner payload.
    pub fn reference(&self) -> String {
        format!(
            "Here is your generated resource URL: [{url}]({url})",
            url = self.url
        )
    }
}
