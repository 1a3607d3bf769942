use std::time::Instant;

use primitives::{ReportError, Result};
use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::{debug, error};
use url::Url;

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Posts GraphQL documents to a single endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    url: Url,
    api_key: Option<String>,
    name: &'static str,
}

impl GraphqlClient {
    /// Create a client for `url`. `name` labels log lines and errors.
    pub fn new(name: &'static str, url: Url) -> Self {
        Self { http: Client::new(), url, api_key: None, name }
    }

    /// Send `key` in the `apiKey` header of every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Name of the queried source.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run `query` and decode its `data` member.
    ///
    /// Transport errors, non-success statuses, a populated `errors` array, a
    /// missing `data` member, and a `data` member of the wrong shape all fail
    /// with [`ReportError::QueryFailure`].
    pub async fn query<T: DeserializeOwned>(&self, query: &str) -> Result<T> {
        let start = Instant::now();
        let mut request = self.http.post(self.url.clone()).json(&json!({ "query": query }));
        if let Some(key) = &self.api_key {
            request = request.header("apiKey", key);
        }

        let resp = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.fail(e))?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("")
            .to_lowercase();
        let text = resp.text().await.map_err(|e| self.fail(e))?;
        let duration_ms = start.elapsed().as_millis();

        // Parse regardless of content-type; some gateways omit the header
        let body: GraphqlResponse<T> = serde_json::from_str(&text).map_err(|e| {
            let snippet = text.chars().take(200).collect::<String>();
            self.fail(format!("invalid response (content-type {}): {} ({})", content_type, snippet, e))
        })?;

        if let Some(first) = body.errors.first() {
            return Err(self.fail(format!("{} ({} errors)", first.message, body.errors.len())));
        }
        let data = body.data.ok_or_else(|| self.fail("response carries no data"))?;
        debug!(source = self.name, duration_ms, "GraphQL query executed");
        Ok(data)
    }

    fn fail<E: std::fmt::Display>(&self, err: E) -> ReportError {
        error!(source = self.name, error = %err, "GraphQL query failed");
        ReportError::query(self.name, err)
    }
}
