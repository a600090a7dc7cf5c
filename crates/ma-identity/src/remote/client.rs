use ma_core::{AuthError, AuthResult};

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;

/// Raw provider reply: status plus body (JSON when the provider sent any).
#[derive(Debug)]
pub(crate) struct ApiResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: Value,
}

/// HTTP client for the identity provider's REST API
pub(crate) struct AuthClient {
    base_url: String,
    api_key: String,
    client: ReqwestClient,
}

impl AuthClient {
    /// # Arguments
    /// * `base_url` - Provider URL (e.g., "https://project.example.co")
    /// * `api_key` - Public project key sent with every request
    /// * `timeout` - Per-request timeout; expiry surfaces as `NetworkFailure`
    pub(crate) fn new(base_url: &str, api_key: &str, timeout: Duration) -> AuthResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    /// Absolute URL for `path` with the given query pairs.
    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> AuthResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AuthError::network(format!("invalid provider URL: {e}")))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Build a request carrying the api key. Without a user token the api key
    /// doubles as the bearer.
    pub(crate) fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(token.unwrap_or(&self.api_key))
    }

    /// Send and read the body. Only transport failures are errors here;
    /// status handling belongs to the caller.
    pub(crate) async fn execute(&self, req: RequestBuilder) -> AuthResult<ApiResponse> {
        let response = req
            .send()
            .await
            .map_err(|e| AuthError::network(transport_message(&e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::network(transport_message(&e)))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(ApiResponse { status, body })
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        String::from("request timed out")
    } else if err.is_connect() {
        String::from("could not connect to identity provider")
    } else {
        err.to_string()
    }
}
