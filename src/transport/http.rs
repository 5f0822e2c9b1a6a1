//! Authenticated HTTP transport shared by all resource clients.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response};
use tracing::debug;

use super::options::RequestOptions;
use crate::config::ClientConfig;
use crate::error::{FishAudioError, Result};

/// Thin wrapper over a `reqwest::Client` that adds auth headers, applies
/// [`RequestOptions`] and maps error statuses onto [`FishAudioError`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Build a transport with its own connection pool.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client, config })
    }

    /// Use a caller-provided client; its own timeout settings apply.
    pub fn with_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Absolute URL for an API path such as `/v1/tts`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Authorization and User-Agent headers.
    pub fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key())) {
            headers.insert(AUTHORIZATION, val);
        }
        if let Ok(val) = HeaderValue::from_str(self.config.user_agent()) {
            headers.insert(USER_AGENT, val);
        }
        headers
    }

    /// Start a request for `path` with the default headers attached.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .headers(self.default_headers())
    }

    /// Send a request, applying per-request overrides and failing on non-2xx.
    pub async fn execute(
        &self,
        builder: RequestBuilder,
        options: Option<&RequestOptions>,
    ) -> Result<Response> {
        let mut request = builder.build()?;

        if let Some(options) = options {
            apply_request_options(&mut request, options, &self.default_headers())?;
        }

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(response)
    }
}

/// Merge per-call overrides into a built request.
///
/// Extra headers replace the client defaults but never a header the endpoint
/// set itself, such as `content-type` or `model`. Extra query parameters
/// replace any existing pairs with the same key.
fn apply_request_options(
    request: &mut reqwest::Request,
    options: &RequestOptions,
    defaults: &HeaderMap,
) -> Result<()> {
    for (name, value) in &options.additional_headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            FishAudioError::Configuration(format!("Invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FishAudioError::Configuration(format!("Invalid header value: {e}")))?;
        if request.headers().contains_key(&name) && !defaults.contains_key(&name) {
            debug!(header = %name, "Keeping endpoint header over request option");
            continue;
        }
        request.headers_mut().insert(name, value);
    }

    if !options.additional_query_params.is_empty() {
        let kept: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .filter(|(key, _)| {
                !options
                    .additional_query_params
                    .iter()
                    .any(|(extra, _)| extra == key)
            })
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        let mut pairs = request.url_mut().query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.extend_pairs(&options.additional_query_params);
    }

    if let Some(timeout) = options.timeout {
        *request.timeout_mut() = Some(timeout);
    }
    Ok(())
}

/// Turn a non-2xx response into the matching error variant.
pub async fn error_from_response(response: Response) -> FishAudioError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.clone()
        }
    });
    let body = (!body.is_empty()).then_some(body);
    FishAudioError::from_status(status.as_u16(), message, body)
}

/// Pull `message` (or `detail`) out of a JSON error body.
pub fn extract_error_message(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"].iter().find_map(|field| {
        parsed
            .get(*field)
            .and_then(|value| value.as_str())
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    })
}
