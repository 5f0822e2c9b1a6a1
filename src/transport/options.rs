//! Per-request overrides.

use std::time::Duration;

use bon::Builder;

/// Options that override client defaults for a single HTTP call.
///
/// ```
/// use std::time::Duration;
/// use fishaudio::transport::RequestOptions;
///
/// let options = RequestOptions::builder()
///     .timeout(Duration::from_secs(30))
///     .additional_headers(vec![("X-Trace".to_string(), "abc".to_string())])
///     .build();
/// assert_eq!(options.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Default, Builder)]
pub struct RequestOptions {
    /// Replaces the client-wide timeout for this request.
    pub timeout: Option<Duration>,
    /// Extra headers; these replace the client defaults but not headers the
    /// endpoint sets itself.
    #[builder(default)]
    pub additional_headers: Vec<(String, String)>,
    /// Extra query parameters; each replaces any same-named endpoint pair.
    #[builder(default)]
    pub additional_query_params: Vec<(String, String)>,
}
