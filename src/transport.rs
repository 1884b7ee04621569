//! HTTP transport for the TFVC client.
//!
//! The transport is the shared collaborator every operation method
//! delegates to. It resolves location ids against the server's advertised
//! resource table, negotiates API versions, expands route templates,
//! applies credentials, retries retryable failures, and translates error
//! responses into typed errors. Operation methods stay declarative.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use bytes::Bytes;
use percent_encoding::percent_decode_str;
use rand::thread_rng;
use rand::Rng;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::error::{Error, ServiceError};
use crate::locations::{
    ApiResourceLocation, CONNECTION_DATA_RELATIVE_PATH, OPTIONS_RELATIVE_PATH,
};
use crate::request::RequestSpec;
use crate::version::ApiVersion;

/// Header carrying a URL-encoded service error message on failures without
/// a JSON body.
const TFS_SERVICE_ERROR_HEADER: &str = "X-TFS-ServiceError";

/// Header requesting verb substitution when method override is enabled.
const HTTP_METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Environment switch for verb substitution through POST.
const METHOD_OVERRIDE_ENV: &str = "TFVC_HTTP_METHOD_OVERRIDE";

/// Configuration for automatic retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base backoff factor for exponential backoff
    pub backoff_factor: f64,
    /// Status codes that trigger retry
    pub retry_on: Vec<u16>,
    /// Whether to respect Retry-After header
    pub respect_retry_after: bool,
    /// Maximum backoff time in seconds
    pub max_backoff: f64,
    /// Jitter factor (0.1 = ±10%)
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: 2.0,
            retry_on: vec![429, 500, 502, 503],
            respect_retry_after: true,
            max_backoff: 60.0,
            jitter: 0.1,
        }
    }
}

/// Envelope the service wraps list results in.
#[derive(Debug, Deserialize)]
struct JsonCollection<T> {
    value: Vec<T>,
}

/// HTTP transport layer with location resolution and retry logic.
///
/// Handles:
/// - Location discovery and caching from the server's options endpoint
/// - API version negotiation and the versioned Accept header
/// - Exponential backoff with jitter for retries
/// - Retry-After header respect for rate limiting
/// - Error response parsing into typed errors
pub struct HttpTransport {
    base_url: String,
    credentials: Credentials,
    client: Client,
    retry_config: RetryConfig,
    method_override: bool,
    locations: RwLock<Option<HashMap<Uuid, ApiResourceLocation>>>,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `collection_url` - Project collection URL (e.g.
    ///   "<https://tfs.example.com/DefaultCollection>")
    /// * `credentials` - Credentials applied to every request
    /// * `timeout` - Request timeout
    /// * `retry_config` - Configuration for retry behavior
    ///
    /// # Errors
    ///
    /// Returns an error if the collection URL is invalid or the HTTP client
    /// cannot be created.
    pub fn new(
        collection_url: &str,
        credentials: Credentials,
        timeout: Duration,
        retry_config: Option<RetryConfig>,
    ) -> Result<Self, Error> {
        let base_url = collection_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| Error::Configuration(format!("invalid collection URL: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let method_override = env::var(METHOD_OVERRIDE_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Ok(Self {
            base_url,
            credentials,
            client,
            retry_config: retry_config.unwrap_or_default(),
            method_override,
            locations: RwLock::new(None),
        })
    }

    /// Get the collection URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check whether an authenticated round-trip to the collection works.
    ///
    /// Issues a GET to the connection data endpoint and reports success.
    /// A failure usually means the collection URL is wrong or the access
    /// token has expired or been revoked.
    pub async fn check_connection(&self) -> bool {
        debug!(base_url = %self.base_url, "checking REST client connection");

        let url = format!("{}/{}", self.base_url, CONNECTION_DATA_RELATIVE_PATH);
        let request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json");

        match self.credentials.apply(request).send().await {
            Ok(response) if response.status().is_success() => {
                response.bytes().await.map_or(false, |body| !body.is_empty())
            }
            Ok(response) => {
                warn!(
                    status = response.status().as_u16(),
                    "connection check failed; the access token may have expired or been revoked"
                );
                false
            }
            Err(e) => {
                warn!(error = %e, "connection check failed");
                false
            }
        }
    }

    /// Execute a spec and deserialize the JSON response into a single
    /// object.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
    ) -> Result<T, Error> {
        let response = self.execute(&spec).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse response: {e}")))
    }

    /// Execute a spec and unwrap the service's JSON collection envelope.
    pub(crate) async fn send_collection<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
    ) -> Result<Vec<T>, Error> {
        let response = self.execute(&spec).await?;
        let collection: JsonCollection<T> = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse response: {e}")))?;
        Ok(collection.value)
    }

    /// Execute a spec and return the raw response body.
    pub(crate) async fn send_bytes(&self, spec: RequestSpec) -> Result<Bytes, Error> {
        let response = self.execute(&spec).await?;
        response
            .bytes()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {e}")))
    }

    /// Execute a spec and return the response body as text.
    pub(crate) async fn send_text(&self, spec: RequestSpec) -> Result<String, Error> {
        let response = self.execute(&spec).await?;
        response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {e}")))
    }

    /// Resolve the location, build the physical request, and send it with
    /// automatic retry on retryable failures.
    async fn execute(&self, spec: &RequestSpec) -> Result<Response, Error> {
        let location = self.location(spec.location_id).await?;
        let version = location.negotiate(&spec.api_version)?;
        let target = self.target_url(&location, spec)?;

        debug!(method = %spec.method, url = %target, api_version = %version, "sending request");

        let body = match &spec.body {
            Some(body) => Some(serde_json::to_vec(body)?),
            None => None,
        };

        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.retry_config.max_retries {
            let request = self.build_request(spec, &target, &version, body.clone());

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    let error = self.parse_error_response(response).await;

                    if !self.should_retry(status.as_u16(), attempt) {
                        return Err(error);
                    }

                    let retry_after = match &error {
                        Error::Service(ServiceError::RateLimited { retry_after, .. }) => {
                            Some(*retry_after)
                        }
                        _ => None,
                    };

                    warn!(
                        status = status.as_u16(),
                        attempt,
                        "retrying after retryable service error"
                    );
                    last_error = Some(error);

                    let wait_time = self.get_backoff_time(attempt, retry_after);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt >= self.retry_config.max_retries {
                        return Err(Error::Http(e.to_string()));
                    }

                    warn!(error = %e, attempt, "retrying after transport error");
                    last_error = Some(Error::Http(e.to_string()));

                    let wait_time = self.get_backoff_time(attempt, None);
                    tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Http("request failed after maximum retries".to_string())
        }))
    }

    /// Build the physical request for one attempt.
    fn build_request(
        &self,
        spec: &RequestSpec,
        target: &Url,
        version: &ApiVersion,
        body: Option<Vec<u8>>,
    ) -> RequestBuilder {
        let (method, overridden) = if self.should_override_method(&spec.method) {
            (Method::POST, Some(spec.method.clone()))
        } else {
            (spec.method.clone(), None)
        };

        let accept = format!(
            "{}; api-version={}; charset=utf-8",
            spec.accept.media_type(),
            version
        );

        let mut request = self
            .client
            .request(method, target.clone())
            .header(reqwest::header::ACCEPT, accept);

        if let Some(original) = overridden {
            request = request.header(HTTP_METHOD_OVERRIDE_HEADER, original.as_str());
        }

        if let Some(body) = body {
            request = request
                .header(
                    reqwest::header::CONTENT_TYPE,
                    "application/json; charset=utf-8",
                )
                .body(body);
        }

        self.credentials.apply(request)
    }

    /// Expand the route template and append query parameters.
    fn target_url(
        &self,
        location: &ApiResourceLocation,
        spec: &RequestSpec,
    ) -> Result<Url, Error> {
        let path = location.expand_route(&spec.route_values);
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| Error::Http(format!("invalid request target: {e}")))?;

        if !spec.query.is_empty() {
            url.query_pairs_mut().extend_pairs(spec.query.pairs());
        }

        Ok(url)
    }

    /// Look up a location id, discovering the location table on first use.
    async fn location(&self, location_id: Uuid) -> Result<ApiResourceLocation, Error> {
        if let Some(index) = self.locations.read().await.as_ref() {
            return index
                .get(&location_id)
                .cloned()
                .ok_or_else(|| self.unknown_location(location_id));
        }

        let index = self.load_locations().await?;
        let resolved = index
            .get(&location_id)
            .cloned()
            .ok_or_else(|| self.unknown_location(location_id));

        *self.locations.write().await = Some(index);
        resolved
    }

    /// Fetch the location table from the server's options endpoint.
    async fn load_locations(&self) -> Result<HashMap<Uuid, ApiResourceLocation>, Error> {
        let url = format!("{}/{}", self.base_url, OPTIONS_RELATIVE_PATH);
        debug!(url = %url, "discovering API resource locations");

        let request = self
            .client
            .request(Method::OPTIONS, &url)
            .header(reqwest::header::ACCEPT, "application/json");

        let response = self
            .credentials
            .apply(request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.parse_error_response(response).await);
        }

        let collection: JsonCollection<ApiResourceLocation> = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse location table: {e}")))?;

        Ok(collection
            .value
            .into_iter()
            .map(|location| (location.id, location))
            .collect())
    }

    fn unknown_location(&self, location_id: Uuid) -> Error {
        Error::ResourceNotFound {
            location_id,
            base_url: self.base_url.clone(),
        }
    }

    /// Determine if a request should be retried.
    fn should_retry(&self, status_code: u16, attempt: u32) -> bool {
        if attempt >= self.retry_config.max_retries {
            return false;
        }

        self.retry_config.retry_on.contains(&status_code)
    }

    /// Calculate backoff time for retry.
    ///
    /// Uses exponential backoff with jitter, respecting Retry-After header
    /// if present.
    fn get_backoff_time(&self, attempt: u32, retry_after: Option<u32>) -> f64 {
        if let Some(ra) = retry_after {
            if self.retry_config.respect_retry_after {
                return f64::from(ra);
            }
        }

        let base_wait = self.retry_config.backoff_factor.powi(attempt as i32);

        let wait_time = if self.retry_config.jitter > 0.0 {
            let jitter_range = base_wait * self.retry_config.jitter;
            let mut rng = thread_rng();
            let jitter = rng.gen_range(-jitter_range..jitter_range);
            base_wait + jitter
        } else {
            base_wait
        };

        wait_time.min(self.retry_config.max_backoff)
    }

    fn should_override_method(&self, method: &Method) -> bool {
        if !self.method_override {
            return false;
        }

        // GET and POST are sent as-is even when override is enabled.
        *method == Method::PUT || *method == Method::DELETE || *method == Method::PATCH
    }

    /// Parse an error response into a typed error.
    ///
    /// The message comes from the URL-encoded service error header when
    /// present, then the wrapped exception body, then the HTTP status text.
    async fn parse_error_response(&self, response: Response) -> Error {
        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());
        let header_message = response
            .headers()
            .get(TFS_SERVICE_ERROR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned());

        let data: Value = response
            .json()
            .await
            .unwrap_or_else(|_| serde_json::json!({}));

        let type_key = data
            .get("typeKey")
            .and_then(|v| v.as_str())
            .unwrap_or("VssServiceException")
            .to_string();
        let message = header_message
            .or_else(|| {
                data.get("message")
                    .and_then(|v| v.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {}", status.as_u16()), String::from)
            });

        let service_error = match status {
            StatusCode::UNAUTHORIZED => ServiceError::Authentication { type_key, message },
            StatusCode::FORBIDDEN => ServiceError::Authorization { type_key, message },
            StatusCode::NOT_FOUND => ServiceError::NotFound { type_key, message },
            StatusCode::CONFLICT => ServiceError::Conflict { type_key, message },
            StatusCode::TOO_MANY_REQUESTS => ServiceError::RateLimited {
                type_key,
                message,
                retry_after: retry_after.unwrap_or(60),
            },
            s if s.is_server_error() => ServiceError::Server { type_key, message },
            _ => ServiceError::Validation { type_key, message },
        };

        Error::Service(service_error)
    }
}
