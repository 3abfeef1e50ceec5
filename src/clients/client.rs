//! Authenticated client for the Airwallex API.
//!
//! This module provides the [`Client`] type through which every API call
//! passes. It owns the access token lifecycle and the request pipeline.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::{AccessToken, LOGIN_PATH};
use crate::clients::http_request::{to_query_pairs, HttpMethod, HttpRequest, RequestOptions};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{HttpTransport, ReqwestTransport};
use crate::config::AirwallexConfig;
use crate::error::{ApiError, Error, ErrorKind};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body field carrying the idempotency key.
pub const IDEMPOTENCY_FIELD: &str = "request_id";

/// Generates a fresh idempotency key (a random UUID v4).
///
/// # Example
///
/// ```rust
/// let a = airwallex_api::generate_idempotency_key();
/// let b = airwallex_api::generate_idempotency_key();
/// assert_eq!(a.len(), 36);
/// assert_ne!(a, b);
/// ```
#[must_use]
pub fn generate_idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Client for the Airwallex API.
///
/// The client:
/// - logs in with the configured client ID and API key and caches the bearer
///   token, refreshing it shortly before it expires
/// - adds `Authorization`, `Content-Type`, `x-api-version` and `User-Agent`
///   headers to every call
/// - injects a `request_id` idempotency key into create and update bodies
/// - retries GET and DELETE calls on timeouts, connection failures and
///   transient statuses with randomized exponential backoff
/// - re-authenticates once and replays the call when the API answers 401
///
/// # Thread Safety
///
/// `Client` is cheap to clone and `Send + Sync`; clones share one token.
/// Token replacement is serialized, while readers never wait on an in-flight
/// refresh. A reader that races a refresh may send the old token, in which
/// case the 401 path corrects it.
///
/// # Example
///
/// ```rust,no_run
/// use airwallex_api::{AirwallexConfig, ApiKey, Client, ClientId};
///
/// # async fn run() -> Result<(), airwallex_api::Error> {
/// let config = AirwallexConfig::builder()
///     .client_id(ClientId::new("my-client-id")?)
///     .api_key(ApiKey::new("my-api-key")?)
///     .build()?;
/// let client = Client::new(config)?;
///
/// let balances = client.get("/api/v1/balances/current", None, None).await?;
/// println!("{balances}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: AirwallexConfig,
    transport: Arc<dyn HttpTransport>,
    token: RwLock<Option<Arc<AccessToken>>>,
    auth_lock: Mutex<()>,
    user_agent: String,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Credentials {
    Login,
    Bearer,
}

impl Client {
    /// Creates a client using the default `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP backend cannot be initialised.
    pub fn new(config: AirwallexConfig) -> Result<Self, Error> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: AirwallexConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}Airwallex API Rust v{SDK_VERSION}");

        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                token: RwLock::new(None),
                auth_lock: Mutex::new(()),
                user_agent,
            }),
        }
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &AirwallexConfig {
        &self.inner.config
    }

    /// Returns the `User-Agent` sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Returns a snapshot of the current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<Arc<AccessToken>> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if there is no token or it is within the refresh margin
    /// of expiry.
    #[must_use]
    pub fn is_token_expired(&self) -> bool {
        let margin = to_chrono(self.inner.config.token_refresh_margin());
        self.access_token()
            .map_or(true, |token| token.is_expired_at(Utc::now(), margin))
    }

    /// Logs in and installs a fresh access token, replacing any current one.
    ///
    /// Concurrent calls are serialized; readers keep seeing the old token
    /// until the new one is installed in a single step.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] built from a non-2xx login response, or an
    /// `Authentication` error if the response carries no token.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let _guard = self.inner.auth_lock.lock().await;
        self.login().await
    }

    /// Authenticates if and only if the current token is missing or stale.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Client::authenticate`].
    pub async fn ensure_authenticated(&self) -> Result<(), Error> {
        if !self.is_token_expired() {
            return Ok(());
        }
        let _guard = self.inner.auth_lock.lock().await;
        // Another task may have refreshed while we waited for the lock
        if !self.is_token_expired() {
            return Ok(());
        }
        self.login().await
    }

    /// Logs in after the API rejected `rejected`, unless another task has
    /// already replaced that token.
    async fn replace_rejected_token(
        &self,
        rejected: Option<&Arc<AccessToken>>,
    ) -> Result<(), Error> {
        let _guard = self.inner.auth_lock.lock().await;
        let current = self.access_token();
        let replaced = match (rejected, current.as_ref()) {
            (Some(rejected), Some(current)) => !Arc::ptr_eq(rejected, current),
            (None, Some(_)) => true,
            _ => false,
        };
        if replaced {
            debug!("Access token already replaced by a concurrent login");
            return Ok(());
        }
        self.login().await
    }

    /// Performs one logical API call.
    ///
    /// For GET and DELETE, an object in `data` becomes the query string. For
    /// POST, PUT and PATCH, `data` is the JSON body (an empty object when
    /// `None`); object bodies get a generated `request_id` unless the caller
    /// supplied one, and a JSON string is sent verbatim.
    ///
    /// # Errors
    ///
    /// - [`Error::Api`] for a final non-2xx response
    /// - [`Error::Transport`] when no response arrived within the retry budget
    /// - [`Error::Decode`] if a 2xx body is not JSON
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        data: Option<Value>,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        let is_login = path == LOGIN_PATH;
        if !is_login {
            self.ensure_authenticated().await?;
        }

        let (query, body) = encode_data(method, data);
        let credentials = if is_login {
            Credentials::Login
        } else {
            Credentials::Bearer
        };

        let sent_token = self.access_token();
        let mut response = self
            .send_with_retry(method, path, &query, body.as_deref(), options, credentials)
            .await?;

        if response.code == 401 && !is_login {
            warn!(method = %method, path, "Access token rejected, re-authenticating once");
            self.replace_rejected_token(sent_token.as_ref()).await?;
            response = self
                .send_with_retry(method, path, &query, body.as_deref(), options, credentials)
                .await?;
        }

        if !response.is_ok() {
            return Err(api_error(&response).into());
        }
        Ok(response.json()?)
    }

    /// Sends a GET request with optional query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn get(
        &self,
        path: &str,
        params: Option<&Map<String, Value>>,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        let data = params.map(|p| Value::Object(p.clone()));
        self.execute(HttpMethod::Get, path, data, options).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn post(
        &self,
        path: &str,
        body: Value,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        self.execute(HttpMethod::Post, path, Some(body), options).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn put(
        &self,
        path: &str,
        body: Value,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        self.execute(HttpMethod::Put, path, Some(body), options).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn patch(
        &self,
        path: &str,
        body: Value,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        self.execute(HttpMethod::Patch, path, Some(body), options).await
    }

    /// Sends a DELETE request with optional query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::execute`].
    pub async fn delete(
        &self,
        path: &str,
        params: Option<&Map<String, Value>>,
        options: Option<&RequestOptions>,
    ) -> Result<Value, Error> {
        let data = params.map(|p| Value::Object(p.clone()));
        self.execute(HttpMethod::Delete, path, data, options).await
    }

    /// Exchanges credentials for a token. Callers must hold `auth_lock`.
    async fn login(&self) -> Result<(), Error> {
        let response = self
            .send_with_retry(HttpMethod::Post, LOGIN_PATH, &[], None, None, Credentials::Login)
            .await?;
        if !response.is_ok() {
            return Err(api_error(&response).into());
        }

        let body = response.json()?;
        let value = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::local(
                    ErrorKind::Authentication,
                    "Authentication response did not include a token",
                )
            })?;

        let token = AccessToken::new(
            value,
            Utc::now(),
            to_chrono(self.inner.config.token_lifetime()),
        );
        let expires_at = token.expires_at();
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(token));

        info!(expires_at = %expires_at, "Authenticated with Airwallex API");
        Ok(())
    }

    /// Sends a request, retrying transient failures of read-style methods.
    async fn send_with_retry(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&str>,
        options: Option<&RequestOptions>,
        credentials: Credentials,
    ) -> Result<HttpResponse, Error> {
        let policy = self.inner.config.retry();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let request = self.build_request(method, path, query, body, options, credentials);
            debug!(method = %method, path, attempt, "Sending Airwallex API request");

            let can_retry = method.is_retryable() && attempt < policy.max_attempts;
            match self.inner.transport.send(request).await {
                Ok(response) if can_retry && policy.is_retryable_status(response.code) => {
                    let delay = policy.delay_with_hint(attempt, response.retry_after());
                    warn!(
                        method = %method,
                        path,
                        status = response.code,
                        attempt,
                        delay_ms = millis(delay),
                        "Retrying Airwallex API request after transient status"
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(response) => return Ok(response),
                Err(error) if can_retry && error.is_transient() => {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        method = %method,
                        path,
                        error = %error,
                        attempt,
                        delay_ms = millis(delay),
                        "Retrying Airwallex API request after transport failure"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&str>,
        options: Option<&RequestOptions>,
        credentials: Credentials,
    ) -> HttpRequest {
        let config = &self.inner.config;
        let mut builder = HttpRequest::builder(method, config.base_url().join(path))
            .header("Content-Type", "application/json")
            .header("User-Agent", self.inner.user_agent.as_str())
            .header("x-api-version", config.api_version().as_ref())
            .query(query.iter().cloned())
            .timeout(config.timeout());

        if let Some(options) = options {
            for (key, value) in options.headers() {
                if !key.eq_ignore_ascii_case("authorization") {
                    builder = builder.header(key.as_str(), value.as_str());
                }
            }
        }

        builder = match credentials {
            Credentials::Login => builder
                .header("x-client-id", config.client_id().as_ref())
                .header("x-api-key", config.api_key().as_ref()),
            Credentials::Bearer => match self.access_token() {
                Some(token) => builder.header("Authorization", token.authorization()),
                None => builder,
            },
        };

        if let Some(body) = body {
            builder = builder.body(body);
        }
        builder.build()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport)
            .field("user_agent", &self.inner.user_agent)
            .field("has_token", &self.access_token().is_some())
            .finish()
    }
}

/// Splits call data into query pairs or an encoded body.
fn encode_data(method: HttpMethod, data: Option<Value>) -> (Vec<(String, String)>, Option<String>) {
    if method.carries_body() {
        let body = match data.unwrap_or_else(|| Value::Object(Map::new())) {
            Value::String(raw) => raw,
            Value::Object(mut map) => {
                if !map.contains_key(IDEMPOTENCY_FIELD) {
                    map.insert(
                        IDEMPOTENCY_FIELD.to_string(),
                        Value::String(generate_idempotency_key()),
                    );
                }
                Value::Object(map).to_string()
            }
            other => other.to_string(),
        };
        (Vec::new(), Some(body))
    } else {
        let query = match data {
            Some(Value::Object(map)) => to_query_pairs(&map),
            _ => Vec::new(),
        };
        (query, None)
    }
}

fn api_error(response: &HttpResponse) -> ApiError {
    ApiError::from_response(response.code, response.body.as_bytes(), response.request_id())
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::weeks(52))
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
