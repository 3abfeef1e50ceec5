//! Configuration types for the Airwallex API SDK.
//!
//! This module provides the configuration value object a [`Client`] is built
//! from. There is no process-wide configuration; every client receives its own
//! [`AirwallexConfig`].
//!
//! # Overview
//!
//! - [`AirwallexConfig`]: The main configuration struct holding all SDK settings
//! - [`AirwallexConfigBuilder`]: A builder for constructing [`AirwallexConfig`] instances
//! - [`ClientId`] / [`ApiKey`]: Validated credentials (the key is masked in debug output)
//! - [`Environment`]: Sandbox or production host selection
//! - [`BaseUrl`]: An explicit host override
//! - [`ApiVersion`]: The `x-api-version` sent with every request
//! - [`RetryPolicy`]: Transient-failure retry tuning
//!
//! # Example
//!
//! ```rust
//! use airwallex_api::{AirwallexConfig, ApiKey, ClientId, Environment};
//!
//! let config = AirwallexConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .environment(Environment::Production)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.airwallex.com");
//! ```
//!
//! [`Client`]: crate::Client

mod environment;
mod newtypes;
mod retry;
mod version;

pub use environment::Environment;
pub use newtypes::{ApiKey, BaseUrl, ClientId};
pub use retry::RetryPolicy;
pub use version::ApiVersion;

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-call HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default lifetime assumed for a freshly issued access token.
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 60);

/// Default margin before expiry at which a token is considered stale.
pub const DEFAULT_TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

/// Configuration for the Airwallex API SDK.
///
/// # Thread Safety
///
/// `AirwallexConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Token Timing
///
/// The login endpoint does not report how long a token lives, so the client
/// assumes `token_lifetime` and refreshes `token_refresh_margin` before that.
/// The margin is validated to be strictly smaller than the lifetime, otherwise
/// every call would re-authenticate.
#[derive(Clone, Debug)]
pub struct AirwallexConfig {
    client_id: ClientId,
    api_key: ApiKey,
    environment: Environment,
    base_url: BaseUrl,
    api_version: ApiVersion,
    timeout: Duration,
    token_lifetime: Duration,
    token_refresh_margin: Duration,
    retry: RetryPolicy,
    user_agent_prefix: Option<String>,
}

impl AirwallexConfig {
    /// Creates a new builder for constructing an `AirwallexConfig`.
    #[must_use]
    pub fn builder() -> AirwallexConfigBuilder {
        AirwallexConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the selected environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the effective base URL (the override, or the environment host).
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the per-call HTTP timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the assumed access token lifetime.
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Returns the margin before expiry at which the token is refreshed.
    #[must_use]
    pub const fn token_refresh_margin(&self) -> Duration {
        self.token_refresh_margin
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AirwallexConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AirwallexConfig>();
};

/// Builder for constructing [`AirwallexConfig`] instances.
///
/// Required fields are `client_id` and `api_key`.
///
/// # Defaults
///
/// - `environment`: [`Environment::Sandbox`]
/// - `base_url`: the environment host
/// - `api_version`: [`ApiVersion::DEFAULT`]
/// - `timeout`: 30 seconds
/// - `token_lifetime`: 30 minutes
/// - `token_refresh_margin`: 5 minutes
/// - `retry`: [`RetryPolicy::default`]
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use airwallex_api::{AirwallexConfig, ApiKey, BaseUrl, ClientId, RetryPolicy};
/// use std::time::Duration;
///
/// let config = AirwallexConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .api_key(ApiKey::new("key").unwrap())
///     .base_url(BaseUrl::new("http://127.0.0.1:9999").unwrap())
///     .timeout(Duration::from_secs(5))
///     .retry(RetryPolicy::none())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(5));
/// ```
#[derive(Debug, Default)]
pub struct AirwallexConfigBuilder {
    client_id: Option<ClientId>,
    api_key: Option<ApiKey>,
    environment: Option<Environment>,
    base_url: Option<BaseUrl>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    token_lifetime: Option<Duration>,
    token_refresh_margin: Option<Duration>,
    retry: Option<RetryPolicy>,
    user_agent_prefix: Option<String>,
}

impl AirwallexConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the environment.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the environment host, e.g. for a proxy.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-call HTTP timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the assumed access token lifetime.
    #[must_use]
    pub const fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    /// Sets how long before expiry the token is refreshed.
    #[must_use]
    pub const fn token_refresh_margin(mut self, margin: Duration) -> Self {
        self.token_refresh_margin = Some(margin);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AirwallexConfig`], validating it eagerly.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `client_id` or `api_key` is not set
    /// - [`ConfigError::InvalidTokenTiming`] if the refresh margin is not
    ///   strictly less than the token lifetime
    /// - [`ConfigError::InvalidRetryPolicy`] if the policy allows zero attempts
    pub fn build(self) -> Result<AirwallexConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let token_lifetime = self.token_lifetime.unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let token_refresh_margin = self
            .token_refresh_margin
            .unwrap_or(DEFAULT_TOKEN_REFRESH_MARGIN);
        if token_refresh_margin >= token_lifetime {
            return Err(ConfigError::InvalidTokenTiming {
                margin_secs: duration_secs(token_refresh_margin),
                lifetime_secs: duration_secs(token_lifetime),
            });
        }

        let retry = self.retry.unwrap_or_default();
        if retry.max_attempts == 0 {
            return Err(ConfigError::InvalidRetryPolicy);
        }

        let environment = self.environment.unwrap_or_default();
        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(environment.base_url())?,
        };

        Ok(AirwallexConfig {
            client_id,
            api_key,
            environment,
            base_url,
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            token_lifetime,
            token_refresh_margin,
            retry,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

fn duration_secs(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
