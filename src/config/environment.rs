//! Airwallex deployment environments.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The Airwallex deployment a client talks to.
///
/// # Example
///
/// ```rust
/// use airwallex_api::Environment;
///
/// let env: Environment = "production".parse().unwrap();
/// assert_eq!(env.base_url(), "https://api.airwallex.com");
/// assert!("staging".parse::<Environment>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// The demo environment at `api-demo.airwallex.com`.
    #[default]
    Sandbox,
    /// The live environment at `api.airwallex.com`.
    Production,
}

impl Environment {
    /// Returns the API host for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-demo.airwallex.com",
            Self::Production => "https://api.airwallex.com",
        }
    }

    /// Returns the lowercase selector for this environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidEnvironment {
                environment: s.to_string(),
            }),
        }
    }
}
