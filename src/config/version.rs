//! Airwallex API version definitions.
//!
//! This module provides the [`ApiVersion`] type sent in the `x-api-version`
//! header of every request.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Airwallex API version.
///
/// Airwallex versions its API by release date (`YYYY-MM-DD`). The SDK pins a
/// default version so that responses keep a stable shape; callers may opt in
/// to a newer one.
///
/// # Example
///
/// ```rust
/// use airwallex_api::ApiVersion;
///
/// let version: ApiVersion = "2024-09-27".parse().unwrap();
/// assert_eq!(version, ApiVersion::default());
/// assert_eq!(version.to_string(), "2024-09-27");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// The version this SDK was written against.
    pub const DEFAULT: &'static str = "2024-09-27";

    /// Creates a validated API version.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiVersion`] unless the value has the
    /// shape `YYYY-MM-DD` with a month in 1-12 and a day in 1-31.
    pub fn new(version: impl Into<String>) -> Result<Self, ConfigError> {
        let version = version.into();
        if Self::is_valid(&version) {
            Ok(Self(version))
        } else {
            Err(ConfigError::InvalidApiVersion { version })
        }
    }

    fn is_valid(version: &str) -> bool {
        let parts: Vec<&str> = version.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return false;
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return false;
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(year) || !all_digits(month) || !all_digits(day) {
            return false;
        }
        let month: u32 = month.parse().unwrap_or(0);
        let day: u32 = day.parse().unwrap_or(0);
        (1..=12).contains(&month) && (1..=31).contains(&day)
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl AsRef<str> for ApiVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version() {
        assert_eq!(ApiVersion::default().as_ref(), "2024-09-27");
    }

    #[test]
    fn test_parse_valid_versions() {
        assert!("2024-09-27".parse::<ApiVersion>().is_ok());
        assert!(" 2025-01-01 ".parse::<ApiVersion>().is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid_versions() {
        for bad in ["2024-09", "2024-13-01", "2024-00-10", "24-09-27", "latest", ""] {
            assert!(
                matches!(
                    bad.parse::<ApiVersion>(),
                    Err(ConfigError::InvalidApiVersion { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_versions_order_by_date() {
        let older = ApiVersion::new("2024-01-31").unwrap();
        let newer = ApiVersion::new("2024-09-27").unwrap();
        assert!(older < newer);
    }
}
