//! Process configuration read once at startup

use chrono::Duration;

use crate::error::{Error, Result};

/// Signing secret for identity tokens (required)
pub const JWT_SECRET_ENV: &str = "LINKVAULT_JWT_SECRET";
/// Token lifetime, e.g. `3600`, `45m`, `12h`, `1d`
pub const JWT_EXPIRES_IN_ENV: &str = "LINKVAULT_JWT_EXPIRES_IN";

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;
const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// Token signing configuration, injected into [`crate::auth::TokenService`]
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    ttl: Duration,
}

impl TokenConfig {
    /// Build a config from an explicit secret with the default 1 day lifetime
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(Error::config(format!(
                "{} is not set; the token signing secret is required",
                JWT_SECRET_ENV
            )));
        }
        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            log::warn!(
                "{} is shorter than {} characters. Consider using a longer secret.",
                JWT_SECRET_ENV,
                MIN_RECOMMENDED_SECRET_LEN
            );
        }

        Ok(Self {
            secret,
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECONDS),
        })
    }

    /// Override the token lifetime
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Read the config from `LINKVAULT_JWT_SECRET` / `LINKVAULT_JWT_EXPIRES_IN`.
    ///
    /// A missing secret is fatal for anything serving protected operations.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(JWT_SECRET_ENV).unwrap_or_default();
        let config = Self::new(secret)?;

        match std::env::var(JWT_EXPIRES_IN_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Ok(config.with_ttl(parse_duration(&raw)?)),
            _ => Ok(config),
        }
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Parse a positive duration: bare seconds or `<n>s`, `<n>m`, `<n>h`, `<n>d`
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let invalid = || Error::config(format!("Invalid duration '{}'", raw));

    let (digits, unit_seconds) = match raw.char_indices().last() {
        Some((idx, 's')) => (&raw[..idx], 1),
        Some((idx, 'm')) => (&raw[..idx], 60),
        Some((idx, 'h')) => (&raw[..idx], 60 * 60),
        Some((idx, 'd')) => (&raw[..idx], 24 * 60 * 60),
        Some(_) => (raw, 1),
        None => return Err(invalid()),
    };

    let amount: i64 = digits.trim().parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }

    amount
        .checked_mul(unit_seconds)
        .map(Duration::seconds)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests don't run in parallel
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("3600").unwrap(), Duration::seconds(3600));
        assert_eq!(parse_duration("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_duration("1d").unwrap(), Duration::days(1));
        assert_eq!(parse_duration(" 7d ").unwrap(), Duration::days(7));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("d").is_err());
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("-5m").is_err());
        assert!(parse_duration("1w").is_err());
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_empty_secret_is_fatal() {
        let err = TokenConfig::new("   ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_ttl_is_one_day() {
        let config = TokenConfig::new("a-test-secret-that-is-long-enough-0123").unwrap();
        assert_eq!(config.ttl(), Duration::days(1));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = TokenConfig::new("super-secret-value").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();

        std::env::remove_var(JWT_SECRET_ENV);
        std::env::remove_var(JWT_EXPIRES_IN_ENV);
        assert!(TokenConfig::from_env().is_err());

        std::env::set_var(JWT_SECRET_ENV, "env-secret-env-secret-env-secret-0000");
        std::env::set_var(JWT_EXPIRES_IN_ENV, "2h");
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.ttl(), Duration::hours(2));

        std::env::set_var(JWT_EXPIRES_IN_ENV, "forever");
        assert!(TokenConfig::from_env().is_err());

        std::env::remove_var(JWT_SECRET_ENV);
        std::env::remove_var(JWT_EXPIRES_IN_ENV);
    }
}
