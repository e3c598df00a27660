//! API key authentication
//!
//! A static shared-secret check: the request header must equal the
//! configured key exactly (case-sensitive). No hashing, expiry or rate
//! limiting.

use crate::config::AuthConfig;

/// Denial reasons. Both map to HTTP 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Bad credentials")]
    Forbidden,

    /// No secret is configured, so nothing can authenticate.
    #[error("Bad credentials")]
    NotConfigured,
}

/// Compares one request header against the configured key.
#[derive(Clone)]
pub struct ApiKeyGate {
    header: String,
    api_key: Option<String>,
}

impl ApiKeyGate {
    pub fn new(header: impl Into<String>, api_key: Option<String>) -> Self {
        ApiKeyGate {
            header: header.into(),
            api_key,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.header.clone(), config.api_key.clone())
    }

    /// Header that carries the key, e.g. `AccessToken`
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn check(&self, presented: Option<&str>) -> Result<(), AuthError> {
        let expected = self.api_key.as_deref().ok_or(AuthError::NotConfigured)?;
        match presented {
            Some(token) if token == expected => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("header", &self.header)
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ApiKeyGate {
        ApiKeyGate::new("AccessToken", Some("s3cret".to_string()))
    }

    #[test]
    fn test_exact_match_allows() {
        assert_eq!(gate().check(Some("s3cret")), Ok(()));
    }

    #[test]
    fn test_mismatch_and_missing_deny() {
        assert_eq!(gate().check(Some("wrong")), Err(AuthError::Forbidden));
        assert_eq!(gate().check(None), Err(AuthError::Forbidden));
        assert_eq!(gate().check(Some("")), Err(AuthError::Forbidden));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert_eq!(gate().check(Some("S3CRET")), Err(AuthError::Forbidden));
        assert_eq!(gate().check(Some("s3cret ")), Err(AuthError::Forbidden));
    }

    #[test]
    fn test_unconfigured_gate_denies_everything() {
        let gate = ApiKeyGate::new("AccessToken", None);
        assert!(!gate.is_configured());
        assert_eq!(gate.check(None), Err(AuthError::NotConfigured));
        assert_eq!(gate.check(Some("")), Err(AuthError::NotConfigured));
    }

    #[test]
    fn test_from_config() {
        let config = AuthConfig {
            header: "X-Key".to_string(),
            api_key: Some("k".to_string()),
        };
        let gate = ApiKeyGate::from_config(&config);
        assert_eq!(gate.header(), "X-Key");
        assert!(gate.check(Some("k")).is_ok());
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", gate()).contains("s3cret"));
    }
}
