//! Sources for the upstream API credential held by the gateway.
//!
//! The credential is looked up on every request, so a missing key is a
//! request-time error rather than a startup failure.

mod env;
mod fixed;

pub use env::EnvCredentials;
pub use fixed::FixedCredentials;

use crate::api::ApiError;
use crate::config::CredentialsConfig;

/// Message reported when no credential is available.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "CAT_API_KEY is not configured on the server.";

/// Supplies the secret attached to upstream requests.
pub trait CredentialSource: Send + Sync {
    /// The current credential, if one is configured and non-empty.
    fn api_key(&self) -> Option<String>;

    /// Human-readable name for logs.
    fn source_name(&self) -> &'static str;

    /// Like [`api_key`](Self::api_key), but absence is an `ApiError::Configuration`.
    fn require_api_key(&self) -> Result<String, ApiError> {
        self.api_key()
            .ok_or_else(|| ApiError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string()))
    }
}

/// Create the environment-backed credential source for `config`.
pub fn create_credential_source(config: &CredentialsConfig) -> Box<dyn CredentialSource> {
    Box::new(EnvCredentials::new(config.env_names.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;

    #[test]
    fn test_require_api_key_missing_is_configuration_error() {
        let source = FixedCredentials::none();
        let err = source.require_api_key().unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Configuration);
        assert_eq!(err.message(), MISSING_CREDENTIAL_MESSAGE);
    }

    #[test]
    fn test_require_api_key_present() {
        let source = FixedCredentials::new("secret");
        assert_eq!(source.require_api_key().unwrap(), "secret");
    }

    #[test]
    fn test_create_credential_source_uses_env() {
        let source = create_credential_source(&CredentialsConfig::default());
        assert_eq!(source.source_name(), "env");
    }
}
