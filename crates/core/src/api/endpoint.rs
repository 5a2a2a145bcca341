//! Relative API paths and the rule that keeps them relative.

use std::fmt;

use urlencoding::encode;

use super::ApiError;

/// Check that `path` is rooted and carries no scheme or protocol-relative prefix.
///
/// Shared by the client and the gateway so both reject the same inputs.
pub fn validate_endpoint(path: &str) -> Result<(), ApiError> {
    if !path.starts_with('/') || path.starts_with("//") || path.contains("://") {
        return Err(ApiError::Validation(format!(
            "Invalid endpoint path: {:?}",
            path
        )));
    }
    Ok(())
}

/// A validated, path-only endpoint such as `/breeds/search?q=beng`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(String);

impl Endpoint {
    /// Validate an arbitrary relative path.
    pub fn parse(path: impl Into<String>) -> Result<Self, ApiError> {
        let path = path.into();
        validate_endpoint(&path)?;
        Ok(Self(path))
    }

    pub fn breeds() -> Self {
        Self("/breeds".to_string())
    }

    pub fn breed_search(term: &str) -> Self {
        Self(format!("/breeds/search?q={}", encode(term)))
    }

    pub fn breed(breed_id: &str) -> Self {
        Self(format!("/breeds/{}", encode(breed_id)))
    }

    pub fn breed_images(breed_id: &str, limit: u32) -> Self {
        Self(format!(
            "/images/search?limit={}&breed_ids={}",
            limit,
            encode(breed_id)
        ))
    }

    pub fn random_images(limit: u32) -> Self {
        Self(format!("/images/search?limit={}", limit))
    }

    pub fn image(image_id: &str) -> Self {
        Self(format!("/images/{}", encode(image_id)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
