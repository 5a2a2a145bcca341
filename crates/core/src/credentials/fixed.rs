use super::CredentialSource;

/// A credential fixed at construction; mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct FixedCredentials {
    api_key: Option<String>,
}

impl FixedCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// A source with no credential configured.
    pub fn none() -> Self {
        Self { api_key: None }
    }
}

impl CredentialSource for FixedCredentials {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}
