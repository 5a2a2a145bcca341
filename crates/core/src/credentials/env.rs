//! Environment-variable credential lookup.

use super::CredentialSource;

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads the credential from a list of environment variables.
///
/// Names are checked in order; the first non-blank value wins and is
/// returned exactly as set.
pub struct EnvCredentials {
    names: Vec<String>,
    lookup: Lookup,
}

impl EnvCredentials {
    pub fn new(names: Vec<String>) -> Self {
        Self::with_lookup(names, |name| std::env::var(name).ok())
    }

    /// Use a custom variable lookup instead of the process environment.
    pub fn with_lookup<F>(names: Vec<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            names,
            lookup: Box::new(lookup),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        self.names
            .iter()
            .filter_map(|name| (self.lookup)(name))
            .find(|value| !value.trim().is_empty())
    }

    fn source_name(&self) -> &'static str {
        "env"
    }
}
