//! Breed resolution: local name matching first, remote search second.
//!
//! Local matching runs an ordered list of strategies (exact, prefix, contains)
//! over case-folded, trimmed names. The first strategy that matches anything
//! wins, and inside a strategy list order is the only tie-break.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::api::{ApiError, Breed, CatApi};

/// Trim and case-fold a term or breed name for comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// A single local matching rule over normalized strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Exact,
    Prefix,
    Contains,
}

impl MatchStrategy {
    /// Strategies in evaluation order.
    pub const PRIORITY: [MatchStrategy; 3] = [
        MatchStrategy::Exact,
        MatchStrategy::Prefix,
        MatchStrategy::Contains,
    ];

    /// Both arguments must already be normalized.
    pub fn matches(self, term: &str, name: &str) -> bool {
        match self {
            MatchStrategy::Exact => name == term,
            MatchStrategy::Prefix => name.starts_with(term),
            MatchStrategy::Contains => name.contains(term),
        }
    }
}

/// Where a resolved breed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchSource {
    Local { strategy: MatchStrategy },
    Remote,
}

/// Find the best local match for `term`, with the strategy that produced it.
pub fn find_local_match_with_strategy<'a>(
    term: &str,
    breeds: &'a [Breed],
) -> Option<(&'a Breed, MatchStrategy)> {
    let term = normalize(term);
    if term.is_empty() || breeds.is_empty() {
        return None;
    }

    let names: Vec<String> = breeds.iter().map(|b| normalize(&b.name)).collect();

    MatchStrategy::PRIORITY.into_iter().find_map(|strategy| {
        names
            .iter()
            .position(|name| strategy.matches(&term, name))
            .map(|index| (&breeds[index], strategy))
    })
}

/// Find the best local match for `term` in `breeds`.
pub fn find_local_match<'a>(term: &str, breeds: &'a [Breed]) -> Option<&'a Breed> {
    find_local_match_with_strategy(term, breeds).map(|(breed, _)| breed)
}

/// A single resolved breed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub breed: Breed,
    pub source: MatchSource,
}

/// Resolves free-text terms to one breed.
pub struct BreedResolver {
    api: Arc<dyn CatApi>,
}

impl BreedResolver {
    pub fn new(api: Arc<dyn CatApi>) -> Self {
        Self { api }
    }

    /// Resolve `term` to a single breed, or `ApiError::NotFound`.
    pub async fn resolve(&self, term: &str, known_breeds: &[Breed]) -> Result<Breed, ApiError> {
        self.resolve_detailed(term, known_breeds)
            .await
            .map(|resolution| resolution.breed)
    }

    /// Like [`resolve`](Self::resolve), also reporting which path matched.
    ///
    /// A blank term is `NotFound` without any remote call. Otherwise, when no
    /// local strategy matches, the raw term is sent to remote search and the
    /// first result is taken.
    pub async fn resolve_detailed(
        &self,
        term: &str,
        known_breeds: &[Breed],
    ) -> Result<Resolution, ApiError> {
        if normalize(term).is_empty() {
            return Err(not_found(term));
        }

        if let Some((breed, strategy)) = find_local_match_with_strategy(term, known_breeds) {
            debug!(
                "Resolved '{}' locally to '{}' ({:?})",
                term, breed.id, strategy
            );
            return Ok(Resolution {
                breed: breed.clone(),
                source: MatchSource::Local { strategy },
            });
        }

        debug!(
            "No local match for '{}' among {} breeds, searching remotely",
            term,
            known_breeds.len()
        );

        let breed = self
            .api
            .search_breeds(term)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(term))?;

        Ok(Resolution {
            breed,
            source: MatchSource::Remote,
        })
    }
}

fn not_found(term: &str) -> ApiError {
    ApiError::NotFound(format!("No breed found for \"{}\".", term.trim()))
}
