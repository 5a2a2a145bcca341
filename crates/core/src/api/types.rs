//! Types for breed/image API responses.

use serde::{Deserialize, Serialize};

/// A cat breed record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Breed {
    /// Stable external identifier (e.g. "beng").
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Life span in years, as the API reports it (e.g. "12 - 16").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_span: Option<String>,
    /// Comma-separated temperament traits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperament: Option<String>,
}

/// A single photograph, optionally tagged with one breed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub breeds: Vec<Breed>,
}

impl Image {
    /// The breed this image is tagged with, if any.
    pub fn primary_breed(&self) -> Option<&Breed> {
        self.breeds.first()
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}
