//! View models produced by browse operations.

use serde::Serialize;

use crate::api::{Breed, Image};

/// Name shown for a random image without a breed tag.
pub const RANDOM_CAT_FALLBACK_NAME: &str = "Random Cat";

/// Name shown when a collection's breed cannot be named.
pub const COLLECTION_FALLBACK_NAME: &str = "Collection";

const UNKNOWN: &str = "Unknown";

/// State of the locally loaded breed list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KnownBreeds {
    #[default]
    Loading,
    Ready(Vec<Breed>),
    Failed(String),
}

impl KnownBreeds {
    /// The breeds available for local matching; empty unless loaded.
    pub fn as_slice(&self) -> &[Breed] {
        match self {
            KnownBreeds::Ready(breeds) => breeds,
            KnownBreeds::Loading | KnownBreeds::Failed(_) => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, KnownBreeds::Loading)
    }

    /// Look up a breed by its ID.
    pub fn find_by_id(&self, breed_id: &str) -> Option<&Breed> {
        self.as_slice().iter().find(|b| b.id == breed_id)
    }
}

/// The random-cat card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RandomCat {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

impl From<Image> for RandomCat {
    fn from(image: Image) -> Self {
        let name = image
            .primary_breed()
            .map(|b| b.name.trim())
            .filter(|n| !n.is_empty())
            .unwrap_or(RANDOM_CAT_FALLBACK_NAME)
            .to_string();
        Self {
            id: image.id,
            name,
            image_url: image.url,
        }
    }
}

/// Images for one breed plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreedCollection {
    pub breed_id: String,
    pub breed_name: String,
    pub images: Vec<Image>,
}

/// A single image with display helpers for its breed metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDetail {
    pub image: Image,
}

impl ImageDetail {
    pub fn breed(&self) -> Option<&Breed> {
        self.image.primary_breed()
    }

    pub fn title(&self) -> &str {
        self.breed()
            .map(|b| b.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(RANDOM_CAT_FALLBACK_NAME)
    }

    pub fn origin(&self) -> String {
        self.breed_field(|b| b.origin.clone())
    }

    /// Life span with a unit, e.g. "12 - 15 years".
    pub fn life_span(&self) -> String {
        self.breed()
            .and_then(|b| b.life_span.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{} years", s))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn temperament(&self) -> String {
        self.breed_field(|b| b.temperament.clone())
    }

    /// "<width>x<height>"
    pub fn dimensions(&self) -> String {
        format!("{}x{}", self.image.width, self.image.height)
    }

    fn breed_field(&self, field: impl Fn(&Breed) -> Option<String>) -> String {
        self.breed()
            .and_then(field)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}
