//! Testing utilities and a mock implementation of the breed/image API.
//!
//! # Example
//!
//! ```rust,ignore
//! use catfinder_core::testing::{fixtures, MockCatApi};
//!
//! let api = MockCatApi::new();
//! api.set_breeds(vec![fixtures::breed("beng", "Bengal")]).await;
//! api.set_random_images(vec![fixtures::image("img1")]).await;
//! ```

mod mock_cat_api;

pub use mock_cat_api::{MockCatApi, RecordedApiCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::api::{Breed, Image};

    /// A breed with descriptive fields filled in.
    pub fn breed(id: &str, name: &str) -> Breed {
        Breed {
            id: id.to_string(),
            name: name.to_string(),
            origin: Some("Egypt".to_string()),
            life_span: Some("14 - 15".to_string()),
            temperament: Some("Active, Energetic, Intelligent".to_string()),
        }
    }

    /// An untagged image with a CDN-style URL.
    pub fn image(id: &str) -> Image {
        Image {
            id: id.to_string(),
            url: format!("https://cdn2.thecatapi.com/images/{}.jpg", id),
            width: 1200,
            height: 800,
            breeds: vec![],
        }
    }

    /// An image tagged with `breed`.
    pub fn breed_image(id: &str, breed: Breed) -> Image {
        Image {
            breeds: vec![breed],
            ..image(id)
        }
    }

    /// A typical local breed list.
    pub fn breed_list() -> Vec<Breed> {
        vec![
            breed("abys", "Abyssinian"),
            breed("beng", "Bengal"),
            breed("bomb", "Bombay"),
            breed("mcoo", "Maine Coon"),
            breed("siam", "Siamese"),
        ]
    }
}
