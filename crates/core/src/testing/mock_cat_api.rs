//! Mock breed/image API for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::{ApiError, Breed, CatApi, Image, GENERIC_FAILURE_MESSAGE};

/// A recorded API call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedApiCall {
    GetBreeds,
    SearchBreeds { term: String },
    GetBreed { breed_id: String },
    BreedImages { breed_id: String, limit: u32 },
    RandomImages { limit: u32 },
    GetImage { image_id: String },
}

/// Mock implementation of the CatApi trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable breeds, search results and images
/// - Track calls for assertions
/// - Simulate failures
#[derive(Debug)]
pub struct MockCatApi {
    /// Returned by `get_breeds`, also used by `get_breed`.
    breeds: Arc<RwLock<Vec<Breed>>>,
    /// Returned by `search_breeds` regardless of term.
    search_results: Arc<RwLock<Vec<Breed>>>,
    /// Images by ID for `get_image`.
    images: Arc<RwLock<HashMap<String, Image>>>,
    /// Images per breed ID for `breed_images`.
    breed_images: Arc<RwLock<HashMap<String, Vec<Image>>>>,
    /// Returned by `random_images`.
    random_images: Arc<RwLock<Vec<Image>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedApiCall>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ApiError>>>,
}

impl Default for MockCatApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatApi {
    pub fn new() -> Self {
        Self {
            breeds: Arc::new(RwLock::new(Vec::new())),
            search_results: Arc::new(RwLock::new(Vec::new())),
            images: Arc::new(RwLock::new(HashMap::new())),
            breed_images: Arc::new(RwLock::new(HashMap::new())),
            random_images: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub async fn set_breeds(&self, breeds: Vec<Breed>) {
        *self.breeds.write().await = breeds;
    }

    pub async fn set_search_results(&self, results: Vec<Breed>) {
        *self.search_results.write().await = results;
    }

    /// Add an image retrievable by ID.
    pub async fn add_image(&self, image: Image) {
        self.images.write().await.insert(image.id.clone(), image);
    }

    pub async fn set_breed_images(&self, breed_id: &str, images: Vec<Image>) {
        self.breed_images
            .write()
            .await
            .insert(breed_id.to_string(), images);
    }

    pub async fn set_random_images(&self, images: Vec<Image>) {
        *self.random_images.write().await = images;
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    pub async fn recorded_calls(&self) -> Vec<RecordedApiCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ApiError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Record the call, then return the injected error if one is pending.
    async fn enter(&self, call: RecordedApiCall) -> Result<(), ApiError> {
        self.calls.write().await.push(call);
        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn upstream_not_found() -> ApiError {
    ApiError::Upstream {
        status: 404,
        message: GENERIC_FAILURE_MESSAGE.to_string(),
    }
}

#[async_trait]
impl CatApi for MockCatApi {
    async fn get_breeds(&self) -> Result<Vec<Breed>, ApiError> {
        self.enter(RecordedApiCall::GetBreeds).await?;
        Ok(self.breeds.read().await.clone())
    }

    async fn search_breeds(&self, term: &str) -> Result<Vec<Breed>, ApiError> {
        self.enter(RecordedApiCall::SearchBreeds {
            term: term.to_string(),
        })
        .await?;
        Ok(self.search_results.read().await.clone())
    }

    async fn get_breed(&self, breed_id: &str) -> Result<Breed, ApiError> {
        self.enter(RecordedApiCall::GetBreed {
            breed_id: breed_id.to_string(),
        })
        .await?;
        self.breeds
            .read()
            .await
            .iter()
            .find(|b| b.id == breed_id)
            .cloned()
            .ok_or_else(upstream_not_found)
    }

    async fn breed_images(&self, breed_id: &str, limit: u32) -> Result<Vec<Image>, ApiError> {
        self.enter(RecordedApiCall::BreedImages {
            breed_id: breed_id.to_string(),
            limit,
        })
        .await?;
        Ok(self
            .breed_images
            .read()
            .await
            .get(breed_id)
            .map(|images| images.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn random_images(&self, limit: u32) -> Result<Vec<Image>, ApiError> {
        self.enter(RecordedApiCall::RandomImages { limit }).await?;
        Ok(self
            .random_images
            .read()
            .await
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_image(&self, image_id: &str) -> Result<Image, ApiError> {
        self.enter(RecordedApiCall::GetImage {
            image_id: image_id.to_string(),
        })
        .await?;
        self.images
            .read()
            .await
            .get(image_id)
            .cloned()
            .ok_or_else(upstream_not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let api = MockCatApi::new();
        api.get_breeds().await.unwrap();
        api.search_breeds("beng").await.unwrap();
        api.random_images(1).await.unwrap();

        assert_eq!(
            api.recorded_calls().await,
            vec![
                RecordedApiCall::GetBreeds,
                RecordedApiCall::SearchBreeds {
                    term: "beng".to_string()
                },
                RecordedApiCall::RandomImages { limit: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_next_error_is_consumed_once() {
        let api = MockCatApi::new();
        api.set_next_error(ApiError::Network("down".to_string()))
            .await;

        assert!(api.get_breeds().await.is_err());
        assert!(api.get_breeds().await.is_ok());
        assert_eq!(api.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_get_image_by_id_is_stable() {
        let api = MockCatApi::new();
        api.add_image(fixtures::image("abc")).await;

        let first = api.get_image("abc").await.unwrap();
        let second = api.get_image("abc").await.unwrap();
        assert_eq!(first.url, second.url);
        assert_eq!((first.width, first.height), (second.width, second.height));

        assert!(api.get_image("missing").await.is_err());
    }
}
