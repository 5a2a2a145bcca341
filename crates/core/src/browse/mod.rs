//! Browse operations: breed list, search, random cat, collections, image detail.

mod types;

pub use types::*;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Breed, CatApi};
use crate::coordinator::{OperationState, RequestCoordinator};
use crate::resolver::BreedResolver;

/// Images fetched per breed collection.
pub const COLLECTION_IMAGE_LIMIT: u32 = 20;

/// Images fetched per random-cat request.
pub const RANDOM_IMAGE_LIMIT: u32 = 1;

/// High-level operations over a [`CatApi`].
///
/// Random-cat requests go through a latest-wins coordinator owned by this
/// browser; everything else is a plain request/response call.
pub struct CatBrowser {
    api: Arc<dyn CatApi>,
    resolver: BreedResolver,
    random: RequestCoordinator<RandomCat>,
}

impl CatBrowser {
    pub fn new(api: Arc<dyn CatApi>) -> Self {
        Self {
            resolver: BreedResolver::new(Arc::clone(&api)),
            api,
            random: RequestCoordinator::new(),
        }
    }

    /// Fetch the full breed list.
    pub async fn load_breeds(&self) -> KnownBreeds {
        match self.api.get_breeds().await {
            Ok(breeds) => {
                info!("Loaded {} breeds", breeds.len());
                KnownBreeds::Ready(breeds)
            }
            Err(e) => {
                warn!("Failed to load breeds: {}", e);
                KnownBreeds::Failed(e.to_string())
            }
        }
    }

    /// Resolve a user search to one breed.
    ///
    /// Does not wait for a loading breed list: with no local breeds the
    /// resolver goes straight to remote search.
    pub async fn search(&self, term: &str, known: &KnownBreeds) -> Result<Breed, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(ApiError::Validation("Type a breed name first.".to_string()));
        }

        if known.is_loading() {
            debug!("Breed list still loading, searching '{}' remotely", term);
        }

        self.resolver.resolve(term, known.as_slice()).await
    }

    /// Request a new random cat; only the latest request may update state.
    pub fn random_cat(&self) -> JoinHandle<bool> {
        let api = Arc::clone(&self.api);
        self.random.start_operation(move || async move {
            api.random_images(RANDOM_IMAGE_LIMIT)
                .await?
                .into_iter()
                .next()
                .filter(|image| image.has_url())
                .map(RandomCat::from)
                .ok_or_else(|| ApiError::NotFound("No cat image found.".to_string()))
        })
    }

    pub fn random_cat_state(&self) -> OperationState<RandomCat> {
        self.random.snapshot()
    }

    pub fn subscribe_random_cat(&self) -> watch::Receiver<OperationState<RandomCat>> {
        self.random.subscribe()
    }

    /// Images for a breed plus its display name.
    ///
    /// The name comes from the local list when possible, otherwise from
    /// `GET /breeds/{id}`.
    pub async fn collection(
        &self,
        breed_id: &str,
        known: &KnownBreeds,
    ) -> Result<BreedCollection, ApiError> {
        let images = self
            .api
            .breed_images(breed_id, COLLECTION_IMAGE_LIMIT)
            .await?;

        let local_name = known
            .find_by_id(breed_id)
            .map(|b| b.name.clone())
            .filter(|n| !n.is_empty());

        let breed_name = match local_name {
            Some(name) => name,
            None => {
                let breed = self.api.get_breed(breed_id).await?;
                Some(breed.name)
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| COLLECTION_FALLBACK_NAME.to_string())
            }
        };

        Ok(BreedCollection {
            breed_id: breed_id.to_string(),
            breed_name,
            images,
        })
    }

    /// A single image by ID; an image without URL counts as missing.
    pub async fn image_detail(&self, image_id: &str) -> Result<ImageDetail, ApiError> {
        let image = self.api.get_image(image_id).await?;
        if !image.has_url() {
            return Err(ApiError::NotFound("Image not found.".to_string()));
        }
        Ok(ImageDetail { image })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::testing::{fixtures, MockCatApi, RecordedApiCall};

    fn browser() -> (Arc<MockCatApi>, CatBrowser) {
        let api = Arc::new(MockCatApi::new());
        let browser = CatBrowser::new(api.clone());
        (api, browser)
    }

    #[tokio::test]
    async fn test_load_breeds() {
        let (api, browser) = browser();
        api.set_breeds(fixtures::breed_list()).await;

        let known = browser.load_breeds().await;
        assert_eq!(known.as_slice().len(), 5);
    }

    #[tokio::test]
    async fn test_load_breeds_failure() {
        let (api, browser) = browser();
        api.set_next_error(ApiError::Network("Could not reach The Cat API.".to_string()))
            .await;

        let known = browser.load_breeds().await;
        assert_eq!(
            known,
            KnownBreeds::Failed("Could not reach The Cat API.".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_blank_is_validation_error() {
        let (api, browser) = browser();
        let err = browser
            .search("   ", &KnownBreeds::Ready(fixtures::breed_list()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::Validation);
        assert_eq!(err.to_string(), "Type a breed name first.");
        assert_eq!(api.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_search_local() {
        let (api, browser) = browser();
        let breed = browser
            .search("maine", &KnownBreeds::Ready(fixtures::breed_list()))
            .await
            .unwrap();

        assert_eq!(breed.id, "mcoo");
        assert_eq!(api.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_search_while_loading_goes_remote_with_trimmed_term() {
        let (api, browser) = browser();
        api.set_search_results(vec![fixtures::breed("beng", "Bengal")])
            .await;

        let breed = browser
            .search("  Bengal  ", &KnownBreeds::Loading)
            .await
            .unwrap();

        assert_eq!(breed.id, "beng");
        assert_eq!(
            api.recorded_calls().await,
            vec![RecordedApiCall::SearchBreeds {
                term: "Bengal".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_search_not_found_message() {
        let (_api, browser) = browser();
        let err = browser
            .search("dragon", &KnownBreeds::Ready(fixtures::breed_list()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No breed found for \"dragon\".");
    }

    #[tokio::test]
    async fn test_random_cat_success() {
        let (api, browser) = browser();
        api.set_random_images(vec![fixtures::breed_image(
            "img1",
            fixtures::breed("siam", "Siamese"),
        )])
        .await;

        assert!(browser.random_cat().await.unwrap());

        let state = browser.random_cat_state();
        let cat = state.value.unwrap();
        assert_eq!(cat.name, "Siamese");
        assert_eq!(cat.id, "img1");
        assert!(!state.in_progress);
        assert_eq!(
            api.recorded_calls().await,
            vec![RecordedApiCall::RandomImages { limit: 1 }]
        );
    }

    #[tokio::test]
    async fn test_random_cat_empty_is_not_found() {
        let (_api, browser) = browser();

        assert!(browser.random_cat().await.unwrap());

        let state = browser.random_cat_state();
        assert!(state.value.is_none());
        assert_eq!(
            state.error,
            Some(ApiError::NotFound("No cat image found.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_collection_uses_local_name() {
        let (api, browser) = browser();
        api.set_breed_images("beng", vec![fixtures::image("a"), fixtures::image("b")])
            .await;

        let collection = browser
            .collection("beng", &KnownBreeds::Ready(fixtures::breed_list()))
            .await
            .unwrap();

        assert_eq!(collection.breed_name, "Bengal");
        assert_eq!(collection.images.len(), 2);
        assert_eq!(
            api.recorded_calls().await,
            vec![RecordedApiCall::BreedImages {
                breed_id: "beng".to_string(),
                limit: COLLECTION_IMAGE_LIMIT
            }]
        );
    }

    #[tokio::test]
    async fn test_collection_fetches_name_remotely() {
        let (api, browser) = browser();
        api.set_breeds(vec![fixtures::breed("beng", "Bengal")]).await;

        let collection = browser
            .collection("beng", &KnownBreeds::Loading)
            .await
            .unwrap();

        assert_eq!(collection.breed_name, "Bengal");
        assert!(collection.images.is_empty());
        assert!(api
            .recorded_calls()
            .await
            .contains(&RecordedApiCall::GetBreed {
                breed_id: "beng".to_string()
            }));
    }

    #[tokio::test]
    async fn test_collection_unnamed_breed_falls_back() {
        let (api, browser) = browser();
        api.set_breeds(vec![fixtures::breed("xxxx", "")]).await;

        let collection = browser
            .collection("xxxx", &KnownBreeds::Loading)
            .await
            .unwrap();
        assert_eq!(collection.breed_name, COLLECTION_FALLBACK_NAME);
    }

    #[tokio::test]
    async fn test_image_detail() {
        let (api, browser) = browser();
        api.add_image(fixtures::breed_image(
            "img1",
            fixtures::breed("abys", "Abyssinian"),
        ))
        .await;

        let detail = browser.image_detail("img1").await.unwrap();
        assert_eq!(detail.title(), "Abyssinian");
    }

    #[tokio::test]
    async fn test_image_detail_without_url_is_not_found() {
        let (api, browser) = browser();
        let mut image = fixtures::image("img1");
        image.url = String::new();
        api.add_image(image).await;

        let err = browser.image_detail("img1").await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("Image not found.".to_string()));
    }
}
