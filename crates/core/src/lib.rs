pub mod api;
pub mod browse;
pub mod config;
pub mod coordinator;
pub mod credentials;
pub mod resolver;
pub mod testing;

pub use api::{
    validate_endpoint, ApiError, ApiErrorKind, ApiTransport, Breed, CatApi, CatApiClient,
    Endpoint, Image, GENERIC_FAILURE_MESSAGE, NETWORK_FAILURE_MESSAGE,
};
pub use browse::{BreedCollection, CatBrowser, ImageDetail, KnownBreeds, RandomCat};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_client_config,
    validate_config, ClientConfig, Config, ConfigError, CredentialsConfig, SanitizedConfig,
    ServerConfig, UpstreamConfig,
};
pub use coordinator::{OperationState, OperationToken, RequestCoordinator};
pub use credentials::{
    create_credential_source, CredentialSource, EnvCredentials, FixedCredentials,
    MISSING_CREDENTIAL_MESSAGE,
};
pub use resolver::{
    find_local_match, BreedResolver, MatchSource, MatchStrategy, Resolution,
};
