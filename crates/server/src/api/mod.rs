pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::GatewayError;
pub use routes::create_router;
