//! HTTP gateway that forwards breed/image requests upstream with a
//! server-held credential.

pub mod api;
pub mod metrics;
pub mod state;
