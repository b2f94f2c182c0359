//! Storefront backend gateway.

pub mod client;
pub mod errors;
pub mod models;

pub use client::{BackendApi, BackendClient, BackendConfig, USER_ID_HEADER};
pub use errors::GatewayError;
pub use models::VerifiedUser;
