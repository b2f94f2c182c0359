//! Roamery
//!
//! Roamery is a client for an `eSIM` mobile-data storefront: catalog
//! normalization, a purchase wizard, `eSIM` status and action resolution, and
//! a session/identity adapter over a remote backend API.

pub mod catalog;
pub mod config;
pub mod context;
pub mod esim;
pub mod gateway;
pub mod money;
pub mod purchase;
pub mod render;
pub mod session;
