//! Session establishment and storage.

pub mod assertion;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

pub use assertion::{HostAssertion, InitData};
pub use errors::{SessionServiceError, SessionStoreError};
pub use models::{Identity, SessionState};
pub use service::SessionService;
pub use store::SessionStore;
