//! `eSIM` lifecycle observation and actions.

pub mod errors;
pub mod models;
pub mod service;
pub mod status;

pub use errors::EsimServiceError;
pub use models::{EsimRecord, PackageApplication, TopupOrder};
pub use service::EsimService;
pub use status::{
    ActionKind, CanonicalStatus, can_cancel, can_delete, can_refresh, can_top_up, resolve_status,
    sort_by_status,
};
