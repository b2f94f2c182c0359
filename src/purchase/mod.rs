//! Purchase wizard and submission.

pub mod errors;
pub mod flow;
pub mod models;
pub mod service;

pub use errors::PurchaseError;
pub use flow::{FlowState, PurchaseFlow};
pub use models::{PurchaseOrder, PurchaseSelection};
pub use service::PurchaseService;
