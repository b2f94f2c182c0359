//! `eSIM` service errors.

use thiserror::Error;

use crate::gateway::GatewayError;

use super::status::{ActionKind, CanonicalStatus};

/// Errors raised by `eSIM` lifecycle operations.
#[derive(Debug, Error)]
pub enum EsimServiceError {
    /// Backend call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// No record with the requested ICCID.
    #[error("no eSIM with ICCID {0}")]
    UnknownIccid(String),

    /// The record's status does not permit the action.
    #[error("{action} is not permitted while the eSIM is {status}")]
    NotPermitted {
        /// Requested action.
        action: ActionKind,

        /// Current display status of the record.
        status: CanonicalStatus,
    },

    /// The record is missing the transaction number the call needs.
    #[error("eSIM {0} has no transaction number")]
    MissingTranNo(String),

    /// The same action is already running for this record.
    #[error("{action} is already in progress for eSIM {iccid}")]
    AlreadyPending {
        /// Target record.
        iccid: String,

        /// Requested action.
        action: ActionKind,
    },
}
