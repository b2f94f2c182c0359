//! Purchase wizard.
//!
//! A sequential wizard that resolves the inputs a purchase still needs. Daily
//! rental plans ask for a number of days first; every plan then asks for a
//! unit count. Confirmation consumes the selection exactly once.

use std::fmt;

use crate::catalog::Package;

use super::errors::PurchaseError;
use super::models::{PurchaseOrder, PurchaseSelection};

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// Nothing selected.
    #[default]
    Idle,

    /// Collecting the rental length of a daily plan.
    AwaitingDuration,

    /// Collecting the number of units.
    AwaitingCount,

    /// Request handed to the backend.
    Submitting,

    /// Purchase confirmed.
    Completed,

    /// Purchase rejected or failed.
    Failed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::AwaitingDuration => "awaiting-duration",
            Self::AwaitingCount => "awaiting-count",
            Self::Submitting => "submitting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };

        f.write_str(label)
    }
}

/// Sequential state machine collecting purchase parameters.
#[derive(Debug, Default)]
pub struct PurchaseFlow {
    state: FlowState,
    selection: Option<PurchaseSelection>,
}

impl PurchaseFlow {
    /// Starts the wizard for one package. Daily plans ask for a rental length
    /// first, every other plan goes straight to the unit count.
    pub fn select(&mut self, package: Package) -> FlowState {
        self.state = if package.is_daily() {
            FlowState::AwaitingDuration
        } else {
            FlowState::AwaitingCount
        };
        self.selection = Some(PurchaseSelection::new(package));

        self.state
    }

    /// Records the rental length. Missing or zero input is clamped to one
    /// day.
    ///
    /// # Errors
    ///
    /// Returns an error when the wizard is not collecting a rental length.
    pub fn provide_days(&mut self, days: Option<u32>) -> Result<FlowState, PurchaseError> {
        if self.state != FlowState::AwaitingDuration {
            return Err(PurchaseError::OutOfOrder {
                expected: FlowState::AwaitingDuration,
                actual: self.state,
            });
        }

        if let Some(selection) = &mut self.selection {
            selection.days = clamp_min_one(days);
        }

        self.state = FlowState::AwaitingCount;

        Ok(self.state)
    }

    /// Records the unit count. Missing or zero input is clamped to one.
    ///
    /// # Errors
    ///
    /// Returns an error when the wizard is not collecting a unit count.
    pub fn provide_count(&mut self, count: Option<u32>) -> Result<FlowState, PurchaseError> {
        if self.state != FlowState::AwaitingCount {
            return Err(PurchaseError::OutOfOrder {
                expected: FlowState::AwaitingCount,
                actual: self.state,
            });
        }

        if let Some(selection) = &mut self.selection {
            selection.count = clamp_min_one(count);
        }

        Ok(self.state)
    }

    /// Consumes the selection into the request payload and moves to
    /// `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns an error when a daily plan still awaits its rental length or
    /// nothing is selected.
    pub fn confirm(&mut self) -> Result<PurchaseOrder, PurchaseError> {
        match self.state {
            FlowState::AwaitingCount => {
                let selection = self.selection.take().ok_or(PurchaseError::NoSelection)?;

                self.state = FlowState::Submitting;

                Ok(selection.to_order())
            }
            FlowState::AwaitingDuration => Err(PurchaseError::OutOfOrder {
                expected: FlowState::AwaitingCount,
                actual: self.state,
            }),
            _ => Err(PurchaseError::NoSelection),
        }
    }

    /// Marks the submitted purchase as confirmed.
    pub fn complete(&mut self) {
        self.state = FlowState::Completed;
    }

    /// Marks the submitted purchase as failed.
    pub fn fail(&mut self) {
        self.state = FlowState::Failed;
    }

    /// Discards any in-progress selection and returns to `Idle`.
    pub fn cancel(&mut self) {
        self.selection = None;
        self.state = FlowState::Idle;
    }

    /// Current wizard position.
    #[must_use]
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The selection in flight, when the wizard is mid-collection.
    #[must_use]
    pub fn selection(&self) -> Option<&PurchaseSelection> {
        self.selection.as_ref()
    }
}

fn clamp_min_one(value: Option<u32>) -> u32 {
    value.unwrap_or(1).max(1)
}
