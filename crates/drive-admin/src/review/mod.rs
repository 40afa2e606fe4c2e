//! Review queues: pending enrollments and pending registrations.
//!
//! Both queues fetch on demand, filter locally and re-fetch after every successful
//! mutation instead of patching their local copy.

pub mod enrollments;
pub mod filters;
pub mod registrations;

#[cfg(test)]
mod tests;

pub use enrollments::EnrollmentQueue;
pub use filters::{DocumentFilter, StatusFilter};
pub use registrations::{RegistrationDialog, RegistrationQueue};

use crate::api::ApiError;

/// Error raised by a review queue action.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("another request is still in flight")]
    Busy,
    #[error("no pending record with id {0}")]
    NotFound(String),
    #[error("no registration is open for review")]
    NothingOpen,
}
