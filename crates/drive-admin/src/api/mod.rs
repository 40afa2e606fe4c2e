//! Calls to the remote admin API.
//!
//! [`AdminGateway`] is the seam every view talks through; [`HttpGateway`] is the
//! reqwest-backed implementation and [`RequestScope`] makes in-flight calls abortable.

pub mod endpoints;
pub mod error;
pub mod gateway;
pub mod http;
pub mod scope;

#[cfg(test)]
pub(crate) mod fake;

pub use endpoints::Endpoint;
pub use error::ApiError;
pub use gateway::{AdminGateway, ReportDownload};
pub use http::HttpGateway;
pub use scope::RequestScope;
