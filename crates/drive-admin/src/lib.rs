//! Client-side logic behind the driving-school admin console.
//!
//! Every screen of the console is a thin layer over the remote admin API. This crate
//! holds the pieces that are worth testing on their own: field validation, the form
//! controller, the HTTP gateway and its cancellation scope, the review queues, the
//! report builder and the dashboard shell. Rendering lives in the console binary.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod forms;
pub mod reports;
pub mod review;
pub mod session;
pub mod telemetry;
pub mod validation;
