//! API envelope shapes consumed by the HTTP collaborator.

mod response;

pub use response::{ApiResponse, ErrorBody, Meta};
