//! Web layer for the transit gateway.
//!
//! Provides the departures and station lookup endpoints.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::{AppError, ValidationError, ValidationIssue};
pub use routes::create_router;
pub use state::AppState;
