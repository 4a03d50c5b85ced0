//! Web layer for the train booking engine.
//!
//! Exposes station search, train search and filtering, fare quotes,
//! booking and the traveller profile as JSON endpoints.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
