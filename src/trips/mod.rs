pub mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use repo_types::{NewTrip, Trip};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::trip_routes())
}
