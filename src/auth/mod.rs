use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use repo_types::{CreateUserError, NewUser, User};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
