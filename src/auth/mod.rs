use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod forms;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod provider;
pub mod repo;
pub mod repo_types;

pub use dto::AuthError;
pub use jwt::AuthUser;
pub use provider::{AuthProvider, LocalAuthProvider};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
