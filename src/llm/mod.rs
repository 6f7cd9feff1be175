pub mod client;
pub mod handlers;

pub use client::{ChatClient, MistralClient};

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
