//! Route modules.

pub mod health;
pub mod story;

use axum::Router;

use crate::state::AppState;

/// Builds the full application router. Shared by `main` and the
/// integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(story::router(&state))
        .with_state(state)
}
