pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /validation/validate         POST  run rules against a record
/// /validation/client-script    POST  render browser-side checks
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/validation", validation::validation_router())
}
