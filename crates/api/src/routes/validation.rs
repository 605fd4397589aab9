//! Route definitions for the `/validation` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes mounted at `/validation`.
///
/// ```text
/// POST   /validate        -> validate
/// POST   /client-script   -> client_script
/// ```
pub fn validation_router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validation::validate))
        .route("/client-script", post(validation::client_script))
}
