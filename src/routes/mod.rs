//! Router assembly: common routes, generated people routes, and the OpenAPI document.

mod common;
mod docs;
mod people;

pub use common::common_routes;
pub use docs::{docs_routes, tailored_openapi, ApiDoc};
pub use people::people_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router with request tracing and a request body size limit.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    let api = state.api.clone();
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes(&api))
        .merge(people_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}
