//! People routes generated from the resolved API document.
//! Only enabled operations are mounted: a disabled method on a mounted path answers 405,
//! a path with no enabled method is not mounted at all.

use crate::config::Operation;
use crate::handlers::people;
use crate::state::AppState;
use axum::{routing::MethodRouter, Router};

pub fn people_routes(state: AppState) -> Router {
    let Some(resource) = state.api.people.clone() else {
        return Router::new();
    };
    let collection_path = resource.collection_path(&state.api.base_path);
    let item_path = format!("{}/:person_id", collection_path);

    let mut collection: Option<MethodRouter<AppState>> = None;
    if resource.allows(Operation::ReadAll) {
        collection = Some(collection.unwrap_or_else(MethodRouter::new).get(people::read_all));
    }
    if resource.allows(Operation::Create) {
        collection = Some(collection.unwrap_or_else(MethodRouter::new).post(people::create));
    }

    let mut item: Option<MethodRouter<AppState>> = None;
    if resource.allows(Operation::ReadOne) {
        item = Some(item.unwrap_or_else(MethodRouter::new).get(people::read_one));
    }
    if resource.allows(Operation::Update) {
        item = Some(item.unwrap_or_else(MethodRouter::new).put(people::update));
    }
    if resource.allows(Operation::Delete) {
        item = Some(item.unwrap_or_else(MethodRouter::new).delete(people::delete));
    }

    let mut router = Router::new();
    if let Some(methods) = collection {
        tracing::debug!(path = %collection_path, "mounting people collection");
        router = router.route(&collection_path, methods);
    }
    if let Some(methods) = item {
        tracing::debug!(path = %item_path, "mounting people item");
        router = router.route(&item_path, methods);
    }
    router.with_state(state)
}
