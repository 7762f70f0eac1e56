//! OpenAPI document for the people routes, rewritten to match the configured paths and operations.

use crate::config::{Operation, ResolvedApi};
use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::people;
use crate::schema::{Acknowledgement, CreatePersonRequest, PersonBody, UpdatePersonRequest};
use axum::{routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

const DOC_COLLECTION_PATH: &str = "/api/people";
const DOC_ITEM_PATH: &str = "/api/people/{person_id}";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "People API",
        description = "Create, read, update and delete people"
    ),
    paths(
        people::read_all,
        people::read_one,
        people::create,
        people::update,
        people::delete,
    ),
    components(schemas(
        PersonBody,
        CreatePersonRequest,
        UpdatePersonRequest,
        Acknowledgement,
        ErrorBody,
        ErrorDetail,
    )),
    tags((name = "people", description = "The people collection"))
)]
pub struct ApiDoc;

/// Annotated document with paths moved under the configured collection and disabled operations removed.
pub fn tailored_openapi(api: &ResolvedApi) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let annotated = std::mem::take(&mut doc.paths.paths);
    let Some(resource) = api.people.as_ref() else {
        return doc;
    };
    let collection_path = resource.collection_path(&api.base_path);

    for (path, mut item) in annotated {
        match path.as_str() {
            DOC_COLLECTION_PATH => {
                if !resource.allows(Operation::ReadAll) {
                    item.get = None;
                }
                if !resource.allows(Operation::Create) {
                    item.post = None;
                }
                if item.get.is_some() || item.post.is_some() {
                    doc.paths.paths.insert(collection_path.clone(), item);
                }
            }
            DOC_ITEM_PATH => {
                if !resource.allows(Operation::ReadOne) {
                    item.get = None;
                }
                if !resource.allows(Operation::Update) {
                    item.put = None;
                }
                if !resource.allows(Operation::Delete) {
                    item.delete = None;
                }
                if item.get.is_some() || item.put.is_some() || item.delete.is_some() {
                    doc.paths
                        .paths
                        .insert(format!("{}/{{person_id}}", collection_path), item);
                }
            }
            _ => {
                doc.paths.paths.insert(path, item);
            }
        }
    }
    doc
}

/// GET {base}/openapi.json
pub fn docs_routes(api: &ResolvedApi) -> Router {
    let doc = Arc::new(tailored_openapi(api));
    let path = format!("{}/openapi.json", api.base_path);
    Router::new().route(
        &path,
        get(move || {
            let doc = Arc::clone(&doc);
            async move { Json(doc.as_ref().clone()) }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolvedResource;
    use std::collections::{HashMap, HashSet};

    fn api(path_segment: &str, ops: &[Operation]) -> ResolvedApi {
        ResolvedApi {
            base_path: "/v2".into(),
            people: Some(ResolvedResource {
                path_segment: path_segment.into(),
                operations: ops.iter().copied().collect::<HashSet<_>>(),
                validation: HashMap::new(),
            }),
        }
    }

    #[test]
    fn paths_follow_configuration() {
        let doc = tailored_openapi(&api("folks", &Operation::ALL));
        let keys: Vec<&String> = doc.paths.paths.keys().collect();
        assert_eq!(keys, vec!["/v2/folks", "/v2/folks/{person_id}"]);
    }

    #[test]
    fn disabled_operations_are_dropped() {
        let doc = tailored_openapi(&api("people", &[Operation::ReadAll]));
        assert_eq!(doc.paths.paths.len(), 1);
        let item = &doc.paths.paths["/v2/people"];
        assert!(item.get.is_some());
        assert!(item.post.is_none());
    }

    #[test]
    fn no_people_resource_means_no_paths() {
        let doc = tailored_openapi(&ResolvedApi {
            base_path: "/api".into(),
            people: None,
        });
        assert!(doc.paths.paths.is_empty());
    }
}
