//! People handlers: list, read, create, update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::PersonId;
use crate::response::{created, ok};
use crate::schema::{Acknowledgement, CreatePersonRequest, PersonBody, UpdatePersonRequest};
use crate::service::{PeopleService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;

fn rules(state: &AppState) -> HashMap<String, crate::config::ValidationRule> {
    state
        .api
        .people
        .as_ref()
        .map(|r| r.validation.clone())
        .unwrap_or_default()
}

/// List all people ordered by last name.
#[utoipa::path(
    get,
    path = "/api/people",
    tag = "people",
    responses(
        (status = 200, description = "All people, sorted by last name", body = [PersonBody])
    )
)]
pub async fn read_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let people = PeopleService::read_all(state.store.as_ref()).await?;
    let body: Vec<PersonBody> = people.into_iter().map(PersonBody::from).collect();
    Ok(ok(body))
}

/// Get one person by id.
#[utoipa::path(
    get,
    path = "/api/people/{person_id}",
    tag = "people",
    params(("person_id" = i64, Path, description = "Id of the person")),
    responses(
        (status = 200, description = "Person found", body = PersonBody),
        (status = 400, description = "person_id is not an integer", body = ErrorBody),
        (status = 404, description = "No person with that id", body = ErrorBody)
    )
)]
pub async fn read_one(
    State(state): State<AppState>,
    PersonId(person_id): PersonId,
) -> Result<impl IntoResponse, AppError> {
    let person = PeopleService::read_one(state.store.as_ref(), person_id).await?;
    Ok(ok(PersonBody::from(person)))
}

/// Create a person unless one with the same first and last name exists.
#[utoipa::path(
    post,
    path = "/api/people",
    tag = "people",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonBody),
        (status = 409, description = "Person with that name exists already", body = ErrorBody),
        (status = 422, description = "Body failed validation", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate(&[("fname", req.fname.as_str()), ("lname", req.lname.as_str())], &rules(&state))?;
    let person = PeopleService::create(state.store.as_ref(), req.into()).await?;
    Ok(created(PersonBody::from(person)))
}

/// Change a person's first name; refreshes the timestamp.
#[utoipa::path(
    put,
    path = "/api/people/{person_id}",
    tag = "people",
    params(("person_id" = i64, Path, description = "Id of the person")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonBody),
        (status = 400, description = "person_id is not an integer", body = ErrorBody),
        (status = 404, description = "No person with that id", body = ErrorBody),
        (status = 422, description = "Body failed validation", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PersonId(person_id): PersonId,
    Json(req): Json<UpdatePersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::validate_partial(&[("fname", req.fname.as_str())], &rules(&state))?;
    let person = PeopleService::update(state.store.as_ref(), person_id, req.into()).await?;
    Ok(ok(PersonBody::from(person)))
}

/// Delete a person by id.
#[utoipa::path(
    delete,
    path = "/api/people/{person_id}",
    tag = "people",
    params(("person_id" = i64, Path, description = "Id of the person")),
    responses(
        (status = 200, description = "Person deleted", body = Acknowledgement),
        (status = 400, description = "person_id is not an integer", body = ErrorBody),
        (status = 404, description = "No person with that id", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    PersonId(person_id): PersonId,
) -> Result<impl IntoResponse, AppError> {
    let message = PeopleService::delete(state.store.as_ref(), person_id).await?;
    Ok(ok(Acknowledgement { message }))
}
