//! People API: a REST collection of people with routes generated from an API document.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;
pub mod store;

pub use config::{load_document, resolve, ApiDocument, Operation, ResolvedApi, Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{NewPerson, Person, PersonUpdate};
pub use routes::{app, common_routes, docs_routes, people_routes};
pub use service::PeopleService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryPersonStore, PersonStore, PgPersonStore};
