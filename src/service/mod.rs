//! PeopleService: the people operations, plus request validation.

mod people;
mod validation;
pub use people::PeopleService;
pub use validation::RequestValidator;
