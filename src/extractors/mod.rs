//! Request extractors whose rejections use the API error body.

pub mod person_id;

pub use person_id::PersonId;
