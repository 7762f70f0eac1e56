//! HTTP handlers for the people resource and the static pages.

pub mod pages;
pub mod people;
