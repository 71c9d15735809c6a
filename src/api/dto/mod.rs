//! Data Transfer Objects for form and JSON request/response bodies.

pub mod entry_dto;

pub use entry_dto::*;
