//! Service layer: business logic between the HTTP handlers and the store.

pub mod blog_service;
pub mod credentials;

pub use blog_service::BlogService;
pub use credentials::Credentials;
