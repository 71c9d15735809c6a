//! # flaskr
//!
//! A minimal single-user blog: log in with a fixed credential pair, post
//! title/text entries, list them newest first, search them, delete them.
//!
//! ## Architecture
//!
//! ```text
//! Browser (HTML forms, fetch)
//!     │
//!     ├── Router + login guards (api/, session/guard)
//!     ├── Session extractor, signed cookie (session/)
//!     ├── HTML pages (views/)
//!     │
//!     ├── BlogService (service/)
//!     │
//!     └── EntryStore, SQLite (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod session;
pub mod views;
