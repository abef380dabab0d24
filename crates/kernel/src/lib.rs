//! Shared settings and catalog wire models for the shelf workspace.

pub mod models;
pub mod settings;

pub use models::{Book, BookDetail, BookDetailRequest, BookId, BookRequest, ErrorBody};
pub use settings::Settings;
