//! The book catalog form: validation, form state, the REST client port and
//! the controller tying them together.

pub mod client;
pub mod controller;
pub mod form;
pub mod messages;
pub mod table;
pub mod validation;
pub mod view;

pub use client::{ApiError, BooksApi, HttpBooksApi};
pub use controller::{BookFormController, Deletion, FormError, Submitted};
pub use form::{BookForm, Field, FormMode, FormState, StatusKind, StatusMessage};
pub use shelf_kernel::models::{Book, BookDetail, BookId, BookRequest};
pub use table::{BookRow, BookTable};
pub use validation::{validate_book, ValidationError, ValidationPolicy};
pub use view::{FormConfig, FormView};
