//! User-facing texts of the book form.

pub const SUBMIT_CREATE: &str = "Add book";
pub const SUBMIT_UPDATE: &str = "Update book";

pub const REQUIRED_FIELDS: &str = "Title, author, ISBN and price are required.";
pub const INVALID_ISBN: &str = "ISBN must be 13 digits.";
pub const INVALID_PRICE: &str = "Price must be an integer of 0 or more.";
pub const INVALID_PUBLISH_DATE: &str = "Publish date must be in YYYY-MM-DD format.";
pub const FUTURE_PUBLISH_DATE: &str = "Publish date cannot be in the future.";

pub const LIST_FAILED: &str = "Failed to load the book list.";
pub const LIST_FAILED_ROW: &str = "Error: could not load data.";
pub const DUPLICATE: &str = "Duplicate information exists.";
pub const NOT_FOUND: &str = "Book does not exist.";
pub const CREATE_FAILED: &str = "Failed to create book.";
pub const UPDATE_FAILED: &str = "Failed to update book.";
pub const DELETE_FAILED: &str = "Failed to delete book.";
pub const FETCH_FAILED: &str = "Failed to load book.";

pub const CREATED: &str = "Book created successfully!";
pub const UPDATED: &str = "Book updated successfully!";
pub const DELETED: &str = "Book deleted successfully!";

pub fn confirm_delete(id: u64) -> String {
    format!("Really delete the book with ID = {id}?")
}
