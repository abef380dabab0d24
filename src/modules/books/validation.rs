//! Client-side checks run before any request leaves the form.

use shelf_kernel::settings::ValidationMode;
use thiserror::Error;
use time::{macros::format_description, Date, OffsetDateTime};

use super::form::BookForm;
use super::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", messages::REQUIRED_FIELDS)]
    MissingRequired,
    #[error("{}", messages::INVALID_ISBN)]
    InvalidIsbn,
    #[error("{}", messages::INVALID_PRICE)]
    InvalidPrice,
    #[error("{}", messages::INVALID_PUBLISH_DATE)]
    InvalidPublishDate,
    #[error("{}", messages::FUTURE_PUBLISH_DATE)]
    FuturePublishDate,
}

/// Which checks run, and against which calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub mode: ValidationMode,
    pub today: Date,
}

impl ValidationPolicy {
    /// Policy evaluated against the current local date, or the UTC date
    /// when the local offset cannot be determined.
    pub fn new(mode: ValidationMode) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self {
            mode,
            today: now.date(),
        }
    }

    pub fn with_today(mut self, today: Date) -> Self {
        self.today = today;
        self
    }
}

/// Check a trimmed form. The form is never modified.
pub fn validate_book(form: &BookForm, policy: &ValidationPolicy) -> Result<(), ValidationError> {
    if [&form.title, &form.author, &form.isbn, &form.price]
        .iter()
        .any(|value| value.is_empty())
    {
        return Err(ValidationError::MissingRequired);
    }

    if policy.mode == ValidationMode::Loose {
        return Ok(());
    }

    if !is_isbn13(&form.isbn) {
        return Err(ValidationError::InvalidIsbn);
    }
    if !is_price(&form.price) {
        return Err(ValidationError::InvalidPrice);
    }
    if !form.publish_date.is_empty() {
        let published = Date::parse(&form.publish_date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| ValidationError::InvalidPublishDate)?;
        if published > policy.today {
            return Err(ValidationError::FuturePublishDate);
        }
    }

    Ok(())
}

/// Exactly thirteen ASCII digits.
fn is_isbn13(isbn: &str) -> bool {
    isbn.len() == 13 && isbn.bytes().all(|b| b.is_ascii_digit())
}

/// `0` or a digit string without leading zeros.
pub(crate) fn is_price(price: &str) -> bool {
    match price.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
        [] => false,
    }
}
