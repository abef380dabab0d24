//! Wire models for the `/api/books` resource.
//!
//! The client and the reference backend both speak these types, so the JSON
//! shape lives here rather than in either of them.

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned book identifier.
pub type BookId = u64;

/// A persisted book as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned identifier, immutable once created
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Thirteen ASCII digits
    pub isbn: String,
    pub price: u64,
    /// ISO `YYYY-MM-DD`, possibly empty
    #[serde(default, deserialize_with = "string_or_number")]
    pub publish_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<BookDetail>,
}

/// Optional nested metadata of a book. Every field is free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    #[serde(default, deserialize_with = "string_or_number")]
    pub language: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub page_count: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub publisher: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub cover_image_url: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub edition: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub description: String,
}

/// Body of `POST /api/books` and `PUT /api/books/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: u64,
    #[serde(default)]
    pub publish_date: String,
    /// The backend accepts the nested detail under `detailRequest` and
    /// answers with it under `detail`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_request: Option<BookDetailRequest>,
}

/// Detail section of a [`BookRequest`].
pub type BookDetailRequest = BookDetail;

impl BookRequest {
    /// Materialize the request as a persisted book with the given id.
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            price: self.price,
            publish_date: self.publish_date,
            detail: self.detail_request,
        }
    }
}

/// Error payload consumed by the client. Only `message` is relied upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, treating anything that is not a JSON object with
    /// a non-empty `message` as carrying no message.
    pub fn message_from_bytes(bytes: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(bytes)
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
    }
}

/// Accepts a JSON string, number, or null and yields its text form.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}
