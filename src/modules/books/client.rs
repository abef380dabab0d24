//! REST client port for the books collection and its reqwest adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shelf_kernel::settings::ApiSettings;
use shelf_kernel::{Book, BookId, BookRequest, ErrorBody};
use thiserror::Error;

/// Failure of a single request against the books resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server answered {status}")]
    Status {
        status: u16,
        /// `message` of the error body, when there was one
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Port for the `/api/books` resource. Every call is a single attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError>;

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError>;

    async fn create_book(&self, request: &BookRequest) -> Result<Book, ApiError>;

    async fn update_book(&self, id: BookId, request: &BookRequest) -> Result<Book, ApiError>;

    async fn delete_book(&self, id: BookId) -> Result<(), ApiError>;
}

/// [`BooksApi`] over HTTP with JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    base_url: String,
    client: Client,
}

impl HttpBooksApi {
    /// Client for the configured base address with the configured timeout.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self::with_client(&settings.base_url, client))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/books", self.base_url)
    }

    fn record_url(&self, id: BookId) -> String {
        format!("{}/api/books/{}", self.base_url, id)
    }
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = send(self.client.get(self.collection_url())).await?;
        decode(response).await
    }

    async fn get_book(&self, id: BookId) -> Result<Book, ApiError> {
        let response = send(self.client.get(self.record_url(id))).await?;
        decode(response).await
    }

    async fn create_book(&self, request: &BookRequest) -> Result<Book, ApiError> {
        let response = send(self.client.post(self.collection_url()).json(request)).await?;
        decode(response).await
    }

    async fn update_book(&self, id: BookId, request: &BookRequest) -> Result<Book, ApiError> {
        let response = send(self.client.put(self.record_url(id)).json(request)).await?;
        decode(response).await
    }

    async fn delete_book(&self, id: BookId) -> Result<(), ApiError> {
        send(self.client.delete(self.record_url(id))).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: ErrorBody::message_from_bytes(&body),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
