//! In-memory book storage with ISBN uniqueness.

use std::collections::BTreeMap;

use shelf_kernel::{Book, BookId, BookRequest};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("book with id {0} does not exist")]
    NotFound(BookId),
    #[error("ISBN {0} is already registered")]
    DuplicateIsbn(String),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug)]
struct Inner {
    next_id: BookId,
    books: BTreeMap<BookId, Book>,
}

/// Book collection shared by the request handlers.
#[derive(Debug)]
pub struct BookStore {
    inner: RwLock<Inner>,
}

impl BookStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                books: BTreeMap::new(),
            }),
        }
    }

    /// All books ordered by id.
    pub async fn list(&self) -> Vec<Book> {
        self.inner.read().await.books.values().cloned().collect()
    }

    pub async fn get(&self, id: BookId) -> Result<Book, StoreError> {
        self.inner
            .read()
            .await
            .books
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, request: BookRequest) -> Result<Book, StoreError> {
        check_request(&request)?;

        let mut inner = self.inner.write().await;
        if inner.books.values().any(|book| book.isbn == request.isbn) {
            return Err(StoreError::DuplicateIsbn(request.isbn));
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let book = request.into_book(id);
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    pub async fn update(&self, id: BookId, request: BookRequest) -> Result<Book, StoreError> {
        check_request(&request)?;

        let mut inner = self.inner.write().await;
        if !inner.books.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if inner
            .books
            .values()
            .any(|book| book.id != id && book.isbn == request.isbn)
        {
            return Err(StoreError::DuplicateIsbn(request.isbn));
        }

        let book = request.into_book(id);
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    pub async fn delete(&self, id: BookId) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_request(request: &BookRequest) -> Result<(), StoreError> {
    if request.title.trim().is_empty() || request.author.trim().is_empty() {
        return Err(StoreError::Invalid(
            "title and author are required".to_string(),
        ));
    }
    if request.isbn.len() != 13 || !request.isbn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::Invalid(
            "ISBN must be exactly 13 digits".to_string(),
        ));
    }
    Ok(())
}
