//! Handlers for the `/api/books` resource.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shelf_kernel::{Book, BookId, BookRequest};

use crate::error::AppError;
use crate::store::BookStore;

/// Router for the books collection, meant to be nested under `/api/books`.
pub fn routes(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(store)
}

async fn list_books(State(store): State<Arc<BookStore>>) -> Json<Vec<Book>> {
    Json(store.list().await)
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(store.get(id).await?))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    Json(request): Json<BookRequest>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = store.create(request).await?;
    tracing::info!(book_id = book.id, isbn = %book.isbn, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<BookId>,
    Json(request): Json<BookRequest>,
) -> Result<Json<Book>, AppError> {
    let book = store.update(id, request).await?;
    tracing::info!(book_id = id, "book updated");
    Ok(Json(book))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<BookId>,
) -> Result<StatusCode, AppError> {
    store.delete(id).await?;
    tracing::info!(book_id = id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
