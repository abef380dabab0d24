//! Rendered contents of the book list.

use shelf_kernel::{Book, BookId};

const EMPTY_CELL: &str = "-";

const BASE_HEADERS: [&str; 5] = ["Title", "Author", "ISBN", "Price", "Published"];
const DETAIL_HEADERS: [&str; 6] = [
    "Language",
    "Pages",
    "Publisher",
    "Cover",
    "Edition",
    "Description",
];

/// One table row with the id its edit/delete actions target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: BookId,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookTable {
    Rows(Vec<BookRow>),
    /// Placeholder row shown when the list could not be fetched.
    LoadFailed,
}

impl Default for BookTable {
    fn default() -> Self {
        BookTable::Rows(Vec::new())
    }
}

impl BookTable {
    pub fn from_books(books: &[Book], include_detail: bool) -> Self {
        BookTable::Rows(
            books
                .iter()
                .map(|book| BookRow::from_book(book, include_detail))
                .collect(),
        )
    }

    pub fn headers(include_detail: bool) -> Vec<&'static str> {
        let mut headers = BASE_HEADERS.to_vec();
        if include_detail {
            headers.extend(DETAIL_HEADERS);
        }
        headers
    }

    pub fn rows(&self) -> &[BookRow] {
        match self {
            BookTable::Rows(rows) => rows,
            BookTable::LoadFailed => &[],
        }
    }
}

impl BookRow {
    fn from_book(book: &Book, include_detail: bool) -> Self {
        let mut cells = vec![
            book.title.clone(),
            book.author.clone(),
            book.isbn.clone(),
            book.price.to_string(),
            book.publish_date.clone(),
        ];

        if include_detail {
            match &book.detail {
                Some(detail) => cells.extend([
                    detail.language.clone(),
                    detail.page_count.clone(),
                    detail.publisher.clone(),
                    detail.cover_image_url.clone(),
                    detail.edition.clone(),
                    detail.description.clone(),
                ]),
                None => cells.extend(DETAIL_HEADERS.map(|_| EMPTY_CELL.to_string())),
            }
        }

        Self { id: book.id, cells }
    }
}
