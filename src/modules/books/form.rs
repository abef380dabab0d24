//! Form fields and the explicit create/edit state of the book form.

use shelf_kernel::{Book, BookDetail, BookId, BookRequest};

use super::messages;
use super::validation::{is_price, ValidationError};

/// A single input of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Isbn,
    Price,
    PublishDate,
    Language,
    PageCount,
    Publisher,
    CoverImageUrl,
    Edition,
    Description,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Title,
        Field::Author,
        Field::Isbn,
        Field::Price,
        Field::PublishDate,
        Field::Language,
        Field::PageCount,
        Field::Publisher,
        Field::CoverImageUrl,
        Field::Edition,
        Field::Description,
    ];

    /// Name of the input in the form, also used as the JSON key.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Isbn => "isbn",
            Field::Price => "price",
            Field::PublishDate => "publishDate",
            Field::Language => "language",
            Field::PageCount => "pageCount",
            Field::Publisher => "publisher",
            Field::CoverImageUrl => "coverImageUrl",
            Field::Edition => "edition",
            Field::Description => "description",
        }
    }

    /// Whether the field belongs to the nested detail section.
    pub const fn is_detail(self) -> bool {
        !matches!(
            self,
            Field::Title | Field::Author | Field::Isbn | Field::Price | Field::PublishDate
        )
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// Raw text of every input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: String,
    pub publish_date: String,
    pub language: String,
    pub page_count: String,
    pub publisher: String,
    pub cover_image_url: String,
    pub edition: String,
    pub description: String,
}

impl BookForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::Isbn => &self.isbn,
            Field::Price => &self.price,
            Field::PublishDate => &self.publish_date,
            Field::Language => &self.language,
            Field::PageCount => &self.page_count,
            Field::Publisher => &self.publisher,
            Field::CoverImageUrl => &self.cover_image_url,
            Field::Edition => &self.edition,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::Isbn => &mut self.isbn,
            Field::Price => &mut self.price,
            Field::PublishDate => &mut self.publish_date,
            Field::Language => &mut self.language,
            Field::PageCount => &mut self.page_count,
            Field::Publisher => &mut self.publisher,
            Field::CoverImageUrl => &mut self.cover_image_url,
            Field::Edition => &mut self.edition,
            Field::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        let mut trimmed = Self::default();
        for field in Field::ALL {
            trimmed.set(field, self.get(field).trim());
        }
        trimmed
    }

    /// Form contents mirroring a fetched book; absent detail leaves the
    /// detail inputs empty.
    pub fn from_book(book: &Book) -> Self {
        let detail = book.detail.clone().unwrap_or_default();
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            price: book.price.to_string(),
            publish_date: book.publish_date.clone(),
            language: detail.language,
            page_count: detail.page_count,
            publisher: detail.publisher,
            cover_image_url: detail.cover_image_url,
            edition: detail.edition,
            description: detail.description,
        }
    }

    /// Build the request body. The price must be `0` or a digit string
    /// without leading zeros that fits a `u64`; everything else is passed
    /// through as typed.
    pub fn to_request(&self, include_detail: bool) -> Result<BookRequest, ValidationError> {
        if !is_price(&self.price) {
            return Err(ValidationError::InvalidPrice);
        }
        let price = self
            .price
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidPrice)?;

        let detail_request = include_detail.then(|| BookDetail {
            language: self.language.clone(),
            page_count: self.page_count.clone(),
            publisher: self.publisher.clone(),
            cover_image_url: self.cover_image_url.clone(),
            edition: self.edition.clone(),
            description: self.description.clone(),
        });

        Ok(BookRequest {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            price,
            publish_date: self.publish_date.clone(),
            detail_request,
        })
    }
}

/// Whether a submission creates a book or updates the one being edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Editing(BookId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// The single visible status line of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Component state of the book form.
///
/// The mode only changes through [`FormState::enter_editing`] and
/// [`FormState::reset`], so at most one book is ever being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: BookForm,
    mode: FormMode,
    status: Option<StatusMessage>,
}

impl FormState {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<BookId> {
        match self.mode {
            FormMode::Create => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => messages::SUBMIT_CREATE,
            FormMode::Editing(_) => messages::SUBMIT_UPDATE,
        }
    }

    pub fn cancel_visible(&self) -> bool {
        matches!(self.mode, FormMode::Editing(_))
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn enter_editing(&mut self, id: BookId, fields: BookForm) {
        self.fields = fields;
        self.mode = FormMode::Editing(id);
    }

    /// Back to an empty form in create mode with no message.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_detail() -> Book {
        Book {
            id: 4,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "9780441172719".to_string(),
            price: 12000,
            publish_date: "1965-08-01".to_string(),
            detail: Some(BookDetail {
                language: "English".to_string(),
                page_count: "412".to_string(),
                publisher: "Chilton".to_string(),
                cover_image_url: "https://img.example/dune.jpg".to_string(),
                edition: "1st".to_string(),
                description: "Desert planet".to_string(),
            }),
        }
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("id"), None);
        assert!(Field::Edition.is_detail());
        assert!(!Field::PublishDate.is_detail());
    }

    #[test]
    fn trimmed_strips_every_field_and_leaves_input_alone() {
        let mut form = BookForm::default();
        form.set(Field::Title, "  Dune ");
        form.set(Field::Description, "\tDesert planet\n");

        let trimmed = form.trimmed();
        assert_eq!(trimmed.title, "Dune");
        assert_eq!(trimmed.description, "Desert planet");
        assert_eq!(form.title, "  Dune ");
    }

    #[test]
    fn from_book_fills_detail_fields() {
        let form = BookForm::from_book(&book_with_detail());
        assert_eq!(form.price, "12000");
        assert_eq!(form.page_count, "412");
        assert_eq!(form.cover_image_url, "https://img.example/dune.jpg");
    }

    #[test]
    fn from_book_without_detail_leaves_detail_empty() {
        let mut book = book_with_detail();
        book.detail = None;
        let form = BookForm::from_book(&book);
        assert_eq!(form.language, "");
        assert_eq!(form.title, "Dune");
    }

    #[test]
    fn to_request_honours_detail_switch() {
        let form = BookForm::from_book(&book_with_detail());

        let rich = form.to_request(true).unwrap();
        assert_eq!(rich.price, 12000);
        assert_eq!(rich.detail_request.unwrap().publisher, "Chilton");

        let plain = form.to_request(false).unwrap();
        assert!(plain.detail_request.is_none());
    }

    #[test]
    fn to_request_rejects_unparsable_price() {
        let mut form = BookForm::from_book(&book_with_detail());
        form.price = "12.5".to_string();
        assert_eq!(form.to_request(true), Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn to_request_rejects_signed_and_zero_padded_prices() {
        let mut form = BookForm::from_book(&book_with_detail());
        for price in ["+5", "007", "99999999999999999999999"] {
            form.price = price.to_string();
            assert_eq!(
                form.to_request(false),
                Err(ValidationError::InvalidPrice),
                "price {price}"
            );
        }
        form.price = "0".to_string();
        assert_eq!(form.to_request(false).map(|request| request.price), Ok(0));
    }

    #[test]
    fn state_transitions_between_create_and_editing() {
        let mut state = FormState::default();
        assert_eq!(state.mode(), FormMode::Create);
        assert_eq!(state.submit_label(), messages::SUBMIT_CREATE);
        assert!(!state.cancel_visible());

        state.enter_editing(4, BookForm::from_book(&book_with_detail()));
        assert_eq!(state.editing_id(), Some(4));
        assert_eq!(state.submit_label(), messages::SUBMIT_UPDATE);
        assert!(state.cancel_visible());

        state.set_status(StatusMessage::error("boom"));
        state.reset();
        assert_eq!(state, FormState::default());
    }
}
