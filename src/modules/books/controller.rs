//! The book form controller: mediates between the form, the table and the
//! books resource.

use shelf_kernel::{Book, BookId, BookRequest};
use thiserror::Error;

use super::client::{ApiError, BooksApi};
use super::form::{BookForm, Field, FormMode, FormState, StatusMessage};
use super::messages;
use super::table::BookTable;
use super::validation::{validate_book, ValidationError, ValidationPolicy};
use super::view::{FormConfig, FormView};

/// Why a user action did not go through. The display text is the status
/// line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A unique field (ISBN) collides with another book.
    #[error("{0}")]
    Conflict(String),
    /// The id no longer exists on the server.
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Network(String),
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(Book),
    Updated(Book),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    const fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    const fn fallback(self) -> &'static str {
        match self {
            Operation::List => messages::LIST_FAILED,
            Operation::Fetch => messages::FETCH_FAILED,
            Operation::Create => messages::CREATE_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
        }
    }

    /// Map a failed request onto the user-facing taxonomy. A message from
    /// the server wins over the fallback text, except for the list.
    fn classify(self, error: &ApiError) -> FormError {
        let message = |fallback: &str| {
            error
                .server_message()
                .unwrap_or(fallback)
                .to_string()
        };

        match (self, error.status()) {
            (Operation::List, _) => FormError::Network(messages::LIST_FAILED.to_string()),
            (Operation::Create | Operation::Update, Some(409)) => {
                FormError::Conflict(message(messages::DUPLICATE))
            }
            (Operation::Fetch | Operation::Delete, Some(404)) => {
                FormError::NotFound(message(messages::NOT_FOUND))
            }
            _ => FormError::Network(message(self.fallback())),
        }
    }
}

/// Drives one book form and one book table against a [`BooksApi`].
pub struct BookFormController<A, V> {
    api: A,
    view: V,
    config: FormConfig,
    state: FormState,
    table: BookTable,
}

impl<A, V> BookFormController<A, V>
where
    A: BooksApi,
    V: FormView,
{
    pub fn new(api: A, view: V, config: FormConfig) -> Self {
        Self {
            api,
            view,
            config,
            state: FormState::default(),
            table: BookTable::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn table(&self) -> &BookTable {
        &self.table
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Type into one input of the form.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.state.fields.set(field, value);
    }

    /// Replace the whole form contents, keeping the mode.
    pub fn fill(&mut self, fields: BookForm) {
        self.state.fields = fields;
    }

    /// Fetch the collection and re-render the table.
    pub async fn load_books(&mut self) -> Result<usize, FormError> {
        tracing::debug!(operation = Operation::List.name(), "loading book list");

        match self.api.list_books().await {
            Ok(books) => {
                self.table = BookTable::from_books(&books, self.config.include_detail);
                self.view.render_table(&self.table, &self.config);
                Ok(books.len())
            }
            Err(error) => {
                self.table = BookTable::LoadFailed;
                self.view.render_table(&self.table, &self.config);
                Err(self.fail(Operation::List, &error))
            }
        }
    }

    /// Trim, validate and send the form: an update while editing, a create
    /// otherwise. Invalid input never reaches the network.
    pub async fn submit(&mut self) -> Result<Submitted, FormError> {
        self.state.fields = self.state.fields.trimmed();

        let request = match self.prepare() {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "form rejected before submission");
                let error = FormError::Validation(error);
                self.show(StatusMessage::error(error.to_string()));
                return Err(error);
            }
        };

        match self.state.mode() {
            FormMode::Editing(id) => self.update_book(id, &request).await.map(Submitted::Updated),
            FormMode::Create => self.create_book(&request).await.map(Submitted::Created),
        }
    }

    fn prepare(&self) -> Result<BookRequest, ValidationError> {
        let policy = ValidationPolicy::new(self.config.validation);
        validate_book(&self.state.fields, &policy)?;
        self.state.fields.to_request(self.config.include_detail)
    }

    pub async fn create_book(&mut self, request: &BookRequest) -> Result<Book, FormError> {
        match self.api.create_book(request).await {
            Ok(book) => {
                tracing::info!(book_id = book.id, isbn = %book.isbn, "book created");
                self.complete(messages::CREATED).await;
                Ok(book)
            }
            Err(error) => Err(self.fail(Operation::Create, &error)),
        }
    }

    pub async fn update_book(
        &mut self,
        id: BookId,
        request: &BookRequest,
    ) -> Result<Book, FormError> {
        match self.api.update_book(id, request).await {
            Ok(book) => {
                tracing::info!(book_id = id, "book updated");
                self.complete(messages::UPDATED).await;
                Ok(book)
            }
            Err(error) => Err(self.fail(Operation::Update, &error)),
        }
    }

    /// Delete after an interactive confirmation.
    pub async fn delete_book(&mut self, id: BookId) -> Result<Deletion, FormError> {
        if !self.view.confirm(&messages::confirm_delete(id)) {
            tracing::debug!(book_id = id, "delete declined");
            return Ok(Deletion::Declined);
        }

        match self.api.delete_book(id).await {
            Ok(()) => {
                tracing::info!(book_id = id, "book deleted");
                self.show(StatusMessage::success(messages::DELETED));
                self.reload().await;
                Ok(Deletion::Deleted)
            }
            Err(error) => Err(self.fail(Operation::Delete, &error)),
        }
    }

    /// Load a book into the form and switch to editing it.
    pub async fn edit_book(&mut self, id: BookId) -> Result<(), FormError> {
        match self.api.get_book(id).await {
            Ok(book) => {
                self.state.enter_editing(id, BookForm::from_book(&book));
                self.view.render_form(&self.state, &self.config);
                Ok(())
            }
            Err(error) => Err(self.fail(Operation::Fetch, &error)),
        }
    }

    /// Clear the form and go back to create mode.
    pub fn reset_form(&mut self) {
        self.state.reset();
        self.view.render_form(&self.state, &self.config);
    }

    /// A mutation went through: back to create mode, report, refresh.
    async fn complete(&mut self, success: &str) {
        self.state.reset();
        self.show(StatusMessage::success(success));
        self.reload().await;
    }

    async fn reload(&mut self) {
        // the list failure is already on the status line
        if let Err(error) = self.load_books().await {
            tracing::debug!(%error, "reload after mutation failed");
        }
    }

    fn fail(&mut self, operation: Operation, error: &ApiError) -> FormError {
        tracing::warn!(operation = operation.name(), %error, "book request failed");
        let error = operation.classify(error);
        self.show(StatusMessage::error(error.to_string()));
        error
    }

    fn show(&mut self, status: StatusMessage) {
        self.state.set_status(status);
        self.view.render_form(&self.state, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::client::MockBooksApi;
    use crate::modules::books::form::StatusKind;
    use mockall::predicate::eq;
    use shelf_kernel::settings::ValidationMode;
    use shelf_kernel::BookDetail;

    #[derive(Default)]
    struct RecordingView {
        forms: Vec<FormState>,
        tables: Vec<BookTable>,
        prompts: Vec<String>,
        answer: bool,
    }

    impl FormView for RecordingView {
        fn render_form(&mut self, state: &FormState, _config: &FormConfig) {
            self.forms.push(state.clone());
        }

        fn render_table(&mut self, table: &BookTable, _config: &FormConfig) {
            self.tables.push(table.clone());
        }

        fn confirm(&mut self, prompt: &str) -> bool {
            self.prompts.push(prompt.to_string());
            self.answer
        }
    }

    fn dune(id: BookId) -> Book {
        Book {
            id,
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

    fn controller(api: MockBooksApi) -> BookFormController<MockBooksApi, RecordingView> {
        BookFormController::new(api, RecordingView::default(), FormConfig::default())
    }

    fn type_dune(controller: &mut BookFormController<MockBooksApi, RecordingView>) {
        controller.fill(BookForm::from_book(&dune(0)));
        controller.set_field(Field::Title, "  Dune  ");
    }

    fn status_of<A: BooksApi>(controller: &BookFormController<A, RecordingView>) -> StatusMessage {
        controller.state().status().cloned().unwrap()
    }

    #[tokio::test]
    async fn load_renders_every_book() {
        let mut api = MockBooksApi::new();
        api.expect_list_books()
            .times(1)
            .returning(|| Ok(vec![dune(1), dune(2)]));

        let mut controller = controller(api);
        assert_eq!(controller.load_books().await, Ok(2));
        assert_eq!(controller.table().rows().len(), 2);
        assert_eq!(controller.view().tables.len(), 1);
    }

    #[tokio::test]
    async fn load_failure_shows_placeholder_row_and_message() {
        let mut api = MockBooksApi::new();
        api.expect_list_books().times(1).returning(|| {
            Err(ApiError::Status {
                status: 500,
                message: Some("database down".to_string()),
            })
        });

        let mut controller = controller(api);
        let error = controller.load_books().await.unwrap_err();

        assert_eq!(error, FormError::Network(messages::LIST_FAILED.to_string()));
        assert_eq!(controller.table(), &BookTable::LoadFailed);
        assert_eq!(status_of(&controller).kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_network() {
        let mut api = MockBooksApi::new();
        api.expect_create_book().never();
        api.expect_update_book().never();

        let mut controller = controller(api);
        type_dune(&mut controller);
        controller.set_field(Field::Isbn, "123");

        let error = controller.submit().await.unwrap_err();
        assert_eq!(error, FormError::Validation(ValidationError::InvalidIsbn));
        assert_eq!(status_of(&controller).text, messages::INVALID_ISBN);
    }

    #[tokio::test]
    async fn loose_validation_still_refuses_unsendable_price() {
        let mut api = MockBooksApi::new();
        api.expect_create_book().never();

        let config = FormConfig {
            validation: ValidationMode::Loose,
            ..FormConfig::default()
        };
        let mut controller = BookFormController::new(api, RecordingView::default(), config);
        type_dune(&mut controller);
        controller.set_field(Field::Price, "free");

        assert_eq!(
            controller.submit().await,
            Err(FormError::Validation(ValidationError::InvalidPrice))
        );
    }

    #[tokio::test]
    async fn create_mode_submit_creates_then_resets_and_reloads() {
        let mut api = MockBooksApi::new();
        api.expect_create_book()
            .withf(|request: &BookRequest| {
                request.title == "Dune"
                    && request.price == 12000
                    && request
                        .detail_request
                        .as_ref()
                        .is_some_and(|detail| detail.publisher == "Chilton")
            })
            .times(1)
            .returning(|_| Ok(dune(7)));
        api.expect_update_book().never();
        api.expect_list_books()
            .times(1)
            .returning(|| Ok(vec![dune(7)]));

        let mut controller = controller(api);
        type_dune(&mut controller);

        let submitted = controller.submit().await.unwrap();
        assert_eq!(submitted, Submitted::Created(dune(7)));
        assert_eq!(controller.state().mode(), FormMode::Create);
        assert_eq!(controller.state().fields, BookForm::default());
        assert_eq!(status_of(&controller), StatusMessage::success(messages::CREATED));
        assert_eq!(controller.table().rows().len(), 1);
    }

    #[tokio::test]
    async fn plain_form_omits_detail_from_request() {
        let mut api = MockBooksApi::new();
        api.expect_create_book()
            .withf(|request: &BookRequest| request.detail_request.is_none())
            .times(1)
            .returning(|_| Ok(dune(1)));
        api.expect_list_books().returning(|| Ok(Vec::new()));

        let config = FormConfig {
            include_detail: false,
            ..FormConfig::default()
        };
        let mut controller = BookFormController::new(api, RecordingView::default(), config);
        type_dune(&mut controller);

        assert!(controller.submit().await.is_ok());
    }

    #[tokio::test]
    async fn edit_populates_every_field_and_enters_editing() {
        let mut api = MockBooksApi::new();
        api.expect_get_book()
            .with(eq(4))
            .times(1)
            .returning(|id| Ok(dune(id)));

        let mut controller = controller(api);
        controller.edit_book(4).await.unwrap();

        let state = controller.state();
        assert_eq!(state.mode(), FormMode::Editing(4));
        assert_eq!(state.fields, BookForm::from_book(&dune(4)));
        assert_eq!(state.fields.description, "Desert planet");
        assert_eq!(state.submit_label(), messages::SUBMIT_UPDATE);
        assert!(state.cancel_visible());
    }

    #[tokio::test]
    async fn edit_of_missing_book_reports_not_found_and_keeps_mode() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().returning(|_| {
            Err(ApiError::Status {
                status: 404,
                message: None,
            })
        });

        let mut controller = controller(api);
        let error = controller.edit_book(99).await.unwrap_err();

        assert_eq!(error, FormError::NotFound(messages::NOT_FOUND.to_string()));
        assert_eq!(controller.state().mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn editing_submit_updates_the_same_id() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().returning(|id| Ok(dune(id)));
        api.expect_create_book().never();
        api.expect_update_book()
            .withf(|id, request| *id == 4 && request.price == 9900)
            .times(1)
            .returning(|id, _| Ok(dune(id)));
        api.expect_list_books().returning(|| Ok(vec![dune(4)]));

        let mut controller = controller(api);
        controller.edit_book(4).await.unwrap();
        controller.set_field(Field::Price, "9900");

        let submitted = controller.submit().await.unwrap();
        assert!(matches!(submitted, Submitted::Updated(book) if book.id == 4));
        assert_eq!(controller.state().mode(), FormMode::Create);
        assert!(!controller.state().cancel_visible());
        assert_eq!(status_of(&controller).text, messages::UPDATED);
    }

    #[tokio::test]
    async fn failed_update_stays_in_editing() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().returning(|id| Ok(dune(id)));
        api.expect_update_book().returning(|_, _| {
            Err(ApiError::Status {
                status: 500,
                message: None,
            })
        });
        api.expect_list_books().never();

        let mut controller = controller(api);
        controller.edit_book(4).await.unwrap();

        let error = controller.submit().await.unwrap_err();
        assert_eq!(error, FormError::Network(messages::UPDATE_FAILED.to_string()));
        assert_eq!(controller.state().mode(), FormMode::Editing(4));
    }

    #[tokio::test]
    async fn conflict_prefers_server_message() {
        let mut api = MockBooksApi::new();
        api.expect_create_book().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: Some("ISBN 9780441172719 is already registered".to_string()),
            })
        });

        let mut controller = controller(api);
        type_dune(&mut controller);

        assert_eq!(
            controller.submit().await,
            Err(FormError::Conflict(
                "ISBN 9780441172719 is already registered".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn conflict_without_message_uses_duplicate_text() {
        let mut api = MockBooksApi::new();
        api.expect_create_book().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: None,
            })
        });

        let mut controller = controller(api);
        type_dune(&mut controller);

        assert_eq!(
            controller.submit().await,
            Err(FormError::Conflict(messages::DUPLICATE.to_string()))
        );
    }

    #[tokio::test]
    async fn update_conflict_uses_duplicate_text() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().returning(|id| Ok(dune(id)));
        api.expect_update_book().times(1).returning(|_, _| {
            Err(ApiError::Status {
                status: 409,
                message: None,
            })
        });
        api.expect_list_books().never();

        let mut controller = controller(api);
        controller.edit_book(4).await.unwrap();

        assert_eq!(
            controller.submit().await,
            Err(FormError::Conflict(messages::DUPLICATE.to_string()))
        );
        assert_eq!(controller.state().mode(), FormMode::Editing(4));
        assert_eq!(status_of(&controller).text, messages::DUPLICATE);
    }

    #[tokio::test]
    async fn edit_server_error_uses_generic_fetch_text() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().with(eq(4)).times(1).returning(|_| {
            Err(ApiError::Status {
                status: 500,
                message: None,
            })
        });

        let mut controller = controller(api);

        assert_eq!(
            controller.edit_book(4).await,
            Err(FormError::Network(messages::FETCH_FAILED.to_string()))
        );
        assert_eq!(controller.state().mode(), FormMode::Create);
    }

    #[tokio::test]
    async fn undecodable_create_response_uses_generic_create_text() {
        let mut api = MockBooksApi::new();
        api.expect_create_book()
            .returning(|_| Err(ApiError::Decode("EOF while parsing a value".to_string())));
        api.expect_list_books().never();

        let mut controller = controller(api);
        type_dune(&mut controller);

        assert_eq!(
            controller.submit().await,
            Err(FormError::Network(messages::CREATE_FAILED.to_string()))
        );
        assert_eq!(controller.state().mode(), FormMode::Create);
        assert_eq!(controller.state().fields.title, "Dune");
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_create_text() {
        let mut api = MockBooksApi::new();
        api.expect_create_book()
            .returning(|_| Err(ApiError::Transport("connection refused".to_string())));

        let mut controller = controller(api);
        type_dune(&mut controller);

        assert_eq!(
            controller.submit().await,
            Err(FormError::Network(messages::CREATE_FAILED.to_string()))
        );
        assert_eq!(status_of(&controller).kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut api = MockBooksApi::new();
        api.expect_delete_book().never();
        api.expect_list_books().never();

        let mut controller = controller(api);
        assert_eq!(controller.delete_book(3).await, Ok(Deletion::Declined));
        assert_eq!(
            controller.view().prompts,
            vec!["Really delete the book with ID = 3?".to_string()]
        );
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_reloads() {
        let mut api = MockBooksApi::new();
        api.expect_delete_book()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));
        api.expect_list_books()
            .times(1)
            .returning(|| Ok(Vec::new()));

        let mut controller = controller(api);
        controller.view_mut().answer = true;

        assert_eq!(controller.delete_book(3).await, Ok(Deletion::Deleted));
        assert_eq!(status_of(&controller).text, messages::DELETED);
        assert_eq!(controller.view().tables.len(), 1);
    }

    #[tokio::test]
    async fn delete_of_missing_book_reports_not_found() {
        let mut api = MockBooksApi::new();
        api.expect_delete_book().returning(|_| {
            Err(ApiError::Status {
                status: 404,
                message: None,
            })
        });
        api.expect_list_books().never();

        let mut controller = controller(api);
        controller.view_mut().answer = true;

        assert_eq!(
            controller.delete_book(3).await,
            Err(FormError::NotFound(messages::NOT_FOUND.to_string()))
        );
    }

    #[tokio::test]
    async fn delete_conflict_is_a_generic_failure() {
        let mut api = MockBooksApi::new();
        api.expect_delete_book().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: None,
            })
        });

        let mut controller = controller(api);
        controller.view_mut().answer = true;

        assert_eq!(
            controller.delete_book(3).await,
            Err(FormError::Network(messages::DELETE_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn reset_clears_fields_mode_and_message() {
        let mut api = MockBooksApi::new();
        api.expect_get_book().returning(|id| Ok(dune(id)));

        let mut controller = controller(api);
        controller.edit_book(4).await.unwrap();
        controller.reset_form();

        assert_eq!(controller.state(), &FormState::default());
        assert_eq!(controller.view().forms.last(), Some(&FormState::default()));
    }

    #[tokio::test]
    async fn failed_reload_does_not_fail_the_mutation() {
        let mut api = MockBooksApi::new();
        api.expect_create_book().returning(|_| Ok(dune(1)));
        api.expect_list_books()
            .returning(|| Err(ApiError::Transport("timed out".to_string())));

        let mut controller = controller(api);
        type_dune(&mut controller);

        assert!(controller.submit().await.is_ok());
        assert_eq!(controller.table(), &BookTable::LoadFailed);
        assert_eq!(status_of(&controller).text, messages::LIST_FAILED);
    }
}
