use shelf_kernel::settings::{FormSettings, MessageStyle, ValidationMode};

use super::form::FormState;
use super::table::BookTable;

/// Presentation options of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Show, submit and render the nested detail fields
    pub include_detail: bool,
    pub validation: ValidationMode,
    pub message_style: MessageStyle,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::from(&FormSettings::default())
    }
}

impl From<&FormSettings> for FormConfig {
    fn from(settings: &FormSettings) -> Self {
        Self {
            include_detail: settings.include_detail,
            validation: settings.validation,
            message_style: settings.message_style,
        }
    }
}

/// Presentation seam of the book form. The controller owns the state and
/// pushes it here after every change.
pub trait FormView {
    fn render_form(&mut self, state: &FormState, config: &FormConfig);

    fn render_table(&mut self, table: &BookTable, config: &FormConfig);

    /// Ask the user to confirm a destructive action.
    fn confirm(&mut self, prompt: &str) -> bool;
}
