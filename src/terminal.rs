//! Plain-text rendering of the book form and table.

use std::io::{self, BufRead, Write};

use shelf_kernel::settings::MessageStyle;

use crate::books::{
    messages, BookTable, Field, FormConfig, FormState, FormView, StatusKind, StatusMessage,
};

/// [`FormView`] writing to a terminal.
pub struct TerminalView<W> {
    out: W,
    /// Answer yes to every confirmation without asking
    assume_yes: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(assume_yes: bool) -> Self {
        Self::new(io::stdout(), assume_yes)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, assume_yes: bool) -> Self {
        Self { out, assume_yes }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::debug!(error = %e, "terminal write failed");
        }
    }
}

impl<W: Write> FormView for TerminalView<W> {
    fn render_form(&mut self, state: &FormState, config: &FormConfig) {
        let text = format_form(state, config);
        self.emit(&text);
    }

    fn render_table(&mut self, table: &BookTable, config: &FormConfig) {
        let text = format_table(table, config.include_detail);
        self.emit(&text);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        self.emit(&format!("{prompt} [y/N] "));
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(e) => {
                tracing::debug!(error = %e, "could not read confirmation");
                false
            }
        }
    }
}

pub fn format_form(state: &FormState, config: &FormConfig) -> String {
    let mut text = String::new();

    if let Some(id) = state.editing_id() {
        text.push_str(&format!("Editing book #{id}\n"));
    }
    for field in Field::ALL {
        if field.is_detail() && !config.include_detail {
            continue;
        }
        text.push_str(&format!(
            "  {:<14} {}\n",
            field.name(),
            state.fields.get(field)
        ));
    }
    text.push_str(&format!("  [{}]", state.submit_label()));
    if state.cancel_visible() {
        text.push_str("  [Cancel]");
    }
    text.push('\n');

    if let Some(status) = state.status() {
        text.push_str(&format_status(status, config.message_style));
    }
    text
}

pub fn format_status(status: &StatusMessage, style: MessageStyle) -> String {
    let marker = match status.kind {
        StatusKind::Success => "ok",
        StatusKind::Error => "error",
    };

    match style {
        MessageStyle::Inline => format!("  ({marker}) {}\n", status.text),
        MessageStyle::Alert => {
            let line = format!("{}: {}", marker.to_uppercase(), status.text);
            let border = "-".repeat(line.chars().count() + 2);
            format!("+{border}+\n| {line} |\n+{border}+\n")
        }
    }
}

pub fn format_table(table: &BookTable, include_detail: bool) -> String {
    let mut header = vec!["ID"];
    header.extend(BookTable::headers(include_detail));

    let rows: Vec<Vec<String>> = match table {
        BookTable::LoadFailed => {
            return format!("{}\n{}\n", header.join(" | "), messages::LIST_FAILED_ROW);
        }
        BookTable::Rows(rows) => rows
            .iter()
            .map(|row| {
                let mut cells = vec![row.id.to_string()];
                cells.extend(row.cells.iter().cloned());
                cells
            })
            .collect(),
    };

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut text = render_line(header.iter().copied(), &widths);
    for row in &rows {
        text.push_str(&render_line(row.iter().map(String::as_str), &widths));
    }
    if rows.is_empty() {
        text.push_str("(no books)\n");
    }
    text
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string();
    line.push('\n');
    line
}
