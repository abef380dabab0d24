//! Line commands of the interactive form session.

use std::ops::ControlFlow;

use thiserror::Error;

use crate::books::{BookFormController, BookId, BooksApi, Field, FormView};

pub const HELP: &str = "\
commands:
  list                     reload the book list
  set <field> <value...>   type into a form field
  submit                   add the book, or update the one being edited
  edit <id>                load a book into the form
  delete <id>              delete a book after confirmation
  cancel                   clear the form and leave edit mode
  show                     print the form
  help                     print this help
  quit                     leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Set(Field, String),
    Submit,
    Edit(BookId),
    Delete(BookId),
    Cancel,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("'{0}' is not a book id")]
    BadId(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "" => return Ok(None),
            "list" | "ls" => Command::List,
            "submit" => Command::Submit,
            "cancel" | "reset" => Command::Cancel,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "edit" => Command::Edit(parse_id(rest, "edit <id>")?),
            "delete" | "rm" => Command::Delete(parse_id(rest, "delete <id>")?),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(CommandError::Usage("set <field> <value...>"));
                }
                let field = Field::from_name(name)
                    .ok_or_else(|| CommandError::UnknownField(name.to_string()))?;
                Command::Set(field, value.trim().to_string())
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_id(text: &str, usage: &'static str) -> Result<BookId, CommandError> {
    if text.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    text.parse()
        .map_err(|_| CommandError::BadId(text.to_string()))
}

/// Apply one command. Failures are already on the form's status line, so
/// only `quit` stops the session.
pub async fn dispatch<A, V>(
    controller: &mut BookFormController<A, V>,
    command: Command,
) -> ControlFlow<()>
where
    A: BooksApi,
    V: FormView,
{
    let outcome = match command {
        Command::Quit => return ControlFlow::Break(()),
        Command::List => controller.load_books().await.map(drop),
        Command::Set(field, value) => {
            controller.set_field(field, value);
            Ok(())
        }
        Command::Submit => controller.submit().await.map(drop),
        Command::Edit(id) => controller.edit_book(id).await,
        Command::Delete(id) => controller.delete_book(id).await.map(drop),
        Command::Cancel => {
            controller.reset_form();
            Ok(())
        }
        Command::Show | Command::Help => Ok(()),
    };

    if let Err(error) = outcome {
        tracing::debug!(%error, "session command failed");
    }
    ControlFlow::Continue(())
}
