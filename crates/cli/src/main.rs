use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shelf_app::books::{
    BookFormController, BookId, Deletion, Field, FormConfig, HttpBooksApi, Submitted,
};
use shelf_app::terminal::TerminalView;
use shelf_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "shelf", version, about = "Manage the book catalog from the command line")]
struct Cli {
    /// Override the books API base address
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every book
    List,
    /// Print one book
    Show { id: BookId },
    /// Create a book
    Add(BookArgs),
    /// Change the given fields of a book
    Update {
        id: BookId,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// Delete a book
    Delete {
        id: BookId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Run the in-memory books backend
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    publish_date: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    page_count: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    #[arg(long)]
    cover_image_url: Option<String>,
    #[arg(long)]
    edition: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl BookArgs {
    fn values(&self) -> [(Field, &Option<String>); 11] {
        [
            (Field::Title, &self.title),
            (Field::Author, &self.author),
            (Field::Isbn, &self.isbn),
            (Field::Price, &self.price),
            (Field::PublishDate, &self.publish_date),
            (Field::Language, &self.language),
            (Field::PageCount, &self.page_count),
            (Field::Publisher, &self.publisher),
            (Field::CoverImageUrl, &self.cover_image_url),
            (Field::Edition, &self.edition),
            (Field::Description, &self.description),
        ]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }

    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
        return shelf_http::start_server(&settings.server).await;
    }

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let api = HttpBooksApi::new(&settings.api).context("failed to build HTTP client")?;
    let mut controller = BookFormController::new(
        api,
        TerminalView::stdout(assume_yes),
        FormConfig::from(&settings.form),
    );

    tracing::debug!(command = ?cli.command, api = %settings.api.base_url, "running command");

    match cli.command {
        Commands::List => {
            controller.load_books().await?;
        }
        Commands::Show { id } => {
            controller.edit_book(id).await?;
        }
        Commands::Add(fields) => {
            for (field, value) in fields.values() {
                controller.set_field(field, value.clone().unwrap_or_default());
            }
            if let Submitted::Created(book) = controller.submit().await? {
                tracing::info!(book_id = book.id, "added");
            }
        }
        Commands::Update { id, fields } => {
            controller.edit_book(id).await?;
            for (field, value) in fields.values() {
                if let Some(value) = value {
                    controller.set_field(field, value.clone());
                }
            }
            controller.submit().await?;
        }
        Commands::Delete { id, .. } => {
            if controller.delete_book(id).await? == Deletion::Declined {
                tracing::info!(book_id = id, "delete declined");
            }
        }
        Commands::Serve { .. } => {}
    }

    Ok(())
}
