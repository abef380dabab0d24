use std::io::{self, Write};

use anyhow::Context;
use shelf_app::books::{BookFormController, FormConfig, FormView, HttpBooksApi};
use shelf_app::session::{self, Command};
use shelf_app::terminal::TerminalView;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        api = %settings.api.base_url,
        "shelf-app session starting"
    );

    let api = HttpBooksApi::new(&settings.api).context("failed to build HTTP client")?;
    let mut controller = BookFormController::new(
        api,
        TerminalView::stdout(false),
        FormConfig::from(&settings.form),
    );

    // a failed first load is already shown as the placeholder row
    let _ = controller.load_books().await;
    print!("{}", session::HELP);

    loop {
        print!("shelf> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?
            == 0
        {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Help => print!("{}", session::HELP),
            Command::Show => {
                let state = controller.state().clone();
                let config = *controller.config();
                controller.view_mut().render_form(&state, &config);
            }
            other => {
                if session::dispatch(&mut controller, other).await.is_break() {
                    break;
                }
            }
        }
    }

    tracing::info!("shelf-app session finished");
    Ok(())
}
