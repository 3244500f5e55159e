use std::{io, time::Duration};

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;

use parley::{
    api::ChatClient,
    app::{App, AppState},
    chat_view,
    config::{get_config, initialize_config},
    errors::ParleyResult,
    key_handlers::{handle_chat_input, handle_quit_confirm_input, ChatAction},
    logging::init_logging,
};

enum AppEvent {
    Key(KeyEvent),
    Tick,
    Outcome(ParleyResult<String>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    initialize_config().context("configuration failed")?;
    let config = get_config();
    let _logger = init_logging(&config.log_level).context("logging setup failed")?;
    log::info!("starting parley against {}", config.server_url);

    let client = ChatClient::new(
        &config.server_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, client).await;

    // Restore terminal, even when the loop errored.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    client: ChatClient,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<AppEvent>(100);

    // Forward terminal events; the poll timeout doubles as the redraw tick.
    let input_tx = tx.clone();
    tokio::task::spawn_blocking(move || loop {
        let tick = match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(CEvent::Key(key)) => input_tx.blocking_send(AppEvent::Key(key)),
                Ok(_) => input_tx.blocking_send(AppEvent::Tick),
                Err(_) => break,
            },
            Ok(false) => input_tx.blocking_send(AppEvent::Tick),
            Err(_) => break,
        };
        if tick.is_err() {
            break;
        }
    });

    terminal.draw(|f| chat_view::draw(f, &mut app))?;

    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::Key(key) => match app.state {
                AppState::Chat => {
                    if let ChatAction::Send(query) = handle_chat_input(key, &mut app) {
                        // Each submission gets its own cycle; replies are
                        // applied in whatever order they complete.
                        let client = client.clone();
                        let outcome_tx = tx.clone();
                        tokio::spawn(async move {
                            let outcome = client.get_response(&query).await;
                            let _ = outcome_tx.send(AppEvent::Outcome(outcome)).await;
                        });
                    }
                }
                AppState::QuitConfirm => handle_quit_confirm_input(key, &mut app),
                AppState::Quit => {}
            },
            AppEvent::Outcome(outcome) => app.apply_outcome(outcome),
            AppEvent::Tick => {}
        }

        if app.state == AppState::Quit {
            break;
        }

        terminal.draw(|f| chat_view::draw(f, &mut app))?;
    }

    Ok(())
}
