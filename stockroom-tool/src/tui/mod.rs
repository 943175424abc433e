mod app;
mod field;
mod input;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use stockroom_core::{Session, Store};
use tracing::info;

use app::App;

use crate::error::StockError;

pub async fn run<S: Store>(session: Session<S>) -> Result<(), StockError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    info!("ui started");

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("ui closed");
    result
}

async fn run_loop<S: Store>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), StockError> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Short poll so image reads and notice expiry are picked up
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            input::handle_event(app, event);
        }

        app.poll_image();
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }

        tokio::task::yield_now().await;
    }

    Ok(())
}
