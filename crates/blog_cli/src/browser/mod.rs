//! Interactive browser: article list on the left, the active article on
//! the right and a modal creation form.

mod app;
mod event;
mod ui;

use std::io::{self, Stdout};
use anyhow::Result;
use blog_query::BlogSession;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::sync::mpsc;
use tui::{backend::CrosstermBackend, Terminal};
use app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(session: BlogSession) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(session, tx.clone());
    let mut terminal = setup_terminal()?;

    event::spawn_input_reader(tx);
    app.start();

    let result = loop {
        if let Err(e) = terminal.draw(|f| ui::draw(f, &app)) {
            break Err(e.into());
        }
        match rx.recv().await {
            Some(message) => app.handle(message),
            None => break Ok(()),
        }
        if app.should_quit {
            break Ok(());
        }
    };

    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
