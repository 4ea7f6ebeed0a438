use std::thread;
use std::time::Duration;
use blog_core::{Article, ArticleId, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum Message {
    Input(KeyEvent),
    Resize,
    ListLoaded,
    DetailLoaded(ArticleId),
    Created(Result<Article>),
}

/// Forwards terminal key presses into the UI loop. Terminal reads block,
/// so they run on their own thread; the thread exits once the loop is gone.
pub fn spawn_input_reader(tx: UnboundedSender<Message>) {
    thread::spawn(move || loop {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {
                let message = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => Message::Input(key),
                    Ok(Event::Resize(_, _)) => Message::Resize,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Failed to read terminal event: {}", e);
                        break;
                    }
                };
                if tx.send(message).is_err() {
                    break;
                }
            }
            Ok(false) => {
                if tx.is_closed() {
                    break;
                }
            }
            Err(e) => {
                warn!("Failed to poll terminal events: {}", e);
                break;
            }
        }
    });
}
