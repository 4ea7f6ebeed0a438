use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT: Once = Once::new();

pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Drop everything; used while the terminal UI owns the screen.
    Discard,
}

pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber once; later calls are no-ops.
pub fn init_logging(level: Level, target: LogTarget<'_>) -> std::io::Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }
    let discard = matches!(target, LogTarget::Discard);
    let file = match target {
        LogTarget::File(path) => Some(Arc::new(File::create(path)?)),
        _ => None,
    };

    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt().with_max_level(level);
        if let Some(file) = file {
            builder.with_ansi(false).with_writer(file).init();
        } else if discard {
            builder.with_writer(std::io::sink).init();
        } else {
            builder.with_writer(std::io::stderr).init();
        }
    });
    Ok(())
}
