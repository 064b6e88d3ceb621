//! termfolio console entry point.
//!
//! Reads lines from stdin and feeds them to a terminal session. Between
//! lines the session is ticked so countdowns and reminders fire on time.
//! While the stopwatch runs its elapsed time is shown in place; the next
//! line entered stops it. Arrow keys, `!!` and `!-N` recall earlier lines;
//! a trailing Tab lists matching commands.

mod input;
mod render;

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, Result};
use termfolio_platform::{FileStore, KeyValueStore, MemoryStore, SystemClock};
use termfolio_terminal::Session;
use termfolio_types::config::TerminalConfig;

use input::Input;
use render::AnsiFrontend;

const TICK: Duration = Duration::from_millis(100);

/// Config path from the first CLI argument or `TERMFOLIO_CONFIG`, else
/// built-in defaults.
fn load_config() -> Result<TerminalConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TERMFOLIO_CONFIG").ok());
    match path {
        Some(path) => TerminalConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load config from {path}")),
        None => Ok(TerminalConfig::default()),
    }
}

fn open_store(config: &TerminalConfig) -> Result<Box<dyn KeyValueStore>> {
    match &config.storage_path {
        Some(path) => {
            let store = FileStore::open(path.clone())
                .with_context(|| format!("failed to open store at {}", path.display()))?;
            log::info!("Persisting session state to {}", path.display());
            Ok(Box::new(store))
        },
        None => Ok(Box::new(MemoryStore::new())),
    }
}

/// Forward stdin lines to the main loop. The channel closes on EOF.
fn spawn_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let store = open_store(&config)?;
    let mut session = Session::new(config, store, Box::new(SystemClock))?;
    let mut frontend = AnsiFrontend::new(io::stdout());

    session.boot(&mut frontend);
    frontend.prompt(&session.prompt());

    let lines = spawn_reader();
    loop {
        match lines.recv_timeout(TICK) {
            Ok(line) => {
                if session.state().stopwatch.is_running() {
                    frontend.clear_status();
                    session.interrupt(&mut frontend);
                } else {
                    match input::interpret(&line, session.history()) {
                        Input::Line(line) => session.submit(&line, &mut frontend),
                        Input::Recall(line) => {
                            frontend.notice(&line);
                            session.submit(&line, &mut frontend);
                        },
                        Input::Complete(partial) => {
                            frontend.suggest(&session.completions(&partial));
                        },
                        Input::NoEvent(text) => {
                            frontend.notice(&format!("{text}: event not found"));
                        },
                    }
                }
                frontend.prompt(&session.prompt());
            },
            Err(RecvTimeoutError::Timeout) => {
                session.tick(&mut frontend);
                if let Some(status) = session.stopwatch_status() {
                    frontend.status(&status);
                } else if frontend.take_dirty() {
                    frontend.prompt(&session.prompt());
                }
            },
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log::info!("Input closed, exiting");
    Ok(())
}
