//! Command interpreter and session for the portfolio terminal.
//!
//! Commands implement the [`Command`] trait and are registered by name in a
//! [`CommandRegistry`]. A [`Session`] owns all terminal state, turns a
//! submitted line into a command call, and reports output to a
//! [`Frontend`].

pub mod art_commands;
mod commands;
pub mod context;
pub mod doc_commands;
pub mod file_commands;
pub mod fun_commands;
pub mod games;
pub mod history;
mod interpreter;
pub mod portfolio_commands;
mod session;
pub mod settings;
pub mod state;
pub mod system_commands;
pub mod text_commands;
pub mod timer_commands;

#[cfg(test)]
mod testing;

/// Register text-as-picture commands (ascii, asciiqr, qr).
pub use art_commands::register_art_commands;
/// Register every built-in command into a registry.
pub use commands::register_builtins;
pub use context::{Context, Frontend, OutputEvent, Sound, Transcript};
/// Register documentation commands (help, commands, man).
pub use doc_commands::register_doc_commands;
/// Register filesystem commands (ls, cd, cat, pwd).
pub use file_commands::register_file_commands;
/// Register games and amusements.
pub use fun_commands::register_fun_commands;
pub use history::{History, HistoryCursor};
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command.
pub use interpreter::{CommandOutput, Style};
/// Registry of available commands.
pub use interpreter::CommandRegistry;
/// Register the portfolio content commands.
pub use portfolio_commands::register_portfolio_commands;
pub use session::{BLOCKED_COMMANDS, Session};
pub use settings::Settings;
/// Register system commands (clear, set, shutdown, time, sysinfo, ...).
pub use system_commands::register_system_commands;
/// Register text utility commands.
pub use text_commands::register_text_commands;
/// Register timer commands.
pub use timer_commands::register_timer_commands;
