//! The built-in command set.

use crate::interpreter::CommandRegistry;

/// Register every built-in command, grouped by category, plus the `?`
/// alias for `help`.
pub fn register_builtins(reg: &mut CommandRegistry) {
    crate::register_portfolio_commands(reg);
    crate::register_doc_commands(reg);
    crate::register_file_commands(reg);
    crate::register_system_commands(reg);
    crate::register_text_commands(reg);
    crate::register_art_commands(reg);
    crate::register_fun_commands(reg);
    crate::register_timer_commands(reg);
    reg.alias("?", "help");
}
