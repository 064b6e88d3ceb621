//! Command trait, command output, and the registry that maps names to
//! handlers.

use std::collections::BTreeMap;

use termfolio_types::error::Result;

use crate::context::Context;

/// Visual treatment of a [`CommandOutput::Styled`] block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    /// Rendered in the error color.
    Error,
    /// Rendered in the theme's accent color.
    Accent,
}

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Command produced no visible output.
    None,
    /// Plain text, possibly several lines.
    Text(String),
    /// Text whose whitespace must be kept (boards, calendars, documents).
    Preformatted(String),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Lines rendered with a specific style.
    Styled { style: Style, lines: Vec<String> },
}

impl CommandOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// A styled error block.
    pub fn error<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Styled {
            style: Style::Error,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Nothing worth appending: `None`, or text that is the empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(text) | Self::Preformatted(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Flatten to plain text, the way a dumb terminal would show it.
    pub fn plain_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(text) | Self::Preformatted(text) => text.clone(),
            Self::Table { headers, rows } => {
                let mut out = headers.join(" | ");
                for row in rows {
                    out.push('\n');
                    out.push_str(&row.join(" | "));
                }
                out
            },
            Self::Styled { lines, .. } => lines.join("\n"),
        }
    }
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types). Lowercase.
    fn name(&self) -> &str;

    /// One-line description for `help` and `commands`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cd \[directory\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and context.
    ///
    /// Malformed arguments are answered with an `Ok` usage text. `Err` is
    /// reserved for genuine failures; the dispatcher reports those as
    /// `Error executing '<cmd>': <message>`.
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands.
///
/// Names are stored lowercase. Aliases resolve to a registered command but
/// never show up in listings.
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    aliases: BTreeMap<String, String>,
    collisions: Vec<String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            aliases: BTreeMap::new(),
            collisions: Vec::new(),
        }
    }

    /// Register a command. A later registration under the same name wins;
    /// the name is recorded in [`collisions`](Self::collisions).
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_ascii_lowercase();
        if self.commands.insert(name.clone(), cmd).is_some() {
            log::warn!("Command '{name}' registered twice; the later one wins");
            self.collisions.push(name);
        }
    }

    /// Make `alias` resolve to the command registered as `target`.
    pub fn alias(&mut self, alias: &str, target: &str) {
        self.aliases
            .insert(alias.to_ascii_lowercase(), target.to_ascii_lowercase());
    }

    /// Look up a command by name or alias, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        let lower = name.to_ascii_lowercase();
        let key = self.aliases.get(&lower).unwrap_or(&lower);
        self.commands.get(key).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names registered more than once, in registration order.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    /// Sorted command names, aliases excluded.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Sorted commands, aliases excluded.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|c| c.as_ref())
    }

    /// Return a sorted list of (name, description) pairs.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Return sorted completions for a partial command name.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = partial.to_ascii_lowercase();
        self.commands
            .keys()
            .filter(|name| name.starts_with(&lower))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, &'static str);
    impl Command for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            self.1
        }
        fn usage(&self) -> &str {
            self.0
        }
        fn execute(&self, _: &[&str], _: &mut Context<'_>) -> Result<CommandOutput> {
            Ok(CommandOutput::text(self.1))
        }
    }

    fn registry() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        reg.register(Box::new(Named("help", "Show help")));
        reg.register(Box::new(Named("history", "Show history")));
        reg.register(Box::new(Named("cd", "Change directory")));
        reg.alias("?", "help");
        reg
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let reg = registry();
        assert_eq!(reg.get("HeLp").map(|c| c.name()), Some("help"));
        assert!(reg.get("nope").is_none());
    }

    #[test]
    fn alias_resolves_but_is_not_listed() {
        let reg = registry();
        assert_eq!(reg.get("?").map(|c| c.name()), Some("help"));
        assert!(!reg.names().contains(&"?"));
        assert!(reg.completions("").iter().all(|n| n != "?"));
    }

    #[test]
    fn names_are_sorted() {
        let reg = registry();
        assert_eq!(reg.names(), ["cd", "help", "history"]);
        let listed: Vec<&str> = reg.list_commands().iter().map(|(n, _)| *n).collect();
        assert_eq!(listed, ["cd", "help", "history"]);
    }

    #[test]
    fn completions_prefix_sorted() {
        let reg = registry();
        assert_eq!(reg.completions("H"), ["help", "history"]);
        assert!(reg.completions("zz").is_empty());
    }

    #[test]
    fn duplicate_registration_is_recorded() {
        let mut reg = registry();
        reg.register(Box::new(Named("cd", "Other cd")));
        assert_eq!(reg.collisions(), ["cd"]);
        assert_eq!(reg.get("cd").map(|c| c.description()), Some("Other cd"));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn default_creates_empty_registry() {
        let reg = CommandRegistry::default();
        assert!(reg.is_empty());
        assert!(reg.collisions().is_empty());
    }

    #[test]
    fn plain_text_flattens_every_variant() {
        assert_eq!(CommandOutput::None.plain_text(), "");
        assert_eq!(CommandOutput::text("a").plain_text(), "a");
        assert_eq!(CommandOutput::error(["x", "y"]).plain_text(), "x\ny");
        let table = CommandOutput::Table {
            headers: vec!["k".into(), "v".into()],
            rows: vec![vec!["a".into(), "1".into()]],
        };
        assert_eq!(table.plain_text(), "k | v\na | 1");
    }
}
