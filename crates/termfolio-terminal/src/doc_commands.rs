//! Documentation commands: help, commands, man.

use termfolio_types::error::Result;
use termfolio_vfs::DECOY_DIRS;

use crate::context::Context;
use crate::interpreter::{Command, CommandOutput};

/// Category order in the `help` listing.
const CATEGORIES: [&str; 7] = [
    "portfolio",
    "documentation",
    "filesystem",
    "system",
    "text",
    "fun",
    "timers",
];

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Everything up to the first period.
fn first_sentence(text: &str) -> &str {
    text.split('.').next().unwrap_or(text)
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Show available commands or details for a specific command."
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn category(&self) -> &str {
        "documentation"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if let Some(name) = args.first() {
            let name = name.to_lowercase();
            return Ok(match ctx.registry.get(&name) {
                Some(cmd) => CommandOutput::Text(format!(
                    "Usage: {} Usage: {}",
                    cmd.description(),
                    cmd.usage()
                )),
                None => CommandOutput::Text(format!("Command not found: {name}")),
            });
        }

        let mut lines = vec!["Available commands:".to_string()];
        for category in CATEGORIES {
            let names: Vec<&str> = ctx
                .registry
                .commands()
                .filter(|c| c.category() == category)
                .map(|c| c.name())
                .collect();
            if !names.is_empty() {
                lines.push(format!("{}: {}", title_case(category), names.join(", ")));
            }
        }
        lines.push(String::new());
        lines.push("Type 'help [command]' for more details on a specific command.".into());
        lines.push("Type 'commands' to see a list with descriptions.".into());
        lines.push("Type 'man [command]' to see a detailed manual for a command.".into());
        lines.push(String::new());
        lines.push(format!(
            "Available folders: home, {}",
            DECOY_DIRS.join(", ")
        ));
        lines.push("Use `cd`, `ls`, and `cat` to explore.".into());
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// commands
// ---------------------------------------------------------------------------

struct CommandsCmd;
impl Command for CommandsCmd {
    fn name(&self) -> &str {
        "commands"
    }
    fn description(&self) -> &str {
        "Show a detailed list of all commands with descriptions."
    }
    fn usage(&self) -> &str {
        "commands"
    }
    fn category(&self) -> &str {
        "documentation"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let listing = ctx.registry.list_commands();
        let width = listing.iter().map(|(name, _)| name.len()).max().unwrap_or(0) + 4;
        let mut out = String::from("Available commands:\n");
        for (name, description) in listing {
            out.push('\n');
            out.push_str(&format!("{name:<width$}{}", first_sentence(description)));
        }
        Ok(CommandOutput::Preformatted(out))
    }
}

// ---------------------------------------------------------------------------
// man
// ---------------------------------------------------------------------------

struct ManPage {
    name: &'static str,
    description: &'static str,
    long_description: &'static str,
    usage: &'static str,
    /// Command and the output it produces.
    example: Option<(&'static str, &'static str)>,
}

const MAN_THEME_OUTPUT: &str = "\
NAME
    theme - Lists all available themes.

SYNOPSIS
    theme

DESCRIPTION
    Displays a list of all themes that can be applied to the terminal. Use 'set theme <theme-name>' to change the theme.";

const MAN_PAGES: &[ManPage] = &[
    ManPage {
        name: "help",
        description: "Displays a list of available commands or help for a specific command.",
        long_description: "Provides a summary of all commands. When an argument is provided, it shows the usage for that specific command. For a more detailed view, use the `man` command.",
        usage: "help [command]",
        example: Some((
            "help clear",
            "Usage: Clear the terminal screen, history, or both. Usage: clear [screen|history|both]",
        )),
    },
    ManPage {
        name: "man",
        description: "Display the manual page for a command.",
        long_description: "Shows detailed information about a command, including its name, synopsis, a full description, and an example of its use.",
        usage: "man <command>",
        example: Some(("man theme", MAN_THEME_OUTPUT)),
    },
    ManPage {
        name: "clear",
        description: "Clears the terminal screen or history.",
        long_description: "This command is used to clear the terminal content. It can clear the visible screen, the command history, or both.",
        usage: "clear [screen|history|both]",
        example: Some(("clear history", "History cleared.")),
    },
    ManPage {
        name: "set",
        description: "Configure terminal options.",
        long_description: "Allows customization of terminal settings.
- 'set theme <theme-name>' to change the theme.
- 'set username <name>' to change the displayed username.
- 'set sound <on|off>' to toggle sound effects.
- 'set speed <ms>' to adjust the typing animation speed.",
        usage: "set <option> [value]",
        example: Some(("set theme blood", "Theme set to blood.")),
    },
    ManPage {
        name: "theme",
        description: "Lists all available themes.",
        long_description: "Displays a list of all themes that can be applied to the terminal. Use 'set theme <theme-name>' to change the theme.",
        usage: "theme",
        example: None,
    },
    ManPage {
        name: "about",
        description: "Displays my biography, education, and skills.",
        long_description: "Provides a detailed professional summary, including biography, education history, certifications, projects, and a list of key skills.",
        usage: "about",
        example: None,
    },
    ManPage {
        name: "contact",
        description: "Display my contact information.",
        long_description: "Shows contact information, including email and a link to my LinkedIn profile.",
        usage: "contact",
        example: None,
    },
    ManPage {
        name: "social",
        description: "Display links to my social media profiles.",
        long_description: "Lists every social media profile. With a platform name as argument, only that profile's link is shown.",
        usage: "social [platform]",
        example: Some(("social github", "github: https://github.com/aayush-xid-su")),
    },
    ManPage {
        name: "cd",
        description: "Change the working directory.",
        long_description: "Moves to another directory. Without an argument, or with `~`, it returns to the home directory. `..` moves up one level. The folders next to `home` at the root belong to the site administrator and refuse visitors.",
        usage: "cd [directory]",
        example: Some(("cd ~", "")),
    },
];

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_man_page(page: &ManPage) -> String {
    let mut out = format!(
        "NAME\n    {} - {}\n\nSYNOPSIS\n    {}\n\nDESCRIPTION\n{}",
        page.name,
        page.description,
        page.usage,
        indent(page.long_description)
    );
    if let Some((command, output)) = page.example {
        out.push_str("\n\nEXAMPLE\n    The following command:\n");
        out.push_str(&format!("    > {command}\n"));
        if output.is_empty() {
            out.push_str("    Produces no output.");
        } else {
            out.push_str("    Will produce the following output:\n");
            out.push_str(&indent(output));
        }
    }
    out
}

struct ManCmd;
impl Command for ManCmd {
    fn name(&self) -> &str {
        "man"
    }
    fn description(&self) -> &str {
        "Display the manual page for a command."
    }
    fn usage(&self) -> &str {
        "man [command]"
    }
    fn category(&self) -> &str {
        "documentation"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Ok(CommandOutput::text("What manual page do you want?"));
        };
        let name = name.to_lowercase();
        match MAN_PAGES.iter().find(|p| p.name == name) {
            Some(page) => Ok(CommandOutput::Preformatted(render_man_page(page))),
            None => Ok(CommandOutput::Text(format!("No manual entry for {name}"))),
        }
    }
}

/// Register documentation commands.
pub fn register_doc_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(CommandsCmd));
    reg.register(Box::new(ManCmd));
}
