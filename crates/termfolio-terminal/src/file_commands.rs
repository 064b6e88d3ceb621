//! Filesystem navigation commands: ls, cd, cat, pwd.

use termfolio_types::error::Result;
use termfolio_vfs::{DECOY_DIRS, NodeId};

use crate::context::{Context, Sound};
use crate::interpreter::{Command, CommandOutput};

pub const DECOY_DENIAL: [&str; 2] = [
    "YOU ARE NOT THE SUPER USER OR ADMIN OF THIS SITE",
    "YOU NEED SUDO PRIVILEGE TO ACCESS THESE THINGS",
];

/// Whether `id` is one of the decoy directories directly below the root.
fn is_decoy(ctx: &Context<'_>, id: NodeId) -> bool {
    let node = ctx.vfs.node(id);
    node.is_dir() && node.parent() == Some(ctx.vfs.root()) && DECOY_DIRS.contains(&node.name())
}

fn deny(ctx: &mut Context<'_>) -> CommandOutput {
    log::debug!("Refused entry to a decoy directory");
    ctx.play_sound(Sound::Error);
    CommandOutput::error(DECOY_DENIAL)
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List files and directories."
    }
    fn usage(&self) -> &str {
        "ls [-a] [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let show_hidden = args.contains(&"-a");
        let target = args.iter().find(|a| !a.starts_with('-'));

        let dir = match target {
            Some(path) => match ctx.vfs.find_node(path, ctx.cwd()) {
                Some(id) => id,
                None => {
                    return Ok(CommandOutput::Text(format!(
                        "ls: cannot access '{path}': No such file or directory"
                    )));
                },
            },
            None => ctx.cwd(),
        };

        let node = ctx.vfs.node(dir);
        if node.is_file() {
            return Ok(CommandOutput::Text(node.name().to_string()));
        }

        let entries: Vec<String> = node
            .children()
            .filter(|(name, _)| show_hidden || !name.starts_with('.'))
            .map(|(name, id)| {
                if ctx.vfs.node(id).is_dir() {
                    format!("{name}/")
                } else {
                    name.to_string()
                }
            })
            .collect();

        if entries.is_empty() {
            Ok(CommandOutput::None)
        } else {
            Ok(CommandOutput::Text(entries.join("  ")))
        }
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory."
    }
    fn usage(&self) -> &str {
        "cd [directory]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let path = match args.first() {
            None | Some(&"~") | Some(&"~/") => {
                let home = ctx.vfs.home();
                ctx.set_cwd(home);
                return Ok(CommandOutput::None);
            },
            Some(path) => *path,
        };

        let at_root = ctx.cwd() == ctx.vfs.root();
        let first_segment = path.split('/').next().unwrap_or_default();
        if at_root && DECOY_DIRS.contains(&first_segment) {
            return Ok(deny(ctx));
        }

        if path == ".." {
            if let Some(parent) = ctx.vfs.node(ctx.cwd()).parent() {
                ctx.set_cwd(parent);
            }
            return Ok(CommandOutput::None);
        }

        match ctx.vfs.find_node(path, ctx.cwd()) {
            Some(id) if ctx.vfs.node(id).is_dir() => {
                if is_decoy(ctx, id) {
                    return Ok(deny(ctx));
                }
                ctx.set_cwd(id);
                Ok(CommandOutput::None)
            },
            _ => Ok(CommandOutput::Text(format!(
                "cd: no such file or directory: {path}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display content of a file."
    }
    fn usage(&self) -> &str {
        "cat [filename]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            return Ok(CommandOutput::text("Usage: cat [filename]"));
        };
        let Some(id) = ctx.vfs.find_node(name, ctx.cwd()) else {
            return Ok(CommandOutput::Text(format!(
                "cat: {name}: No such file or directory"
            )));
        };
        match ctx.vfs.read(id) {
            Some(text) => Ok(CommandOutput::Preformatted(text)),
            None => Ok(CommandOutput::Text(format!("cat: {name}: Is a directory"))),
        }
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory."
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(ctx.vfs.absolute_path(ctx.cwd())))
    }
}

/// Register filesystem commands.
pub fn register_file_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(PwdCmd));
}
