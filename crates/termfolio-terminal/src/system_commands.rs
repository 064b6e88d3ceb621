//! Terminal and session commands: clear, history, set, theme, matrix,
//! username, whoami, shutdown, poweron, reset, uptime, date, time, sysinfo.

use sysinfo::System;
use termfolio_types::error::Result;
use termfolio_types::theme::Theme;

use crate::context::{Context, Sound};
use crate::interpreter::{Command, CommandOutput};

const DEFAULT_HISTORY_COUNT: usize = 10;

pub const SHUTDOWN_LOG: &str = "\
[ OK ] Stopping Network Manager...
[ OK ] Disconnecting active network interfaces...
[ OK ] Stopping User Sessions...
[ OK ] Terminating background services...
[ OK ] Stopping System Logging...
[ OK ] Stopping Authorization Manager...
[ OK ] Saving system clock...
[ OK ] Unmounting /home...
[ OK ] Unmounting /var...
[ OK ] Disabling Swap...
[ OK ] All file systems unmounted.
[ OK ] Reached target Shutdown.
[ *  ] Powering off...

SYSTEM IS GOING TO SLEEP NOW.";

/// Parse a UTC offset such as `+05:30`, `-8`, `UTC+1` or `UTC` into minutes.
pub fn parse_utc_offset(text: &str) -> Option<i32> {
    let rest = match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("utc") => &text[3..],
        _ => text,
    };
    if rest.is_empty() {
        return Some(0);
    }
    let (sign, body) = match rest.as_bytes()[0] {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let (hours, minutes) = match body.split_once(':') {
        Some((h, m)) => (h, m),
        None => (body, "0"),
    };
    let all_digits = |s: &str| !s.is_empty() && s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || !all_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal screen, history, or both."
    }
    fn usage(&self) -> &str {
        "clear [screen|history|both]"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        match args.first().copied().unwrap_or("screen") {
            "screen" => {
                ctx.show_banner();
                Ok(CommandOutput::None)
            },
            "history" => {
                ctx.clear_history();
                Ok(CommandOutput::text("History cleared."))
            },
            "both" => {
                ctx.show_banner();
                ctx.clear_history();
                Ok(CommandOutput::text("History cleared."))
            },
            _ => Ok(CommandOutput::text("Usage: clear [screen|history|both]")),
        }
    }
}

// ---------------------------------------------------------------------------
// history
// ---------------------------------------------------------------------------

struct HistoryCmd;
impl Command for HistoryCmd {
    fn name(&self) -> &str {
        "history"
    }
    fn description(&self) -> &str {
        "Show command history."
    }
    fn usage(&self) -> &str {
        "history [count]"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let count = match args.first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(n) => n,
                Err(_) => return Ok(CommandOutput::text("Usage: history [count]")),
            },
            None => DEFAULT_HISTORY_COUNT,
        };
        if ctx.history.is_empty() {
            return Ok(CommandOutput::text("No history found."));
        }
        let lines = ctx.history.recent(count);
        if lines.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

struct SetCmd;
impl Command for SetCmd {
    fn name(&self) -> &str {
        "set"
    }
    fn description(&self) -> &str {
        "Configure terminal options."
    }
    fn usage(&self) -> &str {
        "set <theme|username|sound|speed> <value>"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let [key, rest @ ..] = args else {
            return Ok(set_usage());
        };
        if rest.is_empty() {
            return Ok(set_usage());
        }
        let value = rest.join(" ");

        let message = match *key {
            "theme" => match value.parse::<Theme>() {
                Ok(theme) => {
                    ctx.set_theme(theme);
                    format!("Theme set to {theme}.")
                },
                Err(_) => format!("Invalid theme. Available: {}", Theme::names()),
            },
            "username" => {
                ctx.set_username(&value);
                format!("Username set to {value}.")
            },
            "sound" => match value.as_str() {
                "on" => {
                    ctx.set_sound(true);
                    "Sound enabled.".to_string()
                },
                "off" => {
                    ctx.set_sound(false);
                    "Sound disabled.".to_string()
                },
                _ => "Invalid sound option. Use \"on\" or \"off\".".to_string(),
            },
            "speed" => match value.parse::<u32>() {
                Ok(speed) => {
                    ctx.set_typing_speed(speed);
                    format!("Typing speed set to {speed}ms.")
                },
                Err(_) => "Invalid speed. Please provide a non-negative number.".to_string(),
            },
            _ => "Invalid setting. Use \"theme\", \"username\", \"sound\", or \"speed\".".to_string(),
        };
        Ok(CommandOutput::Text(message))
    }
}

fn set_usage() -> CommandOutput {
    CommandOutput::Text(format!(
        "Usage: set [theme|username|sound|speed] [value].\n\
         Available themes: {}\n\
         Sound options: on, off\n\
         Speed is in ms per character.",
        Theme::names()
    ))
}

// ---------------------------------------------------------------------------
// theme / matrix
// ---------------------------------------------------------------------------

struct ThemeCmd;
impl Command for ThemeCmd {
    fn name(&self) -> &str {
        "theme"
    }
    fn description(&self) -> &str {
        "List available themes. Use \"set theme <name>\" to change."
    }
    fn usage(&self) -> &str {
        "theme"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let current = ctx.settings().theme;
        let mut lines = vec!["Available themes:".to_string()];
        for theme in Theme::ALL {
            if theme == current {
                lines.push(format!("- {theme} (current)"));
            } else {
                lines.push(format!("- {theme}"));
            }
        }
        lines.push("Usage: set theme [theme-name]".to_string());
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

struct MatrixCmd;
impl Command for MatrixCmd {
    fn name(&self) -> &str {
        "matrix"
    }
    fn description(&self) -> &str {
        "Toggle the matrix theme."
    }
    fn usage(&self) -> &str {
        "matrix"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if ctx.settings().theme == Theme::Matrix {
            ctx.set_theme(Theme::Dark);
            Ok(CommandOutput::text("Matrix mode disabled."))
        } else {
            ctx.set_theme(Theme::Matrix);
            Ok(CommandOutput::text("Matrix mode enabled."))
        }
    }
}

// ---------------------------------------------------------------------------
// username / whoami
// ---------------------------------------------------------------------------

struct UsernameCmd;
impl Command for UsernameCmd {
    fn name(&self) -> &str {
        "username"
    }
    fn description(&self) -> &str {
        "View the current terminal username."
    }
    fn usage(&self) -> &str {
        "username"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(format!(
            "Current username is: {}",
            ctx.settings().username
        )))
    }
}

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Display current user and system info."
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let settings = ctx.settings();
        let home = ctx.vfs.absolute_path(ctx.vfs.home());
        Ok(CommandOutput::Text(format!(
            "User: {}\nHost: {}\nHome: {home}\nTheme: {}",
            settings.username, settings.hostname, settings.theme
        )))
    }
}

// ---------------------------------------------------------------------------
// shutdown / poweron / reset
// ---------------------------------------------------------------------------

struct ShutdownCmd;
impl Command for ShutdownCmd {
    fn name(&self) -> &str {
        "shutdown"
    }
    fn description(&self) -> &str {
        "Shuts down the terminal interface."
    }
    fn usage(&self) -> &str {
        "shutdown"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        ctx.clear_output();
        ctx.suspend();
        ctx.play_sound(Sound::Enter);
        Ok(CommandOutput::Preformatted(SHUTDOWN_LOG.to_string()))
    }
}

struct PoweronCmd;
impl Command for PoweronCmd {
    fn name(&self) -> &str {
        "poweron"
    }
    fn description(&self) -> &str {
        "Restarts the terminal."
    }
    fn usage(&self) -> &str {
        "poweron"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if !ctx.is_suspended() {
            return Ok(CommandOutput::text("System is already running."));
        }
        ctx.resume();
        ctx.show_banner();
        Ok(CommandOutput::text("System restarted."))
    }
}

struct ResetCmd;
impl Command for ResetCmd {
    fn name(&self) -> &str {
        "reset"
    }
    fn description(&self) -> &str {
        "Reset terminal settings and reload."
    }
    fn usage(&self) -> &str {
        "reset"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        ctx.request_reset();
        Ok(CommandOutput::text("Resetting terminal..."))
    }
}

// ---------------------------------------------------------------------------
// uptime / date / time
// ---------------------------------------------------------------------------

struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &str {
        "uptime"
    }
    fn description(&self) -> &str {
        "Show terminal session uptime."
    }
    fn usage(&self) -> &str {
        "uptime"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let secs = ctx.now_millis().saturating_sub(ctx.state.started_at) / 1000;
        Ok(CommandOutput::Text(format!(
            "Session uptime: {}h {}m {}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )))
    }
}

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Display the current date and time."
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(format!("{} UTC", ctx.now())))
    }
}

struct TimeCmd;
impl Command for TimeCmd {
    fn name(&self) -> &str {
        "time"
    }
    fn description(&self) -> &str {
        "Display the current time, optionally at a UTC offset."
    }
    fn usage(&self) -> &str {
        "time [+HH:MM|-HH:MM]"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(zone) = args.first() else {
            return Ok(CommandOutput::Text(ctx.now().time_string()));
        };
        match parse_utc_offset(zone) {
            Some(offset) => Ok(CommandOutput::Text(
                ctx.clock().now_with_offset(offset).time_string(),
            )),
            None => Ok(CommandOutput::Text(format!("Invalid timezone: {zone}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// sysinfo
// ---------------------------------------------------------------------------

/// Facts about the machine running the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub platform: String,
    pub kernel: String,
    pub cpu_cores: usize,
    pub memory_bytes: u64,
    pub terminal: String,
    pub language: String,
}

impl HostInfo {
    pub fn probe() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu();
        let na = || "N/A".to_string();
        Self {
            platform: System::long_os_version().unwrap_or_else(na),
            kernel: System::kernel_version().unwrap_or_else(na),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            terminal: std::env::var("TERM").unwrap_or_else(|_| na()),
            language: std::env::var("LANG").unwrap_or_else(|_| na()),
        }
    }
}

/// The `sysinfo` report. Uptime hours wrap at a day.
pub fn render_sysinfo(host: &HostInfo, uptime_secs: u64) -> String {
    let cores = match host.cpu_cores {
        0 => "N/A".to_string(),
        n => n.to_string(),
    };
    let memory = match host.memory_bytes {
        0 => "N/A".to_string(),
        bytes => format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0)),
    };
    let uptime = format!(
        "{}h {}m {}s",
        (uptime_secs / 3600) % 24,
        (uptime_secs / 60) % 60,
        uptime_secs % 60
    );
    let rows = [
        ("Platform", host.platform.as_str()),
        ("Kernel", host.kernel.as_str()),
        ("CPU Cores", cores.as_str()),
        ("Memory", memory.as_str()),
        ("Terminal", host.terminal.as_str()),
        ("Language", host.language.as_str()),
        ("Timezone", "UTC"),
        ("Uptime", uptime.as_str()),
    ];
    let mut lines = vec![
        "SYSTEM INFORMATION".to_string(),
        "------------------".to_string(),
    ];
    lines.extend(rows.iter().map(|(label, value)| format!("{label:<15}: {value}")));
    lines.join("\n")
}

struct SysinfoCmd;
impl Command for SysinfoCmd {
    fn name(&self) -> &str {
        "sysinfo"
    }
    fn description(&self) -> &str {
        "Display information about the host system."
    }
    fn usage(&self) -> &str {
        "sysinfo"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let secs = ctx.now_millis().saturating_sub(ctx.state.started_at) / 1000;
        Ok(CommandOutput::Preformatted(render_sysinfo(&HostInfo::probe(), secs)))
    }
}

/// Register terminal and session commands.
pub fn register_system_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(HistoryCmd));
    reg.register(Box::new(SetCmd));
    reg.register(Box::new(ThemeCmd));
    reg.register(Box::new(MatrixCmd));
    reg.register(Box::new(UsernameCmd));
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(ShutdownCmd));
    reg.register(Box::new(PoweronCmd));
    reg.register(Box::new(ResetCmd));
    reg.register(Box::new(UptimeCmd));
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(TimeCmd));
    reg.register(Box::new(SysinfoCmd));
}
