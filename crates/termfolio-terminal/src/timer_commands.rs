//! Time-based commands: stopwatch, timer, remind.
//!
//! None of these schedule anything themselves. They record due times in
//! the session state; the session fires them from `tick`.

use termfolio_types::error::Result;

use crate::context::Context;
use crate::interpreter::{Command, CommandOutput};
use crate::state::format_seconds;

/// Parse `seconds` or `[[hh:]mm:]ss`. Empty fields count as zero.
pub fn parse_duration(text: &str) -> Option<u64> {
    if !text.contains(':') {
        return text.parse().ok();
    }
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() > 3 {
        return None;
    }
    fields.iter().try_fold(0u64, |total, field| {
        let value = if field.is_empty() {
            0
        } else {
            field.parse::<u64>().ok()?
        };
        total.checked_mul(60)?.checked_add(value)
    })
}

// ---------------------------------------------------------------------------
// stopwatch
// ---------------------------------------------------------------------------

struct StopwatchCmd;
impl Command for StopwatchCmd {
    fn name(&self) -> &str {
        "stopwatch"
    }
    fn description(&self) -> &str {
        "A simple stopwatch. Press ESC to stop it while it runs."
    }
    fn usage(&self) -> &str {
        "stopwatch [start|stop|reset]"
    }
    fn category(&self) -> &str {
        "timers"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let now = ctx.now_millis();
        let text = match args.first().copied().unwrap_or("start") {
            "start" => {
                if ctx.state.stopwatch.start(now) {
                    "Stopwatch started.".to_string()
                } else {
                    "Stopwatch already running.".to_string()
                }
            },
            "stop" => match ctx.state.stopwatch.stop(now) {
                Some(elapsed) => format!(
                    "Stopwatch stopped. Elapsed time: {}s",
                    format_seconds(elapsed)
                ),
                None => "Stopwatch not running.".to_string(),
            },
            "reset" => {
                ctx.state.stopwatch.reset();
                "Stopwatch reset.".to_string()
            },
            _ => "Usage: stopwatch [start|stop|reset]".to_string(),
        };
        Ok(CommandOutput::Text(text))
    }
}

// ---------------------------------------------------------------------------
// timer
// ---------------------------------------------------------------------------

struct TimerCmd;
impl Command for TimerCmd {
    fn name(&self) -> &str {
        "timer"
    }
    fn description(&self) -> &str {
        "Set a countdown timer. Running it again while counting cancels it."
    }
    fn usage(&self) -> &str {
        "timer [seconds|hh:mm:ss]"
    }
    fn category(&self) -> &str {
        "timers"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if ctx.state.countdown.cancel() {
            log::debug!("Countdown cancelled");
            return Ok(CommandOutput::text("Previous timer cleared."));
        }
        let Some(arg) = args.first() else {
            return Ok(CommandOutput::text("Usage: timer [seconds|hh:mm:ss]"));
        };
        let seconds = match parse_duration(arg) {
            Some(s) if s > 0 => s,
            _ => return Ok(CommandOutput::text("Invalid time specified.")),
        };
        let now = ctx.now_millis();
        ctx.state.countdown.start(now, seconds);
        Ok(CommandOutput::Text(format!("Timer set for {seconds} seconds.")))
    }
}

// ---------------------------------------------------------------------------
// remind
// ---------------------------------------------------------------------------

struct RemindCmd;
impl Command for RemindCmd {
    fn name(&self) -> &str {
        "remind"
    }
    fn description(&self) -> &str {
        "Set a reminder."
    }
    fn usage(&self) -> &str {
        "remind [seconds] [message]"
    }
    fn category(&self) -> &str {
        "timers"
    }
    fn execute(&self, args: &[&str], ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let [seconds, message @ ..] = args else {
            return Ok(CommandOutput::text("Usage: remind [seconds] [message]"));
        };
        if message.is_empty() {
            return Ok(CommandOutput::text("Usage: remind [seconds] [message]"));
        }
        let Ok(seconds) = seconds.parse::<u64>() else {
            return Ok(CommandOutput::text("Invalid number of seconds."));
        };
        let due_at = ctx
            .now_millis()
            .saturating_add(seconds.saturating_mul(1000));
        ctx.state.add_reminder(due_at, message.join(" "));
        Ok(CommandOutput::Text(format!(
            "Reminder set for {seconds} seconds."
        )))
    }
}

/// Register timer commands.
pub fn register_timer_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(StopwatchCmd));
    reg.register(Box::new(TimerCmd));
    reg.register(Box::new(RemindCmd));
}
