//! The execution context handed to every command, and the frontend
//! interface the session talks to.

use rand::rngs::StdRng;
use termfolio_platform::{SystemTime, TimeService};
use termfolio_types::config::TerminalConfig;
use termfolio_types::theme::Theme;
use termfolio_vfs::{NodeId, Vfs};

use crate::history::History;
use crate::interpreter::{CommandOutput, CommandRegistry};
use crate::settings::Settings;
use crate::state::SessionState;

/// Feedback sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Enter,
    Error,
}

/// One entry in the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// A submitted line shown after the prompt it was typed at.
    Echo { prompt: String, line: String },
    Output(CommandOutput),
}

/// The UI shell: receives output, clears the screen, plays sounds.
pub trait Frontend {
    fn append(&mut self, event: OutputEvent);

    /// Drop everything shown so far.
    fn clear(&mut self);

    fn play_sound(&mut self, sound: Sound);

    /// Called after any setting changes (theme, username, sound, speed).
    fn settings_changed(&mut self, _settings: &Settings) {}
}

/// A frontend that records everything in memory.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    pub events: Vec<OutputEvent>,
    pub sounds: Vec<Sound>,
    /// How many times the screen was cleared.
    pub clears: usize,
    /// Settings as last reported.
    pub settings: Option<Settings>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Command outputs, skipping echoes.
    pub fn outputs(&self) -> impl Iterator<Item = &CommandOutput> {
        self.events.iter().filter_map(|e| match e {
            OutputEvent::Output(out) => Some(out),
            OutputEvent::Echo { .. } => None,
        })
    }

    /// All command output flattened to text, one event per line group.
    pub fn text(&self) -> String {
        self.outputs()
            .map(CommandOutput::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn last_output(&self) -> Option<&CommandOutput> {
        self.outputs().last()
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Frontend for Transcript {
    fn append(&mut self, event: OutputEvent) {
        self.events.push(event);
    }

    fn clear(&mut self) {
        self.events.clear();
        self.clears += 1;
    }

    fn play_sound(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn settings_changed(&mut self, settings: &Settings) {
        self.settings = Some(settings.clone());
    }
}

/// Power state and requests a command leaves for the session to act on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    /// After `shutdown`, until `poweron` or `reset`.
    pub suspended: bool,
    /// Set by `reset`; the session wipes its state once the command returns.
    pub reset_requested: bool,
}

pub const BANNER_ART: &str = r#"
   d8888b.  .d8b.  d8888b. db   db
   88  '8D d8' '8b 88  '8D 88   88
   88oobY' 88ooo88 88   88 88ooo88
   88'8b   88~~~88 88   88 88~~~88
   88 '88. 88   88 88  .8D 88   88
   88   YD YP   YP Y8888D' YP   YP

        .g8"""bgd          db      d88888b
      .d8'     '8b        ;8     8P'    'Y
      d8'       '8b      ,8'     8b
      88         88     ,8P      88
      '8b       d8'    ,8P       '8b    .8
       'Y8,""8bdP'    ,8P'         'Y8888P'
"#;

pub const BANNER_HINT: &str = "Type '?' or 'help' to view a list of available commands.";

/// Clear the screen and show the startup header.
pub(crate) fn show_banner(frontend: &mut dyn Frontend) {
    frontend.clear();
    frontend.append(OutputEvent::Output(CommandOutput::Styled {
        style: crate::interpreter::Style::Accent,
        lines: BANNER_ART.lines().map(str::to_string).collect(),
    }));
    frontend.append(OutputEvent::Output(CommandOutput::text(BANNER_HINT)));
}

/// Capabilities available to a command for the duration of one call.
///
/// The working directory is stored as a node; its display path is always
/// derived from it, so the two cannot drift apart.
pub struct Context<'a> {
    pub vfs: &'a Vfs,
    pub registry: &'a CommandRegistry,
    pub config: &'a TerminalConfig,
    pub history: &'a mut History,
    pub state: &'a mut SessionState,
    pub rng: &'a mut StdRng,
    pub(crate) clock: &'a dyn TimeService,
    pub(crate) settings: &'a mut Settings,
    pub(crate) cwd: &'a mut NodeId,
    pub(crate) lifecycle: &'a mut Lifecycle,
    pub(crate) frontend: &'a mut dyn Frontend,
}

impl Context<'_> {
    // -- Output --

    /// Append output immediately, ahead of the command's return value.
    pub fn print(&mut self, output: CommandOutput) {
        if !output.is_empty() {
            self.frontend.append(OutputEvent::Output(output));
        }
    }

    pub fn clear_output(&mut self) {
        self.frontend.clear();
    }

    /// Clear the screen and show the startup header.
    pub fn show_banner(&mut self) {
        show_banner(&mut *self.frontend);
    }

    /// Play a feedback sound unless sound is disabled.
    pub fn play_sound(&mut self, sound: Sound) {
        if self.settings.sound {
            self.frontend.play_sound(sound);
        }
    }

    // -- Working directory --

    pub fn cwd(&self) -> NodeId {
        *self.cwd
    }

    /// Canonical path of the working directory (`~`, `/`, `~/...`, `/...`).
    pub fn current_path(&self) -> String {
        self.vfs.get_path(*self.cwd)
    }

    /// Change the working directory. Only directories are accepted.
    pub fn set_cwd(&mut self, dir: NodeId) -> bool {
        if self.vfs.get(dir).is_some_and(|n| n.is_dir()) {
            *self.cwd = dir;
            true
        } else {
            false
        }
    }

    // -- Settings --

    pub fn settings(&self) -> &Settings {
        &*self.settings
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.frontend.settings_changed(&*self.settings);
    }

    pub fn set_username(&mut self, username: &str) {
        self.settings.username = username.to_string();
        self.frontend.settings_changed(&*self.settings);
    }

    pub fn set_sound(&mut self, enabled: bool) {
        self.settings.sound = enabled;
        self.frontend.settings_changed(&*self.settings);
    }

    pub fn set_typing_speed(&mut self, millis: u32) {
        self.settings.typing_speed_ms = millis;
        self.frontend.settings_changed(&*self.settings);
    }

    // -- Lifecycle --

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn is_suspended(&self) -> bool {
        self.lifecycle.suspended
    }

    pub fn suspend(&mut self) {
        log::info!("Terminal suspended");
        self.lifecycle.suspended = true;
    }

    pub fn resume(&mut self) {
        log::info!("Terminal powered on");
        self.lifecycle.suspended = false;
    }

    /// Ask the session to wipe persisted and in-memory state once the
    /// current command returns.
    pub fn request_reset(&mut self) {
        self.lifecycle.reset_requested = true;
    }

    // -- Time --

    pub fn now_millis(&self) -> u64 {
        self.clock.epoch_millis()
    }

    /// Current UTC wall-clock time.
    pub fn now(&self) -> SystemTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &dyn TimeService {
        self.clock
    }
}
