//! The session controller: owns every piece of terminal state and turns
//! submitted lines into output events.

use rand::SeedableRng;
use rand::rngs::StdRng;
use termfolio_platform::{KeyValueStore, TimeService, load_json, save_json};
use termfolio_types::config::TerminalConfig;
use termfolio_types::error::Result;
use termfolio_vfs::{NodeId, Vfs, portfolio_tree};

use crate::commands::register_builtins;
use crate::context::{Context, Frontend, Lifecycle, OutputEvent, Sound, show_banner};
use crate::games::RpsScore;
use crate::history::History;
use crate::interpreter::{CommandOutput, CommandRegistry, Style};
use crate::settings::{Settings, keys};
use crate::state::{SessionState, format_seconds};

/// Names refused before the registry is consulted.
pub const BLOCKED_COMMANDS: [&str; 8] = [
    "sudo", "passwd", "su", "useradd", "adduser", "chmod", "install", "rm",
];

const PERMISSION_DENIED: &str = "You don't have permission to use this command.";
const SUSPENDED: &str = "System is suspended. Type 'poweron' to start it again.";

/// One visitor's terminal.
///
/// Owns the registry, the filesystem, settings, history, working
/// directory, stateful command state, the clock, the random source and the
/// persistence store. All mutation happens through `&mut self`, so one
/// session processes one line at a time.
pub struct Session {
    config: TerminalConfig,
    registry: CommandRegistry,
    vfs: Vfs,
    cwd: NodeId,
    settings: Settings,
    history: History,
    state: SessionState,
    lifecycle: Lifecycle,
    clock: Box<dyn TimeService>,
    rng: StdRng,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    /// A session with the portfolio tree and every built-in command.
    pub fn new(
        config: TerminalConfig,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn TimeService>,
    ) -> Result<Self> {
        config.validate()?;
        let vfs = portfolio_tree(&config.home_user)?;
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Ok(Self::from_parts(config, registry, vfs, store, clock))
    }

    /// Assemble a session from prepared parts. Persisted values in `store`
    /// take precedence over `config` defaults.
    pub fn from_parts(
        config: TerminalConfig,
        registry: CommandRegistry,
        vfs: Vfs,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn TimeService>,
    ) -> Self {
        let settings = Settings::load(store.as_ref(), &config);
        let history = History::from_entries(
            load_json(store.as_ref(), keys::HISTORY).unwrap_or_default(),
            config.history_limit,
        );
        let rps: RpsScore = load_json(store.as_ref(), keys::RPS_SCORE).unwrap_or_default();
        let suspended = load_json(store.as_ref(), keys::SHUTDOWN).unwrap_or(false);
        let state = SessionState::new(clock.epoch_millis(), rps);
        log::info!(
            "Session started for {}@{} ({} commands, {} history entries)",
            settings.username,
            settings.hostname,
            registry.len(),
            history.len()
        );
        Self {
            config,
            registry,
            cwd: vfs.root(),
            vfs,
            settings,
            history,
            state,
            lifecycle: Lifecycle {
                suspended,
                reset_requested: false,
            },
            clock,
            rng: StdRng::from_entropy(),
            store,
        }
    }

    /// Replace the random source with a seeded one, for reproducible runs.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    // -- Read access --

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    /// Canonical path of the working directory.
    pub fn current_path(&self) -> String {
        self.vfs.get_path(self.cwd)
    }

    pub fn is_suspended(&self) -> bool {
        self.lifecycle.suspended
    }

    /// `<username>@<hostname>:<canonical path>$`
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$",
            self.settings.username,
            self.settings.hostname,
            self.current_path()
        )
    }

    /// Sorted command names starting with `partial`, for tab completion.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        self.registry.completions(partial)
    }

    // -- Screen --

    /// Initial screen: the banner, or the suspended notice after a
    /// persisted shutdown.
    pub fn boot(&mut self, frontend: &mut dyn Frontend) {
        frontend.settings_changed(&self.settings);
        if self.lifecycle.suspended {
            frontend.clear();
            frontend.append(OutputEvent::Output(CommandOutput::Styled {
                style: Style::Accent,
                lines: vec![
                    "[ SYSTEM SUSPENDED ]".to_string(),
                    "Awaiting user reactivation... Type 'poweron' to start.".to_string(),
                ],
            }));
        } else {
            self.banner(frontend);
        }
    }

    /// Clear the screen and show the ASCII header plus the help hint.
    pub fn banner(&self, frontend: &mut dyn Frontend) {
        show_banner(frontend);
    }

    /// Leave the suspended state and show the banner.
    pub fn power_on(&mut self, frontend: &mut dyn Frontend) {
        log::info!("Terminal powered on");
        self.lifecycle.suspended = false;
        self.banner(frontend);
        self.persist();
    }

    // -- Input --

    /// Handle one line typed at the prompt: record it as typed, run it
    /// trimmed, persist.
    pub fn submit(&mut self, line: &str, frontend: &mut dyn Frontend) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        self.history.push(line);
        self.dispatch(trimmed, frontend);
        self.persist();
    }

    /// Resolve and run one line. Never fails: every problem ends up as
    /// output. A reset requested by the command is applied before this
    /// returns.
    pub fn dispatch(&mut self, line: &str, frontend: &mut dyn Frontend) {
        self.run_line(line, frontend);
        if self.lifecycle.reset_requested {
            self.reset(frontend);
        }
    }

    fn run_line(&mut self, line: &str, frontend: &mut dyn Frontend) {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return;
        };
        let args: Vec<&str> = tokens.collect();
        let key = name.to_lowercase();

        frontend.append(OutputEvent::Echo {
            prompt: self.prompt(),
            line: line.to_string(),
        });
        self.play_sound(frontend, Sound::Enter);

        if self.lifecycle.suspended && key != "poweron" && key != "reset" {
            frontend.append(OutputEvent::Output(CommandOutput::text(SUSPENDED)));
            self.play_sound(frontend, Sound::Error);
            return;
        }

        if BLOCKED_COMMANDS.contains(&key.as_str()) {
            log::warn!("Blocked command '{key}'");
            frontend.append(OutputEvent::Output(CommandOutput::error([PERMISSION_DENIED])));
            self.play_sound(frontend, Sound::Error);
            return;
        }

        let Some(cmd) = self.registry.get(&key) else {
            log::debug!("Unknown command '{name}'");
            frontend.append(OutputEvent::Output(CommandOutput::text(format!(
                "Command not found: {name}. Type 'help' for a list of commands."
            ))));
            self.play_sound(frontend, Sound::Error);
            return;
        };

        log::debug!("Dispatching '{key}' with {} args", args.len());
        let result = {
            let mut ctx = Context {
                vfs: &self.vfs,
                registry: &self.registry,
                config: &self.config,
                history: &mut self.history,
                state: &mut self.state,
                rng: &mut self.rng,
                clock: self.clock.as_ref(),
                settings: &mut self.settings,
                cwd: &mut self.cwd,
                lifecycle: &mut self.lifecycle,
                frontend: &mut *frontend,
            };
            cmd.execute(&args, &mut ctx)
        };

        match result {
            Ok(output) if output.is_empty() => {},
            Ok(output) => frontend.append(OutputEvent::Output(output)),
            Err(e) => {
                log::debug!("Command '{key}' failed: {e}");
                frontend.append(OutputEvent::Output(CommandOutput::text(format!(
                    "Error executing '{name}': {e}"
                ))));
                self.play_sound(frontend, Sound::Error);
            },
        }
    }

    // -- Background events --

    /// Fire every due countdown and reminder. Call this regularly.
    pub fn tick(&mut self, frontend: &mut dyn Frontend) {
        let now = self.clock.epoch_millis();
        for event in self.state.take_due(now) {
            log::debug!("Timer event: {event:?}");
            frontend.append(OutputEvent::Output(CommandOutput::text(event.message())));
            self.play_sound(frontend, Sound::Enter);
        }
    }

    /// The external stop signal (ESC). Stops a running stopwatch. Returns
    /// whether anything was stopped.
    pub fn interrupt(&mut self, frontend: &mut dyn Frontend) -> bool {
        let now = self.clock.epoch_millis();
        match self.state.stopwatch.stop(now) {
            Some(elapsed) => {
                frontend.append(OutputEvent::Output(CommandOutput::text(format!(
                    "Stopwatch stopped. Final time: {}s",
                    format_seconds(elapsed)
                ))));
                true
            },
            None => false,
        }
    }

    /// Live overlay text while the stopwatch runs.
    pub fn stopwatch_status(&self) -> Option<String> {
        self.state
            .stopwatch
            .elapsed(self.clock.epoch_millis())
            .map(|ms| format!("Stopwatch: {}s (Press ESC to stop)", format_seconds(ms)))
    }

    // -- Internals --

    fn play_sound(&self, frontend: &mut dyn Frontend, sound: Sound) {
        if self.settings.sound {
            frontend.play_sound(sound);
        }
    }

    /// Wipe the store and return every piece of state to its default.
    fn reset(&mut self, frontend: &mut dyn Frontend) {
        log::info!("Resetting terminal");
        if let Err(e) = self.store.clear() {
            log::warn!("Failed to clear store: {e}");
        }
        self.settings = Settings::from_config(&self.config);
        self.history.clear();
        self.state = SessionState::new(self.clock.epoch_millis(), RpsScore::default());
        self.cwd = self.vfs.root();
        self.lifecycle = Lifecycle::default();
        frontend.settings_changed(&self.settings);
        self.banner(frontend);
    }

    /// Write settings, history, power state and score back to the store.
    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            log::warn!("Failed to persist session: {e}");
        }
    }

    fn try_persist(&mut self) -> Result<()> {
        let store = self.store.as_mut();
        self.settings.save(store)?;
        save_json(store, keys::HISTORY, &self.history.to_vec())?;
        save_json(store, keys::SHUTDOWN, &self.lifecycle.suspended)?;
        save_json(store, keys::RPS_SCORE, &self.state.rps)
    }
}
