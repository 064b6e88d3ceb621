//! Shared fixture for command tests: a seeded session on a manual clock.

use termfolio_platform::{KeyValueStore, ManualClock, MemoryStore};
use termfolio_types::config::TerminalConfig;
use termfolio_vfs::portfolio_tree;

use crate::context::Transcript;
use crate::interpreter::{CommandOutput, CommandRegistry};
use crate::session::Session;
use crate::settings::keys;

/// 2025-01-15 12:00:00 UTC.
pub(crate) const EPOCH: u64 = 1_736_942_400_000;

const SEED: u64 = 7;

const ALL_KEYS: [&str; 8] = [
    keys::USERNAME,
    keys::HOSTNAME,
    keys::THEME,
    keys::SOUND,
    keys::SPEED,
    keys::HISTORY,
    keys::SHUTDOWN,
    keys::RPS_SCORE,
];

pub(crate) struct Harness {
    pub session: Session,
    pub out: Transcript,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        let clock = ManualClock::new(EPOCH);
        let mut session = Session::new(
            TerminalConfig::default(),
            Box::new(store),
            Box::new(clock.clone()),
        )
        .unwrap();
        session.seed_rng(SEED);
        Self {
            session,
            out: Transcript::new(),
            clock,
        }
    }

    /// Submit one line on a fresh transcript and return the outputs it
    /// produced (echo excluded).
    pub fn run(&mut self, line: &str) -> Vec<CommandOutput> {
        self.out.reset();
        self.session.submit(line, &mut self.out);
        self.out.outputs().cloned().collect()
    }

    /// Like [`run`](Self::run), flattened to text.
    pub fn text(&mut self, line: &str) -> String {
        self.run(line)
            .iter()
            .map(CommandOutput::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Swap in a session that only knows the given commands.
    pub fn replace_registry(&mut self, registry: CommandRegistry) {
        let config = TerminalConfig::default();
        let vfs = portfolio_tree(&config.home_user).unwrap();
        self.session = Session::from_parts(
            config,
            registry,
            vfs,
            Box::new(MemoryStore::new()),
            Box::new(self.clock.clone()),
        );
        self.session.seed_rng(SEED);
    }

    /// A second session reading whatever the first one persisted.
    pub fn restart(&self) -> Session {
        let mut store = MemoryStore::new();
        for key in ALL_KEYS {
            if let Some(value) = self.session.store().get(key) {
                store.set(key, value).unwrap();
            }
        }
        Session::new(
            TerminalConfig::default(),
            Box::new(store),
            Box::new(self.clock.clone()),
        )
        .unwrap()
    }
}
