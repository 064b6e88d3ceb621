//! ANSI console frontend.
//!
//! Colors follow the active theme; output is written as it arrives.

use std::io::Write;
use std::thread;
use std::time::Duration;

use termfolio_terminal::{CommandOutput, Frontend, OutputEvent, Settings, Sound, Style};
use termfolio_types::theme::Theme;

const RESET: &str = "\x1b[0m";
const ERROR: &str = "\x1b[31m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Foreground and accent SGR sequences for a theme.
fn palette(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Blood => ("\x1b[31m", "\x1b[1;91m"),
        Theme::Dark => ("\x1b[37m", "\x1b[1;97m"),
        Theme::Light => ("\x1b[30;47m", "\x1b[1;34;47m"),
        Theme::Cosmic => ("\x1b[35m", "\x1b[1;96m"),
        Theme::Matrix => ("\x1b[32m", "\x1b[1;92m"),
    }
}

/// Writes session output to a terminal using ANSI escapes.
pub struct AnsiFrontend<W: Write> {
    out: W,
    theme: Theme,
    typing_delay: Duration,
    sound: bool,
    /// Set whenever something was written since the last prompt.
    dirty: bool,
}

impl<W: Write> AnsiFrontend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: Theme::default(),
            typing_delay: Duration::ZERO,
            sound: true,
            dirty: false,
        }
    }

    /// Whether output arrived since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Show the input prompt without a trailing newline.
    pub fn prompt(&mut self, prompt: &str) {
        let (_, accent) = palette(self.theme);
        self.write(&format!("{accent}{prompt}{RESET} "));
        self.flush();
        self.dirty = false;
    }

    /// Overwrite the current line with a transient status message.
    pub fn status(&mut self, text: &str) {
        let (fg, _) = palette(self.theme);
        self.write(&format!("{CLEAR_LINE}{fg}{text}{RESET}"));
        self.flush();
    }

    /// Drop a transient status line.
    pub fn clear_status(&mut self) {
        self.write(CLEAR_LINE);
        self.flush();
    }

    /// A line from the console itself rather than from a command.
    pub fn notice(&mut self, text: &str) {
        let (fg, _) = palette(self.theme);
        self.write(&format!("{fg}{text}{RESET}\n"));
        self.flush();
    }

    /// Show completion candidates. Rings the bell when there are none.
    pub fn suggest(&mut self, names: &[String]) {
        if names.is_empty() {
            if self.sound {
                self.write("\x07");
                self.flush();
            }
        } else {
            self.notice(&names.join("  "));
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            log::warn!("Failed to write to console: {e}");
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            log::warn!("Failed to flush console: {e}");
        }
    }

    /// Write `text` one character at a time when a typing delay is set.
    fn type_out(&mut self, color: &str, text: &str) {
        self.write(color);
        if self.typing_delay.is_zero() {
            self.write(text);
        } else {
            let mut buf = [0u8; 4];
            for c in text.chars() {
                self.write(c.encode_utf8(&mut buf));
                self.flush();
                thread::sleep(self.typing_delay);
            }
        }
        self.write(RESET);
        self.write("\n");
    }

    fn render(&mut self, output: &CommandOutput) {
        let (fg, accent) = palette(self.theme);
        match output {
            CommandOutput::None => {},
            CommandOutput::Text(text) => self.type_out(fg, text),
            CommandOutput::Preformatted(text) => {
                self.write(&format!("{fg}{text}{RESET}\n"));
            },
            CommandOutput::Table { headers, rows } => {
                let widths: Vec<usize> = (0..headers.len())
                    .map(|col| {
                        rows.iter()
                            .filter_map(|r| r.get(col))
                            .chain(std::iter::once(&headers[col]))
                            .map(|cell| cell.chars().count())
                            .max()
                            .unwrap_or(0)
                    })
                    .collect();
                let line = |cells: &[String]| {
                    cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, &w)| format!("{cell:<w$}"))
                        .collect::<Vec<_>>()
                        .join("  ")
                        .trim_end()
                        .to_string()
                };
                self.write(&format!("{accent}{}{RESET}\n", line(headers.as_slice())));
                for row in rows {
                    self.write(&format!("{fg}{}{RESET}\n", line(row.as_slice())));
                }
            },
            CommandOutput::Styled { style, lines } => {
                let color = match style {
                    Style::Plain => fg,
                    Style::Error => ERROR,
                    Style::Accent => accent,
                };
                for line in lines {
                    self.write(&format!("{color}{line}{RESET}\n"));
                }
            },
        }
    }
}

impl<W: Write> Frontend for AnsiFrontend<W> {
    fn append(&mut self, event: OutputEvent) {
        match event {
            // The prompt and line are already on screen from the user's
            // own typing.
            OutputEvent::Echo { .. } => {},
            OutputEvent::Output(output) => {
                self.render(&output);
                self.dirty |= !output.is_empty();
            },
        }
        self.flush();
    }

    fn clear(&mut self) {
        self.write(CLEAR_SCREEN);
        self.flush();
    }

    fn play_sound(&mut self, sound: Sound) {
        if self.sound && sound == Sound::Error {
            self.write("\x07");
        }
    }

    fn settings_changed(&mut self, settings: &Settings) {
        self.theme = settings.theme;
        self.sound = settings.sound;
        self.typing_delay = Duration::from_millis(u64::from(settings.typing_speed_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(events: impl IntoIterator<Item = OutputEvent>) -> String {
        let mut frontend = AnsiFrontend::new(Vec::new());
        for event in events {
            frontend.append(event);
        }
        String::from_utf8(frontend.out).unwrap()
    }

    #[test]
    fn text_uses_theme_color() {
        let out = rendered([OutputEvent::Output(CommandOutput::text("hello"))]);
        assert_eq!(out, "\x1b[32mhello\x1b[0m\n");
    }

    #[test]
    fn echo_is_not_repeated() {
        let out = rendered([OutputEvent::Echo {
            prompt: "visitor@host:/$".into(),
            line: "ls".into(),
        }]);
        assert!(out.is_empty());
    }

    #[test]
    fn error_lines_are_red() {
        let out = rendered([OutputEvent::Output(CommandOutput::error(["a", "b"]))]);
        assert_eq!(out, "\x1b[31ma\x1b[0m\n\x1b[31mb\x1b[0m\n");
    }

    #[test]
    fn table_columns_are_aligned() {
        let out = rendered([OutputEvent::Output(CommandOutput::Table {
            headers: vec!["name".into(), "url".into()],
            rows: vec![vec!["gh".into(), "x".into()]],
        })]);
        assert!(out.contains("name  url"));
        assert!(out.contains("gh    x"));
    }

    #[test]
    fn settings_change_theme_and_mute_bell() {
        let mut frontend = AnsiFrontend::new(Vec::new());
        let settings = Settings {
            username: "u".into(),
            hostname: "h".into(),
            theme: Theme::Blood,
            sound: false,
            typing_speed_ms: 0,
        };
        frontend.settings_changed(&settings);
        frontend.play_sound(Sound::Error);
        frontend.append(OutputEvent::Output(CommandOutput::text("x")));
        let out = String::from_utf8(frontend.out).unwrap();
        assert_eq!(out, "\x1b[31mx\x1b[0m\n");
    }

    #[test]
    fn suggestions_are_listed_or_rung() {
        let mut frontend = AnsiFrontend::new(Vec::new());
        frontend.suggest(&["stopwatch".into(), "set".into()]);
        frontend.suggest(&[]);
        let out = String::from_utf8(frontend.out).unwrap();
        assert_eq!(out, "\x1b[32mstopwatch  set\x1b[0m\n\x07");
    }

    #[test]
    fn dirty_flag_tracks_output() {
        let mut frontend = AnsiFrontend::new(Vec::new());
        assert!(!frontend.take_dirty());
        frontend.append(OutputEvent::Output(CommandOutput::text("x")));
        assert!(frontend.take_dirty());
        assert!(!frontend.take_dirty());
        frontend.append(OutputEvent::Output(CommandOutput::None));
        frontend.append(OutputEvent::Output(CommandOutput::text("")));
        assert!(!frontend.take_dirty());
    }
}
