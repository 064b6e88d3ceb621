//! Text rendered as pictures: ascii (FIGlet banners), asciiqr, qr.

use figlet_rs::FIGfont;
use qrcode::QrCode;
use qrcode::render::unicode::Dense1x2;
use termfolio_types::error::Result;

use crate::context::Context;
use crate::interpreter::{Command, CommandOutput};

const FIGLET_ERROR: &str = "Invalid font or Figlet error.";

/// Render `text` in the standard FIGlet font.
pub fn figlet(text: &str) -> Option<String> {
    let font = FIGfont::standard().ok()?;
    let figure = font.convert(text)?;
    Some(figure.to_string())
}

/// Compact QR code: two modules per character cell, with a quiet zone.
pub fn qr_small(text: &str) -> Option<String> {
    let code = QrCode::new(text.as_bytes()).ok()?;
    Some(
        code.render::<Dense1x2>()
            .dark_color(Dense1x2::Light)
            .light_color(Dense1x2::Dark)
            .build(),
    )
}

/// Full-size QR code: each module is two full blocks wide.
pub fn qr_blocks(text: &str) -> Option<String> {
    let code = QrCode::new(text.as_bytes()).ok()?;
    Some(
        code.render::<char>()
            .quiet_zone(false)
            .module_dimensions(2, 1)
            .build(),
    )
}

// ---------------------------------------------------------------------------
// ascii
// ---------------------------------------------------------------------------

struct AsciiCmd;
impl Command for AsciiCmd {
    fn name(&self) -> &str {
        "ascii"
    }
    fn description(&self) -> &str {
        "Convert a word to ASCII art."
    }
    fn usage(&self) -> &str {
        "ascii [text] [font?]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(text) = args.first() else {
            return Ok(CommandOutput::text("Usage: ascii [text] [font?]"));
        };
        if let Some(font) = args.get(1)
            && !font.eq_ignore_ascii_case("standard")
        {
            return Ok(CommandOutput::text(FIGLET_ERROR));
        }
        Ok(match figlet(text) {
            Some(art) => CommandOutput::Preformatted(art),
            None => CommandOutput::text(FIGLET_ERROR),
        })
    }
}

// ---------------------------------------------------------------------------
// asciiqr / qr
// ---------------------------------------------------------------------------

struct AsciiQrCmd;
impl Command for AsciiQrCmd {
    fn name(&self) -> &str {
        "asciiqr"
    }
    fn description(&self) -> &str {
        "Generate a compact QR code from text."
    }
    fn usage(&self) -> &str {
        "asciiqr [text/url]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::text("Usage: asciiqr [text/url]"));
        }
        Ok(match qr_small(&args.join(" ")) {
            Some(code) => CommandOutput::Preformatted(code),
            None => CommandOutput::text("Error generating ASCII QR code."),
        })
    }
}

struct QrCmd;
impl Command for QrCmd {
    fn name(&self) -> &str {
        "qr"
    }
    fn description(&self) -> &str {
        "Generate a full-size QR code from text."
    }
    fn usage(&self) -> &str {
        "qr [text/url]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::text("Usage: qr [text/url]"));
        }
        Ok(match qr_blocks(&args.join(" ")) {
            Some(code) => CommandOutput::Preformatted(code),
            None => CommandOutput::text("Error generating QR code."),
        })
    }
}

/// Register ascii, asciiqr and qr.
pub fn register_art_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(AsciiCmd));
    reg.register(Box::new(AsciiQrCmd));
    reg.register(Box::new(QrCmd));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Harness;

    fn preformatted(outputs: Vec<CommandOutput>) -> String {
        match outputs.as_slice() {
            [CommandOutput::Preformatted(text)] => text.clone(),
            other => panic!("expected one preformatted block, got {other:?}"),
        }
    }

    #[test]
    fn ascii_draws_first_word_in_standard_font() {
        let mut h = Harness::new();
        let art = preformatted(h.run("ascii Hi there"));
        assert_eq!(art.lines().count(), 6);
        assert!(art.contains('|'));
        assert_eq!(Some(art), figlet("Hi"));
    }

    #[test]
    fn ascii_font_argument() {
        let mut h = Harness::new();
        assert_eq!(preformatted(h.run("ascii ok Standard")), preformatted(h.run("ascii ok")));
        assert_eq!(h.text("ascii ok gothic"), FIGLET_ERROR);
        assert_eq!(h.text("ascii"), "Usage: ascii [text] [font?]");
    }

    #[test]
    fn qr_is_square_full_blocks() {
        let mut h = Harness::new();
        let code = preformatted(h.run("qr hi"));
        let rows: Vec<&str> = code.lines().collect();
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| r.chars().count() == 42));
        assert!(code.chars().all(|c| matches!(c, '█' | ' ' | '\n')));
    }

    #[test]
    fn asciiqr_is_compact_and_joins_arguments() {
        let mut h = Harness::new();
        let code = preformatted(h.run("asciiqr https://example.com  page"));
        assert_eq!(Some(code.clone()), qr_small("https://example.com page"));
        let rows: Vec<&str> = code.lines().collect();
        let width = rows[0].chars().count();
        assert!(rows.iter().all(|r| r.chars().count() == width));
        assert!(rows.len() < width);
    }

    #[test]
    fn qr_rejects_missing_or_oversized_input() {
        let mut h = Harness::new();
        assert_eq!(h.text("qr"), "Usage: qr [text/url]");
        assert_eq!(h.text("asciiqr"), "Usage: asciiqr [text/url]");
        let huge = format!("qr {}", "x".repeat(8_000));
        assert_eq!(h.text(&huge), "Error generating QR code.");
        let huge = format!("asciiqr {}", "x".repeat(8_000));
        assert_eq!(h.text(&huge), "Error generating ASCII QR code.");
    }
}
