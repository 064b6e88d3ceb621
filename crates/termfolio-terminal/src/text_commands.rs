//! Text utilities: uppercase, lowercase, capitalize, reverse, base64, hash, emoji.

use base64ct::{Base64, Encoding};
use sha2::{Digest, Sha256};
use termfolio_types::error::Result;

use crate::context::Context;
use crate::interpreter::{Command, CommandOutput};

const EMOJI: [(&str, &str); 4] = [
    ("smile", "😊"),
    ("sad", "😢"),
    ("wink", "😉"),
    ("heart", "❤️"),
];

/// Uppercase the first character of every word. Word characters are
/// alphanumerics and `_`.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        let word_char = c.is_alphanumeric() || c == '_';
        if word_char && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = word_char;
    }
    out
}

/// Lowercase hex SHA-256 digest of `text`.
pub fn sha256_hex(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

// ---------------------------------------------------------------------------
// uppercase / lowercase / capitalize / reverse
// ---------------------------------------------------------------------------

/// A command that rewrites its joined arguments.
struct TransformCmd {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    transform: fn(&str) -> String,
}

impl Command for TransformCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.usage
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::Text(format!("Usage: {}", self.usage)));
        }
        Ok(CommandOutput::Text((self.transform)(&args.join(" "))))
    }
}

// ---------------------------------------------------------------------------
// base64
// ---------------------------------------------------------------------------

struct Base64Cmd;
impl Command for Base64Cmd {
    fn name(&self) -> &str {
        "base64"
    }
    fn description(&self) -> &str {
        "Encode or decode text using Base64."
    }
    fn usage(&self) -> &str {
        "base64 [encode|decode] [text]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let [op, rest @ ..] = args else {
            return Ok(CommandOutput::text("Usage: base64 [encode|decode] [text]"));
        };
        if rest.is_empty() {
            return Ok(CommandOutput::text("Usage: base64 [encode|decode] [text]"));
        }
        let text = rest.join(" ");
        match *op {
            "encode" => Ok(CommandOutput::Text(Base64::encode_string(text.as_bytes()))),
            "decode" => match Base64::decode_vec(&text) {
                Ok(bytes) => Ok(CommandOutput::Text(
                    String::from_utf8_lossy(&bytes).into_owned(),
                )),
                Err(_) => Ok(CommandOutput::text("Invalid Base64 string.")),
            },
            _ => Ok(CommandOutput::text(
                "Invalid operation. Use \"encode\" or \"decode\".",
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// hash
// ---------------------------------------------------------------------------

struct HashCmd;
impl Command for HashCmd {
    fn name(&self) -> &str {
        "hash"
    }
    fn description(&self) -> &str {
        "Generate a SHA-256 hash of a text."
    }
    fn usage(&self) -> &str {
        "hash [text]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        if args.is_empty() {
            return Ok(CommandOutput::text("Usage: hash [text]"));
        }
        Ok(CommandOutput::Text(format!(
            "SHA-256: {}",
            sha256_hex(&args.join(" "))
        )))
    }
}

// ---------------------------------------------------------------------------
// emoji
// ---------------------------------------------------------------------------

struct EmojiCmd;
impl Command for EmojiCmd {
    fn name(&self) -> &str {
        "emoji"
    }
    fn description(&self) -> &str {
        "Print an emoji by name."
    }
    fn usage(&self) -> &str {
        "emoji [name]"
    }
    fn category(&self) -> &str {
        "text"
    }
    fn execute(&self, args: &[&str], _ctx: &mut Context<'_>) -> Result<CommandOutput> {
        let Some(name) = args.first() else {
            let names: Vec<&str> = EMOJI.iter().map(|(n, _)| *n).collect();
            return Ok(CommandOutput::Text(format!(
                "Usage: emoji [name]. Try: {}",
                names.join(", ")
            )));
        };
        match EMOJI.iter().find(|(n, _)| n == name) {
            Some((_, emoji)) => Ok(CommandOutput::text(*emoji)),
            None => Ok(CommandOutput::Text(format!("Emoji not found: {name}"))),
        }
    }
}

/// Register text utility commands.
pub fn register_text_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(TransformCmd {
        name: "uppercase",
        description: "Convert text to uppercase.",
        usage: "uppercase [text]",
        transform: str::to_uppercase,
    }));
    reg.register(Box::new(TransformCmd {
        name: "lowercase",
        description: "Convert text to lowercase.",
        usage: "lowercase [text]",
        transform: str::to_lowercase,
    }));
    reg.register(Box::new(TransformCmd {
        name: "capitalize",
        description: "Capitalize the first letter of every word.",
        usage: "capitalize [text]",
        transform: capitalize_words,
    }));
    reg.register(Box::new(TransformCmd {
        name: "reverse",
        description: "Reverse text.",
        usage: "reverse [text]",
        transform: |text| text.chars().rev().collect(),
    }));
    reg.register(Box::new(Base64Cmd));
    reg.register(Box::new(HashCmd));
    reg.register(Box::new(EmojiCmd));
}
