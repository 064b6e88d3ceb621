//! Terminal color themes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named terminal theme. The rendering of each theme belongs to the
/// frontend; this crate only knows the names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Blood,
    Dark,
    Light,
    Cosmic,
    #[default]
    Matrix,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 5] = [
        Theme::Blood,
        Theme::Dark,
        Theme::Light,
        Theme::Cosmic,
        Theme::Matrix,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blood => "blood",
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Cosmic => "cosmic",
            Self::Matrix => "matrix",
        }
    }

    /// Comma-separated list of theme names, for usage messages.
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
