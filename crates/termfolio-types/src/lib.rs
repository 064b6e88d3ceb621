//! Foundation types for termfolio.
//!
//! Platform-agnostic types shared by every termfolio crate: the error enum,
//! the TOML-backed terminal configuration, and the theme set.

pub mod config;
pub mod error;
pub mod theme;
