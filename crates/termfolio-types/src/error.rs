//! Error types for termfolio.

use std::io;

/// Errors produced by the termfolio crates.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("VFS error: {0}")]
    Vfs(String),

    /// A command handler failed. Displayed verbatim so the dispatcher can
    /// wrap it as `Error executing '<cmd>': <message>`.
    #[error("{0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vfs_error_display() {
        let e = FolioError::Vfs("duplicate entry".into());
        assert_eq!(format!("{e}"), "VFS error: duplicate entry");
    }

    #[test]
    fn command_error_is_verbatim() {
        let e = FolioError::Command("upstream exploded".into());
        assert_eq!(format!("{e}"), "upstream exploded");
    }

    #[test]
    fn config_error_display() {
        let e = FolioError::Config("history_limit must be positive".into());
        assert_eq!(
            format!("{e}"),
            "config error: history_limit must be positive"
        );
    }

    #[test]
    fn storage_error_display() {
        let e = FolioError::Storage("read-only".into());
        assert_eq!(format!("{e}"), "storage error: read-only");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: FolioError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: FolioError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: FolioError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<i32> = Err(FolioError::Vfs("oops".into()));
        assert!(r.is_err());
    }
}
