use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base textkit config directory (~/.config/textkit/, %APPDATA%\textkit on Windows)
pub fn textkit() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("textkit"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("textkit"))
    }
}

/// Global textkit.json config file path
pub fn textkit_json() -> Result<PathBuf> {
    Ok(textkit()?.join("textkit.json"))
}
