//! User configuration loading for omnibridge.
//!
//! This module handles loading user-wide configuration from the XDG config directory.
//! User config location: $XDG_CONFIG_HOME/omnibridge/omnibridge.toml
//! Fallback: ~/.config/omnibridge/omnibridge.toml

use std::path::PathBuf;

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/omnibridge/omnibridge.toml
/// 2. Otherwise: ~/.config/omnibridge/omnibridge.toml
///
/// Returns None if the home directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    // Check XDG_CONFIG_HOME first
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config)
                .join("omnibridge")
                .join("omnibridge.toml"),
        );
    }

    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("omnibridge")
            .join("omnibridge.toml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn user_config_path_uses_xdg_config_home_when_set() {
        // Save original value
        let original = env::var("XDG_CONFIG_HOME").ok();

        // SAFETY: Tests manipulating the environment assume no concurrent
        // reader; the original value is restored below.
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/custom/config");
        }

        let path = user_config_path();

        // SAFETY: Same as above - restoring original env state
        unsafe {
            match original {
                Some(val) => env::set_var("XDG_CONFIG_HOME", val),
                None => env::remove_var("XDG_CONFIG_HOME"),
            }
        }

        assert_eq!(
            path,
            Some(PathBuf::from("/custom/config/omnibridge/omnibridge.toml")),
            "should use XDG_CONFIG_HOME/omnibridge/omnibridge.toml"
        );
    }
}
