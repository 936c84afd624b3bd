pub mod settings;
pub mod user;

pub use settings::{BridgeSettings, ProviderCommand};

use std::path::Path;

use crate::error::{BridgeError, BridgeResult};

/// Parse a TOML settings document.
pub fn parse_settings(text: &str) -> BridgeResult<BridgeSettings> {
    toml::from_str(text).map_err(|e| BridgeError::config(format!("bad settings file: {e}")))
}

/// Load settings from a file, resolving relative search paths against the
/// file's directory (so an engine checkout sibling to the config works
/// without absolute paths).
pub fn load_settings(path: &Path) -> BridgeResult<BridgeSettings> {
    let text = std::fs::read_to_string(path)?;
    let mut settings = parse_settings(&text)?;
    if let Some(base) = path.parent() {
        resolve_search_paths(&mut settings, base);
    }
    Ok(settings)
}

fn resolve_search_paths(settings: &mut BridgeSettings, base: &Path) {
    if let Some(paths) = settings.search_paths.as_mut() {
        for entry in paths {
            if Path::new(entry.as_str()).is_relative() {
                *entry = base.join(entry.as_str()).to_string_lossy().into_owned();
            }
        }
    }
}

/// Merge two BridgeSettings, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<BridgeSettings>,
    primary: Option<BridgeSettings>,
) -> Option<BridgeSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(BridgeSettings {
            provider: primary.provider.or(fallback.provider),
            search_paths: primary.search_paths.or(fallback.search_paths),
            matching: primary.matching.or(fallback.matching),
        }),
    }
}
