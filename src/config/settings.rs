use serde::Deserialize;

use crate::host::entry::MatchFlags;

/// Engine command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct ProviderCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Bridge settings as they appear in the TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, serde::Serialize)]
pub struct BridgeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderCommand>,
    /// Extra module search paths handed to the engine at initialization.
    /// Relative entries resolve against the config file's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching: Option<MatchFlags>,
}
