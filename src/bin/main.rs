use clap::{Parser, Subcommand};
use std::io::{BufReader, stdin, stdout};
use std::path::PathBuf;

use omnibridge::adapter::CompletionAdapter;
use omnibridge::config::{self, BridgeSettings, ProviderCommand};
use omnibridge::error::{BridgeError, BridgeResult};
use omnibridge::provider::ProcessProvider;
use omnibridge::server::OmniBridge;

/// A stdio bridge between an editor's omni-completion hook and an external code-intelligence engine
#[derive(Parser)]
#[command(name = "omnibridge")]
#[command(version)]
#[command(about = "Bridge an editor's omni-completion hook to a code-intelligence engine")]
struct Cli {
    /// Settings file (default: the user config location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Provider program, overriding the settings file
    #[arg(long)]
    provider: Option<String>,

    /// Extra module search path handed to the provider (repeatable)
    #[arg(long = "search-path")]
    search_paths: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings and exit
    CheckConfig,
}

fn main() {
    // Diagnostics go to stderr; stdout stays a clean protocol channel.
    env_logger::init();
    let cli = Cli::parse();

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::CheckConfig) => match toml::to_string_pretty(&settings) {
            Ok(rendered) => print!("{rendered}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            if let Err(e) = serve(settings) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Layer settings: user config file under CLI overrides.
fn resolve_settings(cli: &Cli) -> BridgeResult<BridgeSettings> {
    let file_settings = match &cli.config {
        Some(path) => Some(config::load_settings(path)?),
        None => match config::user::user_config_path() {
            Some(path) if path.exists() => Some(config::load_settings(&path)?),
            _ => None,
        },
    };

    let has_overrides = cli.provider.is_some() || !cli.search_paths.is_empty();
    let overrides = has_overrides.then(|| BridgeSettings {
        provider: cli.provider.clone().map(|program| ProviderCommand {
            program,
            args: Vec::new(),
        }),
        search_paths: (!cli.search_paths.is_empty()).then(|| cli.search_paths.clone()),
        matching: None,
    });

    Ok(config::merge_settings(file_settings, overrides).unwrap_or_default())
}

fn serve(settings: BridgeSettings) -> BridgeResult<()> {
    let command = settings
        .provider
        .ok_or_else(|| BridgeError::config("no provider command configured"))?;

    let provider = ProcessProvider::spawn(
        &command.program,
        &command.args,
        settings.search_paths.unwrap_or_default(),
    )?;

    log::info!("serving omni-completion for provider '{}'", command.program);

    let adapter = CompletionAdapter::new(provider, settings.matching.unwrap_or_default());
    let mut bridge = OmniBridge::new(adapter);
    bridge.serve(BufReader::new(stdin()), &mut stdout())?;
    Ok(())
}
