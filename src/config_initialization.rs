//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::{RemuxConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};

/// Where the effective configuration came from.
///
/// Configuration is resolved before logging is installed, so this is kept
/// and logged once the subscriber exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub file: Option<PathBuf>,
    pub env_overrides: Vec<&'static str>,
    pub cli_overrides: usize,
}

impl ConfigSources {
    pub fn log(&self) {
        match &self.file {
            Some(path) => info!("Using configuration from {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }
        for var in &self.env_overrides {
            debug!("Environment override from {}", var);
        }
        if self.cli_overrides > 0 {
            debug!("{} command-line override(s) applied", self.cli_overrides);
        }
    }
}

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<(RemuxConfig, ConfigSources)> {
    let file = TomlConfigAdapter::locate(cli.config.as_deref())
        .context("Failed to load configuration file")?;
    let mut config = match &file {
        Some(path) => {
            TomlConfigAdapter::load_file(path).context("Failed to load configuration file")?
        }
        None => RemuxConfig::default(),
    };

    let env_overrides = TomlConfigAdapter::apply_env(&mut config, |key| std::env::var(key).ok())
        .context("Invalid environment override")?;

    let cli_overrides =
        apply_cli_overrides(&mut config, cli).context("Invalid command-line option")?;

    config.validate().context("Invalid configuration")?;
    Ok((
        config,
        ConfigSources {
            file,
            env_overrides,
            cli_overrides,
        },
    ))
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut RemuxConfig, cli: &Cli) -> Result<usize> {
    let mut overrides = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push(("log_level", level.clone()));
    }
    if let Some(format) = &cli.log_format {
        overrides.push(("log_format", format.clone()));
    }

    if let Commands::Remux(args) = &cli.command {
        if let Some(codec) = &args.audio_codec {
            overrides.push(("audio_codec", codec.clone()));
        }
        if let Some(bitrate) = &args.audio_bitrate {
            overrides.push(("audio_bitrate", bitrate.clone()));
        }
        if args.overwrite {
            overrides.push(("overwrite", "true".to_string()));
        }
    }

    for (key, value) in &overrides {
        config.set(key, value)?;
    }
    Ok(overrides.len())
}
