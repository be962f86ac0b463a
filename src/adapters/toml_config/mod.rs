// TOML config adapter - Configuration loading from TOML files and environment

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::AudioSettings;
use crate::engine::progress::MarkerPattern;
use crate::error::{RemuxError, RemuxResult};
use crate::utils::logging::{LogFormat, LogLevel, LoggingConfig};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "AC3REMUX_CONFIG";

/// File looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "ac3remux.toml";

/// Environment overrides, applied after the config file
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("AC3REMUX_FFMPEG", "ffmpeg_path"),
    ("AC3REMUX_FFPROBE", "ffprobe_path"),
    ("AC3REMUX_AUDIO_CODEC", "audio_codec"),
    ("AC3REMUX_AUDIO_BITRATE", "audio_bitrate"),
    ("AC3REMUX_OVERWRITE", "overwrite"),
    ("AC3REMUX_LOG_LEVEL", "log_level"),
    ("AC3REMUX_LOG_FORMAT", "log_format"),
    ("AC3REMUX_PROGRESS_PATTERN", "progress_pattern"),
];

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemuxConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub overwrite: bool,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    /// Custom progress marker regex; the clock must be capture group 1 or `clock`
    pub progress_pattern: Option<String>,
}

impl Default for RemuxConfig {
    fn default() -> Self {
        let audio = AudioSettings::default();
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            audio_codec: audio.codec,
            audio_bitrate: audio.bitrate,
            overwrite: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            progress_pattern: None,
        }
    }
}

impl RemuxConfig {
    /// Audio settings described by this config
    pub fn audio_settings(&self) -> RemuxResult<AudioSettings> {
        AudioSettings::new(&self.audio_codec, &self.audio_bitrate).map_err(|e| {
            RemuxError::ConfigError {
                message: e.to_string(),
            }
        })
    }

    /// Logging settings described by this config
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level,
            format: self.log_format,
            ..LoggingConfig::default()
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> RemuxResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(config_error("ffmpeg_path cannot be empty"));
        }
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(config_error("ffprobe_path cannot be empty"));
        }
        self.audio_settings()?;
        if let Some(pattern) = &self.progress_pattern {
            MarkerPattern::new(pattern)?;
        }
        Ok(())
    }

    /// Apply one string-valued setting by key
    pub fn set(&mut self, key: &str, value: &str) -> RemuxResult<()> {
        match key {
            "ffmpeg_path" => self.ffmpeg_path = PathBuf::from(value),
            "ffprobe_path" => self.ffprobe_path = PathBuf::from(value),
            "audio_codec" => self.audio_codec = value.to_string(),
            "audio_bitrate" => self.audio_bitrate = value.to_string(),
            "overwrite" => {
                self.overwrite = parse_bool(value).ok_or_else(|| {
                    config_error(&format!("Invalid boolean value for overwrite: {}", value))
                })?
            }
            "log_level" => self.log_level = value.parse()?,
            "log_format" => self.log_format = value.parse()?,
            "progress_pattern" => {
                self.progress_pattern = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            other => return Err(config_error(&format!("Unknown configuration key: {}", other))),
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    remux: RemuxConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a config document. Settings live under a `[remux]` table.
    pub fn parse(content: &str, source: &Path) -> RemuxResult<RemuxConfig> {
        let file: ConfigFile = toml::from_str(content).map_err(|e| {
            config_error(&format!(
                "Failed to parse TOML config {}: {}",
                source.display(),
                e
            ))
        })?;
        Ok(file.remux)
    }

    /// Read and parse a config file
    pub fn load_file(path: &Path) -> RemuxResult<RemuxConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error(&format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content, path)
    }

    /// Find the config file to use, if any.
    ///
    /// An explicit path (argument or `AC3REMUX_CONFIG`) must exist.
    pub fn locate(explicit: Option<&Path>) -> RemuxResult<Option<PathBuf>> {
        let explicit = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var_os(CONFIG_ENV_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(config_error(&format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        Ok(Self::default_candidates()
            .into_iter()
            .find(|candidate| candidate.is_file()))
    }

    /// Apply overrides from environment-style lookups.
    ///
    /// Returns the variables that were applied.
    pub fn apply_env<F>(config: &mut RemuxConfig, lookup: F) -> RemuxResult<Vec<&'static str>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        for &(var, key) in ENV_MAPPINGS {
            if let Some(value) = lookup(var) {
                config.set(key, value.trim())?;
                applied.push(var);
            }
        }
        Ok(applied)
    }

    /// Default config file locations, most specific first
    pub fn default_candidates() -> Vec<PathBuf> {
        let mut out = vec![PathBuf::from(LOCAL_CONFIG_FILE)];

        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            out.push(PathBuf::from(xdg).join("ac3remux").join("config.toml"));
        }
        if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
            out.push(
                PathBuf::from(home)
                    .join(".config")
                    .join("ac3remux")
                    .join("config.toml"),
            );
        }
        if let Some(appdata) = std::env::var_os("APPDATA").filter(|v| !v.is_empty()) {
            out.push(PathBuf::from(appdata).join("ac3remux").join("config.toml"));
        }

        out
    }
}

fn config_error(message: &str) -> RemuxError {
    RemuxError::ConfigError {
        message: message.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
