//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "featherlite";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_STYLESHEET: &str = "static/css/style.css";

/// Command-line arguments for the featherlite binary.
#[derive(Debug, Parser)]
#[command(name = "featherlite", version, about = "Featherlite page server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "FEATHERLITE_CONFIG_FILE",
        value_name = "PATH"
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Compile every template in the templates directory and report failures.
    Check(CheckArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the templates directory.
    #[arg(long = "templates-directory", value_name = "PATH")]
    pub templates_directory: Option<PathBuf>,

    /// Override the stylesheet path cached at startup.
    #[arg(long = "assets-stylesheet", value_name = "PATH")]
    pub assets_stylesheet: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CheckArgs {
    /// Override the templates directory.
    #[arg(long = "templates-directory", value_name = "PATH")]
    pub templates_directory: Option<PathBuf>,
}

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub templates: TemplateSettings,
    pub assets: AssetSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct TemplateSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub stylesheet: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FEATHERLITE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Check(args)) => raw.apply_check_overrides(args),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    templates: RawTemplateSettings,
    assets: RawAssetSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(directory) = overrides.templates_directory.as_ref() {
            self.templates.directory = Some(directory.clone());
        }
        if let Some(path) = overrides.assets_stylesheet.as_ref() {
            self.assets.stylesheet = Some(path.clone());
        }
    }

    fn apply_check_overrides(&mut self, args: &CheckArgs) {
        if let Some(directory) = args.templates_directory.as_ref() {
            self.templates.directory = Some(directory.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            templates,
            assets,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            templates: build_template_settings(templates)?,
            assets: build_asset_settings(assets)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    Ok(ServerSettings { addr })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_template_settings(templates: RawTemplateSettings) -> Result<TemplateSettings, LoadError> {
    let directory = templates
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "templates.directory",
            "path must not be empty",
        ));
    }

    Ok(TemplateSettings { directory })
}

fn build_asset_settings(assets: RawAssetSettings) -> Result<AssetSettings, LoadError> {
    let stylesheet = assets
        .stylesheet
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STYLESHEET));
    if stylesheet.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "assets.stylesheet",
            "path must not be empty",
        ));
    }

    Ok(AssetSettings { stylesheet })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTemplateSettings {
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    stylesheet: Option<PathBuf>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_without_any_input() {
        let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
        assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
        assert_eq!(settings.templates.directory, PathBuf::from("templates"));
        assert_eq!(
            settings.assets.stylesheet,
            PathBuf::from("static/css/style.css")
        );
    }

    #[test]
    fn cli_overrides_take_highest_precedence() {
        let mut raw = RawSettings::default();
        raw.server.port = Some(4000);
        raw.logging.level = Some("info".to_string());

        let overrides = ServeOverrides {
            server_port: Some(4321),
            log_level: Some("debug".to_string()),
            templates_directory: Some(PathBuf::from("/srv/pages")),
            ..Default::default()
        };

        raw.apply_serve_overrides(&overrides);
        let settings = Settings::from_raw(raw).expect("valid settings");

        assert_eq!(settings.server.addr.port(), 4321);
        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
        assert_eq!(settings.templates.directory, PathBuf::from("/srv/pages"));
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut raw = RawSettings::default();
        raw.server.port = Some(0);
        assert!(Settings::from_raw(raw).is_err());
    }

    #[test]
    fn cli_json_logging_enforces_format() {
        let mut raw = RawSettings::default();
        let overrides = ServeOverrides {
            log_json: Some(true),
            ..Default::default()
        };

        raw.apply_serve_overrides(&overrides);
        let settings = Settings::from_raw(raw).expect("valid settings");
        assert!(matches!(settings.logging.format, LogFormat::Json));
    }

    #[test]
    fn check_overrides_only_touch_the_templates_directory() {
        let mut raw = RawSettings::default();
        raw.apply_check_overrides(&CheckArgs {
            templates_directory: Some(PathBuf::from("alt")),
        });
        let settings = Settings::from_raw(raw).expect("valid settings");
        assert_eq!(settings.templates.directory, PathBuf::from("alt"));
        assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    }
}
