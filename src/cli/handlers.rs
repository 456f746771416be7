use std::path::{Path, PathBuf};

use crate::cli::commands::Cli;
use crate::io::config_io::{self, ConfigError};
use crate::io::logging;
use crate::io::store::{FileStore, KeyValueStore, MemoryStore, PersistentStore};
use crate::model::config::{AppConfig, UiConfig};
use crate::session::Session;
use crate::tui::{self, App, Screen};

/// Log file name inside the data directory
pub const LOG_FILE: &str = "tasklist.log";

/// Command line, environment, and config file merged into one place
#[derive(Debug)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub log_level: String,
    pub log_file: PathBuf,
    pub memory: bool,
    pub config: AppConfig,
}

/// Resolve settings. Flags (and their env vars) win over the config file,
/// which wins over the defaults.
pub fn resolve_settings(cli: Cli) -> Result<Settings, ConfigError> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config_io::default_data_dir()?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| data_dir.join(config_io::CONFIG_FILE));
    let config = config_io::read_config(&config_path)?;

    let log_level = cli.log_level.unwrap_or_else(|| config.log.level.clone());
    let log_file = match cli.log_file {
        Some(path) => path,
        None => match &config.log.file {
            Some(path) => relative_to(&data_dir, path),
            None => data_dir.join(LOG_FILE),
        },
    };

    Ok(Settings {
        data_dir,
        config_path,
        log_level,
        log_file,
        memory: cli.memory,
        config,
    })
}

fn relative_to(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve settings, start logging, open the store, and run the UI
pub fn launch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = resolve_settings(cli)?;
    let _guard = logging::init_logging(&settings.log_level, &settings.log_file);
    tracing::info!(
        data_dir = %settings.data_dir.display(),
        config = %settings.config_path.display(),
        memory = settings.memory,
        "starting tasklist"
    );

    let result = if settings.memory {
        run_with(MemoryStore::new(), &settings.config.ui)
    } else {
        let store = FileStore::open(&settings.data_dir)?;
        run_with(store, &settings.config.ui)
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "tasklist exited with an error");
    }
    result
}

fn run_with<S: KeyValueStore>(
    backend: S,
    ui: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(PersistentStore::new(backend), Screen::default());
    tui::run(App::new(session, ui))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_live_in_the_data_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let settings = resolve_settings(parse(&["-C", dir, "--log-level", "info"])).unwrap();
        assert_eq!(settings.data_dir, tmp.path());
        assert_eq!(settings.config_path, tmp.path().join("config.toml"));
        assert_eq!(settings.log_file, tmp.path().join(LOG_FILE));
        assert!(!settings.memory);
    }

    #[test]
    fn config_file_supplies_log_settings() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[log]\nfile = \"logs/tl.log\"\n\n[ui]\nshow_key_hints = false\n",
        )
        .unwrap();
        let dir = tmp.path().to_str().unwrap();
        let settings = resolve_settings(parse(&["-C", dir])).unwrap();
        assert_eq!(settings.log_file, tmp.path().join("logs").join("tl.log"));
        assert!(!settings.config.ui.show_key_hints);
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[log]\nlevel = \"warn\"\nfile = \"a.log\"\n",
        )
        .unwrap();
        let dir = tmp.path().to_str().unwrap();
        let other = tmp.path().join("b.log");
        let settings = resolve_settings(parse(&[
            "-C",
            dir,
            "--log-level",
            "trace",
            "--log-file",
            other.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_file, other);
    }

    #[test]
    fn explicit_config_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("elsewhere.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();
        let dir = tmp.path().to_str().unwrap();
        let settings = resolve_settings(parse(&["-C", dir, "--config", path.to_str().unwrap()]))
            .unwrap();
        assert_eq!(settings.config_path, path);
    }

    #[test]
    fn malformed_config_fails_startup() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[ui\n").unwrap();
        let dir = tmp.path().to_str().unwrap();
        let err = resolve_settings(parse(&["-C", dir])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
