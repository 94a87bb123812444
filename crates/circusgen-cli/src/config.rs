use std::path::{Path, PathBuf};

use circusgen_generate::RunConfig;
use clap::Args;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Run settings accepted on the command line. Anything left unset falls back
/// to the config file, then to the built-in defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Number of cities to generate.
    #[arg(short = 'c', long)]
    pub cities: Option<usize>,
    /// Number of shows to generate.
    #[arg(short = 's', long)]
    pub shows: Option<usize>,
    /// Number of tickets to generate.
    #[arg(short = 't', long)]
    pub tickets: Option<usize>,
    /// Number of viewers to generate (0 disables the viewer table).
    #[arg(short = 'v', long)]
    pub viewers: Option<usize>,
    /// Worker threads for ticket generation.
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
    /// Output directory for the CSV tables.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Also generate a smaller, later second batch (`_t1`/`_t2` files).
    /// `--second-batch=false` turns it off when the config file enables it.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub second_batch: Option<bool>,
}

pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Defaults, then the optional config file, then command-line overrides.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<RunConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    if let Some(cities) = overrides.cities {
        config.cities = cities;
    }
    if let Some(shows) = overrides.shows {
        config.shows = shows;
    }
    if let Some(tickets) = overrides.tickets {
        config.tickets = tickets;
    }
    if let Some(viewers) = overrides.viewers {
        config.viewers = viewers;
    }
    if let Some(threads) = overrides.threads {
        config.threads = threads;
    }
    if let Some(out_dir) = &overrides.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(second_batch) = overrides.second_batch {
        config.second_batch = second_batch;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(content: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("circusgen_config_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).expect("write config");
        path
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let config = resolve_config(None, &Overrides::default()).expect("config");
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.out_dir, PathBuf::from("output"));
        assert_eq!(config.tickets, 1000);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn flags_override_file_values() {
        let path = write_temp("cities = 10\nshows = 20\nsecond_batch = true\n");
        let overrides = Overrides {
            shows: Some(7),
            ..Overrides::default()
        };
        let config = resolve_config(Some(&path), &overrides).expect("config");
        assert_eq!(config.cities, 10);
        assert_eq!(config.shows, 7);
        assert_eq!(config.tickets, 1000);
        assert!(config.second_batch);
    }

    #[test]
    fn second_batch_flag_can_disable_the_file_setting() {
        let path = write_temp("second_batch = true\n");
        let overrides = Overrides {
            second_batch: Some(false),
            ..Overrides::default()
        };
        let config = resolve_config(Some(&path), &overrides).expect("config");
        assert!(!config.second_batch);
    }

    #[test]
    fn second_batch_flag_parses_bare_and_explicit_forms() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            overrides: Overrides,
        }

        let parse = |args: &[&str]| {
            Harness::try_parse_from(std::iter::once("circusgen").chain(args.iter().copied()))
                .expect("parse")
                .overrides
                .second_batch
        };
        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["--second-batch"]), Some(true));
        assert_eq!(parse(&["--second-batch=false"]), Some(false));
        assert_eq!(parse(&["--second-batch=true"]), Some(true));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = write_temp("citizens = 10\n");
        let result = resolve_config(Some(&path), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = PathBuf::from("/nonexistent/circusgen.toml");
        let result = resolve_config(Some(&path), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
