//! Controller configuration loading.

use std::{fs, path::Path};

use fps_controller::{ConfigError, ControllerConfig};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not read config `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Load the controller config from a JSON file, or use the defaults when no path is
/// given. Missing fields fall back to their defaults. The result is validated.
pub fn load(path: Option<&Path>) -> Result<ControllerConfig, ClientError> {
    let config = match path {
        None => {
            log::info!("no config file given, using defaults");
            ControllerConfig::default()
        }
        Some(path) => {
            let display = path.display().to_string();
            let text = fs::read_to_string(path).map_err(|source| ClientError::Io {
                path: display.clone(),
                source,
            })?;
            let config = parse(&text).map_err(|source| ClientError::Parse {
                path: display.clone(),
                source,
            })?;
            log::info!("loaded config from {display}");
            config
        }
    };

    config.validate()?;
    Ok(config)
}

fn parse(text: &str) -> Result<ControllerConfig, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(load(None).unwrap(), ControllerConfig::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ClientError::Io { .. }));
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        let config = parse(r#"{ "weapon": { "reload_time_s": -1.0 } }"#).unwrap();
        let err = ClientError::from(config.validate().unwrap_err());
        assert!(err.to_string().contains("weapon.reload_time_s"));
    }

    #[test]
    fn malformed_json_does_not_parse() {
        assert!(parse("{ movement: ").is_err());
    }
}
