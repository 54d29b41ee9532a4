use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use darsak_core::devices::{DEFAULT_MAX_DEVICES, DeviceLimitPolicy, Locale};
use thiserror::Error;

use super::models::{
    AuthConfig, Config, ConfigMetadata, ConfigWarnings, CorsConfig,
    DEFAULT_JWT_AUDIENCE, DatabaseConfig, ServerConfig,
};
use super::sources::{EnvConfig, FileConfig};

const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["darsak.toml", "config/darsak.toml"];
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_LEEWAY_SECS: u64 = 30;
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {path} does not exist")]
    MissingConfig { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("{field} is required (set {env} or [{section}] in darsak.toml)")]
    Missing {
        field: &'static str,
        env: &'static str,
        section: &'static str,
    },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then the TOML file, then overlay process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                dotenvy::Error::Io(_) => Ok(false),
                _ => Err(err),
            })?,
        };

        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment snapshot.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file, config_path) = self.load_file_config(&env)?;
        let mut load = compose_config(file, env)?;
        load.config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };
        Ok(load)
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file = read_file_config(&path)?;
        Ok((Some(file), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_env<T: FromStr>(
    field: &'static str,
    raw: Option<&String>,
) -> Result<Option<T>, ConfigLoadError>
where
    T::Err: std::fmt::Display,
{
    raw.map(|value| {
        value.trim().parse::<T>().map_err(|err| ConfigLoadError::Invalid {
            field,
            message: format!("{value:?}: {err}"),
        })
    })
    .transpose()
}

/// Merge file and environment values; environment wins.
pub fn compose_config(
    file: Option<FileConfig>,
    env: EnvConfig,
) -> Result<ConfigLoad, ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file.is_none() {
        warnings.push_with_hint(
            "No darsak.toml detected; using environment variables only",
            "Set DARSAK_CONFIG or place darsak.toml in the working directory",
        );
    }
    let file = file.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .clone()
            .or(file.server.host)
            .unwrap_or_else(|| "0.0.0.0".to_string()),
        port: parse_env("DARSAK_PORT", env.server_port.as_ref())?
            .or(file.server.port)
            .unwrap_or(3000),
    };

    let database = DatabaseConfig {
        url: env
            .database_url
            .clone()
            .or(file.database.url)
            .ok_or(ConfigLoadError::Missing {
                field: "database url",
                env: "DATABASE_URL",
                section: "database",
            })?,
        max_connections: parse_env(
            "DARSAK_DB_MAX_CONNECTIONS",
            env.database_max_connections.as_ref(),
        )?
        .or(file.database.max_connections)
        .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let jwt_secret = env
        .jwt_secret
        .clone()
        .or(file.auth.jwt_secret)
        .ok_or(ConfigLoadError::Missing {
            field: "jwt secret",
            env: "DARSAK_JWT_SECRET",
            section: "auth",
        })?;
    if jwt_secret.len() < MIN_JWT_SECRET_LEN {
        warnings.push_with_hint(
            format!("JWT secret is shorter than {MIN_JWT_SECRET_LEN} bytes"),
            "Use the project's JWT secret from the identity provider dashboard",
        );
    }
    let audience = match env.jwt_audience.clone().or(file.auth.audience) {
        Some(aud) if aud.eq_ignore_ascii_case("none") => None,
        Some(aud) => Some(aud),
        None => Some(DEFAULT_JWT_AUDIENCE.to_string()),
    };
    let auth = AuthConfig {
        jwt_secret,
        audience,
        leeway_secs: file.auth.leeway_secs.unwrap_or(DEFAULT_LEEWAY_SECS),
    };

    let max_devices =
        parse_env::<usize>("DARSAK_MAX_DEVICES", env.max_devices.as_ref())?
            .or(file.devices.max_devices)
            .unwrap_or(DEFAULT_MAX_DEVICES);
    if max_devices == 0 {
        return Err(ConfigLoadError::Invalid {
            field: "max_devices",
            message: "must be at least 1".to_string(),
        });
    }
    let locale = match env.locale.clone().or(file.devices.locale) {
        Some(raw) => raw
            .parse::<Locale>()
            .map_err(|message| ConfigLoadError::Invalid {
                field: "locale",
                message,
            })?,
        None => Locale::default(),
    };
    let devices = DeviceLimitPolicy {
        max_devices,
        locale,
    };

    let cors = CorsConfig {
        allowed_origins: match env.cors_origins.as_ref() {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => file.cors.allowed_origins.unwrap_or_default(),
        },
    };
    if cors.allowed_origins.is_empty() {
        warnings.push(
            "CORS allows any origin; set DARSAK_CORS_ORIGINS in production",
        );
    }

    Ok(ConfigLoad {
        config: Config {
            server,
            database,
            auth,
            devices,
            cors,
            metadata: ConfigMetadata::default(),
        },
        warnings,
    })
}
