// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Environment-sourced server configuration.
//!
//! The configuration is built once in `main` and passed explicitly to
//! everything that needs it; there is no process-wide mutable settings
//! object. `.env` files are honored via dotenvy before this module reads
//! the environment.

use std::path::{Path, PathBuf};

/// Runtime mode. Development runs embedded migrations at startup;
/// production assumes the schema is already in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    /// Whether startup should run pending migrations.
    #[must_use]
    pub const fn runs_migrations(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Which database backend to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// File-based `SQLite` database.
    Sqlite {
        /// Path to the database file.
        path: String,
    },
    /// `MySQL`/`MariaDB` server, assembled from the DATABASE_* variables.
    Mysql {
        /// Full connection URL.
        url: String,
    },
}

/// The server's immutable configuration value.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Database backend selection.
    pub database: DatabaseConfig,
    /// Directory PDFs are stored into. Must exist and be a directory.
    pub upload_dir: PathBuf,
    /// Directory the scanner drops source files into. Must exist and be
    /// a directory.
    pub source_dir: PathBuf,
    /// Runtime mode.
    pub mode: Mode,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    MissingVariable(String),
    /// An environment variable has an unusable value.
    InvalidVariable {
        /// The variable name.
        name: String,
        /// What was wrong with it.
        message: String,
    },
    /// A configured path does not exist.
    PathMissing(PathBuf),
    /// A configured path exists but is not a directory.
    NotADirectory(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVariable(name) => {
                write!(f, "Missing environment variable: {name}")
            }
            Self::InvalidVariable { name, message } => {
                write!(f, "Invalid value for {name}: {message}")
            }
            Self::PathMissing(path) => write!(f, "Path {} does not exist", path.display()),
            Self::NotADirectory(path) => {
                write!(f, "Path {} is not a directory", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Loads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error for missing required variables, unparsable
    /// values, or PDF paths that are absent or not directories.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host: String = var_or("HOST", "0.0.0.0");
        let port: u16 = var_or("PORT", "9000")
            .parse()
            .map_err(|e| ConfigError::InvalidVariable {
                name: String::from("PORT"),
                message: format!("{e}"),
            })?;

        let backend: String = var_or("DATABASE_BACKEND", "sqlite").to_lowercase();
        let database: DatabaseConfig = match backend.as_str() {
            "sqlite" => DatabaseConfig::Sqlite {
                path: var_or("DATABASE_PATH", "booktrack.db"),
            },
            "mysql" | "mariadb" => {
                let server: String = require_var("DATABASE_SERVER")?;
                let name: String = require_var("DATABASE_NAME")?;
                let user: String = require_var("DATABASE_USER")?;
                let password: String = require_var("DATABASE_PASSWORD")?;
                DatabaseConfig::Mysql {
                    url: format!("mysql://{user}:{password}@{server}/{name}"),
                }
            }
            other => {
                return Err(ConfigError::InvalidVariable {
                    name: String::from("DATABASE_BACKEND"),
                    message: format!("Unknown backend '{other}'; expected sqlite or mysql"),
                });
            }
        };

        let upload_dir: PathBuf = validated_dir(&require_var("PDF_UPLOAD_PATH")?)?;
        let source_dir: PathBuf = validated_dir(&require_var("PDF_SOURCE_PATH")?)?;

        let mode: Mode = match var_or("MODE", "development").to_uppercase().as_str() {
            "PRODUCTION" => Mode::Production,
            _ => Mode::Development,
        };

        Ok(Self {
            host,
            port,
            database,
            upload_dir,
            source_dir,
            mode,
        })
    }
}

/// Reads a variable with a default.
fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads a required variable.
fn require_var(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

/// Checks that a configured path exists and is a directory, and
/// canonicalizes it.
fn validated_dir(raw: &str) -> Result<PathBuf, ConfigError> {
    let path: &Path = Path::new(raw);
    if !path.exists() {
        return Err(ConfigError::PathMissing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory(path.to_path_buf()));
    }
    path.canonicalize()
        .map_err(|e| ConfigError::InvalidVariable {
            name: String::from("PDF path"),
            message: format!("{e}"),
        })
}
