use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid {source_name} value: {raw}")]
    InvalidNumber { source_name: String, raw: String },
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub fallback_dir: PathBuf,
    pub public_dir: PathBuf,
    pub ai_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            fallback_dir: PathBuf::from("fallback_questions"),
            public_dir: PathBuf::from("public"),
            ai_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Resolve settings from the process environment and command line.
    ///
    /// Returns `Ok(None)` when `--help` was requested.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values or bad numbers.
    pub fn load() -> Result<Option<Self>, ArgsError> {
        Self::from_sources(|key| std::env::var(key).ok(), std::env::args().skip(1))
    }

    /// Resolve settings from an environment lookup, then apply CLI flags on top.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values or bad numbers.
    pub fn from_sources(
        env: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut config = Self::default();

        if let Some(raw) = env("PORT") {
            config.port = parse_number(raw, "PORT")?;
        }
        if let Some(dir) = env("QUIZ_FALLBACK_DIR") {
            config.fallback_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env("QUIZ_PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(raw) = env("QUIZ_AI_TIMEOUT_SECS") {
            config.ai_timeout = Duration::from_secs(parse_number(raw, "QUIZ_AI_TIMEOUT_SECS")?);
        }

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--port" => {
                    config.port = parse_number(require_value(&mut args, "--port")?, "--port")?;
                }
                "--fallback-dir" => {
                    config.fallback_dir = require_value(&mut args, "--fallback-dir")?.into();
                }
                "--public-dir" => {
                    config.public_dir = require_value(&mut args, "--public-dir")?.into();
                }
                "--ai-timeout-secs" => {
                    let raw = require_value(&mut args, "--ai-timeout-secs")?;
                    config.ai_timeout =
                        Duration::from_secs(parse_number(raw, "--ai-timeout-secs")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(config))
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, source_name: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        source_name: source_name.to_string(),
        raw,
    })
}
