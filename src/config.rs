// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logger configuration.
//!
//! [`LoggerOptions`] is what users write: every field is optional. [`LoggerOptions::build`]
//! fills in defaults, validates, and produces an immutable [`LoggerConfig`].

use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::PerLevel;
use crate::Period;
use crate::Severity;

const DEFAULT_LOG_DIR: &str = "log";

/// User-facing options for one severity level.
///
/// With the `serde` feature, this deserializes from `{ logToFile, logToStd, rotate, period }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase", deny_unknown_fields))]
pub struct LevelOptions {
    /// Write this level to a file. Default to `false`.
    pub log_to_file: Option<bool>,
    /// Write this level to the console. Default to `true`.
    pub log_to_std: Option<bool>,
    /// Roll the file over every `period`. Requires `log_to_file`. Default to `false`.
    pub rotate: Option<bool>,
    /// Rotation period, e.g. `"12h"`. Default to `"1d"`.
    pub period: Option<String>,
}

impl LevelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_to_file(mut self, enabled: bool) -> Self {
        self.log_to_file = Some(enabled);
        self
    }

    pub fn log_to_std(mut self, enabled: bool) -> Self {
        self.log_to_std = Some(enabled);
        self
    }

    pub fn rotate(mut self, enabled: bool) -> Self {
        self.rotate = Some(enabled);
        self
    }

    pub fn period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }
}

/// User-facing logger options.
///
/// With the `serde` feature, this deserializes from
/// `{ logDir, info: {..}, warn: {..}, error: {..} }`.
///
/// # Examples
///
/// ```
/// use reqlog::LevelOptions;
/// use reqlog::LoggerOptions;
/// use reqlog::Severity;
///
/// let config = LoggerOptions::new()
///     .log_dir("/var/log/my-app")
///     .level(Severity::Error, LevelOptions::new().log_to_file(true).rotate(true).period("1w"))
///     .build()
///     .unwrap();
///
/// assert!(config.sink(Severity::Error).rotate());
/// assert!(!config.sink(Severity::Info).log_to_file());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase", deny_unknown_fields))]
pub struct LoggerOptions {
    /// Directory holding the log files. Default to `<cwd>/log`.
    pub log_dir: Option<PathBuf>,
    pub info: Option<LevelOptions>,
    pub warn: Option<LevelOptions>,
    pub error: Option<LevelOptions>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn level(mut self, level: Severity, options: LevelOptions) -> Self {
        match level {
            Severity::Info => self.info = Some(options),
            Severity::Warn => self.warn = Some(options),
            Severity::Error => self.error = Some(options),
        }
        self
    }

    fn level_options(&self, level: Severity) -> Option<&LevelOptions> {
        match level {
            Severity::Info => self.info.as_ref(),
            Severity::Warn => self.warn.as_ref(),
            Severity::Error => self.error.as_ref(),
        }
    }

    /// Fill in defaults and validate.
    ///
    /// Fails with [`Error::Configuration`] on a malformed period or on `rotate` without
    /// `log_to_file`, and with [`Error::Directory`] if the default log directory is needed but
    /// the current directory cannot be determined.
    pub fn build(&self) -> Result<LoggerConfig, Error> {
        let sinks = PerLevel::try_from_fn(|level| match self.level_options(level) {
            Some(options) => SinkConfig::from_options(level, options),
            None => Ok(SinkConfig::default()),
        })?;

        let log_dir = match &self.log_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(|err| Error::directory(DEFAULT_LOG_DIR, err))?
                .join(DEFAULT_LOG_DIR),
        };

        Ok(LoggerConfig { log_dir, sinks })
    }
}

/// Effective configuration of one severity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    log_to_file: bool,
    log_to_std: bool,
    rotate: bool,
    period: Period,
}

impl Default for SinkConfig {
    /// Console only.
    fn default() -> Self {
        Self {
            log_to_file: false,
            log_to_std: true,
            rotate: false,
            period: Period::default(),
        }
    }
}

impl SinkConfig {
    fn from_options(level: Severity, options: &LevelOptions) -> Result<Self, Error> {
        let default = SinkConfig::default();
        let period = match &options.period {
            Some(period) => period.parse::<Period>().map_err(|err| match err {
                Error::Configuration { message } => {
                    Error::configuration(format!("{level}.period: {message}"))
                }
                err => err,
            })?,
            None => default.period,
        };

        let config = SinkConfig {
            log_to_file: options.log_to_file.unwrap_or(default.log_to_file),
            log_to_std: options.log_to_std.unwrap_or(default.log_to_std),
            rotate: options.rotate.unwrap_or(default.rotate),
            period,
        };

        if config.rotate && !config.log_to_file {
            return Err(Error::configuration(format!(
                "{level}.rotate requires {level}.logToFile"
            )));
        }
        Ok(config)
    }

    pub fn log_to_file(&self) -> bool {
        self.log_to_file
    }

    pub fn log_to_std(&self) -> bool {
        self.log_to_std
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

/// Validated logger configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    log_dir: PathBuf,
    sinks: PerLevel<SinkConfig>,
}

impl LoggerConfig {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn sink(&self, level: Severity) -> &SinkConfig {
        self.sinks.get(level)
    }
}
