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

//! Reqlog logs completed HTTP requests, one line per request, with a separate destination per
//! severity.
//!
//! # Overview
//!
//! Every request is logged at a severity derived from its status code: `5xx` is error, `4xx` is
//! warn, anything else is info. Each severity writes to the console, to a file, to both, or
//! nowhere. Console output is colorized; file output never is. A file can be rotated on a fixed
//! period (`"1000ms"`, `"12h"`, `"1d"`, `"2w"`, `"1m"`, `"1y"`), in which case files are named
//! `<level>.<epoch millis>.log` and a restarted process resumes the most recent one.
//!
//! The crate reports its own diagnostics (rotations, recovered file names) through the [`log`]
//! facade and never installs a global logger.
//!
//! # Examples
//!
//! ```no_run
//! use reqlog::LevelOptions;
//! use reqlog::LoggerOptions;
//! use reqlog::RequestLogger;
//! use reqlog::Severity;
//!
//! let options = LoggerOptions::new()
//!     .log_dir("/var/log/my-app")
//!     .level(Severity::Warn, LevelOptions::new().log_to_file(true))
//!     .level(
//!         Severity::Error,
//!         LevelOptions::new().log_to_file(true).rotate(true).period("1w"),
//!     );
//! let logger = RequestLogger::from_options(&options).unwrap();
//!
//! logger.log_request("GET", "/users/7", 12, 200).unwrap();
//!
//! let result = logger.observe("GET", "/users/8", || {
//!     Err::<u16, _>(std::io::Error::other("database unavailable"))
//! });
//! assert!(result.is_err());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;

mod color;
mod config;
mod dispatch;
mod error;
mod layout;
mod level;
mod logger;

pub use self::append::Append;
pub use self::append::rolling_file::Period;
pub use self::append::rolling_file::PeriodUnit;
pub use self::color::LevelColor;
pub use self::config::LevelOptions;
pub use self::config::LoggerConfig;
pub use self::config::LoggerOptions;
pub use self::config::SinkConfig;
pub use self::dispatch::Dispatch;
pub use self::error::Error;
pub use self::layout::RequestLayout;
pub use self::level::PerLevel;
pub use self::level::Severity;
pub use self::logger::HasStatus;
pub use self::logger::RequestError;
pub use self::logger::RequestLogger;
