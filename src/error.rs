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

use std::io;
use std::path::Path;
use std::path::PathBuf;

/// The error type of reqlog.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The logger options are invalid, e.g. a malformed rotation period.
    #[error("invalid logger configuration: {message}")]
    Configuration { message: String },

    /// The log directory or a sink's initial file could not be prepared.
    #[error("failed to prepare log directory: {}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A log line could not be written to its destination.
    #[error("failed to write log to {}", display_target(.path.as_deref()))]
    Write {
        /// `None` for console destinations.
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn directory(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Directory {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: Option<&Path>, source: io::Error) -> Self {
        Error::Write {
            path: path.map(Path::to_path_buf),
            source,
        }
    }
}

fn display_target(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "console".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::configuration("bad period");
        assert_eq!(err.to_string(), "invalid logger configuration: bad period");

        let err = Error::write(None, io::Error::other("closed"));
        assert_eq!(err.to_string(), "failed to write log to console");

        let err = Error::write(Some(Path::new("log/info.log")), io::Error::other("full"));
        assert_eq!(err.to_string(), "failed to write log to log/info.log");
        assert!(std::error::Error::source(&err).is_some());
    }
}
