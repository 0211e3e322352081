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

use std::fmt;
use std::ops::Index;

/// The severity of a logged request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Successful and redirected requests.
    Info,
    /// Client errors.
    Warn,
    /// Server errors and failed handlers.
    Error,
}

impl Severity {
    /// All severities, in the order they appear in the configuration.
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Warn, Severity::Error];

    /// Derive the severity from an HTTP status code.
    ///
    /// `>= 500` is [`Severity::Error`], `>= 400` is [`Severity::Warn`], anything else is
    /// [`Severity::Info`].
    pub const fn from_status(status: u16) -> Severity {
        if status >= 500 {
            Severity::Error
        } else if status >= 400 {
            Severity::Warn
        } else {
            Severity::Info
        }
    }

    /// The lowercase name, used for configuration keys and file names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// The uppercase name, used in formatted messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value for each [`Severity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerLevel<T> {
    pub info: T,
    pub warn: T,
    pub error: T,
}

impl<T> PerLevel<T> {
    /// Build a value for each severity.
    pub fn from_fn(mut f: impl FnMut(Severity) -> T) -> Self {
        PerLevel {
            info: f(Severity::Info),
            warn: f(Severity::Warn),
            error: f(Severity::Error),
        }
    }

    /// Build a value for each severity, stopping at the first failure.
    pub fn try_from_fn<E>(mut f: impl FnMut(Severity) -> Result<T, E>) -> Result<Self, E> {
        Ok(PerLevel {
            info: f(Severity::Info)?,
            warn: f(Severity::Warn)?,
            error: f(Severity::Error)?,
        })
    }

    pub fn get(&self, level: Severity) -> &T {
        match level {
            Severity::Info => &self.info,
            Severity::Warn => &self.warn,
            Severity::Error => &self.error,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(Severity, T) -> U) -> PerLevel<U> {
        PerLevel {
            info: f(Severity::Info, self.info),
            warn: f(Severity::Warn, self.warn),
            error: f(Severity::Error, self.error),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, &T)> {
        Severity::ALL.into_iter().map(move |level| (level, self.get(level)))
    }
}

impl<T> Index<Severity> for PerLevel<T> {
    type Output = T;

    fn index(&self, level: Severity) -> &T {
        self.get(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_status() {
        assert_eq!(Severity::from_status(200), Severity::Info);
        assert_eq!(Severity::from_status(302), Severity::Info);
        assert_eq!(Severity::from_status(399), Severity::Info);
        assert_eq!(Severity::from_status(400), Severity::Warn);
        assert_eq!(Severity::from_status(404), Severity::Warn);
        assert_eq!(Severity::from_status(499), Severity::Warn);
        assert_eq!(Severity::from_status(500), Severity::Error);
        assert_eq!(Severity::from_status(503), Severity::Error);
    }

    #[test]
    fn test_severity_names() {
        for level in Severity::ALL {
            assert_eq!(level.label().to_lowercase(), level.to_string());
        }
    }

    #[test]
    fn test_per_level_access() {
        let levels = PerLevel::from_fn(|level| level.as_str().len());
        assert_eq!(levels[Severity::Info], 4);
        assert_eq!(levels[Severity::Error], 5);

        let collected = levels.iter().map(|(_, n)| *n).collect::<Vec<_>>();
        assert_eq!(collected, vec![4, 4, 5]);

        let doubled = levels.map(|_, n| n * 2);
        assert_eq!(doubled.error, 10);

        let failed = PerLevel::try_from_fn(|level| match level {
            Severity::Warn => Err(level),
            _ => Ok(()),
        });
        assert_eq!(failed, Err(Severity::Warn));
    }
}
