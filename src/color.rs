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

use colored::Color;
use colored::Colorize;

use crate::Severity;

/// Colors for console output, one per severity.
///
/// Whether escape codes are actually emitted follows the `colored` crate: it honors
/// `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`, and [`colored::control::set_override`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelColor {
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for info level logs.
    pub info: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
        }
    }
}

impl LevelColor {
    pub fn color(&self, level: Severity) -> Color {
        match level {
            Severity::Error => self.error,
            Severity::Warn => self.warn,
            Severity::Info => self.info,
        }
    }

    /// Colorize a whole message with the color of `level`.
    pub fn paint(&self, level: Severity, message: &str) -> String {
        message.color(self.color(level)).to_string()
    }
}
