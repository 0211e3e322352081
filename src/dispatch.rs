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

use std::path::Path;

use crate::Error;
use crate::LevelColor;
use crate::Severity;
use crate::SinkConfig;
use crate::append::Append;
use crate::append::Console;
use crate::append::File;
use crate::append::RollingFile;
use crate::append::rolling_file::RollingFileWriter;
use crate::append::rolling_file::plain_filename;

/// Fans a formatted log line of one severity out to its destinations.
///
/// Console destinations receive the line colorized when colors are set; every other
/// destination receives the plain line.
#[derive(Debug)]
pub struct Dispatch {
    level: Severity,
    colors: Option<LevelColor>,
    appends: Vec<Box<dyn Append>>,
}

impl Dispatch {
    /// A dispatch with no destinations and default colors.
    pub fn new(level: Severity) -> Self {
        Self {
            level,
            colors: Some(LevelColor::default()),
            appends: vec![],
        }
    }

    /// Build the destinations of `level` from its configuration.
    ///
    /// Console output comes first, then the file. Nothing touches the file system until the
    /// first line is written.
    pub fn from_config(level: Severity, config: &SinkConfig, log_dir: &Path) -> Self {
        let mut dispatch = Dispatch::new(level);
        if config.log_to_std() {
            dispatch = dispatch.append(Console::for_level(level));
        }
        if config.log_to_file() {
            dispatch = if config.rotate() {
                let writer = RollingFileWriter::builder(log_dir, level.as_str())
                    .period(config.period())
                    .build();
                dispatch.append(RollingFile::new(writer))
            } else {
                dispatch.append(File::new(log_dir.join(plain_filename(level.as_str()))))
            };
        }
        dispatch
    }

    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Set the console colors, or `None` to write plain text everywhere.
    pub fn colors(mut self, colors: Option<LevelColor>) -> Self {
        self.colors = colors;
        self
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    /// Whether this dispatch has no destinations, i.e. the level is muted.
    pub fn is_empty(&self) -> bool {
        self.appends.is_empty()
    }

    /// Write `message` to every destination in order.
    ///
    /// A failing destination does not stop the others; the first failure is returned once
    /// every destination has been tried.
    pub fn log(&self, message: &str) -> Result<(), Error> {
        let mut painted = None;
        let mut result = Ok(());
        for append in &self.appends {
            let written = match &self.colors {
                Some(colors) if append.is_console() => {
                    let painted = painted.get_or_insert_with(|| paint(colors, self.level, message));
                    append.write(painted.as_bytes())
                }
                _ => append.write(message.as_bytes()),
            };
            if let Err(err) = written {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    /// Flush every destination, returning the first failure.
    pub fn flush(&self) -> Result<(), Error> {
        let mut result = Ok(());
        for append in &self.appends {
            if let Err(err) = append.flush() {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}

// Paint the text but keep the trailing newline outside the escape codes.
fn paint(colors: &LevelColor, level: Severity, message: &str) -> String {
    let body = message.trim_end_matches('\n');
    let tail = &message[body.len()..];
    let mut painted = colors.paint(level, body);
    painted.push_str(tail);
    painted
}
