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

use std::error::Error as StdError;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Severity;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f%:z";

/// Formats request events into log lines.
///
/// Output format:
///
/// ```text
/// [INFO][2024-08-10T17:12:52.123456+08:00] GET /info -> 3ms (200)
/// [ERROR][2024-08-10T17:12:52.123456+08:00] GET /error -> ERROR (500)
/// connection reset
/// Caused by: broken pipe
///
/// ```
///
/// Timestamps use the system time zone unless one is configured.
#[derive(Default, Debug, Clone)]
pub struct RequestLayout {
    tz: Option<TimeZone>,
}

impl RequestLayout {
    /// Render timestamps in `tz` instead of the system time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    pub(crate) fn now(&self) -> Zoned {
        match self.tz.clone() {
            Some(tz) => Zoned::now().with_time_zone(tz),
            None => Zoned::now(),
        }
    }

    /// `[LEVEL][timestamp] METHOD URL -> <duration>ms (<status>)\n`
    pub fn format_event(
        &self,
        time: &Zoned,
        level: Severity,
        method: &str,
        url: &str,
        duration_ms: u64,
        status: u16,
    ) -> String {
        let level = level.label();
        let time = time.strftime(TIMESTAMP_FORMAT);
        format!("[{level}][{time}] {method} {url} -> {duration_ms}ms ({status})\n")
    }

    /// `[ERROR][timestamp] METHOD URL -> ERROR (500)\n<trace>\n\n`
    ///
    /// The trace is the error message followed by one `Caused by:` line per source error.
    pub fn format_error(
        &self,
        time: &Zoned,
        method: &str,
        url: &str,
        error: &dyn StdError,
    ) -> String {
        let level = Severity::Error.label();
        let time = time.strftime(TIMESTAMP_FORMAT);
        let trace = error_trace(error);
        format!("[{level}][{time}] {method} {url} -> ERROR (500)\n{trace}\n\n")
    }
}

fn error_trace(error: &dyn StdError) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        trace.push_str("\nCaused by: ");
        trace.push_str(&err.to_string());
        source = err.source();
    }
    trace
}
