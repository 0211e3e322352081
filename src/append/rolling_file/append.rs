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

use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;
use crate::append::rolling_file::RollingFileWriter;

/// An appender that writes log lines to rolling files.
///
/// The writer sits behind a lock: the first caller runs file discovery while later callers
/// wait for it, and a rollover never interleaves with another write.
#[derive(Debug)]
pub struct RollingFile {
    writer: Mutex<RollingFileWriter>,
}

impl RollingFile {
    /// Creates a new [`RollingFile`] appender.
    pub fn new(writer: RollingFileWriter) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Discover or create the current log file ahead of the first write.
    pub fn init(&self) -> Result<(), Error> {
        self.lock().init()
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().is_initialized()
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().current_path().map(|path| path.to_path_buf())
    }

    fn lock(&self) -> MutexGuard<'_, RollingFileWriter> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<RollingFileWriter> for RollingFile {
    fn from(writer: RollingFileWriter) -> Self {
        RollingFile::new(writer)
    }
}

impl Append for RollingFile {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        self.lock().write(bytes)
    }

    fn flush(&self) -> Result<(), Error> {
        self.lock().flush()
    }
}
