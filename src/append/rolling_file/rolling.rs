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

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::append::file::open_append;
use crate::append::rolling_file::Period;
use crate::append::rolling_file::clock::Clock;
use crate::append::rolling_file::naming;
use crate::append::rolling_file::naming::ActiveFile;

/// A writer for rolling files.
///
/// The writer starts uninitialized and touches the filesystem on the first write: it creates
/// the log directory, picks up the newest `<filename>.<epoch_ms>.log` file left by a previous
/// run, or starts a new one. Every later write rolls over to a new file once the [`Period`]
/// has elapsed since the current file was created.
#[derive(Debug)]
pub struct RollingFileWriter {
    state: State,
    active: Option<Active>,
}

impl RollingFileWriter {
    /// Creates a new [`RollingFileWriterBuilder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use reqlog::append::rolling_file::RollingFileWriter;
    ///
    /// let writer = RollingFileWriter::builder("log", "info").build();
    /// assert!(!writer.is_initialized());
    /// ```
    #[must_use]
    pub fn builder(
        basedir: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> RollingFileWriterBuilder {
        RollingFileWriterBuilder::new(basedir, filename)
    }

    /// Whether the current log file has been discovered or created.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// The file currently written to, if initialized.
    pub fn current_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|active| active.path.as_path())
    }

    /// The creation time of the current file in milliseconds since the Unix epoch, if
    /// initialized.
    pub fn created_at(&self) -> Option<i64> {
        self.active.as_ref().map(|active| active.created_at)
    }

    /// Discover or create the current log file. Does nothing once initialized.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.active.is_none() {
            self.active = Some(self.state.open_current()?);
        }
        Ok(())
    }

    /// Append `buf` to the current file, rolling over first if the period has elapsed.
    pub fn write(&mut self, buf: &[u8]) -> Result<(), Error> {
        let state = &self.state;
        let active = match self.active {
            Some(ref mut active) => active,
            None => self.active.insert(state.open_current()?),
        };

        let now = state.clock.now_millis();
        if state.period.should_rotate(now, active.created_at) {
            // the previous file is closed when it is replaced
            *active = state.open_rotated(now)?;
            log::debug!("rolled {} log over to {}", state.filename, active.path.display());
        }

        active
            .file
            .write_all(buf)
            .map_err(|err| Error::write(Some(&active.path), err))
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        match self.active.as_mut() {
            Some(active) => active
                .file
                .flush()
                .map_err(|err| Error::write(Some(&active.path), err)),
            None => Ok(()),
        }
    }
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            log::warn!("failed to flush rolling file writer on drop: {err}");
        }
    }
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    // required
    basedir: PathBuf,
    filename: String,

    // has default
    period: Period,
    clock: Clock,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`].
    ///
    /// Files are named `<filename>.<epoch_ms>.log` inside `basedir`.
    #[must_use]
    pub fn new(basedir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            filename: filename.into(),
            period: Period::default(),
            clock: Clock::DefaultClock,
        }
    }

    /// Set the rotation period. Default to one day.
    #[must_use]
    pub fn period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`].
    ///
    /// No file is touched until the first write or [`RollingFileWriter::init`].
    pub fn build(self) -> RollingFileWriter {
        let Self {
            basedir,
            filename,
            period,
            clock,
        } = self;

        RollingFileWriter {
            state: State {
                log_dir: basedir,
                filename,
                period,
                clock,
            },
            active: None,
        }
    }
}

#[derive(Debug)]
struct Active {
    file: File,
    path: PathBuf,
    created_at: i64,
}

#[derive(Debug)]
struct State {
    log_dir: PathBuf,
    filename: String,
    period: Period,
    clock: Clock,
}

impl State {
    fn open_current(&self) -> Result<Active, Error> {
        let now = self.clock.now_millis();
        fs::create_dir_all(&self.log_dir)
            .map_err(|err| Error::directory(&self.log_dir, err))?;

        let ActiveFile { path, created_at } = naming::discover(&self.log_dir, &self.filename, now)?;
        let file = open_append(&path).map_err(|err| Error::directory(&path, err))?;
        log::debug!("{} log writes to {}", self.filename, path.display());

        Ok(Active {
            file,
            path,
            created_at,
        })
    }

    fn open_rotated(&self, now: i64) -> Result<Active, Error> {
        let path = self
            .log_dir
            .join(naming::rotated_filename(&self.filename, now));
        // the directory may have been removed since initialization
        fs::create_dir_all(&self.log_dir).map_err(|err| Error::write(Some(&path), err))?;
        let file = open_append(&path).map_err(|err| Error::write(Some(&path), err))?;

        Ok(Active {
            file,
            path,
            created_at: now,
        })
    }
}
