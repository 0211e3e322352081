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
use std::io::IsTerminal;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::Severity;
use crate::append::Append;

/// An appender that writes log lines to a console stream.
///
/// # Examples
///
/// ```
/// use reqlog::Severity;
/// use reqlog::append::Console;
///
/// let stdout = Console::stdout();
/// let stderr = Console::for_level(Severity::Error);
/// ```
#[derive(Debug, Clone)]
pub struct Console {
    stream: Stream,
}

#[derive(Debug, Clone)]
enum Stream {
    Stdout,
    Stderr,
    Capture(CaptureBuffer),
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    /// The conventional stream for `level`: standard error for [`Severity::Error`], standard
    /// output otherwise.
    pub fn for_level(level: Severity) -> Self {
        match level {
            Severity::Error => Console::stderr(),
            Severity::Info | Severity::Warn => Console::stdout(),
        }
    }

    /// A console that writes into `buffer` instead of a process stream.
    ///
    /// Useful for asserting on console output in tests, or for embedding the output in another
    /// view.
    pub fn capture(buffer: &CaptureBuffer) -> Self {
        Self {
            stream: Stream::Capture(buffer.clone()),
        }
    }
}

impl Append for Console {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        let result = match &self.stream {
            Stream::Stdout => io::stdout().lock().write_all(bytes),
            Stream::Stderr => io::stderr().lock().write_all(bytes),
            Stream::Capture(buffer) => {
                buffer.lock().extend_from_slice(bytes);
                Ok(())
            }
        };
        result.map_err(|err| Error::write(None, err))
    }

    /// Whether this stream renders colors: a terminal, a forced `CLICOLOR_FORCE`, or a capture
    /// buffer.
    fn is_console(&self) -> bool {
        match &self.stream {
            Stream::Stdout => color_forced() || io::stdout().is_terminal(),
            Stream::Stderr => color_forced() || io::stderr().is_terminal(),
            Stream::Capture(_) => true,
        }
    }

    fn flush(&self) -> Result<(), Error> {
        let result = match &self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
            Stream::Capture(_) => Ok(()),
        };
        result.map_err(|err| Error::write(None, err))
    }
}

fn color_forced() -> bool {
    std::env::var("CLICOLOR_FORCE").is_ok_and(|value| value != "0")
}

/// A shared in-memory buffer that receives console output. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Take everything written so far, leaving the buffer empty.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
