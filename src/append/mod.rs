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

//! Destinations for formatted log lines.

use std::fmt;

use crate::Error;

mod file;
pub mod rolling_file;
mod stdio;

pub use self::file::File;
pub use self::rolling_file::RollingFile;
pub use self::stdio::CaptureBuffer;
pub use self::stdio::Console;

/// A destination that receives formatted log lines.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write one formatted log line.
    fn write(&self, bytes: &[u8]) -> Result<(), Error>;

    /// Whether this destination is a live console that renders colors.
    ///
    /// Console destinations receive colorized text; all others receive plain text. A process
    /// stream redirected to a file is not a console.
    ///
    /// Default to `false`.
    fn is_console(&self) -> bool {
        false
    }

    /// Flush any buffered lines.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
