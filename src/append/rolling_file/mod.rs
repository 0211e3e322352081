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

//! Appender for writing log lines to rolling files.
//!
//! Files are named `<filename>.<epoch_ms>.log`, stamped with their creation time.
//!
//! # Example
//!
//!```no_run
//! use reqlog::append::Append;
//! use reqlog::append::rolling_file::RollingFile;
//! use reqlog::append::rolling_file::RollingFileWriter;
//!
//! let writer = RollingFileWriter::builder("log", "info")
//!     .period("6h".parse().unwrap())
//!     .build();
//!
//! let rolling = RollingFile::new(writer);
//! rolling.write(b"GET / -> 3ms (200)\n").unwrap();
//! ```

pub use append::RollingFile;
pub use rolling::RollingFileWriter;
pub use rolling::RollingFileWriterBuilder;
pub use rotation::Period;
pub use rotation::PeriodUnit;
pub use rotation::elapsed;

pub(crate) use naming::plain_filename;

mod append;
mod clock;
mod naming;
mod rolling;
mod rotation;
