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
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Error;
use crate::append::Append;

pub(crate) fn open_append(path: &Path) -> io::Result<fs::File> {
    OpenOptions::new().append(true).create(true).open(path)
}

/// An appender that writes log lines to a single file that never rolls over.
///
/// The file and its parent directory are created on the first write.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    file: Mutex<Option<fs::File>>,
}

impl File {
    /// Creates a new [`File`] appender writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<fs::File, Error> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|err| Error::directory(dir, err))?;
        }
        open_append(&self.path).map_err(|err| Error::directory(&self.path, err))
    }
}

impl Append for File {
    fn write(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let file = match *file {
            Some(ref mut file) => file,
            None => file.insert(self.open()?),
        };
        file.write_all(bytes)
            .map_err(|err| Error::write(Some(&self.path), err))
    }

    fn flush(&self) -> Result<(), Error> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        match file.as_mut() {
            Some(file) => file
                .flush()
                .map_err(|err| Error::write(Some(&self.path), err)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_created_on_first_write() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("log").join("error.log");
        let append = File::new(&path);
        assert!(!append.is_console());
        assert!(!path.exists());

        append.write(b"first\n").unwrap();
        append.write(b"second\n").unwrap();
        append.flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_file_appends_to_existing_contents() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("info.log");
        fs::write(&path, "kept\n").unwrap();

        File::new(&path).write(b"added\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\nadded\n");
    }

    #[test]
    fn test_file_reports_directory_error() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let err = File::new(blocker.join("info.log")).write(b"x").unwrap_err();
        assert!(matches!(err, Error::Directory { .. }), "{err:?}");
    }
}
