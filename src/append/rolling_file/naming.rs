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

//! Log file names of the form `<stem>.<epoch_ms>.log`.
//!
//! The embedded epoch is the creation time of the file. Rotation deadlines are always computed
//! relative to it.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;

const EXTENSION: &str = ".log";

/// `<stem>.log`, the name of a non-rotating log file.
pub(crate) fn plain_filename(stem: &str) -> String {
    format!("{stem}{EXTENSION}")
}

/// `<stem>.<epoch_ms>.log`
pub(crate) fn rotated_filename(stem: &str, epoch_ms: i64) -> String {
    format!("{stem}.{epoch_ms}{EXTENSION}")
}

/// Extract the creation epoch embedded in a rotated file name.
pub(crate) fn parse_epoch(stem: &str, filename: &str) -> Option<i64> {
    let epoch = filename
        .strip_prefix(stem)?
        .strip_prefix('.')?
        .strip_suffix(EXTENSION)?;
    if epoch.is_empty() || !epoch.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    epoch.parse().ok()
}

/// The file a sink should append to, and when that file was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveFile {
    pub path: PathBuf,
    pub created_at: i64,
}

impl ActiveFile {
    fn fresh(dir: &Path, stem: &str, now_ms: i64) -> ActiveFile {
        ActiveFile {
            path: dir.join(rotated_filename(stem, now_ms)),
            created_at: now_ms,
        }
    }
}

/// Find the most recently created file for `stem` in `dir`.
///
/// Files whose name starts with `stem` are candidates, and the one with the largest embedded
/// epoch wins. When there is no candidate, or no candidate carries a readable epoch, a fresh
/// name stamped with `now_ms` is returned. The directory must exist.
pub(crate) fn discover(dir: &Path, stem: &str, now_ms: i64) -> Result<ActiveFile, Error> {
    let read_dir = fs::read_dir(dir).map_err(|err| Error::directory(dir, err))?;

    let mut candidates = 0;
    let mut latest: Option<(i64, PathBuf)> = None;
    for entry in read_dir {
        let entry = entry.map_err(|err| Error::directory(dir, err))?;
        // the sink only creates files, not directories or symlinks
        if !entry.file_type().is_ok_and(|ty| ty.is_file()) {
            continue;
        }

        let filename = entry.file_name();
        // if the filename is not a UTF-8 string, skip it.
        let Some(filename) = filename.to_str() else {
            continue;
        };
        if !filename.starts_with(stem) {
            continue;
        }

        candidates += 1;
        if let Some(epoch) = parse_epoch(stem, filename) {
            if latest.as_ref().is_none_or(|(max, _)| epoch > *max) {
                latest = Some((epoch, entry.path()));
            }
        }
    }

    match latest {
        Some((created_at, path)) => Ok(ActiveFile { path, created_at }),
        None => {
            if candidates > 0 {
                log::warn!(
                    "no {stem} log file in {} carries a creation timestamp; starting a new one",
                    dir.display()
                );
            }
            Ok(ActiveFile::fresh(dir, stem, now_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn test_filenames() {
        assert_eq!(plain_filename("warn"), "warn.log");
        assert_eq!(rotated_filename("info", 1723280000000), "info.1723280000000.log");
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse_epoch("info", "info.100.log"), Some(100));
        assert_eq!(parse_epoch("info", "info.1723280000000.log"), Some(1723280000000));
        assert_eq!(parse_epoch("info", "info.log"), None);
        assert_eq!(parse_epoch("info", "info..log"), None);
        assert_eq!(parse_epoch("info", "info.abc.log"), None);
        assert_eq!(parse_epoch("info", "info.-1.log"), None);
        assert_eq!(parse_epoch("info", "info.100.txt"), None);
        assert_eq!(parse_epoch("info", "error.100.log"), None);
        assert_eq!(parse_epoch("info", "infox.100.log"), None);
    }

    #[test]
    fn test_discover_empty_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let active = discover(temp_dir.path(), "info", 42).unwrap();
        assert_eq!(active.path, temp_dir.path().join("info.42.log"));
        assert_eq!(active.created_at, 42);
    }

    #[test]
    fn test_discover_picks_largest_epoch() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        touch(dir, "info.100.log");
        touch(dir, "info.200.log");
        touch(dir, "info.30.log");
        touch(dir, "warn.900.log");
        fs::create_dir(dir.join("info.999.log")).unwrap();

        let active = discover(dir, "info", 5000).unwrap();
        assert_eq!(active.path, dir.join("info.200.log"));
        assert_eq!(active.created_at, 200);
    }

    #[test]
    fn test_discover_ignores_other_levels() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        touch(dir, "error.100.log");
        touch(dir, "warn.200.log");

        let active = discover(dir, "info", 7).unwrap();
        assert_eq!(active.path, dir.join("info.7.log"));
        assert_eq!(active.created_at, 7);
    }

    #[test]
    fn test_discover_recovers_from_unreadable_names() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        touch(dir, "info.log");
        touch(dir, "info.old.log");

        let active = discover(dir, "info", 300).unwrap();
        assert_eq!(active.path, dir.join("info.300.log"));
        assert_eq!(active.created_at, 300);
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let missing = temp_dir.path().join("missing");
        let err = discover(&missing, "info", 0).unwrap_err();
        assert!(matches!(err, Error::Directory { path, .. } if path == missing));
    }
}
