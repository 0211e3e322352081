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
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use reqlog::Dispatch;
use reqlog::Error;
use reqlog::LevelOptions;
use reqlog::LoggerOptions;
use reqlog::PerLevel;
use reqlog::RequestError;
use reqlog::RequestLogger;
use reqlog::Severity;
use reqlog::append::CaptureBuffer;
use reqlog::append::Console;
use reqlog::append::File;
use tempfile::TempDir;

fn file_only(level: Severity, options: LoggerOptions) -> LoggerOptions {
    options.level(level, LevelOptions::new().log_to_std(false).log_to_file(true))
}

fn file_only_options(dir: &Path) -> LoggerOptions {
    let options = LoggerOptions::new().log_dir(dir);
    Severity::ALL
        .into_iter()
        .fold(options, |options, level| file_only(level, options))
}

#[test]
fn test_console_colored_file_plain() {
    colored::control::set_override(true);

    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let console = CaptureBuffer::new();
    let dispatches = PerLevel::from_fn(|level| {
        Dispatch::new(level)
            .append(Console::capture(&console))
            .append(File::new(temp_dir.path().join(format!("{level}.log"))))
    });
    let logger = RequestLogger::from_dispatches(dispatches);

    logger.log_request("GET", "/info", 5, 200).unwrap();
    logger.flush().unwrap();

    let console = console.contents();
    assert!(console.starts_with("\u{1b}[32m[INFO]["), "{console:?}");
    assert!(console.ends_with("GET /info -> 5ms (200)\u{1b}[0m\n"), "{console:?}");

    let file = fs::read_to_string(temp_dir.path().join("info.log")).unwrap();
    assert!(!file.contains('\u{1b}'), "{file:?}");
    assert!(file.starts_with("[INFO]["), "{file:?}");
    assert!(file.ends_with("] GET /info -> 5ms (200)\n"), "{file:?}");
}

#[test]
fn test_status_routes_to_level_files() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = RequestLogger::from_options(&file_only_options(temp_dir.path())).unwrap();
    assert!(!temp_dir.path().join("info.log").exists());

    logger.log_request("GET", "/ok", 1, 200).unwrap();
    logger.log_request("GET", "/redirect", 1, 302).unwrap();
    logger.log_request("GET", "/missing", 1, 404).unwrap();
    logger.log_request("GET", "/unavailable", 1, 503).unwrap();

    let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
    let info = read("info.log");
    assert_eq!(info.lines().count(), 2, "{info}");
    assert!(info.contains("/ok -> 1ms (200)"));
    assert!(info.contains("/redirect -> 1ms (302)"));
    assert!(read("warn.log").contains("[WARN]["));
    assert!(read("warn.log").contains("/missing -> 1ms (404)"));
    assert!(read("error.log").contains("[ERROR]["));
    assert!(read("error.log").contains("/unavailable -> 1ms (503)"));
}

#[test]
fn test_handler_error_is_logged_and_returned() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = RequestLogger::from_options(&file_only_options(temp_dir.path())).unwrap();

    let result = logger.observe("GET", "/error", || {
        Err::<u16, _>(io::Error::other("An error occurred"))
    });
    match result {
        Err(RequestError::Handler(err)) => assert_eq!(err.to_string(), "An error occurred"),
        other => panic!("unexpected result: {other:?}"),
    }

    let error = fs::read_to_string(temp_dir.path().join("error.log")).unwrap();
    assert!(error.starts_with("[ERROR]["), "{error}");
    assert!(
        error.ends_with("] GET /error -> ERROR (500)\nAn error occurred\n\n"),
        "{error}"
    );
    assert!(!temp_dir.path().join("info.log").exists());
}

#[test]
fn test_observe_measures_duration() {
    let buffer = CaptureBuffer::new();
    let dispatches = PerLevel::from_fn(|level| Dispatch::new(level).append(Console::capture(&buffer)));
    let logger = RequestLogger::from_dispatches(dispatches).no_color();

    let response = logger.observe("GET", "/slow", || {
        thread::sleep(Duration::from_millis(20));
        Ok::<_, io::Error>((200u16, "done"))
    });
    assert_eq!(response.unwrap().1, "done");

    let line = buffer.contents();
    let duration = line
        .split(" -> ")
        .nth(1)
        .and_then(|rest| rest.split("ms").next())
        .and_then(|ms| ms.parse::<u64>().ok())
        .unwrap_or_else(|| panic!("no duration in {line:?}"));
    assert!(duration >= 20, "{line}");
}

#[test]
fn test_logging_failure_keeps_handler_error() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let logger = RequestLogger::from_options(&file_only_options(&blocker)).unwrap();

    let result = logger.observe("GET", "/error", || {
        Err::<u16, _>(io::Error::other("An error occurred"))
    });
    match result {
        Err(RequestError::Logging { error, handler }) => {
            assert!(matches!(error, Error::Directory { .. }), "{error:?}");
            assert_eq!(handler.unwrap().to_string(), "An error occurred");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let result = logger.observe("GET", "/ok", || Ok::<u16, io::Error>(200));
    match result {
        Err(RequestError::Logging { handler, .. }) => assert!(handler.is_none()),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = LoggerOptions::new().level(Severity::Info, LevelOptions::new().period("5s"));
    let err = RequestLogger::from_options(&options).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }), "{err:?}");
}

#[test]
fn test_concurrent_requests_share_one_rolling_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let options = LoggerOptions::new().log_dir(temp_dir.path()).level(
        Severity::Info,
        LevelOptions::new()
            .log_to_std(false)
            .log_to_file(true)
            .rotate(true),
    );
    let logger = Arc::new(RequestLogger::from_options(&options).unwrap());

    let handles = (0..8)
        .map(|worker| {
            let logger = logger.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    let url = format!("/worker/{worker}/{i}");
                    logger.log_request("GET", &url, 0, 200).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }
    logger.flush().unwrap();

    let files = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect::<Vec<_>>();
    assert_eq!(files.len(), 1, "{files:?}");
    let contents = fs::read_to_string(&files[0]).unwrap();
    assert_eq!(contents.lines().count(), 400);
    assert!(contents.lines().all(|line| line.ends_with("-> 0ms (200)")));
}

#[tokio::test]
async fn test_observe_async() {
    let buffer = CaptureBuffer::new();
    let dispatches = PerLevel::from_fn(|level| Dispatch::new(level).append(Console::capture(&buffer)));
    let logger = RequestLogger::from_dispatches(dispatches).no_color();

    let response = logger
        .observe_async("GET", "/warn", async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok::<u16, io::Error>(404)
        })
        .await;
    assert_eq!(response.unwrap(), 404);
    let line = buffer.take();
    assert!(line.starts_with("[WARN]["), "{line}");
    assert!(line.contains("] GET /warn -> "), "{line}");

    let response = logger
        .observe_async("GET", "/error", async { Err::<u16, _>(io::Error::other("timeout")) })
        .await;
    assert_eq!(response.unwrap_err().to_string(), "timeout");
    assert!(buffer.take().ends_with("-> ERROR (500)\ntimeout\n\n"));
}
