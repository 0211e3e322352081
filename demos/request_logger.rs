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
use std::thread;
use std::time::Duration;

use reqlog::LoggerOptions;
use reqlog::RequestError;
use reqlog::RequestLogger;

const OPTIONS: &str = r#"{
    "logDir": "log",
    "info": { "logToFile": true, "rotate": true, "period": "1d" },
    "warn": { "logToFile": true },
    "error": { "logToFile": true, "rotate": true, "period": "1w" }
}"#;

fn handle(path: &str) -> Result<(u16, String), io::Error> {
    match path {
        "/info" => {
            thread::sleep(Duration::from_millis(3));
            Ok((200, "This is an info message".to_string()))
        }
        "/warn" => Ok((404, "This is a warning message".to_string())),
        "/error" => Err(io::Error::other("An error occurred")),
        _ => Ok((404, "Not found".to_string())),
    }
}

fn main() -> anyhow::Result<()> {
    let options: LoggerOptions = serde_json::from_str(OPTIONS)?;
    let logger = RequestLogger::from_options(&options)?;

    for path in ["/info", "/warn", "/error", "/missing"] {
        match logger.observe("GET", path, || handle(path)) {
            Ok((status, body)) => println!("{status} {body}"),
            Err(RequestError::Handler(err)) => println!("500 {err}"),
            Err(err) => return Err(err.into()),
        }
    }

    logger.flush()?;
    Ok(())
}
