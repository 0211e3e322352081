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
use std::future::Future;
use std::time::Instant;

use jiff::tz::TimeZone;

use crate::Dispatch;
use crate::Error;
use crate::LevelColor;
use crate::LoggerConfig;
use crate::LoggerOptions;
use crate::PerLevel;
use crate::RequestLayout;
use crate::Severity;

/// A handler result that carries an HTTP status code.
pub trait HasStatus {
    fn status(&self) -> u16;
}

impl HasStatus for u16 {
    fn status(&self) -> u16 {
        *self
    }
}

impl<B> HasStatus for (u16, B) {
    fn status(&self) -> u16 {
        self.0
    }
}

/// The error returned by [`RequestLogger::observe`].
#[derive(Debug, thiserror::Error)]
pub enum RequestError<E> {
    /// The handler failed and the failure was logged.
    #[error(transparent)]
    Handler(E),
    /// The log line could not be written.
    ///
    /// `handler` keeps the handler's own error when the handler failed too.
    #[error("failed to log request")]
    Logging {
        #[source]
        error: Error,
        handler: Option<E>,
    },
}

impl<E> RequestError<E> {
    /// The handler's error, whether or not logging it succeeded.
    pub fn handler_error(&self) -> Option<&E> {
        match self {
            RequestError::Handler(err) => Some(err),
            RequestError::Logging { handler, .. } => handler.as_ref(),
        }
    }

    pub fn into_handler_error(self) -> Option<E> {
        match self {
            RequestError::Handler(err) => Some(err),
            RequestError::Logging { handler, .. } => handler,
        }
    }
}

/// Logs completed HTTP requests, one line per request, routed by severity.
///
/// The logger owns one [`Dispatch`] per severity and is shared by reference or `Arc` across
/// request handlers. Every method takes `&self`.
///
/// # Examples
///
/// ```no_run
/// use reqlog::LevelOptions;
/// use reqlog::LoggerOptions;
/// use reqlog::RequestLogger;
/// use reqlog::Severity;
///
/// let options = LoggerOptions::new()
///     .level(Severity::Error, LevelOptions::new().log_to_file(true).rotate(true));
/// let logger = RequestLogger::from_options(&options).unwrap();
///
/// let response = logger.observe("GET", "/health", || Ok::<u16, std::io::Error>(200));
/// assert_eq!(response.unwrap(), 200);
/// ```
#[derive(Debug)]
pub struct RequestLogger {
    dispatches: PerLevel<Dispatch>,
    layout: RequestLayout,
}

impl RequestLogger {
    pub fn new(config: &LoggerConfig) -> Self {
        let dispatches = PerLevel::from_fn(|level| {
            Dispatch::from_config(level, config.sink(level), config.log_dir())
        });
        Self::from_dispatches(dispatches)
    }

    /// Build the configuration from `options`, then the logger from the configuration.
    pub fn from_options(options: &LoggerOptions) -> Result<Self, Error> {
        let config = options.build()?;
        Ok(Self::new(&config))
    }

    /// A logger over hand-assembled destinations.
    pub fn from_dispatches(dispatches: PerLevel<Dispatch>) -> Self {
        Self {
            dispatches,
            layout: RequestLayout::default(),
        }
    }

    /// Render timestamps in `tz` instead of the system time zone.
    pub fn with_timezone(mut self, tz: TimeZone) -> Self {
        self.layout = self.layout.timezone(tz);
        self
    }

    /// Colorize console output with `colors`.
    pub fn with_colors(self, colors: LevelColor) -> Self {
        self.map_colors(Some(colors))
    }

    /// Write plain text to the console.
    pub fn no_color(self) -> Self {
        self.map_colors(None)
    }

    fn map_colors(mut self, colors: Option<LevelColor>) -> Self {
        self.dispatches = self
            .dispatches
            .map(|_, dispatch| dispatch.colors(colors.clone()));
        self
    }

    pub fn dispatch(&self, level: Severity) -> &Dispatch {
        self.dispatches.get(level)
    }

    /// Log a completed request at `level`.
    pub fn log_event(
        &self,
        level: Severity,
        method: &str,
        url: &str,
        duration_ms: u64,
        status: u16,
    ) -> Result<(), Error> {
        let dispatch = self.dispatches.get(level);
        if dispatch.is_empty() {
            return Ok(());
        }
        let message =
            self.layout
                .format_event(&self.layout.now(), level, method, url, duration_ms, status);
        dispatch.log(&message)
    }

    /// Log a completed request at the severity its status maps to.
    pub fn log_request(
        &self,
        method: &str,
        url: &str,
        duration_ms: u64,
        status: u16,
    ) -> Result<(), Error> {
        let level = Severity::from_status(status);
        self.log_event(level, method, url, duration_ms, status)
    }

    /// Log a failed request at error severity with status 500 and the error's source chain.
    pub fn log_error(&self, method: &str, url: &str, error: &dyn StdError) -> Result<(), Error> {
        let dispatch = self.dispatches.get(Severity::Error);
        if dispatch.is_empty() {
            return Ok(());
        }
        let message = self
            .layout
            .format_error(&self.layout.now(), method, url, error);
        dispatch.log(&message)
    }

    /// Run `handler` once, log its outcome, and return its result.
    ///
    /// A successful response is logged with its duration at the severity of its status. A
    /// handler error is logged at error severity and returned as [`RequestError::Handler`].
    pub fn observe<T, E, F>(&self, method: &str, url: &str, handler: F) -> Result<T, RequestError<E>>
    where
        T: HasStatus,
        E: StdError,
        F: FnOnce() -> Result<T, E>,
    {
        let start = Instant::now();
        let result = handler();
        self.complete(method, url, start, result)
    }

    /// Await `future` once, log its outcome, and return its result.
    ///
    /// See [`RequestLogger::observe`].
    pub async fn observe_async<T, E, F>(
        &self,
        method: &str,
        url: &str,
        future: F,
    ) -> Result<T, RequestError<E>>
    where
        T: HasStatus,
        E: StdError,
        F: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let result = future.await;
        self.complete(method, url, start, result)
    }

    fn complete<T, E>(
        &self,
        method: &str,
        url: &str,
        start: Instant,
        result: Result<T, E>,
    ) -> Result<T, RequestError<E>>
    where
        T: HasStatus,
        E: StdError,
    {
        match result {
            Ok(response) => {
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                match self.log_request(method, url, duration_ms, response.status()) {
                    Ok(()) => Ok(response),
                    Err(error) => Err(RequestError::Logging {
                        error,
                        handler: None,
                    }),
                }
            }
            Err(err) => match self.log_error(method, url, &err) {
                Ok(()) => Err(RequestError::Handler(err)),
                Err(error) => Err(RequestError::Logging {
                    error,
                    handler: Some(err),
                }),
            },
        }
    }

    /// Flush every destination of every level.
    ///
    /// All levels are flushed even if one fails; the first failure is returned.
    pub fn flush(&self) -> Result<(), Error> {
        let mut result = Ok(());
        for (_, dispatch) in self.dispatches.iter() {
            if let Err(err) = dispatch.flush() {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }
}
