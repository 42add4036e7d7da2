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

use std::panic;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

pub use builder::LoggerBuilder;

use crate::Error;
use crate::config::LoggerConfig;
use crate::config::LoggerOptions;
use crate::event::LogEvent;
use crate::level::Level;
use crate::level::LogLevel;
use crate::rolling::PrunePolicy;
use crate::rolling::RollingFileWriter;
use crate::rolling::retention;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

mod builder;

/// A logger writing to one rotating file.
///
/// Every write takes this logger's lock for the whole check-rotate-open-write sequence. Distinct
/// loggers do not share a lock, even if they target the same file. Share a logger between threads
/// behind an [`Arc`](std::sync::Arc).
///
/// # Examples
///
/// ```
/// use rotolog::LogLevel;
/// use rotolog::Logger;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::builder("app.log")
///     .root_directory(dir.path())
///     .level(LogLevel::Info)
///     .size_limit(1024 * 1024)
///     .build()
///     .unwrap();
///
/// logger.info("service started");
/// logger.debug("not written: below the minimum level");
/// ```
#[derive(Debug)]
pub struct Logger {
    writer: Mutex<RollingFileWriter>,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a logger with default settings.
    ///
    /// # Errors
    ///
    /// Return an error if `filename` is empty.
    pub fn new(filename: impl Into<String>) -> Result<Logger, Error> {
        LoggerBuilder::new(filename).build()
    }

    /// Create a new [`LoggerBuilder`].
    #[must_use]
    pub fn builder(filename: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(filename)
    }

    /// Create a logger from plain options, reporting errors to a [`DefaultTrap`].
    ///
    /// # Errors
    ///
    /// Return an error if the options hold an empty filename, a negative size limit or a level
    /// outside `[0, 10]`.
    pub fn from_options(options: LoggerOptions) -> Result<Logger, Error> {
        let config = LoggerConfig::try_from(options)?;
        Ok(Logger::from_config(config, DefaultTrap::default()))
    }

    /// Create a logger from a configuration and a trap.
    pub fn from_config(config: LoggerConfig, trap: impl Into<Box<dyn Trap>>) -> Logger {
        Logger::from_writer(RollingFileWriter::new(config), trap.into())
    }

    pub(crate) fn from_writer(writer: RollingFileWriter, trap: Box<dyn Trap>) -> Logger {
        Logger {
            writer: Mutex::new(writer),
            trap,
        }
    }

    fn writer(&self) -> MutexGuard<'_, RollingFileWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Write an event. Errors go to the trap; this never fails or panics, even if the trap
    /// itself panics.
    pub fn write(&self, event: LogEvent<'_>) {
        if let Err(err) = self.try_write(event) {
            self.report(&err);
        }
    }

    /// Write an event, returning the error that aborted it.
    ///
    /// Errors that did not abort the write, such as a failed prune after a rotation, still go to
    /// the trap. A panic inside the write is caught and returned as
    /// [`ErrorKind::Unexpected`](crate::ErrorKind).
    pub fn try_write(&self, event: LogEvent<'_>) -> Result<(), Error> {
        let (result, deferred) = {
            let mut writer = self.writer();
            let result = panic::catch_unwind(AssertUnwindSafe(|| writer.append(&event)))
                .unwrap_or_else(|payload| Err(Error::from_panic(payload)));
            (result, writer.take_deferred())
        };

        // the lock is released here, so a trap may log through this logger again
        for err in deferred.iter() {
            self.report(err);
        }
        result
    }

    fn report(&self, err: &Error) {
        // a panicking trap has nowhere left to report to
        let _ = panic::catch_unwind(AssertUnwindSafe(|| self.trap.trap(err)));
    }

    /// Write `message` at `level`.
    pub fn log(&self, level: LogLevel, message: &str) {
        self.write(LogEvent::new(level, message));
    }

    /// Write `message` at a raw integer level.
    ///
    /// A level outside `[0, 10]` is reported to the trap as
    /// [`ErrorKind::InvalidConfiguration`](crate::ErrorKind) and nothing is written.
    pub fn log_raw(&self, level: i64, message: &str) {
        self.write(LogEvent::raw(level, message));
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn exception(&self, message: &str) {
        self.log(LogLevel::Exception, message);
    }

    pub fn fatal_exception(&self, message: &str) {
        self.log(LogLevel::FatalException, message);
    }

    /// Returns a snapshot of the current configuration.
    pub fn config(&self) -> LoggerConfig {
        self.writer().config().clone()
    }

    /// Returns the minimum level.
    pub fn level(&self) -> Level {
        self.writer().config().level()
    }

    /// Returns the path of the active log.
    pub fn active_path(&self) -> PathBuf {
        self.writer().config().active_path()
    }

    /// List rotated backups, oldest first.
    ///
    /// # Errors
    ///
    /// Return an error if the root directory cannot be read.
    pub fn backups(&self) -> Result<Vec<PathBuf>, Error> {
        let writer = self.writer();
        let backups = retention::list_backups(writer.config())?;
        Ok(backups.into_iter().map(|b| b.path).collect())
    }

    /// See [`LoggerConfig::set_line_format`].
    pub fn set_line_format(&self, template: impl Into<String>) {
        self.writer().config_mut().set_line_format(template);
    }

    /// See [`LoggerConfig::set_root_directory`].
    pub fn set_root_directory(&self, root: impl AsRef<Path>) {
        self.writer().config_mut().set_root_directory(root);
    }

    /// See [`LoggerConfig::set_backup_extension`].
    pub fn set_backup_extension(&self, extension: impl Into<String>) {
        self.writer().config_mut().set_backup_extension(extension);
    }

    /// See [`LoggerConfig::set_level`].
    pub fn set_level(&self, level: LogLevel) {
        self.writer().config_mut().set_level(level);
    }

    /// See [`LoggerConfig::set_level_lenient`].
    pub fn set_level_lenient(&self, value: i64) -> bool {
        self.writer().config_mut().set_level_lenient(value)
    }

    /// See [`LoggerConfig::set_size_limit`].
    ///
    /// # Errors
    ///
    /// Return an error if `limit` is negative.
    pub fn set_size_limit(&self, limit: i64) -> Result<(), Error> {
        self.writer().config_mut().set_size_limit(limit)
    }

    /// See [`LoggerConfig::set_retained_backups`].
    pub fn set_retained_backups(&self, n: usize) {
        self.writer().config_mut().set_retained_backups(n);
    }

    /// See [`LoggerConfig::set_prune_policy`].
    pub fn set_prune_policy(&self, policy: PrunePolicy) {
        self.writer().config_mut().set_prune_policy(policy);
    }
}
