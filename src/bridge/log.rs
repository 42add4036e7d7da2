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

use std::sync::OnceLock;

use crate::Error;
use crate::LogEvent;
use crate::Logger;
use crate::level::Level;
use crate::level::LogLevel;

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the logger installed by [`try_setup_log_crate`], if any.
pub fn default_logger() -> Option<&'static Logger> {
    DEFAULT_LOGGER.get()
}

struct LogCrateLogger(());

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        let Some(logger) = default_logger() else {
            return false;
        };

        log::Log::enabled(logger, metadata)
    }

    fn log(&self, record: &log::Record) {
        if let Some(logger) = default_logger() {
            log::Log::log(logger, record);
        }
    }

    fn flush(&self) {
        if let Some(logger) = default_logger() {
            log::Log::flush(logger);
        }
    }
}

/// `log` levels map as `Error → Error`, `Warn → Warning`, `Info → Info` and
/// `Debug | Trace → Debug`. Only the formatted message is written; target, module and key-values
/// are dropped.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Level::from(LogLevel::from(metadata.level())) >= self.level()
    }

    // filtered records still reach the writer, which seeds and rotates the file before filtering
    fn log(&self, record: &log::Record) {
        let message = record.args().to_string();
        self.write(LogEvent::new(record.level().into(), &message));
    }

    // every write closes the file
    fn flush(&self) {}
}

/// Install `logger` as the process-wide logger and forward the `log` crate to it.
///
/// This should be called early in the execution of a Rust program. Any log events that occur
/// before initialization will be ignored.
///
/// This function will set the global maximum log level to `Trace`; the logger's own minimum level
/// still applies. To override this, call [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if a default logger or the log crate global logger has already been set. In
/// that case `logger` is dropped and [`default_logger`] is left unchanged.
///
/// # Examples
///
/// ```
/// use rotolog::Logger;
///
/// let dir = tempfile::tempdir().unwrap();
/// let logger = Logger::builder("app.log")
///     .root_directory(dir.path())
///     .build()
///     .unwrap();
///
/// if let Err(err) = rotolog::bridge::try_setup_log_crate(logger) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// log::info!("forwarded to app.log");
/// ```
pub fn try_setup_log_crate(logger: Logger) -> Result<(), Error> {
    static LOGGER: LogCrateLogger = LogCrateLogger(());

    // claim the log crate first, so a failed setup leaves no default logger behind
    log::set_logger(&LOGGER).map_err(|err| {
        Error::invalid_configuration("failed to set up log crate global logger").with_source(err)
    })?;
    DEFAULT_LOGGER
        .set(logger)
        .map_err(|_| Error::invalid_configuration("default logger has already been set"))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Install `logger` as the process-wide logger and forward the `log` crate to it.
///
/// # Panics
///
/// Panic if a default logger or the log crate global logger has already been set.
pub fn setup_log_crate(logger: Logger) {
    try_setup_log_crate(logger).expect(
        "rotolog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
