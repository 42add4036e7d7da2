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

use jiff::Zoned;

use crate::Error;
use crate::clock::Clock;
use crate::config::LoggerConfig;
use crate::event::LogEvent;
use crate::level::Level;
use crate::rolling::retention;

/// Message of the line that opens every newly created log file.
pub const FILE_CREATED: &str = "File Created";

/// A writer for the active log file of one logger.
///
/// The file is opened and closed on every [`append`](RollingFileWriter::append); nothing is
/// buffered between calls. The writer holds no lock of its own: [`Logger`](crate::Logger)
/// serializes access to it.
#[derive(Debug)]
pub struct RollingFileWriter {
    config: LoggerConfig,
    clock: Clock,
    deferred: Vec<Error>,
}

impl RollingFileWriter {
    /// Create a writer for the given configuration. No file is touched until the first append.
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_clock(config, Clock::DefaultClock)
    }

    pub(crate) fn with_clock(config: LoggerConfig, clock: Clock) -> Self {
        Self {
            config,
            clock,
            deferred: vec![],
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut LoggerConfig {
        &mut self.config
    }

    /// Take errors that did not abort a write, such as a failed prune.
    pub fn take_deferred(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.deferred)
    }

    /// Write one event.
    ///
    /// In order, this:
    ///
    /// 1. validates the event level;
    /// 2. creates the root directory if needed;
    /// 3. removes the active log for overwriting events, or rotates it if it is larger than the
    ///    size limit;
    /// 4. writes a `File Created` line at raw level `0` if the active log does not exist yet,
    ///    whatever the minimum level;
    /// 5. writes the event line if its level is at least the minimum level.
    ///
    /// Prune failures do not fail the append; they are kept for [`take_deferred`].
    ///
    /// [`take_deferred`]: RollingFileWriter::take_deferred
    pub fn append(&mut self, event: &LogEvent<'_>) -> Result<(), Error> {
        let level = event.level()?;
        let now = self.clock.now();

        let root = self.config.root_directory();
        fs::create_dir_all(root).map_err(|err| {
            Error::from_io_error("failed to create log directory", err).with_context("path", root)
        })?;

        let path = self.config.active_path();
        let mut options = OpenOptions::new();
        if event.is_overwrite() {
            remove_if_exists(&path)?;
            options.write(true).create(true).truncate(true);
        } else {
            self.rotate_if_needed(&path, &now)?;
            options.append(true).create(true);
        }

        let existed = path.try_exists().map_err(|err| {
            Error::from_io_error("failed to inspect log file", err)
                .with_context("path", path.display())
        })?;
        let mut file = options.open(&path).map_err(|err| {
            Error::from_io_error("failed to open log file", err)
                .with_context("path", path.display())
        })?;

        let layout = self.config.layout();
        let mut lines = String::new();
        if !existed {
            lines.push_str(&layout.format(&now, Level::RAW_ZERO, FILE_CREATED, None));
            lines.push('\n');
        }
        if level >= self.config.level() {
            lines.push_str(&layout.format(&now, level, event.message(), event.prefix()));
            lines.push('\n');
        }

        file.write_all(lines.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|err| {
                Error::from_io_error("failed to write log file", err)
                    .with_context("path", path.display())
            })
    }

    fn rotate_if_needed(&mut self, path: &Path, now: &Zoned) -> Result<(), Error> {
        let filesize = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(Error::from_io_error("failed to inspect log file", err)
                    .with_context("path", path.display()));
            }
        };
        if filesize <= self.config.size_limit() {
            return Ok(());
        }

        let backup = self.backup_path(now);
        fs::rename(path, &backup).map_err(|err| {
            Error::from_io_error("failed to rotate log file", err)
                .with_context("path", path.display())
                .with_context("backup", backup.display())
        })?;

        if let Err(err) = retention::prune(&self.config) {
            self.deferred.push(err);
        }
        Ok(())
    }

    fn backup_path(&self, now: &Zoned) -> PathBuf {
        let config = &self.config;
        let mut token = now.timestamp().as_nanosecond();
        loop {
            let path = PathBuf::from(format!(
                "{}{}_{:020}{}",
                config.root_directory(),
                config.filename(),
                token,
                config.backup_extension()
            ));
            // two rotations within one clock tick must not clobber each other
            if !path.exists() {
                return path;
            }
            token += 1;
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<(), Error> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Error::from_io_error("failed to remove log file", err)
            .with_context("path", path.display())),
    }
}
