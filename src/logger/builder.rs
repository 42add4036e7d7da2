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

use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::Error;
use crate::Logger;
use crate::clock::Clock;
use crate::config::DEFAULT_RETAINED_BACKUPS;
use crate::config::DEFAULT_SIZE_LIMIT;
use crate::config::LoggerConfig;
use crate::level::LogLevel;
use crate::rolling::PrunePolicy;
use crate::rolling::RollingFileWriter;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder for configuring a [`Logger`].
#[derive(Debug)]
pub struct LoggerBuilder {
    // required
    filename: String,

    // has default
    level: LogLevel,
    size_limit: i64,
    retained_backups: usize,
    root_directory: Option<PathBuf>,
    line_format: Option<String>,
    backup_extension: Option<String>,
    timezone: Option<TimeZone>,
    prune_policy: PrunePolicy,
    clock: Clock,
    trap: Box<dyn Trap>,
}

impl LoggerBuilder {
    /// Create a new logger builder.
    #[must_use]
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            level: LogLevel::Debug,
            size_limit: DEFAULT_SIZE_LIMIT as i64,
            retained_backups: DEFAULT_RETAINED_BACKUPS,
            root_directory: None,
            line_format: None,
            backup_extension: None,
            timezone: None,
            prune_policy: PrunePolicy::default(),
            clock: Clock::DefaultClock,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the minimum level.
    ///
    /// Default to [`LogLevel::Debug`].
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the size in bytes above which the active log is rotated.
    ///
    /// Default to 102400. A negative value makes [`build`](LoggerBuilder::build) fail.
    #[must_use]
    pub fn size_limit(mut self, n: i64) -> Self {
        self.size_limit = n;
        self
    }

    /// Set how many rotated backups to keep.
    ///
    /// Default to 1.
    #[must_use]
    pub fn retained_backups(mut self, n: usize) -> Self {
        self.retained_backups = n;
        self
    }

    /// Set the directory of the active log and its backups.
    ///
    /// Default to `logs/`.
    #[must_use]
    pub fn root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.root_directory = Some(root.into());
        self
    }

    /// Set the line format.
    ///
    /// Default to `%DateTime% - [%szLogLevel%] - %Message%`.
    #[must_use]
    pub fn line_format(mut self, template: impl Into<String>) -> Self {
        self.line_format = Some(template.into());
        self
    }

    /// Set the backup extension.
    ///
    /// Default to `.bak`.
    #[must_use]
    pub fn backup_extension(mut self, extension: impl Into<String>) -> Self {
        self.backup_extension = Some(extension.into());
        self
    }

    /// Set the timezone of `%DateTime%`.
    ///
    /// Default to the system timezone.
    #[must_use]
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Set how backups are pruned after a rotation.
    ///
    /// Default to [`PrunePolicy::OldestOnly`].
    #[must_use]
    pub fn prune_policy(mut self, policy: PrunePolicy) -> Self {
        self.prune_policy = policy;
        self
    }

    /// Set the trap for errors raised while writing.
    ///
    /// Default to [`DefaultTrap`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rotolog::LoggerBuilder;
    /// use rotolog::trap::CallbackTrap;
    ///
    /// let builder = LoggerBuilder::new("app.log").trap(CallbackTrap::new(|err| {
    ///     eprintln!("{}: {}", err.kind(), err.message());
    /// }));
    /// ```
    #[must_use]
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`]. No file is created until the first write.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The filename is empty.
    /// * The size limit is negative.
    pub fn build(self) -> Result<Logger, Error> {
        let Self {
            filename,
            level,
            size_limit,
            retained_backups,
            root_directory,
            line_format,
            backup_extension,
            timezone,
            prune_policy,
            clock,
            trap,
        } = self;

        let mut config = LoggerConfig::new(filename)?;
        config.set_size_limit(size_limit)?;
        config.set_level(level);
        config.set_retained_backups(retained_backups);
        config.set_prune_policy(prune_policy);
        if let Some(root) = root_directory {
            config.set_root_directory(root);
        }
        if let Some(template) = line_format {
            config.set_line_format(template);
        }
        if let Some(extension) = backup_extension {
            config.set_backup_extension(extension);
        }
        if let Some(tz) = timezone {
            config.set_timezone(tz);
        }

        let writer = RollingFileWriter::with_clock(config, clock);
        Ok(Logger::from_writer(writer, trap))
    }
}
