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

//! Logger configuration.

use std::path::MAIN_SEPARATOR;
use std::path::Path;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::DEFAULT_LINE_FORMAT;
use crate::layout::TemplateLayout;
use crate::level::Level;
use crate::level::LogLevel;
use crate::rolling::PrunePolicy;

/// Default size, in bytes, above which the active log is rotated.
pub const DEFAULT_SIZE_LIMIT: u64 = 102_400;
/// Default number of rotated backups to keep.
pub const DEFAULT_RETAINED_BACKUPS: usize = 1;
/// Default directory holding the active log and its backups.
pub const DEFAULT_ROOT_DIRECTORY: &str = "logs/";
/// Default extension of rotated backups.
pub const DEFAULT_BACKUP_EXTENSION: &str = ".bak";

/// Configuration of a single logger.
///
/// Every setter normalizes its input, so reading a value back may not return exactly what was
/// assigned. Setting the same value twice has no further effect.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    filename: String,
    root_directory: String,
    layout: TemplateLayout,
    size_limit: u64,
    retained_backups: usize,
    backup_extension: String,
    level: Level,
    prune_policy: PrunePolicy,
}

impl LoggerConfig {
    /// Create a configuration with defaults for everything but the filename.
    ///
    /// # Errors
    ///
    /// Return an error if `filename` is empty.
    pub fn new(filename: impl Into<String>) -> Result<Self, Error> {
        let filename = filename.into();
        if filename.is_empty() {
            return Err(Error::invalid_configuration("filename must not be empty"));
        }

        Ok(Self {
            filename,
            root_directory: DEFAULT_ROOT_DIRECTORY.to_string(),
            layout: TemplateLayout::new(DEFAULT_LINE_FORMAT),
            size_limit: DEFAULT_SIZE_LIMIT,
            retained_backups: DEFAULT_RETAINED_BACKUPS,
            backup_extension: DEFAULT_BACKUP_EXTENSION.to_string(),
            level: Level::default(),
            prune_policy: PrunePolicy::default(),
        })
    }

    /// Returns the base filename of the active log.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the root directory. It always ends with a path separator.
    pub fn root_directory(&self) -> &str {
        &self.root_directory
    }

    /// Set the root directory, appending a trailing separator if missing.
    ///
    /// An empty string means the current directory.
    pub fn set_root_directory(&mut self, root: impl AsRef<Path>) {
        let root = root.as_ref().to_string_lossy();
        self.root_directory = if root.is_empty() {
            format!(".{MAIN_SEPARATOR}")
        } else if root.ends_with('/') || root.ends_with(MAIN_SEPARATOR) {
            root.into_owned()
        } else {
            format!("{root}{MAIN_SEPARATOR}")
        };
    }

    /// Returns the effective line format.
    pub fn line_format(&self) -> &str {
        self.layout.template()
    }

    /// Set the line format. If the template does not contain `%Message%`, it is appended.
    pub fn set_line_format(&mut self, template: impl Into<String>) {
        self.layout.set_template(template);
    }

    /// Render `%DateTime%` in the given timezone instead of the system one.
    pub fn set_timezone(&mut self, tz: TimeZone) {
        self.layout = self.layout.clone().timezone(tz);
    }

    pub(crate) fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Returns the rotation threshold in bytes.
    pub fn size_limit(&self) -> u64 {
        self.size_limit
    }

    /// Set the rotation threshold in bytes.
    ///
    /// # Errors
    ///
    /// Return an error, leaving the limit unchanged, if `limit` is negative.
    pub fn set_size_limit(&mut self, limit: i64) -> Result<(), Error> {
        self.size_limit = u64::try_from(limit).map_err(|_| {
            Error::invalid_configuration("size limit must be a non-negative value")
                .with_context("size_limit", limit)
        })?;
        Ok(())
    }

    /// Returns how many rotated backups are kept.
    pub fn retained_backups(&self) -> usize {
        self.retained_backups
    }

    /// Set how many rotated backups are kept.
    pub fn set_retained_backups(&mut self, n: usize) {
        self.retained_backups = n;
    }

    /// Returns the backup extension. It always starts with `.`.
    pub fn backup_extension(&self) -> &str {
        &self.backup_extension
    }

    /// Set the backup extension, prepending a `.` if missing.
    pub fn set_backup_extension(&mut self, extension: impl Into<String>) {
        let extension = extension.into();
        self.backup_extension = if extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };
    }

    /// Returns the minimum level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Set the minimum level.
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level.into();
    }

    /// Set the minimum level from an integer that may not name a level.
    ///
    /// `value` is accepted if it is a named level. Otherwise `value - 1` is tried, which maps each
    /// odd in-between value to the named level below it. If neither names a level, nothing
    /// changes.
    ///
    /// Returns whether the level was changed.
    pub fn set_level_lenient(&mut self, value: i64) -> bool {
        let level = LogLevel::from_value(value)
            .or_else(|| value.checked_sub(1).and_then(LogLevel::from_value));
        match level {
            Some(level) => {
                self.set_level(level);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_raw_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Returns how backups are pruned after a rotation.
    pub fn prune_policy(&self) -> PrunePolicy {
        self.prune_policy
    }

    /// Set how backups are pruned after a rotation.
    pub fn set_prune_policy(&mut self, policy: PrunePolicy) {
        self.prune_policy = policy;
    }

    /// Returns `{root_directory}{filename}`.
    pub fn active_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", self.root_directory, self.filename))
    }
}

/// Plain construction options for a [`Logger`](crate::Logger).
///
/// With the `serde` feature enabled, this struct can be deserialized. Missing fields fall back to
/// their defaults:
///
/// ```json
/// { "filename": "service.log", "level": 2, "size_limit_bytes": 1048576 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggerOptions {
    /// Base filename of the active log.
    pub filename: String,
    /// Minimum level as an integer in `[0, 10]`.
    pub level: i64,
    /// Rotation threshold in bytes; must be non-negative.
    pub size_limit_bytes: i64,
    /// How many rotated backups to keep.
    pub retained_backup_count: usize,
    /// Root directory; defaults to `logs/`.
    pub root_directory: Option<String>,
    /// Line format; defaults to [`DEFAULT_LINE_FORMAT`].
    pub line_format: Option<String>,
    /// Backup extension; defaults to `.bak`.
    pub backup_extension: Option<String>,
    /// How backups are pruned after a rotation; `"oldest_only"` or `"down_to_limit"`.
    pub prune_policy: PrunePolicy,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            filename: "Log".to_string(),
            level: i64::from(LogLevel::Debug.value()),
            size_limit_bytes: DEFAULT_SIZE_LIMIT as i64,
            retained_backup_count: DEFAULT_RETAINED_BACKUPS,
            root_directory: None,
            line_format: None,
            backup_extension: None,
            prune_policy: PrunePolicy::default(),
        }
    }
}

impl TryFrom<LoggerOptions> for LoggerConfig {
    type Error = Error;

    fn try_from(options: LoggerOptions) -> Result<Self, Self::Error> {
        let LoggerOptions {
            filename,
            level,
            size_limit_bytes,
            retained_backup_count,
            root_directory,
            line_format,
            backup_extension,
            prune_policy,
        } = options;

        let mut config = LoggerConfig::new(filename)?;
        config.set_raw_level(Level::new(level)?);
        config.set_size_limit(size_limit_bytes)?;
        config.set_retained_backups(retained_backup_count);
        config.set_prune_policy(prune_policy);
        if let Some(root) = root_directory {
            config.set_root_directory(root);
        }
        if let Some(format) = line_format {
            config.set_line_format(format);
        }
        if let Some(extension) = backup_extension {
            config.set_backup_extension(extension);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new("Log").unwrap();
        assert_eq!(config.root_directory(), "logs/");
        assert_eq!(config.line_format(), DEFAULT_LINE_FORMAT);
        assert_eq!(config.size_limit(), 102_400);
        assert_eq!(config.retained_backups(), 1);
        assert_eq!(config.backup_extension(), ".bak");
        assert_eq!(config.level(), Level::from(LogLevel::Debug));
        assert_eq!(config.prune_policy(), PrunePolicy::OldestOnly);
        assert_eq!(config.active_path(), PathBuf::from("logs/Log"));
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let err = LoggerConfig::new("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_negative_size_limit_is_rejected() {
        let mut config = LoggerConfig::new("Log").unwrap();
        let err = config.set_size_limit(-1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert_eq!(config.size_limit(), DEFAULT_SIZE_LIMIT);

        config.set_size_limit(0).unwrap();
        assert_eq!(config.size_limit(), 0);
    }

    #[test]
    fn test_setters_normalize_and_are_idempotent() {
        let mut config = LoggerConfig::new("Log").unwrap();

        config.set_root_directory("var/log");
        let root = config.root_directory().to_string();
        assert!(root.starts_with("var/log"));
        assert!(root.ends_with('/') || root.ends_with(MAIN_SEPARATOR));
        config.set_root_directory(root.clone());
        assert_eq!(config.root_directory(), root);

        config.set_root_directory("");
        assert_eq!(config.root_directory(), format!(".{MAIN_SEPARATOR}"));

        config.set_backup_extension("old");
        assert_eq!(config.backup_extension(), ".old");
        config.set_backup_extension(".old");
        assert_eq!(config.backup_extension(), ".old");

        config.set_line_format("%DateTime% |");
        assert_eq!(config.line_format(), "%DateTime% | %Message%");
        config.set_line_format(config.line_format().to_string());
        assert_eq!(config.line_format(), "%DateTime% | %Message%");
    }

    #[test]
    fn test_lenient_level_setter() {
        let mut config = LoggerConfig::new("Log").unwrap();

        assert!(config.set_level_lenient(4));
        assert_eq!(config.level(), Level::from(LogLevel::Warning));

        // odd values fall back to the named level below
        assert!(config.set_level_lenient(7));
        assert_eq!(config.level(), Level::from(LogLevel::Error));

        assert!(config.set_level_lenient(11));
        assert_eq!(config.level(), Level::from(LogLevel::FatalException));

        for invalid in [-1, 12, 100, i64::MIN] {
            assert!(!config.set_level_lenient(invalid));
            assert_eq!(config.level(), Level::from(LogLevel::FatalException));
        }
    }

    #[test]
    fn test_options_conversion() {
        let options = LoggerOptions {
            filename: "app.log".to_string(),
            level: 6,
            size_limit_bytes: 2048,
            retained_backup_count: 3,
            root_directory: Some("out".to_string()),
            line_format: Some("[%szLogLevel%]".to_string()),
            backup_extension: Some("old".to_string()),
            prune_policy: PrunePolicy::DownToLimit,
        };
        let config = LoggerConfig::try_from(options).unwrap();
        assert_eq!(config.filename(), "app.log");
        assert_eq!(config.level(), Level::from(LogLevel::Error));
        assert_eq!(config.size_limit(), 2048);
        assert_eq!(config.retained_backups(), 3);
        assert_eq!(config.line_format(), "[%szLogLevel%] %Message%");
        assert_eq!(config.backup_extension(), ".old");
        assert_eq!(config.prune_policy(), PrunePolicy::DownToLimit);
    }

    #[test]
    fn test_invalid_options() {
        let options = LoggerOptions {
            size_limit_bytes: -5,
            ..LoggerOptions::default()
        };
        let err = LoggerConfig::try_from(options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let options = LoggerOptions {
            level: 11,
            ..LoggerOptions::default()
        };
        let err = LoggerConfig::try_from(options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_options() {
        let options: LoggerOptions =
            serde_json::from_str(r#"{ "filename": "service.log", "level": 2 }"#).unwrap();
        assert_eq!(options.filename, "service.log");
        assert_eq!(options.level, 2);
        assert_eq!(options.size_limit_bytes, DEFAULT_SIZE_LIMIT as i64);
        assert_eq!(options.retained_backup_count, DEFAULT_RETAINED_BACKUPS);
        assert_eq!(options.root_directory, None);
        assert_eq!(options.prune_policy, PrunePolicy::OldestOnly);

        let json = r#"{ "retained_backup_count": 2, "prune_policy": "down_to_limit" }"#;
        let options: LoggerOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.retained_backup_count, 2);
        assert_eq!(options.prune_policy, PrunePolicy::DownToLimit);
        let config = LoggerConfig::try_from(options).unwrap();
        assert_eq!(config.prune_policy(), PrunePolicy::DownToLimit);
    }
}
