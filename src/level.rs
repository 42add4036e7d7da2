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

//! Severity levels.
//!
//! [`LogLevel`] is the typed surface. Internally every event carries a [`Level`]: a validated
//! integer in `[0, 10]` that also remembers whether it came from a [`LogLevel`] or from a raw
//! integer. The odd values between the named levels are valid but unnamed; they render with
//! their decimal value in the display table.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use crate::Error;

/// Display strings indexed by numeric level.
pub const LEVEL_DISPLAY: [&str; 11] = [
    "Debug",
    "1",
    "Info",
    "3",
    "Warning",
    "5",
    "Error",
    "7",
    "Exception",
    "9",
    "FatalException",
];

/// The named severities, from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 0,
    Info = 2,
    Warning = 4,
    Error = 6,
    Exception = 8,
    FatalException = 10,
}

impl LogLevel {
    /// All named levels in ascending order.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Exception,
        LogLevel::FatalException,
    ];

    /// Returns the numeric value of this level.
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the named level with exactly this numeric value, if any.
    pub fn from_value(value: i64) -> Option<LogLevel> {
        LogLevel::ALL
            .into_iter()
            .find(|level| i64::from(level.value()) == value)
    }

    /// Returns the symbolic name, as rendered by the `%LogLevel%` placeholder.
    pub const fn name(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Exception => "EXCEPTION",
            LogLevel::FatalException => "FATALEXCEPTION",
        }
    }

    /// Returns the display string, as rendered by the `%szLogLevel%` placeholder.
    pub const fn display_str(self) -> &'static str {
        LEVEL_DISPLAY[self as usize]
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    /// Parses a symbolic name (`WARNING`), a display string (`FatalException`) or a decimal value
    /// (`4`), ignoring ASCII case. `_` and `-` separators are accepted, so `fatal_exception`
    /// works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(value) = s.parse::<i64>() {
            return LogLevel::from_value(value).ok_or_else(|| {
                Error::invalid_configuration("not a named log level").with_context("value", value)
            });
        }

        let normalized = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>();
        LogLevel::ALL
            .into_iter()
            .find(|level| {
                level.name().eq_ignore_ascii_case(&normalized)
                    || level.display_str().eq_ignore_ascii_case(&normalized)
            })
            .or_else(|| normalized.eq_ignore_ascii_case("warn").then_some(LogLevel::Warning))
            .ok_or_else(|| {
                Error::invalid_configuration("unknown log level").with_context("value", s)
            })
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

/// A validated severity in `[0, 10]`.
///
/// Equality, ordering and hashing consider only the numeric value: a raw `2` and
/// [`LogLevel::Info`] are the same severity. They differ only in how `%LogLevel%` renders.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    value: u8,
    symbolic: bool,
}

impl Level {
    /// The highest valid numeric level.
    pub const MAX: u8 = 10;

    /// The raw level `0`. `%LogLevel%` renders it as `0`, not `DEBUG`.
    pub(crate) const RAW_ZERO: Level = Level {
        value: 0,
        symbolic: false,
    };

    /// Validate a raw integer level.
    ///
    /// # Errors
    ///
    /// Return an [`ErrorKind::InvalidConfiguration`](crate::ErrorKind) error if `value` is
    /// outside `[0, 10]`.
    pub fn new(value: i64) -> Result<Level, Error> {
        match u8::try_from(value) {
            Ok(value) if value <= Level::MAX => Ok(Level {
                value,
                symbolic: false,
            }),
            _ => Err(Error::invalid_configuration("log level out of range [0, 10]")
                .with_context("level", value)),
        }
    }

    /// Returns the numeric value.
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Returns the named level with this value, if there is one.
    pub fn log_level(self) -> Option<LogLevel> {
        LogLevel::from_value(i64::from(self.value))
    }

    /// Returns the display string from [`LEVEL_DISPLAY`].
    pub fn display_str(self) -> &'static str {
        LEVEL_DISPLAY[self.value as usize]
    }

    /// Returns the symbolic name for levels built from a [`LogLevel`], or the decimal value for
    /// levels built from a raw integer.
    pub fn name(self) -> Cow<'static, str> {
        match self.log_level() {
            Some(level) if self.symbolic => Cow::Borrowed(level.name()),
            _ => Cow::Owned(self.value.to_string()),
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        Level {
            value: level.value(),
            symbolic: true,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        LogLevel::Debug.into()
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
