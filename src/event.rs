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

use crate::Error;
use crate::level::Level;
use crate::level::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventLevel {
    Typed(LogLevel),
    Raw(i64),
}

/// A single write request.
///
/// # Examples
///
/// ```
/// use rotolog::LogEvent;
/// use rotolog::LogLevel;
///
/// let event = LogEvent::new(LogLevel::Info, "service started").with_prefix("\n\n");
/// assert_eq!(event.prefix(), Some("\n\n"));
/// assert!(!event.is_overwrite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEvent<'a> {
    level: EventLevel,
    message: &'a str,
    prefix: Option<&'a str>,
    overwrite: bool,
}

impl<'a> LogEvent<'a> {
    /// Create an event at a named level.
    pub fn new(level: LogLevel, message: &'a str) -> Self {
        Self {
            level: EventLevel::Typed(level),
            message,
            prefix: None,
            overwrite: false,
        }
    }

    /// Create an event at a raw integer level.
    ///
    /// The level is validated when the event is written; a value outside `[0, 10]` fails the
    /// write with [`ErrorKind::InvalidConfiguration`](crate::ErrorKind).
    pub fn raw(level: i64, message: &'a str) -> Self {
        Self {
            level: EventLevel::Raw(level),
            message,
            prefix: None,
            overwrite: false,
        }
    }

    /// Sets text written verbatim before the rendered line.
    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Sets whether the active log is discarded before this event is written.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Returns the validated level.
    ///
    /// # Errors
    ///
    /// Return an error if the event was built from a raw level outside `[0, 10]`.
    pub fn level(&self) -> Result<Level, Error> {
        match self.level {
            EventLevel::Typed(level) => Ok(level.into()),
            EventLevel::Raw(value) => Level::new(value),
        }
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_level_validation() {
        assert_eq!(
            LogEvent::new(LogLevel::Error, "m").level().unwrap().name(),
            "ERROR"
        );
        assert_eq!(LogEvent::raw(6, "m").level().unwrap().name(), "6");
        assert_eq!(
            LogEvent::raw(11, "m").level().unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            LogEvent::raw(-1, "m").level().unwrap_err().kind(),
            ErrorKind::InvalidConfiguration
        );
    }
}
