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
use std::io::Write;

use crate::Error;
use crate::trap::Trap;

/// Reports failures of the logger on standard error, one line per failure, tagged with the
/// crate name so they stand out from the host's own output.
///
/// Nothing happens when standard error itself is unavailable.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "rotolog: {err}");
    }
}

/// Drops every failure. For hosts that prefer silence over diagnostics.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct IgnoreTrap {}

impl Trap for IgnoreTrap {
    fn trap(&self, _: &Error) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Logger;

    #[test]
    fn test_ignore_trap_swallows_failures() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let logger = Logger::builder("Log")
            .root_directory(&blocker)
            .trap(IgnoreTrap::default())
            .build()
            .unwrap();
        logger.error("goes nowhere");
        let event = crate::LogEvent::new(crate::LogLevel::Error, "x");
        assert!(logger.try_write(event).is_err());
    }
}
