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

use jiff::Zoned;

/// Source of the instant stamped into log lines and backup names.
#[derive(Debug, Clone)]
pub enum Clock {
    DefaultClock,
    #[cfg(test)]
    ManualClock(ManualClock),
}

impl Clock {
    pub fn now(&self) -> Zoned {
        match self {
            Clock::DefaultClock => Zoned::now(),
            #[cfg(test)]
            Clock::ManualClock(clock) => clock.now(),
        }
    }
}

/// A clock that only moves when told to. Clones share the same instant, so a test can keep a
/// handle after moving the clock into a logger.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<Zoned>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: Zoned) -> ManualClock {
        ManualClock {
            now: std::sync::Arc::new(std::sync::Mutex::new(now)),
        }
    }

    pub fn now(&self) -> Zoned {
        self.now.lock().unwrap().clone()
    }

    pub fn set_now(&self, now: Zoned) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, span: jiff::Span) {
        let mut now = self.now.lock().unwrap();
        *now = now.checked_add(span).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Span;

    use super::*;

    #[test]
    fn test_manual_clock_is_shared_between_clones() {
        let start = Zoned::from_str("2023-01-01T12:00:00+00:00[+00:00]").unwrap();
        let handle = ManualClock::new(start.clone());
        let clock = Clock::ManualClock(handle.clone());
        assert_eq!(clock.now(), start);

        handle.advance(Span::new().seconds(90));
        assert_eq!(
            clock.now(),
            Zoned::from_str("2023-01-01T12:01:30+00:00[+00:00]").unwrap()
        );

        let later = Zoned::from_str("2024-01-01T12:00:00+00:00[+00:00]").unwrap();
        handle.set_now(later.clone());
        assert_eq!(clock.now(), later);
    }
}
