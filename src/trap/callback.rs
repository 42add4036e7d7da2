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

use std::fmt;

use crate::Error;
use crate::trap::Trap;

/// A trap that forwards errors to a closure.
///
/// # Examples
///
/// ```
/// use rotolog::trap::CallbackTrap;
///
/// let trap = CallbackTrap::new(|err| {
///     eprintln!("log write failed: {} {}", err.kind(), err.message());
/// });
/// ```
pub struct CallbackTrap<F> {
    callback: F,
}

impl<F> CallbackTrap<F>
where
    F: Fn(&Error) + Send + Sync + 'static,
{
    /// Create a new [`CallbackTrap`].
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> fmt::Debug for CallbackTrap<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTrap").finish_non_exhaustive()
    }
}

impl<F> Trap for CallbackTrap<F>
where
    F: Fn(&Error) + Send + Sync + 'static,
{
    fn trap(&self, err: &Error) {
        (self.callback)(err)
    }
}
