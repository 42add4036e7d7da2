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

//! Traps for errors that cannot be returned to the caller of a write.

use std::fmt;

use crate::Error;

mod callback;
mod default;

pub use self::callback::CallbackTrap;
pub use self::default::DefaultTrap;
pub use self::default::IgnoreTrap;

/// A sink for errors raised on the write path.
///
/// [`Logger::write`](crate::Logger::write) never fails. Whatever goes wrong while rotating,
/// opening or appending is handed to the logger's trap instead. Traps are invoked after the
/// logger lock has been released.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
