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

//! The rotation-aware writer behind every [`Logger`](crate::Logger).
//!
//! Before each write the active file `{root}{filename}` is checked against the size limit. An
//! oversized file is moved to `{root}{filename}_{token}{extension}`, where the token is the
//! rotation instant in nanoseconds, and old backups are then pruned according to the
//! [`PrunePolicy`].

pub use retention::PrunePolicy;
pub use writer::RollingFileWriter;

pub(crate) mod retention;
mod writer;
