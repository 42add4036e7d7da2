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

//! Rotolog appends timestamped, level-filtered lines to a file, rotates the file once it grows
//! past a size limit and prunes old rotated copies.
//!
//! # Overview
//!
//! A [`Logger`] owns one log target, `{root_directory}{filename}`. Each write:
//!
//! 1. takes the logger's lock;
//! 2. moves the active file to `{filename}_{token}{backup_extension}` if it is larger than the
//!    size limit, then prunes surplus backups;
//! 3. writes a `File Created` line into a newly created file;
//! 4. renders the event with the line format template and appends it, unless its level is below
//!    the minimum level.
//!
//! Write errors never reach the caller of [`Logger::write`]. They are handed to the logger's
//! [`Trap`] instead, which prints to stderr by default.
//!
//! # Examples
//!
//! ```
//! use rotolog::LogEvent;
//! use rotolog::LogLevel;
//! use rotolog::Logger;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::builder("app.log")
//!     .root_directory(dir.path())
//!     .line_format("%DateTime% [%szLogLevel%] %Message%")
//!     .size_limit(64 * 1024)
//!     .retained_backups(3)
//!     .build()
//!     .unwrap();
//!
//! logger.info("service started");
//! logger.write(LogEvent::new(LogLevel::Warning, "disk almost full").with_prefix("\n"));
//! ```
//!
//! Forwarding the `log` crate:
//!
//! ```
//! let dir = tempfile::tempdir().unwrap();
//! let logger = rotolog::Logger::builder("app.log")
//!     .root_directory(dir.path())
//!     .build()
//!     .unwrap();
//! rotolog::bridge::setup_log_crate(logger);
//!
//! log::error!("Error message.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod config;
pub mod layout;
pub mod level;
pub mod rolling;
pub mod trap;

mod clock;
mod error;
mod event;
mod logger;

pub use self::config::LoggerConfig;
pub use self::config::LoggerOptions;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::event::LogEvent;
pub use self::level::Level;
pub use self::level::LogLevel;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::rolling::PrunePolicy;
pub use self::trap::Trap;
