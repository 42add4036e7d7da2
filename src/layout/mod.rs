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

//! Layouts for rendering log lines.

pub use template::TemplateLayout;
pub use template::normalize_line_format;

mod template;

/// Replaced with the local timestamp.
pub const DATE_TIME: &str = "%DateTime%";
/// Replaced with the level's display string, e.g. `Warning`.
pub const LEVEL_DISPLAY: &str = "%szLogLevel%";
/// Replaced with the level's symbolic name, e.g. `WARNING`, or its decimal value for raw levels.
pub const LEVEL_NAME: &str = "%LogLevel%";
/// Replaced with the message body. Every effective template contains it exactly once.
pub const MESSAGE: &str = "%Message%";

/// The template used when none is configured.
pub const DEFAULT_LINE_FORMAT: &str = "%DateTime% - [%szLogLevel%] - %Message%";
