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
use jiff::tz::TimeZone;

use crate::layout::DATE_TIME;
use crate::layout::DEFAULT_LINE_FORMAT;
use crate::layout::LEVEL_DISPLAY;
use crate::layout::LEVEL_NAME;
use crate::layout::MESSAGE;
use crate::level::Level;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f%:z";

/// A layout that renders a log line from a template.
///
/// Output format with the default template:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 - [Debug] - File Created
/// 2024-08-11T22:44:57.172219+08:00 - [Warning] - disk almost full
/// 2024-08-11T22:44:57.172276+08:00 - [Info] - request served
/// ```
///
/// Recognized placeholders are `%DateTime%`, `%szLogLevel%`, `%LogLevel%` and `%Message%`. Any
/// other `%` sequence is copied as is.
///
/// You can customize the timezone of the timestamp by setting it with
/// [`TemplateLayout::timezone`]. Otherwise, the system timezone is used.
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    template: String,
    tz: Option<TimeZone>,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            template: DEFAULT_LINE_FORMAT.to_string(),
            tz: None,
        }
    }
}

/// Make sure `template` contains [`MESSAGE`] exactly once.
///
/// A template without the placeholder gets ` %Message%` appended. Occurrences after the first one
/// are removed. The function is idempotent.
///
/// # Examples
///
/// ```
/// use rotolog::layout::normalize_line_format;
///
/// assert_eq!(normalize_line_format("%DateTime% -"), "%DateTime% - %Message%");
/// assert_eq!(normalize_line_format("%Message% | %Message%"), "%Message% | ");
/// ```
pub fn normalize_line_format(template: impl Into<String>) -> String {
    let template = template.into();
    let Some(pos) = template.find(MESSAGE) else {
        return format!("{template} {MESSAGE}");
    };

    let (head, tail) = template.split_at(pos + MESSAGE.len());
    if !tail.contains(MESSAGE) {
        return template;
    }

    let mut tail = tail.to_string();
    while tail.contains(MESSAGE) {
        tail = tail.replace(MESSAGE, "");
    }
    format!("{head}{tail}")
}

impl TemplateLayout {
    /// Create a layout from a template. The template is normalized with
    /// [`normalize_line_format`].
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: normalize_line_format(template),
            tz: None,
        }
    }

    /// Render timestamps in the given timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Returns the effective template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Replace the template, normalizing it the same way as [`TemplateLayout::new`].
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = normalize_line_format(template);
    }

    /// Render one line, without a trailing newline.
    ///
    /// A non-empty `prefix` is written verbatim before the rendered template; it is never scanned
    /// for placeholders, and neither is `message`.
    pub fn format(&self, now: &Zoned, level: Level, message: &str, prefix: Option<&str>) -> String {
        let mut line = String::with_capacity(self.template.len() + message.len() + 32);
        if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
            line.push_str(prefix);
        }

        let mut rest = self.template.as_str();
        while let Some(pos) = rest.find('%') {
            line.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(tail) = rest.strip_prefix(DATE_TIME) {
                let time = match self.tz.clone() {
                    Some(tz) => now.with_time_zone(tz),
                    None => now.clone(),
                };
                line.push_str(&time.strftime(TIMESTAMP_FORMAT).to_string());
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(LEVEL_DISPLAY) {
                line.push_str(level.display_str());
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(LEVEL_NAME) {
                line.push_str(&level.name());
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(MESSAGE) {
                line.push_str(message);
                rest = tail;
            } else {
                line.push('%');
                rest = &rest[1..];
            }
        }
        line.push_str(rest);
        line
    }
}
