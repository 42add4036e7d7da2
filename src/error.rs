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

use std::any::Any;
use std::fmt;
use std::io;

/// The category of an [`Error`].
///
/// Traps usually match on this to decide whether a failure is worth alerting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The logger was configured with a value it cannot work with, such as a negative size limit
    /// or a level outside `[0, 10]`.
    InvalidConfiguration,
    /// The filesystem refused access while creating, opening, rotating or deleting a log file.
    AccessDenied,
    /// Any other I/O failure: disk full, path too long, not a directory, and so on.
    IoFailure,
    /// A panic caught inside the write path.
    Unexpected,
}

impl ErrorKind {
    /// Returns the kind as a static string.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidConfiguration => "InvalidConfiguration",
            ErrorKind::AccessDenied => "AccessDenied",
            ErrorKind::IoFailure => "IoFailure",
            ErrorKind::Unexpected => "Unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error struct of rotolog.
pub struct Error {
    kind: ErrorKind,
    message: String,
    sources: Vec<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.sources.is_empty() {
            write!(f, ", sources: [")?;
            for (i, source) in self.sources.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("sources", &self.sources);
            return de.finish();
        }

        write!(f, "{} ({})", self.message, self.kind)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in self.sources.iter() {
                writeln!(f, "   {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sources: vec![],
            context: vec![],
        }
    }

    /// Shorthand for an [`ErrorKind::InvalidConfiguration`] error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidConfiguration, message)
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Add one more source in error.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error, without context or sources.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return an iterator over all sources of this error.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|v| v.as_ref())
    }

    /// Build an [`Error`] from an [`io::Error`], classifying permission failures as
    /// [`ErrorKind::AccessDenied`] and everything else as [`ErrorKind::IoFailure`].
    pub fn from_io_error(message: impl Into<String>, err: io::Error) -> Error {
        let kind = match err.kind() {
            io::ErrorKind::PermissionDenied => ErrorKind::AccessDenied,
            _ => ErrorKind::IoFailure,
        };
        Error::new(kind, message).with_source(err)
    }

    /// Build an [`ErrorKind::Unexpected`] error from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Error {
        let detail = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Error::new(ErrorKind::Unexpected, "panicked while writing log")
            .with_context("panic", detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = Error::from_io_error("failed to open log file", denied);
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(err.sources().len(), 1);

        let missing = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = Error::from_io_error("failed to open log file", missing);
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_display_carries_context_and_sources() {
        let err = Error::from_io_error(
            "failed to create log directory",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        )
        .with_context("path", "logs/");
        assert_eq!(
            err.to_string(),
            "failed to create log directory (IoFailure), context: { path: logs/ }, sources: [disk full]"
        );
    }

    #[test]
    fn test_from_panic_payloads() {
        let err = Error::from_panic(Box::new("boom"));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(err.to_string().contains("panic: boom"));

        let err = Error::from_panic(Box::new(String::from("owned boom")));
        assert!(err.to_string().contains("panic: owned boom"));

        let err = Error::from_panic(Box::new(42_u32));
        assert!(err.to_string().contains("unknown panic payload"));
    }
}
