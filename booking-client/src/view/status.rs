//! Status regions
//!
//! Every form or list has one line of feedback: the last success or error.

use std::fmt;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// One feedback line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

impl StatusLine {
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// `"1 table"`, `"3 tables"`
pub fn counted(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("1 {}", singular)
    } else {
        format!("{} {}", n, plural)
    }
}

/// Status region of a single view; empty until something happens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusRegion {
    line: Option<StatusLine>,
}

impl StatusRegion {
    pub fn clear(&mut self) {
        self.line = None;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.line = Some(StatusLine {
            kind: StatusKind::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "status error");
        self.line = Some(StatusLine {
            kind: StatusKind::Error,
            message,
        });
    }

    /// `"<context>: <error>"`, or the bare error for local validation
    pub fn failure(&mut self, context: &str, err: &ClientError) {
        if err.is_validation() {
            self.error(err.to_string());
        } else {
            self.error(format!("{}: {}", context, err));
        }
    }

    pub fn line(&self) -> Option<&StatusLine> {
        self.line.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.line.as_ref().map(|l| l.message.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.line.as_ref().is_some_and(StatusLine::is_error)
    }
}
