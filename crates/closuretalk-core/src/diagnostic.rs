//! Diagnostic channel for soft failures
//!
//! Failed sends never unwind. They are reported here through `tracing`
//! and, when a `Runtime` is in play, journaled as `Diagnostic` records.

use crate::error::ObjectError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    InvalidReceiver,
    MessageNotUnderstood,
    SelfReleased,
    FinalClassViolation,
    InvalidArguments,
    UnknownClass,
}

impl DiagnosticKind {
    /// Severity tag printed in front of the detail
    pub fn tag(self) -> &'static str {
        match self {
            Self::InvalidReceiver
            | Self::MessageNotUnderstood
            | Self::SelfReleased
            | Self::UnknownClass => "error",
            Self::FinalClassViolation | Self::InvalidArguments => "warning",
        }
    }
}

/// A failure that was reported instead of raised
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub selector: Option<String>,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
}

impl Diagnostic {
    /// Record an error, optionally tagged with the selector being sent
    pub fn new(error: &ObjectError, selector: Option<&str>) -> Self {
        Self {
            kind: error.kind(),
            selector: selector.map(str::to_string),
            detail: error.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] [{}] {}",
            self.timestamp,
            self.kind.tag(),
            self.detail
        )?;
        if let Some(selector) = &self.selector {
            write!(f, " (#{selector})")?;
        }
        Ok(())
    }
}

/// Emit an error on the diagnostic channel
pub fn report(error: &ObjectError, selector: &str) {
    match error {
        ObjectError::InvalidReceiver { found } => {
            tracing::error!(selector, found, "[error] {error}");
        }
        ObjectError::MessageNotUnderstood { .. } => {
            tracing::error!(selector, "[error] {error}");
        }
        ObjectError::SelfReleased { id } => {
            tracing::error!(selector, %id, "[error] {error}");
        }
        ObjectError::UnknownClass(_) => {
            tracing::error!("[error] {error}");
        }
        ObjectError::FinalClassViolation { .. } | ObjectError::InvalidArguments { .. } => {
            tracing::warn!(selector, "[warning] {error}");
        }
    }
}
