//! Failure taxonomy for message sends and construction
//!
//! None of these abort the caller: `send` reports them and yields nil,
//! `try_send` hands them back for inspection.

use crate::diagnostic::DiagnosticKind;
use crate::instance::InstanceId;
use thiserror::Error;

/// Everything that can go wrong while talking to an instance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// The receiver is not a dispatch table
    #[error("Inappropriate receiver object")]
    InvalidReceiver { found: &'static str },

    /// No table in the resolution chain recognizes the selector
    #[error("Message not understood")]
    MessageNotUnderstood { selector: String },

    /// An inherited operation sent to self after the outermost instance
    /// it was wired to had been dropped
    #[error("self was released: instance {id} no longer exists")]
    SelfReleased { id: InstanceId },

    /// A final class was offered as a parent
    #[error("final class cannot be inherited: {info}")]
    FinalClassViolation { info: String },

    /// An operation or constructor got arguments it cannot use
    #[error("bad arguments to {selector}: {reason}")]
    InvalidArguments { selector: String, reason: String },

    /// No constructor registered under this name
    #[error("unknown class: {0}")]
    UnknownClass(String),
}

impl ObjectError {
    /// Shorthand used by operations validating their inputs
    pub fn bad_args(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Diagnostic category for journaling
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::InvalidReceiver { .. } => DiagnosticKind::InvalidReceiver,
            Self::MessageNotUnderstood { .. } => DiagnosticKind::MessageNotUnderstood,
            Self::SelfReleased { .. } => DiagnosticKind::SelfReleased,
            Self::FinalClassViolation { .. } => DiagnosticKind::FinalClassViolation,
            Self::InvalidArguments { .. } => DiagnosticKind::InvalidArguments,
            Self::UnknownClass(_) => DiagnosticKind::UnknownClass,
        }
    }
}
