//! Messages - selectors plus arguments
//!
//! Selectors are an open set of atoms. The handful every class must answer
//! get their own variants; everything else goes through `Send`.

use crate::value::Value;
use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rebind self to the outermost instance and fan out to the supers
pub const SET_SELF: &str = "set-self!";
/// Whether the class refuses to be a parent
pub const FINAL: &str = "final?";
/// The class's type tag
pub const TYPE: &str = "type";
/// Human-readable description used in diagnostics
pub const INFO: &str = "info";

/// Pre-compiled message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    /// `set-self! outer`
    SetSelf(Value),

    /// `final?`
    IsFinal,

    /// `type`
    Type,

    /// `info`
    Info,

    /// Any class-specific message
    Send { selector: String, args: Vec<Value> },
}

impl Message {
    /// Build a message, folding kernel selectors into their variants
    pub fn new(selector: impl Into<String>, args: Vec<Value>) -> Self {
        let selector = selector.into();
        match (selector.as_str(), args.len()) {
            (FINAL, 0) => Self::IsFinal,
            (TYPE, 0) => Self::Type,
            (INFO, 0) => Self::Info,
            (SET_SELF, 1) => {
                let mut args = args;
                Self::SetSelf(args.remove(0))
            }
            _ => Self::Send { selector, args },
        }
    }

    /// Parse a message from text (for REPL/debugging).
    ///
    /// The first word is the selector; the rest are literal arguments.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let selector = parts.next().ok_or_else(|| anyhow!("Empty message"))?;
        if selector == SET_SELF {
            bail!("{SET_SELF} takes an object and cannot be parsed from text");
        }

        let args = parts.map(parse_value).collect();
        Ok(Self::new(selector, args))
    }

    /// Get the selector for this message
    pub fn selector(&self) -> &str {
        match self {
            Self::SetSelf(_) => SET_SELF,
            Self::IsFinal => FINAL,
            Self::Type => TYPE,
            Self::Info => INFO,
            Self::Send { selector, .. } => selector,
        }
    }

    /// Arguments in send order
    pub fn args(&self) -> &[Value] {
        match self {
            Self::SetSelf(outer) => std::slice::from_ref(outer),
            Self::IsFinal | Self::Type | Self::Info => &[],
            Self::Send { args, .. } => args,
        }
    }

    pub fn arg_count(&self) -> usize {
        self.args().len()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector())?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Parse a simple value from string
fn parse_value(s: &str) -> Value {
    // Try parsing as number
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f.into());
    }

    match s {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "nil" => Value::Nil,
        _ => s.strip_prefix('#').map_or_else(
            || {
                if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                    Value::String(s[1..s.len() - 1].to_string())
                } else {
                    Value::String(s.to_string())
                }
            },
            |stripped| Value::Symbol(stripped.to_string()),
        ),
    }
}

/// Build a message: `msg!("getx")`, `msg!("add", other)`
#[macro_export]
macro_rules! msg {
    ($selector:expr) => {
        $crate::message::Message::new($selector, ::std::vec::Vec::new())
    };

    ($selector:expr, $($arg:expr),+ $(,)?) => {
        $crate::message::Message::new(
            $selector,
            vec![$($crate::value::Value::from($arg)),+],
        )
    };
}
