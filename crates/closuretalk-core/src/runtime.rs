//! Runtime with a class registry and a diagnostics journal
//!
//! The kernel works fine with bare functions; the runtime adds naming,
//! configuration, and a record of what went wrong.

use crate::diagnostic::{self, Diagnostic};
use crate::dispatch;
use crate::error::ObjectError;
use crate::factory::{self, Constructor};
use crate::instance::Instance;
use crate::message::Message;
use crate::value::Value;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

/// Configuration for the runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Rebind self across the ancestor chain after `create`
    pub propagate_self: bool,

    /// Journal failed sends and creations
    pub record_diagnostics: bool,

    /// Oldest journal entries are dropped beyond this
    pub max_diagnostics: Option<usize>,

    /// Emit a trace event for every runtime send
    pub trace_sends: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            propagate_self: true,
            record_diagnostics: true,
            max_diagnostics: Some(1024),
            trace_sends: false,
        }
    }
}

impl RuntimeConfig {
    /// Load from JSON; missing fields take their defaults
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid runtime configuration")
    }
}

/// Named classes plus soft-failure bookkeeping
pub struct Runtime {
    config: RuntimeConfig,
    classes: BTreeMap<String, Constructor>,
    journal: RefCell<VecDeque<Diagnostic>>,
    sends: Cell<u64>,
    failures: Cell<u64>,
}

impl Runtime {
    /// Create a new runtime with the given configuration
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            classes: BTreeMap::new(),
            journal: RefCell::new(VecDeque::new()),
            sends: Cell::new(0),
            failures: Cell::new(0),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Register a constructor under a class name, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&[Value]) -> Result<Instance, ObjectError> + 'static,
    {
        let name = name.into();
        tracing::debug!(class = %name, "registered class");
        self.classes.insert(name, Rc::new(constructor));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }

    /// Instantiate a registered class
    pub fn create(&self, class: &str, args: &[Value]) -> Result<Instance, ObjectError> {
        let result = match self.classes.get(class) {
            Some(constructor) if self.config.propagate_self => {
                factory::new_instance(&**constructor, args)
            }
            Some(constructor) => constructor(args),
            None => Err(ObjectError::UnknownClass(class.to_string())),
        };

        if let Err(err) = &result {
            diagnostic::report(err, class);
            self.record(err, None);
        }
        result
    }

    /// Send a message, reporting failures and yielding nil for them
    pub fn send(&self, receiver: &Value, message: &Message) -> Value {
        self.try_send(receiver, message).unwrap_or_else(|err| {
            diagnostic::report(&err, message.selector());
            Value::Nil
        })
    }

    /// Send a message and return any failure (it is still journaled)
    pub fn try_send(&self, receiver: &Value, message: &Message) -> Result<Value, ObjectError> {
        self.sends.set(self.sends.get() + 1);
        if self.config.trace_sends {
            tracing::trace!(%receiver, %message, "runtime send");
        }

        let result = dispatch::try_send(receiver, message.selector(), message.args());
        if let Err(err) = &result {
            self.record(err, Some(message.selector()));
        }
        result
    }

    fn record(&self, err: &ObjectError, selector: Option<&str>) {
        self.failures.set(self.failures.get() + 1);
        if !self.config.record_diagnostics {
            return;
        }

        let mut journal = self.journal.borrow_mut();
        journal.push_back(Diagnostic::new(err, selector));
        if let Some(max) = self.config.max_diagnostics {
            while journal.len() > max {
                journal.pop_front();
            }
        }
    }

    /// Journaled failures, oldest first
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.journal.borrow().iter().cloned().collect()
    }

    pub fn clear_diagnostics(&self) {
        self.journal.borrow_mut().clear();
    }

    /// Get runtime statistics
    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            classes: self.classes.len(),
            sends: self.sends.get(),
            failures: self.failures.get(),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

/// Runtime statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStats {
    pub classes: usize,
    pub sends: u64,
    pub failures: u64,
}
