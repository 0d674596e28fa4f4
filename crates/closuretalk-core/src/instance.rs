//! Instances are dispatch tables
//!
//! An `Instance` is nothing but a closure from selector to operation plus
//! an identity. All state lives in whatever the closure captured; the only
//! way in is a message.

use crate::dispatch;
use crate::error::ObjectError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// An operation bound to the state of the instance that produced it
pub type Operation = Rc<dyn Fn(&[Value]) -> Result<Value, ObjectError>>;

type Table = dyn Fn(&str) -> Option<Operation>;

/// Unique identifier for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub Uuid);

impl InstanceId {
    /// Create a new unique instance ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dispatch table: selector in, operation (or nothing) out
#[derive(Clone)]
pub struct Instance {
    id: InstanceId,
    table: Rc<Table>,
}

impl Instance {
    /// Wrap a lookup closure. Probing a selector must not have side effects.
    pub fn from_fn<F>(table: F) -> Self
    where
        F: Fn(&str) -> Option<Operation> + 'static,
    {
        Self {
            id: InstanceId::new(),
            table: Rc::new(table),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Query this table (and, inside it, its own supers) for a selector
    pub fn lookup(&self, selector: &str) -> Option<Operation> {
        (self.table)(selector)
    }

    /// Does anything in this table's chain recognize the selector?
    pub fn responds_to(&self, selector: &str) -> bool {
        self.lookup(selector).is_some()
    }

    pub fn downgrade(&self) -> WeakInstance {
        WeakInstance {
            id: self.id,
            table: Rc::downgrade(&self.table),
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Instance {}

impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.id.0).finish()
    }
}

/// Non-owning handle to an instance
#[derive(Clone)]
pub struct WeakInstance {
    id: InstanceId,
    table: Weak<Table>,
}

impl WeakInstance {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn upgrade(&self) -> Option<Instance> {
        self.table.upgrade().map(|table| Instance { id: self.id, table })
    }
}

/// The rebindable `self` an instance's operations send to.
///
/// Starts out pointing at the instance's own table and is rewritten by
/// `set-self!` to the outermost instance. Held weakly: an instance that
/// refers to itself does not keep itself alive. The flip side is that a
/// parent kept past its outermost instance has no self left to talk to;
/// sends through the cell then fail with `SelfReleased`.
#[derive(Clone, Default)]
pub struct SelfCell(Rc<RefCell<Option<WeakInstance>>>);

impl SelfCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point this cell at `target`
    pub fn bind(&self, target: &Instance) {
        *self.0.borrow_mut() = Some(target.downgrade());
    }

    /// Current self, if bound and still alive
    pub fn get(&self) -> Option<Instance> {
        self.0.borrow().as_ref().and_then(WeakInstance::upgrade)
    }

    /// Current self as a message receiver; nil when unbound or dropped
    pub fn value(&self) -> Value {
        self.get().map_or(Value::Nil, Value::Object)
    }

    pub fn points_to(&self, instance: &Instance) -> bool {
        self.0
            .borrow()
            .as_ref()
            .is_some_and(|weak| weak.id() == instance.id())
    }

    /// Send a message to whatever self currently is
    pub fn send(&self, selector: &str, args: &[Value]) -> Result<Value, ObjectError> {
        let target = match self.0.borrow().as_ref() {
            Some(weak) => weak
                .upgrade()
                .ok_or(ObjectError::SelfReleased { id: weak.id() })?,
            None => return dispatch::try_send(&Value::Nil, selector, args),
        };
        dispatch::try_send(&Value::Object(target), selector, args)
    }
}

impl fmt::Debug for SelfCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.borrow().as_ref() {
            Some(weak) => write!(f, "SelfCell({})", weak.id()),
            None => write!(f, "SelfCell(unbound)"),
        }
    }
}
