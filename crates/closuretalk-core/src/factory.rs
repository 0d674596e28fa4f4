//! Two-phase construction: build, then wire self
//!
//! A constructor alone leaves every table in the chain sending to itself.
//! Only after `set-self!` has been fanned out from the outermost instance
//! do inherited operations see overrides defined further down.

use crate::dispatch::send;
use crate::error::ObjectError;
use crate::instance::Instance;
use crate::message::SET_SELF;
use crate::value::Value;
use std::rc::Rc;

/// A class: arguments in, freshly built (not yet wired) instance out
pub type Constructor = Rc<dyn Fn(&[Value]) -> Result<Instance, ObjectError>>;

/// Construct through `constructor`, then rebind self across the whole chain
pub fn new_instance<C>(constructor: C, args: &[Value]) -> Result<Instance, ObjectError>
where
    C: FnOnce(&[Value]) -> Result<Instance, ObjectError>,
{
    let instance = constructor(args)?;
    Ok(wire_self(instance))
}

/// Make `instance` the self of itself and every transitive ancestor
pub fn wire_self(instance: Instance) -> Instance {
    let outer = Value::from(&instance);
    send(&outer, SET_SELF, std::slice::from_ref(&outer));
    instance
}
