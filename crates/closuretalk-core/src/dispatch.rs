//! Message dispatch - resolution and sending
//!
//! Resolution is a first-match walk over an ordered candidate list. Each
//! candidate's own table already falls back to its own supers, so the walk
//! never needs to know how deep the ancestry goes. Repeated ancestors are
//! not merged: a diamond is simply visited along every path, leftmost first.

use crate::diagnostic;
use crate::error::ObjectError;
use crate::instance::{Instance, Operation};
use crate::message::Message;
use crate::value::Value;

/// First operation any candidate yields for `selector`, in list order
pub fn resolve(candidates: &[Instance], selector: &str) -> Option<Operation> {
    candidates
        .iter()
        .find_map(|candidate| candidate.lookup(selector))
}

/// Send a message and hand any failure back to the caller
pub fn try_send(receiver: &Value, selector: &str, args: &[Value]) -> Result<Value, ObjectError> {
    let Value::Object(instance) = receiver else {
        return Err(ObjectError::InvalidReceiver {
            found: receiver.type_name(),
        });
    };

    let operation = resolve(std::slice::from_ref(instance), selector).ok_or_else(|| {
        ObjectError::MessageNotUnderstood {
            selector: selector.to_string(),
        }
    })?;

    tracing::trace!(receiver = %instance.id(), selector, "send");
    operation(args)
}

/// Send a message; failures are reported and yield nil
pub fn send(receiver: &Value, selector: &str, args: &[Value]) -> Value {
    try_send(receiver, selector, args).unwrap_or_else(|err| {
        diagnostic::report(&err, selector);
        Value::Nil
    })
}

/// Send a pre-compiled message
pub fn send_message(receiver: &Value, message: &Message) -> Value {
    send(receiver, message.selector(), message.args())
}

/// Fan a message out to every receiver in order, discarding results.
/// A failure on one receiver does not stop the rest.
pub fn send_to_all(receivers: &[Instance], selector: &str, args: &[Value]) {
    for receiver in receivers {
        send(&Value::from(receiver), selector, args);
    }
}
