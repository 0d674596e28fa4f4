//! ClosureTalk Core
//!
//! A runtime object model built only from closures and message sends:
//! - Instances are dispatch tables (selector in, operation out)
//! - Multiple inheritance as an ordered list of parent instances
//! - A final-class guard applied while the parent list is built
//! - A rebindable `self` propagated through the whole ancestor chain,
//!   which is what makes inherited operations dispatch virtually

pub mod class;
pub mod diagnostic;
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod instance;
pub mod message;
pub mod runtime;
pub mod supers;
pub mod value;

pub use class::ClassBuilder;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use dispatch::{resolve, send, send_message, send_to_all, try_send};
pub use error::ObjectError;
pub use factory::{new_instance, wire_self, Constructor};
pub use instance::{Instance, InstanceId, Operation, SelfCell, WeakInstance};
pub use message::Message;
pub use runtime::{Runtime, RuntimeConfig, RuntimeStats};
pub use supers::Supers;
pub use value::Value;
