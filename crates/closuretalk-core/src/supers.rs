//! Parent lists and the final-class guard
//!
//! A derived class holds its parents as already-constructed instances and
//! delegates to them. The guard runs once, while the list is being built:
//! any candidate whose class answers `final?` with true is reported and
//! left out. Nothing takes its slot; the list just gets shorter.

use crate::diagnostic;
use crate::dispatch;
use crate::error::ObjectError;
use crate::instance::{Instance, Operation};
use crate::message::{FINAL, INFO, SET_SELF};
use crate::value::Value;

/// Ordered direct parents of an instance, after the final-class check
#[derive(Debug, Clone, Default)]
pub struct Supers(Vec<Instance>);

impl Supers {
    /// No parents
    pub fn none() -> Self {
        Self::default()
    }

    /// Build the parent list from constructed candidates, dropping finals
    pub fn build<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Instance>,
    {
        let parents = candidates
            .into_iter()
            .filter(|candidate| {
                let receiver = Value::from(candidate);
                if dispatch::send(&receiver, FINAL, &[]) != Value::Boolean(true) {
                    return true;
                }

                let info = dispatch::try_send(&receiver, INFO, &[]).unwrap_or_default();
                let err = ObjectError::FinalClassViolation {
                    info: info.to_string(),
                };
                diagnostic::report(&err, FINAL);
                false
            })
            .collect();

        Self(parents)
    }

    /// First parent operation for `selector`, in list order
    pub fn resolve(&self, selector: &str) -> Option<Operation> {
        dispatch::resolve(&self.0, selector)
    }

    /// Rebind every parent's self (and, through them, every ancestor's)
    pub fn propagate(&self, outer: &Value) {
        dispatch::send_to_all(&self.0, SET_SELF, std::slice::from_ref(outer));
    }

    pub fn contains(&self, instance: &Instance) -> bool {
        self.0.contains(instance)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Instance> for Supers {
    fn from_iter<T: IntoIterator<Item = Instance>>(iter: T) -> Self {
        Self::build(iter)
    }
}
