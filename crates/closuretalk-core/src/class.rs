//! Class authoring
//!
//! A class is just a constructor function that returns a dispatch table.
//! `ClassBuilder` assembles that table: the class's own operations, looked
//! up first, then its supers in order. Every table it builds answers the
//! kernel messages `set-self!`, `final?` and `type`.
//!
//! ```ignore
//! fn counter(start: i64) -> Instance {
//!     let class = ClassBuilder::new("counter");
//!     let me = class.self_cell();
//!     class
//!         .method("value", move |_| Ok(Value::from(start)))
//!         .method("next", move |_| {
//!             let value = me.send("value", &[])?;
//!             Ok(Value::from(value.as_i64().unwrap_or_default() + 1))
//!         })
//!         .build()
//! }
//! ```

use crate::error::ObjectError;
use crate::instance::{Instance, Operation, SelfCell};
use crate::message::{FINAL, SET_SELF, TYPE};
use crate::supers::Supers;
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Collects a class's operations and parents, then builds an instance
pub struct ClassBuilder {
    name: String,
    is_final: bool,
    supers: Supers,
    me: SelfCell,
    methods: HashMap<String, Operation>,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_final: false,
            supers: Supers::none(),
            me: SelfCell::new(),
            methods: HashMap::new(),
        }
    }

    /// Mark the class as unusable as a parent
    #[must_use]
    pub fn final_class(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Parents consulted, in order, when a selector is not defined here
    #[must_use]
    pub fn inherits(mut self, supers: Supers) -> Self {
        self.supers = supers;
        self
    }

    /// The self this class's operations should send to
    pub fn self_cell(&self) -> SelfCell {
        self.me.clone()
    }

    /// Define an operation. A later definition of the same selector wins.
    #[must_use]
    pub fn method<F>(mut self, selector: impl Into<String>, op: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, ObjectError> + 'static,
    {
        self.methods.insert(selector.into(), Rc::new(op));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Finish the table. Self points at the new instance until a factory
    /// rebinds it.
    pub fn build(self) -> Instance {
        let Self {
            name,
            is_final,
            supers,
            me,
            mut methods,
        } = self;

        methods.entry(TYPE.to_string()).or_insert_with(|| {
            let tag = Value::Symbol(name.clone());
            Rc::new(move |_: &[Value]| Ok(tag.clone()))
        });
        methods
            .entry(FINAL.to_string())
            .or_insert_with(|| Rc::new(move |_: &[Value]| Ok(Value::Boolean(is_final))));
        methods.insert(SET_SELF.to_string(), set_self(&me, &supers));

        tracing::debug!(class = %name, parents = supers.len(), "class instance built");

        let instance = Instance::from_fn(move |selector| {
            methods
                .get(selector)
                .cloned()
                .or_else(|| supers.resolve(selector))
        });
        me.bind(&instance);
        instance
    }
}

/// `set-self!`: take the outer instance as self, then pass it up the chain
fn set_self(me: &SelfCell, supers: &Supers) -> Operation {
    let me = me.clone();
    let supers = supers.clone();
    Rc::new(move |args: &[Value]| {
        let Some(outer) = args.first().and_then(Value::as_object) else {
            return Err(ObjectError::bad_args(SET_SELF, "expected an object"));
        };
        me.bind(outer);
        supers.propagate(&args[0]);
        Ok(Value::Nil)
    })
}
