// Copyright 2025 Cowboy AI, LLC.

//! Instances produced by [`Maker::create`](crate::Maker::create)
//!
//! An instance owns its own property map and holds a shared, read-only
//! reference to the flattened behavior table of the Maker that created it.
//! Resolution is single-level: a name not found among the instance's own
//! properties resolves through the table, never through a deeper chain.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::behavior::{Behavior, BehaviorSlot};
use crate::errors::{MakeError, MakeResult};

/// An object whose behavior resolves through its originating Maker
///
/// Instances are independent of each other and of the Maker: own-property
/// mutation never affects another instance, and composition applied to the
/// Maker after creation never changes an existing instance's behavior table.
pub struct Instance {
    own: IndexMap<String, Value>,
    behaviors: Arc<IndexMap<String, BehaviorSlot>>,
}

impl Instance {
    pub(crate) fn new(behaviors: Arc<IndexMap<String, BehaviorSlot>>) -> Self {
        Self {
            own: IndexMap::new(),
            behaviors,
        }
    }

    /// Resolve a data value: own properties first, then the Maker's
    /// data behaviors
    ///
    /// Method behaviors are not data; they dispatch through [`call`] and
    /// resolve to `None` here.
    ///
    /// [`call`]: Instance::call
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.own.get(name) {
            return Some(value);
        }
        match self.behaviors.get(name) {
            Some(BehaviorSlot::Concrete(Behavior::Value(value))) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to an own property
    ///
    /// Delegated data behaviors are shared with the Maker and other
    /// instances, so they are not reachable here; assign an own property
    /// with [`set`] to shadow one.
    ///
    /// [`set`]: Instance::set
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.own.get_mut(name)
    }

    /// Assign an own property, shadowing any delegated behavior of the
    /// same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.own.insert(name.into(), value.into());
    }

    /// Whether a name resolves on this instance, as an own property or
    /// through delegation
    pub fn has(&self, name: &str) -> bool {
        self.own.contains_key(name) || self.behaviors.contains_key(name)
    }

    /// Invoke a method behavior by name
    ///
    /// # Errors
    ///
    /// [`MakeError::UnknownBehavior`] if nothing resolves for `name`, and
    /// [`MakeError::NotCallable`] if it resolves to a data value.
    pub fn call(&mut self, name: &str, args: &[Value]) -> MakeResult<Value> {
        let method = match self.behaviors.get(name) {
            Some(BehaviorSlot::Concrete(Behavior::Method(f))) => Arc::clone(f),
            Some(_) => return Err(MakeError::NotCallable(name.to_string())),
            None if self.own.contains_key(name) => {
                return Err(MakeError::NotCallable(name.to_string()));
            }
            None => return Err(MakeError::UnknownBehavior(name.to_string())),
        };
        method(self, args)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own: Vec<&str> = self.own.keys().map(String::as_str).collect();
        let delegated: Vec<&str> = self.behaviors.keys().map(String::as_str).collect();
        f.debug_struct("Instance")
            .field("own", &own)
            .field("delegated", &delegated)
            .finish()
    }
}
