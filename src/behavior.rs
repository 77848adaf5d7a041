// Copyright 2025 Cowboy AI, LLC.

//! Behavior slots, bundles, and construction parts
//!
//! A behavior is a named value held by a Maker: either a callable method
//! dispatched through the instance or a plain data value resolved through
//! delegation. Each table slot is a tagged union, `Concrete` or `Required`,
//! so outstanding capability requirements are explicit states rather than
//! magic sentinel values.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::capability::CapabilityKind;
use crate::errors::MakeResult;
use crate::instance::Instance;

/// Configuration mapping passed to initializers at `create` time
pub type Options = serde_json::Map<String, Value>;

/// A callable behavior: receives the instance and the call arguments
pub type MethodFn = Arc<dyn Fn(&mut Instance, &[Value]) -> MakeResult<Value> + Send + Sync>;

/// An initializer run against a freshly created instance
///
/// Initializers are deduplicated by `Arc` identity during composition:
/// inheriting the same source twice contributes its initializers once.
pub type InitFn = Arc<dyn Fn(&mut Instance, &Options) -> MakeResult<()> + Send + Sync>;

/// A concrete behavior value held by a Maker
#[derive(Clone)]
pub enum Behavior {
    /// A callable method, dispatched via [`Instance::call`]
    Method(MethodFn),
    /// A plain data value, resolved via [`Instance::get`] delegation
    Value(Value),
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Method(_) => f.write_str("Method(..)"),
            Behavior::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

/// One slot in a behavior table
///
/// Either a concrete behavior or an outstanding capability requirement. A
/// `Required` slot must be replaced with a `Concrete` one (via `method`,
/// `value`, a bundle, or `inherit`) before instantiation succeeds.
#[derive(Clone)]
pub enum BehaviorSlot {
    /// A concrete method or data value
    Concrete(Behavior),
    /// A placeholder that must be supplied before `create`
    Required(CapabilityKind),
}

impl BehaviorSlot {
    /// Build a concrete method slot
    pub fn method(
        f: impl Fn(&mut Instance, &[Value]) -> MakeResult<Value> + Send + Sync + 'static,
    ) -> Self {
        BehaviorSlot::Concrete(Behavior::Method(Arc::new(f)))
    }

    /// Build a concrete data-value slot
    pub fn value(value: impl Into<Value>) -> Self {
        BehaviorSlot::Concrete(Behavior::Value(value.into()))
    }

    /// Whether this slot is an outstanding requirement
    pub fn is_required(&self) -> bool {
        matches!(self, BehaviorSlot::Required(_))
    }

    /// The required capability kind, if this slot is a requirement
    pub fn required_kind(&self) -> Option<CapabilityKind> {
        match self {
            BehaviorSlot::Required(kind) => Some(*kind),
            BehaviorSlot::Concrete(_) => None,
        }
    }
}

impl fmt::Debug for BehaviorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BehaviorSlot::Concrete(behavior) => {
                f.debug_tuple("Concrete").field(behavior).finish()
            }
            BehaviorSlot::Required(kind) => f.debug_tuple("Required").field(kind).finish(),
        }
    }
}

/// An ordered, named collection of behavior slots
///
/// The declaration-order equivalent of a behavior-bundle literal. Keys are
/// unique; declaring a name twice within one bundle overwrites the earlier
/// slot. Insertion order is preserved, which keeps requirement validation
/// deterministic.
///
/// # Examples
///
/// ```
/// use maker::{Bundle, CapabilityKind, Value};
///
/// let bundle = Bundle::new()
///     .required("every", CapabilityKind::Function)
///     .value("container", Value::Null)
///     .method("some", |_instance, _args| Ok(Value::Bool(true)));
///
/// assert_eq!(bundle.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Bundle {
    slots: IndexMap<String, BehaviorSlot>,
}

impl Bundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a method behavior
    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Instance, &[Value]) -> MakeResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.slots.insert(name.into(), BehaviorSlot::method(f));
        self
    }

    /// Declare a data-value behavior
    pub fn value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), BehaviorSlot::value(value));
        self
    }

    /// Declare an outstanding capability requirement
    pub fn required(mut self, name: impl Into<String>, kind: CapabilityKind) -> Self {
        self.slots.insert(name.into(), BehaviorSlot::Required(kind));
        self
    }

    /// Declare a pre-built slot
    pub fn slot(mut self, name: impl Into<String>, slot: BehaviorSlot) -> Self {
        self.slots.insert(name.into(), slot);
        self
    }

    /// Number of slots in the bundle
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bundle holds no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over the slots in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BehaviorSlot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }
}

impl IntoIterator for Bundle {
    type Item = (String, BehaviorSlot);
    type IntoIter = indexmap::map::IntoIter<String, BehaviorSlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

/// One argument of the variadic [`make`](crate::make) construction call
///
/// Arguments are processed left to right: bundles are merged into the
/// behavior table, initializers are appended in argument order.
#[derive(Clone)]
pub enum Part {
    /// An initializer to append
    Init(InitFn),
    /// A behavior bundle to merge
    Behaviors(Bundle),
}

impl Part {
    /// Wrap an initializer closure as a construction part
    pub fn init(
        f: impl Fn(&mut Instance, &Options) -> MakeResult<()> + Send + Sync + 'static,
    ) -> Self {
        Part::Init(Arc::new(f))
    }
}

impl From<Bundle> for Part {
    fn from(bundle: Bundle) -> Self {
        Part::Behaviors(bundle)
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Init(_) => f.write_str("Init(..)"),
            Part::Behaviors(bundle) => f.debug_tuple("Behaviors").field(bundle).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bundle_preserves_declaration_order() {
        let bundle = Bundle::new()
            .value("first", 1)
            .value("second", 2)
            .required("third", CapabilityKind::Number);

        let names: Vec<&str> = bundle.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_bundle_overwrites_duplicate_names() {
        let bundle = Bundle::new()
            .required("size", CapabilityKind::Number)
            .value("size", 3);

        assert_eq!(bundle.len(), 1);
        let (_, slot) = bundle.iter().next().unwrap();
        assert!(!slot.is_required());
    }

    #[test]
    fn test_bundle_accepts_prebuilt_slots() {
        let bundle = Bundle::new()
            .slot("every", crate::capability::required("function"))
            .slot("items", BehaviorSlot::value(json!([])))
            .slot("first", BehaviorSlot::method(|instance, _| {
                Ok(instance.get("items").cloned().unwrap_or(Value::Null))
            }));

        assert_eq!(bundle.len(), 3);
        let kinds: Vec<Option<CapabilityKind>> = bundle
            .iter()
            .map(|(_, slot)| slot.required_kind())
            .collect();
        assert_eq!(kinds, vec![Some(CapabilityKind::Function), None, None]);
    }

    #[test]
    fn test_slot_required_kind() {
        let required = BehaviorSlot::Required(CapabilityKind::Array);
        assert!(required.is_required());
        assert_eq!(required.required_kind(), Some(CapabilityKind::Array));

        let concrete = BehaviorSlot::value(json!([]));
        assert!(!concrete.is_required());
        assert_eq!(concrete.required_kind(), None);
    }

    #[test]
    fn test_debug_hides_closures() {
        let slot = BehaviorSlot::method(|_, _| Ok(Value::Null));
        assert_eq!(format!("{slot:?}"), "Concrete(Method(..))");

        let part = Part::init(|_, _| Ok(()));
        assert_eq!(format!("{part:?}"), "Init(..)");
    }
}
