// Copyright 2025 Cowboy AI, LLC.

//! Makers: composable units of named behaviors and initializers
//!
//! A Maker holds a flattened behavior table and an ordered list of
//! initializers. It is built once, optionally composed with other Makers
//! (`inherit`, `mixin`), optionally extended with individual methods and
//! initializers, and then instantiated any number of times with `create`.
//!
//! Composition is flattening: `inherit` merges ancestor behaviors into the
//! target at composition time, so instances resolve through exactly one
//! table. The override policy is "self wins": a concrete behavior already
//! owned by the target is never overwritten, while a requirement placeholder
//! is always overridable by an inherited value.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use indexmap::IndexMap;

use crate::behavior::{BehaviorSlot, Bundle, InitFn, Options, Part};
use crate::capability::CapabilityKind;
use crate::errors::{MakeError, MakeResult};
use crate::instance::Instance;

/// A composable unit of reusable behavior
///
/// # Examples
///
/// ```
/// use maker::{make, mixin, Bundle, Part, Value};
///
/// let counter = make([
///     Part::init(|instance, _options| {
///         instance.set("count", 0);
///         Ok(())
///     }),
///     Part::from(Bundle::new().method("increment", |instance, _args| {
///         let count = instance.get("count").and_then(Value::as_i64).unwrap_or(0);
///         instance.set("count", count + 1);
///         Ok(Value::from(count + 1))
///     })),
/// ]);
///
/// let mut doubler = mixin([&counter]).unwrap();
/// doubler.method("double", |instance, _args| {
///     instance.call("increment", &[])?;
///     instance.call("increment", &[])
/// });
///
/// let mut instance = doubler.create().unwrap();
/// assert_eq!(instance.call("double", &[]).unwrap(), Value::from(2));
/// ```
#[derive(Clone, Default)]
pub struct Maker {
    behaviors: Arc<IndexMap<String, BehaviorSlot>>,
    initializers: Vec<InitFn>,
    validated: bool,
}

/// A source of behaviors for [`Maker::inherit`] and [`mixin`]
///
/// Implemented for `&Maker` and for `Option<&Maker>`, so composition can
/// consume both direct references and fallible lookups (e.g. from a map of
/// named Makers). An absent source fails composition with
/// [`MakeError::UndefinedMaker`].
pub trait MakerSource {
    /// Resolve to a Maker, or `None` when the reference is absent
    fn resolve(&self) -> Option<&Maker>;
}

impl MakerSource for &Maker {
    fn resolve(&self) -> Option<&Maker> {
        Some(*self)
    }
}

impl MakerSource for Option<&Maker> {
    fn resolve(&self) -> Option<&Maker> {
        *self
    }
}

/// A constructor-style declaration: an initializer with an attached
/// behavior bundle
///
/// Carrier type for [`Maker::from_constructor`], mirroring the classic
/// constructor-function-plus-prototype declaration shape.
pub struct Constructor {
    /// The constructor-style initializer
    pub init: InitFn,
    /// The behaviors attached to the constructor
    pub behaviors: Bundle,
}

impl Constructor {
    /// Pair an initializer closure with its behavior bundle
    pub fn new(
        init: impl Fn(&mut Instance, &Options) -> MakeResult<()> + Send + Sync + 'static,
        behaviors: Bundle,
    ) -> Self {
        Self {
            init: Arc::new(init),
            behaviors,
        }
    }
}

/// Make a new Maker from initializers and behavior bundles
///
/// Parts are processed left to right: bundles are merged into the behavior
/// table (later bundle keys overwrite earlier ones within this single call),
/// initializers are appended in argument order. The result is unvalidated.
///
/// # Examples
///
/// ```
/// use maker::{make, Bundle, Part};
///
/// let maker = make([
///     Part::init(|instance, _options| {
///         instance.set("items", serde_json::json!([]));
///         Ok(())
///     }),
///     Part::from(Bundle::new().value("capacity", 16)),
/// ]);
/// assert_eq!(maker.behavior_count(), 1);
/// assert_eq!(maker.initializer_count(), 1);
/// ```
pub fn make<I>(parts: I) -> Maker
where
    I: IntoIterator<Item = Part>,
{
    let mut behaviors = IndexMap::new();
    let mut initializers: Vec<InitFn> = Vec::new();

    for part in parts {
        match part {
            Part::Behaviors(bundle) => {
                for (name, slot) in bundle {
                    behaviors.insert(name, slot);
                }
            }
            Part::Init(init) => initializers.push(init),
        }
    }

    Maker {
        behaviors: Arc::new(behaviors),
        initializers,
        validated: false,
    }
}

/// Make a new Maker which is a mixin of the given Makers
///
/// Pure composition: a freshly constructed empty Maker inherits from every
/// source in argument order; the sources themselves are never mutated.
///
/// # Errors
///
/// [`MakeError::UndefinedMaker`] if any source is absent.
pub fn mixin<S, I>(sources: I) -> MakeResult<Maker>
where
    S: MakerSource,
    I: IntoIterator<Item = S>,
{
    let mut maker = Maker::new();
    maker.inherit(sources)?;
    Ok(maker)
}

impl Maker {
    /// Create an empty, unvalidated Maker
    pub fn new() -> Self {
        Self::default()
    }

    /// Legacy two-argument construction: a constructor-style initializer
    /// plus its method bundle
    pub fn with_init(
        init: impl Fn(&mut Instance, &Options) -> MakeResult<()> + Send + Sync + 'static,
        behaviors: Bundle,
    ) -> Self {
        let init: InitFn = Arc::new(init);
        make([Part::Init(init), Part::Behaviors(behaviors)])
    }

    /// Build a Maker from a constructor-style declaration
    pub fn from_constructor(ctor: Constructor) -> Self {
        make([Part::Init(ctor.init), Part::Behaviors(ctor.behaviors)])
    }

    /// Whether requirement validation has run and found no outstanding
    /// placeholders since the last mutation
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Look up a behavior slot by name
    pub fn behavior(&self, name: &str) -> Option<&BehaviorSlot> {
        self.behaviors.get(name)
    }

    /// Whether a behavior with the given name exists (concrete or required)
    pub fn has_behavior(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    /// Behavior names in table order
    pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    /// Number of behavior slots, outstanding requirements included
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Number of registered initializers
    pub fn initializer_count(&self) -> usize {
        self.initializers.len()
    }

    /// Inherit behaviors and initializers from other Makers
    ///
    /// For each source, in argument order:
    /// - a behavior key is copied only if the target does not own it, or the
    ///   target's slot for it is a requirement placeholder; an existing
    ///   concrete value on the target always wins
    /// - each source initializer not already present (by identity) is
    ///   prepended, so composing ancestors in sequence executes the farthest
    ///   ancestor's initializer first
    ///
    /// When two sources in the same call both supply a concrete value for a
    /// key the target lacks, the first-listed source wins.
    ///
    /// Any `inherit` call invalidates previous requirement validation; the
    /// next `create` re-checks the merged table.
    ///
    /// # Errors
    ///
    /// [`MakeError::UndefinedMaker`] if any source is absent. Sources before
    /// the absent one have already been merged.
    pub fn inherit<S, I>(&mut self, sources: I) -> MakeResult<&mut Self>
    where
        S: MakerSource,
        I: IntoIterator<Item = S>,
    {
        self.validated = false;

        for source in sources {
            let source = source.resolve().ok_or(MakeError::UndefinedMaker)?;
            self.merge_from(source);
        }

        Ok(self)
    }

    /// Add a method behavior, overwriting any existing slot of that name
    pub fn method(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&mut Instance, &[Value]) -> MakeResult<Value> + Send + Sync + 'static,
    ) -> &mut Self {
        self.set_slot(name.into(), BehaviorSlot::method(f))
    }

    /// Add a data-value behavior, overwriting any existing slot of that name
    pub fn value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.set_slot(name.into(), BehaviorSlot::value(value))
    }

    /// Mark a behavior as a required capability
    pub fn require(&mut self, name: impl Into<String>, kind: CapabilityKind) -> &mut Self {
        self.set_slot(name.into(), BehaviorSlot::Required(kind))
    }

    /// Append an initializer
    pub fn initer(
        &mut self,
        f: impl Fn(&mut Instance, &Options) -> MakeResult<()> + Send + Sync + 'static,
    ) -> &mut Self {
        let init: InitFn = Arc::new(f);
        self.initializers.push(init);
        self.validated = false;
        self
    }

    /// Create an instance with empty options
    ///
    /// # Errors
    ///
    /// See [`create_with`](Maker::create_with).
    pub fn create(&mut self) -> MakeResult<Instance> {
        self.create_with(Options::new())
    }

    /// Create an instance, passing `options` to every initializer
    ///
    /// Validates outstanding requirements first (cached across calls until
    /// the next mutation), then allocates an instance delegating to this
    /// Maker's behavior table and runs all initializers against it in stored
    /// order. Later initializers observe earlier initializers' assignments.
    ///
    /// # Errors
    ///
    /// [`MakeError::MissingRequirement`] when a capability requirement is
    /// outstanding; the Maker stays unvalidated and retryable. Any error
    /// from an initializer propagates unchanged and the partially built
    /// instance is discarded.
    pub fn create_with(&mut self, options: Options) -> MakeResult<Instance> {
        if !self.validated {
            self.validate_requirements()?;
        }

        trace!(
            behaviors = self.behaviors.len(),
            initializers = self.initializers.len(),
            "creating instance"
        );

        let mut instance = Instance::new(Arc::clone(&self.behaviors));
        for init in &self.initializers {
            init(&mut instance, &options)?;
        }

        Ok(instance)
    }

    /// Insert or overwrite one slot; any mutation invalidates previous
    /// requirement validation.
    fn set_slot(&mut self, name: String, slot: BehaviorSlot) -> &mut Self {
        Arc::make_mut(&mut self.behaviors).insert(name, slot);
        self.validated = false;
        self
    }

    /// Merge one source: behaviors under the override policy, initializers
    /// deduplicated by identity and prepended.
    fn merge_from(&mut self, source: &Maker) {
        let table = Arc::make_mut(&mut self.behaviors);
        let mut copied = 0usize;

        for (name, slot) in source.behaviors.iter() {
            let overridable = match table.get(name) {
                None => true,
                Some(existing) => existing.is_required(),
            };
            if overridable {
                table.insert(name.clone(), slot.clone());
                copied += 1;
            }
        }

        for init in &source.initializers {
            if !self.initializers.iter().any(|f| Arc::ptr_eq(f, init)) {
                self.initializers.insert(0, Arc::clone(init));
            }
        }

        debug!(
            copied,
            table = table.len(),
            initializers = self.initializers.len(),
            "inherited maker"
        );
    }

    /// Fail fast on the first outstanding requirement, in table order
    fn validate_requirements(&mut self) -> MakeResult<()> {
        for (name, slot) in self.behaviors.iter() {
            if let BehaviorSlot::Required(kind) = slot {
                return Err(MakeError::MissingRequirement {
                    kind: *kind,
                    name: name.clone(),
                });
            }
        }
        self.validated = true;
        Ok(())
    }
}

impl fmt::Debug for Maker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let behaviors: Vec<&str> = self.behaviors.keys().map(String::as_str).collect();
        f.debug_struct("Maker")
            .field("behaviors", &behaviors)
            .field("initializers", &self.initializers.len())
            .field("validated", &self.validated)
            .finish()
    }
}
