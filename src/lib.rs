// Copyright 2025 Cowboy AI, LLC.

//! # Maker
//!
//! Composable behavior bundles: declare reusable units of behavior
//! ("Makers"), combine them through inheritance and mixin composition, and
//! produce live instances whose behavior is assembled from those bundles.
//!
//! This crate provides the fundamental building blocks:
//! - **Maker**: A composable unit holding a named behavior table and an
//!   ordered list of initializers
//! - **Behavior Slots**: Tagged slots that are either concrete behaviors
//!   (methods or data values) or outstanding capability requirements
//! - **Capability Requirements**: Placeholders marking behaviors that must be
//!   supplied with a concrete value before instantiation succeeds
//! - **Composition**: `inherit` (in-place merge with override rules) and
//!   `mixin` (pure composition producing a fresh Maker)
//! - **Instances**: Objects created from a Maker, resolving behavior through
//!   single-level delegation to the Maker's flattened behavior table
//!
//! ## Design Principles
//!
//! 1. **Explicit Slots**: Requirements are a tagged union variant, not
//!    sentinel values compared by identity
//! 2. **Flattened Delegation**: `inherit` flattens ancestor behaviors into
//!    the target at composition time; instances resolve through exactly one
//!    table, never a chain
//! 3. **Self Wins**: A concrete behavior already owned by a Maker is never
//!    overwritten by composition; only requirement placeholders are
//!    overridable
//! 4. **Checked Instantiation**: `create` refuses to produce an instance
//!    while any capability requirement is outstanding
//! 5. **Instance Independence**: Instances snapshot the behavior table at
//!    creation; later composition only affects subsequent `create` calls
//!
//! ## Example
//!
//! ```
//! use maker::{make, Bundle, CapabilityKind, Part, Value};
//!
//! let mut greeter = make([Part::from(
//!     Bundle::new()
//!         .required("name", CapabilityKind::String)
//!         .method("greet", |instance, _args| {
//!             let name = instance.get("name").cloned().unwrap_or(Value::Null);
//!             Ok(Value::String(format!("hello, {name}")))
//!         }),
//! )]);
//!
//! // The `name` requirement is still outstanding.
//! assert!(greeter.create().is_err());
//!
//! greeter.value("name", "world");
//! let mut instance = greeter.create().unwrap();
//! assert!(instance.call("greet", &[]).is_ok());
//! ```

#![warn(missing_docs)]

mod behavior;
mod capability;
mod errors;
mod instance;
mod maker;

pub use behavior::{Behavior, BehaviorSlot, Bundle, InitFn, MethodFn, Options, Part};
pub use capability::{required, CapabilityKind};
pub use errors::{MakeError, MakeResult};
pub use instance::Instance;
pub use maker::{make, mixin, Constructor, Maker, MakerSource};

// The dynamic value type used for data behaviors, own properties, and options.
pub use serde_json::Value;
