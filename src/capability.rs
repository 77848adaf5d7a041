// Copyright 2025 Cowboy AI, LLC.

//! Capability kinds and the requirement registry
//!
//! A capability requirement is a placeholder in a Maker's behavior table
//! marking a behavior that must be supplied with a concrete value before
//! instantiation succeeds. Kinds are plain `Copy` enum values compared by
//! value, replacing the identity-compared sentinel objects this design is
//! usually built on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::behavior::BehaviorSlot;

/// Kind of capability a behavior slot can require
///
/// `Property` is the generic default: parsing an unknown or empty kind name
/// yields `Property` rather than failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// Generic property of any shape (the default kind)
    #[default]
    Property,
    /// A callable method
    Function,
    /// An array value
    Array,
    /// An object value
    Object,
    /// A numeric value
    Number,
    /// A boolean value
    Boolean,
    /// A string value
    String,
}

impl CapabilityKind {
    /// All seven standard kinds, generic `Property` first
    pub const ALL: [CapabilityKind; 7] = [
        CapabilityKind::Property,
        CapabilityKind::Function,
        CapabilityKind::Array,
        CapabilityKind::Object,
        CapabilityKind::Number,
        CapabilityKind::Boolean,
        CapabilityKind::String,
    ];

    /// Parse a kind from its lowercase name
    ///
    /// Unknown or empty names degrade to the generic `Property` kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "function" => CapabilityKind::Function,
            "array" => CapabilityKind::Array,
            "object" => CapabilityKind::Object,
            "number" => CapabilityKind::Number,
            "boolean" => CapabilityKind::Boolean,
            "string" => CapabilityKind::String,
            _ => CapabilityKind::Property,
        }
    }

    /// The lowercase name of this kind, as used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            CapabilityKind::Property => "property",
            CapabilityKind::Function => "function",
            CapabilityKind::Array => "array",
            CapabilityKind::Object => "object",
            CapabilityKind::Number => "number",
            CapabilityKind::Boolean => "boolean",
            CapabilityKind::String => "string",
        }
    }

    /// The requirement slot for this kind
    ///
    /// Property-style accessor mirroring the callable [`required`] form:
    /// `CapabilityKind::Function.required()` marks a slot that must be
    /// supplied with a callable before `create` succeeds.
    pub fn required(self) -> BehaviorSlot {
        BehaviorSlot::Required(self)
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The requirement slot for the named capability kind
///
/// Callable form of the registry. Unknown kind names yield the generic
/// `property` requirement.
///
/// # Examples
///
/// ```
/// use maker::{required, CapabilityKind};
///
/// assert_eq!(
///     required("function").required_kind(),
///     Some(CapabilityKind::Function),
/// );
/// assert_eq!(
///     required("no-such-kind").required_kind(),
///     Some(CapabilityKind::Property),
/// );
/// ```
pub fn required(kind: &str) -> BehaviorSlot {
    CapabilityKind::from_name(kind).required()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("property", CapabilityKind::Property)]
    #[test_case("function", CapabilityKind::Function)]
    #[test_case("array", CapabilityKind::Array)]
    #[test_case("object", CapabilityKind::Object)]
    #[test_case("number", CapabilityKind::Number)]
    #[test_case("boolean", CapabilityKind::Boolean)]
    #[test_case("string", CapabilityKind::String)]
    fn test_from_name_roundtrip(name: &str, kind: CapabilityKind) {
        assert_eq!(CapabilityKind::from_name(name), kind);
        assert_eq!(kind.name(), name);
        assert_eq!(kind.to_string(), name);
    }

    #[test_case(""; "empty name")]
    #[test_case("type"; "reserved word")]
    #[test_case("Function"; "wrong case")]
    fn test_unknown_name_degrades_to_property(name: &str) {
        assert_eq!(CapabilityKind::from_name(name), CapabilityKind::Property);
    }

    #[test]
    fn test_default_is_property() {
        assert_eq!(CapabilityKind::default(), CapabilityKind::Property);
    }

    #[test]
    fn test_registry_lists_all_kinds() {
        assert_eq!(CapabilityKind::ALL.len(), 7);
        for kind in CapabilityKind::ALL {
            assert_eq!(CapabilityKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_required_accessors_agree() {
        for kind in CapabilityKind::ALL {
            assert_eq!(required(kind.name()).required_kind(), Some(kind));
            assert_eq!(kind.required().required_kind(), Some(kind));
        }
    }

    #[test]
    fn test_serde_lowercase_names() {
        let json = serde_json::to_string(&CapabilityKind::Function).unwrap();
        assert_eq!(json, "\"function\"");
        let kind: CapabilityKind = serde_json::from_str("\"array\"").unwrap();
        assert_eq!(kind, CapabilityKind::Array);
    }
}
