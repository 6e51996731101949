//! Type references and composed-type metadata.
//!
//! A [`CodeType`] names a type and may carry a **weak** reference to the element that defines it. The reference is
//! a lookup relation, never an ownership edge: it may cross namespaces and two models may reference each other.

use serde::{Deserialize, Serialize};

use crate::dom::ElementId;

/// Collection shape of a type reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollectionKind {
    #[default]
    None,
    Array,
    Complex,
}

/// A reference to a type by name.
///
/// ## Notes
/// - `is_external` marks target-runtime built-ins that are not defined in the CodeDOM; external types never carry a
///   `definition`.
/// - `action_of` marks configuration callbacks (`func(*Config)` style parameters).
/// - `composed` holds the members of an inline union or intersection until a wrapper class replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeType {
    pub name: String,
    #[serde(default = "default_nullable")]
    pub is_nullable: bool,
    #[serde(default)]
    pub collection: CollectionKind,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub action_of: bool,
    #[serde(default)]
    pub definition: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composed: Option<Box<ComposedType>>,
}

fn default_nullable() -> bool {
    true
}

impl CodeType {
    /// A nullable, non-collection reference without definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nullable: true,
            collection: CollectionKind::None,
            is_external: false,
            action_of: false,
            definition: None,
            composed: None,
        }
    }

    /// A reference to a target-runtime built-in.
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            is_external: true,
            ..Self::new(name)
        }
    }

    /// A reference to an element defined in the tree.
    pub fn defined_by(name: impl Into<String>, definition: ElementId) -> Self {
        Self {
            definition: Some(definition),
            ..Self::new(name)
        }
    }

    /// An inline union or intersection named `name`.
    pub fn composed_of(name: impl Into<String>, composed: ComposedType) -> Self {
        Self {
            composed: Some(Box::new(composed)),
            ..Self::new(name)
        }
    }

    /// `void`, used as the return type of constructors and setters.
    pub fn void() -> Self {
        Self::external("void").nullable(false)
    }

    pub fn nullable(mut self, is_nullable: bool) -> Self {
        self.is_nullable = is_nullable;
        self
    }

    pub fn array(mut self) -> Self {
        self.collection = CollectionKind::Array;
        self
    }

    pub fn action_of(mut self) -> Self {
        self.action_of = true;
        self
    }

    pub fn is_collection(&self) -> bool {
        self.collection != CollectionKind::None
    }

    /// Compare the name case-insensitively (ASCII), the way the model builder's names are matched.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// This reference followed by the members of its inline composed type, if any.
    pub fn with_members(&self) -> impl Iterator<Item = &CodeType> {
        std::iter::once(self).chain(self.composed.iter().flat_map(|composed| composed.types.iter()))
    }
}

/// A `key -> type` entry of a discriminator mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorMapping {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: CodeType,
}

/// Metadata used to pick a concrete model when deserializing a polymorphic value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscriminatorInformation {
    #[serde(default)]
    pub property_name: String,
    #[serde(default)]
    pub mappings: Vec<DiscriminatorMapping>,
}

impl DiscriminatorInformation {
    /// A property name and at least one mapping.
    pub fn has_basic_information(&self) -> bool {
        !self.property_name.is_empty() && !self.mappings.is_empty()
    }

    pub fn add_mapping(&mut self, key: impl Into<String>, ty: CodeType) {
        self.mappings.push(DiscriminatorMapping { key: key.into(), ty });
    }
}

/// Union (`oneOf`) or intersection (`allOf`/`anyOf`) of member types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComposedKind {
    Union,
    Intersection,
}

/// The composed type a wrapper class was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedType {
    pub kind: ComposedKind,
    pub types: Vec<CodeType>,
    #[serde(default)]
    pub discriminator: DiscriminatorInformation,
}

impl ComposedType {
    /// At least one member is defined in the tree.
    pub fn has_internal_member(&self) -> bool {
        self.types.iter().any(|t| !t.is_external)
    }
}
