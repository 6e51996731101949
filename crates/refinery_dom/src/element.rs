//! Element payloads stored in the arena.
//!
//! Names, descriptions and tree links live on [`crate::Node`]; the structs here only hold what is specific to each
//! category. Parameters, type references and imports are owned by value by the element that declares them.

use serde::{Deserialize, Serialize};

use crate::dom::ElementId;
use crate::kinds::{Access, ClassKind, InterfaceKind, MethodKind, ParameterKind, PropertyKind};
use crate::types::{CodeType, ComposedType, DiscriminatorInformation};
use crate::using::UsingSet;

/// A node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Namespace(CodeNamespace),
    Class(CodeClass),
    Interface(CodeInterface),
    Enum(CodeEnum),
    Method(CodeMethod),
    Property(CodeProperty),
    Indexer(CodeIndexer),
}

/// Category of an element, used in diagnostics and ownership rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementCategory {
    Namespace,
    Class,
    Interface,
    Enum,
    Method,
    Property,
    Indexer,
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ElementCategory::Namespace => "namespace",
            ElementCategory::Class => "class",
            ElementCategory::Interface => "interface",
            ElementCategory::Enum => "enum",
            ElementCategory::Method => "method",
            ElementCategory::Property => "property",
            ElementCategory::Indexer => "indexer",
        };
        f.write_str(label)
    }
}

impl ElementCategory {
    /// Whether an element of this category may own an element of `child`'s category.
    pub fn can_own(self, child: ElementCategory) -> bool {
        use ElementCategory::*;
        match self {
            Namespace => matches!(child, Namespace | Class | Interface | Enum),
            Class => matches!(child, Class | Enum | Method | Property | Indexer),
            Interface => matches!(child, Method),
            Enum | Method | Property | Indexer => false,
        }
    }

    /// Classes, interfaces and enums: the elements a type reference may point at.
    pub fn is_type_definition(self) -> bool {
        matches!(
            self,
            ElementCategory::Class | ElementCategory::Interface | ElementCategory::Enum
        )
    }
}

impl Element {
    pub fn category(&self) -> ElementCategory {
        match self {
            Element::Namespace(_) => ElementCategory::Namespace,
            Element::Class(_) => ElementCategory::Class,
            Element::Interface(_) => ElementCategory::Interface,
            Element::Enum(_) => ElementCategory::Enum,
            Element::Method(_) => ElementCategory::Method,
            Element::Property(_) => ElementCategory::Property,
            Element::Indexer(_) => ElementCategory::Indexer,
        }
    }

    /// Every type reference held by this element.
    pub fn types(&self) -> Vec<&CodeType> {
        match self {
            Element::Namespace(_) | Element::Enum(_) => Vec::new(),
            Element::Class(class) => {
                let mut types: Vec<&CodeType> = class.parent_type.iter().collect();
                types.extend(class.implements.iter());
                types.extend(class.discriminator.mappings.iter().map(|m| &m.ty));
                if let Some(composed) = &class.original_composed_type {
                    types.extend(composed.types.iter());
                    types.extend(composed.discriminator.mappings.iter().map(|m| &m.ty));
                }
                types
            }
            Element::Interface(interface) => interface.implements.iter().collect(),
            Element::Method(method) => {
                let mut types = vec![&method.return_type];
                types.extend(method.parameters.iter().map(|p| &p.ty));
                types
            }
            Element::Property(property) => vec![&property.ty],
            Element::Indexer(indexer) => vec![&indexer.return_type, &indexer.index_type],
        }
    }

    /// Type references that make up a member's signature (property type, return type, parameter types).
    pub fn signature_types_mut(&mut self) -> Vec<&mut CodeType> {
        match self {
            Element::Method(method) => {
                let mut types = vec![&mut method.return_type];
                types.extend(method.parameters.iter_mut().map(|p| &mut p.ty));
                types
            }
            Element::Property(property) => vec![&mut property.ty],
            Element::Indexer(indexer) => vec![&mut indexer.return_type, &mut indexer.index_type],
            Element::Namespace(_) | Element::Class(_) | Element::Interface(_) | Element::Enum(_) => Vec::new(),
        }
    }

    /// Every type reference held by this element, mutably.
    pub fn types_mut(&mut self) -> Vec<&mut CodeType> {
        match self {
            Element::Class(class) => {
                let mut types: Vec<&mut CodeType> = class.parent_type.iter_mut().collect();
                types.extend(class.implements.iter_mut());
                types.extend(class.discriminator.mappings.iter_mut().map(|m| &mut m.ty));
                if let Some(composed) = &mut class.original_composed_type {
                    types.extend(composed.types.iter_mut());
                    types.extend(composed.discriminator.mappings.iter_mut().map(|m| &mut m.ty));
                }
                types
            }
            Element::Interface(interface) => interface.implements.iter_mut().collect(),
            Element::Namespace(_) | Element::Enum(_) => Vec::new(),
            Element::Method(_) | Element::Property(_) | Element::Indexer(_) => self.signature_types_mut(),
        }
    }

    /// Imports carried by this element, when it can carry any.
    pub fn usings(&self) -> Option<&UsingSet> {
        match self {
            Element::Class(class) => Some(&class.usings),
            Element::Interface(interface) => Some(&interface.usings),
            Element::Enum(e) => Some(&e.usings),
            Element::Method(method) => Some(&method.usings),
            Element::Namespace(_) | Element::Property(_) | Element::Indexer(_) => None,
        }
    }

    pub fn usings_mut(&mut self) -> Option<&mut UsingSet> {
        match self {
            Element::Class(class) => Some(&mut class.usings),
            Element::Interface(interface) => Some(&mut interface.usings),
            Element::Enum(e) => Some(&mut e.usings),
            Element::Method(method) => Some(&mut method.usings),
            Element::Namespace(_) | Element::Property(_) | Element::Indexer(_) => None,
        }
    }
}

/// A namespace; its node name is the fully qualified, `.`-separated name (`ApiSdk.Models`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeNamespace {}

/// A class: model, request builder, parameter bag, ...
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeClass {
    pub kind: ClassKind,
    /// Base type (`extends`).
    #[serde(default)]
    pub parent_type: Option<CodeType>,
    #[serde(default)]
    pub implements: Vec<CodeType>,
    #[serde(default)]
    pub usings: UsingSet,
    #[serde(default)]
    pub is_error_definition: bool,
    #[serde(default)]
    pub discriminator: DiscriminatorInformation,
    #[serde(default)]
    pub original_composed_type: Option<ComposedType>,
    /// Structural interface synthesized for this model.
    #[serde(default)]
    pub projected_interface: Option<ElementId>,
}

impl CodeClass {
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn is_model(&self) -> bool {
        self.kind == ClassKind::Model
    }

    /// Add to the implements list unless a type with the same name (case-insensitive) is there.
    pub fn add_implements(&mut self, ty: CodeType) -> bool {
        if self.implements.iter().any(|t| t.is_named(&ty.name)) {
            return false;
        }
        self.implements.push(ty);
        true
    }
}

/// A structural interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeInterface {
    pub kind: InterfaceKind,
    #[serde(default)]
    pub implements: Vec<CodeType>,
    #[serde(default)]
    pub usings: UsingSet,
    /// The model class this interface was projected from.
    #[serde(default)]
    pub original_class: Option<ElementId>,
}

/// An enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEnum {
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub flags: bool,
    #[serde(default)]
    pub usings: UsingSet,
}

/// A method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeMethod {
    pub kind: MethodKind,
    #[serde(default)]
    pub access: Access,
    pub return_type: CodeType,
    #[serde(default)]
    pub parameters: Vec<CodeParameter>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Property read or written by an accessor.
    #[serde(default)]
    pub accessed_property: Option<ElementId>,
    #[serde(default)]
    pub usings: UsingSet,
    /// Serialization writer factories registered by a client constructor.
    #[serde(default)]
    pub serializer_modules: Vec<String>,
    /// Parse node factories registered by a client constructor.
    #[serde(default)]
    pub deserializer_modules: Vec<String>,
}

impl CodeMethod {
    pub fn new(kind: MethodKind, return_type: CodeType) -> Self {
        Self {
            kind,
            access: Access::Public,
            return_type,
            parameters: Vec::new(),
            is_async: false,
            is_static: false,
            accessed_property: None,
            usings: UsingSet::new(),
            serializer_modules: Vec::new(),
            deserializer_modules: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: CodeParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// First parameter of the given kind.
    pub fn parameter_of_kind(&self, kind: ParameterKind) -> Option<&CodeParameter> {
        self.parameters.iter().find(|p| p.kind == kind)
    }

    pub fn parameter_of_kind_mut(&mut self, kind: ParameterKind) -> Option<&mut CodeParameter> {
        self.parameters.iter_mut().find(|p| p.kind == kind)
    }

    pub fn has_parameter_of_kind(&self, kind: ParameterKind) -> bool {
        self.parameter_of_kind(kind).is_some()
    }

    /// Remove every parameter of the given kind, returning how many were removed.
    pub fn remove_parameters_of_kind(&mut self, kind: ParameterKind) -> usize {
        let before = self.parameters.len();
        self.parameters.retain(|p| p.kind != kind);
        before - self.parameters.len()
    }
}

/// A method or indexer parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeParameter {
    pub name: String,
    pub kind: ParameterKind,
    #[serde(rename = "type")]
    pub ty: CodeType,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_value: Option<String>,
}

impl CodeParameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind, ty: CodeType) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            optional: false,
            description: String::new(),
            default_value: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeProperty {
    pub kind: PropertyKind,
    #[serde(default)]
    pub access: Access,
    #[serde(rename = "type")]
    pub ty: CodeType,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Name on the wire, when it differs from the identifier.
    #[serde(default)]
    pub serialization_name: Option<String>,
    #[serde(default)]
    pub read_only: bool,
}

impl CodeProperty {
    pub fn new(kind: PropertyKind, ty: CodeType) -> Self {
        Self {
            kind,
            access: Access::Public,
            ty,
            default_value: None,
            serialization_name: None,
            read_only: false,
        }
    }
}

/// An indexer (`users["id"]`) on a request builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeIndexer {
    pub return_type: CodeType,
    pub index_type: CodeType,
    pub index_parameter_name: String,
    #[serde(default)]
    pub index_parameter_description: String,
}

macro_rules! element_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

element_from! {
    Namespace => CodeNamespace,
    Class => CodeClass,
    Interface => CodeInterface,
    Enum => CodeEnum,
    Method => CodeMethod,
    Property => CodeProperty,
    Indexer => CodeIndexer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_rules() {
        use ElementCategory::*;
        assert!(Namespace.can_own(Class));
        assert!(Class.can_own(Class));
        assert!(Class.can_own(Property));
        assert!(Interface.can_own(Method));
        assert!(!Interface.can_own(Property));
        assert!(!Namespace.can_own(Method));
        assert!(!Method.can_own(Property));
    }

    #[test]
    fn test_remove_parameters_of_kind() {
        let mut method = CodeMethod::new(MethodKind::RequestExecutor, CodeType::new("User"))
            .with_parameter(CodeParameter::new(
                "handler",
                ParameterKind::ResponseHandler,
                CodeType::new("IResponseHandler"),
            ))
            .with_parameter(CodeParameter::new(
                "body",
                ParameterKind::RequestBody,
                CodeType::new("User"),
            ));
        assert_eq!(method.remove_parameters_of_kind(ParameterKind::ResponseHandler), 1);
        assert_eq!(method.parameters.len(), 1);
        assert_eq!(method.remove_parameters_of_kind(ParameterKind::ResponseHandler), 0);
    }

    #[test]
    fn test_add_implements_ignores_case_duplicates() {
        let mut class = CodeClass::new(ClassKind::Model);
        assert!(class.add_implements(CodeType::external("Parsable")));
        assert!(!class.add_implements(CodeType::external("parsable")));
        assert_eq!(class.implements.len(), 1);
    }

    #[test]
    fn test_class_types_include_discriminator_mappings() {
        let mut class = CodeClass::new(ClassKind::Model);
        class.discriminator.property_name = "kind".to_string();
        class.discriminator.add_mapping("a", CodeType::new("A"));
        class.parent_type = Some(CodeType::new("Base"));
        let element = Element::Class(class);
        let names: Vec<&str> = element.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "A"]);
    }
}
