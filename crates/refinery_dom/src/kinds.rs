//! Kind tags: the role of an element among structurally identical ones.
//!
//! Each element category has its own closed enum so passes match exhaustively instead of testing string tags. Kinds
//! are assigned by the model builder; passes only change them through documented retagging (for example a request
//! builder property becoming a [`MethodKind::RequestBuilderBackwardCompatibility`] method).

use serde::{Deserialize, Serialize};

/// Visibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

/// Role of a class.
///
/// ## Notes
/// - Error types are `Model` classes flagged with `is_error_definition`; they go through every model pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClassKind {
    #[default]
    Custom,
    Model,
    RequestBuilder,
    QueryParameters,
    ParameterSet,
    RequestConfiguration,
}

impl ClassKind {
    /// Whether this is a parameter bag (query parameters or a parameter set).
    pub fn is_parameter_bag(self) -> bool {
        matches!(self, ClassKind::QueryParameters | ClassKind::ParameterSet)
    }
}

/// Role of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterfaceKind {
    #[default]
    Model,
}

/// Role of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodKind {
    #[default]
    Custom,
    Constructor,
    ClientConstructor,
    RawUrlConstructor,
    RequestExecutor,
    RequestGenerator,
    Serializer,
    Deserializer,
    Factory,
    Getter,
    Setter,
    RequestBuilderBackwardCompatibility,
    RequestBuilderWithParameters,
    IndexerBackwardCompatibility,
}

impl MethodKind {
    /// Getters and setters.
    pub fn is_accessor(self) -> bool {
        matches!(self, MethodKind::Getter | MethodKind::Setter)
    }

    /// Constructors of any flavour.
    pub fn is_constructor(self) -> bool {
        matches!(
            self,
            MethodKind::Constructor | MethodKind::ClientConstructor | MethodKind::RawUrlConstructor
        )
    }
}

/// Role of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyKind {
    #[default]
    Custom,
    RequestBuilder,
    AdditionalData,
    BackingStore,
    PathParameters,
    UrlTemplate,
    Headers,
    Options,
    QueryParameter,
    RequestAdapter,
}

/// Role of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParameterKind {
    #[default]
    Custom,
    Cancellation,
    RequestBody,
    RequestAdapter,
    RawUrl,
    PathParameters,
    Path,
    ParseNode,
    ResponseHandler,
    RequestConfiguration,
    Options,
    Serializer,
    SetterValue,
    BackingStore,
    QueryParameter,
    Headers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_kinds() {
        assert!(MethodKind::Getter.is_accessor());
        assert!(MethodKind::Setter.is_accessor());
        assert!(!MethodKind::Factory.is_accessor());
    }

    #[test]
    fn test_constructor_kinds() {
        assert!(MethodKind::RawUrlConstructor.is_constructor());
        assert!(!MethodKind::RequestExecutor.is_constructor());
    }

    #[test]
    fn test_parameter_bags() {
        assert!(ClassKind::QueryParameters.is_parameter_bag());
        assert!(ClassKind::ParameterSet.is_parameter_bag());
        assert!(!ClassKind::Model.is_parameter_bag());
    }
}
