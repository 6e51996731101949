//! Structural errors raised by the arena and the input-contract validator.

use miette::Diagnostic;
use thiserror::Error;

use crate::dom::ElementId;
use crate::element::ElementCategory;

/// A violated tree invariant, naming the offending node.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum DomError {
    #[error("element {id} does not exist or was removed")]
    #[diagnostic(code(refinery::dom::missing_element))]
    MissingElement { id: ElementId },

    #[error("{parent_category} `{parent}` ({parent_id}) cannot own {child_category} `{child}`")]
    #[diagnostic(
        code(refinery::dom::invalid_child),
        help("namespaces own namespaces and type definitions; classes own members and nested types; interfaces own methods")
    )]
    InvalidChild {
        parent_id: ElementId,
        parent: String,
        parent_category: ElementCategory,
        child: String,
        child_category: ElementCategory,
    },

    #[error("element `{name}` ({id}) has no parent")]
    #[diagnostic(code(refinery::dom::orphaned))]
    Orphaned { id: ElementId, name: String },

    #[error("element `{name}` ({id}) records parent {recorded} but is listed by {listed_by:?}")]
    #[diagnostic(code(refinery::dom::parent_mismatch))]
    ParentMismatch {
        id: ElementId,
        name: String,
        recorded: ElementId,
        listed_by: Option<ElementId>,
    },

    #[error("element `{child}` ({child_id}) is listed more than once by `{parent}` ({parent_id})")]
    #[diagnostic(code(refinery::dom::duplicate_child))]
    DuplicateChild {
        parent_id: ElementId,
        parent: String,
        child_id: ElementId,
        child: String,
    },

    #[error("type `{type_name}` on `{owner}` ({owner_id}) references {target}, which does not exist")]
    #[diagnostic(code(refinery::dom::dangling_reference))]
    DanglingReference {
        owner_id: ElementId,
        owner: String,
        type_name: String,
        target: ElementId,
    },

    #[error("type `{type_name}` on `{owner}` ({owner_id}) references {target}, which is a {category}")]
    #[diagnostic(
        code(refinery::dom::not_a_type_definition),
        help("type references may only point at classes, interfaces and enums")
    )]
    NotATypeDefinition {
        owner_id: ElementId,
        owner: String,
        type_name: String,
        target: ElementId,
        category: ElementCategory,
    },

    #[error("accessor `{method}` ({method_id}) references {target}, which is not a live property")]
    #[diagnostic(code(refinery::dom::dangling_accessor))]
    DanglingAccessor {
        method_id: ElementId,
        method: String,
        target: ElementId,
    },

    #[error("root element {id} must not have a parent")]
    #[diagnostic(code(refinery::dom::root_has_parent))]
    RootHasParent { id: ElementId },

    #[error("element `{name}` ({id}) is not reachable from the root")]
    #[diagnostic(code(refinery::dom::unreachable), help("the ownership tree may contain a cycle"))]
    Unreachable { id: ElementId, name: String },

    #[error("cannot move {id} into its own descendant {target}")]
    #[diagnostic(code(refinery::dom::move_into_descendant))]
    MoveIntoDescendant { id: ElementId, target: ElementId },

    #[error("the root element cannot be removed or moved")]
    #[diagnostic(code(refinery::dom::root_is_fixed))]
    RootIsFixed,
}

pub type DomResult<T> = Result<T, DomError>;
