//! Structural integrity checks for trees handed to or produced by the pipeline.

use std::collections::HashSet;

use crate::dom::{CodeDom, ElementId};
use crate::element::Element;
use crate::errors::{DomError, DomResult};
use crate::types::CodeType;

/// Check every structural invariant of the tree.
///
/// ## Notes
/// - Parent and child links must agree in both directions; every non-root element has a parent.
/// - A child list names each element at most once.
/// - Every child is of a category its owner may own.
/// - Weak references (type definitions, accessed properties, projected interfaces, original classes) point at live
///   elements of the right category.
/// - Every live element is reachable from the root.
///
/// ## Errors
/// - The first violation found, naming the offending element.
#[tracing::instrument(skip_all, fields(elements = dom.len()))]
pub fn validate(dom: &CodeDom) -> DomResult<()> {
    let root = dom.root();
    if dom.node(root)?.parent.is_some() {
        return Err(DomError::RootHasParent { id: root });
    }

    for id in dom.ids() {
        let node = dom.node(id)?;
        let mut listed = HashSet::with_capacity(node.children.len());
        for child in &node.children {
            let child_node = dom.get(*child).ok_or(DomError::MissingElement { id: *child })?;
            if !listed.insert(*child) {
                return Err(DomError::DuplicateChild {
                    parent_id: id,
                    parent: node.name.clone(),
                    child_id: *child,
                    child: child_node.name.clone(),
                });
            }
            if child_node.parent != Some(id) {
                return Err(DomError::ParentMismatch {
                    id: *child,
                    name: child_node.name.clone(),
                    recorded: child_node.parent.unwrap_or(root),
                    listed_by: Some(id),
                });
            }
            if !node.category().can_own(child_node.category()) {
                return Err(DomError::InvalidChild {
                    parent_id: id,
                    parent: node.name.clone(),
                    parent_category: node.category(),
                    child: child_node.name.clone(),
                    child_category: child_node.category(),
                });
            }
        }
        if id != root {
            let parent = node.parent.ok_or_else(|| DomError::Orphaned {
                id,
                name: node.name.clone(),
            })?;
            if !dom.children(parent).contains(&id) {
                return Err(DomError::ParentMismatch {
                    id,
                    name: node.name.clone(),
                    recorded: parent,
                    listed_by: None,
                });
            }
        }
        check_references(dom, id)?;
    }

    check_reachability(dom)
}

fn check_references(dom: &CodeDom, id: ElementId) -> DomResult<()> {
    let node = dom.node(id)?;
    for ty in node.element.types().into_iter().flat_map(CodeType::with_members) {
        if let Some(target) = ty.definition {
            let category = dom.category(target).ok_or_else(|| DomError::DanglingReference {
                owner_id: id,
                owner: node.name.clone(),
                type_name: ty.name.clone(),
                target,
            })?;
            if !category.is_type_definition() {
                return Err(DomError::NotATypeDefinition {
                    owner_id: id,
                    owner: node.name.clone(),
                    type_name: ty.name.clone(),
                    target,
                    category,
                });
            }
        }
    }

    match &node.element {
        Element::Method(method) => {
            if let Some(target) = method.accessed_property.filter(|t| dom.property(*t).is_none()) {
                return Err(DomError::DanglingAccessor {
                    method_id: id,
                    method: node.name.clone(),
                    target,
                });
            }
        }
        Element::Class(class) => {
            if let Some(target) = class.projected_interface.filter(|t| dom.interface(*t).is_none()) {
                return Err(dangling(dom, id, target));
            }
        }
        Element::Interface(interface) => {
            if let Some(target) = interface.original_class.filter(|t| dom.class(*t).is_none()) {
                return Err(dangling(dom, id, target));
            }
        }
        _ => {}
    }
    Ok(())
}

fn dangling(dom: &CodeDom, owner_id: ElementId, target: ElementId) -> DomError {
    DomError::DanglingReference {
        owner_id,
        owner: dom.name(owner_id).unwrap_or_default().to_string(),
        type_name: dom.name(target).unwrap_or_default().to_string(),
        target,
    }
}

fn check_reachability(dom: &CodeDom) -> DomResult<()> {
    let reachable = crate::crawl::descendants(dom, dom.root());
    if reachable.len() == dom.len() {
        return Ok(());
    }
    let mut seen = vec![false; dom.capacity_used()];
    for id in reachable {
        seen[id.0 as usize] = true;
    }
    match dom.ids().find(|id| !seen[id.0 as usize]) {
        Some(id) => Err(DomError::Unreachable {
            id,
            name: dom.name(id).unwrap_or_default().to_string(),
        }),
        None => Ok(()),
    }
}
