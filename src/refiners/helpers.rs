//! Small tree queries shared by several passes.

use refinery_dom::{
    CodeClass, CodeDom, CodeMethod, CodeUsing, ElementCategory, ElementId, MethodKind, descendants,
};

use super::errors::{RefineError, RefineResult};

/// Nearest strict ancestor that can carry imports (class, interface or enum).
pub fn enclosing_block(dom: &CodeDom, id: ElementId) -> Option<ElementId> {
    dom.ancestors(id).find(|ancestor| {
        dom.category(*ancestor).is_some_and(|category| {
            matches!(
                category,
                ElementCategory::Class | ElementCategory::Interface | ElementCategory::Enum
            )
        })
    })
}

/// Pre-order ids of every class in the tree.
pub fn classes(dom: &CodeDom) -> Vec<ElementId> {
    descendants(dom, dom.root())
        .into_iter()
        .filter(|id| dom.class(*id).is_some())
        .collect()
}

/// Direct method children of `owner` with their ids.
pub fn methods_of(dom: &CodeDom, owner: ElementId) -> Vec<(ElementId, &CodeMethod)> {
    dom.children(owner)
        .iter()
        .filter_map(|id| dom.method(*id).map(|method| (*id, method)))
        .collect()
}

/// Whether `owner` has a direct method of any of the given kinds.
pub fn has_method_of_kind(dom: &CodeDom, owner: ElementId, kinds: &[MethodKind]) -> bool {
    methods_of(dom, owner)
        .iter()
        .any(|(_, method)| kinds.contains(&method.kind))
}

/// Mutable access to a class, failing with a diagnostic when `id` is something else.
pub fn class_mut(dom: &mut CodeDom, id: ElementId) -> RefineResult<&mut CodeClass> {
    let name = dom.node(id)?.name.clone();
    dom.class_mut(id).ok_or(RefineError::UnexpectedElement {
        id,
        name,
        expected: ElementCategory::Class,
    })
}

/// Attach an import to a block.
///
/// ## Returns
/// - `true` when the import was not there yet.
///
/// ## Errors
/// - [`RefineError::UnexpectedElement`] when `block` cannot carry imports.
pub fn add_using(dom: &mut CodeDom, block: ElementId, using: CodeUsing) -> RefineResult<bool> {
    let node = dom.node_mut(block)?;
    match node.element.usings_mut() {
        Some(usings) => Ok(usings.add(using)),
        None => Err(RefineError::UnexpectedElement {
            id: block,
            name: node.name.clone(),
            expected: ElementCategory::Class,
        }),
    }
}

/// Whether a class is a model nested directly inside another model.
pub fn is_inner_model(dom: &CodeDom, id: ElementId) -> bool {
    dom.class(id).is_some_and(CodeClass::is_model)
        && dom
            .parent(id)
            .and_then(|parent| dom.class(parent))
            .is_some_and(CodeClass::is_model)
}

/// Point every type reference resolved to `definition` at its new name.
pub fn rename_references(dom: &mut CodeDom, definition: ElementId, new_name: &str) {
    let referencing: Vec<ElementId> = dom.ids().collect();
    for element_id in referencing {
        if let Some(element) = dom.element_mut(element_id) {
            for ty in element.types_mut() {
                if ty.definition == Some(definition) {
                    ty.name = new_name.to_string();
                }
            }
        }
    }
}
