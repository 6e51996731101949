//! Depth-first traversal used by every pass.

use crate::dom::{CodeDom, ElementId};

/// Walk the subtree rooted at `start` in pre-order, handing each element to `action` with mutable access to the
/// whole tree.
///
/// ## Parameters
/// - `dom`: the tree; `action` may edit it freely except for the ancestors of the element it is visiting.
/// - `start`: first element visited.
/// - `action`: called once per element; the first error aborts the walk.
///
/// ## Notes
/// - An element's children are read **after** its action returns, so children the action adds to the element
///   itself are visited, children it removes are not.
/// - Elements removed by a sibling's action before they are reached are skipped.
/// - Children appended to an element that was already visited are not visited in this walk.
pub fn crawl<E, F>(dom: &mut CodeDom, start: ElementId, action: &mut F) -> Result<(), E>
where
    F: FnMut(&mut CodeDom, ElementId) -> Result<(), E>,
{
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        if !dom.contains(id) {
            continue;
        }
        action(dom, id)?;
        stack.extend(dom.children(id).iter().rev().copied());
    }
    Ok(())
}

/// Read-only pre-order walk.
pub fn walk<F>(dom: &CodeDom, start: ElementId, mut visit: F)
where
    F: FnMut(ElementId, usize),
{
    let mut stack = vec![(start, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if !dom.contains(id) {
            continue;
        }
        visit(id, depth);
        stack.extend(dom.children(id).iter().rev().map(|child| (*child, depth + 1)));
    }
}

/// Pre-order list of `start` and all its descendants.
pub fn descendants(dom: &CodeDom, start: ElementId) -> Vec<ElementId> {
    let mut ids = Vec::new();
    walk(dom, start, |id, _| ids.push(id));
    ids
}
