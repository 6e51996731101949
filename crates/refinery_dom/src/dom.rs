//! Arena-backed CodeDOM.
//!
//! Every element lives in a single `Vec` and is addressed by a stable [`ElementId`]. Ownership is recorded twice: a
//! node lists its children in declaration order and each child records its parent. All structural edits go through
//! [`CodeDom`] so both directions stay consistent.
//!
//! ## Notes
//! - Removing an element tombstones its whole subtree; ids are never reused within one tree.
//! - Weak type references ([`crate::CodeType::definition`]) are not edges of the arena and are never followed by
//!   structural operations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{
    CodeClass, CodeEnum, CodeIndexer, CodeInterface, CodeMethod, CodeNamespace, CodeProperty, Element, ElementCategory,
};
use crate::errors::{DomError, DomResult};

/// Stable index of an element in a [`CodeDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl ElementId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One arena slot: the tree links plus the element payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<ElementId>,
    #[serde(default)]
    pub children: Vec<ElementId>,
    #[serde(flatten)]
    pub element: Element,
}

impl Node {
    pub fn new(name: impl Into<String>, element: impl Into<Element>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parent: None,
            children: Vec::new(),
            element: element.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(&self) -> ElementCategory {
        self.element.category()
    }
}

/// The whole intermediate representation of one API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeDom {
    nodes: Vec<Option<Node>>,
    root: ElementId,
}

macro_rules! typed_accessors {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty);)*) => {
        $(
            pub fn $get(&self, id: ElementId) -> Option<&$ty> {
                match &self.get(id)?.element {
                    Element::$variant(value) => Some(value),
                    _ => None,
                }
            }

            pub fn $get_mut(&mut self, id: ElementId) -> Option<&mut $ty> {
                match &mut self.get_mut(id)?.element {
                    Element::$variant(value) => Some(value),
                    _ => None,
                }
            }
        )*
    };
}

impl CodeDom {
    /// Create a tree holding only the root namespace.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Some(Node::new(root_name, CodeNamespace::default()))],
            root: ElementId(0),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn get(&self, id: ElementId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Like [`CodeDom::get`], but a missing element is an error.
    pub fn node(&self, id: ElementId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::MissingElement { id })
    }

    pub fn node_mut(&mut self, id: ElementId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::MissingElement { id })
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Live element ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| ElementId(index as u32))
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of allocated slots, tombstones included.
    pub fn capacity_used(&self) -> usize {
        self.nodes.len()
    }

    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.get(id).map(|node| node.name.as_str())
    }

    pub fn category(&self, id: ElementId) -> Option<ElementCategory> {
        self.get(id).map(Node::category)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.get(id).map(|node| &node.element)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.get_mut(id).map(|node| &mut node.element)
    }

    typed_accessors! {
        namespace, namespace_mut => Namespace(CodeNamespace);
        class, class_mut => Class(CodeClass);
        interface, interface_mut => Interface(CodeInterface);
        enumeration, enumeration_mut => Enum(CodeEnum);
        method, method_mut => Method(CodeMethod);
        property, property_mut => Property(CodeProperty);
        indexer, indexer_mut => Indexer(CodeIndexer);
    }

    // ---- Structural edits ----

    /// Append a new element as the last child of `parent`.
    pub fn add(&mut self, parent: ElementId, name: impl Into<String>, element: impl Into<Element>) -> DomResult<ElementId> {
        self.insert(parent, Node::new(name, element))
    }

    /// Append a prepared node as the last child of `parent`.
    ///
    /// ## Notes
    /// - The node's own `parent` and `children` are overwritten; use [`CodeDom::add`] per child to build subtrees.
    pub fn insert(&mut self, parent: ElementId, mut node: Node) -> DomResult<ElementId> {
        self.check_can_own(parent, &node.name, node.category())?;
        let id = ElementId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(Some(node));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Remove an element and its whole subtree.
    ///
    /// ## Returns
    /// - The removed node, detached from the tree (its children ids are tombstoned too).
    pub fn remove(&mut self, id: ElementId) -> DomResult<Node> {
        if id == self.root {
            return Err(DomError::RootIsFixed);
        }
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        let mut stack = self.node(id)?.children.clone();
        while let Some(descendant) = stack.pop() {
            if let Some(removed) = self.nodes.get_mut(descendant.index()).and_then(Option::take) {
                stack.extend(removed.children);
            }
        }
        let mut node = self
            .nodes
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or(DomError::MissingElement { id })?;
        node.parent = None;
        Ok(node)
    }

    /// Detach `id` from its parent and append it to `new_parent`.
    pub fn move_to(&mut self, id: ElementId, new_parent: ElementId) -> DomResult<()> {
        if id == self.root {
            return Err(DomError::RootIsFixed);
        }
        let (name, category) = {
            let node = self.node(id)?;
            (node.name.clone(), node.category())
        };
        self.check_can_own(new_parent, &name, category)?;
        if id == new_parent || self.is_ancestor_of(id, new_parent) {
            return Err(DomError::MoveIntoDescendant { id, target: new_parent });
        }
        let old_parent = self.node(id)?.parent;
        if let Some(old_parent) = old_parent.and_then(|p| self.get_mut(p)) {
            old_parent.children.retain(|child| *child != id);
        }
        self.node_mut(new_parent)?.children.push(id);
        self.node_mut(id)?.parent = Some(new_parent);
        Ok(())
    }

    pub fn rename(&mut self, id: ElementId, name: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    fn check_can_own(&self, parent: ElementId, child: &str, child_category: ElementCategory) -> DomResult<()> {
        let owner = self.node(parent)?;
        if owner.category().can_own(child_category) {
            Ok(())
        } else {
            Err(DomError::InvalidChild {
                parent_id: parent,
                parent: owner.name.clone(),
                parent_category: owner.category(),
                child: child.to_string(),
                child_category,
            })
        }
    }

    // ---- Navigation ----

    /// Children in declaration order; empty for missing elements.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors {
            dom: self,
            next: self.parent(id),
        }
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor_of(&self, ancestor: ElementId, id: ElementId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// The namespace containing `id`, or `id` itself when it is a namespace.
    pub fn namespace_of(&self, id: ElementId) -> Option<ElementId> {
        if self.namespace(id).is_some() {
            return Some(id);
        }
        self.ancestors(id).find(|a| self.namespace(*a).is_some())
    }

    /// Whether namespace `child` is strictly nested inside namespace `ancestor`.
    ///
    /// ## Notes
    /// - Compares the dotted names, so a namespace declared elsewhere in the tree with a descendant name counts too.
    pub fn is_sub_namespace_of(&self, child: ElementId, ancestor: ElementId) -> bool {
        match (self.name(child), self.name(ancestor)) {
            (Some(child), Some(ancestor)) => child
                .strip_prefix(ancestor)
                .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1),
            _ => false,
        }
    }

    /// First direct child named `name` (case-insensitive).
    pub fn child_named(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.name(*child).is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// Find a namespace by its full dotted name.
    pub fn find_namespace(&self, name: &str) -> Option<ElementId> {
        self.ids()
            .find(|id| self.namespace(*id).is_some() && self.name(*id) == Some(name))
    }

    /// Module path of a namespace: its dotted name with `.` replaced by `separator`.
    pub fn module_path(&self, namespace: ElementId, separator: &str) -> Option<String> {
        self.namespace(namespace)?;
        self.name(namespace).map(|name| name.replace('.', separator))
    }
}

/// Iterator over the strict ancestors of an element.
pub struct Ancestors<'a> {
    dom: &'a CodeDom,
    next: Option<ElementId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let current = self.next?;
        self.next = self.dom.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{ClassKind, PropertyKind};
    use crate::types::CodeType;

    fn sample() -> (CodeDom, ElementId, ElementId, ElementId) {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
        let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();
        (dom, models, customer, address)
    }

    #[test]
    fn test_add_records_both_directions() {
        let (dom, models, customer, address) = sample();
        assert_eq!(dom.children(models), &[customer]);
        assert_eq!(dom.parent(address), Some(customer));
        assert_eq!(dom.ancestors(address).collect::<Vec<_>>(), vec![customer, models, dom.root()]);
        assert_eq!(dom.namespace_of(address), Some(models));
    }

    #[test]
    fn test_invalid_child_is_rejected() {
        let (mut dom, models, _, _) = sample();
        let err = dom
            .add(models, "name", CodeProperty::new(PropertyKind::Custom, CodeType::new("string")))
            .unwrap_err();
        assert!(matches!(err, DomError::InvalidChild { .. }));
    }

    #[test]
    fn test_remove_tombstones_subtree() {
        let (mut dom, models, customer, address) = sample();
        let before = dom.capacity_used();
        let removed = dom.remove(customer).unwrap();
        assert_eq!(removed.name, "Customer");
        assert!(!dom.contains(customer));
        assert!(!dom.contains(address));
        assert!(dom.children(models).is_empty());
        assert_eq!(dom.capacity_used(), before);
    }

    #[test]
    fn test_move_to_sibling_of_parent() {
        let (mut dom, models, customer, address) = sample();
        dom.move_to(address, models).unwrap();
        assert_eq!(dom.children(models), &[customer, address]);
        assert!(dom.children(customer).is_empty());
        assert_eq!(dom.parent(address), Some(models));
    }

    #[test]
    fn test_move_into_descendant_fails() {
        let (mut dom, models, customer, _) = sample();
        let nested = dom.add(models, "ApiSdk.Models.Nested", CodeNamespace::default()).unwrap();
        assert!(dom.move_to(models, nested).is_err());
        assert!(dom.move_to(customer, customer).is_err());
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let (mut dom, _, _, _) = sample();
        let root = dom.root();
        assert_eq!(dom.remove(root).unwrap_err(), DomError::RootIsFixed);
    }

    #[test]
    fn test_sub_namespace_uses_dotted_names() {
        let (mut dom, models, _, _) = sample();
        let nested = dom.add(models, "ApiSdk.Models.Nested", CodeNamespace::default()).unwrap();
        let lookalike = dom.add(dom.root(), "ApiSdk.ModelsExtra", CodeNamespace::default()).unwrap();
        assert!(dom.is_sub_namespace_of(nested, models));
        assert!(!dom.is_sub_namespace_of(models, models));
        assert!(!dom.is_sub_namespace_of(lookalike, models));
        assert_eq!(dom.module_path(nested, "/").as_deref(), Some("ApiSdk/Models/Nested"));
    }

    #[test]
    fn test_typed_accessors_check_category() {
        let (dom, models, customer, _) = sample();
        assert!(dom.class(customer).is_some());
        assert!(dom.class(models).is_none());
        assert!(dom.namespace(models).is_some());
    }
}
