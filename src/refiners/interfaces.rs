//! Inheritance and structural interfaces of models.
//!
//! Targets with structural typing expose every model through an interface (`User` -> `Userable`) so that
//! polymorphic values can be passed around without knowing the concrete struct. This module synthesizes those
//! interfaces and the inheritance metadata they depend on: error base types, the parsable marker and
//! discriminator imports.

use refinery_dom::{
    Access, ClassKind, CodeDom, CodeInterface, CodeMethod, CodeType, CodeUsing, DiscriminatorInformation, Element,
    ElementCategory, ElementId, InterfaceKind, MethodKind, Node, crawl,
};

use super::errors::RefineResult;
use super::helpers::{add_using, class_mut, classes};
use super::target::RefineContext;

/// Drop discriminator mappings of models that point into namespaces nested below the model's own.
#[tracing::instrument(skip_all)]
pub fn scope_discriminator_mappings(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if !dom.class(id).is_some_and(|class| class.is_model()) {
            return Ok(());
        }
        let Some(namespace) = dom.namespace_of(id) else {
            return Ok(());
        };
        let nested = |ty: &CodeType| {
            ty.definition
                .and_then(|definition| dom.namespace_of(definition))
                .is_some_and(|defined_in| dom.is_sub_namespace_of(defined_in, namespace))
        };
        let Some(class) = dom.class(id) else {
            return Ok(());
        };
        let keep_class: Vec<bool> = class.discriminator.mappings.iter().map(|m| !nested(&m.ty)).collect();
        let keep_composed: Vec<bool> = class
            .original_composed_type
            .iter()
            .flat_map(|composed| composed.discriminator.mappings.iter())
            .map(|m| !nested(&m.ty))
            .collect();

        let class = class_mut(dom, id)?;
        let removed = retain_mappings(&mut class.discriminator, &keep_class)
            + class
                .original_composed_type
                .as_mut()
                .map_or(0, |composed| retain_mappings(&mut composed.discriminator, &keep_composed));
        if removed > 0 {
            tracing::debug!(class = %id, removed, "dropped sub-namespace discriminator mappings");
        }
        Ok(())
    })
}

fn retain_mappings(discriminator: &mut DiscriminatorInformation, keep: &[bool]) -> usize {
    let before = discriminator.mappings.len();
    let mut flags = keep.iter();
    discriminator.mappings.retain(|_| flags.next().copied().unwrap_or(true));
    before - discriminator.mappings.len()
}

/// Error models without a base type extend the target's error type.
#[tracing::instrument(skip_all)]
pub fn add_error_parents(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let (name, module) = ctx.profile.error_parent;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(class) = dom.class_mut(id) else {
            return Ok(());
        };
        if !class.is_error_definition || class.parent_type.is_some() {
            return Ok(());
        }
        class.parent_type = Some(CodeType::external(name).nullable(false));
        add_using(dom, id, CodeUsing::external(module, name))?;
        Ok(())
    })
}

/// Import what discriminator resolution needs: the parse node type and the packages of mapped types.
#[tracing::instrument(skip_all)]
pub fn add_discriminator_imports(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let (parse_node, parse_node_module) = ctx.profile.parse_node;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(class) = dom.class(id).filter(|class| class.is_model()) else {
            return Ok(());
        };
        let mapped: Vec<&CodeType> = class
            .discriminator
            .mappings
            .iter()
            .chain(
                class
                    .original_composed_type
                    .iter()
                    .flat_map(|composed| composed.discriminator.mappings.iter()),
            )
            .map(|mapping| &mapping.ty)
            .collect();
        if mapped.is_empty() {
            return Ok(());
        }
        let own_namespace = dom.namespace_of(id);
        let mut usings = vec![CodeUsing::external(parse_node_module, parse_node)];
        for ty in mapped {
            if ty.is_external {
                continue;
            }
            let namespace = ty.definition.and_then(|definition| dom.namespace_of(definition));
            if namespace.is_none() || namespace == own_namespace {
                continue;
            }
            if let Some(module) = namespace.and_then(|ns| ctx.module_path(dom, ns)) {
                usings.push(CodeUsing::internal(module, ""));
            }
        }
        for using in usings {
            add_using(dom, id, using)?;
        }
        Ok(())
    })
}

/// Every model implements the target's parsable marker.
#[tracing::instrument(skip_all)]
pub fn mark_parsable(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let (marker, _) = ctx.profile.parsable_marker;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if let Some(class) = dom.class_mut(id).filter(|class| class.is_model()) {
            class.add_implements(CodeType::external(marker).nullable(false));
        }
        Ok(())
    })
}

/// Synthesize the structural interface of every model.
///
/// ## Notes
/// - Interfaces are placed next to their model when the model's owner can hold interfaces, otherwise in the
///   enclosing namespace.
/// - All interfaces are created before any member is cloned so references between models resolve to interfaces
///   regardless of declaration order.
/// - Models that already have a live interface are skipped.
#[tracing::instrument(skip_all)]
pub fn project_model_interfaces(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let mut projected = Vec::new();
    for class_id in classes(dom) {
        let Some(class) = dom.class(class_id).filter(|class| class.is_model()) else {
            continue;
        };
        if class.projected_interface.is_some_and(|iface| dom.interface(iface).is_some()) {
            continue;
        }
        let usings = class.usings.clone();
        let Some(owner) = interface_owner(dom, class_id) else {
            continue;
        };
        let name = (ctx.profile.interface_name)(&dom.node(class_id)?.name);
        let interface = CodeInterface {
            kind: InterfaceKind::Model,
            implements: Vec::new(),
            usings,
            original_class: Some(class_id),
        };
        let interface_id = dom.add(owner, name.clone(), interface)?;
        class_mut(dom, class_id)?.projected_interface = Some(interface_id);
        tracing::debug!(class = %class_id, interface = %interface_id, name = %name, "projected model interface");
        projected.push((class_id, interface_id));
    }

    for (class_id, interface_id) in projected {
        let parent = dom
            .class(class_id)
            .and_then(|class| class.parent_type.as_ref())
            .and_then(|parent| parent.definition)
            .and_then(|parent| projected_interface(dom, parent));
        let extends = match parent {
            Some(parent_interface) => {
                let name = dom.node(parent_interface)?.name.clone();
                CodeType::defined_by(name, parent_interface).nullable(false)
            }
            None => {
                let (marker, module) = ctx.profile.parsable_marker;
                add_using(dom, interface_id, CodeUsing::external(module, marker))?;
                CodeType::external(marker).nullable(false)
            }
        };
        if let Some(interface) = dom.interface_mut(interface_id) {
            interface.implements.push(extends);
        }

        let members: Vec<Node> = dom
            .children(class_id)
            .iter()
            .filter_map(|member| dom.get(*member))
            .filter(|node| match &node.element {
                Element::Method(method) => is_projected_member(method),
                _ => false,
            })
            .cloned()
            .collect();
        for mut member in members {
            member.children.clear();
            for ty in member.element.types_mut() {
                redirect_to_interface(dom, ty);
            }
            dom.insert(interface_id, member)?;
        }
    }
    Ok(())
}

fn is_projected_member(method: &CodeMethod) -> bool {
    method.access == Access::Public
        && !method.is_static
        && matches!(
            method.kind,
            MethodKind::Getter | MethodKind::Setter | MethodKind::Serializer | MethodKind::Custom
        )
}

fn interface_owner(dom: &CodeDom, class_id: ElementId) -> Option<ElementId> {
    let parent = dom.parent(class_id)?;
    let can_own = dom
        .category(parent)
        .is_some_and(|category| category.can_own(ElementCategory::Interface));
    if can_own {
        Some(parent)
    } else {
        dom.namespace_of(parent)
    }
}

fn projected_interface(dom: &CodeDom, class_id: ElementId) -> Option<ElementId> {
    dom.class(class_id)
        .filter(|class| class.kind == ClassKind::Model)
        .and_then(|class| class.projected_interface)
        .filter(|iface| dom.interface(*iface).is_some())
}

fn redirect_to_interface(dom: &CodeDom, ty: &mut CodeType) {
    let Some(interface) = ty.definition.and_then(|definition| projected_interface(dom, definition)) else {
        return;
    };
    if let Some(name) = dom.name(interface) {
        ty.name = name.to_string();
        ty.definition = Some(interface);
    }
}
