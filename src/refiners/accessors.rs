//! Accessor and default constructor synthesis.

use refinery_core::lang::conventions::{
    CONSTRUCTOR_METHOD_NAME, GETTER_PREFIX, SETTER_PREFIX, SETTER_VALUE_PARAMETER_NAME,
};
use refinery_core::naming::to_first_upper;
use refinery_dom::{
    Access, ClassKind, CodeDom, CodeMethod, CodeParameter, CodeType, ElementId, MethodKind, Node, ParameterKind,
    PropertyKind, crawl,
};

use super::errors::RefineResult;
use super::helpers::has_method_of_kind;
use super::target::RefineContext;

/// Hide data properties behind a public getter and setter pair.
///
/// ## Notes
/// - Applies to additional data, custom and (with a backing store) backing store properties of classes other than
///   parameter bags and request configurations.
/// - Accessors whose name is already taken (case-insensitive) are not added again.
#[tracing::instrument(skip_all)]
pub fn add_accessors(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let uses_backing_store = ctx.config.uses_backing_store;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(class) = dom.class(id) else {
            return Ok(());
        };
        if class.kind.is_parameter_bag() || class.kind == ClassKind::RequestConfiguration {
            return Ok(());
        }
        let properties: Vec<ElementId> = dom
            .children(id)
            .iter()
            .copied()
            .filter(|child| {
                dom.property(*child).is_some_and(|property| match property.kind {
                    PropertyKind::AdditionalData | PropertyKind::Custom => true,
                    PropertyKind::BackingStore => uses_backing_store,
                    _ => false,
                })
            })
            .collect();
        for property_id in properties {
            add_accessor_pair(dom, id, property_id)?;
        }
        Ok(())
    })
}

fn add_accessor_pair(dom: &mut CodeDom, class_id: ElementId, property_id: ElementId) -> RefineResult<()> {
    let node = dom.node(property_id)?;
    let name = node.name.clone();
    let description = node.description.clone();
    let Some(property) = dom.property_mut(property_id) else {
        return Ok(());
    };
    property.access = Access::Private;
    let ty = property.ty.clone();

    let suffix = to_first_upper(&name);
    let getter_name = format!("{GETTER_PREFIX}{suffix}");
    if dom.child_named(class_id, &getter_name).is_none() {
        let mut getter = CodeMethod::new(MethodKind::Getter, ty.clone());
        getter.accessed_property = Some(property_id);
        let doc = accessor_description("Gets", &name, &description);
        dom.insert(class_id, Node::new(getter_name, getter).with_description(doc))?;
    }

    let setter_name = format!("{SETTER_PREFIX}{suffix}");
    if dom.child_named(class_id, &setter_name).is_none() {
        let value = CodeParameter {
            description: format!("Value to set for the {name} property."),
            ..CodeParameter::new(SETTER_VALUE_PARAMETER_NAME, ParameterKind::SetterValue, ty)
        };
        let mut setter = CodeMethod::new(MethodKind::Setter, CodeType::void()).with_parameter(value);
        setter.accessed_property = Some(property_id);
        let doc = accessor_description("Sets", &name, &description);
        dom.insert(class_id, Node::new(setter_name, setter).with_description(doc))?;
    }
    tracing::debug!(class = %class_id, property = %name, "added accessors");
    Ok(())
}

fn accessor_description(verb: &str, name: &str, description: &str) -> String {
    let summary = format!("{verb} the {name} property value.");
    if description.is_empty() {
        summary
    } else {
        format!("{summary} {description}")
    }
}

/// Give every class without a constructor a public parameterless one.
#[tracing::instrument(skip_all)]
pub fn add_default_constructors(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(class) = dom.class(id) else {
            return Ok(());
        };
        if class.kind == ClassKind::RequestConfiguration
            || has_method_of_kind(dom, id, &[MethodKind::Constructor, MethodKind::ClientConstructor])
        {
            return Ok(());
        }
        let name = dom.node(id)?.name.clone();
        let constructor = CodeMethod::new(MethodKind::Constructor, CodeType::void());
        let description = format!("Instantiates a new {name} and sets the default values.");
        dom.insert(id, Node::new(CONSTRUCTOR_METHOD_NAME, constructor).with_description(description))?;
        Ok(())
    })
}
