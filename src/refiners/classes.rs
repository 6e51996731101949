//! Classes the model builder leaves implicit: request configuration nesting and composed type wrappers.

use refinery_core::lang::conventions::{
    BACKED_MODEL_INTERFACE, BACKING_STORE_INTERFACE, BACKING_STORE_PROPERTY_NAME, COMPOSED_WRAPPER_SUFFIX,
    DESERIALIZER_METHOD_NAME, FACTORY_METHOD_NAME, FIELD_DESERIALIZERS_TYPE, PARSE_NODE_INTERFACE,
    SERIALIZATION_WRITER_INTERFACE, SERIALIZER_METHOD_NAME,
};
use refinery_core::naming::strip_prefix_ignore_case;
use refinery_dom::{
    ClassKind, CodeClass, CodeDom, CodeMethod, CodeParameter, CodeProperty, CodeType, ComposedType, ElementCategory,
    ElementId, MethodKind, Node, ParameterKind, PropertyKind, descendants,
};

use super::errors::RefineResult;
use super::helpers::{classes, methods_of, rename_references};
use super::target::RefineContext;

/// Prefix request configuration classes with their request builder's name and nest them in the builder.
///
/// ## Notes
/// - Covers classes taken as configuration callbacks by the builder's methods and the query parameter classes those
///   configurations hold.
/// - Names already starting with the builder's name (case-insensitive) are kept.
/// - Classes already owned by another class stay where they are, as do classes whose name the builder already uses.
#[tracing::instrument(skip_all)]
pub fn nest_request_configurations(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    for builder in classes(dom) {
        let builder_name = dom.node(builder)?.name.clone();
        for inner in configuration_classes(dom, builder) {
            let name = dom.node(inner)?.name.clone();
            if strip_prefix_ignore_case(&name, &builder_name).is_none() {
                let prefixed = format!("{builder_name}{name}");
                dom.rename(inner, prefixed.clone())?;
                rename_references(dom, inner, &prefixed);
                tracing::debug!(class = %inner, from = %name, to = %prefixed, "prefixed request configuration");
            }

            let owned_by_namespace = dom.parent(inner).is_some_and(|owner| dom.namespace(owner).is_some());
            let name = dom.node(inner)?.name.clone();
            if owned_by_namespace && dom.child_named(builder, &name).is_none() {
                dom.move_to(inner, builder)?;
                tracing::debug!(class = %inner, builder = %builder, "nested request configuration");
            }
        }
    }
    Ok(())
}

/// Configuration classes of `builder`'s methods, then the query parameter classes they reference, without repeats.
fn configuration_classes(dom: &CodeDom, builder: ElementId) -> Vec<ElementId> {
    let mut found: Vec<ElementId> = Vec::new();
    let configurations = methods_of(dom, builder)
        .into_iter()
        .flat_map(|(_, method)| method.parameters.iter())
        .filter(|parameter| parameter.kind == ParameterKind::RequestConfiguration && parameter.ty.action_of)
        .filter_map(|parameter| parameter.ty.definition)
        .filter(|definition| dom.class(*definition).is_some());
    for configuration in configurations {
        if !found.contains(&configuration) {
            found.push(configuration);
        }
    }
    let query_parameters: Vec<ElementId> = found
        .iter()
        .flat_map(|configuration| dom.children(*configuration).iter())
        .filter_map(|member| dom.property(*member))
        .filter_map(|property| property.ty.definition)
        .filter(|definition| dom.class(*definition).is_some_and(|class| class.kind == ClassKind::QueryParameters))
        .collect();
    for query in query_parameters {
        if !found.contains(&query) && query != builder {
            found.push(query);
        }
    }
    found
}

/// Replace inline union and intersection types on members with wrapper classes.
///
/// ## Notes
/// - The wrapper is nested in the class declaring the member, or in that class's owner when it is itself nested in a
///   class. It holds one property per member type.
/// - When every member is a model, an enum or a primitive, the wrapper is a model recording the composed type and its
///   discriminator, with a factory, a serializer and a deserializer (plus a backing store when configured).
/// - Members declaring the same composed type in one class share its wrapper.
#[tracing::instrument(skip_all)]
pub fn wrap_composed_types(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let members: Vec<ElementId> = descendants(dom, dom.root())
        .into_iter()
        .filter(|id| {
            matches!(
                dom.category(*id),
                Some(ElementCategory::Method | ElementCategory::Property | ElementCategory::Indexer)
            ) && dom
                .element(*id)
                .is_some_and(|element| element.types().iter().any(|ty| ty.composed.is_some()))
        })
        .collect();

    for member in members {
        let Some(declaring) = dom.parent(member).filter(|owner| dom.class(*owner).is_some()) else {
            continue;
        };
        let host = dom
            .parent(declaring)
            .filter(|owner| dom.class(*owner).is_some())
            .unwrap_or(declaring);

        let composed: Vec<(usize, CodeType)> = dom
            .element(member)
            .map(|element| {
                element
                    .types()
                    .into_iter()
                    .enumerate()
                    .filter(|(_, ty)| ty.composed.is_some())
                    .map(|(index, ty)| (index, ty.clone()))
                    .collect()
            })
            .unwrap_or_default();

        for (index, ty) in composed {
            let replacement = wrapper_type(dom, host, ty, ctx.config.uses_backing_store)?;
            if let Some(slot) = dom
                .element_mut(member)
                .and_then(|element| element.signature_types_mut().into_iter().nth(index))
            {
                *slot = replacement;
            }
        }
    }
    Ok(())
}

/// The reference standing in for `ty`, creating its wrapper in `host` when needed.
fn wrapper_type(dom: &mut CodeDom, host: ElementId, mut ty: CodeType, uses_backing_store: bool) -> RefineResult<CodeType> {
    let Some(composed) = ty.composed.take() else {
        return Ok(ty);
    };
    let mut name = ty.name;
    if dom.node(host)?.name.eq_ignore_ascii_case(&name) {
        name.push_str(COMPOSED_WRAPPER_SUFFIX);
    }

    let existing = dom
        .children(host)
        .iter()
        .copied()
        .find(|child| dom.class(*child).is_some() && dom.name(*child).is_some_and(|n| n.eq_ignore_ascii_case(&name)));
    let wrapper = match existing {
        Some(wrapper) => wrapper,
        None => create_wrapper(dom, host, &name, *composed, uses_backing_store)?,
    };
    let name = dom.node(wrapper)?.name.clone();

    Ok(CodeType {
        is_nullable: ty.is_nullable,
        collection: ty.collection,
        action_of: ty.action_of,
        ..CodeType::defined_by(name, wrapper)
    })
}

fn create_wrapper(
    dom: &mut CodeDom,
    host: ElementId,
    name: &str,
    composed: ComposedType,
    uses_backing_store: bool,
) -> RefineResult<ElementId> {
    let is_model = composed.types.iter().all(|member| match member.definition {
        None => true,
        Some(definition) => {
            dom.class(definition).is_some_and(CodeClass::is_model) || dom.enumeration(definition).is_some()
        }
    });

    let mut member_names: Vec<&str> = composed.types.iter().map(|member| member.name.as_str()).collect();
    member_names.sort_by_key(|member| member.to_ascii_lowercase());
    let description = format!("Composed type wrapper for classes {}", member_names.join(", "));

    let mut class = CodeClass::new(if is_model { ClassKind::Model } else { ClassKind::Custom });
    if is_model {
        class.discriminator = composed.discriminator.clone();
        if uses_backing_store {
            class.add_implements(CodeType::external(BACKED_MODEL_INTERFACE).nullable(false));
        }
    }
    let member_types = composed.types.clone();
    if is_model {
        class.original_composed_type = Some(composed);
    }
    let wrapper = dom.insert(host, Node::new(name, class).with_description(description))?;

    for member in member_types {
        if dom.child_named(wrapper, &member.name).is_some() {
            continue;
        }
        let doc = format!("Composed type representation for type {}", member.name);
        let node = Node::new(member.name.clone(), CodeProperty::new(PropertyKind::Custom, member)).with_description(doc);
        dom.insert(wrapper, node)?;
    }

    if is_model {
        let mut factory = CodeMethod::new(MethodKind::Factory, CodeType::defined_by(name, wrapper).nullable(false))
            .with_parameter(CodeParameter::new(
                "parseNode",
                ParameterKind::ParseNode,
                CodeType::external(PARSE_NODE_INTERFACE).nullable(false),
            ));
        factory.is_static = true;
        dom.insert(
            wrapper,
            Node::new(FACTORY_METHOD_NAME, factory)
                .with_description("Creates a new instance of the appropriate class based on discriminator value"),
        )?;
        let serializer = CodeMethod::new(MethodKind::Serializer, CodeType::void()).with_parameter(CodeParameter::new(
            "writer",
            ParameterKind::Serializer,
            CodeType::external(SERIALIZATION_WRITER_INTERFACE).nullable(false),
        ));
        dom.insert(
            wrapper,
            Node::new(SERIALIZER_METHOD_NAME, serializer).with_description("Serializes information the current object"),
        )?;
        let deserializer = CodeMethod::new(
            MethodKind::Deserializer,
            CodeType::external(FIELD_DESERIALIZERS_TYPE).nullable(false),
        );
        dom.insert(
            wrapper,
            Node::new(DESERIALIZER_METHOD_NAME, deserializer)
                .with_description("The deserialization information for the current model"),
        )?;
        if uses_backing_store {
            let store = CodeProperty::new(
                PropertyKind::BackingStore,
                CodeType::external(BACKING_STORE_INTERFACE).nullable(false),
            );
            dom.insert(
                wrapper,
                Node::new(BACKING_STORE_PROPERTY_NAME, store).with_description("Stores model information."),
            )?;
        }
    }

    tracing::debug!(wrapper = %wrapper, name = %name, model = is_model, "wrapped composed type");
    Ok(wrapper)
}
