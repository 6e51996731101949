//! Member shape changes: indexers, request builder navigation, request generator overloads, constructors.

use refinery_core::lang::conventions::{
    INDEXER_METHOD_SUFFIX, RAW_URL_PARAMETER_NAME, REQUEST_BUILDER_SUFFIX, REQUEST_CONFIGURATION_OVERLOAD_SUFFIX,
    STRING_TYPE_NAME,
};
use refinery_core::naming::{strip_suffix_ignore_case, to_first_upper};
use refinery_dom::{
    Access, ClassKind, CodeDom, CodeMethod, CodeParameter, CodeType, ElementId, MethodKind, Node, ParameterKind,
    PropertyKind, crawl,
};

use super::errors::RefineResult;
use super::helpers::{has_method_of_kind, methods_of};
use super::target::RefineContext;

/// Name of the method replacing an indexer returning `return_type`.
pub fn indexer_method_name(return_type: &str) -> String {
    let base = strip_suffix_ignore_case(return_type, REQUEST_BUILDER_SUFFIX)
        .filter(|base| !base.is_empty())
        .unwrap_or(return_type);
    format!("{}{INDEXER_METHOD_SUFFIX}", to_first_upper(base))
}

/// Replace each indexer with an `IndexerBackwardCompatibility` method taking the key as a path parameter.
#[tracing::instrument(skip_all)]
pub fn replace_indexers(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.class(id).is_none() {
            return Ok(());
        }
        let indexers: Vec<ElementId> = dom
            .children(id)
            .iter()
            .copied()
            .filter(|child| dom.indexer(*child).is_some())
            .collect();
        for indexer_id in indexers {
            let node = dom.remove(indexer_id)?;
            let refinery_dom::Element::Indexer(indexer) = node.element else {
                continue;
            };
            let name = indexer_method_name(&indexer.return_type.name);
            if dom.child_named(id, &name).is_some() {
                tracing::debug!(class = %id, method = %name, "indexer method already present");
                continue;
            }
            let mut key = CodeParameter::new(indexer.index_parameter_name, ParameterKind::Path, indexer.index_type);
            key.description = indexer.index_parameter_description;
            let method = CodeMethod::new(MethodKind::IndexerBackwardCompatibility, indexer.return_type).with_parameter(key);
            dom.insert(id, Node::new(name.clone(), method).with_description(node.description))?;
            tracing::debug!(class = %id, method = %name, "replaced indexer");
        }
        Ok(())
    })
}

/// Replace request builder properties with zero-argument navigation methods of the same name.
#[tracing::instrument(skip_all)]
pub fn replace_builder_properties(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.class(id).is_none() {
            return Ok(());
        }
        let properties: Vec<ElementId> = dom
            .children(id)
            .iter()
            .copied()
            .filter(|child| dom.property(*child).is_some_and(|p| p.kind == PropertyKind::RequestBuilder))
            .collect();
        for property_id in properties {
            let node = dom.remove(property_id)?;
            let refinery_dom::Element::Property(property) = node.element else {
                continue;
            };
            let mut method = CodeMethod::new(
                MethodKind::RequestBuilderBackwardCompatibility,
                property.ty.nullable(false),
            );
            method.access = Access::Public;
            method.is_async = false;
            dom.insert(id, Node::new(node.name, method).with_description(node.description))?;
        }
        Ok(())
    })
}

/// Add a raw-URL constructor next to every request builder constructor taking path parameters.
#[tracing::instrument(skip_all)]
pub fn add_raw_url_constructors(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.class(id).is_none_or(|class| class.kind != ClassKind::RequestBuilder) {
            return Ok(());
        }
        if has_method_of_kind(dom, id, &[MethodKind::RawUrlConstructor]) {
            return Ok(());
        }
        let overloads: Vec<Node> = methods_of(dom, id)
            .into_iter()
            .filter(|(_, method)| {
                method.kind == MethodKind::Constructor && method.has_parameter_of_kind(ParameterKind::PathParameters)
            })
            .filter_map(|(method_id, _)| dom.get(method_id).cloned())
            .map(raw_url_overload)
            .collect();
        for overload in overloads {
            dom.insert(id, overload)?;
        }
        Ok(())
    })
}

fn raw_url_overload(mut node: Node) -> Node {
    if let refinery_dom::Element::Method(method) = &mut node.element {
        method.kind = MethodKind::RawUrlConstructor;
        let raw_url = CodeParameter {
            description: "The raw URL to use for the request builder.".to_string(),
            ..CodeParameter::new(
                RAW_URL_PARAMETER_NAME,
                ParameterKind::RawUrl,
                CodeType::external(STRING_TYPE_NAME).nullable(false),
            )
        };
        for parameter in method.parameters.iter_mut() {
            if parameter.kind == ParameterKind::PathParameters {
                *parameter = raw_url.clone();
            }
        }
    }
    node
}

/// Split each request generator into a variant with the request configuration and one without.
///
/// ## Notes
/// - Applies to classes with request executors or generators. Every generator is renamed
///   `{Name}WithRequestConfiguration`; generators taking a configuration also get a clone under the original name
///   without that parameter.
#[tracing::instrument(skip_all)]
pub fn add_generator_overloads(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.class(id).is_none()
            || !has_method_of_kind(dom, id, &[MethodKind::RequestExecutor, MethodKind::RequestGenerator])
        {
            return Ok(());
        }
        let generators: Vec<ElementId> = methods_of(dom, id)
            .into_iter()
            .filter(|(_, method)| method.kind == MethodKind::RequestGenerator)
            .map(|(method_id, _)| method_id)
            .collect();
        let mut clones = Vec::new();
        for generator in generators {
            let mut node = dom.node(generator)?.clone();
            let dropped = match &mut node.element {
                refinery_dom::Element::Method(method) => {
                    method.remove_parameters_of_kind(ParameterKind::RequestConfiguration)
                }
                _ => 0,
            };
            if dropped > 0 {
                clones.push(node);
            }
            let renamed = format!("{}{REQUEST_CONFIGURATION_OVERLOAD_SUFFIX}", dom.node(generator)?.name);
            dom.rename(generator, renamed)?;
        }
        for clone in clones {
            dom.insert(id, clone)?;
        }
        Ok(())
    })
}

/// Request executors of request builders no longer take a response handler.
#[tracing::instrument(skip_all)]
pub fn remove_response_handlers(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let in_builder = dom
            .parent(id)
            .and_then(|parent| dom.class(parent))
            .is_some_and(|class| class.kind == ClassKind::RequestBuilder);
        if !in_builder {
            return Ok(());
        }
        if let Some(method) = dom.method_mut(id).filter(|m| m.kind == MethodKind::RequestExecutor) {
            method.remove_parameters_of_kind(ParameterKind::ResponseHandler);
        }
        Ok(())
    })
}

/// Drop model properties typed with a model from a namespace nested below the model's own, with their accessors.
///
/// ## Notes
/// - Models nested in other models are checked against their enclosing namespace.
#[tracing::instrument(skip_all)]
pub fn remove_sub_namespace_properties(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if !dom.class(id).is_some_and(|class| class.is_model()) {
            return Ok(());
        }
        let Some(namespace) = dom.namespace_of(id) else {
            return Ok(());
        };
        let doomed: Vec<ElementId> = dom
            .children(id)
            .iter()
            .copied()
            .filter(|child| {
                dom.property(*child).is_some_and(|property| {
                    property.kind == PropertyKind::Custom
                        && !property.ty.is_external
                        && property
                            .ty
                            .definition
                            .and_then(|definition| dom.namespace_of(definition))
                            .is_some_and(|defined_in| dom.is_sub_namespace_of(defined_in, namespace))
                })
            })
            .collect();
        if doomed.is_empty() {
            return Ok(());
        }
        let accessors: Vec<ElementId> = methods_of(dom, id)
            .into_iter()
            .filter(|(_, method)| {
                method.kind.is_accessor() && method.accessed_property.is_some_and(|p| doomed.contains(&p))
            })
            .map(|(method_id, _)| method_id)
            .collect();
        for removed in accessors.into_iter().chain(doomed) {
            tracing::debug!(class = %id, member = %removed, "removed member typed from a sub-namespace");
            dom.remove(removed)?;
        }
        Ok(())
    })
}
