//! Go spellings of the runtime abstractions referenced by generated members.
//!
//! The model builder names abstractions the way the neutral runtime does (`IResponseHandler`, `IRequestAdapter`,
//! `ISerializationWriter`, ...). Go drops the interface prefix, uses plain maps for headers and additional data, and
//! returns the `Parsable` marker from factories.

use refinery_core::lang::conventions::{
    ADDITIONAL_DATA_HOLDER_INTERFACE, GO_ADDITIONAL_DATA_HOLDER, GO_ADDITIONAL_DATA_TYPE, GO_FIELD_DESERIALIZERS_METHOD,
    GO_FIELD_DESERIALIZERS_TYPE, GO_PARSABLE, GO_REQUEST_ADAPTER, GO_REQUEST_OPTION, GO_RESPONSE_HANDLER,
    GO_SERIALIZATION_WRITER, GO_STRING_MAP_TYPE, INTERFACE_PREFIX, RESPONSE_HANDLER_INTERFACE,
    SERIALIZATION_WRITER_INTERFACE, go_make,
};
use refinery_dom::{CodeDom, CodeMethod, CodeProperty, CodeType, MethodKind, ParameterKind, PropertyKind, crawl};

use crate::refiners::errors::RefineResult;
use crate::refiners::target::RefineContext;
use crate::refiners::types::remap_temporal_types;

/// Rewrite method, property and implements types to their Go spellings, then remap temporal types.
#[tracing::instrument(skip_all)]
pub fn correct_core_types(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if let Some(method) = dom.method_mut(id) {
            correct_method(method);
            if method.kind == MethodKind::Deserializer {
                dom.rename(id, GO_FIELD_DESERIALIZERS_METHOD)?;
            }
            remap_temporal_types(dom, ctx, id)?;
        } else if let Some(property) = dom.property_mut(id) {
            correct_property(property);
            remap_temporal_types(dom, ctx, id)?;
        } else if let Some(class) = dom.class_mut(id) {
            for ty in class.implements.iter_mut() {
                if ty.is_named(ADDITIONAL_DATA_HOLDER_INTERFACE) {
                    ty.name = GO_ADDITIONAL_DATA_HOLDER.to_string();
                    ty.is_external = true;
                }
            }
        }
        Ok(())
    })
}

/// Drop a leading `I` from an interface type name (`IParseNode` -> `ParseNode`).
fn strip_interface_prefix(ty: &mut CodeType) {
    let stripped = ty
        .name
        .strip_prefix(INTERFACE_PREFIX)
        .filter(|rest| !rest.is_empty())
        .map(str::to_string);
    if let Some(stripped) = stripped {
        ty.name = stripped;
    }
}

fn correct_method(method: &mut CodeMethod) {
    match method.kind {
        MethodKind::RequestExecutor => {
            for parameter in method.parameters.iter_mut() {
                if parameter.ty.is_named(RESPONSE_HANDLER_INTERFACE) {
                    parameter.ty.name = GO_RESPONSE_HANDLER.to_string();
                    parameter.ty.is_nullable = false;
                }
            }
        }
        MethodKind::RequestGenerator => method.return_type.is_nullable = true,
        MethodKind::Serializer => {
            for parameter in method.parameters.iter_mut() {
                if parameter.ty.is_named(SERIALIZATION_WRITER_INTERFACE) {
                    parameter.ty.name = GO_SERIALIZATION_WRITER.to_string();
                }
            }
        }
        MethodKind::Deserializer => {
            method.return_type.name = GO_FIELD_DESERIALIZERS_TYPE.to_string();
            method.return_type.is_external = true;
            method.return_type.definition = None;
        }
        MethodKind::Constructor | MethodKind::ClientConstructor | MethodKind::RawUrlConstructor => {
            for parameter in method.parameters.iter_mut() {
                match parameter.kind {
                    ParameterKind::RawUrl => parameter.ty.is_nullable = false,
                    ParameterKind::RequestAdapter => strip_interface_prefix(&mut parameter.ty),
                    _ => {}
                }
            }
        }
        MethodKind::IndexerBackwardCompatibility
        | MethodKind::RequestBuilderWithParameters
        | MethodKind::RequestBuilderBackwardCompatibility
        | MethodKind::Factory => {
            method.return_type.is_nullable = true;
            if let Some(parse_node) = method.parameter_of_kind_mut(ParameterKind::ParseNode) {
                parse_node.ty.is_nullable = false;
                strip_interface_prefix(&mut parse_node.ty);
            }
            if method.kind == MethodKind::Factory {
                method.return_type = CodeType::external(GO_PARSABLE).nullable(false);
            }
        }
        _ => {}
    }
}

fn correct_property(property: &mut CodeProperty) {
    match property.kind {
        PropertyKind::RequestAdapter => {
            property.ty.name = GO_REQUEST_ADAPTER.to_string();
            property.ty.is_external = true;
        }
        PropertyKind::BackingStore => strip_interface_prefix(&mut property.ty),
        PropertyKind::AdditionalData => {
            property.ty.name = GO_ADDITIONAL_DATA_TYPE.to_string();
            property.ty.is_external = true;
            property.default_value = Some(go_make(GO_ADDITIONAL_DATA_TYPE));
        }
        PropertyKind::PathParameters => {
            property.ty.name = GO_STRING_MAP_TYPE.to_string();
            property.ty.is_external = true;
            property.ty.is_nullable = true;
            if property.default_value.is_some() {
                property.default_value = Some(go_make(GO_STRING_MAP_TYPE));
            }
        }
        PropertyKind::Headers => {
            property.ty.name = GO_STRING_MAP_TYPE.to_string();
            property.ty.is_external = true;
            property.default_value = Some(go_make(GO_STRING_MAP_TYPE));
        }
        PropertyKind::Options => {
            property.ty = CodeType::external(GO_REQUEST_OPTION).nullable(false).array();
        }
        _ => {}
    }
}
