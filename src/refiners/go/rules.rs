//! Go import rules and identifier policy.

use refinery_core::lang::conventions::{ADDITIONAL_DATA_HOLDER_INTERFACE, GO_ESCAPED_SUFFIX, GO_MODEL_INTERFACE_SUFFIX};
use refinery_core::lang::modules::{GO_ABSTRACTIONS, GO_CONTEXT, GO_SERIALIZATION, GO_STRCONV, GO_STRINGS};
use refinery_core::lang::temporal::GO_TYPES_WITHOUT_STRCONV;
use refinery_dom::{
    Access, ClassKind, CodeClass, CodeDom, CodeMethod, ComposedKind, ElementCategory, ElementId, MethodKind,
    ParameterKind, PropertyKind,
};

use crate::refiners::imports::{ImportRule, ImportScope};

/// `{name}_escaped`.
pub fn escape(name: &str) -> String {
    format!("{name}{GO_ESCAPED_SUFFIX}")
}

/// `User` -> `Userable`.
pub fn interface_name(class_name: &str) -> String {
    format!("{class_name}{GO_MODEL_INTERFACE_SUFFIX}")
}

/// Public fields of query parameter and parameter set classes keep their names; the emitter tags them with the wire
/// name instead.
pub fn rename_exempt(dom: &CodeDom, id: ElementId) -> bool {
    let public_property = dom.property(id).is_some_and(|property| property.access == Access::Public);
    public_property
        && dom
            .parent(id)
            .and_then(|parent| dom.class(parent))
            .is_some_and(|class| class.kind.is_parameter_bag())
}

fn method_is(dom: &CodeDom, id: ElementId, kinds: &[MethodKind]) -> bool {
    dom.method(id).is_some_and(|method| kinds.contains(&method.kind))
}

fn model(dom: &CodeDom, id: ElementId) -> Option<&CodeClass> {
    dom.class(id).filter(|class| class.kind == ClassKind::Model)
}

fn request_adapter_property(dom: &CodeDom, id: ElementId) -> bool {
    dom.property(id).is_some_and(|property| property.kind == PropertyKind::RequestAdapter)
}

fn request_generator(dom: &CodeDom, id: ElementId) -> bool {
    method_is(dom, id, &[MethodKind::RequestGenerator])
}

fn request_executor(dom: &CodeDom, id: ElementId) -> bool {
    method_is(dom, id, &[MethodKind::RequestExecutor])
}

fn request_method(dom: &CodeDom, id: ElementId) -> bool {
    method_is(dom, id, &[MethodKind::RequestExecutor, MethodKind::RequestGenerator])
}

/// Constructors with a path parameter the emitter must format through `strconv`.
fn constructor_with_formatted_path(dom: &CodeDom, id: ElementId) -> bool {
    dom.method(id)
        .filter(|method| method.kind == MethodKind::Constructor)
        .is_some_and(|method| {
            method.parameters.iter().any(|parameter| {
                parameter.kind == ParameterKind::Path
                    && !GO_TYPES_WITHOUT_STRCONV
                        .iter()
                        .any(|name| parameter.ty.is_named(name))
            })
        })
}

fn serializer(dom: &CodeDom, id: ElementId) -> bool {
    method_is(dom, id, &[MethodKind::Serializer])
}

fn parse_node_consumer(dom: &CodeDom, id: ElementId) -> bool {
    method_is(dom, id, &[MethodKind::Deserializer, MethodKind::Factory])
}

fn model_class(dom: &CodeDom, id: ElementId) -> bool {
    model(dom, id).is_some()
}

/// Request generators sending a collection of models.
fn generator_with_parsable_collection_body(dom: &CodeDom, id: ElementId) -> bool {
    let body_is_model_collection = |method: &CodeMethod| {
        method.parameters.iter().any(|parameter| {
            parameter.kind == ParameterKind::RequestBody
                && parameter.ty.is_collection()
                && parameter
                    .ty
                    .definition
                    .and_then(|definition| dom.category(definition))
                    .is_some_and(|category| matches!(category, ElementCategory::Class | ElementCategory::Interface))
        })
    };
    dom.method(id)
        .filter(|method| method.kind == MethodKind::RequestGenerator)
        .is_some_and(body_is_model_collection)
}

fn additional_data_holder(dom: &CodeDom, id: ElementId) -> bool {
    let Some(class) = model(dom, id) else {
        return false;
    };
    class.implements.iter().any(|ty| ty.is_named(ADDITIONAL_DATA_HOLDER_INTERFACE))
        || dom
            .children(id)
            .iter()
            .any(|child| dom.property(*child).is_some_and(|p| p.kind == PropertyKind::AdditionalData))
}

fn composed_wrapper(dom: &CodeDom, id: ElementId, kind: ComposedKind) -> bool {
    dom.class(id)
        .and_then(|class| class.original_composed_type.as_ref())
        .is_some_and(|composed| {
            composed.kind == kind && composed.has_internal_member() && composed.discriminator.has_basic_information()
        })
}

fn union_wrapper(dom: &CodeDom, id: ElementId) -> bool {
    composed_wrapper(dom, id, ComposedKind::Union)
}

fn intersection_wrapper(dom: &CodeDom, id: ElementId) -> bool {
    composed_wrapper(dom, id, ComposedKind::Intersection)
}

const fn member(
    predicate: fn(&CodeDom, ElementId) -> bool,
    module: &'static str,
    symbols: &'static [&'static str],
) -> ImportRule {
    ImportRule {
        predicate,
        module,
        symbols,
        scope: ImportScope::EnclosingBlock,
    }
}

const fn block(
    predicate: fn(&CodeDom, ElementId) -> bool,
    module: &'static str,
    symbols: &'static [&'static str],
) -> ImportRule {
    ImportRule {
        predicate,
        module,
        symbols,
        scope: ImportScope::Element,
    }
}

/// Imports implied by element roles.
pub const GO_IMPORT_RULES: &[ImportRule] = &[
    member(request_adapter_property, GO_ABSTRACTIONS, &["RequestAdapter"]),
    member(request_generator, GO_ABSTRACTIONS, &["RequestInformation", "HttpMethod", "RequestOption"]),
    member(request_executor, GO_ABSTRACTIONS, &["ResponseHandler"]),
    member(constructor_with_formatted_path, GO_STRCONV, &["FormatBool"]),
    member(serializer, GO_SERIALIZATION, &["SerializationWriter"]),
    member(parse_node_consumer, GO_SERIALIZATION, &["ParseNode", "Parsable"]),
    block(model_class, GO_SERIALIZATION, &["Parsable"]),
    member(generator_with_parsable_collection_body, GO_SERIALIZATION, &["Parsable"]),
    block(additional_data_holder, GO_SERIALIZATION, &["AdditionalDataHolder"]),
    block(union_wrapper, GO_STRINGS, &["EqualFold"]),
    member(request_method, GO_CONTEXT, &["*context"]),
    block(intersection_wrapper, GO_SERIALIZATION, &["MergeDeserializersForIntersectionWrapper"]),
];
