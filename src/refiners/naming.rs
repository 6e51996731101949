//! Identifier normalization: reserved words and the cancellation parameter.

use refinery_dom::{CodeDom, Element, ElementId, MethodKind, ParameterKind, crawl};

use super::errors::RefineResult;
use super::target::{RefineContext, TargetProfile};

/// Whether a member name must be escaped under `profile`.
///
/// ## Notes
/// - Class, interface, enum and namespace names are never escaped.
pub fn needs_escape(profile: &TargetProfile, dom: &CodeDom, id: ElementId, name: &str) -> bool {
    (profile.is_reserved)(name) && !(profile.rename_exempt)(dom, id)
}

/// Rename properties, methods and parameters whose name is a reserved word.
///
/// ## Notes
/// - A renamed property without a serialization name keeps its original name for serialization.
/// - Escaped names are not reserved, so running the pass twice changes nothing.
#[tracing::instrument(skip_all)]
pub fn escape_reserved_names(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let profile = ctx.profile;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let name = dom.node(id)?.name.clone();
        let escape_member = matches!(dom.element(id), Some(Element::Property(_) | Element::Method(_)))
            && needs_escape(profile, dom, id, &name);

        let node = dom.node_mut(id)?;
        if escape_member {
            let escaped = (profile.escape)(&name);
            tracing::debug!(element = %id, from = %name, to = %escaped, "escape reserved name");
            node.name = escaped;
            if let Element::Property(property) = &mut node.element {
                property.serialization_name.get_or_insert(name);
            }
        }
        if let Element::Method(method) = &mut node.element {
            for parameter in method.parameters.iter_mut() {
                if (profile.is_reserved)(&parameter.name) {
                    parameter.name = (profile.escape)(&parameter.name);
                }
            }
        }
        Ok(())
    })
}

/// Give the request executor's cancellation parameter the target's shape.
///
/// Absent parameters are left absent.
#[tracing::instrument(skip_all)]
pub fn normalize_cancellation_parameter(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let shape = ctx.profile.cancellation;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(method) = dom.method_mut(id) else {
            return Ok(());
        };
        if method.kind != MethodKind::RequestExecutor {
            return Ok(());
        }
        if let Some(parameter) = method.parameter_of_kind_mut(ParameterKind::Cancellation) {
            parameter.name = shape.name.to_string();
            parameter.description = shape.description.to_string();
            parameter.optional = false;
            parameter.ty.name = shape.type_name.to_string();
            parameter.ty.is_nullable = false;
            parameter.ty.is_external = true;
            parameter.ty.definition = None;
        }
        Ok(())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GenerationConfiguration;
    use crate::refiners::go::GO_PROFILE;
    use refinery_dom::{
        ClassKind, CodeClass, CodeMethod, CodeNamespace, CodeParameter, CodeProperty, CodeType, PropertyKind,
    };

    fn run(dom: &mut CodeDom, pass: fn(&mut CodeDom, &RefineContext<'_>) -> RefineResult<()>) {
        let config = GenerationConfiguration::default();
        pass(dom, &RefineContext::new(&config, &GO_PROFILE)).unwrap();
    }

    #[test]
    fn test_reserved_property_is_escaped_and_keeps_wire_name() {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
        let ty = dom
            .add(user, "Type", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
            .unwrap();
        run(&mut dom, escape_reserved_names);
        assert_eq!(dom.name(ty), Some("Type_escaped"));
        assert_eq!(dom.property(ty).unwrap().serialization_name.as_deref(), Some("Type"));

        run(&mut dom, escape_reserved_names);
        assert_eq!(dom.name(ty), Some("Type_escaped"));
    }

    #[test]
    fn test_query_parameter_public_property_is_exempt() {
        let mut dom = CodeDom::new("ApiSdk");
        let users = dom.add(dom.root(), "ApiSdk.Users", CodeNamespace::default()).unwrap();
        let query = dom
            .add(users, "UsersRequestBuilderGetQueryParameters", CodeClass::new(ClassKind::QueryParameters))
            .unwrap();
        let select = dom
            .add(query, "select", CodeProperty::new(PropertyKind::QueryParameter, CodeType::external("string")))
            .unwrap();
        run(&mut dom, escape_reserved_names);
        assert_eq!(dom.name(select), Some("select"));
    }

    #[test]
    fn test_class_names_and_parameters() {
        let mut dom = CodeDom::new("ApiSdk");
        let ns = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let class = dom.add(ns, "Func", CodeClass::new(ClassKind::Model)).unwrap();
        let method = dom
            .add(
                class,
                "Range",
                CodeMethod::new(MethodKind::Custom, CodeType::void()).with_parameter(CodeParameter::new(
                    "type",
                    refinery_dom::ParameterKind::Custom,
                    CodeType::external("string"),
                )),
            )
            .unwrap();
        run(&mut dom, escape_reserved_names);
        assert_eq!(dom.name(class), Some("Func"));
        assert_eq!(dom.name(method), Some("Range_escaped"));
        assert_eq!(dom.method(method).unwrap().parameters[0].name, "type_escaped");
    }

    #[test]
    fn test_cancellation_parameter_shape() {
        let mut dom = CodeDom::new("ApiSdk");
        let builder = dom
            .add(dom.root(), "UsersRequestBuilder", CodeClass::new(ClassKind::RequestBuilder))
            .unwrap();
        let executor = dom
            .add(
                builder,
                "Get",
                CodeMethod::new(MethodKind::RequestExecutor, CodeType::new("User")).with_parameter(
                    CodeParameter::new("cancellationToken", ParameterKind::Cancellation, CodeType::new("CancellationToken"))
                        .optional(),
                ),
            )
            .unwrap();
        let plain = dom
            .add(builder, "Post", CodeMethod::new(MethodKind::RequestExecutor, CodeType::new("User")))
            .unwrap();
        run(&mut dom, normalize_cancellation_parameter);

        let parameter = &dom.method(executor).unwrap().parameters[0];
        assert_eq!(parameter.name, "ctx");
        assert_eq!(parameter.ty.name, "context.Context");
        assert!(!parameter.ty.is_nullable);
        assert!(!parameter.optional);
        assert_eq!(parameter.description, "Pass a context parameter to the request");
        assert!(dom.method(plain).unwrap().parameters.is_empty());
    }
}
