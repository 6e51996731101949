//! Shared fixtures for integration tests.
//!
//! `sample_api()` builds a small but complete client tree: a root client, a request builder with an indexer,
//! executor, generator and parameter bags, and a models namespace with an enum, an error model, a model with a
//! nested model, and a model implementing the additional data holder contract.

#![allow(dead_code)]

use refinery_dom::{
    ClassKind, CodeClass, CodeDom, CodeEnum, CodeIndexer, CodeMethod, CodeNamespace, CodeParameter, CodeProperty,
    CodeType, ElementId, MethodKind, ParameterKind, PropertyKind, descendants,
};

/// First element named `name` in pre-order.
pub fn find(dom: &CodeDom, name: &str) -> ElementId {
    descendants(dom, dom.root())
        .into_iter()
        .find(|id| dom.name(*id) == Some(name))
        .unwrap_or_else(|| panic!("no element named {name}"))
}

/// Direct child of `parent` named `name`.
pub fn child(dom: &CodeDom, parent: ElementId, name: &str) -> ElementId {
    dom.child_named(parent, name)
        .unwrap_or_else(|| panic!("{} has no child named {name}", dom.name(parent).unwrap_or("?")))
}

/// Names of the direct children of `parent`, in order.
pub fn child_names(dom: &CodeDom, parent: ElementId) -> Vec<String> {
    dom.children(parent)
        .iter()
        .filter_map(|id| dom.name(*id))
        .map(str::to_string)
        .collect()
}

fn builder_plumbing(dom: &mut CodeDom, builder: ElementId) {
    let mut path = CodeProperty::new(PropertyKind::PathParameters, CodeType::external("Dictionary<string, object>"));
    path.default_value = Some("new Dictionary<string, object>()".into());
    dom.add(builder, "pathParameters", path).unwrap();
    dom.add(
        builder,
        "requestAdapter",
        CodeProperty::new(PropertyKind::RequestAdapter, CodeType::external("IRequestAdapter")),
    )
    .unwrap();
    dom.add(
        builder,
        "urlTemplate",
        CodeProperty::new(PropertyKind::UrlTemplate, CodeType::external("string").nullable(false)),
    )
    .unwrap();
    dom.add(
        builder,
        "constructor",
        CodeMethod::new(MethodKind::Constructor, CodeType::void())
            .with_parameter(CodeParameter::new(
                "pathParameters",
                ParameterKind::PathParameters,
                CodeType::external("Dictionary<string, object>"),
            ))
            .with_parameter(CodeParameter::new(
                "requestAdapter",
                ParameterKind::RequestAdapter,
                CodeType::external("IRequestAdapter"),
            )),
    )
    .unwrap();
}

pub fn sample_api() -> CodeDom {
    let mut dom = CodeDom::new("ApiSdk");
    let root = dom.root();
    let models = dom.add(root, "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let users = dom.add(root, "ApiSdk.Users", CodeNamespace::default()).unwrap();

    // ---- Models ----

    let mut user_class = CodeClass::new(ClassKind::Model);
    user_class.implements.push(CodeType::external("IAdditionalDataHolder"));
    let user = dom.add(models, "User", user_class).unwrap();
    dom.add(
        user,
        "additionalData",
        CodeProperty::new(PropertyKind::AdditionalData, CodeType::external("IDictionary<string, object>")),
    )
    .unwrap();
    dom.add(user, "displayName", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
        .unwrap();
    dom.add(user, "type", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
        .unwrap();
    dom.add(user, "birthday", CodeProperty::new(PropertyKind::Custom, CodeType::external("DateOnly")))
        .unwrap();
    dom.add(
        user,
        "Serialize",
        CodeMethod::new(MethodKind::Serializer, CodeType::void()).with_parameter(CodeParameter::new(
            "writer",
            ParameterKind::Serializer,
            CodeType::external("ISerializationWriter").nullable(false),
        )),
    )
    .unwrap();
    dom.add(
        user,
        "GetFieldDeserializers",
        CodeMethod::new(MethodKind::Deserializer, CodeType::external("IDictionary<string, Action<IParseNode>>")),
    )
    .unwrap();
    let mut factory = CodeMethod::new(MethodKind::Factory, CodeType::defined_by("User", user)).with_parameter(
        CodeParameter::new("parseNode", ParameterKind::ParseNode, CodeType::external("IParseNode")),
    );
    factory.is_static = true;
    dom.add(user, "CreateFromDiscriminatorValue", factory).unwrap();

    let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
    let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();
    dom.add(address, "street", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
        .unwrap();
    dom.add(
        customer,
        "homeAddress",
        CodeProperty::new(PropertyKind::Custom, CodeType::defined_by("Address", address)),
    )
    .unwrap();

    let mut error = CodeClass::new(ClassKind::Model);
    error.is_error_definition = true;
    dom.add(models, "ODataError", error).unwrap();

    dom.add(
        models,
        "Status",
        CodeEnum {
            options: vec!["active".into(), "suspended".into()],
            ..CodeEnum::default()
        },
    )
    .unwrap();

    // ---- Request builders ----

    let builder = dom.add(users, "UsersRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
    let item = dom.add(users, "UserItemRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
    let query = dom
        .add(users, "UsersRequestBuilderGetQueryParameters", CodeClass::new(ClassKind::QueryParameters))
        .unwrap();
    let configuration = dom
        .add(
            users,
            "UsersRequestBuilderGetRequestConfiguration",
            CodeClass::new(ClassKind::RequestConfiguration),
        )
        .unwrap();

    builder_plumbing(&mut dom, builder);
    builder_plumbing(&mut dom, item);
    dom.add(
        builder,
        "this[]",
        CodeIndexer {
            return_type: CodeType::defined_by("UserItemRequestBuilder", item),
            index_type: CodeType::external("string"),
            index_parameter_name: "userId".into(),
            index_parameter_description: "Unique identifier of the item".into(),
        },
    )
    .unwrap();
    let config_parameter = || {
        CodeParameter::new(
            "requestConfiguration",
            ParameterKind::RequestConfiguration,
            CodeType::defined_by("UsersRequestBuilderGetRequestConfiguration", configuration).action_of(),
        )
        .optional()
    };
    let mut get = CodeMethod::new(MethodKind::RequestExecutor, CodeType::defined_by("User", user).array())
        .with_parameter(config_parameter())
        .with_parameter(
            CodeParameter::new("cancellationToken", ParameterKind::Cancellation, CodeType::external("CancellationToken"))
                .optional(),
        )
        .with_parameter(
            CodeParameter::new("responseHandler", ParameterKind::ResponseHandler, CodeType::external("IResponseHandler"))
                .optional(),
        );
    get.is_async = true;
    dom.add(builder, "Get", get).unwrap();
    dom.add(
        builder,
        "ToGetRequestInformation",
        CodeMethod::new(MethodKind::RequestGenerator, CodeType::external("RequestInformation").nullable(false))
            .with_parameter(config_parameter()),
    )
    .unwrap();

    dom.add(
        query,
        "select",
        CodeProperty::new(PropertyKind::QueryParameter, CodeType::external("string").array()),
    )
    .unwrap();
    dom.add(query, "top", CodeProperty::new(PropertyKind::QueryParameter, CodeType::external("int32")))
        .unwrap();

    dom.add(
        configuration,
        "headers",
        CodeProperty::new(PropertyKind::Headers, CodeType::external("RequestHeaders")),
    )
    .unwrap();
    dom.add(
        configuration,
        "options",
        CodeProperty::new(PropertyKind::Options, CodeType::external("IList<IRequestOption>")),
    )
    .unwrap();
    dom.add(
        configuration,
        "queryParameters",
        CodeProperty::new(PropertyKind::Custom, CodeType::defined_by("UsersRequestBuilderGetQueryParameters", query)),
    )
    .unwrap();

    // ---- Client ----

    let client = dom.add(root, "ApiClient", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
    dom.add(
        client,
        "requestAdapter",
        CodeProperty::new(PropertyKind::RequestAdapter, CodeType::external("IRequestAdapter")),
    )
    .unwrap();
    dom.add(
        client,
        "users",
        CodeProperty::new(PropertyKind::RequestBuilder, CodeType::defined_by("UsersRequestBuilder", builder)),
    )
    .unwrap();
    dom.add(
        client,
        "constructor",
        CodeMethod::new(MethodKind::ClientConstructor, CodeType::void()).with_parameter(CodeParameter::new(
            "requestAdapter",
            ParameterKind::RequestAdapter,
            CodeType::external("IRequestAdapter"),
        )),
    )
    .unwrap();

    dom
}
