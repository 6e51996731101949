//! End-to-end behaviour of the Go pipeline on whole trees.

mod support;

use refinery::config::GenerationConfiguration;
use refinery::contract::check_output;
use refinery::refiners::{GO_PROFILE, GoRefiner, PipelineError, RefineContext, Target, refiner_for};
use refinery_dom::{
    Access, ClassKind, CodeClass, CodeDom, CodeEnum, CodeMethod, CodeNamespace, CodeParameter, CodeProperty, CodeType,
    ComposedKind, ComposedType, DiscriminatorInformation, DomError, ElementId, MethodKind, ParameterKind, PropertyKind,
};
use support::{child, child_names, find, sample_api};

fn refine(dom: &mut CodeDom) {
    GoRefiner::new(GenerationConfiguration::default())
        .unwrap()
        .refine(dom)
        .unwrap();
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_enum_gets_errors_import() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let status = dom
        .add(
            models,
            "Status",
            CodeEnum {
                options: vec!["active".into(), "inactive".into()],
                ..CodeEnum::default()
            },
        )
        .unwrap();

    refine(&mut dom);

    assert!(dom.enumeration(status).unwrap().usings.contains("errors", ""));
}

#[test]
fn test_nested_model_is_promoted_and_references_follow() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
    let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();
    let home = dom
        .add(
            customer,
            "homeAddress",
            CodeProperty::new(PropertyKind::Custom, CodeType::defined_by("Address", address)),
        )
        .unwrap();

    refine(&mut dom);

    assert_eq!(dom.name(address), Some("Customer_Address"));
    assert_eq!(dom.parent(address), Some(models));
    assert_eq!(dom.property(home).unwrap().ty.name, "Customer_Address");
    assert!(dom.children(customer).iter().all(|member| dom.class(*member).is_none()));
}

#[test]
fn test_generator_is_split_on_request_configuration() {
    let mut dom = CodeDom::new("ApiSdk");
    let users = dom.add(dom.root(), "ApiSdk.Users", CodeNamespace::default()).unwrap();
    let builder = dom.add(users, "UsersRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
    let configuration = dom
        .add(
            users,
            "UsersRequestBuilderGetRequestConfiguration",
            CodeClass::new(ClassKind::RequestConfiguration),
        )
        .unwrap();
    let original = dom
        .add(
            builder,
            "Get",
            CodeMethod::new(MethodKind::RequestGenerator, CodeType::external("RequestInformation"))
                .with_parameter(
                    CodeParameter::new(
                        "requestConfiguration",
                        ParameterKind::RequestConfiguration,
                        CodeType::defined_by("UsersRequestBuilderGetRequestConfiguration", configuration).action_of(),
                    )
                    .optional(),
                ),
        )
        .unwrap();

    refine(&mut dom);

    assert_eq!(dom.name(original), Some("GetWithRequestConfiguration"));
    let with_configuration = dom.method(original).unwrap();
    assert_eq!(with_configuration.parameters.len(), 1);
    assert!(!with_configuration.parameters[0].ty.action_of);

    let plain = child(&dom, builder, "Get");
    assert_ne!(plain, original);
    let plain = dom.method(plain).unwrap();
    assert_eq!(plain.kind, MethodKind::RequestGenerator);
    assert!(!plain.has_parameter_of_kind(ParameterKind::RequestConfiguration));
}

#[test]
fn test_nested_model_drops_property_typed_from_sub_namespace() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let security = dom.add(models, "ApiSdk.Models.Security", CodeNamespace::default()).unwrap();
    let alert = dom.add(security, "Alert", CodeClass::new(ClassKind::Model)).unwrap();
    let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
    let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();
    dom.add(address, "alert", CodeProperty::new(PropertyKind::Custom, CodeType::defined_by("Alert", alert)))
        .unwrap();
    dom.add(address, "street", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
        .unwrap();

    refine(&mut dom);

    assert_eq!(dom.name(address), Some("Customer_Address"));
    let members = child_names(&dom, address);
    assert!(members.contains(&"street".to_string()));
    assert!(!members.iter().any(|member| member.to_ascii_lowercase().contains("alert")));
    let usings = &dom.class(address).unwrap().usings;
    assert!(!usings.contains("ApiSdk/Models/Security", "Alert"));
}

#[test]
fn test_accessors_keep_declared_nullability() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
    let display_name = dom
        .add(
            user,
            "displayName",
            CodeProperty::new(PropertyKind::Custom, CodeType::external("string").nullable(false)),
        )
        .unwrap();

    refine(&mut dom);

    assert!(dom.property(display_name).unwrap().ty.is_nullable);
    let getter = dom.method(child(&dom, user, "GetDisplayName")).unwrap();
    assert!(!getter.return_type.is_nullable);
    let setter = dom.method(child(&dom, user, "SetDisplayName")).unwrap();
    assert!(!setter.parameters[0].ty.is_nullable);
}

#[test]
fn test_union_property_refines_to_model_wrapper() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
    let group = dom.add(models, "Group", CodeClass::new(ClassKind::Model)).unwrap();
    let pet = dom.add(models, "Pet", CodeClass::new(ClassKind::Model)).unwrap();
    let mut discriminator = DiscriminatorInformation {
        property_name: "@odata.type".into(),
        ..DiscriminatorInformation::default()
    };
    discriminator.add_mapping("#user", CodeType::defined_by("User", user));
    discriminator.add_mapping("#group", CodeType::defined_by("Group", group));
    let union = ComposedType {
        kind: ComposedKind::Union,
        types: vec![CodeType::defined_by("User", user), CodeType::defined_by("Group", group)],
        discriminator,
    };
    let owner = dom
        .add(pet, "owner", CodeProperty::new(PropertyKind::Custom, CodeType::composed_of("PetOwner", union)))
        .unwrap();

    let refiner = GoRefiner::new(GenerationConfiguration::default()).unwrap();
    refiner.refine(&mut dom).unwrap();

    let reference = &dom.property(owner).unwrap().ty;
    assert!(reference.composed.is_none());
    let wrapper: ElementId = reference.definition.unwrap();
    assert_eq!(dom.parent(wrapper), Some(models));
    assert_eq!(dom.name(wrapper), Some(reference.name.as_str()));
    let class = dom.class(wrapper).unwrap();
    assert_eq!(class.kind, ClassKind::Model);
    assert!(class.projected_interface.is_some());
    assert_eq!(class.original_composed_type.as_ref().unwrap().types.len(), 2);
    for member in ["GetUser", "SetGroup", "CreateFromDiscriminatorValue"] {
        assert!(child_names(&dom, wrapper).contains(&member.to_string()), "{member} missing");
    }

    let ctx = RefineContext::new(refiner.config(), &GO_PROFILE);
    if let Err(violations) = check_output(&dom, &ctx) {
        panic!("unexpected violations: {:#?}", violations.violations);
    }
}

#[test]
fn test_request_configuration_is_prefixed_and_nested() {
    let mut dom = CodeDom::new("ApiSdk");
    let users = dom.add(dom.root(), "ApiSdk.Users", CodeNamespace::default()).unwrap();
    let builder = dom.add(users, "UsersRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
    let configuration = dom
        .add(users, "GetRequestConfiguration", CodeClass::new(ClassKind::RequestConfiguration))
        .unwrap();
    dom.add(
        builder,
        "ToGetRequestInformation",
        CodeMethod::new(MethodKind::RequestGenerator, CodeType::external("RequestInformation")).with_parameter(
            CodeParameter::new(
                "requestConfiguration",
                ParameterKind::RequestConfiguration,
                CodeType::defined_by("GetRequestConfiguration", configuration).action_of(),
            )
            .optional(),
        ),
    )
    .unwrap();

    refine(&mut dom);

    assert_eq!(dom.name(configuration), Some("UsersRequestBuilderGetRequestConfiguration"));
    assert_eq!(dom.parent(configuration), Some(builder));
    let with_configuration = dom
        .method(child(&dom, builder, "ToGetRequestInformationWithRequestConfiguration"))
        .unwrap();
    assert_eq!(
        with_configuration.parameters[0].ty.name,
        "UsersRequestBuilderGetRequestConfiguration"
    );
}

#[test]
fn test_date_only_keeps_name_and_gains_import() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
    let birthday = dom
        .add(user, "birthday", CodeProperty::new(PropertyKind::Custom, CodeType::external("DateOnly")))
        .unwrap();

    refine(&mut dom);

    assert_eq!(dom.property(birthday).unwrap().ty.name, "DateOnly");
    assert!(dom
        .class(user)
        .unwrap()
        .usings
        .contains("github.com/microsoft/kiota-abstractions-go/serialization", "DateOnly"));
}

// ============================================================================
// Representative API
// ============================================================================

#[test]
fn test_sample_api_satisfies_output_contract() {
    let mut dom = sample_api();
    let refiner = refiner_for(Target::Go, GenerationConfiguration::default()).unwrap();
    let report = refiner.refine(&mut dom).unwrap();
    assert_eq!(report.passes.len(), refiner.pipeline().passes().len());

    let ctx = RefineContext::new(refiner.config(), refiner.profile());
    if let Err(violations) = check_output(&dom, &ctx) {
        panic!("unexpected violations: {:#?}", violations.violations);
    }
}

#[test]
fn test_sample_api_request_builder_shape() {
    let mut dom = sample_api();
    refine(&mut dom);
    let builder = find(&dom, "UsersRequestBuilder");

    let by_id = dom.method(child(&dom, builder, "UserItemById")).unwrap();
    assert_eq!(by_id.kind, MethodKind::IndexerBackwardCompatibility);
    assert_eq!(by_id.parameters[0].name, "userId");
    assert_eq!(by_id.parameters[0].kind, ParameterKind::Path);
    assert!(dom.children(builder).iter().all(|member| dom.indexer(*member).is_none()));

    let raw_url = dom
        .children(builder)
        .iter()
        .filter_map(|member| dom.method(*member))
        .find(|method| method.kind == MethodKind::RawUrlConstructor)
        .unwrap();
    let names: Vec<&str> = raw_url.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["rawUrl", "requestAdapter"]);
    assert_eq!(raw_url.parameters[1].ty.name, "RequestAdapter");

    let get = dom.method(child(&dom, builder, "Get")).unwrap();
    let kinds: Vec<ParameterKind> = get.parameters.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [ParameterKind::RequestConfiguration, ParameterKind::Cancellation]);
    let context = get.parameter_of_kind(ParameterKind::Cancellation).unwrap();
    assert_eq!(context.name, "ctx");
    assert_eq!(context.ty.name, "context.Context");
    assert!(!context.optional);

    let names = child_names(&dom, builder);
    assert!(names.contains(&"ToGetRequestInformation".to_string()));
    assert!(names.contains(&"ToGetRequestInformationWithRequestConfiguration".to_string()));

    let usings = &dom.class(builder).unwrap().usings;
    assert!(usings.contains("ApiSdk/Models", "User"));
    assert!(usings.contains("context", "*context"));
    assert!(usings.contains("github.com/microsoft/kiota-abstractions-go", "ResponseHandler"));
}

#[test]
fn test_sample_api_client_registers_go_serializers() {
    let mut dom = sample_api();
    refine(&mut dom);
    let client = find(&dom, "ApiClient");

    let users = dom.method(child(&dom, client, "users")).unwrap();
    assert_eq!(users.kind, MethodKind::RequestBuilderBackwardCompatibility);
    assert!(dom.children(client).iter().all(|member| {
        dom.property(*member)
            .is_none_or(|property| property.kind != PropertyKind::RequestBuilder)
    }));

    let constructor = dom.method(child(&dom, client, "constructor")).unwrap();
    assert_eq!(
        constructor.serializer_modules,
        [
            "github.com/microsoft/kiota-serialization-json-go.JsonSerializationWriterFactory",
            "github.com/microsoft/kiota-serialization-text-go.TextSerializationWriterFactory",
        ]
    );

    let usings = &dom.class(client).unwrap().usings;
    assert!(usings.contains("github.com/microsoft/kiota-abstractions-go", "RegisterDefaultSerializer"));
    assert!(usings.contains("github.com/microsoft/kiota-serialization-json-go", "JsonParseNodeFactory"));
    assert!(usings.contains("ApiSdk/Users", "UsersRequestBuilder"));
}

#[test]
fn test_sample_api_models() {
    let mut dom = sample_api();
    refine(&mut dom);
    let models = find(&dom, "ApiSdk.Models");

    let user = child(&dom, models, "User");
    let user_class = dom.class(user).unwrap();
    let implemented: Vec<&str> = user_class.implements.iter().map(|ty| ty.name.as_str()).collect();
    assert_eq!(implemented, ["AdditionalDataHolder", "Parsable"]);
    assert!(child_names(&dom, user).contains(&"getFieldDeserializers".to_string()));
    let factory = dom.method(child(&dom, user, "CreateFromDiscriminatorValue")).unwrap();
    assert_eq!(factory.return_type.name, "Parsable");
    assert_eq!(factory.parameters[0].ty.name, "ParseNode");

    let escaped = dom.property(child(&dom, user, "type_escaped")).unwrap();
    assert_eq!(escaped.serialization_name.as_deref(), Some("type"));
    assert_eq!(escaped.access, Access::Private);

    let error = dom.class(child(&dom, models, "ODataError")).unwrap();
    assert_eq!(error.parent_type.as_ref().map(|ty| ty.name.as_str()), Some("ApiError"));

    for name in ["Userable", "Customerable", "Customer_Addressable", "ODataErrorable"] {
        let interface = child(&dom, models, name);
        assert!(dom.interface(interface).is_some(), "{name} is not an interface");
    }
}

#[test]
fn test_sample_api_parameter_bags_live_in_their_builder() {
    let mut dom = sample_api();
    refine(&mut dom);
    let builder = find(&dom, "UsersRequestBuilder");

    let names = child_names(&dom, builder);
    assert!(names.contains(&"UsersRequestBuilderGetQueryParameters".to_string()));
    assert!(names.contains(&"UsersRequestBuilderGetRequestConfiguration".to_string()));
}

#[test]
fn test_query_parameters_keep_reserved_public_names() {
    let mut dom = sample_api();
    refine(&mut dom);
    let query = find(&dom, "UsersRequestBuilderGetQueryParameters");

    let select = dom.property(child(&dom, query, "select")).unwrap();
    assert_eq!(select.access, Access::Public);
    assert!(select.serialization_name.is_none());
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_dangling_reference_is_rejected_before_any_pass() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let gone = dom.add(models, "Gone", CodeClass::new(ClassKind::Model)).unwrap();
    let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
    let property = dom
        .add(user, "type", CodeProperty::new(PropertyKind::Custom, CodeType::defined_by("Gone", gone)))
        .unwrap();
    dom.remove(gone).unwrap();

    let err = GoRefiner::new(GenerationConfiguration::default())
        .unwrap()
        .refine(&mut dom)
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidInput { .. }));
    assert_eq!(dom.name(property), Some("type"));
}

#[test]
fn test_child_listed_twice_is_rejected_before_any_pass() {
    let mut dom = CodeDom::new("ApiSdk");
    let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
    let user = dom.add(models, "User", CodeClass::new(ClassKind::Model)).unwrap();
    dom.node_mut(models).unwrap().children.push(user);

    let err = GoRefiner::new(GenerationConfiguration::default())
        .unwrap()
        .refine(&mut dom)
        .unwrap_err();

    match err {
        PipelineError::InvalidInput { source, .. } => {
            assert!(matches!(source, DomError::DuplicateChild { child_id, .. } if child_id == user));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(dom.name(user), Some("User"));
}

#[test]
fn test_unrefined_tree_breaks_contract() {
    let dom = sample_api();
    let config = GenerationConfiguration::default();
    let err = check_output(&dom, &RefineContext::new(&config, &GO_PROFILE)).unwrap_err();
    assert!(!err.violations.is_empty());
}
