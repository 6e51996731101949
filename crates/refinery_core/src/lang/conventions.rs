//! Well-known identifiers shared by the passes and the emitters.
//!
//! Language-neutral names (the ones the model builder puts into the CodeDOM) come first, then the Go spellings
//! they are rewritten to.

// ---- Language-neutral CodeDOM names ----

/// Prefix the model builder puts on structural-interface type names (`IRequestAdapter`, `IParseNode`, ...).
pub const INTERFACE_PREFIX: &str = "I";

/// Interface marking models that hold additional (unknown) data.
pub const ADDITIONAL_DATA_HOLDER_INTERFACE: &str = "IAdditionalDataHolder";

/// Abstract response handler type name.
pub const RESPONSE_HANDLER_INTERFACE: &str = "IResponseHandler";

/// Abstract serialization writer type name.
pub const SERIALIZATION_WRITER_INTERFACE: &str = "ISerializationWriter";

/// Abstract parse node type name.
pub const PARSE_NODE_INTERFACE: &str = "IParseNode";

/// Return type of the language-neutral field deserializers method.
pub const FIELD_DESERIALIZERS_TYPE: &str = "IDictionary<string, Action<IParseNode>>";

/// Abstract backing store type name.
pub const BACKING_STORE_INTERFACE: &str = "IBackingStore";

/// Interface marking models backed by a store.
pub const BACKED_MODEL_INTERFACE: &str = "IBackedModel";

/// Name of the backing store property.
pub const BACKING_STORE_PROPERTY_NAME: &str = "backingStore";

/// Name of the static factory resolving a model from a parse node.
pub const FACTORY_METHOD_NAME: &str = "CreateFromDiscriminatorValue";

/// Name of the serializer method.
pub const SERIALIZER_METHOD_NAME: &str = "Serialize";

/// Name of the language-neutral deserializer method.
pub const DESERIALIZER_METHOD_NAME: &str = "GetFieldDeserializers";

/// Suffix appended to a composed type wrapper named like the class that declares it.
pub const COMPOSED_WRAPPER_SUFFIX: &str = "Wrapper";

/// Suffix of request builder class names (`UsersRequestBuilder`).
pub const REQUEST_BUILDER_SUFFIX: &str = "RequestBuilder";

/// Suffix of methods replacing indexers (`UsersById`).
pub const INDEXER_METHOD_SUFFIX: &str = "ById";

/// Suffix appended to request generators that keep the request configuration parameter.
pub const REQUEST_CONFIGURATION_OVERLOAD_SUFFIX: &str = "WithRequestConfiguration";

/// Name of the synthesized raw-URL parameter.
pub const RAW_URL_PARAMETER_NAME: &str = "rawUrl";

/// Name of the parameter of synthesized setters.
pub const SETTER_VALUE_PARAMETER_NAME: &str = "value";

/// Name of synthesized default constructors.
pub const CONSTRUCTOR_METHOD_NAME: &str = "constructor";

/// Prefix of synthesized getters.
pub const GETTER_PREFIX: &str = "Get";

/// Prefix of synthesized setters.
pub const SETTER_PREFIX: &str = "Set";

/// Return type name for methods without a result.
pub const VOID_TYPE_NAME: &str = "void";

/// Built-in string type name.
pub const STRING_TYPE_NAME: &str = "string";

// ---- Go spellings ----

/// Separator between Go package path segments.
pub const GO_NAMESPACE_SEPARATOR: &str = "/";

/// Suffix appended to reserved identifiers.
pub const GO_ESCAPED_SUFFIX: &str = "_escaped";

/// Suffix of the structural interface synthesized for each model (`User` -> `Userable`).
pub const GO_MODEL_INTERFACE_SUFFIX: &str = "able";

/// Name of the cancellation parameter.
pub const GO_CONTEXT_PARAMETER_NAME: &str = "ctx";

/// Type of the cancellation parameter.
pub const GO_CONTEXT_TYPE_NAME: &str = "context.Context";

/// Description of the cancellation parameter.
pub const GO_CONTEXT_PARAMETER_DESCRIPTION: &str = "Pass a context parameter to the request";

/// Marker interface implemented by every model.
pub const GO_PARSABLE: &str = "Parsable";

/// Parse node abstraction referenced by discriminator resolution.
pub const GO_PARSE_NODE: &str = "ParseNode";

/// Base type of every error model.
pub const GO_API_ERROR: &str = "ApiError";

/// Request adapter abstraction.
pub const GO_REQUEST_ADAPTER: &str = "RequestAdapter";

/// Response handler abstraction.
pub const GO_RESPONSE_HANDLER: &str = "ResponseHandler";

/// Serialization writer abstraction.
pub const GO_SERIALIZATION_WRITER: &str = "SerializationWriter";

/// Request option abstraction.
pub const GO_REQUEST_OPTION: &str = "RequestOption";

/// Additional data holder abstraction.
pub const GO_ADDITIONAL_DATA_HOLDER: &str = "AdditionalDataHolder";

/// Name of the deserializer method once rewritten.
pub const GO_FIELD_DESERIALIZERS_METHOD: &str = "getFieldDeserializers";

/// Return type of the field deserializers method.
pub const GO_FIELD_DESERIALIZERS_TYPE: &str = "map[string]func(serialization.ParseNode)(error)";

/// Additional data map type.
pub const GO_ADDITIONAL_DATA_TYPE: &str = "map[string]interface{}";

/// String map type used for path parameters and headers.
pub const GO_STRING_MAP_TYPE: &str = "map[string]string";

/// Build the `make(...)` default value expression for a Go map type.
pub fn go_make(type_name: &str) -> String {
    format!("make({type_name})")
}
