//! Module identifiers of the runtime libraries generated clients depend on.
//!
//! Serialization module names are written `module.Symbol`: everything up to the last `.` is the module path, the
//! remainder is the exported symbol (see [`split_module_symbol`]).

/// Default serialization writer factories configured for every generation.
pub const DEFAULT_SERIALIZERS: &[&str] = &[
    "Microsoft.Kiota.Serialization.Json.JsonSerializationWriterFactory",
    "Microsoft.Kiota.Serialization.Text.TextSerializationWriterFactory",
];

/// Default parse node factories configured for every generation.
pub const DEFAULT_DESERIALIZERS: &[&str] = &[
    "Microsoft.Kiota.Serialization.Json.JsonParseNodeFactory",
    "Microsoft.Kiota.Serialization.Text.TextParseNodeFactory",
];

/// Go abstractions module (request adapter, request information, errors).
pub const GO_ABSTRACTIONS: &str = "github.com/microsoft/kiota-abstractions-go";

/// Go serialization abstractions module (parse nodes, writers, `Parsable`).
pub const GO_SERIALIZATION: &str = "github.com/microsoft/kiota-abstractions-go/serialization";

/// Go standard library `context` package.
pub const GO_CONTEXT: &str = "context";

/// Go standard library `strconv` package.
pub const GO_STRCONV: &str = "strconv";

/// Go standard library `strings` package.
pub const GO_STRINGS: &str = "strings";

/// Go standard library `errors` package.
pub const GO_ERRORS: &str = "errors";

/// Go standard library `time` package.
pub const GO_TIME: &str = "time";

/// Go replacements for [`DEFAULT_SERIALIZERS`], index-aligned.
pub const GO_SERIALIZERS: &[&str] = &[
    "github.com/microsoft/kiota-serialization-json-go.JsonSerializationWriterFactory",
    "github.com/microsoft/kiota-serialization-text-go.TextSerializationWriterFactory",
];

/// Go replacements for [`DEFAULT_DESERIALIZERS`], index-aligned.
pub const GO_DESERIALIZERS: &[&str] = &[
    "github.com/microsoft/kiota-serialization-json-go.JsonParseNodeFactory",
    "github.com/microsoft/kiota-serialization-text-go.TextParseNodeFactory",
];

/// Symbols the client class imports to register serializers.
pub const GO_SERIALIZER_REGISTRATION: &[&str] = &[
    "github.com/microsoft/kiota-abstractions-go/serialization.SerializationWriterFactory",
    "github.com/microsoft/kiota-abstractions-go.RegisterDefaultSerializer",
];

/// Symbols the client class imports to register deserializers.
pub const GO_DESERIALIZER_REGISTRATION: &[&str] = &[
    "github.com/microsoft/kiota-abstractions-go/serialization.ParseNodeFactory",
    "github.com/microsoft/kiota-abstractions-go.RegisterDefaultDeserializer",
];

/// Split `module.Symbol` at the last `.`.
///
/// ## Returns
/// - `Some((module, symbol))` when the name contains a `.` with text on both sides, `None` otherwise.
///
/// ## Examples
/// ```rust
/// use refinery_core::lang::modules::split_module_symbol;
///
/// assert_eq!(
///     split_module_symbol("github.com/microsoft/kiota-abstractions-go.RegisterDefaultSerializer"),
///     Some(("github.com/microsoft/kiota-abstractions-go", "RegisterDefaultSerializer"))
/// );
/// assert_eq!(split_module_symbol("strconv"), None);
/// ```
pub fn split_module_symbol(qualified: &str) -> Option<(&str, &str)> {
    let (module, symbol) = qualified.rsplit_once('.')?;
    if module.is_empty() || symbol.is_empty() {
        None
    } else {
        Some((module, symbol))
    }
}
