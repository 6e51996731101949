//! Abstract temporal type names and their Go equivalents.
//!
//! The model builder emits language-neutral names for dates and durations. Each target maps them to its runtime
//! types; some need only an import because the target already uses the same name.

/// Date and time with offset.
pub const DATE_TIME_OFFSET: &str = "DateTimeOffset";

/// Time span (ISO 8601 duration).
pub const TIME_SPAN: &str = "TimeSpan";

/// Alias of [`TIME_SPAN`] used by some API descriptions.
pub const DURATION: &str = "Duration";

/// Date without time.
pub const DATE_ONLY: &str = "DateOnly";

/// Time of day without date.
pub const TIME_ONLY: &str = "TimeOnly";

/// One entry of a temporal type remap table.
///
/// ## Notes
/// - `replacement` is `None` when the target keeps the abstract name and only needs the import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalMapping {
    pub abstract_name: &'static str,
    pub replacement: Option<&'static str>,
    pub module: &'static str,
    pub symbol: &'static str,
}

/// Go temporal remap table.
pub const GO_TEMPORAL_MAPPINGS: &[TemporalMapping] = &[
    TemporalMapping {
        abstract_name: DATE_TIME_OFFSET,
        replacement: Some("Time"),
        module: super::modules::GO_TIME,
        symbol: "Time",
    },
    TemporalMapping {
        abstract_name: TIME_SPAN,
        replacement: Some("ISODuration"),
        module: super::modules::GO_SERIALIZATION,
        symbol: "ISODuration",
    },
    TemporalMapping {
        abstract_name: DATE_ONLY,
        replacement: None,
        module: super::modules::GO_SERIALIZATION,
        symbol: "DateOnly",
    },
    TemporalMapping {
        abstract_name: TIME_ONLY,
        replacement: None,
        module: super::modules::GO_SERIALIZATION,
        symbol: "TimeOnly",
    },
];

/// Path parameter types the Go emitter formats without `strconv`.
///
/// `Time` is the Go spelling of [`DATE_TIME_OFFSET`], so the answer does not change once temporal types are remapped.
pub const GO_TYPES_WITHOUT_STRCONV: &[&str] = &[DATE_TIME_OFFSET, DURATION, TIME_ONLY, DATE_ONLY, "string", "Time"];

/// Find the mapping for an abstract name (case-insensitive).
pub fn find<'a>(table: &'a [TemporalMapping], name: &str) -> Option<&'a TemporalMapping> {
    table.iter().find(|m| m.abstract_name.eq_ignore_ascii_case(name))
}
