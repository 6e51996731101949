//! Go instantiation of the refinement pipeline.
//!
//! ## Module Organization
//!
//! - `mod.rs` - [`GO_PROFILE`], the ordered Go pass list and [`GoRefiner`]
//! - `rules.rs` - import rule table, escaping and naming policy
//! - `core_types.rs` - Go spellings of runtime abstractions
//!
//! ## Notes
//! - Pass order is a correctness dependency. Each pass declares what it relies on and
//!   [`PipelineBuilder::build`](crate::refiners::PipelineBuilder::build) rejects orderings that break it.

pub mod core_types;
pub mod rules;

use refinery_core::lang::conventions::{
    GO_API_ERROR, GO_CONTEXT_PARAMETER_DESCRIPTION, GO_CONTEXT_PARAMETER_NAME, GO_CONTEXT_TYPE_NAME,
    GO_NAMESPACE_SEPARATOR, GO_PARSABLE, GO_PARSE_NODE,
};
use refinery_core::lang::go_keywords;
use refinery_core::lang::modules::{
    DEFAULT_DESERIALIZERS, DEFAULT_SERIALIZERS, GO_ABSTRACTIONS, GO_DESERIALIZER_REGISTRATION, GO_DESERIALIZERS,
    GO_ERRORS, GO_SERIALIZATION, GO_SERIALIZER_REGISTRATION, GO_SERIALIZERS,
};
use refinery_core::lang::temporal::GO_TEMPORAL_MAPPINGS;
use refinery_dom::CodeDom;

use crate::config::GenerationConfiguration;

use super::errors::PipelineError;
use super::pipeline::{Invariant, Pass, Pipeline, PipelineBuilder, RefineReport};
use super::target::{CancellationShape, ModuleReplacements, RefineContext, Target, TargetProfile};
use super::{accessors, classes, flatten, imports, interfaces, naming, signatures, types};

/// Everything the shared passes need to know about Go.
pub const GO_PROFILE: TargetProfile = TargetProfile {
    target: Target::Go,
    is_reserved: go_keywords::is_reserved,
    escape: rules::escape,
    rename_exempt: rules::rename_exempt,
    temporal_mappings: GO_TEMPORAL_MAPPINGS,
    import_rules: rules::GO_IMPORT_RULES,
    serializers: ModuleReplacements {
        defaults: DEFAULT_SERIALIZERS,
        replacements: GO_SERIALIZERS,
    },
    deserializers: ModuleReplacements {
        defaults: DEFAULT_DESERIALIZERS,
        replacements: GO_DESERIALIZERS,
    },
    serialization_registration: &[GO_SERIALIZER_REGISTRATION, GO_DESERIALIZER_REGISTRATION],
    error_parent: (GO_API_ERROR, GO_ABSTRACTIONS),
    parsable_marker: (GO_PARSABLE, GO_SERIALIZATION),
    parse_node: (GO_PARSE_NODE, GO_SERIALIZATION),
    enum_import: Some(GO_ERRORS),
    interface_name: rules::interface_name,
    cancellation: CancellationShape {
        name: GO_CONTEXT_PARAMETER_NAME,
        type_name: GO_CONTEXT_TYPE_NAME,
        description: GO_CONTEXT_PARAMETER_DESCRIPTION,
    },
    namespace_separator: Some(GO_NAMESPACE_SEPARATOR),
};

use Invariant::*;

/// Go passes in execution order.
pub const GO_PASSES: &[Pass] = &[
    Pass {
        name: "nest-request-configurations",
        requires: &[],
        establishes: &[RequestConfigurationsNested],
        run: classes::nest_request_configurations,
    },
    Pass {
        name: "replace-indexers",
        requires: &[],
        establishes: &[IndexersReplaced],
        run: signatures::replace_indexers,
    },
    Pass {
        name: "normalize-cancellation",
        requires: &[],
        establishes: &[CancellationNormalized],
        run: naming::normalize_cancellation_parameter,
    },
    Pass {
        name: "scope-discriminator-mappings",
        requires: &[],
        establishes: &[DiscriminatorsScoped],
        run: interfaces::scope_discriminator_mappings,
    },
    Pass {
        name: "builder-properties-to-methods",
        requires: &[],
        establishes: &[BuilderPropertiesReplaced],
        run: signatures::replace_builder_properties,
    },
    Pass {
        name: "wrap-composed-types",
        requires: &[BuilderPropertiesReplaced],
        establishes: &[ComposedTypesWrapped],
        run: classes::wrap_composed_types,
    },
    Pass {
        name: "raw-url-constructors",
        requires: &[],
        establishes: &[RawUrlOverloadsAdded],
        run: signatures::add_raw_url_constructors,
    },
    Pass {
        name: "remove-sub-namespace-properties",
        requires: &[],
        establishes: &[SubNamespacePropertiesRemoved],
        run: signatures::remove_sub_namespace_properties,
    },
    Pass {
        name: "flatten-inner-models",
        requires: &[ComposedTypesWrapped],
        establishes: &[InnerModelsFlattened],
        run: flatten::flatten_inner_models,
    },
    Pass {
        name: "escape-reserved-names",
        requires: &[IndexersReplaced, BuilderPropertiesReplaced, RawUrlOverloadsAdded],
        establishes: &[ReservedNamesEscaped],
        run: naming::escape_reserved_names,
    },
    Pass {
        name: "type-imports",
        requires: &[RequestConfigurationsNested, InnerModelsFlattened],
        establishes: &[TypeImportsAdded],
        run: imports::add_type_imports,
    },
    Pass {
        name: "default-imports",
        requires: &[ComposedTypesWrapped, InnerModelsFlattened, RawUrlOverloadsAdded],
        establishes: &[DefaultImportsAdded],
        run: imports::add_default_imports,
    },
    Pass {
        name: "correct-core-types",
        requires: &[DefaultImportsAdded],
        establishes: &[CoreTypesCorrected],
        run: core_types::correct_core_types,
    },
    Pass {
        name: "generator-overloads",
        requires: &[ReservedNamesEscaped],
        establishes: &[GeneratorOverloadsAdded],
        run: signatures::add_generator_overloads,
    },
    Pass {
        name: "unwrap-configuration-callbacks",
        requires: &[GeneratorOverloadsAdded],
        establishes: &[ConfigurationCallbacksUnwrapped],
        run: types::unwrap_configuration_callbacks,
    },
    Pass {
        name: "accessors",
        requires: &[CoreTypesCorrected, ReservedNamesEscaped],
        establishes: &[AccessorsAdded],
        run: accessors::add_accessors,
    },
    Pass {
        name: "default-constructors",
        requires: &[RawUrlOverloadsAdded],
        establishes: &[DefaultConstructorsAdded],
        run: accessors::add_default_constructors,
    },
    Pass {
        name: "model-properties-nullable",
        requires: &[CoreTypesCorrected, AccessorsAdded],
        establishes: &[ModelPropertiesNullable],
        run: types::make_model_properties_nullable,
    },
    Pass {
        name: "enum-imports",
        requires: &[],
        establishes: &[EnumImportsAdded],
        run: imports::add_enum_imports,
    },
    Pass {
        name: "replace-serialization-modules",
        requires: &[],
        establishes: &[SerializationModulesReplaced],
        run: imports::replace_serialization_modules,
    },
    Pass {
        name: "serialization-imports",
        requires: &[SerializationModulesReplaced],
        establishes: &[SerializationImportsAdded],
        run: imports::add_serialization_imports,
    },
    Pass {
        name: "error-parents",
        requires: &[],
        establishes: &[ErrorParentsSet],
        run: interfaces::add_error_parents,
    },
    Pass {
        name: "discriminator-imports",
        requires: &[DiscriminatorsScoped, InnerModelsFlattened],
        establishes: &[DiscriminatorImportsAdded],
        run: interfaces::add_discriminator_imports,
    },
    Pass {
        name: "parsable-marker",
        requires: &[CoreTypesCorrected],
        establishes: &[ParsableMarked],
        run: interfaces::mark_parsable,
    },
    Pass {
        name: "model-interfaces",
        requires: &[AccessorsAdded, ParsableMarked, ErrorParentsSet, DefaultImportsAdded],
        establishes: &[ModelInterfacesProjected],
        run: interfaces::project_model_interfaces,
    },
    Pass {
        name: "remove-response-handlers",
        requires: &[CoreTypesCorrected],
        establishes: &[ResponseHandlersRemoved],
        run: signatures::remove_response_handlers,
    },
];

/// Assemble and check the Go pipeline.
pub fn go_pipeline() -> Result<Pipeline, PipelineError> {
    GO_PASSES
        .iter()
        .fold(PipelineBuilder::new(Target::Go), |builder, pass| builder.pass(*pass))
        .build()
}

/// Refines trees for Go with a fixed configuration.
#[derive(Debug, Clone)]
pub struct GoRefiner {
    config: GenerationConfiguration,
    pipeline: Pipeline,
}

impl GoRefiner {
    /// ## Errors
    /// - [`PipelineError`] when the pass list breaks its own ordering contract.
    pub fn new(config: GenerationConfiguration) -> Result<Self, PipelineError> {
        Ok(Self {
            config,
            pipeline: go_pipeline()?,
        })
    }

    pub fn config(&self) -> &GenerationConfiguration {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Refine `dom` in place.
    ///
    /// ## Errors
    /// - See [`Pipeline::run`]. On error the tree is partially refined and must be discarded.
    pub fn refine(&self, dom: &mut CodeDom) -> Result<RefineReport, PipelineError> {
        let ctx = RefineContext::new(&self.config, &GO_PROFILE);
        self.pipeline.run(dom, &ctx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_go_pipeline_ordering_holds() {
        let pipeline = go_pipeline().unwrap();
        let plan: Vec<&str> = pipeline.plan().collect();
        assert_eq!(plan.len(), GO_PASSES.len());
        assert_eq!(plan.first(), Some(&"nest-request-configurations"));
        assert_eq!(plan.last(), Some(&"remove-response-handlers"));
    }

    #[test]
    fn test_profile_overrides_namespace_separator() {
        let config = GenerationConfiguration::default();
        let ctx = RefineContext::new(&config, &GO_PROFILE);
        assert_eq!(ctx.namespace_separator(), "/");
    }

    #[test]
    fn test_reserved_words_ignore_case() {
        assert!((GO_PROFILE.is_reserved)("Type"));
        assert!((GO_PROFILE.is_reserved)("SELECT"));
        assert!(!(GO_PROFILE.is_reserved)("user"));
    }

    #[test]
    fn test_empty_tree_refines() {
        let refiner = GoRefiner::new(GenerationConfiguration::default()).unwrap();
        let mut dom = CodeDom::new("ApiSdk");
        let report = refiner.refine(&mut dom).unwrap();
        assert_eq!(report.passes.len(), GO_PASSES.len());
        assert_eq!(report.elements, 1);
    }
}
