//! Target parameterization: everything a pass needs to know about the runtime it refines for.
//!
//! Passes are written once and read their target-specific behavior from a [`TargetProfile`] handed to them through
//! the [`RefineContext`]. A profile is plain data plus function pointers, so profiles are `const` values and several
//! targets can share the same passes without any dynamic registration.

use std::fmt;

use refinery_core::lang::temporal::TemporalMapping;
use refinery_dom::{CodeDom, ElementId};

use crate::config::GenerationConfiguration;

use super::imports::ImportRule;

/// Supported refinement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Target {
    Go,
}

impl Target {
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Go => "go",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the normalized cancellation parameter.
#[derive(Debug, Clone, Copy)]
pub struct CancellationShape {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
}

/// Abstract names replaced by a target's defaults, index-aligned with the replacements.
#[derive(Debug, Clone, Copy)]
pub struct ModuleReplacements {
    pub defaults: &'static [&'static str],
    pub replacements: &'static [&'static str],
}

impl ModuleReplacements {
    /// Replacement for a default module name (case-insensitive), if it is one.
    pub fn replacement_for(&self, module: &str) -> Option<&'static str> {
        self.defaults
            .iter()
            .position(|default| default.eq_ignore_ascii_case(module))
            .and_then(|index| self.replacements.get(index).copied())
    }
}

/// Everything the shared passes need to know about one target runtime.
#[derive(Debug, Clone, Copy)]
pub struct TargetProfile {
    pub target: Target,
    /// Whether an identifier is a reserved word; the function applies the target's case rule.
    pub is_reserved: fn(&str) -> bool,
    /// Rename strategy for reserved identifiers.
    pub escape: fn(&str) -> String,
    /// Elements that keep a reserved name.
    pub rename_exempt: fn(&CodeDom, ElementId) -> bool,
    pub temporal_mappings: &'static [TemporalMapping],
    pub import_rules: &'static [ImportRule],
    pub serializers: ModuleReplacements,
    pub deserializers: ModuleReplacements,
    /// Groups of `module.Symbol` names the client class imports to register serializers and deserializers.
    pub serialization_registration: &'static [&'static [&'static str]],
    /// Base type of error models and the module it comes from.
    pub error_parent: (&'static str, &'static str),
    /// Marker every model implements and the module it comes from.
    pub parsable_marker: (&'static str, &'static str),
    /// Parse node type referenced by discriminator resolution and the module it comes from.
    pub parse_node: (&'static str, &'static str),
    /// Module imported (without symbol) by every enum, if any.
    pub enum_import: Option<&'static str>,
    /// Interface name for a model class name.
    pub interface_name: fn(&str) -> String,
    pub cancellation: CancellationShape,
    /// Overrides the configured namespace separator.
    pub namespace_separator: Option<&'static str>,
}

/// Read-only inputs of a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct RefineContext<'a> {
    pub config: &'a GenerationConfiguration,
    pub profile: &'a TargetProfile,
}

impl<'a> RefineContext<'a> {
    pub fn new(config: &'a GenerationConfiguration, profile: &'a TargetProfile) -> Self {
        Self { config, profile }
    }

    /// Namespace separator in effect: the target's override, else the configured one.
    pub fn namespace_separator(&self) -> &str {
        self.profile
            .namespace_separator
            .unwrap_or(self.config.namespace_separator.as_str())
    }

    /// Module path of a namespace, using the separator in effect.
    pub fn module_path(&self, dom: &CodeDom, namespace: ElementId) -> Option<String> {
        dom.module_path(namespace, self.namespace_separator())
    }
}
