//! Import resolution.
//!
//! Imports come from four sources:
//! - a per-target rule table ([`ImportRule`]) evaluated once per element,
//! - type references crossing namespaces,
//! - serialization modules registered by the client constructor,
//! - the target's unconditional enum import.

use refinery_core::lang::modules::split_module_symbol;
use refinery_dom::{CodeDom, CodeUsing, ElementId, MethodKind, crawl};

use super::errors::RefineResult;
use super::helpers::{add_using, enclosing_block};
use super::target::RefineContext;

/// Where the imports of a matching rule are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportScope {
    /// The matching element itself (classes, interfaces, enums).
    Element,
    /// The class, interface or enum enclosing the matching member.
    EnclosingBlock,
}

/// One entry of an import rule table.
#[derive(Debug, Clone, Copy)]
pub struct ImportRule {
    pub predicate: fn(&CodeDom, ElementId) -> bool,
    pub module: &'static str,
    pub symbols: &'static [&'static str],
    pub scope: ImportScope,
}

impl ImportRule {
    /// Block the rule's imports belong on for a matching element.
    pub fn target_block(&self, dom: &CodeDom, id: ElementId) -> Option<ElementId> {
        match self.scope {
            ImportScope::Element => dom.element(id)?.usings().map(|_| id),
            ImportScope::EnclosingBlock => enclosing_block(dom, id),
        }
    }

    pub fn usings(&self) -> impl Iterator<Item = CodeUsing> + '_ {
        self.symbols
            .iter()
            .map(|symbol| CodeUsing::external(self.module, *symbol))
    }
}

/// Evaluate the target's rule table against every element.
#[tracing::instrument(skip_all)]
pub fn add_default_imports(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let rules = ctx.profile.import_rules;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        for rule in rules {
            if !(rule.predicate)(dom, id) {
                continue;
            }
            let Some(block) = rule.target_block(dom, id) else {
                continue;
            };
            for using in rule.usings() {
                add_using(dom, block, using)?;
            }
        }
        Ok(())
    })
}

/// Import every type a class's members reference from another namespace.
///
/// ## Notes
/// - Only internal types with a resolved definition count; the import is `(module path, type name)` where the module
///   path is the defining namespace with the separator in effect.
#[tracing::instrument(skip_all)]
pub fn add_type_imports(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.class(id).is_none() {
            return Ok(());
        }
        let own_namespace = dom.namespace_of(id);
        let mut usings = Vec::new();
        for member in dom.children(id) {
            let Some(element) = dom.element(*member) else {
                continue;
            };
            for ty in element.types() {
                if ty.is_external {
                    continue;
                }
                let Some(definition) = ty.definition else {
                    continue;
                };
                let namespace = dom.namespace_of(definition);
                if namespace.is_none() || namespace == own_namespace {
                    continue;
                }
                if let Some(module) = namespace.and_then(|ns| ctx.module_path(dom, ns)) {
                    let name = dom.name(definition).unwrap_or(ty.name.as_str()).to_string();
                    usings.push(CodeUsing::internal(module, name));
                }
            }
        }
        for using in usings {
            if add_using(dom, id, using.clone())? {
                tracing::debug!(class = %id, module = %using.module, symbol = %using.symbol, "type import");
            }
        }
        Ok(())
    })
}

/// Every enum imports the target's enum module (Go: `errors`, used by the generated parse function).
#[tracing::instrument(skip_all)]
pub fn add_enum_imports(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let Some(module) = ctx.profile.enum_import else {
        return Ok(());
    };
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if dom.enumeration(id).is_some() {
            add_using(dom, id, CodeUsing::external(module, ""))?;
        }
        Ok(())
    })
}

/// Replace default serialization module names on client constructors with the target's equivalents.
///
/// ## Notes
/// - Empty module lists are first seeded from the configuration.
/// - Names without a known replacement pass through unchanged.
#[tracing::instrument(skip_all)]
pub fn replace_serialization_modules(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let profile = ctx.profile;
    let config = ctx.config;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(method) = dom.method_mut(id) else {
            return Ok(());
        };
        if method.kind != MethodKind::ClientConstructor {
            return Ok(());
        }
        if method.serializer_modules.is_empty() {
            method.serializer_modules = config.serializers.iter().cloned().collect();
        }
        if method.deserializer_modules.is_empty() {
            method.deserializer_modules = config.deserializers.iter().cloned().collect();
        }
        for module in method.serializer_modules.iter_mut() {
            if let Some(replacement) = profile.serializers.replacement_for(module) {
                *module = replacement.to_string();
            }
        }
        for module in method.deserializer_modules.iter_mut() {
            if let Some(replacement) = profile.deserializers.replacement_for(module) {
                *module = replacement.to_string();
            }
        }
        Ok(())
    })
}

/// Import the registration helpers and every configured factory into the client class.
#[tracing::instrument(skip_all)]
pub fn add_serialization_imports(dom: &mut CodeDom, ctx: &RefineContext<'_>) -> RefineResult<()> {
    let registration = ctx.profile.serialization_registration;
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let Some(method) = dom.method(id) else {
            return Ok(());
        };
        if method.kind != MethodKind::ClientConstructor {
            return Ok(());
        }
        let Some(class) = dom.parent(id).filter(|parent| dom.class(*parent).is_some()) else {
            return Ok(());
        };
        let usings: Vec<CodeUsing> = registration
            .iter()
            .flat_map(|group| group.iter().copied())
            .chain(method.serializer_modules.iter().map(String::as_str))
            .chain(method.deserializer_modules.iter().map(String::as_str))
            .filter_map(split_module_symbol)
            .map(|(module, symbol)| CodeUsing::external(module, symbol))
            .collect();
        for using in usings {
            add_using(dom, class, using)?;
        }
        Ok(())
    })
}
