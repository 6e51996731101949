//! Output contract of a refined tree.
//!
//! After a successful run the tree must satisfy four properties an emitter relies on:
//! no model nested in a model, no escapable identifier spelled as a reserved word (unless exempt), every element
//! matching an import rule carries the rule's imports, and every model has a live projected interface.
//! [`verify_output`] reports every violation instead of stopping at the first one.

use miette::Diagnostic;
use refinery_dom::{CodeDom, Element, ElementId, descendants};
use thiserror::Error;

use crate::refiners::RefineContext;
use crate::refiners::helpers::is_inner_model;
use crate::refiners::naming::needs_escape;

/// One broken output property.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ContractViolation {
    #[error("model {id} (`{name}`) is still nested in another model")]
    #[diagnostic(code(refinery::contract::nested_model))]
    NestedModel { id: ElementId, name: String },

    #[error("{id} (`{owner}`) uses the reserved identifier `{identifier}`")]
    #[diagnostic(code(refinery::contract::reserved_identifier))]
    ReservedIdentifier {
        id: ElementId,
        owner: String,
        identifier: String,
    },

    #[error("{id} (`{name}`) requires import `{module}` :: `{symbol}` on {block}")]
    #[diagnostic(code(refinery::contract::missing_import))]
    MissingImport {
        id: ElementId,
        name: String,
        block: ElementId,
        module: String,
        symbol: String,
    },

    #[error("model {id} (`{name}`) has no projected interface")]
    #[diagnostic(code(refinery::contract::missing_interface))]
    MissingInterface { id: ElementId, name: String },
}

/// Every violation found in one tree.
#[derive(Debug, Error, Diagnostic)]
#[error("refined tree breaks the output contract ({} violation(s))", violations.len())]
#[diagnostic(code(refinery::contract::violated))]
pub struct ContractViolations {
    #[related]
    pub violations: Vec<ContractViolation>,
}

/// Check the output contract and collect every violation, in pre-order.
#[tracing::instrument(skip_all, fields(elements = dom.len()))]
pub fn verify_output(dom: &CodeDom, ctx: &RefineContext<'_>) -> Vec<ContractViolation> {
    let mut violations = Vec::new();
    for id in descendants(dom, dom.root()) {
        let Some(node) = dom.get(id) else {
            continue;
        };
        let name = node.name.as_str();

        if is_inner_model(dom, id) {
            violations.push(ContractViolation::NestedModel {
                id,
                name: name.to_string(),
            });
        }

        check_identifiers(dom, ctx, id, &node.element, name, &mut violations);
        check_imports(dom, ctx, id, name, &mut violations);

        if let Element::Class(class) = &node.element {
            let live = class
                .projected_interface
                .is_some_and(|iface| dom.interface(iface).is_some());
            if class.is_model() && !live {
                violations.push(ContractViolation::MissingInterface {
                    id,
                    name: name.to_string(),
                });
            }
        }
    }
    if !violations.is_empty() {
        tracing::warn!(violations = violations.len(), "output contract violated");
    }
    violations
}

/// [`verify_output`] as a `Result`.
///
/// ## Errors
/// - [`ContractViolations`] with every violation when at least one property is broken.
pub fn check_output(dom: &CodeDom, ctx: &RefineContext<'_>) -> Result<(), ContractViolations> {
    let violations = verify_output(dom, ctx);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ContractViolations { violations })
    }
}

fn check_identifiers(
    dom: &CodeDom,
    ctx: &RefineContext<'_>,
    id: ElementId,
    element: &Element,
    name: &str,
    violations: &mut Vec<ContractViolation>,
) {
    let reserved = |identifier: &str| ContractViolation::ReservedIdentifier {
        id,
        owner: name.to_string(),
        identifier: identifier.to_string(),
    };
    match element {
        Element::Property(_) if needs_escape(ctx.profile, dom, id, name) => violations.push(reserved(name)),
        Element::Method(method) => {
            if needs_escape(ctx.profile, dom, id, name) {
                violations.push(reserved(name));
            }
            for parameter in &method.parameters {
                if (ctx.profile.is_reserved)(&parameter.name) {
                    violations.push(reserved(&parameter.name));
                }
            }
        }
        _ => {}
    }
}

fn check_imports(
    dom: &CodeDom,
    ctx: &RefineContext<'_>,
    id: ElementId,
    name: &str,
    violations: &mut Vec<ContractViolation>,
) {
    for rule in ctx.profile.import_rules {
        if !(rule.predicate)(dom, id) {
            continue;
        }
        let Some(block) = rule.target_block(dom, id) else {
            continue;
        };
        let Some(usings) = dom.element(block).and_then(Element::usings) else {
            continue;
        };
        for symbol in rule.symbols {
            if !usings.contains(rule.module, symbol) {
                violations.push(ContractViolation::MissingImport {
                    id,
                    name: name.to_string(),
                    block,
                    module: rule.module.to_string(),
                    symbol: symbol.to_string(),
                });
            }
        }
    }
}
