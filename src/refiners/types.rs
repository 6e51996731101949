//! Type reference normalization shared by every target.

use refinery_core::lang::temporal;
use refinery_dom::{CodeDom, CodeUsing, Element, ElementId, ParameterKind, PropertyKind, crawl};

use super::errors::RefineResult;
use super::helpers::add_using;
use super::target::RefineContext;

/// Rewrite temporal types in a member's signature and import their module into the owning class.
///
/// ## Notes
/// - Mappings without a replacement keep the abstract name and only add the import.
/// - Members owned by something other than a class are renamed but get no import.
pub fn remap_temporal_types(dom: &mut CodeDom, ctx: &RefineContext<'_>, member: ElementId) -> RefineResult<()> {
    let table = ctx.profile.temporal_mappings;
    let mut usings = Vec::new();
    if let Some(element) = dom.element_mut(member) {
        for ty in element.signature_types_mut() {
            let Some(mapping) = temporal::find(table, &ty.name) else {
                continue;
            };
            if let Some(replacement) = mapping.replacement {
                ty.name = replacement.to_string();
            }
            usings.push(CodeUsing::external(mapping.module, mapping.symbol));
        }
    }
    let Some(owner) = dom.parent(member).filter(|parent| dom.class(*parent).is_some()) else {
        return Ok(());
    };
    for using in usings {
        add_using(dom, owner, using)?;
    }
    Ok(())
}

/// Custom properties of model classes become nullable.
#[tracing::instrument(skip_all)]
pub fn make_model_properties_nullable(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        let in_model = dom.parent(id).and_then(|p| dom.class(p)).is_some_and(|c| c.is_model());
        if !in_model {
            return Ok(());
        }
        if let Some(property) = dom.property_mut(id).filter(|p| p.kind == PropertyKind::Custom) {
            property.ty.is_nullable = true;
        }
        Ok(())
    })
}

/// Request configuration parameters are passed as values, not as configuration callbacks.
#[tracing::instrument(skip_all)]
pub fn unwrap_configuration_callbacks(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if let Some(Element::Method(method)) = dom.element_mut(id) {
            for parameter in method
                .parameters
                .iter_mut()
                .filter(|p| p.kind == ParameterKind::RequestConfiguration)
            {
                parameter.ty.action_of = false;
            }
        }
        Ok(())
    })
}
