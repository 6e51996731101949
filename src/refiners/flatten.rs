//! Promotion of inner models for targets without nested types.
//!
//! A model declared inside another model is renamed `{Parent}_{Child}` and moved next to its former parent. Both
//! the parent's own signatures (matched by the old name) and every reference resolved to the promoted class (matched
//! by definition) are rewritten to the new name.

use refinery_core::naming::appended_name;
use refinery_dom::{CodeDom, ElementId, crawl};

use super::errors::RefineResult;
use super::helpers::{is_inner_model, rename_references};
use super::target::RefineContext;

#[tracing::instrument(skip_all)]
pub fn flatten_inner_models(dom: &mut CodeDom, _ctx: &RefineContext<'_>) -> RefineResult<()> {
    let root = dom.root();
    crawl(dom, root, &mut |dom, id| {
        if is_inner_model(dom, id) {
            promote(dom, id)?;
        }
        Ok(())
    })
}

fn promote(dom: &mut CodeDom, id: ElementId) -> RefineResult<()> {
    let Some(parent) = dom.parent(id) else {
        return Ok(());
    };
    let Some(owner) = dom.parent(parent) else {
        return Ok(());
    };
    let old_name = dom.node(id)?.name.clone();
    let wanted = appended_name(&dom.node(parent)?.name, &old_name);
    let new_name = disambiguate(dom, owner, &wanted);
    if new_name != wanted {
        tracing::warn!(class = %id, wanted = %wanted, chosen = %new_name, "promoted model name already taken");
    }

    for member in dom.children(parent).to_vec() {
        if let Some(element) = dom.element_mut(member) {
            for ty in element.signature_types_mut() {
                if ty.is_named(&old_name) {
                    ty.name = new_name.clone();
                }
            }
        }
    }
    rename_references(dom, id, &new_name);

    dom.rename(id, new_name.clone())?;
    dom.move_to(id, owner)?;
    tracing::debug!(class = %id, from = %old_name, to = %new_name, "promoted inner model");
    Ok(())
}

/// `wanted`, or `wanted2`, `wanted3`, ... when `owner` already has a child with that name.
fn disambiguate(dom: &CodeDom, owner: ElementId, wanted: &str) -> String {
    if dom.child_named(owner, wanted).is_none() {
        return wanted.to_string();
    }
    (2u32..)
        .map(|suffix| format!("{wanted}{suffix}"))
        .find(|candidate| dom.child_named(owner, candidate).is_none())
        .unwrap_or_else(|| wanted.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GenerationConfiguration;
    use crate::refiners::go::GO_PROFILE;
    use refinery_dom::{ClassKind, CodeClass, CodeMethod, CodeNamespace, CodeProperty, CodeType, MethodKind, PropertyKind};

    fn flatten(dom: &mut CodeDom) {
        let config = GenerationConfiguration::default();
        flatten_inner_models(dom, &RefineContext::new(&config, &GO_PROFILE)).unwrap();
    }

    #[test]
    fn test_customer_address_is_promoted() {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
        let address = dom.add(customer, "address", CodeClass::new(ClassKind::Model)).unwrap();
        let property = dom
            .add(customer, "address", CodeProperty::new(PropertyKind::Custom, CodeType::new("Address")))
            .unwrap();
        let getter = dom
            .add(customer, "GetAddress", CodeMethod::new(MethodKind::Getter, CodeType::new("ADDRESS")))
            .unwrap();

        flatten(&mut dom);

        assert_eq!(dom.name(address), Some("Customer_Address"));
        assert_eq!(dom.parent(address), Some(models));
        assert_eq!(dom.children(models), &[customer, address]);
        assert_eq!(dom.property(property).unwrap().ty.name, "Customer_Address");
        assert_eq!(dom.method(getter).unwrap().return_type.name, "Customer_Address");
    }

    #[test]
    fn test_references_elsewhere_follow_definition() {
        let mut dom = CodeDom::new("ApiSdk");
        let root = dom.root();
        let models = dom.add(root, "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
        let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();
        let builder = dom.add(root, "AddressesRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
        let get = dom
            .add(
                builder,
                "Get",
                CodeMethod::new(MethodKind::RequestExecutor, CodeType::defined_by("Address", address)),
            )
            .unwrap();

        flatten(&mut dom);

        assert_eq!(dom.method(get).unwrap().return_type.name, "Customer_Address");
        assert_eq!(dom.method(get).unwrap().return_type.definition, Some(address));
    }

    #[test]
    fn test_collision_gets_numeric_suffix() {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let customer = dom.add(models, "Customer", CodeClass::new(ClassKind::Model)).unwrap();
        dom.add(models, "Customer_Address", CodeClass::new(ClassKind::Model)).unwrap();
        let address = dom.add(customer, "Address", CodeClass::new(ClassKind::Model)).unwrap();

        flatten(&mut dom);

        assert_eq!(dom.name(address), Some("Customer_Address2"));
    }

    #[test]
    fn test_doubly_nested_models() {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let a = dom.add(models, "A", CodeClass::new(ClassKind::Model)).unwrap();
        let b = dom.add(a, "B", CodeClass::new(ClassKind::Model)).unwrap();
        let c = dom.add(b, "C", CodeClass::new(ClassKind::Model)).unwrap();

        flatten(&mut dom);

        assert_eq!(dom.name(b), Some("A_B"));
        assert_eq!(dom.name(c), Some("A_B_C"));
        assert_eq!(dom.parent(c), Some(models));
    }

    #[test]
    fn test_models_inside_builders_stay() {
        let mut dom = CodeDom::new("ApiSdk");
        let builder = dom.add(dom.root(), "UsersRequestBuilder", CodeClass::new(ClassKind::RequestBuilder)).unwrap();
        let response = dom.add(builder, "GetResponse", CodeClass::new(ClassKind::Model)).unwrap();

        flatten(&mut dom);

        assert_eq!(dom.parent(response), Some(builder));
        assert_eq!(dom.name(response), Some("GetResponse"));
    }
}
