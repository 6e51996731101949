//! Human-readable, deterministic outline of a tree.
//!
//! Used by the CLI's `--outline` output and by snapshot tests; the format is not meant to be parsed.

use std::fmt::Write;

use crate::crawl::walk;
use crate::dom::{CodeDom, ElementId};
use crate::element::{CodeParameter, Element};
use crate::types::{CodeType, CollectionKind};
use crate::using::UsingSet;

/// Render the subtree rooted at `start`, one element per line, indented two spaces per level.
pub fn outline(dom: &CodeDom, start: ElementId) -> String {
    let mut out = String::new();
    walk(dom, start, |id, depth| {
        let Some(node) = dom.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = writeln!(out, "{indent}{}", header(&node.name, &node.element));
        if let Some(usings) = node.element.usings() {
            write_usings(&mut out, &indent, usings);
        }
    });
    out
}

fn header(name: &str, element: &Element) -> String {
    match element {
        Element::Namespace(_) => format!("namespace {name}"),
        Element::Class(class) => {
            let mut line = format!("class {name} [{:?}]", class.kind);
            if class.is_error_definition {
                line.push_str(" error");
            }
            if let Some(parent) = &class.parent_type {
                let _ = write!(line, " extends {}", render_type(parent));
            }
            if !class.implements.is_empty() {
                let names: Vec<String> = class.implements.iter().map(render_type).collect();
                let _ = write!(line, " implements {}", names.join(", "));
            }
            line
        }
        Element::Interface(interface) => {
            let mut line = format!("interface {name} [{:?}]", interface.kind);
            if !interface.implements.is_empty() {
                let names: Vec<String> = interface.implements.iter().map(render_type).collect();
                let _ = write!(line, " extends {}", names.join(", "));
            }
            line
        }
        Element::Enum(e) => format!("enum {name} {{{}}}", e.options.join(", ")),
        Element::Method(method) => {
            let params: Vec<String> = method.parameters.iter().map(render_parameter).collect();
            let mut line = format!(
                "method {name}({}) -> {} [{:?}, {:?}]",
                params.join(", "),
                render_type(&method.return_type),
                method.kind,
                method.access
            );
            if method.is_static {
                line.push_str(" static");
            }
            if method.is_async {
                line.push_str(" async");
            }
            if !method.serializer_modules.is_empty() {
                let _ = write!(line, " serializers={}", method.serializer_modules.join(","));
            }
            if !method.deserializer_modules.is_empty() {
                let _ = write!(line, " deserializers={}", method.deserializer_modules.join(","));
            }
            line
        }
        Element::Property(property) => {
            let mut line = format!(
                "property {name}: {} [{:?}, {:?}]",
                render_type(&property.ty),
                property.kind,
                property.access
            );
            if let Some(serialization_name) = &property.serialization_name {
                let _ = write!(line, " as \"{serialization_name}\"");
            }
            if let Some(default) = &property.default_value {
                let _ = write!(line, " = {default}");
            }
            line
        }
        Element::Indexer(indexer) => format!(
            "indexer {name}[{}: {}] -> {}",
            indexer.index_parameter_name,
            render_type(&indexer.index_type),
            render_type(&indexer.return_type)
        ),
    }
}

fn write_usings(out: &mut String, indent: &str, usings: &UsingSet) {
    for using in usings {
        let symbol = if using.symbol.is_empty() { "*" } else { using.symbol.as_str() };
        let _ = writeln!(out, "{indent}  using {} :: {symbol}", using.module);
    }
}

fn render_parameter(parameter: &CodeParameter) -> String {
    let optional = if parameter.optional { "?" } else { "" };
    format!("{}{optional}: {}", parameter.name, render_type(&parameter.ty))
}

/// Render a type reference: `[]` for arrays, `?` for nullable, `*` for callbacks.
pub fn render_type(ty: &CodeType) -> String {
    let mut out = String::new();
    if ty.action_of {
        out.push('*');
    }
    match ty.collection {
        CollectionKind::None => {}
        CollectionKind::Array => out.push_str("[]"),
        CollectionKind::Complex => out.push_str("{}"),
    }
    out.push_str(&ty.name);
    if ty.is_nullable {
        out.push('?');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{CodeClass, CodeMethod, CodeNamespace, CodeProperty};
    use crate::kinds::{ClassKind, MethodKind, ParameterKind, PropertyKind};
    use crate::using::CodeUsing;

    #[test]
    fn test_outline_snapshot() {
        let mut dom = CodeDom::new("ApiSdk");
        let models = dom.add(dom.root(), "ApiSdk.Models", CodeNamespace::default()).unwrap();
        let mut class = CodeClass::new(ClassKind::Model);
        class.usings.add(CodeUsing::external("serialization", "Parsable"));
        let user = dom.add(models, "User", class).unwrap();
        dom.add(user, "name", CodeProperty::new(PropertyKind::Custom, CodeType::external("string")))
            .unwrap();
        dom.add(
            user,
            "SetTags",
            CodeMethod::new(MethodKind::Setter, CodeType::void()).with_parameter(CodeParameter::new(
                "value",
                ParameterKind::SetterValue,
                CodeType::external("string").array(),
            )),
        )
        .unwrap();
        insta::assert_snapshot!(outline(&dom, dom.root()), @r"
        namespace ApiSdk
          namespace ApiSdk.Models
            class User [Model]
              using serialization :: Parsable
              property name: string? [Custom, Public]
              method SetTags(value: []string?) -> void [Setter, Public]
        ");
    }
}
