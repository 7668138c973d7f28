//! Typedef handler — interfaces and type aliases.
//!
//! Object-shaped typedefs become interfaces. An interface discovered under
//! a class-like parent cannot be declared there, so it is queued and
//! hoisted to top level after the primary walk. Everything else becomes a
//! `type` alias.

use super::{Publisher, SignatureMode};
use crate::model::{Doclet, Property, Typed};
use crate::types;
use anyhow::Result;
use std::io::Write;

/// An interface-shaped typedef: a plain `object` annotation fleshed out by
/// declared properties, with no pre-resolved expression.
fn is_interface_typedef(sym: &Doclet) -> bool {
    sym.ts_type.is_none()
        && !sym.properties.is_empty()
        && matches!(sym.type_names(), [single] if single == "object")
}

/// A function-shaped typedef: the raw annotation is exactly `function`.
fn is_function_alias(sym: &Doclet) -> bool {
    sym.ts_type.is_none() && matches!(sym.type_names(), [single] if single == "function")
}

impl<'a, W: Write> Publisher<'a, W> {
    pub(crate) fn emit_typedef(&mut self, sym: &'a Doclet, parent: Option<&'a Doclet>) -> Result<()> {
        if is_interface_typedef(sym) {
            if parent.is_some_and(Doclet::is_class_like) {
                self.defer(sym);
            } else {
                self.begin(sym, true)?;
                self.write_interface(sym)?;
            }
            return Ok(());
        }

        self.out.blank()?;
        self.out.write(&format!("type {}", sym.name))?;
        self.write_templates(sym)?;
        self.out.write(" = ")?;
        if let Some(resolved) = &sym.ts_type {
            self.out.write(resolved)?;
        } else if is_function_alias(sym) {
            self.write_signature(sym, SignatureMode::ArrowType)?;
        } else {
            let rendered = types::expression(sym);
            if rendered == "object" {
                if sym.properties.is_empty() {
                    self.out.write("{}")?;
                } else {
                    self.write_interface_body(sym)?;
                }
            } else {
                self.out.write(&rendered)?;
            }
        }
        self.out.writeln(";")?;
        Ok(())
    }

    pub(crate) fn write_interface(&mut self, sym: &Doclet) -> Result<()> {
        self.out.write(&format!("interface {}", sym.name))?;
        self.write_templates(sym)?;
        self.out.write(" ")?;
        self.write_interface_body(sym)?;
        self.out.writeln("")?;
        Ok(())
    }

    pub(crate) fn write_interface_body(&mut self, sym: &Doclet) -> Result<()> {
        self.out.writeln("{")?;
        self.out.indent();
        for property in &sym.properties {
            self.write_property(property)?;
        }
        self.out.dedent();
        self.out.write("}")?;
        Ok(())
    }

    pub(crate) fn write_property(&mut self, property: &Property) -> Result<()> {
        self.out.comment(property.comment.as_deref(), false)?;
        self.out.write(&property.name)?;
        if property.optional {
            self.out.write("?")?;
        }
        self.out.writeln(&format!(": {};", types::expression(property)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::*;
    use super::super::Options;
    use super::*;
    use crate::model::{Kind, Param, Return, Scope};

    #[test]
    fn function_typedef_renders_arrow_signature() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut cb = child_of(doclet(Kind::Typedef, "ns.Cb", "Cb"), "ns");
        cb.type_ = annotation(&["function"]);
        cb.params = vec![Param {
            name: "err".to_string(),
            type_: annotation(&["Error"]),
            ..Default::default()
        }];
        cb.returns = vec![Return {
            type_: annotation(&["boolean"]),
            ..Default::default()
        }];

        let out = publish_str(vec![ns, cb], &Options::default());
        assert!(
            out.contains("    type Cb = (err: Error) => boolean;\n"),
            "got: {}",
            out
        );
    }

    #[test]
    fn resolved_expression_takes_precedence() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut alias = child_of(doclet(Kind::Typedef, "ns.Key", "Key"), "ns");
        alias.ts_type = Some("keyof Registry".to_string());
        alias.type_ = annotation(&["object"]);

        let out = publish_str(vec![ns, alias], &Options::default());
        assert!(out.contains("    type Key = keyof Registry;\n"), "got: {}", out);
    }

    #[test]
    fn bare_object_typedef_without_properties_is_empty_shape() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut bag = child_of(doclet(Kind::Typedef, "ns.Bag", "Bag"), "ns");
        bag.type_ = annotation(&["object"]);

        let out = publish_str(vec![ns, bag], &Options::default());
        assert!(out.contains("    type Bag = {};\n"), "got: {}", out);
    }

    #[test]
    fn capitalized_object_typedef_is_an_alias_not_an_interface() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut shape = child_of(doclet(Kind::Typedef, "ns.Shape", "Shape"), "ns");
        shape.type_ = annotation(&["Object"]);
        shape.properties = vec![Property {
            name: "width".to_string(),
            type_: annotation(&["number"]),
            ..Default::default()
        }];

        let out = publish_str(vec![ns, shape], &Options::default());
        assert!(
            out.contains("    type Shape = {\n\x20       width: number;\n\x20   };\n"),
            "got: {}",
            out
        );
    }

    #[test]
    fn plain_typedef_is_a_simple_alias() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut id = child_of(doclet(Kind::Typedef, "ns.Id", "Id"), "ns");
        id.type_ = annotation(&["string", "number"]);

        let out = publish_str(vec![ns, id], &Options::default());
        assert!(out.contains("    type Id = (string|number);\n"), "got: {}", out);
    }

    #[test]
    fn generic_interface_typedef_keeps_templates() {
        let mut ns = doclet(Kind::Namespace, "ns", "ns");
        ns.scope = Some(Scope::Global);
        let mut pair = child_of(doclet(Kind::Typedef, "ns.Pair", "Pair"), "ns");
        pair.type_ = annotation(&["object"]);
        pair.templates = vec!["T".to_string()];
        pair.properties = vec![
            Property {
                name: "first".to_string(),
                type_: annotation(&["T"]),
                ..Default::default()
            },
            Property {
                name: "second".to_string(),
                type_: annotation(&["T"]),
                ..Default::default()
            },
        ];

        let out = publish_str(vec![ns, pair], &Options::default());
        assert!(
            out.contains(
                "    interface Pair<T> {\n\
                 \x20       first: T;\n\
                 \x20       second: T;\n\
                 \x20   }\n"
            ),
            "got: {}",
            out
        );
    }
}
