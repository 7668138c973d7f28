//! Class, interface and mixin handler.
//!
//! Children that cannot live inside a class body (nested namespaces,
//! enums, typedefs, other classes) are collected and re-emitted in a
//! companion namespace merged under the class's name.

use super::Publisher;
use crate::model::{Doclet, Scope};
use anyhow::Result;
use std::io::Write;

/// References into another module cannot appear in extends/implements.
fn is_module_reference(name: &str) -> bool {
    name.contains("module:")
}

impl<'a, W: Write> Publisher<'a, W> {
    pub(crate) fn emit_class(&mut self, sym: &'a Doclet) -> Result<()> {
        let is_interface = sym.is_interface();
        self.begin(sym, is_interface)?;
        if is_interface {
            self.out.write("interface ")?;
        } else {
            if sym.virtual_ {
                self.out.write("abstract ")?;
            }
            self.out.write("class ")?;
        }
        self.out.write(&sym.name)?;
        self.write_templates(sym)?;
        self.out.write(" ")?;

        // Single inheritance: only the first extendable superclass counts.
        if let Some(superclass) = sym.augments.iter().find(|a| !is_module_reference(a)) {
            self.out.write(&format!("extends {} ", superclass))?;
        }

        let impls: Vec<&str> = sym
            .implements_
            .iter()
            .chain(&sym.mixes)
            .map(String::as_str)
            .filter(|r| !is_module_reference(r))
            .collect();
        if !impls.is_empty() {
            self.out.write(&format!("implements {} ", impls.join(", ")))?;
        }

        self.out.writeln("{")?;
        self.out.indent();

        // Concrete classes get a constructor synthesized from the class
        // symbol's own parameter list.
        if !is_interface && !sym.virtual_ {
            self.emit_function(sym, Some(sym), true)?;
        }

        if is_interface {
            for property in &sym.properties {
                self.write_property(property)?;
            }
        }

        let mut incompatible = Vec::new();
        let table = self.table;
        for child in table.children_of(&sym.longname) {
            if !self.handle(child, Some(sym), true)? {
                incompatible.push(child);
            }
        }

        self.out.dedent();
        self.out.writeln("}")?;

        if !incompatible.is_empty() {
            self.out.blank()?;
            if sym.scope == Some(Scope::Global) && self.options.module.is_none() {
                self.out.write("export ")?;
            }
            self.out.writeln(&format!("namespace {} {{", sym.name))?;
            self.out.indent();
            for child in incompatible {
                self.handle(child, Some(sym), false)?;
            }
            self.out.dedent();
            self.out.writeln("}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::*;
    use super::super::Options;
    use super::*;
    use crate::model::Kind;

    #[test]
    fn module_references_are_filtered() {
        assert!(is_module_reference("module:foo~Bar"));
        assert!(!is_module_reference("Bar"));
    }

    #[test]
    fn extends_takes_the_first_augment_only() {
        let mut class = doclet(Kind::Class, "C", "C");
        class.scope = Some(Scope::Global);
        class.augments = vec!["module:other~Base".to_string(), "A".to_string(), "B".to_string()];
        let out = publish_str(vec![class], &Options::default());
        assert!(out.starts_with("export class C extends A {"), "got: {}", out);
    }

    #[test]
    fn implements_joins_interfaces_and_mixins() {
        let mut class = doclet(Kind::Class, "C", "C");
        class.scope = Some(Scope::Global);
        class.implements_ = vec!["I".to_string()];
        class.mixes = vec!["M".to_string()];
        let out = publish_str(vec![class], &Options::default());
        assert!(out.starts_with("export class C implements I, M {"), "got: {}", out);
    }

    #[test]
    fn abstract_class_has_no_constructor() {
        let mut class = doclet(Kind::Class, "C", "C");
        class.scope = Some(Scope::Global);
        class.virtual_ = true;
        let out = publish_str(vec![class], &Options::default());
        assert_eq!(out, "export abstract class C {\n}\n");
    }

    #[test]
    fn interface_kind_emits_properties_without_export() {
        let mut iface = doclet(Kind::Interface, "Shape", "Shape");
        iface.scope = Some(Scope::Global);
        iface.properties = vec![crate::model::Property {
            name: "area".to_string(),
            type_: annotation(&["number"]),
            ..Default::default()
        }];
        let out = publish_str(vec![iface], &Options::default());
        assert_eq!(out, "interface Shape {\n\x20   area: number;\n}\n");
    }

    #[test]
    fn static_enum_moves_to_companion_namespace() {
        let mut class = doclet(Kind::Class, "C", "C");
        class.scope = Some(Scope::Global);
        let mut kind = child_of(doclet(Kind::Member, "C.Kind", "Kind"), "C");
        kind.scope = Some(Scope::Static);
        kind.is_enum = true;
        kind.properties = vec![crate::model::Property {
            name: "A".to_string(),
            ..Default::default()
        }];

        let out = publish_str(vec![class, kind], &Options::default());
        assert_eq!(
            out,
            "export class C {\n\
             \x20   constructor();\n\
             }\n\
             \n\
             export namespace C {\n\
             \n\
             \x20   enum Kind {\n\
             \x20       A\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn generic_class_renders_template_list() {
        let mut class = doclet(Kind::Class, "Box", "Box");
        class.scope = Some(Scope::Global);
        class.templates = vec!["T".to_string()];
        let out = publish_str(vec![class], &Options::default());
        assert!(out.starts_with("export class Box<T> {"), "got: {}", out);
    }
}
