//! Member handler — enum groupings, fields and variables.

use super::Publisher;
use crate::model::{Doclet, Kind, Scope};
use crate::types;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use std::io::Write;
use std::sync::LazyLock;

/// Matches a type name that is the word `Object`, in any case, possibly
/// followed by map-bracket syntax — the trigger for inline object shapes.
static RE_OBJECT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^object\b").unwrap());

impl<'a, W: Write> Publisher<'a, W> {
    pub(crate) fn emit_member(&mut self, sym: &'a Doclet, parent: Option<&'a Doclet>) -> Result<()> {
        self.begin(sym, false)?;
        if sym.is_enum {
            self.emit_enum(sym)
        } else {
            self.emit_variable(sym, parent)
        }
    }

    fn emit_enum(&mut self, sym: &Doclet) -> Result<()> {
        self.out.writeln(&format!("enum {} {{", sym.name))?;
        self.out.indent();
        let last = sym.properties.len().saturating_sub(1);
        for (i, property) in sym.properties.iter().enumerate() {
            self.out.write(&property.name)?;
            if let Some(value) = &property.defaultvalue {
                self.out.write(&format!(" = {}", value))?;
            }
            self.out.writeln(if i < last { "," } else { "" })?;
        }
        self.out.dedent();
        self.out.writeln("}")?;
        Ok(())
    }

    fn emit_variable(&mut self, sym: &Doclet, parent: Option<&Doclet>) -> Result<()> {
        if parent.is_some_and(Doclet::is_class_like) {
            self.out
                .write(&format!("{} ", sym.access.as_deref().unwrap_or("public")))?;
            if sym.scope == Some(Scope::Static) {
                self.out.write("static ")?;
            }
            if sym.readonly {
                self.out.write("readonly ")?;
            }
        } else if sym.kind == Kind::Constant {
            self.out.write("const ")?;
        } else {
            self.out.write("let ")?;
        }
        self.out.write(&sym.name)?;
        if sym.optional {
            self.out.write("?")?;
        }
        self.out.write(": ")?;

        let open_object_shape = sym
            .type_
            .as_ref()
            .and_then(|t| t.names.first())
            .is_some_and(|n| RE_OBJECT_WORD.is_match(n))
            && !sym.properties.is_empty();
        if open_object_shape {
            self.out.writeln("{")?;
            self.out.indent();
            let last = sym.properties.len() - 1;
            for (i, property) in sym.properties.iter().enumerate() {
                self.out.writeln(&format!(
                    "{}: {}{}",
                    Value::String(property.name.clone()),
                    types::expression(property),
                    if i < last { "," } else { "" }
                ))?;
            }
            self.out.dedent();
            self.out.writeln("};")?;
        } else {
            self.out.writeln(&format!("{};", types::expression(sym)))?;
        }
        Ok(())
    }
}
