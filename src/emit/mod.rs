//! Declaration emission — render context, classification and the two-phase
//! publish run.
//!
//! A [`Publisher`] is created for exactly one publish call and owns all
//! traversal state: the emitted set, the deferred-interface queue and the
//! output cursor. Phase 1 walks the table from its roots, handlers
//! recursing through [`Publisher::handle`]; phase 2 drains the interfaces
//! that could not be emitted at their point of discovery (those nested
//! under class-like parents) and writes them at top level.

mod class;
mod function;
mod member;
mod namespace;
mod typedef;
mod writer;

use crate::model::{Doclet, Kind, Scope, SymbolTable};
use anyhow::Result;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use writer::Emitter;

pub use function::SignatureMode;

/// Resolved options for one publish run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Output file; standard output when absent.
    pub destination: Option<PathBuf>,
    /// Wrap the whole document in `export = NAME; declare namespace NAME`.
    pub module: Option<String>,
    /// Keep private-access symbols (enforced upstream, before publishing).
    pub private: bool,
    /// Emit documentation comments.
    pub comments: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            destination: None,
            module: None,
            private: false,
            comments: true,
        }
    }
}

/// Publish the symbol table as one declaration document.
pub fn publish<W: Write>(table: &mut SymbolTable, options: &Options, sink: W) -> Result<()> {
    table.normalize_optionals();
    let table: &SymbolTable = table;
    let mut publisher = Publisher {
        table,
        options,
        out: Emitter::new(sink, options.comments),
        seen: HashSet::new(),
        deferred: Vec::new(),
    };
    publisher.run()
}

pub(crate) struct Publisher<'a, W: Write> {
    table: &'a SymbolTable,
    options: &'a Options,
    out: Emitter<W>,
    seen: HashSet<String>,
    deferred: Vec<&'a Doclet>,
}

impl<'a, W: Write> Publisher<'a, W> {
    fn run(&mut self) -> Result<()> {
        if let Some(name) = &self.options.module {
            self.out.writeln(&format!("export = {};", name))?;
            self.out.blank()?;
            self.out.writeln(&format!("declare namespace {} {{", name))?;
            self.out.blank()?;
            self.out.indent();
        }
        let table = self.table;
        for root in table.roots() {
            self.handle(root, None, false)?;
        }
        self.drain_deferred()?;
        if self.options.module.is_some() {
            self.out.dedent();
            self.out.writeln("}")?;
        }
        Ok(())
    }

    /// Classify and emit one symbol. Returns `false` when the symbol is not
    /// representable at its current nesting position (the caller collects
    /// it for the companion namespace instead).
    pub(crate) fn handle(
        &mut self,
        sym: &'a Doclet,
        parent: Option<&'a Doclet>,
        inside_class: bool,
    ) -> Result<bool> {
        if self.seen.contains(&sym.longname) {
            return Ok(true);
        }
        match sym.kind {
            Kind::Class | Kind::Interface | Kind::Mixin => {
                if inside_class {
                    return Ok(false);
                }
                self.emit_class(sym)?;
            }
            Kind::Namespace | Kind::Module => {
                if inside_class {
                    return Ok(false);
                }
                self.emit_namespace(sym)?;
            }
            Kind::Constant | Kind::Member => {
                if inside_class && sym.is_enum {
                    return Ok(false);
                }
                self.emit_member(sym, parent)?;
            }
            Kind::Function => self.emit_function(sym, parent, false)?,
            Kind::Typedef => {
                if inside_class {
                    return Ok(false);
                }
                self.emit_typedef(sym, parent)?;
            }
            Kind::Package | Kind::Other => {}
        }
        self.seen.insert(sym.longname.clone());
        Ok(true)
    }

    /// Shared opening step for a declaration: the documentation comment
    /// (forced blank separator for block-shaped kinds), then the `export`
    /// keyword for global symbols outside a module wrapper. Interfaces are
    /// ambient and never exported.
    pub(crate) fn begin(&mut self, sym: &Doclet, as_interface: bool) -> Result<()> {
        let separator = as_interface
            || sym.is_class_like()
            || sym.is_namespace()
            || sym.is_enum;
        self.out.comment(sym.comment.as_deref(), separator)?;
        if sym.scope != Some(Scope::Global)
            || self.options.module.is_some()
            || as_interface
            || sym.is_interface()
        {
            return Ok(());
        }
        self.out.write("export ")?;
        Ok(())
    }

    pub(crate) fn write_templates(&mut self, sym: &Doclet) -> Result<()> {
        if !sym.templates.is_empty() {
            self.out.write(&format!("<{}>", sym.templates.join(", ")))?;
        }
        Ok(())
    }

    /// Queue an interface discovered under a class-like parent for phase 2.
    pub(crate) fn defer(&mut self, sym: &'a Doclet) {
        self.deferred.push(sym);
    }

    /// Phase 2: emit the queued interfaces at top level, in
    /// first-discovered order.
    fn drain_deferred(&mut self) -> Result<()> {
        let mut next = 0;
        while next < self.deferred.len() {
            let sym = self.deferred[next];
            next += 1;
            self.begin(sym, true)?;
            self.write_interface(sym)?;
        }
        Ok(())
    }
}
