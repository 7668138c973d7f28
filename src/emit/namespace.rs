//! Namespace handler.

use super::Publisher;
use crate::model::Doclet;
use anyhow::Result;
use std::io::Write;

impl<'a, W: Write> Publisher<'a, W> {
    pub(crate) fn emit_namespace(&mut self, sym: &'a Doclet) -> Result<()> {
        self.begin(sym, false)?;
        self.out.writeln(&format!("namespace {} {{", sym.name))?;
        self.out.indent();
        let table = self.table;
        for child in table.children_of(&sym.longname) {
            self.handle(child, Some(sym), false)?;
        }
        self.out.dedent();
        self.out.writeln("}")?;
        Ok(())
    }
}
