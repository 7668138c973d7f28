//! Function/method handler and the shared signature writer.

use super::Publisher;
use crate::model::{Doclet, Scope};
use crate::types;
use anyhow::Result;
use std::io::Write;

/// How a signature terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMode {
    /// `(params): Ret` — methods and free functions.
    Method,
    /// `(params)` — constructors carry no return type.
    Constructor,
    /// `(params) => Ret` — function-shaped type aliases.
    ArrowType,
}

struct RenderParam {
    name: String,
    type_expr: String,
    optional: bool,
    variadic: bool,
}

impl<'a, W: Write> Publisher<'a, W> {
    pub(crate) fn emit_function(
        &mut self,
        sym: &'a Doclet,
        parent: Option<&'a Doclet>,
        constructor: bool,
    ) -> Result<()> {
        if constructor {
            self.out.comment(sym.comment.as_deref(), false)?;
            self.out.write("constructor")?;
            self.write_signature(sym, SignatureMode::Constructor)?;
        } else {
            self.begin(sym, false)?;
            if parent.is_some_and(Doclet::is_class_like) {
                self.out
                    .write(&format!("{} ", sym.access.as_deref().unwrap_or("public")))?;
                if sym.scope == Some(Scope::Static) {
                    self.out.write("static ")?;
                }
            } else {
                self.out.write("function ")?;
            }
            self.out.write(&sym.name)?;
            self.write_templates(sym)?;
            self.write_signature(sym, SignatureMode::Method)?;
        }
        self.out.writeln(";")?;
        Ok(())
    }

    pub(crate) fn write_signature(&mut self, sym: &Doclet, mode: SignatureMode) -> Result<()> {
        self.out.write("(")?;
        let params = collect_params(sym);
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.out.write(", ")?;
            }
            if param.variadic {
                // Signature-looking element types cannot take a [] suffix.
                let element = if param.type_expr.starts_with('(') {
                    "any[]".to_string()
                } else {
                    format!("{}[]", param.type_expr)
                };
                self.out.write(&format!("...{}: {}", param.name, element))?;
            } else if param.optional {
                self.out.write(&format!("{}?: {}", param.name, param.type_expr))?;
            } else {
                self.out.write(&format!("{}: {}", param.name, param.type_expr))?;
            }
        }
        self.out.write(")")?;
        match mode {
            SignatureMode::Constructor => {}
            SignatureMode::Method => self.out.write(&format!(": {}", return_type(sym)))?,
            SignatureMode::ArrowType => self.out.write(&format!(" => {}", return_type(sym)))?,
        }
        Ok(())
    }
}

/// Assemble the parameter list in declared order: the synthetic `this`
/// parameter first, then each declared parameter. Dotted property-path
/// parameters fold onto their root as an open mapping, discarding the
/// sub-path detail; a dotted path whose root was never declared is dropped.
fn collect_params(sym: &Doclet) -> Vec<RenderParam> {
    let mut params: Vec<RenderParam> = Vec::new();
    if let Some(this_type) = &sym.this_ {
        let stripped = this_type.strip_prefix('{').unwrap_or(this_type);
        let stripped = stripped.strip_suffix('}').unwrap_or(stripped);
        params.push(RenderParam {
            name: "this".to_string(),
            type_expr: stripped.to_string(),
            optional: false,
            variadic: false,
        });
    }
    for param in &sym.params {
        match param.name.split_once('.') {
            None => {
                let rendered = RenderParam {
                    name: param.name.clone(),
                    type_expr: types::expression(param),
                    optional: param.optional,
                    variadic: param.variable,
                };
                match params.iter_mut().find(|p| p.name == param.name) {
                    Some(existing) => *existing = rendered,
                    None => params.push(rendered),
                }
            }
            Some((root, _path)) => {
                if let Some(root_param) = params.iter_mut().find(|p| p.name == root) {
                    root_param.type_expr = "{ [k: string]: any }".to_string();
                }
            }
        }
    }
    params
}

fn return_type(sym: &Doclet) -> String {
    match sym.returns.first() {
        Some(ret) => {
            let rendered = types::expression(ret);
            if rendered == "undefined" {
                "void".to_string()
            } else {
                rendered
            }
        }
        None => "void".to_string(),
    }
}
