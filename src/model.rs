//! Data model for parsed documentation symbols (doclets).
//!
//! Mirrors the record shape of a `jsdoc -X` dump: a flat list of records
//! related by qualified name (`memberof` pointing at a parent's `longname`).
//! The table is read-only during emission, except for the one-time
//! optional-type normalization pass.

use serde::Deserialize;
use serde_json::Value;

/// Structural kind of a doclet.
///
/// Unrecognized kinds map to [`Kind::Other`] and are swallowed as handled
/// during emission rather than failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Kind {
    Class,
    Interface,
    Mixin,
    Namespace,
    Module,
    Function,
    #[default]
    Member,
    Constant,
    Typedef,
    Package,
    Other,
}

impl From<String> for Kind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "class" => Kind::Class,
            "interface" => Kind::Interface,
            "mixin" => Kind::Mixin,
            "namespace" => Kind::Namespace,
            "module" => Kind::Module,
            "function" => Kind::Function,
            "member" => Kind::Member,
            "constant" => Kind::Constant,
            "typedef" => Kind::Typedef,
            "package" => Kind::Package,
            _ => Kind::Other,
        }
    }
}

/// Lexical scope of a doclet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Static,
    Instance,
    Inner,
}

/// Raw type annotation: one or more loosely-formatted type names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub names: Vec<String>,
}

/// Seam between the data model and the type rewriter: anything carrying a
/// type annotation, whether a doclet, property, parameter or return entry.
pub trait Typed {
    /// Pre-resolved target-grammar expression; takes precedence over the
    /// raw names when present.
    fn resolved(&self) -> Option<&str>;

    /// Raw type-name alternatives.
    fn type_names(&self) -> &[String];
}

/// A single documentation record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Doclet {
    pub longname: String,
    pub name: String,
    pub kind: Kind,
    pub memberof: Option<String>,
    pub scope: Option<Scope>,
    pub access: Option<String>,
    /// Abstract (`@virtual`) flag.
    #[serde(rename = "virtual")]
    pub virtual_: bool,
    pub readonly: bool,
    pub optional: bool,
    #[serde(rename = "isEnum")]
    pub is_enum: bool,
    pub undocumented: bool,
    pub ignore: bool,
    pub inherited: bool,
    #[serde(rename = "type")]
    pub type_: Option<TypeRef>,
    #[serde(rename = "tsType")]
    pub ts_type: Option<String>,
    pub augments: Vec<String>,
    #[serde(rename = "implements")]
    pub implements_: Vec<String>,
    pub mixes: Vec<String>,
    pub properties: Vec<Property>,
    pub params: Vec<Param>,
    pub returns: Vec<Return>,
    /// Generic parameter names (`@template`).
    pub templates: Vec<String>,
    /// Raw documentation comment, including the `/** */` delimiters.
    pub comment: Option<String>,
    /// Declared `this` type, brace-wrapped (`{Foo}`).
    #[serde(rename = "this")]
    pub this_: Option<String>,
}

impl Doclet {
    pub fn is_class_like(&self) -> bool {
        matches!(self.kind, Kind::Class | Kind::Interface | Kind::Mixin)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == Kind::Interface
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.kind, Kind::Namespace | Kind::Module)
    }
}

impl Typed for Doclet {
    fn resolved(&self) -> Option<&str> {
        self.ts_type.as_deref()
    }

    fn type_names(&self) -> &[String] {
        self.type_.as_ref().map(|t| t.names.as_slice()).unwrap_or(&[])
    }
}

/// A declared property of an object-shaped member, enum or typedef.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    pub comment: Option<String>,
    pub optional: bool,
    /// Literal default value (used by enum members).
    pub defaultvalue: Option<Value>,
    #[serde(rename = "type")]
    pub type_: Option<TypeRef>,
    #[serde(rename = "tsType")]
    pub ts_type: Option<String>,
}

impl Typed for Property {
    fn resolved(&self) -> Option<&str> {
        self.ts_type.as_deref()
    }

    fn type_names(&self) -> &[String] {
        self.type_.as_ref().map(|t| t.names.as_slice()).unwrap_or(&[])
    }
}

/// A declared function parameter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Param {
    pub name: String,
    pub optional: bool,
    /// Variadic (`...name`) flag.
    pub variable: bool,
    #[serde(rename = "type")]
    pub type_: Option<TypeRef>,
    #[serde(rename = "tsType")]
    pub ts_type: Option<String>,
}

impl Typed for Param {
    fn resolved(&self) -> Option<&str> {
        self.ts_type.as_deref()
    }

    fn type_names(&self) -> &[String] {
        self.type_.as_ref().map(|t| t.names.as_slice()).unwrap_or(&[])
    }
}

/// A declared return entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Return {
    #[serde(rename = "type")]
    pub type_: Option<TypeRef>,
    #[serde(rename = "tsType")]
    pub ts_type: Option<String>,
}

impl Typed for Return {
    fn resolved(&self) -> Option<&str> {
        self.ts_type.as_deref()
    }

    fn type_names(&self) -> &[String] {
        self.type_.as_ref().map(|t| t.names.as_slice()).unwrap_or(&[])
    }
}

/// The full set of doclets, queried by parent qualified name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    doclets: Vec<Doclet>,
}

impl SymbolTable {
    pub fn new(doclets: Vec<Doclet>) -> Self {
        Self { doclets }
    }

    /// Remove all records matching the predicate (the upstream filter
    /// contract: undocumented, ignored, inherited, private).
    pub fn remove_where<F>(&mut self, predicate: F)
    where
        F: Fn(&Doclet) -> bool,
    {
        self.doclets.retain(|d| !predicate(d));
    }

    /// Root-level doclets: records with no structural parent.
    pub fn roots(&self) -> impl Iterator<Item = &Doclet> {
        self.doclets.iter().filter(|d| d.memberof.is_none())
    }

    /// Children of the given qualified name, in table order.
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a Doclet> + 'a {
        self.doclets
            .iter()
            .filter(move |d| d.memberof.as_deref() == Some(parent))
    }

    /// Fold `undefined` type alternatives into the `optional` flag: a doclet
    /// not already optional whose name list contains `undefined` becomes
    /// optional with that alternative removed. Idempotent.
    pub fn normalize_optionals(&mut self) {
        for doclet in &mut self.doclets {
            if doclet.optional {
                continue;
            }
            let Some(type_ref) = doclet.type_.as_mut() else {
                continue;
            };
            let before = type_ref.names.len();
            type_ref.names.retain(|n| !n.eq_ignore_ascii_case("undefined"));
            if type_ref.names.len() != before {
                doclet.optional = true;
            }
        }
    }
}
