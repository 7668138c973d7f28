//! Type-annotation rewriting — JSDoc type expressions to TypeScript.
//!
//! The annotation mini-grammar (`Array.<T>`, `Object.<K, V>`, `Name.<T>`,
//! unions, catch-alls, the bare `function` keyword) is parsed into a small
//! expression tree and rendered back out in the TypeScript type grammar.
//! The parser also accepts the target grammar itself (`T[]` suffixes,
//! `{ [k: K]: V }` index signatures, parenthesized unions), so rewriting is
//! idempotent: feeding an already rewritten expression through again is a
//! no-op.
//!
//! Anything the parser cannot understand degrades to `any` — the output
//! must always be syntactically valid, even when imprecise.

use crate::model::Typed;

/// Produce the TypeScript type expression for an annotated symbol.
///
/// A pre-resolved expression wins over the raw name list; no annotation at
/// all means `any`; multiple alternatives become a parenthesized union.
pub fn expression<T: Typed>(t: &T) -> String {
    if let Some(resolved) = t.resolved() {
        return resolved.to_string();
    }
    let names = t.type_names();
    match names {
        [] => "any".to_string(),
        [single] => rewrite(single),
        _ => render(&union_of(names.iter().map(|n| parse(n)).collect())),
    }
}

/// Rewrite a single raw type name into the target grammar.
pub fn rewrite(source: &str) -> String {
    render(&parse(source))
}

#[derive(Debug, Clone, PartialEq)]
enum TypeExpr {
    Any,
    /// The bare `function` keyword — the annotation carries no signature.
    Function,
    Name(String),
    Generic(String, Vec<TypeExpr>),
    Array(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Union(Vec<TypeExpr>),
}

/// Build a union, flattening nested unions so repeated rewriting is stable.
fn union_of(parts: Vec<TypeExpr>) -> TypeExpr {
    let mut flat = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            TypeExpr::Union(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    if flat.len() == 1 {
        flat.swap_remove(0)
    } else {
        TypeExpr::Union(flat)
    }
}

fn render(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Any => "any".to_string(),
        TypeExpr::Function => "Function".to_string(),
        // A bare object is the lowercase primitive; compound names like
        // `ObjectPool` or `Foo.Object` pass through untouched.
        TypeExpr::Name(name) => {
            if name.eq_ignore_ascii_case("object") {
                "object".to_string()
            } else {
                name.clone()
            }
        }
        TypeExpr::Generic(base, args) => {
            let args: Vec<String> = args.iter().map(render).collect();
            format!("{}<{}>", base, args.join(", "))
        }
        TypeExpr::Array(element) => format!("{}[]", render(element)),
        TypeExpr::Map(key, value) => {
            format!("{{ [k: {}]: {} }}", render(key), render(value))
        }
        TypeExpr::Union(parts) => {
            let parts: Vec<String> = parts.iter().map(render).collect();
            format!("({})", parts.join("|"))
        }
    }
}

// -- Lexer --------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Star,
    Lt,
    Gt,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Pipe,
    Colon,
}

const STRUCTURAL: &str = "<>(){}[],|*";

fn lex(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let token = match chars[i] {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '<' => Token::Lt,
            '>' => Token::Gt,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            '|' => Token::Pipe,
            ':' => Token::Colon,
            '*' => Token::Star,
            _ => {
                let mut name = String::new();
                while i < chars.len() {
                    let c = chars[i];
                    if c.is_whitespace() || STRUCTURAL.contains(c) {
                        break;
                    }
                    if c == ':' {
                        // Keep `module:` style prefixes glued to the name,
                        // but leave a detached colon for index signatures.
                        match chars.get(i + 1) {
                            Some(&n) if !n.is_whitespace() && !STRUCTURAL.contains(n) && n != ':' => {}
                            _ => break,
                        }
                    }
                    if c == '.' && chars.get(i + 1) == Some(&'<') {
                        // The dot of `Name.<` belongs to the bracket syntax.
                        i += 1;
                        break;
                    }
                    name.push(c);
                    i += 1;
                }
                if name.is_empty() {
                    continue;
                }
                tokens.push(Token::Name(name));
                continue;
            }
        };
        tokens.push(token);
        i += 1;
    }
    tokens
}

// -- Parser -------------------------------------------------------------------

fn parse(source: &str) -> TypeExpr {
    let mut parser = Parser {
        tokens: lex(source),
        pos: 0,
    };
    match parser.union() {
        Some(expr) if parser.at_end() => expr,
        _ => TypeExpr::Any,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn name(&mut self) -> Option<String> {
        match self.tokens.get(self.pos) {
            Some(Token::Name(n)) => {
                let n = n.clone();
                self.pos += 1;
                Some(n)
            }
            _ => None,
        }
    }

    fn union(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.postfix()?];
        while self.eat(&Token::Pipe) {
            parts.push(self.postfix()?);
        }
        Some(union_of(parts))
    }

    fn postfix(&mut self) -> Option<TypeExpr> {
        let mut expr = self.primary()?;
        while self.peek() == Some(&Token::LBracket)
            && self.tokens.get(self.pos + 1) == Some(&Token::RBracket)
        {
            self.pos += 2;
            expr = TypeExpr::Array(Box::new(expr));
        }
        Some(expr)
    }

    fn primary(&mut self) -> Option<TypeExpr> {
        if self.eat(&Token::Star) {
            return Some(TypeExpr::Any);
        }
        if self.eat(&Token::LParen) {
            let inner = self.union()?;
            if !self.eat(&Token::RParen) {
                return None;
            }
            return Some(inner);
        }
        if self.eat(&Token::LBrace) {
            return self.index_signature();
        }
        let name = self.name()?;
        if name == "function" {
            // `function()` and bare `function` both collapse; there is no
            // signature to preserve.
            if self.peek() == Some(&Token::LParen)
                && self.tokens.get(self.pos + 1) == Some(&Token::RParen)
            {
                self.pos += 2;
            }
            return Some(TypeExpr::Function);
        }
        if name == "mixed" {
            return Some(TypeExpr::Any);
        }
        if self.eat(&Token::Lt) {
            let mut args = vec![self.union()?];
            while self.eat(&Token::Comma) {
                args.push(self.union()?);
            }
            if !self.eat(&Token::Gt) {
                return None;
            }
            if name.eq_ignore_ascii_case("array") && args.len() == 1 {
                return Some(TypeExpr::Array(Box::new(args.swap_remove(0))));
            }
            if name.eq_ignore_ascii_case("object") && args.len() == 2 {
                let value = args.pop()?;
                let key = args.pop()?;
                return Some(TypeExpr::Map(Box::new(key), Box::new(value)));
            }
            return Some(TypeExpr::Generic(name, args));
        }
        Some(TypeExpr::Name(name))
    }

    /// `{ [k: K]: V }` — the rendered form of a map expression.
    fn index_signature(&mut self) -> Option<TypeExpr> {
        if !self.eat(&Token::LBracket) {
            return None;
        }
        self.name()?; // the index parameter name is irrelevant
        if !self.eat(&Token::Colon) {
            return None;
        }
        let key = self.union()?;
        if !self.eat(&Token::RBracket) {
            return None;
        }
        if !self.eat(&Token::Colon) {
            return None;
        }
        let value = self.union()?;
        if !self.eat(&Token::RBrace) {
            return None;
        }
        Some(TypeExpr::Map(Box::new(key), Box::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Doclet, TypeRef};

    fn annotated(names: &[&str]) -> Doclet {
        Doclet {
            type_: Some(TypeRef {
                names: names.iter().map(|n| n.to_string()).collect(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn missing_annotation_is_any() {
        assert_eq!(expression(&Doclet::default()), "any");
    }

    #[test]
    fn resolved_expression_wins() {
        let mut doclet = annotated(&["string"]);
        doclet.ts_type = Some("keyof Foo".to_string());
        assert_eq!(expression(&doclet), "keyof Foo");
    }

    #[test]
    fn multiple_names_become_parenthesized_union() {
        assert_eq!(expression(&annotated(&["string", "number"])), "(string|number)");
    }

    #[test]
    fn catch_alls_become_any() {
        assert_eq!(rewrite("*"), "any");
        assert_eq!(rewrite("mixed"), "any");
    }

    #[test]
    fn generic_brackets_are_normalized() {
        assert_eq!(rewrite("Promise.<string>"), "Promise<string>");
        assert_eq!(rewrite("Promise.<Array.<string>>"), "Promise<string[]>");
    }

    #[test]
    fn arrays_become_suffix_form() {
        assert_eq!(rewrite("Array.<string>"), "string[]");
        assert_eq!(rewrite("Array.<Array.<string>>"), "string[][]");
        assert_eq!(rewrite("array.<number>"), "number[]");
    }

    #[test]
    fn object_maps_become_index_signatures() {
        assert_eq!(rewrite("Object.<string, number>"), "{ [k: string]: number }");
        assert_eq!(
            rewrite("Object.<string, Array.<number>>"),
            "{ [k: string]: number[] }"
        );
    }

    #[test]
    fn union_element_arrays_keep_parens() {
        assert_eq!(rewrite("Array.<(string|number)>"), "(string|number)[]");
    }

    #[test]
    fn bare_function_becomes_function_type() {
        assert_eq!(rewrite("function"), "Function");
        assert_eq!(rewrite("function()"), "Function");
    }

    #[test]
    fn bare_object_is_lowercase() {
        assert_eq!(rewrite("object"), "object");
        assert_eq!(rewrite("Object"), "object");
    }

    #[test]
    fn compound_object_names_pass_through() {
        assert_eq!(rewrite("ObjectPool"), "ObjectPool");
        assert_eq!(rewrite("Foo.Object"), "Foo.Object");
    }

    #[test]
    fn module_references_pass_through() {
        assert_eq!(rewrite("module:foo/bar~Baz"), "module:foo/bar~Baz");
    }

    #[test]
    fn malformed_annotations_degrade_to_any() {
        assert_eq!(rewrite("Array.<"), "any");
        assert_eq!(rewrite("Promise.<a,"), "any");
        assert_eq!(rewrite(""), "any");
    }

    #[test]
    fn rewrite_is_a_fixed_point() {
        for source in [
            "Array.<Array.<string>>",
            "Object.<string, number>",
            "Promise.<Array.<string>>",
            "function",
            "*",
            "object",
        ] {
            let once = rewrite(source);
            assert_eq!(rewrite(&once), once, "not a fixed point: {}", source);
        }
    }

    #[test]
    fn target_grammar_parses_back() {
        assert_eq!(rewrite("string[][]"), "string[][]");
        assert_eq!(rewrite("{ [k: string]: number }"), "{ [k: string]: number }");
        assert_eq!(rewrite("(string|number)"), "(string|number)");
        assert_eq!(rewrite("Function"), "Function");
    }
}
