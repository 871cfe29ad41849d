//! Pretty-printing: the `Print` algorithm family.
//!
//! Each feature registers a [`PrintOps`] implementation covering the node
//! kinds it defines. The entry points here resolve the owning feature from
//! the node's kind and dispatch; implementations recurse through the same
//! entry points for sub-nodes. A feature that reaches a default method body
//! failed to override a category it defines nodes for - that is a linkage
//! bug and panics.

use std::fmt;

use arbor_ir::{DeclId, ExprId, NameId, StmtId, TypeId};
use arbor_lang::{AlgorithmFamily, Language, Module};

/// Family tag for pretty printing.
pub struct Print;

impl AlgorithmFamily for Print {
    type Dispatch = dyn PrintOps;
    const NAME: &'static str = "print";
}

/// Text sink the print algorithms write into.
pub struct Printer {
    out: String,
}

impl Printer {
    /// Create an empty printer.
    pub fn new() -> Self {
        Printer { out: String::new() }
    }

    /// Append literal text.
    pub fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Append a single character.
    pub fn write_char(&mut self, c: char) {
        self.out.push(c);
    }

    /// Append a space.
    pub fn space(&mut self) {
        self.out.push(' ');
    }

    /// Append a newline.
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    /// The accumulated text.
    pub fn finish(self) -> String {
        self.out
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Printer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}

/// Per-feature print implementations, one method per base category.
///
/// Default bodies are the documented fatal path: they fire only when a
/// feature defines nodes in a category without overriding its handler.
pub trait PrintOps {
    /// Print a name node.
    fn print_name(&self, _p: &mut Printer, _lang: &Language, m: &Module, id: NameId) {
        panic!(
            "print algorithm not defined for name node {:?}",
            m.name_node(id).kind()
        );
    }

    /// Print a type node.
    fn print_type(&self, _p: &mut Printer, _lang: &Language, m: &Module, id: TypeId) {
        panic!(
            "print algorithm not defined for type node {:?}",
            m.type_node(id).kind()
        );
    }

    /// Print an expression node.
    fn print_expr(&self, _p: &mut Printer, _lang: &Language, m: &Module, id: ExprId) {
        panic!(
            "print algorithm not defined for expression node {:?}",
            m.expr_node(id).kind()
        );
    }

    /// Print a declaration node.
    fn print_decl(&self, _p: &mut Printer, _lang: &Language, m: &Module, id: DeclId) {
        panic!(
            "print algorithm not defined for declaration node {:?}",
            m.decl_node(id).kind()
        );
    }

    /// Print a statement node.
    fn print_stmt(&self, _p: &mut Printer, _lang: &Language, m: &Module, id: StmtId) {
        panic!(
            "print algorithm not defined for statement node {:?}",
            m.stmt_node(id).kind()
        );
    }
}

/// Print a name through the owning feature.
pub fn print_name(p: &mut Printer, lang: &Language, m: &Module, id: NameId) {
    let kind = m.name_node(id).kind();
    lang.feature_of(kind).algorithm::<Print>().print_name(p, lang, m, id);
}

/// Print a type through the owning feature.
pub fn print_type(p: &mut Printer, lang: &Language, m: &Module, id: TypeId) {
    let kind = m.type_node(id).kind();
    lang.feature_of(kind).algorithm::<Print>().print_type(p, lang, m, id);
}

/// Print an expression through the owning feature.
pub fn print_expr(p: &mut Printer, lang: &Language, m: &Module, id: ExprId) {
    let kind = m.expr_node(id).kind();
    lang.feature_of(kind).algorithm::<Print>().print_expr(p, lang, m, id);
}

/// Print a declaration through the owning feature.
pub fn print_decl(p: &mut Printer, lang: &Language, m: &Module, id: DeclId) {
    let kind = m.decl_node(id).kind();
    lang.feature_of(kind).algorithm::<Print>().print_decl(p, lang, m, id);
}

/// Print a statement through the owning feature.
pub fn print_stmt(p: &mut Printer, lang: &Language, m: &Module, id: StmtId) {
    let kind = m.stmt_node(id).kind();
    lang.feature_of(kind).algorithm::<Print>().print_stmt(p, lang, m, id);
}

/// Print a module's declarations in declaration order, one per line.
pub fn print_module(p: &mut Printer, lang: &Language, m: &Module) {
    for &decl in m.declarations() {
        print_decl(p, lang, m, decl);
        p.newline();
    }
}

/// Convenience: print a whole module to a string.
pub fn module_to_string(lang: &Language, m: &Module) -> String {
    let mut p = Printer::new();
    print_module(&mut p, lang, m);
    p.finish()
}

/// Convenience: print one expression to a string.
pub fn expr_to_string(lang: &Language, m: &Module, id: ExprId) -> String {
    let mut p = Printer::new();
    print_expr(&mut p, lang, m, id);
    p.finish()
}
