//! Printing of variable nodes.

use arbor_fmt::{print_expr, print_name, print_type, PrintOps, Printer};
use arbor_ir::{DeclId, ExprId, NameId};
use arbor_lang::{Language, Module};

use crate::ast::{BasicName, RefExpr, VarDecl};

pub(crate) struct PrintAlgo;

impl PrintOps for PrintAlgo {
    fn print_name(&self, p: &mut Printer, lang: &Language, m: &Module, id: NameId) {
        let name = m.name_node(id).cast_ref::<BasicName>();
        p.write(lang.symbols().spelling(name.sym));
    }

    fn print_expr(&self, p: &mut Printer, lang: &Language, m: &Module, id: ExprId) {
        let reference = m.expr_node(id).cast_ref::<RefExpr>();
        let decl = m.decl_node(reference.decl);
        match decl.name() {
            Some(name) => print_name(p, lang, m, name),
            None => panic!("reference to an unnamed declaration"),
        }
    }

    fn print_decl(&self, p: &mut Printer, lang: &Language, m: &Module, id: DeclId) {
        let var = m.decl_node(id).cast_ref::<VarDecl>();
        p.write("var ");
        print_name(p, lang, m, var.name);
        p.write(" : ");
        print_type(p, lang, m, var.ty);
        p.write(" = ");
        print_expr(p, lang, m, var.init);
        p.write_char(';');
    }
}
