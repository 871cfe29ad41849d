//! Printing of boolean nodes.

use arbor_fmt::{print_expr, PrintOps, Printer};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{AndExpr, BoolExpr, BoolType, NotExpr, OrExpr};

pub(crate) struct PrintAlgo;

impl PrintOps for PrintAlgo {
    fn print_type(&self, p: &mut Printer, _lang: &Language, m: &Module, id: TypeId) {
        let _ = m.type_node(id).cast_ref::<BoolType>();
        p.write("bool");
    }

    fn print_expr(&self, p: &mut Printer, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<BoolExpr>() {
            p.write(if lit.value { "true" } else { "false" });
        } else if let Some(and) = node.downcast_ref::<AndExpr>() {
            infix(p, lang, m, and.lhs, "&", and.rhs);
        } else if let Some(or) = node.downcast_ref::<OrExpr>() {
            infix(p, lang, m, or.lhs, "|", or.rhs);
        } else if let Some(not) = node.downcast_ref::<NotExpr>() {
            p.write_char('!');
            print_expr(p, lang, m, not.operand);
        } else {
            panic!("unexpected boolean expression {:?}", node.kind());
        }
    }
}

fn infix(p: &mut Printer, lang: &Language, m: &Module, lhs: ExprId, op: &str, rhs: ExprId) {
    p.write_char('(');
    print_expr(p, lang, m, lhs);
    p.space();
    p.write(op);
    p.space();
    print_expr(p, lang, m, rhs);
    p.write_char(')');
}
