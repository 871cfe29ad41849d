//! Printing of integer nodes.

use arbor_fmt::{print_expr, PrintOps, Printer};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};
use std::fmt::Write as _;

use crate::ast::{
    AddExpr, DivExpr, EqExpr, GeExpr, GtExpr, IntExpr, IntType, LeExpr, LtExpr, MulExpr, NatType,
    NeExpr, NegExpr, RemExpr, SubExpr,
};

pub(crate) struct PrintAlgo;

impl PrintOps for PrintAlgo {
    fn print_type(&self, p: &mut Printer, _lang: &Language, m: &Module, id: TypeId) {
        let node = m.type_node(id);
        if let Some(nat) = node.downcast_ref::<NatType>() {
            let _ = write!(p, "nat{}", nat.precision);
        } else if let Some(int) = node.downcast_ref::<IntType>() {
            let _ = write!(p, "int{}", int.precision);
        } else {
            panic!("unexpected integer type {:?}", node.kind());
        }
    }

    fn print_expr(&self, p: &mut Printer, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<IntExpr>() {
            let _ = write!(p, "{}", lit.value);
            return;
        }
        if let Some(neg) = node.downcast_ref::<NegExpr>() {
            p.write_char('-');
            print_expr(p, lang, m, neg.operand);
            return;
        }

        macro_rules! try_infix {
            ($($name:ident => $op:literal),* $(,)?) => {
                $(
                    if let Some(e) = node.downcast_ref::<$name>() {
                        infix(p, lang, m, e.lhs, $op, e.rhs);
                        return;
                    }
                )*
            };
        }
        try_infix! {
            AddExpr => "+",
            SubExpr => "-",
            MulExpr => "*",
            DivExpr => "/",
            RemExpr => "%",
            EqExpr => "==",
            NeExpr => "!=",
            LtExpr => "<",
            GtExpr => ">",
            LeExpr => "<=",
            GeExpr => ">=",
        }
        panic!("unexpected integer expression {:?}", node.kind());
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
