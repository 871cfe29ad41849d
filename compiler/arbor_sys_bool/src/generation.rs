//! Code generation for boolean nodes.

use arbor_codegen::{generate_expr, GenOps, GenType, GenValue, Generator};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{AndExpr, BoolExpr, BoolType, NotExpr, OrExpr};

pub(crate) struct GenAlgo;

impl GenOps for GenAlgo {
    fn gen_type(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: TypeId) -> GenType {
        let _ = m.type_node(id).cast_ref::<BoolType>();
        GenType("i1")
    }

    fn gen_expr(&self, g: &mut Generator, lang: &Language, m: &Module, id: ExprId) -> GenValue {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<BoolExpr>() {
            GenValue::ImmBool(lit.value)
        } else if let Some(and) = node.downcast_ref::<AndExpr>() {
            binary(g, lang, m, "and", and.lhs, and.rhs)
        } else if let Some(or) = node.downcast_ref::<OrExpr>() {
            binary(g, lang, m, "or", or.lhs, or.rhs)
        } else if let Some(not) = node.downcast_ref::<NotExpr>() {
            let operand = generate_expr(g, lang, m, not.operand);
            let out = g.fresh_temp();
            g.emit(format!(
                "{} = xor i1 {}, true",
                out.operand(lang),
                operand.operand(lang)
            ));
            out
        } else {
            panic!("unexpected boolean expression {:?}", node.kind());
        }
    }
}

fn binary(
    g: &mut Generator,
    lang: &Language,
    m: &Module,
    op: &str,
    lhs: ExprId,
    rhs: ExprId,
) -> GenValue {
    let lhs = generate_expr(g, lang, m, lhs);
    let rhs = generate_expr(g, lang, m, rhs);
    let out = g.fresh_temp();
    g.emit(format!(
        "{} = {op} i1 {}, {}",
        out.operand(lang),
        lhs.operand(lang),
        rhs.operand(lang)
    ));
    out
}
