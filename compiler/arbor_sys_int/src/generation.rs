//! Code generation for integer nodes.

use arbor_codegen::{generate_expr, generate_type, GenOps, GenType, GenValue, Generator};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{
    AddExpr, DivExpr, EqExpr, GeExpr, GtExpr, IntExpr, IntType, LeExpr, LtExpr, MulExpr, NatType,
    NeExpr, NegExpr, RemExpr, SubExpr,
};

pub(crate) struct GenAlgo;

fn lowered(precision: u32) -> GenType {
    match precision {
        8 => GenType("i8"),
        16 => GenType("i16"),
        32 => GenType("i32"),
        64 => GenType("i64"),
        _ => panic!("unsupported integer precision {precision}"),
    }
}

impl GenOps for GenAlgo {
    fn gen_type(&self, _g: &mut Generator, _lang: &Language, m: &Module, id: TypeId) -> GenType {
        let node = m.type_node(id);
        if let Some(nat) = node.downcast_ref::<NatType>() {
            lowered(nat.precision)
        } else if let Some(int) = node.downcast_ref::<IntType>() {
            lowered(int.precision)
        } else {
            panic!("unexpected integer type {:?}", node.kind());
        }
    }

    fn gen_expr(&self, g: &mut Generator, lang: &Language, m: &Module, id: ExprId) -> GenValue {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<IntExpr>() {
            return GenValue::ImmInt(lit.value);
        }
        if let Some(neg) = node.downcast_ref::<NegExpr>() {
            let ty = generate_type(g, lang, m, neg.ty);
            let operand = generate_expr(g, lang, m, neg.operand);
            let out = g.fresh_temp();
            g.emit(format!(
                "{} = sub {ty} 0, {}",
                out.operand(lang),
                operand.operand(lang)
            ));
            return out;
        }

        macro_rules! try_binary {
            ($($name:ident => $inst:literal, $typed_by:ident;)*) => {
                $(
                    if let Some(e) = node.downcast_ref::<$name>() {
                        // Arithmetic is typed by the result; comparisons by
                        // their operands.
                        let ty_id = match stringify!($typed_by) {
                            "result" => e.ty,
                            _ => m.expr_node(e.lhs).ty(),
                        };
                        let ty = generate_type(g, lang, m, ty_id);
                        let lhs = generate_expr(g, lang, m, e.lhs);
                        let rhs = generate_expr(g, lang, m, e.rhs);
                        let out = g.fresh_temp();
                        g.emit(format!(
                            "{} = {} {ty} {}, {}",
                            out.operand(lang),
                            $inst,
                            lhs.operand(lang),
                            rhs.operand(lang)
                        ));
                        return out;
                    }
                )*
            };
        }
        try_binary! {
            AddExpr => "add", result;
            SubExpr => "sub", result;
            MulExpr => "mul", result;
            DivExpr => "sdiv", result;
            RemExpr => "srem", result;
            EqExpr => "icmp eq", operands;
            NeExpr => "icmp ne", operands;
            LtExpr => "icmp slt", operands;
            GtExpr => "icmp sgt", operands;
            LeExpr => "icmp sle", operands;
            GeExpr => "icmp sge", operands;
        }

        panic!("unexpected integer expression {:?}", node.kind());
    }
}
