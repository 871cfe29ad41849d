//! Evaluation of integer expressions.
//!
//! Arithmetic failures here are the canonical recoverable errors: a division
//! by zero or an overflow during folding yields an `EvalError` the caller
//! may suppress, falling back to runtime evaluation.

use arbor_eval::{evaluate_expr, EvalError, EvalOps, EvalResult, Evaluator, Value};
use arbor_ir::ExprId;
use arbor_lang::{Language, Module};

use crate::ast::{
    AddExpr, DivExpr, EqExpr, GeExpr, GtExpr, IntExpr, LeExpr, LtExpr, MulExpr, NeExpr, NegExpr,
    RemExpr, SubExpr,
};

pub(crate) struct EvalAlgo;

impl EvalOps for EvalAlgo {
    fn eval_expr(&self, ev: &mut Evaluator, lang: &Language, m: &Module, id: ExprId) -> EvalResult {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<IntExpr>() {
            return Ok(Value::Int(lit.value));
        }
        if let Some(neg) = node.downcast_ref::<NegExpr>() {
            let operand = evaluate_expr(ev, lang, m, neg.operand)?.as_int()?;
            let value = operand
                .checked_neg()
                .ok_or(EvalError::Overflow { operation: "neg" })?;
            return Ok(Value::Int(value));
        }

        macro_rules! try_arith {
            ($($name:ident => $op:literal, $checked:ident;)*) => {
                $(
                    if let Some(e) = node.downcast_ref::<$name>() {
                        let lhs = evaluate_expr(ev, lang, m, e.lhs)?.as_int()?;
                        let rhs = evaluate_expr(ev, lang, m, e.rhs)?.as_int()?;
                        return arith(lhs, rhs, $op, i64::$checked);
                    }
                )*
            };
        }
        try_arith! {
            AddExpr => "add", checked_add;
            SubExpr => "sub", checked_sub;
            MulExpr => "mul", checked_mul;
        }

        if let Some(e) = node.downcast_ref::<DivExpr>() {
            let lhs = evaluate_expr(ev, lang, m, e.lhs)?.as_int()?;
            let rhs = evaluate_expr(ev, lang, m, e.rhs)?.as_int()?;
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            return arith(lhs, rhs, "div", i64::checked_div);
        }
        if let Some(e) = node.downcast_ref::<RemExpr>() {
            let lhs = evaluate_expr(ev, lang, m, e.lhs)?.as_int()?;
            let rhs = evaluate_expr(ev, lang, m, e.rhs)?.as_int()?;
            if rhs == 0 {
                return Err(EvalError::DivisionByZero);
            }
            return arith(lhs, rhs, "rem", i64::checked_rem);
        }

        macro_rules! try_cmp {
            ($($name:ident => $op:tt;)*) => {
                $(
                    if let Some(e) = node.downcast_ref::<$name>() {
                        let lhs = evaluate_expr(ev, lang, m, e.lhs)?.as_int()?;
                        let rhs = evaluate_expr(ev, lang, m, e.rhs)?.as_int()?;
                        return Ok(Value::Bool(lhs $op rhs));
                    }
                )*
            };
        }
        try_cmp! {
            EqExpr => ==;
            NeExpr => !=;
            LtExpr => <;
            GtExpr => >;
            LeExpr => <=;
            GeExpr => >=;
        }

        panic!("unexpected integer expression {:?}", node.kind());
    }
}

fn arith(lhs: i64, rhs: i64, op: &'static str, f: fn(i64, i64) -> Option<i64>) -> EvalResult {
    f(lhs, rhs)
        .map(Value::Int)
        .ok_or(EvalError::Overflow { operation: op })
}
