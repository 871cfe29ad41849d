//! Evaluation of boolean expressions.

use arbor_eval::{evaluate_expr, EvalOps, EvalResult, Evaluator, Value};
use arbor_ir::ExprId;
use arbor_lang::{Language, Module};

use crate::ast::{AndExpr, BoolExpr, NotExpr, OrExpr};

pub(crate) struct EvalAlgo;

impl EvalOps for EvalAlgo {
    fn eval_expr(&self, ev: &mut Evaluator, lang: &Language, m: &Module, id: ExprId) -> EvalResult {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<BoolExpr>() {
            Ok(Value::Bool(lit.value))
        } else if let Some(and) = node.downcast_ref::<AndExpr>() {
            let lhs = evaluate_expr(ev, lang, m, and.lhs)?.as_bool()?;
            let rhs = evaluate_expr(ev, lang, m, and.rhs)?.as_bool()?;
            Ok(Value::Bool(lhs & rhs))
        } else if let Some(or) = node.downcast_ref::<OrExpr>() {
            let lhs = evaluate_expr(ev, lang, m, or.lhs)?.as_bool()?;
            let rhs = evaluate_expr(ev, lang, m, or.rhs)?.as_bool()?;
            Ok(Value::Bool(lhs | rhs))
        } else if let Some(not) = node.downcast_ref::<NotExpr>() {
            let operand = evaluate_expr(ev, lang, m, not.operand)?.as_bool()?;
            Ok(Value::Bool(!operand))
        } else {
            panic!("unexpected boolean expression {:?}", node.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Builder;
    use arbor_eval::{evaluate_expr, Evaluator, Value};
    use arbor_lang::{Language, Module};
    use pretty_assertions::assert_eq;

    fn setup() -> (Language, Module) {
        let mut lang = Language::new();
        lang.add_feature(crate::feature());
        let m = Module::new(lang.intern("test"));
        (lang, m)
    }

    #[test]
    fn connectives_are_strict_and_correct() {
        let (lang, mut m) = setup();
        let e = m.with_builder::<Builder, _>(&lang, |b, m| {
            let t = b.true_expr(m);
            let f = b.false_expr(m);
            let and = b.and_expr(m, t, f);
            let or = b.or_expr(m, and, t);
            b.not_expr(m, or)
        });
        let mut ev = Evaluator::new();
        assert_eq!(evaluate_expr(&mut ev, &lang, &m, e), Ok(Value::Bool(false)));
    }
}
