//! Evaluation of variable nodes.

use arbor_eval::{evaluate_expr, EvalOps, EvalResult, Evaluator};
use arbor_ir::{DeclId, ExprId};
use arbor_lang::{Language, Module};

use crate::ast::{RefExpr, VarDecl};

pub(crate) struct EvalAlgo;

impl EvalOps for EvalAlgo {
    fn eval_expr(&self, ev: &mut Evaluator, _lang: &Language, m: &Module, id: ExprId) -> EvalResult {
        let reference = m.expr_node(id).cast_ref::<RefExpr>();
        // Recoverable when the declaration has not been elaborated: the
        // folding attempt fails and the caller falls back to runtime code.
        ev.decl_value(reference.decl)
    }

    fn eval_decl(&self, ev: &mut Evaluator, lang: &Language, m: &Module, id: DeclId) -> EvalResult {
        let var = m.decl_node(id).cast_ref::<VarDecl>();
        let value = evaluate_expr(ev, lang, m, var.init)?;
        ev.bind_decl(id, value);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::Builder;
    use arbor_eval::{evaluate_decl, evaluate_expr, EvalError, Evaluator, Value};
    use arbor_lang::{Language, Module};
    use pretty_assertions::assert_eq;

    fn setup() -> (Language, Module) {
        let mut lang = Language::new();
        lang.add_feature(arbor_sys_bool::feature());
        lang.add_feature(arbor_sys_int::feature());
        lang.add_feature(crate::feature());
        let m = Module::new(lang.intern("test"));
        (lang, m)
    }

    #[test]
    fn references_see_elaborated_declarations() {
        let (lang, mut m) = setup();
        let (decl, reference) = {
            let decl = m.with_builder::<arbor_sys_int::Builder, _>(&lang, |ints, m| {
                let ty = ints.int_type(m, 32);
                let init = ints.int_expr(m, ty, 5);
                let name = m.with_builder::<Builder, _>(&lang, |vars, m| {
                    let sym = lang.intern("five");
                    vars.basic_name(m, sym)
                });
                m.with_builder::<Builder, _>(&lang, |vars, m| {
                    vars.var_decl(&lang, m, name, ty, init)
                })
            });
            let reference = m.with_builder::<Builder, _>(&lang, |vars, m| vars.ref_expr(m, decl));
            (decl, reference)
        };
        m.add_declaration(decl);

        let mut ev = Evaluator::new();
        // Before elaboration the reference fails recoverably.
        assert_eq!(
            evaluate_expr(&mut ev, &lang, &m, reference),
            Err(EvalError::UnboundDecl { decl })
        );
        assert_eq!(evaluate_decl(&mut ev, &lang, &m, decl), Ok(Value::Int(5)));
        assert_eq!(evaluate_expr(&mut ev, &lang, &m, reference), Ok(Value::Int(5)));
    }
}
