//! Code generation for variable nodes.

use arbor_codegen::{generate_expr, generate_type, GenOps, GenValue, Generator};
use arbor_ir::{DeclId, ExprId, NameId};
use arbor_lang::{Language, Module};

use crate::ast::{BasicName, RefExpr, VarDecl};

pub(crate) struct GenAlgo;

impl GenOps for GenAlgo {
    fn gen_name(&self, _g: &mut Generator, lang: &Language, m: &Module, id: NameId) -> String {
        let name = m.name_node(id).cast_ref::<BasicName>();
        lang.symbols().spelling(name.sym).to_owned()
    }

    fn gen_decl(&self, g: &mut Generator, lang: &Language, m: &Module, id: DeclId) -> GenValue {
        let var = m.decl_node(id).cast_ref::<VarDecl>();
        let name = m.name_node(var.name).cast_ref::<BasicName>();
        let ty = generate_type(g, lang, m, var.ty);
        let init = generate_expr(g, lang, m, var.init);
        let global = GenValue::Global(name.sym);
        g.emit(format!(
            "{} = global {ty} {}",
            global.operand(lang),
            init.operand(lang)
        ));
        g.put_value(id, global.clone());
        global
    }

    fn gen_expr(&self, g: &mut Generator, _lang: &Language, m: &Module, id: ExprId) -> GenValue {
        let reference = m.expr_node(id).cast_ref::<RefExpr>();
        // The declaration must have been generated already; out-of-order
        // generation is the driver's problem, not the kernel's.
        g.get_value(reference.decl).clone()
    }
}
