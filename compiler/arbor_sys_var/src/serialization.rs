//! Archive records for variable nodes.

use arbor_archive::{ArchiveWriter, WriteOps};
use arbor_ir::{DeclId, ExprId, NameId};
use arbor_lang::{Language, Module};

use crate::ast::{BasicName, RefExpr, VarDecl};

pub(crate) struct WriteAlgo;

impl WriteOps for WriteAlgo {
    fn write_name(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: NameId) {
        let name = m.name_node(id).cast_ref::<BasicName>();
        w.write_symbol(lang, name.sym);
    }

    fn write_decl(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: DeclId) {
        let var = m.decl_node(id).cast_ref::<VarDecl>();
        w.write_name(lang, m, var.name);
        w.write_type_ref(lang, m, var.ty);
        w.write_expr(lang, m, var.init);
    }

    fn write_expr(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: ExprId) {
        let reference = m.expr_node(id).cast_ref::<RefExpr>();
        w.write_decl_ref(lang, m, reference.decl);
    }
}
