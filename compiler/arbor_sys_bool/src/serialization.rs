//! Archive records for boolean nodes.

use arbor_archive::{ArchiveWriter, WriteOps};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{AndExpr, BoolExpr, BoolType, NotExpr, OrExpr};

pub(crate) struct WriteAlgo;

impl WriteOps for WriteAlgo {
    fn write_type(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: TypeId) {
        // `bool` has no parameters; the kind prefix is the whole record.
        let _ = m.type_node(id).cast_ref::<BoolType>();
    }

    fn write_expr(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<BoolExpr>() {
            w.write_bool(lit.value);
        } else if let Some(and) = node.downcast_ref::<AndExpr>() {
            w.write_expr(lang, m, and.lhs);
            w.write_expr(lang, m, and.rhs);
        } else if let Some(or) = node.downcast_ref::<OrExpr>() {
            w.write_expr(lang, m, or.lhs);
            w.write_expr(lang, m, or.rhs);
        } else if let Some(not) = node.downcast_ref::<NotExpr>() {
            w.write_expr(lang, m, not.operand);
        } else {
            panic!("unexpected boolean expression {:?}", node.kind());
        }
    }
}
