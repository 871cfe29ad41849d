//! Archive records for integer nodes.

use arbor_archive::{ArchiveWriter, WriteOps};
use arbor_ir::{ExprId, TypeId};
use arbor_lang::{Language, Module};

use crate::ast::{binary_operands, IntExpr, IntType, NatType, NegExpr};

pub(crate) struct WriteAlgo;

impl WriteOps for WriteAlgo {
    fn write_type(&self, w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: TypeId) {
        let node = m.type_node(id);
        if let Some(nat) = node.downcast_ref::<NatType>() {
            w.write_u32(nat.precision);
        } else if let Some(int) = node.downcast_ref::<IntType>() {
            w.write_u32(int.precision);
        } else {
            panic!("unexpected integer type {:?}", node.kind());
        }
    }

    fn write_expr(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        if let Some(lit) = node.downcast_ref::<IntExpr>() {
            w.write_i64(lit.value);
        } else if let Some(neg) = node.downcast_ref::<NegExpr>() {
            w.write_expr(lang, m, neg.operand);
        } else if let Some((lhs, rhs)) = binary_operands(node) {
            w.write_expr(lang, m, lhs);
            w.write_expr(lang, m, rhs);
        } else {
            panic!("unexpected integer expression {:?}", node.kind());
        }
    }
}
