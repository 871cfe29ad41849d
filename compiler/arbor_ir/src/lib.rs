//! Arbor IR - shared node model for the extensible kernel.
//!
//! This crate contains the data types every language feature and every
//! cross-cutting algorithm agrees on:
//! - `Kind` and `FeatureId` for the block-partitioned kind space
//! - Arena ids (`NameId`, `TypeId`, `ExprId`, `DeclId`, `StmtId`)
//! - The five node-category traits features implement
//! - `Symbol` and `SymbolTable` for interned identifier spellings
//!
//! # Design Philosophy
//!
//! - **Intern identifiers**: strings become `Symbol(u32)` with O(1) equality
//! - **Flatten the tree**: nodes reference each other through `u32` arena ids,
//!   never through ownership - the module arena is the sole owner
//! - **Open node space**: there is no closed enum of node kinds; concrete
//!   nodes are feature-supplied types behind category trait objects, tagged
//!   with a `Kind` drawn from the feature's block

mod ids;
mod kind;
mod node;
mod symbol;

pub use ids::{DeclId, ExprId, NameId, StmtId, TypeId};
pub use kind::{FeatureId, Kind, BLOCK_SIZE};
pub use node::{AsAny, DeclNode, ExprNode, NameNode, StmtNode, TypeNode};
pub use symbol::{Symbol, SymbolTable};
