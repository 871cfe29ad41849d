//! Binary serialization of modules: the `Write` algorithm family.
//!
//! The archive is a self-describing container of three tables - types,
//! declarations, interned strings - each a concatenation of per-entity byte
//! records plus a parallel offset index. Entities reference each other by
//! table-relative integer id, assigned on first reference: re-writing an
//! already-seen entity emits only its 32-bit id, never its bytes again
//! (content addressing). All integers are big-endian; ids and string lengths
//! are 32-bit, per-block entry counts and data lengths 64-bit.
//!
//! Per-node-kind record layout is feature-specific: types, declarations,
//! names and statements are framed as `[kind][feature bytes]`, expressions
//! as `[kind][type ref][feature bytes]`. The framing here is the externally
//! observable contract; what a feature puts in its bytes is its own concern.

use std::hash::Hash;
use std::path::{Path, PathBuf};

use arbor_ir::{DeclId, ExprId, NameId, StmtId, Symbol, TypeId};
use arbor_lang::{AlgorithmFamily, Language, Module};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

/// Family tag for archive serialization.
pub struct Write;

impl AlgorithmFamily for Write {
    type Dispatch = dyn WriteOps;
    const NAME: &'static str = "write";
}

/// Error saving an archive to disk.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The file could not be written.
    #[error("failed to write archive to `{path}`")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A content-addressed table of entity records.
///
/// A record slot is reserved (and its id handed out) before the record is
/// serialized, so self-referencing entities terminate.
struct Table<K> {
    ids: FxHashMap<K, u32>,
    records: Vec<Option<Vec<u8>>>,
}

impl<K: Eq + Hash> Table<K> {
    fn new() -> Self {
        Table {
            ids: FxHashMap::default(),
            records: Vec::new(),
        }
    }

    fn known(&self, key: &K) -> Option<u32> {
        self.ids.get(key).copied()
    }

    fn reserve(&mut self, key: K) -> u32 {
        let id = u32::try_from(self.records.len())
            .unwrap_or_else(|_| panic!("archive table exceeded u32::MAX entities"));
        self.ids.insert(key, id);
        self.records.push(None);
        id
    }

    fn fill(&mut self, id: u32, bytes: Vec<u8>) {
        debug_assert!(self.records[id as usize].is_none());
        self.records[id as usize] = Some(bytes);
    }

    fn closed_records(&self) -> Vec<&[u8]> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, slot)| match slot {
                Some(bytes) => bytes.as_slice(),
                None => panic!("archive record {i} left open"),
            })
            .collect()
    }
}

/// Serializes one module into the three-table container.
pub struct ArchiveWriter {
    types: Table<TypeId>,
    decls: Table<DeclId>,
    strings: Table<String>,
    /// Stack of open record streams; writes land in the innermost.
    streams: Vec<Vec<u8>>,
}

impl ArchiveWriter {
    /// Create an empty archive.
    pub fn new() -> Self {
        ArchiveWriter {
            types: Table::new(),
            decls: Table::new(),
            strings: Table::new(),
            streams: Vec::new(),
        }
    }

    fn active_stream(&mut self) -> &mut Vec<u8> {
        match self.streams.last_mut() {
            Some(stream) => stream,
            None => panic!("entity bytes written outside any record stream"),
        }
    }

    /// Append a boolean to the active record.
    pub fn write_bool(&mut self, b: bool) {
        self.active_stream().push(u8::from(b));
    }

    /// Append a big-endian u32 to the active record.
    pub fn write_u32(&mut self, n: u32) {
        self.active_stream().extend_from_slice(&n.to_be_bytes());
    }

    /// Append a big-endian u64 to the active record.
    pub fn write_u64(&mut self, n: u64) {
        self.active_stream().extend_from_slice(&n.to_be_bytes());
    }

    /// Append a big-endian i64 to the active record.
    pub fn write_i64(&mut self, n: i64) {
        self.active_stream().extend_from_slice(&n.to_be_bytes());
    }

    /// Append a table-relative entity id (32-bit).
    pub fn write_id(&mut self, id: u32) {
        self.write_u32(id);
    }

    /// Write a string reference into the active record.
    ///
    /// Strings are unified in the string table by content: the first
    /// reference serializes `[len: u32][bytes]` as a table record, later
    /// references emit only the id.
    pub fn write_string(&mut self, s: &str) {
        if let Some(id) = self.strings.known_str(s) {
            self.write_id(id);
            return;
        }
        let len = u32::try_from(s.len())
            .unwrap_or_else(|_| panic!("string of {} bytes exceeds archive limit", s.len()));
        let mut record = Vec::with_capacity(4 + s.len());
        record.extend_from_slice(&len.to_be_bytes());
        record.extend_from_slice(s.as_bytes());
        let id = self.strings.reserve(s.to_owned());
        self.strings.fill(id, record);
        self.write_id(id);
    }

    /// Write an interned symbol's spelling as a string reference.
    pub fn write_symbol(&mut self, lang: &Language, sym: Symbol) {
        self.write_string(lang.symbols().spelling(sym));
    }

    /// Write a name inline into the active record: kind, then feature bytes.
    pub fn write_name(&mut self, lang: &Language, m: &Module, id: NameId) {
        let kind = m.name_node(id).kind();
        self.write_u32(kind.raw());
        lang.feature_of(kind).algorithm::<Write>().write_name(self, lang, m, id);
    }

    /// Write a type reference into the active record.
    ///
    /// Types are always references: the first one serializes the record
    /// `[kind][feature bytes]` into the type table, later ones emit the id.
    pub fn write_type_ref(&mut self, lang: &Language, m: &Module, id: TypeId) {
        if let Some(tid) = self.types.known(&id) {
            self.write_id(tid);
            return;
        }
        let tid = self.types.reserve(id);
        self.streams.push(Vec::new());
        let kind = m.type_node(id).kind();
        self.write_u32(kind.raw());
        lang.feature_of(kind).algorithm::<Write>().write_type(self, lang, m, id);
        let record = self.pop_stream();
        self.types.fill(tid, record);
        self.write_id(tid);
    }

    /// Write an expression inline: kind, type reference, feature bytes.
    pub fn write_expr(&mut self, lang: &Language, m: &Module, id: ExprId) {
        let node = m.expr_node(id);
        let kind = node.kind();
        let ty = node.ty();
        self.write_u32(kind.raw());
        self.write_type_ref(lang, m, ty);
        lang.feature_of(kind).algorithm::<Write>().write_expr(self, lang, m, id);
    }

    /// Serialize a top-level declaration into the declaration table.
    ///
    /// Already-seen declarations are left alone; no id is emitted (this is
    /// the declaration-context form - use [`ArchiveWriter::write_decl_ref`]
    /// from within types and expressions).
    pub fn write_decl(&mut self, lang: &Language, m: &Module, id: DeclId) {
        if self.decls.known(&id).is_some() {
            return;
        }
        let did = self.decls.reserve(id);
        self.save_decl(did, lang, m, id);
    }

    /// Write a declaration reference into the active record, serializing the
    /// declaration first if it has not been seen.
    ///
    /// The id is assigned *before* the record is serialized, so a
    /// declaration whose body references itself terminates.
    pub fn write_decl_ref(&mut self, lang: &Language, m: &Module, id: DeclId) {
        let did = match self.decls.known(&id) {
            Some(did) => did,
            None => {
                let did = self.decls.reserve(id);
                self.save_decl(did, lang, m, id);
                did
            }
        };
        self.write_id(did);
    }

    /// Write a statement inline: kind, then feature bytes.
    pub fn write_stmt(&mut self, lang: &Language, m: &Module, id: StmtId) {
        let kind = m.stmt_node(id).kind();
        self.write_u32(kind.raw());
        lang.feature_of(kind).algorithm::<Write>().write_stmt(self, lang, m, id);
    }

    /// Serialize every top-level declaration of the module, in declaration
    /// order.
    pub fn write_module(&mut self, lang: &Language, m: &Module) {
        for &decl in m.declarations() {
            self.write_decl(lang, m, decl);
        }
    }

    fn save_decl(&mut self, did: u32, lang: &Language, m: &Module, id: DeclId) {
        self.streams.push(Vec::new());
        let kind = m.decl_node(id).kind();
        self.write_u32(kind.raw());
        lang.feature_of(kind).algorithm::<Write>().write_decl(self, lang, m, id);
        let record = self.pop_stream();
        self.decls.fill(did, record);
    }

    fn pop_stream(&mut self) -> Vec<u8> {
        match self.streams.pop() {
            Some(stream) => stream,
            None => panic!("record stream stack underflow"),
        }
    }

    /// Number of type records written so far.
    pub fn type_records(&self) -> usize {
        self.types.records.len()
    }

    /// Number of declaration records written so far.
    pub fn decl_records(&self) -> usize {
        self.decls.records.len()
    }

    /// Number of string records written so far.
    pub fn string_records(&self) -> usize {
        self.strings.records.len()
    }

    /// Render the archive: one outer block whose three records are the type,
    /// declaration, and string blocks.
    ///
    /// # Panics
    /// Panics if a record stream is still open.
    pub fn to_bytes(&self) -> Vec<u8> {
        assert!(
            self.streams.is_empty(),
            "archive finalized with an open record stream"
        );
        let blocks = [
            serialize_block(&self.types.closed_records()),
            serialize_block(&self.decls.closed_records()),
            serialize_block(&self.strings.closed_records()),
        ];
        let refs: Vec<&[u8]> = blocks.iter().map(Vec::as_slice).collect();
        serialize_block(&refs)
    }

    /// Save the archive to a file.
    pub fn save(&self, path: &Path) -> Result<(), ArchiveError> {
        let bytes = self.to_bytes();
        info!(path = %path.display(), size = bytes.len(), "save archive");
        std::fs::write(path, &bytes).map_err(|source| ArchiveError::Io {
            path: path.to_owned(),
            source,
        })
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Table<String> {
    fn known_str(&self, key: &str) -> Option<u32> {
        self.ids.get(key).copied()
    }
}

/// Frame a list of records as one block:
/// `[count: u64][end: u64][offset: u32 x count][records...]`,
/// where `end` is the total length of the concatenated records and each
/// offset is the record's position relative to the start of the data.
fn serialize_block(records: &[&[u8]]) -> Vec<u8> {
    let mut offsets = Vec::with_capacity(records.len() * 4);
    let mut data = Vec::new();
    for record in records {
        let pos = u32::try_from(data.len())
            .unwrap_or_else(|_| panic!("archive block exceeds u32::MAX bytes"));
        offsets.extend_from_slice(&pos.to_be_bytes());
        data.extend_from_slice(record);
    }

    let mut out = Vec::with_capacity(16 + offsets.len() + data.len());
    out.extend_from_slice(&(records.len() as u64).to_be_bytes());
    out.extend_from_slice(&(data.len() as u64).to_be_bytes());
    out.extend_from_slice(&offsets);
    out.extend_from_slice(&data);
    out
}

/// Per-feature serialization implementations.
pub trait WriteOps {
    /// Write a name node's feature bytes.
    fn write_name(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: NameId) {
        panic!(
            "write algorithm not defined for name node {:?}",
            m.name_node(id).kind()
        );
    }

    /// Write a type node's feature bytes.
    fn write_type(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: TypeId) {
        panic!(
            "write algorithm not defined for type node {:?}",
            m.type_node(id).kind()
        );
    }

    /// Write an expression node's feature bytes.
    fn write_expr(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: ExprId) {
        panic!(
            "write algorithm not defined for expression node {:?}",
            m.expr_node(id).kind()
        );
    }

    /// Write a declaration node's feature bytes.
    fn write_decl(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: DeclId) {
        panic!(
            "write algorithm not defined for declaration node {:?}",
            m.decl_node(id).kind()
        );
    }

    /// Write a statement node's feature bytes.
    fn write_stmt(&self, _w: &mut ArchiveWriter, _lang: &Language, m: &Module, id: StmtId) {
        panic!(
            "write algorithm not defined for statement node {:?}",
            m.stmt_node(id).kind()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_ir::{DeclNode, FeatureId, Kind, TypeNode};
    use arbor_lang::{Feature, FeatureBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_archive_framing() {
        let w = ArchiveWriter::new();
        let bytes = w.to_bytes();
        // Three empty blocks of 16 bytes each, framed by an outer block:
        // count=3 (u64), end=48 (u64), offsets 0/16/32 (u32 each), data.
        assert_eq!(bytes.len(), 8 + 8 + 12 + 48);
        assert_eq!(&bytes[0..8], &3u64.to_be_bytes());
        assert_eq!(&bytes[8..16], &48u64.to_be_bytes());
        assert_eq!(&bytes[16..20], &0u32.to_be_bytes());
        assert_eq!(&bytes[20..24], &16u32.to_be_bytes());
        assert_eq!(&bytes[24..28], &32u32.to_be_bytes());
        // Each inner block: count=0, end=0.
        assert_eq!(&bytes[28..36], &0u64.to_be_bytes());
        assert_eq!(&bytes[36..44], &0u64.to_be_bytes());
    }

    // A minimal feature for exercising content addressing: one type kind
    // with no payload, one declaration kind that references its type twice.
    const FID: FeatureId = FeatureId::new(6);
    const UNIT_TYPE_KIND: Kind = Kind::in_block(FID, 0);
    const PAIR_DECL_KIND: Kind = Kind::in_block(FID, 1);

    struct UnitType;
    impl TypeNode for UnitType {
        fn kind(&self) -> Kind {
            UNIT_TYPE_KIND
        }
    }

    struct PairDecl {
        ty: TypeId,
    }
    impl DeclNode for PairDecl {
        fn kind(&self) -> Kind {
            PAIR_DECL_KIND
        }
    }

    struct StubWrite;
    impl WriteOps for StubWrite {
        fn write_type(&self, _w: &mut ArchiveWriter, _lang: &Language, _m: &Module, _id: TypeId) {
            // No payload beyond the kind.
        }
        fn write_decl(&self, w: &mut ArchiveWriter, lang: &Language, m: &Module, id: DeclId) {
            let ty = m.decl_node(id).cast_ref::<PairDecl>().ty;
            w.write_type_ref(lang, m, ty);
            w.write_type_ref(lang, m, ty);
        }
    }

    struct StubBuilder;
    impl FeatureBuilder for StubBuilder {
        fn feature_id(&self) -> FeatureId {
            FID
        }
    }

    fn stub_language() -> Language {
        fn make(_m: &mut Module) -> Box<dyn FeatureBuilder> {
            Box::new(StubBuilder)
        }
        let mut feat = Feature::new(FID, "stub", make);
        feat.add_algorithm::<Write>(Box::new(StubWrite));
        let mut lang = Language::new();
        lang.add_feature(feat);
        lang
    }

    #[test]
    fn repeated_references_are_content_addressed() {
        let lang = stub_language();
        let mut m = Module::new(lang.intern("unit"));
        let ty = m.alloc_type(UnitType);
        let d = m.alloc_decl(PairDecl { ty });
        m.add_declaration(d);

        let mut w = ArchiveWriter::new();
        w.write_module(&lang, &m);

        // One type record despite two references; one declaration record.
        assert_eq!(w.type_records(), 1);
        assert_eq!(w.decl_records(), 1);

        // The declaration record is [kind][type id][type id].
        let record = w.decls.records[0].as_deref().unwrap_or_default();
        let mut expected = Vec::new();
        expected.extend_from_slice(&PAIR_DECL_KIND.raw().to_be_bytes());
        expected.extend_from_slice(&0u32.to_be_bytes());
        expected.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(record, expected.as_slice());

        // The type record is just its kind.
        let type_record = w.types.records[0].as_deref().unwrap_or_default();
        assert_eq!(type_record, UNIT_TYPE_KIND.raw().to_be_bytes().as_slice());
    }

    #[test]
    fn strings_are_unified_by_content() {
        let lang = stub_language();
        let mut w = ArchiveWriter::new();
        w.streams.push(Vec::new());
        w.write_string("answer");
        w.write_string("answer");
        w.write_symbol(&lang, lang.intern("answer"));
        let stream = w.pop_stream();

        assert_eq!(w.string_records(), 1);
        // Three references to the same id.
        let mut expected = Vec::new();
        expected.extend_from_slice(&0u32.to_be_bytes());
        expected.extend_from_slice(&0u32.to_be_bytes());
        expected.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(stream, expected);

        let record = w.strings.records[0].as_deref().unwrap_or_default();
        let mut expected_record = Vec::new();
        expected_record.extend_from_slice(&6u32.to_be_bytes());
        expected_record.extend_from_slice(b"answer");
        assert_eq!(record, expected_record.as_slice());
    }
}
