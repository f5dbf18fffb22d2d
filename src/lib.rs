//! Corpus-processing core for a C++ documentation generator.
//!
//! Three pieces, each usable on its own: [`parse_ref`] turns a
//! reference string into a structured [`parse_ref::ParsedRef`];
//! [`lookup`] resolves a parsed reference against an in-memory
//! [`corpus::Corpus`] following C++ scope rules; [`finalize`] runs the
//! ordered multi-pass pipeline that turns raw extracted `Info`s into
//! their final, documentation-ready shape.
//!
//! This crate does no I/O and no extraction of its own — it consumes a
//! [`corpus::Corpus`] a host has already populated (typically from a
//! compiler frontend's AST) and normalizes it in place.

pub mod config;
pub mod corpus;
pub mod diagnostic;
pub mod error;
pub mod finalize;
pub mod lookup;
pub mod model;
pub mod parse_ref;

pub use config::Config;
pub use corpus::Corpus;
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, ParseFailureReason, Result};
pub use lookup::LookupCache;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionClass, FunctionInfo, InfoHeader, NamespaceInfo, NoexceptInfo, OperatorKind, StorageClassKind, TypeInfo};
    use crate::model::{AccessKind, Info};

    #[test]
    fn finalize_runs_the_full_pipeline_end_to_end() {
        let mut corpus = Corpus::new();
        corpus.insert(Info::Function(FunctionInfo {
            header: {
                let mut h = InfoHeader::new(model::SymbolId([2u8; 20]), "greet");
                h.parent = Some(model::SymbolId([1u8; 20]));
                h
            },
            access: AccessKind::Public,
            class: FunctionClass::Normal,
            params: Vec::new(),
            return_type: TypeInfo::named("void"),
            is_variadic: false,
            is_const: false,
            is_volatile: false,
            is_explicit_object_member_function: false,
            is_virtual: false,
            is_override: false,
            is_final: false,
            is_static: false,
            is_deleted: false,
            is_defaulted: false,
            storage_class: StorageClassKind::None,
            operator: OperatorKind::None,
            conversion_type: None,
            exception_spec: NoexceptInfo::None,
            template: None,
        }));
        corpus.insert(Info::Namespace(NamespaceInfo {
            header: InfoHeader::new(model::SymbolId([1u8; 20]), "demo"),
            members: vec![model::SymbolId([2u8; 20])],
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        }));

        let config = Config::default();
        let mut diagnostics = Diagnostics::new();
        let mut cache = LookupCache::new();
        finalize::finalize(&mut corpus, &config, &mut cache, &mut diagnostics).unwrap();

        assert!(corpus.contains(model::SymbolId([1u8; 20])));
        assert_eq!(corpus.undocumented().len(), 2);
    }
}
