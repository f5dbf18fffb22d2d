//! The corpus data model (§3): `Info` and everything it's built from.

mod info;
mod javadoc;
mod operator;
mod symbol_id;

pub use info::{
    AccessKind, BaseInfo, ConceptInfo, EnumInfo, EnumeratorInfo, ExtractionMode, FieldInfo,
    FriendInfo, FunctionClass, FunctionInfo, GuideInfo, Info, InfoHeader, InfoKind, NameInfo,
    NamespaceAliasInfo, NamespaceInfo, NoexceptInfo, OverloadMembers, OverloadsInfo, Param,
    RecordInfo, RecordInterface, RecordTag, RecordTranche, ReferenceKind, StorageClassKind,
    TemplateInfo, Tranche, TypeAliasInfo, TypeInfo, UsingInfo, VariableInfo,
};
pub use javadoc::{AdmonitionKind, Block, CopyParts, Inline, Javadoc, Param as DocParam, Returns, Style, TParam, Throws};
pub use operator::{Arity, OperatorKind};
pub use symbol_id::SymbolId;
