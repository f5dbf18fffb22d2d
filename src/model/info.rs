//! `Info`: the polymorphic record every documented C++ entity is
//! represented as (§3, §9).
//!
//! The original keeps this hierarchy open via a `Polymorphic<Info>`
//! wrapper and virtual dispatch on `InfoKind`. Rust has no single-owner
//! open hierarchy that's simpler than a closed `enum`, so `Info` is a
//! tagged union over the entity kinds (§9 "Polymorphic Info"); each
//! variant carries the fields unique to that kind and defers to
//! [`Info::header`]/[`Info::header_mut`] for the fields every kind
//! shares.

use crate::model::{Javadoc, OperatorKind, SymbolId};
use serde::{Deserialize, Serialize};

/// Fields every documented entity has regardless of kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoHeader {
    pub id: SymbolId,
    pub name: String,
    pub parent: Option<SymbolId>,
    pub namespace: Vec<SymbolId>,
    pub javadoc: Option<Javadoc>,
    pub extraction: ExtractionMode,
    pub implicit: bool,
}

impl InfoHeader {
    pub fn new(id: SymbolId, name: impl Into<String>) -> Self {
        InfoHeader {
            id,
            name: name.into(),
            parent: None,
            namespace: Vec::new(),
            javadoc: None,
            extraction: ExtractionMode::Regular,
            implicit: false,
        }
    }
}

/// How much of an entity should be shown in generated documentation
/// (§3, §4.I).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// Document normally.
    Regular,
    /// Document only enough to resolve references to it (e.g. a base
    /// class outside the corpus); never emit its own page.
    SeeBelow,
    /// Mention that it exists (e.g. in a member list) but never its own
    /// documentation or a `SeeBelow` stand-in.
    ImplementationDefined,
    /// Dependency of something extracted, pulled in only because other
    /// extracted entities reference it.
    Dependency,
}

/// Access specifier, used both by class members and, transitively, by
/// the base-members finalizer (§4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessKind {
    Public,
    Protected,
    Private,
}

/// The tagged union over every documented entity kind (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Info {
    Namespace(NamespaceInfo),
    Record(RecordInfo),
    Function(FunctionInfo),
    Overloads(OverloadsInfo),
    Enum(EnumInfo),
    Enumerator(EnumeratorInfo),
    Typedef(TypeAliasInfo),
    Variable(VariableInfo),
    Field(FieldInfo),
    Friend(FriendInfo),
    Guide(GuideInfo),
    NamespaceAlias(NamespaceAliasInfo),
    Using(UsingInfo),
    Concept(ConceptInfo),
}

/// Discriminant mirroring the original's `InfoKind` enum, used by the
/// lookup engine's kind-filtered matching (§4.D) and the finalizer
/// passes that only care about the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoKind {
    Namespace,
    Record,
    Function,
    Overloads,
    Enum,
    Enumerator,
    Typedef,
    Variable,
    Field,
    Friend,
    Guide,
    NamespaceAlias,
    Using,
    Concept,
}

impl Info {
    pub fn kind(&self) -> InfoKind {
        match self {
            Info::Namespace(_) => InfoKind::Namespace,
            Info::Record(_) => InfoKind::Record,
            Info::Function(_) => InfoKind::Function,
            Info::Overloads(_) => InfoKind::Overloads,
            Info::Enum(_) => InfoKind::Enum,
            Info::Enumerator(_) => InfoKind::Enumerator,
            Info::Typedef(_) => InfoKind::Typedef,
            Info::Variable(_) => InfoKind::Variable,
            Info::Field(_) => InfoKind::Field,
            Info::Friend(_) => InfoKind::Friend,
            Info::Guide(_) => InfoKind::Guide,
            Info::NamespaceAlias(_) => InfoKind::NamespaceAlias,
            Info::Using(_) => InfoKind::Using,
            Info::Concept(_) => InfoKind::Concept,
        }
    }

    pub fn header(&self) -> &InfoHeader {
        match self {
            Info::Namespace(i) => &i.header,
            Info::Record(i) => &i.header,
            Info::Function(i) => &i.header,
            Info::Overloads(i) => &i.header,
            Info::Enum(i) => &i.header,
            Info::Enumerator(i) => &i.header,
            Info::Typedef(i) => &i.header,
            Info::Variable(i) => &i.header,
            Info::Field(i) => &i.header,
            Info::Friend(i) => &i.header,
            Info::Guide(i) => &i.header,
            Info::NamespaceAlias(i) => &i.header,
            Info::Using(i) => &i.header,
            Info::Concept(i) => &i.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut InfoHeader {
        match self {
            Info::Namespace(i) => &mut i.header,
            Info::Record(i) => &mut i.header,
            Info::Function(i) => &mut i.header,
            Info::Overloads(i) => &mut i.header,
            Info::Enum(i) => &mut i.header,
            Info::Enumerator(i) => &mut i.header,
            Info::Typedef(i) => &mut i.header,
            Info::Variable(i) => &mut i.header,
            Info::Field(i) => &mut i.header,
            Info::Friend(i) => &mut i.header,
            Info::Guide(i) => &mut i.header,
            Info::NamespaceAlias(i) => &mut i.header,
            Info::Using(i) => &mut i.header,
            Info::Concept(i) => &mut i.header,
        }
    }

    pub fn id(&self) -> SymbolId {
        self.header().id
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn parent(&self) -> Option<SymbolId> {
        self.header().parent
    }

    pub fn javadoc(&self) -> Option<&Javadoc> {
        self.header().javadoc.as_ref()
    }

    pub fn extraction(&self) -> ExtractionMode {
        self.header().extraction
    }

    /// `true` for the kinds that own a member tranche of some sort
    /// (§4.H); used to decide whether a finalizer pass recurses.
    pub fn is_scope(&self) -> bool {
        matches!(self, Info::Namespace(_) | Info::Record(_) | Info::Enum(_))
    }

    /// Ids of the immediate children, for the kinds that have any.
    pub fn children(&self) -> Vec<SymbolId> {
        match self {
            Info::Namespace(i) => i.members.clone(),
            Info::Record(i) => i.interface.all_members(),
            Info::Enum(i) => i.enumerators.clone(),
            _ => Vec::new(),
        }
    }
}

/// A namespace and its direct member list (§4.A, §4.I).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceInfo {
    pub header: InfoHeader,
    pub members: Vec<SymbolId>,
    pub usings: Vec<SymbolId>,
    pub is_inline: bool,
    pub is_anonymous: bool,
}

/// `class`/`struct`/`union` (§4.A, §4.F, §4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInfo {
    pub header: InfoHeader,
    pub tag: RecordTag,
    pub is_union: bool,
    pub bases: Vec<BaseInfo>,
    pub interface: RecordInterface,
    pub template: Option<TemplateInfo>,
    pub is_final: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordTag {
    Class,
    Struct,
    Union,
}

/// One entry of a record's base-class list (§4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseInfo {
    pub id: SymbolId,
    pub access: AccessKind,
    pub is_virtual: bool,
}

/// The three access-qualified member lists of a record, split by
/// member category the way the sorter (§4.H) and base-members
/// finalizer (§4.F) operate on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordInterface {
    pub public: RecordTranche,
    pub protected: RecordTranche,
    pub private: RecordTranche,
}

impl RecordInterface {
    pub fn tranche(&self, access: AccessKind) -> &RecordTranche {
        match access {
            AccessKind::Public => &self.public,
            AccessKind::Protected => &self.protected,
            AccessKind::Private => &self.private,
        }
    }

    pub fn tranche_mut(&mut self, access: AccessKind) -> &mut RecordTranche {
        match access {
            AccessKind::Public => &mut self.public,
            AccessKind::Protected => &mut self.protected,
            AccessKind::Private => &mut self.private,
        }
    }

    pub fn all_members(&self) -> Vec<SymbolId> {
        let mut ids = Vec::new();
        for tranche in [&self.public, &self.protected, &self.private] {
            ids.extend(tranche.all());
        }
        ids
    }
}

/// A single access-level's worth of record members, split by category
/// (§3 "Tranche").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTranche {
    pub records: Vec<SymbolId>,
    pub functions: Vec<SymbolId>,
    pub static_functions: Vec<SymbolId>,
    pub enums: Vec<SymbolId>,
    pub types: Vec<SymbolId>,
    pub fields: Vec<SymbolId>,
    pub vars: Vec<SymbolId>,
    pub static_vars: Vec<SymbolId>,
    pub friends: Vec<SymbolId>,
    pub guides: Vec<SymbolId>,
    pub concepts: Vec<SymbolId>,
    pub usings: Vec<SymbolId>,
    pub namespace_aliases: Vec<SymbolId>,
}

impl RecordTranche {
    pub fn all(&self) -> Vec<SymbolId> {
        let mut ids = Vec::new();
        ids.extend(&self.records);
        ids.extend(&self.functions);
        ids.extend(&self.static_functions);
        ids.extend(&self.enums);
        ids.extend(&self.types);
        ids.extend(&self.fields);
        ids.extend(&self.vars);
        ids.extend(&self.static_vars);
        ids.extend(&self.friends);
        ids.extend(&self.guides);
        ids.extend(&self.concepts);
        ids.extend(&self.usings);
        ids.extend(&self.namespace_aliases);
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
            && self.functions.is_empty()
            && self.static_functions.is_empty()
            && self.enums.is_empty()
            && self.types.is_empty()
            && self.fields.is_empty()
            && self.vars.is_empty()
            && self.static_vars.is_empty()
            && self.friends.is_empty()
            && self.guides.is_empty()
            && self.concepts.is_empty()
            && self.usings.is_empty()
            && self.namespace_aliases.is_empty()
    }

    pub fn retain_all(&mut self, mut f: impl FnMut(SymbolId) -> bool) {
        self.records.retain(|id| f(*id));
        self.functions.retain(|id| f(*id));
        self.static_functions.retain(|id| f(*id));
        self.enums.retain(|id| f(*id));
        self.types.retain(|id| f(*id));
        self.fields.retain(|id| f(*id));
        self.vars.retain(|id| f(*id));
        self.static_vars.retain(|id| f(*id));
        self.friends.retain(|id| f(*id));
        self.guides.retain(|id| f(*id));
        self.concepts.retain(|id| f(*id));
        self.usings.retain(|id| f(*id));
        self.namespace_aliases.retain(|id| f(*id));
    }
}

/// A scope's member list viewed generically, independent of whether
/// it's a namespace or a record tranche (§4.H, §4.I operate over
/// either).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tranche {
    Namespace,
    Record(AccessKind),
}

/// A free or member function (§4.A, §4.E).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub header: InfoHeader,
    pub access: AccessKind,
    pub class: FunctionClass,
    pub params: Vec<Param>,
    pub return_type: TypeInfo,
    pub is_variadic: bool,
    pub is_const: bool,
    pub is_volatile: bool,
    pub is_explicit_object_member_function: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub is_deleted: bool,
    pub is_defaulted: bool,
    pub storage_class: StorageClassKind,
    pub operator: OperatorKind,
    pub conversion_type: Option<TypeInfo>,
    pub exception_spec: NoexceptInfo,
    pub template: Option<TemplateInfo>,
}

/// What kind of special member function this is, if any (§4.H rule
/// ordering looks at this, §4.E groups overloads by it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionClass {
    Normal,
    Constructor,
    Destructor,
    Conversion,
    Operator,
}

/// One function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeInfo,
    pub default_value: Option<String>,
}

/// A minimal structural type reference: just enough for signature
/// comparison (§4.D, §4.E) and display, not a full type-system model
/// (out of scope per §1 Non-goals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    pub symbol: Option<SymbolId>,
    pub is_const: bool,
    pub is_volatile: bool,
    pub pointer_depth: u8,
    pub is_lvalue_reference: bool,
    pub is_rvalue_reference: bool,
}

impl TypeInfo {
    pub fn named(name: impl Into<String>) -> Self {
        TypeInfo {
            name: name.into(),
            symbol: None,
            is_const: false,
            is_volatile: false,
            pointer_depth: 0,
            is_lvalue_reference: false,
            is_rvalue_reference: false,
        }
    }
}

/// `static`/`extern`/`thread_local`/none (§4.B decl-specifier parsing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClassKind {
    None,
    Static,
    Extern,
    ThreadLocal,
}

impl Default for StorageClassKind {
    fn default() -> Self {
        StorageClassKind::None
    }
}

/// `noexcept` spelling on a function (§3, §4.B).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoexceptInfo {
    None,
    False,
    True,
    /// `noexcept(expr)` with the expression kept verbatim; this crate
    /// never evaluates it.
    Dependent(String),
}

impl Default for NoexceptInfo {
    fn default() -> Self {
        NoexceptInfo::None
    }
}

/// The synthetic "one entity per overload set" grouping produced by
/// §4.E. Its own member list can be either a flat id list (free
/// functions) or an access-tagged list (member functions); both shapes
/// are folded by the same algorithm (§9 "Two list shapes").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadsInfo {
    pub header: InfoHeader,
    pub members: OverloadMembers,
    pub class: FunctionClass,
    pub operator: OperatorKind,
    /// Every member of an overload set shares the same is-static bit
    /// (§3 invariant 4): static and non-static same-named functions
    /// never fold into the same set.
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OverloadMembers {
    Free(Vec<SymbolId>),
    Member(Vec<(SymbolId, AccessKind)>),
}

impl OverloadMembers {
    pub fn ids(&self) -> Vec<SymbolId> {
        match self {
            OverloadMembers::Free(ids) => ids.clone(),
            OverloadMembers::Member(pairs) => pairs.iter().map(|(id, _)| *id).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            OverloadMembers::Free(ids) => ids.len(),
            OverloadMembers::Member(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An `enum`/`enum class` (§4.A, §4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumInfo {
    pub header: InfoHeader,
    pub is_scoped: bool,
    pub underlying_type: Option<TypeInfo>,
    pub enumerators: Vec<SymbolId>,
}

/// One value inside an `EnumInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumeratorInfo {
    pub header: InfoHeader,
    pub initializer: Option<String>,
}

/// `typedef`/`using Alias = ...` (§4.A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasInfo {
    pub header: InfoHeader,
    pub access: AccessKind,
    pub aliased: TypeInfo,
    pub template: Option<TemplateInfo>,
}

/// A namespace-scope variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub header: InfoHeader,
    pub ty: TypeInfo,
    pub storage_class: StorageClassKind,
    pub template: Option<TemplateInfo>,
}

/// A non-static data member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub header: InfoHeader,
    pub access: AccessKind,
    pub ty: TypeInfo,
    pub is_mutable: bool,
    pub is_bitfield: bool,
    pub default_member_initializer: Option<String>,
}

/// A `friend` declaration. Marker variant (§3 SPEC_FULL note): only the
/// header plus the one field the finalizer touches, the befriended
/// entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendInfo {
    pub header: InfoHeader,
    pub befriended: Option<SymbolId>,
}

/// A user-defined deduction guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideInfo {
    pub header: InfoHeader,
    pub deduced: SymbolId,
    pub params: Vec<Param>,
    pub template: Option<TemplateInfo>,
}

/// `namespace Alias = target;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceAliasInfo {
    pub header: InfoHeader,
    pub target: SymbolId,
}

/// `using target;` / `using Enclosing::target;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingInfo {
    pub header: InfoHeader,
    pub access: AccessKind,
    pub targets: Vec<SymbolId>,
}

/// A `concept` declaration. Marker variant carrying only the header
/// plus the constraint expression, kept verbatim and never evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptInfo {
    pub header: InfoHeader,
    pub constraint_expression: String,
}

/// Template-head information shared by every templatable kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub params: Vec<String>,
    pub is_explicit_specialization: bool,
    pub is_partial_specialization: bool,
}

/// A parsed but unresolved name, used as an intermediate value by the
/// reference parser (§4.B) before lookup (§4.D) turns it into a
/// `SymbolId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameInfo {
    pub identifier: String,
    pub has_template_arguments: bool,
}

/// How a reference string addresses its target, carried on a fully
/// parsed reference (§3 `ParsedRef`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceKind {
    Identifier,
    Operator,
    Conversion,
    Destructor,
    DeductionGuide,
}
