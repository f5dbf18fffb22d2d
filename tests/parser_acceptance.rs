//! Acceptance tests for the reference-string parser and its
//! integration with lookup against a hand-built corpus.

use mrdocs_core::model::{
    AccessKind, FunctionClass, FunctionInfo, Info, InfoHeader, NamespaceInfo, NoexceptInfo,
    OperatorKind, Param, RecordInfo, RecordInterface, RecordTag, StorageClassKind, SymbolId,
    TypeInfo,
};
use mrdocs_core::{parse_ref, Corpus, LookupCache};

fn id(n: u8) -> SymbolId {
    SymbolId([n; 20])
}

#[test]
fn qualified_template_specialization_with_function_tail_parses() {
    let parsed = parse_ref::parse("ns::Widget<int, T>::compare(const Widget&, Widget&&) const noexcept")
        .expect("should parse");
    assert!(!parsed.is_fully_qualified);
    assert_eq!(parsed.components.len(), 3);
    assert!(parsed.components[1].has_template_arguments);
    assert_eq!(parsed.components[1].template_arguments.len(), 2);
    assert_eq!(parsed.components[2].name, "compare");
    assert!(parsed.is_const);
    assert_eq!(parsed.exception_spec, NoexceptInfo::True);
    assert_eq!(
        parsed.function_parameters,
        vec!["const Widget&", "Widget&&"]
    );
}

#[test]
fn parsed_reference_resolves_through_nested_scopes() {
    let mut corpus = Corpus::new();

    corpus.insert(Info::Function(FunctionInfo {
        header: {
            let mut h = InfoHeader::new(id(3), "speak");
            h.parent = Some(id(2));
            h
        },
        access: AccessKind::Public,
        class: FunctionClass::Normal,
        params: vec![Param {
            name: "volume".to_string(),
            ty: TypeInfo::named("int"),
            default_value: None,
        }],
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

    let mut record = RecordInfo {
        header: {
            let mut h = InfoHeader::new(id(2), "Animal");
            h.parent = Some(id(1));
            h
        },
        tag: RecordTag::Class,
        is_union: false,
        bases: Vec::new(),
        interface: RecordInterface::default(),
        template: None,
        is_final: false,
    };
    record.interface.public.functions.push(id(3));
    corpus.insert(Info::Record(record));

    corpus.insert(Info::Namespace(NamespaceInfo {
        header: {
            let mut h = InfoHeader::new(id(1), "zoo");
            h.parent = Some(SymbolId::GLOBAL);
            h
        },
        members: vec![id(2)],
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    // "zoo" itself is only visible as a member of the translation-unit
    // root, so the root must be a real corpus entry for the walk to
    // reach it.
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: InfoHeader::new(SymbolId::GLOBAL, ""),
        members: vec![id(1)],
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    let mut cache = LookupCache::new();
    let parsed = parse_ref::parse("zoo::Animal::speak").unwrap();
    // Looked up as if from inside `Animal` itself: the unqualified walk
    // for the leading "zoo" component climbs Animal -> zoo -> root
    // before finding "zoo" listed as the root's member.
    let resolved =
        mrdocs_core::lookup::resolve(&corpus, &mut cache, id(2), &parsed).expect("should resolve");
    assert_eq!(resolved, id(3));
}

#[test]
fn fully_qualified_reference_ignores_the_calling_context() {
    let mut corpus = Corpus::new();
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: {
            let mut h = InfoHeader::new(id(1), "a");
            h.parent = Some(SymbolId::GLOBAL);
            h
        },
        members: vec![id(2)],
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: {
            let mut h = InfoHeader::new(id(2), "b");
            h.parent = Some(id(1));
            h
        },
        members: Vec::new(),
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));
    // Fully-qualified lookups start from the global scope, so it must
    // be a real corpus entry listing "a" as a member.
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: InfoHeader::new(SymbolId::GLOBAL, ""),
        members: vec![id(1)],
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    // An unrelated namespace, used only as the calling context, to show
    // that a fully-qualified reference ignores it entirely.
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: InfoHeader::new(id(9), "unrelated"),
        members: Vec::new(),
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    let mut cache = LookupCache::new();
    let parsed = parse_ref::parse("::a::b").unwrap();
    // Context is a namespace entirely unrelated to `a`; since the
    // reference is fully qualified, resolution must start from global
    // and never consult `context`'s own scope chain.
    let resolved = mrdocs_core::lookup::resolve(&corpus, &mut cache, id(9), &parsed).unwrap();
    assert_eq!(resolved, id(2));
}

#[test]
fn conversion_operator_reference_round_trips_through_parsing() {
    let parsed = parse_ref::parse("Widget::operator MyString() const").unwrap();
    let last = parsed.last_component().unwrap();
    assert_eq!(last.conversion_type.as_deref(), Some("MyString"));
    assert!(parsed.is_const);
}
