//! End-to-end exercise of the full finalizer pipeline against a small
//! hand-built corpus: base-member inheritance, overload folding,
//! namespace culling, member sorting, and javadoc finalization all
//! acting on the same entities in their documented order.

use mrdocs_core::finalize;
use mrdocs_core::model::{
    AccessKind, BaseInfo, Block, FunctionClass, FunctionInfo, Info, InfoHeader, Inline, Javadoc,
    NamespaceInfo, NoexceptInfo, OperatorKind, Param, RecordInfo, RecordInterface, RecordTag,
    StorageClassKind, SymbolId, TypeInfo,
};
use mrdocs_core::{Config, Corpus, Diagnostics, LookupCache};

fn id(n: u8) -> SymbolId {
    SymbolId([n; 20])
}

fn function(
    fn_id: SymbolId,
    name: &str,
    parent: SymbolId,
    params: Vec<Param>,
    return_type: &str,
    javadoc: Option<Javadoc>,
) -> Info {
    Info::Function(FunctionInfo {
        header: {
            let mut h = InfoHeader::new(fn_id, name);
            h.parent = Some(parent);
            h.javadoc = javadoc;
            h
        },
        access: AccessKind::Public,
        class: FunctionClass::Normal,
        params,
        return_type: TypeInfo::named(return_type),
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
    })
}

#[test]
fn full_pipeline_inherits_folds_culls_sorts_and_documents() {
    let mut corpus = Corpus::new();

    // Shape::area(double scale) — documented, no base.
    corpus.insert(function(
        id(2),
        "area",
        id(1),
        vec![Param {
            name: "scale".to_string(),
            ty: TypeInfo::named("double"),
            default_value: None,
        }],
        "double",
        Some(Javadoc {
            blocks: vec![Block::Paragraph(vec![Inline::Text(
                "Computes the area. Uses the shape formula.".to_string(),
            )])],
            ..Default::default()
        }),
    ));

    let mut shape = RecordInfo {
        header: InfoHeader::new(id(1), "Shape"),
        tag: RecordTag::Class,
        is_union: false,
        bases: Vec::new(),
        interface: RecordInterface::default(),
        template: None,
        is_final: false,
    };
    shape.interface.public.functions.push(id(2));
    corpus.insert(Info::Record(shape));

    // Circle : public Shape, with its own overloaded scale() x2.
    corpus.insert(function(id(4), "scale", id(3), Vec::new(), "void", None));
    corpus.insert(function(id(5), "scale", id(3), Vec::new(), "void", None));

    let mut circle = RecordInfo {
        header: InfoHeader::new(id(3), "Circle"),
        tag: RecordTag::Class,
        is_union: false,
        bases: vec![BaseInfo {
            id: id(1),
            access: AccessKind::Public,
            is_virtual: false,
        }],
        interface: RecordInterface::default(),
        template: None,
        is_final: false,
    };
    circle.interface.public.functions = vec![id(4), id(5)];
    corpus.insert(Info::Record(circle));

    // An empty namespace nested under "shapes", to be culled away.
    corpus.insert(Info::Namespace(NamespaceInfo {
        header: InfoHeader::new(id(20), "legacy"),
        members: Vec::new(),
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    corpus.insert(Info::Namespace(NamespaceInfo {
        header: InfoHeader::new(id(10), "shapes"),
        members: vec![id(1), id(3), id(20)],
        usings: Vec::new(),
        is_inline: false,
        is_anonymous: false,
    }));

    let config = Config::default();
    let mut cache = LookupCache::new();
    let mut diagnostics = Diagnostics::new();
    finalize::finalize(&mut corpus, &config, &mut cache, &mut diagnostics).unwrap();

    // I: the empty nested namespace is gone, and "shapes" no longer
    // lists it.
    assert!(corpus.get(id(20)).is_none());
    let Some(Info::Namespace(shapes)) = corpus.get(id(10)) else {
        panic!("shapes namespace missing");
    };
    // H: namespace members sorted by (kind, name) — "Circle" < "Shape".
    assert_eq!(shapes.members, vec![id(3), id(1)]);

    // F + E + H together: Circle inherited Shape's "area" by reference,
    // folded its two "scale"s into one overload set, and the tranche
    // ends up sorted "area" before "scale".
    let Some(Info::Record(circle)) = corpus.get(id(3)) else {
        panic!("Circle missing");
    };
    assert_eq!(circle.interface.public.functions.len(), 2);
    assert_eq!(circle.interface.public.functions[0], id(2));
    let overloads_id = circle.interface.public.functions[1];
    assert_ne!(overloads_id, id(4));
    assert_ne!(overloads_id, id(5));

    let Some(Info::Overloads(overloads)) = corpus.get(overloads_id) else {
        panic!("expected a folded Overloads entity for scale()");
    };
    assert_eq!(overloads.members.len(), 2);
    // G, step 8: a folded overload set with no javadoc of its own gets
    // a synthesized brief.
    let overloads_doc = corpus.get(overloads_id).unwrap().javadoc().unwrap();
    assert_eq!(
        overloads_doc.brief,
        Some(Block::Brief(vec![Inline::Text(
            "Overloads of scale.".to_string()
        )]))
    );

    // G: "area" gets its first-sentence brief and synthesized
    // parameter/return documentation.
    let area_doc = corpus.get(id(2)).unwrap().javadoc().unwrap();
    assert_eq!(
        area_doc.brief,
        Some(Block::Brief(vec![Inline::Text(
            "Computes the area.".to_string()
        )]))
    );
    assert_eq!(area_doc.params.len(), 1);
    assert_eq!(area_doc.params[0].name, "scale");
    assert!(area_doc.params[0].synthesized);
    assert_eq!(area_doc.returns.len(), 1);
    assert!(area_doc.returns[0].synthesized);

    // Shape's own "area" is unchanged by inheritance (Reference mode
    // doesn't mint a copy).
    let Some(Info::Record(shape)) = corpus.get(id(1)) else {
        panic!("Shape missing");
    };
    assert_eq!(shape.interface.public.functions, vec![id(2)]);
}
