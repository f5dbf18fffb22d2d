//! Property-based checks of qualified-name resolution: however deep a
//! chain of nested namespaces is built, a fully-qualified reference
//! naming every link in the chain resolves to the innermost one.

use mrdocs_core::model::{InfoHeader, NamespaceInfo, SymbolId};
use mrdocs_core::{parse_ref, Corpus, LookupCache};
use proptest::prelude::*;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

fn synthetic_id(depth: usize) -> SymbolId {
    let mut bytes = [0u8; 20];
    bytes[0] = (depth + 1) as u8;
    SymbolId(bytes)
}

proptest! {
    #[test]
    fn fully_qualified_chain_resolves_to_the_innermost_namespace(names in proptest::collection::vec(identifier(), 1..6)) {
        let mut corpus = Corpus::new();

        let mut parent = Some(SymbolId::GLOBAL);
        let mut root_members = Vec::new();
        let mut built = Vec::new();
        for (depth, name) in names.iter().enumerate() {
            let this_id = synthetic_id(depth);
            let mut header = InfoHeader::new(this_id, name.clone());
            header.parent = parent;
            built.push((this_id, header));
            if depth == 0 {
                root_members.push(this_id);
            }
            parent = Some(this_id);
        }

        // Wire each namespace's `members` to its immediate child, built
        // back-to-front so the last entry has no children.
        for i in 0..built.len() {
            let child = if i + 1 < built.len() { vec![built[i + 1].0] } else { Vec::new() };
            let (this_id, header) = built[i].clone();
            corpus.insert(mrdocs_core::model::Info::Namespace(NamespaceInfo {
                header,
                members: child,
                usings: Vec::new(),
                is_inline: false,
                is_anonymous: false,
            }));
        }

        corpus.insert(mrdocs_core::model::Info::Namespace(NamespaceInfo {
            header: InfoHeader::new(SymbolId::GLOBAL, ""),
            members: root_members,
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        }));

        let reference = format!("::{}", names.join("::"));
        let parsed = parse_ref::parse(&reference).expect("chain of plain identifiers always parses");
        prop_assert!(parsed.is_fully_qualified);
        prop_assert_eq!(parsed.components.len(), names.len());

        let mut cache = LookupCache::new();
        // The calling context is irrelevant for a fully-qualified
        // reference, so any id already in the corpus will do.
        let context = built[0].0;
        let resolved = mrdocs_core::lookup::resolve(&corpus, &mut cache, context, &parsed)
            .expect("every component is a real member of its enclosing scope");

        let innermost = built.last().unwrap().0;
        prop_assert_eq!(resolved, innermost);
    }
}
