//! Pass H: member sorting (§4.H).
//!
//! Runs after overload folding (E) and namespace culling (I), so it
//! never wastes effort ordering a member about to be removed, and
//! orders the final, folded member lists: namespace members by kind
//! then name, record-tranche members by category then name, and
//! functions specifically by special-member-function class, with
//! relational operators clustered and internally ordered by
//! [`OperatorKind::relational_order`] (rule 4).

use crate::corpus::Corpus;
use crate::model::{FunctionClass, Info, InfoKind, OperatorKind, RecordTranche, SymbolId};

pub fn run(corpus: &mut Corpus) {
    let namespace_ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Namespace(_)))
        .map(Info::id)
        .collect();
    for id in namespace_ids {
        sort_namespace_members(corpus, id);
    }

    let record_ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Record(_)))
        .map(Info::id)
        .collect();
    for id in record_ids {
        sort_record_members(corpus, id);
    }
}

fn kind_priority(kind: InfoKind) -> u8 {
    match kind {
        InfoKind::NamespaceAlias | InfoKind::Using => 0,
        InfoKind::Namespace => 1,
        InfoKind::Record => 2,
        InfoKind::Enum => 3,
        InfoKind::Typedef => 4,
        InfoKind::Concept => 5,
        InfoKind::Variable => 6,
        InfoKind::Function | InfoKind::Overloads => 7,
        InfoKind::Field => 8,
        InfoKind::Enumerator => 9,
        InfoKind::Friend => 10,
        InfoKind::Guide => 11,
    }
}

fn sort_namespace_members(corpus: &mut Corpus, id: SymbolId) {
    let mut members = match corpus.get(id) {
        Some(Info::Namespace(n)) => n.members.clone(),
        _ => return,
    };

    members.sort_by(|a, b| {
        let (ka, na) = member_key(corpus, *a);
        let (kb, nb) = member_key(corpus, *b);
        kind_priority(ka).cmp(&kind_priority(kb)).then_with(|| na.cmp(&nb))
    });

    if let Some(Info::Namespace(n)) = corpus.get_mut(id) {
        n.members = members;
    }
}

fn member_key(corpus: &Corpus, id: SymbolId) -> (InfoKind, String) {
    match corpus.get(id) {
        Some(info) => (info.kind(), info.name().to_ascii_lowercase()),
        None => (InfoKind::Namespace, String::new()),
    }
}

fn sort_record_members(corpus: &mut Corpus, id: SymbolId) {
    let Some(Info::Record(record)) = corpus.get(id) else {
        return;
    };
    let mut interface = record.interface.clone();

    for tranche in [
        &mut interface.public,
        &mut interface.protected,
        &mut interface.private,
    ] {
        sort_tranche(corpus, tranche);
    }

    if let Some(Info::Record(record)) = corpus.get_mut(id) {
        record.interface = interface;
    }
}

fn sort_tranche(corpus: &Corpus, tranche: &mut RecordTranche) {
    sort_by_name(corpus, &mut tranche.records);
    sort_by_name(corpus, &mut tranche.enums);
    sort_by_name(corpus, &mut tranche.types);
    sort_by_name(corpus, &mut tranche.fields);
    sort_by_name(corpus, &mut tranche.vars);
    sort_by_name(corpus, &mut tranche.static_vars);
    sort_by_name(corpus, &mut tranche.friends);
    sort_by_name(corpus, &mut tranche.guides);
    sort_by_name(corpus, &mut tranche.concepts);
    sort_by_name(corpus, &mut tranche.usings);
    sort_by_name(corpus, &mut tranche.namespace_aliases);
    sort_functions(corpus, &mut tranche.functions);
    sort_functions(corpus, &mut tranche.static_functions);
}

fn sort_by_name(corpus: &Corpus, ids: &mut [SymbolId]) {
    ids.sort_by(|a, b| {
        let na = corpus.get(*a).map(Info::name).unwrap_or_default();
        let nb = corpus.get(*b).map(Info::name).unwrap_or_default();
        na.to_ascii_lowercase().cmp(&nb.to_ascii_lowercase())
    });
}

/// `(class priority, relational suborder, name)` — see rule 4.
fn function_sort_key(corpus: &Corpus, id: SymbolId) -> (u8, u8, String) {
    let (class, operator, name) = match corpus.get(id) {
        Some(Info::Function(f)) => (f.class, f.operator, f.header.name.clone()),
        Some(Info::Overloads(o)) => (o.class, o.operator, o.header.name.clone()),
        _ => (FunctionClass::Normal, OperatorKind::None, String::new()),
    };
    let class_priority = match class {
        FunctionClass::Constructor => 0,
        FunctionClass::Destructor => 1,
        FunctionClass::Normal => 2,
        FunctionClass::Operator => 3,
        FunctionClass::Conversion => 4,
    };
    let relational_suborder = if operator.is_relational() {
        operator.relational_order()
    } else {
        0
    };
    (class_priority, relational_suborder, name.to_ascii_lowercase())
}

fn sort_functions(corpus: &Corpus, ids: &mut [SymbolId]) {
    ids.sort_by(|a, b| function_sort_key(corpus, *a).cmp(&function_sort_key(corpus, *b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        FunctionInfo, InfoHeader, NoexceptInfo, RecordInfo, RecordInterface, RecordTag,
        StorageClassKind, TypeInfo,
    };
    use crate::model::AccessKind;

    fn function(id: u8, name: &str, class: FunctionClass, operator: OperatorKind) -> Info {
        Info::Function(FunctionInfo {
            header: InfoHeader::new(SymbolId([id; 20]), name),
            access: AccessKind::Public,
            class,
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
            operator,
            conversion_type: None,
            exception_spec: NoexceptInfo::None,
            template: None,
        })
    }

    #[test]
    fn functions_sort_constructors_before_destructors_before_normal() {
        let mut corpus = Corpus::new();
        corpus.insert(function(1, "zeta", FunctionClass::Normal, OperatorKind::None));
        corpus.insert(function(2, "C", FunctionClass::Destructor, OperatorKind::None));
        corpus.insert(function(3, "C", FunctionClass::Constructor, OperatorKind::None));

        let mut ids = vec![SymbolId([1u8; 20]), SymbolId([2u8; 20]), SymbolId([3u8; 20])];
        sort_functions(&corpus, &mut ids);

        assert_eq!(
            ids,
            vec![SymbolId([3u8; 20]), SymbolId([2u8; 20]), SymbolId([1u8; 20])]
        );
    }

    #[test]
    fn relational_operators_cluster_by_relational_order() {
        let mut corpus = Corpus::new();
        corpus.insert(function(
            1,
            "operator>=",
            FunctionClass::Operator,
            OperatorKind::GreaterEqual,
        ));
        corpus.insert(function(
            2,
            "operator<=>",
            FunctionClass::Operator,
            OperatorKind::Spaceship,
        ));

        let mut ids = vec![SymbolId([1u8; 20]), SymbolId([2u8; 20])];
        sort_functions(&corpus, &mut ids);

        assert_eq!(ids, vec![SymbolId([2u8; 20]), SymbolId([1u8; 20])]);
    }

    #[test]
    fn namespace_members_sort_records_before_functions() {
        let mut corpus = Corpus::new();
        corpus.insert(function(1, "f", FunctionClass::Normal, OperatorKind::None));
        corpus.insert(Info::Record(RecordInfo {
            header: InfoHeader::new(SymbolId([2u8; 20]), "Widget"),
            tag: RecordTag::Class,
            is_union: false,
            bases: Vec::new(),
            interface: RecordInterface::default(),
            template: None,
            is_final: false,
        }));
        corpus.insert(Info::Namespace(crate::model::NamespaceInfo {
            header: InfoHeader::new(SymbolId([3u8; 20]), "ns"),
            members: vec![SymbolId([1u8; 20]), SymbolId([2u8; 20])],
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        }));

        run(&mut corpus);

        let Some(Info::Namespace(ns)) = corpus.get(SymbolId([3u8; 20])) else {
            panic!("namespace missing");
        };
        assert_eq!(ns.members, vec![SymbolId([2u8; 20]), SymbolId([1u8; 20])]);
    }
}
