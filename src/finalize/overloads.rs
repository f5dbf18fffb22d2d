//! Pass E: overload folding (§4.E).
//!
//! Replaces every run of same-named functions in a scope with a single
//! synthetic `Overloads` entity. Runs after base-member inheritance (F)
//! so inherited functions are folded together with the derived
//! record's own, and before namespace culling (I) so culling sees the
//! final, folded member count.

use crate::corpus::Corpus;
use crate::error::Result;
use crate::model::{
    AccessKind, FunctionClass, Info, InfoHeader, OverloadMembers, OverloadsInfo, SymbolId,
};
use std::collections::BTreeMap;

pub fn run(corpus: &mut Corpus) -> Result<()> {
    let namespace_ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Namespace(_)))
        .map(Info::id)
        .collect();
    for id in namespace_ids {
        fold_namespace(corpus, id);
    }

    let record_ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Record(_)))
        .map(Info::id)
        .collect();
    for id in record_ids {
        fold_record(corpus, id);
    }

    Ok(())
}

/// Groups of same-named functions that also share an is-static bit,
/// keeping each group's first-seen position so folding preserves
/// relative order (§4.H sorts later; this pass must still produce *a*
/// deterministic order for it to sort). Static and non-static
/// functions of the same name never group together (§3 invariant 4).
fn group_by_name(corpus: &Corpus, ids: &[SymbolId]) -> BTreeMap<(String, bool), Vec<SymbolId>> {
    let mut groups: BTreeMap<(String, bool), Vec<SymbolId>> = BTreeMap::new();
    for &id in ids {
        if let Some(Info::Function(f)) = corpus.get(id) {
            groups
                .entry((f.header.name.clone(), f.is_static))
                .or_default()
                .push(id);
        }
    }
    groups
}

fn fold_namespace(corpus: &mut Corpus, ns_id: SymbolId) {
    let members = match corpus.get(ns_id) {
        Some(Info::Namespace(n)) => n.members.clone(),
        _ => return,
    };

    let groups = group_by_name(corpus, &members);
    let mut new_members = members.clone();

    for ((_name, is_static), ids) in groups {
        if ids.len() < 2 {
            continue;
        }
        let Some(Info::Function(first)) = corpus.get(ids[0]) else {
            continue;
        };
        let overloads = OverloadsInfo {
            header: InfoHeader {
                parent: Some(ns_id),
                namespace: first.header.namespace.clone(),
                ..InfoHeader::new(SymbolId::derive(ns_id, ids[0]), first.header.name.clone())
            },
            members: OverloadMembers::Free(ids.clone()),
            class: first.class,
            operator: first.operator,
            is_static,
        };
        let overloads_id = overloads.header.id;
        corpus.insert(Info::Overloads(overloads));

        replace_run(&mut new_members, &ids, overloads_id);
    }

    if let Some(Info::Namespace(n)) = corpus.get_mut(ns_id) {
        n.members = new_members;
    }
}

fn fold_record(corpus: &mut Corpus, record_id: SymbolId) {
    for access in [AccessKind::Public, AccessKind::Protected, AccessKind::Private] {
        for bucket in [TrancheBucket::Functions, TrancheBucket::StaticFunctions] {
            let functions = match corpus.get(record_id) {
                Some(Info::Record(r)) => bucket.get(r.interface.tranche(access)).clone(),
                _ => continue,
            };

            let groups = group_by_name(corpus, &functions);
            let mut new_functions = functions.clone();

            for ((_name, is_static), ids) in groups {
                if ids.len() < 2 {
                    continue;
                }
                let Some(Info::Function(first)) = corpus.get(ids[0]) else {
                    continue;
                };
                let overloads = OverloadsInfo {
                    header: InfoHeader {
                        parent: Some(record_id),
                        namespace: first.header.namespace.clone(),
                        ..InfoHeader::new(SymbolId::derive(record_id, ids[0]), first.header.name.clone())
                    },
                    members: OverloadMembers::Member(
                        ids.iter().map(|&id| (id, access)).collect(),
                    ),
                    class: first.class,
                    operator: first.operator,
                    is_static,
                };
                let overloads_id = overloads.header.id;
                corpus.insert(Info::Overloads(overloads));

                replace_run(&mut new_functions, &ids, overloads_id);
            }

            if let Some(Info::Record(r)) = corpus.get_mut(record_id) {
                *bucket.get_mut(r.interface.tranche_mut(access)) = new_functions;
            }
        }
    }
}

/// Which function-shaped tranche bucket a fold pass over a record is
/// currently working on.
#[derive(Clone, Copy)]
enum TrancheBucket {
    Functions,
    StaticFunctions,
}

impl TrancheBucket {
    fn get(self, tranche: &crate::model::RecordTranche) -> &Vec<SymbolId> {
        match self {
            TrancheBucket::Functions => &tranche.functions,
            TrancheBucket::StaticFunctions => &tranche.static_functions,
        }
    }

    fn get_mut(self, tranche: &mut crate::model::RecordTranche) -> &mut Vec<SymbolId> {
        match self {
            TrancheBucket::Functions => &mut tranche.functions,
            TrancheBucket::StaticFunctions => &mut tranche.static_functions,
        }
    }
}

/// Replaces the first occurrence of `run[0]` in `members` with
/// `replacement` and removes every other id in `run`, so the folded
/// overload set appears exactly where the first overload used to.
fn replace_run(members: &mut Vec<SymbolId>, run: &[SymbolId], replacement: SymbolId) {
    if let Some(pos) = members.iter().position(|id| *id == run[0]) {
        members[pos] = replacement;
    }
    members.retain(|id| !run[1..].contains(id));
}
