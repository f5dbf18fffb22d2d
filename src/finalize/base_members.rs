//! Pass F: base-member inheritance (§4.F).
//!
//! Propagates documented base-class members onto every derived record,
//! per [`crate::config::BaseMemberInheritance`] and
//! [`Config::extract_private`]. A member already shadowed by one the
//! derived record declares itself is skipped.

use crate::config::{BaseMemberInheritance, Config};
use crate::corpus::Corpus;
use crate::error::Result;
use crate::model::{AccessKind, ExtractionMode, FunctionInfo, Info, InfoKind, RecordTranche, SymbolId};
use std::cmp::max;

pub fn run(corpus: &mut Corpus, config: &Config) -> Result<()> {
    if config.inherit_base_members == BaseMemberInheritance::Never {
        return Ok(());
    }

    let record_ids: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Record(_)))
        .map(Info::id)
        .collect();

    for id in record_ids {
        process_record(corpus, config, id)?;
    }

    Ok(())
}

fn process_record(corpus: &mut Corpus, config: &Config, derived_id: SymbolId) -> Result<()> {
    let bases = match corpus.get(derived_id) {
        Some(Info::Record(r)) => r.bases.clone(),
        _ => return Ok(()),
    };

    for base in &bases {
        if base.access == AccessKind::Private && !config.extract_private {
            continue;
        }

        let base_interface = match corpus.get(base.id) {
            Some(Info::Record(r)) => r.interface.clone(),
            _ => continue,
        };

        for (declared_access, tranche) in [
            (AccessKind::Public, &base_interface.public),
            (AccessKind::Protected, &base_interface.protected),
            (AccessKind::Private, &base_interface.private),
        ] {
            if declared_access == AccessKind::Private && !config.extract_private {
                continue;
            }

            for member_id in tranche.all() {
                let Some(member_info) = corpus.get(member_id).cloned() else {
                    continue;
                };
                let resulting_access = max(base.access, declared_access);
                let is_dependency = member_info.extraction() == ExtractionMode::Dependency;

                if !should_copy(corpus, derived_id, &member_info) {
                    continue;
                }

                match config.inherit_base_members {
                    BaseMemberInheritance::Reference => {
                        if is_dependency {
                            continue;
                        }
                        place_member(corpus, derived_id, resulting_access, member_id, &member_info);
                    }
                    BaseMemberInheritance::CopyDependencies => {
                        if is_dependency {
                            copy_member(corpus, derived_id, resulting_access, member_id, &member_info);
                        } else {
                            place_member(corpus, derived_id, resulting_access, member_id, &member_info);
                        }
                    }
                    BaseMemberInheritance::CopyAll => {
                        copy_member(corpus, derived_id, resulting_access, member_id, &member_info);
                    }
                    BaseMemberInheritance::Never => unreachable!(),
                }
            }
        }
    }

    Ok(())
}

fn copy_member(
    corpus: &mut Corpus,
    derived_id: SymbolId,
    access: AccessKind,
    member_id: SymbolId,
    member_info: &Info,
) {
    let new_id = SymbolId::derive(derived_id, member_id);
    let mut copy = member_info.clone();
    copy.header_mut().id = new_id;
    copy.header_mut().parent = Some(derived_id);
    if member_info.extraction() == ExtractionMode::Dependency {
        if let Some(Info::Record(derived)) = corpus.get(derived_id) {
            copy.header_mut().extraction = derived.header.extraction;
        }
    }
    corpus.insert(copy);
    place_member(corpus, derived_id, access, new_id, member_info);
}

/// A base member is skipped if the derived record already declares
/// something that shadows it: same-named for most kinds, or an
/// overriding signature for functions (§4.F).
fn should_copy(corpus: &Corpus, derived_id: SymbolId, member: &Info) -> bool {
    let Some(Info::Record(derived)) = corpus.get(derived_id) else {
        return false;
    };

    let existing_ids = derived.interface.all_members();
    for existing_id in existing_ids {
        let Some(existing) = corpus.get(existing_id) else {
            continue;
        };
        if let (Info::Function(a), Info::Function(b)) = (existing, member) {
            if overrides(a, b) {
                return false;
            }
            continue;
        }
        if existing.name() == member.name() {
            return false;
        }
    }
    true
}

/// `true` when `candidate` has the same name and parameter list as
/// `existing`, meaning it shadows rather than overloads it (§4.F).
fn overrides(existing: &FunctionInfo, candidate: &FunctionInfo) -> bool {
    existing.header.name == candidate.header.name
        && existing.is_const == candidate.is_const
        && existing.params.len() == candidate.params.len()
        && existing
            .params
            .iter()
            .zip(candidate.params.iter())
            .all(|(a, b)| a.ty.name == b.ty.name)
}

fn place_member(
    corpus: &mut Corpus,
    derived_id: SymbolId,
    access: AccessKind,
    member_id: SymbolId,
    member_info: &Info,
) {
    let Some(Info::Record(derived)) = corpus.get_mut(derived_id) else {
        return;
    };
    push_into_category(derived.interface.tranche_mut(access), member_info, member_id);
}

/// Routes a member into its tranche bucket. Functions and variables
/// split further on their static-ness (§3 Tranche; spec.md:170 "static
/// and non-static functions with the same name form separate overload
/// sets" — which presupposes they live in separate buckets to begin
/// with).
fn push_into_category(tranche: &mut RecordTranche, member_info: &Info, id: SymbolId) {
    match member_info {
        Info::Record(_) => tranche.records.push(id),
        Info::Function(f) if f.is_static => tranche.static_functions.push(id),
        Info::Function(_) => tranche.functions.push(id),
        Info::Overloads(o) if o.is_static => tranche.static_functions.push(id),
        Info::Overloads(_) => tranche.functions.push(id),
        Info::Enum(_) => tranche.enums.push(id),
        Info::Typedef(_) => tranche.types.push(id),
        Info::Field(_) => tranche.fields.push(id),
        Info::Variable(v) if v.storage_class == crate::model::StorageClassKind::Static => {
            tranche.static_vars.push(id)
        }
        Info::Variable(_) => tranche.vars.push(id),
        Info::Friend(_) => tranche.friends.push(id),
        Info::Guide(_) => tranche.guides.push(id),
        Info::Concept(_) => tranche.concepts.push(id),
        Info::Using(_) => tranche.usings.push(id),
        Info::NamespaceAlias(_) => tranche.namespace_aliases.push(id),
        Info::Namespace(_) | Info::Enumerator(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseMemberInheritance;
    use crate::model::{BaseInfo, FunctionClass, InfoHeader, NoexceptInfo, OperatorKind, RecordInfo, RecordTag, StorageClassKind, TypeInfo};

    fn function(id: u8, name: &str, parent: u8, access: AccessKind) -> Info {
        Info::Function(FunctionInfo {
            header: {
                let mut h = InfoHeader::new(SymbolId([id; 20]), name);
                h.parent = Some(SymbolId([parent; 20]));
                h
            },
            access,
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
        })
    }

    fn record(id: u8, name: &str, bases: Vec<BaseInfo>) -> Info {
        Info::Record(RecordInfo {
            header: InfoHeader::new(SymbolId([id; 20]), name),
            tag: RecordTag::Class,
            is_union: false,
            bases,
            interface: RecordInterface::default(),
            template: None,
            is_final: false,
        })
    }

    #[test]
    fn public_base_member_is_referenced_on_derived() {
        let mut corpus = Corpus::new();
        corpus.insert(function(10, "speak", 1, AccessKind::Public));
        let mut base = match record(1, "Base", vec![]) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        base.interface.public.functions.push(SymbolId([10u8; 20]));
        corpus.insert(Info::Record(base));

        corpus.insert(record(
            2,
            "Derived",
            vec![BaseInfo {
                id: SymbolId([1u8; 20]),
                access: AccessKind::Public,
                is_virtual: false,
            }],
        ));

        let config = Config::default().with_inherit_base_members(BaseMemberInheritance::Reference);
        run(&mut corpus, &config).unwrap();

        let Some(Info::Record(derived)) = corpus.get(SymbolId([2u8; 20])) else {
            panic!("derived missing");
        };
        assert_eq!(derived.interface.public.functions, vec![SymbolId([10u8; 20])]);
    }

    #[test]
    fn private_base_contributes_nothing_by_default() {
        let mut corpus = Corpus::new();
        corpus.insert(function(10, "speak", 1, AccessKind::Public));
        let mut base = match record(1, "Base", vec![]) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        base.interface.public.functions.push(SymbolId([10u8; 20]));
        corpus.insert(Info::Record(base));
        corpus.insert(record(
            2,
            "Derived",
            vec![BaseInfo {
                id: SymbolId([1u8; 20]),
                access: AccessKind::Private,
                is_virtual: false,
            }],
        ));

        let config = Config::default();
        assert!(!config.extract_private);
        run(&mut corpus, &config).unwrap();

        let Some(Info::Record(derived)) = corpus.get(SymbolId([2u8; 20])) else {
            panic!("derived missing");
        };
        assert!(derived.interface.public.functions.is_empty());
    }

    #[test]
    fn private_base_contributes_when_extract_private_is_enabled() {
        let mut corpus = Corpus::new();
        corpus.insert(function(10, "speak", 1, AccessKind::Public));
        let mut base = match record(1, "Base", vec![]) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        base.interface.public.functions.push(SymbolId([10u8; 20]));
        corpus.insert(Info::Record(base));
        corpus.insert(record(
            2,
            "Derived",
            vec![BaseInfo {
                id: SymbolId([1u8; 20]),
                access: AccessKind::Private,
                is_virtual: false,
            }],
        ));

        let config = Config::default().with_extract_private(true);
        run(&mut corpus, &config).unwrap();

        let Some(Info::Record(derived)) = corpus.get(SymbolId([2u8; 20])) else {
            panic!("derived missing");
        };
        assert_eq!(derived.interface.public.functions, vec![SymbolId([10u8; 20])]);
    }

    #[test]
    fn shadowed_member_is_not_copied() {
        let mut corpus = Corpus::new();
        corpus.insert(function(10, "speak", 1, AccessKind::Public));
        let mut base = match record(1, "Base", vec![]) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        base.interface.public.functions.push(SymbolId([10u8; 20]));
        corpus.insert(Info::Record(base));

        corpus.insert(function(11, "speak", 2, AccessKind::Public));
        let mut derived = match record(
            2,
            "Derived",
            vec![BaseInfo {
                id: SymbolId([1u8; 20]),
                access: AccessKind::Public,
                is_virtual: false,
            }],
        ) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        derived.interface.public.functions.push(SymbolId([11u8; 20]));
        corpus.insert(Info::Record(derived));

        let config = Config::default();
        run(&mut corpus, &config).unwrap();

        let Some(Info::Record(derived)) = corpus.get(SymbolId([2u8; 20])) else {
            panic!("derived missing");
        };
        assert_eq!(derived.interface.public.functions, vec![SymbolId([11u8; 20])]);
    }

    #[test]
    fn copy_mode_mints_a_synthetic_id() {
        let mut corpus = Corpus::new();
        corpus.insert(function(10, "speak", 1, AccessKind::Public));
        let mut base = match record(1, "Base", vec![]) {
            Info::Record(r) => r,
            _ => unreachable!(),
        };
        base.interface.public.functions.push(SymbolId([10u8; 20]));
        corpus.insert(Info::Record(base));
        corpus.insert(record(
            2,
            "Derived",
            vec![BaseInfo {
                id: SymbolId([1u8; 20]),
                access: AccessKind::Public,
                is_virtual: false,
            }],
        ));

        let config = Config::default().with_inherit_base_members(BaseMemberInheritance::CopyAll);
        run(&mut corpus, &config).unwrap();

        let Some(Info::Record(derived)) = corpus.get(SymbolId([2u8; 20])) else {
            panic!("derived missing");
        };
        assert_eq!(derived.interface.public.functions.len(), 1);
        let copied_id = derived.interface.public.functions[0];
        assert_ne!(copied_id, SymbolId([10u8; 20]));
        assert_eq!(
            copied_id,
            SymbolId::derive(SymbolId([2u8; 20]), SymbolId([10u8; 20]))
        );
        assert!(corpus.contains(copied_id));
    }
}
