//! Pass I: namespace culling (§4.I).
//!
//! A post-order walk of the namespace tree: a namespace whose children
//! have all been culled away contributes nothing and, unless
//! [`Config::extract_empty_namespaces`](crate::config::Config::extract_empty_namespaces)
//! says to keep it anyway, is removed entirely. Whether kept or
//! removed doesn't change the other half of this pass: a namespace
//! whose surviving children are uniformly dependency-only or
//! implementation-defined is downgraded to match, and one with any
//! `SeeBelow` child is downgraded to `SeeBelow` itself, so a generated
//! page never promises more than its contents deliver. That downgrade
//! always runs, even for a namespace retained empty by config, since
//! an empty child set is vacuously uniform.

use crate::corpus::Corpus;
use crate::model::{ExtractionMode, Info, SymbolId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FinalizerResult {
    None,
    Removed,
    Changed,
}

pub fn run(corpus: &mut Corpus, extract_empty_namespaces: bool) {
    let top_level: Vec<SymbolId> = corpus
        .iter()
        .filter(|info| matches!(info, Info::Namespace(_)) && info.parent().is_none())
        .map(Info::id)
        .collect();

    for id in top_level {
        cull_namespace(corpus, id, extract_empty_namespaces);
    }
}

fn cull_namespace(corpus: &mut Corpus, id: SymbolId, extract_empty_namespaces: bool) -> FinalizerResult {
    let members = match corpus.get(id) {
        Some(Info::Namespace(n)) => n.members.clone(),
        _ => return FinalizerResult::None,
    };

    let mut new_members = Vec::with_capacity(members.len());
    let mut all_dependencies = true;
    let mut all_implementation_defined = true;
    let mut any_see_below = false;
    let mut changed = false;

    for member_id in members {
        let is_namespace = matches!(corpus.get(member_id), Some(Info::Namespace(_)));
        let keep = if is_namespace {
            match cull_namespace(corpus, member_id, extract_empty_namespaces) {
                FinalizerResult::Removed => {
                    changed = true;
                    false
                }
                FinalizerResult::Changed => {
                    changed = true;
                    true
                }
                FinalizerResult::None => true,
            }
        } else {
            corpus.get(member_id).is_some()
        };

        if !keep {
            changed = true;
            continue;
        }

        if let Some(member) = corpus.get(member_id) {
            match member.extraction() {
                ExtractionMode::Dependency => all_implementation_defined = false,
                ExtractionMode::ImplementationDefined => all_dependencies = false,
                ExtractionMode::SeeBelow => {
                    any_see_below = true;
                    all_dependencies = false;
                    all_implementation_defined = false;
                }
                ExtractionMode::Regular => {
                    all_dependencies = false;
                    all_implementation_defined = false;
                }
            }
        }
        new_members.push(member_id);
    }

    if new_members.is_empty() && !extract_empty_namespaces {
        corpus.remove(id);
        return FinalizerResult::Removed;
    }

    if changed {
        if let Some(Info::Namespace(n)) = corpus.get_mut(id) {
            n.members = new_members;
        }
    }

    if let Some(Info::Namespace(n)) = corpus.get_mut(id) {
        if n.header.extraction == ExtractionMode::Regular {
            if any_see_below {
                n.header.extraction = ExtractionMode::SeeBelow;
                changed = true;
            } else if all_dependencies {
                n.header.extraction = ExtractionMode::Dependency;
                changed = true;
            } else if all_implementation_defined {
                n.header.extraction = ExtractionMode::ImplementationDefined;
                changed = true;
            }
        }
    }

    if changed {
        FinalizerResult::Changed
    } else {
        FinalizerResult::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InfoHeader, NamespaceInfo};

    fn namespace(id: u8, parent: Option<u8>, members: &[u8]) -> Info {
        let mut header = InfoHeader::new(SymbolId([id; 20]), format!("ns{id}"));
        header.parent = parent.map(|p| SymbolId([p; 20]));
        Info::Namespace(NamespaceInfo {
            header,
            members: members.iter().map(|&m| SymbolId([m; 20])).collect(),
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        })
    }

    #[test]
    fn empty_namespace_is_removed_by_default() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(1, None, &[]));
        run(&mut corpus, false);
        assert!(corpus.get(SymbolId([1u8; 20])).is_none());
    }

    #[test]
    fn empty_namespace_is_retained_when_configured() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(1, None, &[]));
        run(&mut corpus, true);
        let Some(Info::Namespace(ns)) = corpus.get(SymbolId([1u8; 20])) else {
            panic!("namespace should have been retained");
        };
        assert!(ns.members.is_empty());
        assert_eq!(ns.header.extraction, ExtractionMode::Dependency);
    }

    #[test]
    fn namespace_with_surviving_member_is_kept() {
        let mut corpus = Corpus::new();
        let mut header = InfoHeader::new(SymbolId([2u8; 20]), "Widget");
        header.parent = Some(SymbolId([1u8; 20]));
        corpus.insert(Info::Record(crate::model::RecordInfo {
            header,
            tag: crate::model::RecordTag::Class,
            is_union: false,
            bases: Vec::new(),
            interface: crate::model::RecordInterface::default(),
            template: None,
            is_final: false,
        }));
        corpus.insert(namespace(1, None, &[2]));
        run(&mut corpus, false);
        assert!(corpus.get(SymbolId([1u8; 20])).is_some());
    }

    #[test]
    fn emptied_child_namespace_is_pruned_from_parent() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(2, Some(1), &[]));
        corpus.insert(namespace(1, None, &[2]));
        run(&mut corpus, false);
        assert!(corpus.get(SymbolId([1u8; 20])).is_none());
        assert!(corpus.get(SymbolId([2u8; 20])).is_none());
    }

    #[test]
    fn all_dependency_children_downgrade_the_namespace() {
        let mut corpus = Corpus::new();
        let mut header = InfoHeader::new(SymbolId([2u8; 20]), "Helper");
        header.parent = Some(SymbolId([1u8; 20]));
        header.extraction = ExtractionMode::Dependency;
        corpus.insert(Info::Record(crate::model::RecordInfo {
            header,
            tag: crate::model::RecordTag::Class,
            is_union: false,
            bases: Vec::new(),
            interface: crate::model::RecordInterface::default(),
            template: None,
            is_final: false,
        }));
        corpus.insert(namespace(1, None, &[2]));
        run(&mut corpus, false);
        let Some(Info::Namespace(ns)) = corpus.get(SymbolId([1u8; 20])) else {
            panic!("namespace missing");
        };
        assert_eq!(ns.header.extraction, ExtractionMode::Dependency);
    }
}
