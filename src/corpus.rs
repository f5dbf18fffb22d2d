//! The in-memory symbol corpus (§4.C): storage, not search — insertion,
//! lookup-by-id, and the undocumented-entity set. Name resolution
//! lives in [`crate::lookup`].

use crate::model::{ExtractionMode, Info, InfoKind, SymbolId};
use std::collections::HashMap;

/// An entity the corpus holds but that carries no javadoc at all,
/// tracked separately so a host can report "undocumented" coverage
/// without re-walking every `Info` (§4.C, mirrors `UndocumentedInfo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndocumentedInfo {
    pub id: SymbolId,
    pub name: String,
    pub kind: InfoKind,
}

/// Owns every `Info` in a translation unit's worth of extracted
/// entities, keyed by `SymbolId`.
///
/// Mirrors the original `InfoSet`'s hash-by-id, equal-by-id semantics:
/// two entries are never compared structurally, only by `SymbolId`, so
/// insertion is a strict replace-by-id rather than a merge.
#[derive(Debug, Default)]
pub struct Corpus {
    entities: HashMap<SymbolId, Info>,
    /// Insertion order, preserved because several finalizer passes
    /// (§4.F, §4.I) need a stable traversal order independent of hash
    /// iteration order.
    order: Vec<SymbolId>,
    undocumented: Vec<UndocumentedInfo>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity. Returns the previous value at that
    /// id, if any.
    pub fn insert(&mut self, info: Info) -> Option<Info> {
        let id = info.id();
        if !self.entities.contains_key(&id) {
            self.order.push(id);
        }
        self.entities.insert(id, info)
    }

    pub fn get(&self, id: SymbolId) -> Option<&Info> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Info> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Remove an entity entirely, e.g. after the namespace culler
    /// (§4.I) decides it contributes nothing.
    pub fn remove(&mut self, id: SymbolId) -> Option<Info> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            self.order.retain(|&existing| existing != id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate entities in insertion order (stable across runs given
    /// the same input, unlike hash-map iteration).
    pub fn iter(&self) -> impl Iterator<Item = &Info> {
        self.order.iter().filter_map(move |id| self.entities.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.order.iter().copied()
    }

    /// Recompute the undocumented-entity set from scratch: every
    /// entity with no javadoc and `ExtractionMode::Regular` (§4.C).
    /// Call after the finalizer pipeline runs, since culling (§4.I)
    /// and javadoc synthesis (§4.G) both change the answer.
    pub fn refresh_undocumented(&mut self) {
        self.undocumented = self
            .order
            .iter()
            .filter_map(|id| self.entities.get(id))
            .filter(|info| info.javadoc().is_none() && info.extraction() == ExtractionMode::Regular)
            .map(|info| UndocumentedInfo {
                id: info.id(),
                name: info.name().to_string(),
                kind: info.kind(),
            })
            .collect();
    }

    pub fn undocumented(&self) -> &[UndocumentedInfo] {
        &self.undocumented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InfoHeader, NamespaceInfo};

    fn namespace(id: u8, name: &str) -> Info {
        Info::Namespace(NamespaceInfo {
            header: InfoHeader::new(SymbolId([id; 20]), name),
            members: Vec::new(),
            usings: Vec::new(),
            is_inline: false,
            is_anonymous: false,
        })
    }

    #[test]
    fn insert_replaces_by_id() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(1, "foo"));
        assert_eq!(corpus.len(), 1);
        corpus.insert(namespace(1, "renamed"));
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(SymbolId([1u8; 20])).unwrap().name(), "renamed");
    }

    #[test]
    fn iteration_order_is_insertion_order() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(2, "b"));
        corpus.insert(namespace(1, "a"));
        let names: Vec<_> = corpus.iter().map(Info::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn remove_drops_entity_and_order_entry() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(1, "a"));
        corpus.remove(SymbolId([1u8; 20]));
        assert!(corpus.is_empty());
        assert_eq!(corpus.iter().count(), 0);
    }

    #[test]
    fn undocumented_tracks_entities_with_no_javadoc() {
        let mut corpus = Corpus::new();
        corpus.insert(namespace(1, "a"));
        corpus.refresh_undocumented();
        assert_eq!(corpus.undocumented().len(), 1);
        assert_eq!(corpus.undocumented()[0].name, "a");
    }
}
