//! The finalizer pipeline (§4): an ordered sequence of whole-corpus
//! passes run once extraction is complete.
//!
//! Pass order is F (base members) -> E (overloads) -> I (namespace
//! culling) -> H (sort members) -> G (javadoc). The base text
//! describing each pass only constrains F before E before H before G;
//! namespace culling (I) isn't pinned to a position by that text. It
//! runs after overload folding, since folding changes how many members
//! a scope has and culling needs the final count, and before sorting,
//! since there is no point ordering members that are about to be
//! removed, and before javadoc finalization, so a culled namespace's
//! members are never flagged as undocumented.
//!
//! Namespace culling itself always runs: only its keep-vs-drop decision
//! for an emptied namespace is gated by
//! [`Config::extract_empty_namespaces`](crate::config::Config::extract_empty_namespaces);
//! the extraction-mode downgrade it performs on every surviving
//! namespace is unconditional.

pub mod base_members;
pub mod javadoc;
pub mod namespaces;
pub mod overloads;
pub mod sort_members;

use crate::config::Config;
use crate::corpus::Corpus;
use crate::diagnostic::Diagnostics;
use crate::error::Result;
use crate::lookup::LookupCache;

/// Run every finalizer pass over `corpus` in the pipeline order.
pub fn finalize(
    corpus: &mut Corpus,
    config: &Config,
    cache: &mut LookupCache,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    base_members::run(corpus, config)?;
    if config.overloads {
        overloads::run(corpus)?;
    }
    namespaces::run(corpus, config.extract_empty_namespaces);
    if config.sort_members {
        sort_members::run(corpus);
    }
    javadoc::run(corpus, config, cache, diagnostics)?;
    corpus.refresh_undocumented();
    Ok(())
}
