//! Diagnostic collection (§5, §6).
//!
//! Diagnostics are both buffered (so a host can inspect everything
//! that went wrong after a run) and emitted live as `tracing` events
//! at the moment they're recorded, mirroring the original's dual
//! `report::warn`/log-to-buffer behavior. This crate never calls
//! `process::exit`; `Diagnostics::has_errors` is how a host decides its
//! own exit code.

use crate::model::SymbolId;
use std::collections::HashSet;

/// The severity of a single diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// The entity the diagnostic is about, if any (e.g. the function
    /// whose `@copydoc` target didn't resolve).
    pub subject: Option<SymbolId>,
    /// Free-form context string (pass name, reference text, ...), used
    /// together with `subject` and `message` as the dedup key.
    pub context: String,
}

/// An accumulating, deduplicated diagnostic sink.
///
/// Deduplication mirrors the original Javadoc finalizer's
/// `warned_: set<pair<string,string>>`: the same complaint about the
/// same subject in the same context is recorded (and emitted) once.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<(Severity, Option<SymbolId>, String, String)>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, emitting it as a `tracing` event at a level
    /// matching its severity. Returns `false` if this was a duplicate
    /// and nothing was added.
    pub fn push(&mut self, severity: Severity, context: impl Into<String>, message: impl Into<String>) -> bool {
        self.push_about(severity, None, context, message)
    }

    /// Like [`Diagnostics::push`], additionally keying dedup on the
    /// `Info` the diagnostic concerns.
    pub fn push_about(
        &mut self,
        severity: Severity,
        subject: Option<SymbolId>,
        context: impl Into<String>,
        message: impl Into<String>,
    ) -> bool {
        let context = context.into();
        let message = message.into();
        let key = (severity, subject, context.clone(), message.clone());
        if !self.seen.insert(key) {
            return false;
        }

        match severity {
            Severity::Trace => tracing::trace!(target: "mrdocs_core", %context, ?subject, "{message}"),
            Severity::Debug => tracing::debug!(target: "mrdocs_core", %context, ?subject, "{message}"),
            Severity::Info => tracing::info!(target: "mrdocs_core", %context, ?subject, "{message}"),
            Severity::Warn => tracing::warn!(target: "mrdocs_core", %context, ?subject, "{message}"),
            Severity::Error => tracing::error!(target: "mrdocs_core", %context, ?subject, "{message}"),
        }

        self.entries.push(Diagnostic {
            severity,
            message,
            subject,
            context,
        });
        true
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Warn)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_diagnostics_are_collapsed() {
        let mut diags = Diagnostics::new();
        assert!(diags.push(Severity::Warn, "javadoc", "unresolved reference 'foo'"));
        assert!(!diags.push(Severity::Warn, "javadoc", "unresolved reference 'foo'"));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn distinct_subjects_are_not_collapsed() {
        let mut diags = Diagnostics::new();
        let a = SymbolId([1u8; 20]);
        let b = SymbolId([2u8; 20]);
        diags.push_about(Severity::Warn, Some(a), "javadoc", "missing brief");
        diags.push_about(Severity::Warn, Some(b), "javadoc", "missing brief");
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn has_errors_reflects_severity() {
        let mut diags = Diagnostics::new();
        diags.push(Severity::Warn, "parser", "deprecated syntax");
        assert!(!diags.has_errors());
        diags.push(Severity::Error, "lookup", "unresolved symbol");
        assert!(diags.has_errors());
    }
}
