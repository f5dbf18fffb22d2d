//! The in-process configuration value type (§6).
//!
//! Unlike the rest of the engineering surface this mirrors, there is no
//! loader here: reading a config file or command line is an external
//! collaborator's job (§1 Non-goals). Callers build a `Config` with
//! `Config::default()` and setters, the way `SharedTypeError`'s sibling
//! value types are built in the wider corpus.

use serde::{Deserialize, Serialize};

/// Knobs that steer the finalizer pipeline (§4.D–§4.I) and the parser's
/// leniency. `Default` matches the documented MrDocs defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fold same-named, same-access function overloads into a single
    /// `Overloads` entity (§4.E).
    pub overloads: bool,

    /// Apply the documented member ordering (§4.H) instead of leaving
    /// members in extraction order.
    pub sort_members: bool,

    /// Synthesize a brief from the first sentence of the description
    /// when none was written (§4.G step 5).
    pub auto_brief: bool,

    /// Synthesize missing `@param`/`@returns` entries from the
    /// function's declared parameters and return type (§4.G step 8).
    pub auto_function_metadata: bool,

    /// How documented public/protected base-class members are made
    /// visible on a derived record (§4.F).
    pub inherit_base_members: BaseMemberInheritance,

    /// Also inherit members declared under a `private` base (§4.F); by
    /// default a private base contributes nothing.
    pub extract_private: bool,

    /// Retain namespaces the culler (§4.I) would otherwise find empty
    /// and drop. The culler's mandatory extraction-mode downgrade
    /// (§4.I step 5) still runs regardless of this flag.
    pub extract_empty_namespaces: bool,

    /// Promote warnings (e.g. an unresolved `@copydoc` target) to hard
    /// errors instead of recording a diagnostic and continuing.
    pub warnings_as_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            overloads: true,
            sort_members: true,
            auto_brief: true,
            auto_function_metadata: true,
            inherit_base_members: BaseMemberInheritance::Reference,
            extract_private: false,
            extract_empty_namespaces: false,
            warnings_as_errors: false,
        }
    }
}

impl Config {
    pub fn with_overloads(mut self, value: bool) -> Self {
        self.overloads = value;
        self
    }

    pub fn with_sort_members(mut self, value: bool) -> Self {
        self.sort_members = value;
        self
    }

    pub fn with_auto_brief(mut self, value: bool) -> Self {
        self.auto_brief = value;
        self
    }

    pub fn with_auto_function_metadata(mut self, value: bool) -> Self {
        self.auto_function_metadata = value;
        self
    }

    pub fn with_inherit_base_members(mut self, value: BaseMemberInheritance) -> Self {
        self.inherit_base_members = value;
        self
    }

    pub fn with_extract_private(mut self, value: bool) -> Self {
        self.extract_private = value;
        self
    }

    pub fn with_extract_empty_namespaces(mut self, value: bool) -> Self {
        self.extract_empty_namespaces = value;
        self
    }

    pub fn with_warnings_as_errors(mut self, value: bool) -> Self {
        self.warnings_as_errors = value;
        self
    }
}

/// How the base-members finalizer (§4.F) makes inherited members
/// visible on a derived record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseMemberInheritance {
    /// Don't copy anything; derived records list only their own members.
    Never,
    /// Copy a `SymbolId` reference to the original base member (the
    /// original entity is left untouched, unowned by the derived record).
    /// A member in `dependency` extraction mode is omitted rather than
    /// referenced, since the reference would dangle once nothing else
    /// keeps the dependency around.
    Reference,
    /// Deep-copy base members in `dependency` mode under a synthetic id
    /// (§9 `SymbolId::derive`), so the derived record owns its own
    /// rehomed copy of the member that would otherwise dangle; every
    /// other base member is referenced, as in [`Self::Reference`].
    CopyDependencies,
    /// Deep-copy every inherited member under a synthetic id, so the
    /// derived record owns an independent, rehomed copy of each.
    CopyAll,
}
