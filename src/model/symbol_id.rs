//! [`SymbolId`]: the 20-byte identifier every `Info` is keyed by (§3).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 20-byte symbol identifier.
///
/// Extractor-provided ids are the truncated USR hash (an external
/// collaborator's concern; this crate never computes one from a USR
/// string). Synthetic ids minted by the finalizer ([`SymbolId::derive`])
/// use the same 20-byte shape so every id in the corpus is
/// indistinguishable in representation regardless of provenance
/// (invariant 5, §3).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub [u8; 20]);

impl SymbolId {
    /// The sentinel denoting "no symbol" / an unresolved reference.
    pub const INVALID: SymbolId = SymbolId([0u8; 20]);

    /// The distinguished id of the translation-unit root namespace.
    pub const GLOBAL: SymbolId = SymbolId([0xffu8; 20]);

    /// `true` for [`SymbolId::INVALID`].
    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }

    /// `true` for anything other than [`SymbolId::INVALID`].
    pub fn is_valid(self) -> bool {
        !self.is_invalid()
    }

    /// Build a synthetic id deterministically from a parent id and a
    /// source id: `hash(parent-id || source-id)` (§9). Used for
    /// synthetic overload sets (§4.E) and rehomed inherited members
    /// (§4.F). Truncates a SHA-256 digest to 20 bytes, the same
    /// "truncated cryptographic digest" shape as the original's
    /// base16-string-then-hash scheme.
    pub fn derive(parent: SymbolId, source: SymbolId) -> SymbolId {
        let mut hasher = Sha256::new();
        hasher.update(parent.0);
        hasher.update(source.0);
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest[..20]);
        SymbolId(bytes)
    }

    /// Lowercase hex representation, matching the textual form used in
    /// diagnostics and `Debug` output.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "SymbolId(invalid)")
        } else if *self == Self::GLOBAL {
            write!(f, "SymbolId(global)")
        } else {
            write!(f, "SymbolId({})", self.to_hex())
        }
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for SymbolId {
    fn default() -> Self {
        Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let a = SymbolId([1u8; 20]);
        let b = SymbolId([2u8; 20]);
        assert_eq!(SymbolId::derive(a, b), SymbolId::derive(a, b));
    }

    #[test]
    fn derive_is_order_sensitive() {
        let a = SymbolId([1u8; 20]);
        let b = SymbolId([2u8; 20]);
        assert_ne!(SymbolId::derive(a, b), SymbolId::derive(b, a));
    }

    #[test]
    fn derive_differs_from_inputs() {
        let a = SymbolId([1u8; 20]);
        let b = SymbolId([2u8; 20]);
        let derived = SymbolId::derive(a, b);
        assert_ne!(derived, a);
        assert_ne!(derived, b);
        assert!(derived.is_valid());
    }

    #[test]
    fn invalid_and_global_are_distinguished() {
        assert!(SymbolId::INVALID.is_invalid());
        assert!(SymbolId::GLOBAL.is_valid());
        assert_ne!(SymbolId::INVALID, SymbolId::GLOBAL);
    }
}
