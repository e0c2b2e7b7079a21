//! The identifier interner (C1).
//!
//! Absolute identifiers — dotted segment paths — are interned to dense,
//! first-seen-order [`KeyIdent`]s. The authoritative dedup table is a
//! `FxHashMap`; [`hash_segments`] is a standalone, independently testable
//! mixing function kept alongside it (not used by the table itself, whose
//! hashing is `rustc-hash`'s) because downstream code may want a stable,
//! reproducible hash of a path without touching the interner (e.g. for
//! content-addressed caching of resolved trees).

use rustc_hash::FxHashMap;
use std::hash::{Hash, Hasher};

use lesfl_common::KeyIdent;

/// Two-round multiply-xorshift mix over a per-segment hash, modeled on the
/// 64-bit MurmurHash2A finalization: seed with the segment count, fold each
/// segment's hash in with one multiply-xorshift-multiply step, then run a
/// final avalanche over the accumulator.
#[must_use]
pub fn hash_segments(segments: &[String]) -> u64 {
    const M: u64 = 0xc6a4_7a93_5bd1_e995;
    const R1: u32 = 47;
    const R2: u32 = 47;
    const R3: u32 = 47;

    let mut h = segments.len() as u64;
    for segment in segments {
        let mut hasher = rustc_hash::FxHasher::default();
        segment.hash(&mut hasher);
        let mut k = hasher.finish().wrapping_mul(M);
        k ^= k >> R1;
        k = k.wrapping_mul(M);
        h = h.wrapping_mul(M) ^ k;
    }
    h ^= h >> R2;
    h = h.wrapping_mul(M);
    h ^= h >> R3;
    h
}

/// Interns absolute-identifier segment vectors to dense [`KeyIdent`]s.
#[derive(Debug, Default)]
pub struct Interner {
    keys: FxHashMap<Vec<String>, KeyIdent>,
    segments: Vec<Vec<String>>,
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `segments`, returning its key and whether this call newly
    /// added it. Idempotent: interning equal segment vectors always
    /// returns the same key.
    pub fn intern(&mut self, segments: &[String]) -> (KeyIdent, bool) {
        if let Some(&key) = self.keys.get(segments) {
            return (key, false);
        }
        let key = KeyIdent::new(self.segments.len() as u32);
        self.segments.push(segments.to_vec());
        self.keys.insert(segments.to_vec(), key);
        (key, true)
    }

    #[must_use]
    pub fn lookup_key(&self, segments: &[String]) -> Option<KeyIdent> {
        self.keys.get(segments).copied()
    }

    #[must_use]
    pub fn lookup_segments(&self, key: KeyIdent) -> &[String] {
        &self.segments[key.as_usize()]
    }

    /// The fully-qualified, dot-joined text of `key`, for error messages.
    /// The root module (empty segment list) renders as an empty string.
    #[must_use]
    pub fn display(&self, key: KeyIdent) -> String {
        self.lookup_segments(key).join(".")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn intern_is_idempotent() {
        let mut interner = Interner::new();
        let (key1, added1) = interner.intern(&segs(&["a", "b"]));
        let (key2, added2) = interner.intern(&segs(&["a", "b"]));
        assert_eq!(key1, key2);
        assert!(added1);
        assert!(!added2);
    }

    #[test]
    fn keys_are_dense_and_first_seen_order() {
        let mut interner = Interner::new();
        let (k0, _) = interner.intern(&segs(&["a"]));
        let (k1, _) = interner.intern(&segs(&["b"]));
        let (k2, _) = interner.intern(&segs(&["a"]));
        assert_eq!(k0.index(), 0);
        assert_eq!(k1.index(), 1);
        assert_eq!(k2, k0);
    }

    #[test]
    fn lookup_segments_is_inverse_of_intern() {
        let mut interner = Interner::new();
        let (key, _) = interner.intern(&segs(&["foo", "bar"]));
        assert_eq!(interner.lookup_segments(key), &segs(&["foo", "bar"])[..]);
    }

    #[test]
    fn lookup_key_misses_unknown_path() {
        let interner = Interner::new();
        assert_eq!(interner.lookup_key(&segs(&["nope"])), None);
    }

    #[test]
    fn empty_path_is_a_valid_key_for_the_root_module() {
        let mut interner = Interner::new();
        let (key, added) = interner.intern(&[]);
        assert!(added);
        assert!(interner.lookup_segments(key).is_empty());
    }

    #[test]
    fn hash_segments_is_stable_and_order_sensitive() {
        let a = hash_segments(&segs(&["a", "b"]));
        let b = hash_segments(&segs(&["a", "b"]));
        let c = hash_segments(&segs(&["b", "a"]));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
